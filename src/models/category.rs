//! Expense categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spending category attached to an expense (and optionally to a budget as a filter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Housing,
    Utilities,
    Entertainment,
    Health,
    Shopping,
    Education,
    #[default]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
        Self::Food,
        Self::Transport,
        Self::Housing,
        Self::Utilities,
        Self::Entertainment,
        Self::Health,
        Self::Shopping,
        Self::Education,
        Self::Other,
    ];

    /// Parse category from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" | "groceries" | "dining" => Some(Self::Food),
            "transport" | "transportation" => Some(Self::Transport),
            "housing" | "rent" => Some(Self::Housing),
            "utilities" | "bills" => Some(Self::Utilities),
            "entertainment" => Some(Self::Entertainment),
            "health" | "medical" => Some(Self::Health),
            "shopping" => Some(Self::Shopping),
            "education" => Some(Self::Education),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Entertainment => "entertainment",
            Self::Health => "health",
            Self::Shopping => "shopping",
            Self::Education => "education",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Shopping => "Shopping",
            Self::Education => "Education",
            Self::Other => "Other",
        };
        write!(f, "{}", label)
    }
}
