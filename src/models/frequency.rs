//! Recurrence cadences
//!
//! `Frequency` is the cadence attached to a recurring expense or a savings
//! contribution, `BudgetPeriod` is a budget's own accounting cycle, and
//! `Recurrence` says whether an amount repeats at all.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Days in a calendar-average month (365.25 / 12, rounded as stored)
pub const DAYS_PER_MONTH: Decimal = dec!(30.44);

/// Days in a calendar-average year, leap days included
pub const DAYS_PER_YEAR: Decimal = dec!(365.25);

/// How often a recurring amount repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Self::Daily,
        Self::Weekly,
        Self::Biweekly,
        Self::Monthly,
        Self::Yearly,
    ];

    /// Length of one cycle in days
    pub fn days(&self) -> Decimal {
        match self {
            Self::Daily => Decimal::ONE,
            Self::Weekly => dec!(7),
            Self::Biweekly => dec!(14),
            Self::Monthly => DAYS_PER_MONTH,
            Self::Yearly => DAYS_PER_YEAR,
        }
    }

    /// Parse a frequency from user input (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Some(Self::Daily),
            "weekly" | "week" => Some(Self::Weekly),
            "biweekly" | "bi-weekly" | "fortnightly" => Some(Self::Biweekly),
            "monthly" | "month" => Some(Self::Monthly),
            "yearly" | "year" | "annual" | "annually" => Some(Self::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Biweekly => "Bi-weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        };
        write!(f, "{}", label)
    }
}

/// A budget's accounting cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    /// The cadence this period converts amounts into
    pub fn frequency(&self) -> Frequency {
        match self {
            Self::Daily => Frequency::Daily,
            Self::Weekly => Frequency::Weekly,
            Self::Monthly => Frequency::Monthly,
            Self::Yearly => Frequency::Yearly,
        }
    }

    /// Parse a budget period from user input (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match Frequency::parse(s)? {
            Frequency::Daily => Some(Self::Daily),
            Frequency::Weekly => Some(Self::Weekly),
            Frequency::Monthly => Some(Self::Monthly),
            Frequency::Yearly => Some(Self::Yearly),
            Frequency::Biweekly => None,
        }
    }
}

impl From<BudgetPeriod> for Frequency {
    fn from(period: BudgetPeriod) -> Self {
        period.frequency()
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.frequency())
    }
}

/// Whether an amount repeats, and how often
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    /// A single purchase; counted at full value in any period
    OneOff,
    Recurring(Frequency),
}

impl Recurrence {
    /// Build from the stored flag/frequency pair. A recurring flag without a
    /// usable frequency means monthly.
    pub fn from_parts(is_recurring: bool, frequency: Option<Frequency>) -> Self {
        if is_recurring {
            Self::Recurring(frequency.unwrap_or(Frequency::Monthly))
        } else {
            Self::OneOff
        }
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self, Self::Recurring(_))
    }

    pub fn frequency(&self) -> Option<Frequency> {
        match self {
            Self::OneOff => None,
            Self::Recurring(f) => Some(*f),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneOff => write!(f, "One-off"),
            Self::Recurring(freq) => write!(f, "{}", freq),
        }
    }
}

/// Deserialize an optional frequency, mapping unknown or malformed values to
/// `None` instead of failing the whole record.
pub(crate) fn lenient_frequency<'de, D>(deserializer: D) -> Result<Option<Frequency>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(Frequency::parse))
}
