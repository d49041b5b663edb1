//! Period conversion
//!
//! Rescales an amount recorded at one cadence into its equivalent at another
//! by linear day-count scaling: `amount * target_days / source_days`.

use crate::models::{Frequency, Money, Recurrence};

/// Convert an amount that repeats every `from` into its equivalent every `to`.
///
/// Same cadence in and out returns the amount untouched.
pub fn convert(amount: Money, from: Frequency, to: Frequency) -> Money {
    if from == to {
        return amount;
    }
    amount.scale(to.days(), from.days())
}

/// Amount that counts against a period of cadence `target`.
///
/// One-off amounts are never smoothed over time: a single purchase counts
/// in full whatever the target period.
pub fn period_adjusted(amount: Money, recurrence: Recurrence, target: Frequency) -> Money {
    match recurrence {
        Recurrence::OneOff => amount,
        Recurrence::Recurring(from) => convert(amount, from, target),
    }
}
