//! Period conversion command

use super::{parse_frequency, parse_money};
use crate::config::Settings;
use crate::engine::convert;
use crate::error::PlannerResult;

/// Convert an amount between frequencies and print the result
pub fn handle_convert_command(
    settings: &Settings,
    amount: &str,
    from: &str,
    to: &str,
) -> PlannerResult<()> {
    let amount = parse_money(amount)?;
    let from = parse_frequency(from)?;
    let to = parse_frequency(to)?;

    let converted = convert(amount, from, to);
    tracing::debug!(%amount, %from, %to, %converted, "converted amount");

    println!(
        "{} {} = {} {}",
        amount.format_with_symbol(&settings.currency_symbol),
        from.as_str(),
        converted.format_with_symbol(&settings.currency_symbol),
        to.as_str()
    );
    Ok(())
}
