//! Pricing

use rust_decimal::Decimal;

use crate::cart::CartLine;

/// Calculates the total for one line: unit price times quantity.
///
/// Saturates at [`Decimal::MAX`] instead of overflowing.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price.saturating_mul(Decimal::from(quantity))
}

/// Calculates the total price of a list of cart lines
pub fn total_price(lines: &[CartLine]) -> Decimal {
    lines.iter().fold(Decimal::ZERO, |acc, line| {
        acc.saturating_add(line_total(line.unit_price(), line.quantity()))
    })
}

/// Sums the quantities of a list of cart lines
pub fn total_quantity(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity())).sum()
}
