//! Receipt
//!
//! Plain-text renderings of the cart and of a placed order.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    checkout::Order,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The output could not be written to.
    #[error("IO error")]
    Io,
}

/// Write the cart lines and totals to `out`.
///
/// # Errors
///
/// Returns [`ReceiptError::Io`] if writing fails.
pub fn write_cart_summary(mut out: impl io::Write, cart: &Cart) -> Result<(), ReceiptError> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty.").map_err(|_err| ReceiptError::Io);
    }

    write_lines_table(&mut out, cart.lines(), cart.currency())?;

    write_totals(&mut out, cart.item_count(), cart.total())
}

/// Write the confirmation for a placed order to `out`.
///
/// # Errors
///
/// Returns [`ReceiptError::Io`] if writing fails.
pub fn write_order_confirmation(mut out: impl io::Write, order: &Order) -> Result<(), ReceiptError> {
    let customer = order.customer();
    let schedule = order.schedule();

    let mut details = vec![
        ("Order", order.id().to_string()),
        ("Customer", customer.full_name()),
        ("Email", customer.email().to_string()),
        ("Phone", customer.phone().to_string()),
        ("Address", address_line(order)),
        ("Scheduled", format!("{} at {}", schedule.date(), schedule.time())),
    ];

    if !schedule.special_instructions().is_empty() {
        details.push(("Instructions", schedule.special_instructions().to_string()));
    }

    details.push(("Paid with", order.payment().to_string()));

    let label_width = details
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or_default();

    writeln!(out, "\nThank you! Your order has been placed.\n").map_err(|_err| ReceiptError::Io)?;

    for (label, value) in &details {
        writeln!(out, " {label:>label_width$}:  {value}").map_err(|_err| ReceiptError::Io)?;
    }

    write_lines_table(&mut out, order.lines(), order.total().currency())?;

    write_totals(&mut out, order.item_count(), order.total())
}

fn address_line(order: &Order) -> String {
    let customer = order.customer();

    match customer.state() {
        Some(state) => format!(
            "{}, {}, {state} {}",
            customer.address(),
            customer.city(),
            customer.zip_code()
        ),
        None => format!(
            "{}, {} {}",
            customer.address(),
            customer.city(),
            customer.zip_code()
        ),
    }
}

fn write_lines_table(
    out: &mut impl io::Write,
    lines: &[CartLine],
    currency: &'static Currency,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Service", "Category", "Unit Price", "Qty", "Line Total"]);

    for line in lines {
        builder.push_record([
            line.title().to_string(),
            line.category().unwrap_or_default().to_string(),
            money(line.unit_price(), currency),
            line.quantity().to_string(),
            money(line.line_total(), currency),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::Io)
}

fn write_totals(
    out: &mut impl io::Write,
    item_count: u64,
    total: Money<'static, Currency>,
) -> Result<(), ReceiptError> {
    let items = item_count.to_string();
    let total = total.to_string();
    let width = items.len().max(total.len());

    writeln!(out, " Items:  {items:>width$}").map_err(|_err| ReceiptError::Io)?;
    writeln!(out, " Total:  {total:>width$}").map_err(|_err| ReceiptError::Io)?;

    writeln!(out).map_err(|_err| ReceiptError::Io)
}

fn money(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}
