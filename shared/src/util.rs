//! Display helpers shared by the dashboard, tax and list views

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Format a value as Brazilian reais: `R$ 1.234,56`, `-R$ 10,00`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let raw = whole.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}

pub fn format_brl_decimal(value: Decimal) -> String {
    format_brl(value.to_f64().unwrap_or_default())
}

/// Signed month-over-month variation: `+12.5%`, `-3.0%`, `0.0%`.
pub fn format_variation(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{value:.1}%")
}

/// Plain rate with two decimals: `6.00%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

/// Direction of a KPI variation, for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

pub fn trend(variation: f64) -> Trend {
    if variation > 0.0 {
        Trend::Up
    } else if variation < 0.0 {
        Trend::Down
    } else {
        Trend::Flat
    }
}
