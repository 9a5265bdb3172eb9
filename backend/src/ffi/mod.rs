//! Python bindings (feature `pyo3`)
//!
//! - `schedule`: `FeeSchedule` class
//! - `types`: Rust → Python dict conversions

pub mod schedule;
pub mod types;

use pyo3::prelude::*;

/// `format_currency(amount: float) -> str`
#[pyfunction]
#[pyo3(name = "format_currency")]
pub fn py_format_currency(amount: f64) -> String {
    crate::format::format_currency(amount)
}

/// `parse_currency_input(text: str) -> float`, lossy, 0.0 when unreadable
#[pyfunction]
#[pyo3(name = "parse_currency_input")]
pub fn py_parse_currency_input(text: &str) -> f64 {
    crate::format::parse_currency_input(text)
}
