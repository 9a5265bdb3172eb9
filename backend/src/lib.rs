//! Advisory Fee Core - Rust Engine
//!
//! Estimates M&A advisory fees from an enterprise value (EV) using a banded,
//! cumulative fee schedule.
//!
//! # Architecture
//!
//! - **schedule**: Fee bands and the validated, immutable `FeeSchedule`
//! - **engine**: Eligibility/capping, band accumulation, result assembly
//! - **format**: Currency formatting and free-text parsing
//! - **reference**: Fee quoted at every band ceiling
//! - **summary**: Formatted view of a result for presentation and export
//!
//! # Critical Invariants
//!
//! 1. All fee amounts are i64 (whole currency units)
//! 2. Evaluation is pure and deterministic
//! 3. Breakdown rows always sum exactly to the totals
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod engine;
pub mod format;
pub mod reference;
pub mod schedule;
pub mod summary;

// Re-exports for convenience
pub use engine::{evaluate, BandContribution, Eligibility, FeeError, FeeOutcome, FeeResult};
pub use format::{format_amount, format_currency, format_percentage, parse_currency_input};
pub use reference::{reference_table, ReferenceRow};
pub use schedule::{FeeBand, FeeSchedule, FixedFee, ScheduleError};
pub use summary::{FeeSummary, SummaryRow};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn advisory_fee_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::schedule::PyFeeSchedule>()?;
    m.add_function(wrap_pyfunction!(ffi::py_format_currency, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::py_parse_currency_input, m)?)?;
    Ok(())
}
