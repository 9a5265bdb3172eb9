//! Type conversion utilities for FFI boundary
//!
//! Converts fee engine results into PyO3-compatible types (PyDict, PyList).

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::engine::{BandContribution, FeeResult};
use crate::reference::ReferenceRow;
use crate::schedule::{FeeBand, FixedFee};

/// Convert an ordered list of fixed fees into a Python dict
///
/// Python dicts keep insertion order, so component order survives.
fn fixed_fees_to_py<'py>(py: Python<'py>, fees: &[FixedFee]) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for fee in fees {
        dict.set_item(&fee.name, fee.amount)?;
    }
    Ok(dict)
}

/// Convert BandContribution to Python dict
fn contribution_to_py<'py>(py: Python<'py>, row: &BandContribution) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("band_index", row.band_index())?;
    dict.set_item("band_label", row.band_label())?;
    dict.set_item("ev_in_band", row.ev_in_band())?;
    dict.set_item("sliding_scale_rate", row.sliding_scale_rate())?;
    dict.set_item("fixed_fees_applied", fixed_fees_to_py(py, row.fixed_fees_applied())?)?;
    dict.set_item("sliding_scale_fee", row.sliding_scale_fee())?;
    dict.set_item("is_highest_band", row.is_highest_band())?;
    Ok(dict)
}

/// Convert FeeResult to Python dict
///
/// # Returns
///
/// Dictionary with keys:
/// - `enterprise_value`, `billed_enterprise_value`, `capped`
/// - `fixed_fee_totals` (dict name → amount), `fixed_fee_total`
/// - `sliding_scale_total`, `total_fee`, `percentage_of_ev`
/// - `breakdown` (list of dicts, one per band reached)
pub fn fee_result_to_py(py: Python, result: &FeeResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("enterprise_value", result.enterprise_value())?;
    dict.set_item("billed_enterprise_value", result.billed_enterprise_value())?;
    dict.set_item("capped", result.capped())?;
    dict.set_item("fixed_fee_totals", fixed_fees_to_py(py, result.fixed_fee_totals())?)?;
    dict.set_item("fixed_fee_total", result.fixed_fee_total())?;
    dict.set_item("sliding_scale_total", result.sliding_scale_total())?;
    dict.set_item("total_fee", result.total_fee())?;
    dict.set_item("percentage_of_ev", result.percentage_of_ev())?;

    let breakdown = PyList::empty(py);
    for row in result.breakdown() {
        breakdown.append(contribution_to_py(py, row)?)?;
    }
    dict.set_item("breakdown", breakdown)?;

    Ok(dict.unbind())
}

/// Convert FeeBand to Python dict
pub fn fee_band_to_py(py: Python, band: &FeeBand) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("label", &band.label)?;
    dict.set_item("min_ev", band.min_ev)?;
    dict.set_item("max_ev", band.max_ev)?;
    dict.set_item("sliding_scale_rate", band.sliding_scale_rate)?;
    dict.set_item("fixed_fees", fixed_fees_to_py(py, &band.fixed_fees)?)?;
    Ok(dict.unbind())
}

/// Convert ReferenceRow to Python dict
pub fn reference_row_to_py(py: Python, row: &ReferenceRow) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("band_label", &row.band_label)?;
    dict.set_item("enterprise_value", row.enterprise_value)?;
    dict.set_item("fixed_fee_total", row.fixed_fee_total)?;
    dict.set_item("sliding_scale_total", row.sliding_scale_total)?;
    dict.set_item("total_fee", row.total_fee)?;
    dict.set_item("percentage_of_ev", row.percentage_of_ev)?;
    Ok(dict.unbind())
}
