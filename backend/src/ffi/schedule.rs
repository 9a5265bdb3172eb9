//! PyO3 wrapper for FeeSchedule
//!
//! Exposes schedule loading and fee evaluation to Python callers.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{fee_band_to_py, fee_result_to_py, reference_row_to_py};
use crate::engine::FeeOutcome;
use crate::reference::reference_table;
use crate::schedule::FeeSchedule as RustFeeSchedule;

/// Python wrapper for a validated fee schedule
///
/// # Example (from Python)
///
/// ```python
/// from advisory_fee_core_rs import FeeSchedule
///
/// schedule = FeeSchedule.standard()
/// quote = schedule.evaluate(10_000_000)
/// if quote is None:
///     print("Below minimum enterprise value")
/// else:
///     print(f"Total fee: {quote['total_fee']} ({quote['percentage_of_ev']}%)")
/// ```
#[pyclass(name = "FeeSchedule", frozen)]
pub struct PyFeeSchedule {
    inner: RustFeeSchedule,
}

#[pymethods]
impl PyFeeSchedule {
    /// The standard advisory schedule
    #[staticmethod]
    fn standard() -> Self {
        PyFeeSchedule {
            inner: RustFeeSchedule::standard().clone(),
        }
    }

    /// Load a schedule from JSON text
    ///
    /// # Errors
    ///
    /// Raises ValueError if the JSON is malformed or the bands are invalid
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let inner = RustFeeSchedule::from_json_str(json)
            .map_err(|e| PyValueError::new_err(format!("Invalid fee schedule: {}", e)))?;
        Ok(PyFeeSchedule { inner })
    }

    /// Evaluate the fee for an enterprise value
    ///
    /// # Returns
    ///
    /// Fee result dict, or None when the EV is below the schedule floor
    ///
    /// # Errors
    ///
    /// Raises ValueError for NaN, infinite or negative input
    fn evaluate(&self, py: Python, enterprise_value: f64) -> PyResult<Option<Py<PyDict>>> {
        let outcome = self
            .inner
            .evaluate(enterprise_value)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        match outcome {
            FeeOutcome::Priced(result) => Ok(Some(fee_result_to_py(py, &result)?)),
            FeeOutcome::Ineligible { .. } => Ok(None),
        }
    }

    /// Minimum eligible enterprise value
    fn floor(&self) -> i64 {
        self.inner.floor()
    }

    /// Enterprise value at which fees stop growing
    fn cap(&self) -> i64 {
        self.inner.cap()
    }

    /// List of band dicts in ascending order
    fn bands(&self, py: Python) -> PyResult<Py<PyList>> {
        let list = PyList::empty(py);
        for band in self.inner.bands() {
            list.append(fee_band_to_py(py, band)?)?;
        }
        Ok(list.unbind())
    }

    /// Fee at each band ceiling
    fn reference_table(&self, py: Python) -> PyResult<Py<PyList>> {
        let list = PyList::empty(py);
        let rows =
            reference_table(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))?;
        for row in rows {
            list.append(reference_row_to_py(py, &row)?)?;
        }
        Ok(list.unbind())
    }

    /// SHA-256 fingerprint of the schedule
    fn fingerprint(&self) -> PyResult<String> {
        self.inner
            .fingerprint()
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }
}
