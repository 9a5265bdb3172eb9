//! Formatted fee summary
//!
//! The presentation/export view of a `FeeResult`: the same fields, already
//! run through the currency helpers. Carries nothing beyond what the engine
//! computes; retainer, rebate or effective-rate fields belong to a different
//! result shape and are deliberately absent.

use serde::Serialize;
use std::fmt;

use crate::engine::FeeResult;
use crate::format::{format_amount, format_currency, format_percentage};

/// One formatted breakdown row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub band_label: String,
    pub ev_in_band: String,
    /// (component name, formatted amount)
    pub fixed_fees: Vec<(String, String)>,
    pub fixed_fee_total: String,
    pub sliding_scale_fee: String,
    pub total: String,
}

/// A `FeeResult` with every amount formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeSummary {
    pub enterprise_value: String,
    pub billed_enterprise_value: String,
    pub capped: bool,
    pub fixed_fees: Vec<(String, String)>,
    pub fixed_fee_total: String,
    pub sliding_scale_total: String,
    pub total_fee: String,
    pub percentage_of_ev: String,
    pub rows: Vec<SummaryRow>,
}

impl FeeSummary {
    pub fn from_result(result: &FeeResult) -> Self {
        let rows = result
            .breakdown()
            .iter()
            .map(|row| SummaryRow {
                band_label: row.band_label().to_string(),
                ev_in_band: format_currency(row.ev_in_band()),
                fixed_fees: row
                    .fixed_fees_applied()
                    .iter()
                    .map(|fee| (fee.name.clone(), format_amount(fee.amount)))
                    .collect(),
                fixed_fee_total: format_amount(row.fixed_fee_total()),
                sliding_scale_fee: format_amount(row.sliding_scale_fee()),
                total: format_amount(row.total()),
            })
            .collect();

        Self {
            enterprise_value: format_currency(result.enterprise_value()),
            billed_enterprise_value: format_currency(result.billed_enterprise_value()),
            capped: result.capped(),
            fixed_fees: result
                .fixed_fee_totals()
                .iter()
                .map(|fee| (fee.name.clone(), format_amount(fee.amount)))
                .collect(),
            fixed_fee_total: format_amount(result.fixed_fee_total()),
            sliding_scale_total: format_amount(result.sliding_scale_total()),
            total_fee: format_amount(result.total_fee()),
            percentage_of_ev: format_percentage(result.percentage_of_ev()),
            rows,
        }
    }
}

impl From<&FeeResult> for FeeSummary {
    fn from(result: &FeeResult) -> Self {
        FeeSummary::from_result(result)
    }
}

impl fmt::Display for FeeSummary {
    /// Plain-text table: one line per band, then totals
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Enterprise value: {}", self.enterprise_value)?;
        if self.capped {
            write!(f, " (billed at {})", self.billed_enterprise_value)?;
        }
        writeln!(f)?;
        writeln!(f)?;

        writeln!(
            f,
            "{:<16} {:>14} {:>14} {:>14} {:>14}",
            "Band", "EV in band", "Fixed", "Sliding", "Total"
        )?;
        for row in &self.rows {
            // Components are itemized in the totals below
            let fixed = if row.fixed_fee_total == "$0" {
                "-"
            } else {
                row.fixed_fee_total.as_str()
            };
            writeln!(
                f,
                "{:<16} {:>14} {:>14} {:>14} {:>14}",
                row.band_label, row.ev_in_band, fixed, row.sliding_scale_fee, row.total
            )?;
        }
        writeln!(f)?;

        for (name, amount) in &self.fixed_fees {
            writeln!(f, "{:<24} {:>14}", name, amount)?;
        }
        writeln!(f, "{:<24} {:>14}", "sliding scale", self.sliding_scale_total)?;
        writeln!(f, "{:<24} {:>14}", "TOTAL FEE", self.total_fee)?;
        write!(f, "{:<24} {:>14}", "% of EV", self.percentage_of_ev)
    }
}
