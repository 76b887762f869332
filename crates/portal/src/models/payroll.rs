//! Payroll domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use fernhill_core::{SalarySlipId, StaffUserId};

/// An issued salary slip for one pay period.
#[derive(Debug, Clone)]
pub struct SalarySlip {
    pub id: SalarySlipId,
    pub staff_id: StaffUserId,
    /// Display name of the staff member (joined in for HR views).
    pub staff_name: String,
    /// First day of the pay period (always the 1st of a month).
    pub period: NaiveDate,
    pub gross: Decimal,
    pub deductions: Decimal,
    pub net: Decimal,
    pub issued_at: DateTime<Utc>,
}

impl SalarySlip {
    /// Period formatted as "March 2026" for templates.
    #[must_use]
    pub fn period_label(&self) -> String {
        self.period.format("%B %Y").to_string()
    }
}
