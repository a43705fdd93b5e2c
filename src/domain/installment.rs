use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Keyed};
use crate::domain::contract::FeeType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    Open,
    Paid,
}

/// One scheduled payment obligation derived from a contract.
///
/// `client_name` and `fee_type` are display copies kept in sync by the
/// contract edit path; the authoritative values live on the contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Installment {
    pub id: String,
    pub contract_id: String,
    pub client_name: String,
    pub sequence: u32,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    pub fee_type: FeeType,
}

impl Installment {
    /// Deterministic id derived from the owning contract and position.
    pub fn derive_id(contract_id: &str, sequence: u32) -> String {
        format!("{contract_id}_P{sequence}")
    }

    pub fn is_paid(&self) -> bool {
        matches!(self.status, InstallmentStatus::Paid)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, InstallmentStatus::Open)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.due_date < today
    }

    /// Paid on or before the due date.
    pub fn paid_on_time(&self) -> bool {
        matches!(self.payment_date, Some(paid) if self.is_paid() && paid <= self.due_date)
    }

    pub fn mark_paid(&mut self, payment_date: NaiveDate) {
        self.status = InstallmentStatus::Paid;
        self.payment_date = Some(payment_date);
    }
}

impl Keyed for Installment {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Displayable for Installment {
    fn display_label(&self) -> String {
        format!("{} [{:?}]", self.id, self.status)
    }
}
