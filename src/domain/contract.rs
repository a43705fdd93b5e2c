use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Keyed};

/// How the engagement fee is charged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    Upfront,
    Contingency,
    Monthly,
}

impl FeeType {
    pub fn label(&self) -> &'static str {
        match self {
            FeeType::Upfront => "Upfront",
            FeeType::Contingency => "Contingency",
            FeeType::Monthly => "Monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Active,
    Closed,
}

/// An engagement with a client specifying the total fee and its payment
/// schedule. Financial terms (`total_value`, `installment_count`,
/// `start_date`) are frozen once any child installment has been paid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Contract {
    pub id: String,
    pub client_id: Uuid,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub legal_area: String,
    pub fee_type: FeeType,
    pub acquisition_channel: String,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    pub total_value: f64,
    pub installment_count: u32,
    pub start_date: NaiveDate,
    pub status: ContractStatus,
}

impl Contract {
    pub fn is_active(&self) -> bool {
        matches!(self.status, ContractStatus::Active)
    }

    /// The fields whose change forces a schedule rebuild.
    pub fn financial_terms(&self) -> (f64, u32, NaiveDate) {
        (self.total_value, self.installment_count, self.start_date)
    }
}

impl Keyed for Contract {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Displayable for Contract {
    fn display_label(&self) -> String {
        format!("{} — {} ({})", self.id, self.client_name, self.fee_type.label())
    }
}
