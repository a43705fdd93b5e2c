use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Keyed};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Rent,
    Utilities,
    Payroll,
    Marketing,
    Software,
    Taxes,
    OfficeSupplies,
    Other,
}

impl ExpenseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Payroll => "Payroll",
            ExpenseCategory::Marketing => "Marketing",
            ExpenseCategory::Software => "Software",
            ExpenseCategory::Taxes => "Taxes",
            ExpenseCategory::OfficeSupplies => "Office supplies",
            ExpenseCategory::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseKind {
    Fixed,
    Recurring,
    Variable,
}

/// A single operating expense entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub category: ExpenseCategory,
    pub kind: ExpenseKind,
    pub amount: f64,
    pub date: NaiveDate,
    /// Opaque pointer to an external receipt file; never interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

impl Keyed for Expense {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} — {}", self.id, self.description)
    }
}
