//! Validated CRUD over operating expenses.

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::core::services::ServiceResult;
use crate::core::Office;
use crate::domain::{Expense, ExpenseCategory, ExpenseKind};
use crate::errors::OfficeError;

#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub description: String,
    pub category: ExpenseCategory,
    pub kind: ExpenseKind,
    pub amount: f64,
    pub date: NaiveDate,
    pub receipt: Option<String>,
}

pub struct ExpenseService;

impl ExpenseService {
    pub fn add(office: &mut Office, draft: ExpenseDraft) -> ServiceResult<String> {
        Self::validate(&draft)?;
        let id = next_expense_id(office);
        office.expenses.push(Expense {
            id: id.clone(),
            description: draft.description,
            category: draft.category,
            kind: draft.kind,
            amount: draft.amount,
            date: draft.date,
            receipt: draft.receipt,
        });
        info!(expense = %id, "expense added");
        Ok(id)
    }

    pub fn edit(office: &mut Office, id: &str, draft: ExpenseDraft) -> ServiceResult<()> {
        Self::validate(&draft)?;
        let expense = office
            .expense_mut(id)
            .ok_or_else(|| OfficeError::NotFound(format!("expense `{id}`")))?;
        expense.description = draft.description;
        expense.category = draft.category;
        expense.kind = draft.kind;
        expense.amount = draft.amount;
        expense.date = draft.date;
        expense.receipt = draft.receipt;
        info!(expense = %id, "expense updated");
        Ok(())
    }

    pub fn delete(office: &mut Office, id: &str) -> ServiceResult<Expense> {
        let removed = office
            .remove_expense(id)
            .ok_or_else(|| OfficeError::NotFound(format!("expense `{id}`")))?;
        info!(expense = %id, "expense removed");
        Ok(removed)
    }

    fn validate(draft: &ExpenseDraft) -> ServiceResult<()> {
        if draft.description.trim().is_empty() {
            return Err(OfficeError::Validation("description is required".into()));
        }
        if draft.amount <= 0.0 {
            return Err(OfficeError::Validation(
                "amount must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Timestamp-derived id in the legacy `DSP_<unix>` shape, with a numeric
/// suffix when two entries land within the same second.
fn next_expense_id(office: &Office) -> String {
    let stamp = Utc::now().timestamp();
    let base = format!("DSP_{stamp}");
    if office.expense(&base).is_none() {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{base}_{n}");
        if office.expense(&candidate).is_none() {
            return candidate;
        }
        n += 1;
    }
}
