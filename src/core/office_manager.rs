//! Facade that coordinates office state, persistence, and backups.

use chrono::NaiveDate;
use tracing::warn;

use crate::core::services::{
    ContractDraft, ContractService, EditOutcome, ExpenseDraft, ExpenseService, PaymentOutcome,
    PaymentService, ServiceResult,
};
use crate::core::Office;
use crate::domain::Expense;
use crate::storage::{json_backend, StorageBackend};

pub struct OfficeManager {
    pub office: Office,
    storage: Box<dyn StorageBackend>,
}

impl OfficeManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            office: Office::new(),
            storage,
        }
    }

    /// Loads all collections, taking a best-effort backup of the existing
    /// files first. Integrity warnings are logged, never fatal.
    pub fn open(storage: Box<dyn StorageBackend>) -> ServiceResult<Self> {
        if let Err(err) = storage.backup() {
            warn!(%err, "startup backup failed");
        }
        let office = storage.load()?;
        for warning in json_backend::office_warnings(&office) {
            warn!("{warning}");
        }
        Ok(Self { office, storage })
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn save_all(&self) -> ServiceResult<()> {
        self.storage.save(&self.office)
    }

    pub fn create_contract(&mut self, draft: ContractDraft) -> ServiceResult<String> {
        let id = ContractService::create(&mut self.office, draft)?;
        self.storage.save_contracts(&self.office)?;
        self.storage.save_installments(&self.office)?;
        self.storage.save_clients(&self.office)?;
        Ok(id)
    }

    pub fn edit_contract(&mut self, id: &str, draft: ContractDraft) -> ServiceResult<EditOutcome> {
        let outcome = ContractService::edit(&mut self.office, id, draft)?;
        self.storage.save_contracts(&self.office)?;
        self.storage.save_installments(&self.office)?;
        self.storage.save_clients(&self.office)?;
        Ok(outcome)
    }

    pub fn close_contract(&mut self, id: &str) -> ServiceResult<()> {
        ContractService::close(&mut self.office, id)?;
        self.storage.save_contracts(&self.office)
    }

    pub fn reopen_contract(&mut self, id: &str) -> ServiceResult<()> {
        ContractService::reopen(&mut self.office, id)?;
        self.storage.save_contracts(&self.office)
    }

    pub fn mark_paid(
        &mut self,
        installment_id: &str,
        payment_date: NaiveDate,
    ) -> ServiceResult<PaymentOutcome> {
        let outcome = PaymentService::mark_paid(&mut self.office, installment_id, payment_date)?;
        if outcome == PaymentOutcome::Recorded {
            self.storage.save_installments(&self.office)?;
        }
        Ok(outcome)
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> ServiceResult<String> {
        let id = ExpenseService::add(&mut self.office, draft)?;
        self.storage.save_expenses(&self.office)?;
        Ok(id)
    }

    pub fn edit_expense(&mut self, id: &str, draft: ExpenseDraft) -> ServiceResult<()> {
        ExpenseService::edit(&mut self.office, id, draft)?;
        self.storage.save_expenses(&self.office)
    }

    pub fn delete_expense(&mut self, id: &str) -> ServiceResult<Expense> {
        let removed = ExpenseService::delete(&mut self.office, id)?;
        self.storage.save_expenses(&self.office)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseCategory, ExpenseKind, FeeType};
    use crate::storage::JsonStorage;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft() -> ContractDraft {
        ContractDraft {
            client_name: "Marina Costa".into(),
            phone: None,
            legal_area: "Tax".into(),
            fee_type: FeeType::Upfront,
            acquisition_channel: "Website".into(),
            payment_method: "Transfer".into(),
            responsible: None,
            total_value: 1500.0,
            installment_count: 3,
            start_date: date(2025, 4, 1),
        }
    }

    fn manager_in(temp: &TempDir) -> OfficeManager {
        let storage =
            JsonStorage::new(Some(temp.path().to_path_buf()), None).expect("json storage");
        OfficeManager::new(Box::new(storage))
    }

    #[test]
    fn mutations_persist_across_reopen() {
        let temp = TempDir::new().expect("temp dir");
        let mut manager = manager_in(&temp);
        let contract_id = manager.create_contract(draft()).expect("create");
        manager
            .mark_paid(&format!("{contract_id}_P1"), date(2025, 4, 1))
            .expect("pay");
        manager
            .add_expense(ExpenseDraft {
                description: "Office rent".into(),
                category: ExpenseCategory::Rent,
                kind: ExpenseKind::Fixed,
                amount: 800.0,
                date: date(2025, 4, 1),
                receipt: None,
            })
            .expect("expense");

        let storage =
            JsonStorage::new(Some(temp.path().to_path_buf()), None).expect("json storage");
        let reopened = OfficeManager::open(Box::new(storage)).expect("open");
        assert_eq!(reopened.office.contracts.len(), 1);
        assert_eq!(reopened.office.expenses.len(), 1);
        assert!(reopened
            .office
            .installment(&format!("{contract_id}_P1"))
            .expect("installment")
            .is_paid());
    }

    #[test]
    fn open_takes_startup_backup() {
        let temp = TempDir::new().expect("temp dir");
        let mut manager = manager_in(&temp);
        manager.create_contract(draft()).expect("create");

        let storage =
            JsonStorage::new(Some(temp.path().to_path_buf()), None).expect("json storage");
        let reopened = OfficeManager::open(Box::new(storage)).expect("open");
        let backups = reopened.storage().list_backups().expect("list");
        assert_eq!(backups.len(), 1);
    }
}
