use uuid::Uuid;

use crate::domain::{Client, Contract, Expense, Installment};

/// In-memory aggregate owning the four entity collections.
///
/// Every operation in the services layer goes through an `Office`; there is
/// no ambient global state. Each collection maps one-to-one onto a
/// persisted snapshot handled by the storage backend.
#[derive(Debug, Clone, Default)]
pub struct Office {
    pub clients: Vec<Client>,
    pub contracts: Vec<Contract>,
    pub installments: Vec<Installment>,
    pub expenses: Vec<Expense>,
}

impl Office {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sequential human-readable contract id (`CNT_0001`, ...).
    pub fn next_contract_id(&self) -> String {
        format!("CNT_{:04}", self.contracts.len() + 1)
    }

    pub fn contract(&self, id: &str) -> Option<&Contract> {
        self.contracts.iter().find(|contract| contract.id == id)
    }

    pub fn contract_mut(&mut self, id: &str) -> Option<&mut Contract> {
        self.contracts.iter_mut().find(|contract| contract.id == id)
    }

    pub fn installment(&self, id: &str) -> Option<&Installment> {
        self.installments.iter().find(|inst| inst.id == id)
    }

    pub fn installment_mut(&mut self, id: &str) -> Option<&mut Installment> {
        self.installments.iter_mut().find(|inst| inst.id == id)
    }

    pub fn contract_installments(&self, contract_id: &str) -> Vec<&Installment> {
        self.installments
            .iter()
            .filter(|inst| inst.contract_id == contract_id)
            .collect()
    }

    pub fn has_paid_installment(&self, contract_id: &str) -> bool {
        self.installments
            .iter()
            .any(|inst| inst.contract_id == contract_id && inst.is_paid())
    }

    pub fn remove_contract_installments(&mut self, contract_id: &str) {
        self.installments.retain(|inst| inst.contract_id != contract_id);
    }

    pub fn expense(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, id: &str) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }

    pub fn remove_expense(&mut self, id: &str) -> Option<Expense> {
        let index = self.expenses.iter().position(|expense| expense.id == id)?;
        Some(self.expenses.remove(index))
    }

    pub fn client_by_name(&self, name: &str) -> Option<&Client> {
        self.clients.iter().find(|client| client.name == name)
    }

    /// Finds or creates the client with the given display name. The exact
    /// name string is the legacy join key; phone is filled in when known.
    pub fn upsert_client(&mut self, name: &str, phone: Option<String>) -> Uuid {
        if let Some(existing) = self.clients.iter_mut().find(|client| client.name == name) {
            if phone.is_some() {
                existing.phone = phone;
            }
            return existing.id;
        }
        let mut client = Client::new(name);
        client.phone = phone;
        let id = client.id;
        self.clients.push(client);
        id
    }

    /// Distinct client names with at least one contract, sorted.
    pub fn client_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .contracts
            .iter()
            .map(|contract| contract.client_name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
