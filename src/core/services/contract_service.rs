//! Validated operations over contracts and their schedules.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::core::schedule;
use crate::core::services::ServiceResult;
use crate::core::Office;
use crate::domain::{Contract, ContractStatus, FeeType};
use crate::errors::OfficeError;

/// Field set collected when creating or editing a contract.
#[derive(Debug, Clone)]
pub struct ContractDraft {
    pub client_name: String,
    pub phone: Option<String>,
    pub legal_area: String,
    pub fee_type: FeeType,
    pub acquisition_channel: String,
    pub payment_method: String,
    pub responsible: Option<String>,
    pub total_value: f64,
    pub installment_count: u32,
    pub start_date: NaiveDate,
}

/// What an edit actually did, so the caller can inform the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// The schedule was deleted and rebuilt from the new financial terms.
    pub regenerated: bool,
    /// Financial fields were requested but kept at their prior values
    /// because the contract already has paid installments.
    pub financial_blocked: bool,
}

pub struct ContractService;

impl ContractService {
    /// Creates a contract and its full installment schedule, returning the
    /// new contract id.
    pub fn create(office: &mut Office, draft: ContractDraft) -> ServiceResult<String> {
        Self::validate(&draft)?;
        let id = office.next_contract_id();
        let client_id = office.upsert_client(&draft.client_name, draft.phone.clone());
        let contract = Contract {
            id: id.clone(),
            client_id,
            client_name: draft.client_name,
            phone: draft.phone,
            legal_area: draft.legal_area,
            fee_type: draft.fee_type,
            acquisition_channel: draft.acquisition_channel,
            payment_method: draft.payment_method,
            responsible: draft.responsible,
            total_value: draft.total_value,
            installment_count: draft.installment_count,
            start_date: draft.start_date,
            status: ContractStatus::Active,
        };
        let installments = schedule::generate(&contract);
        info!(
            contract = %id,
            installments = installments.len(),
            "contract created"
        );
        office.contracts.push(contract);
        office.installments.extend(installments);
        Ok(id)
    }

    /// Applies an edit to an existing contract.
    ///
    /// Non-financial fields always apply and propagate to the installments'
    /// display copies. Financial fields rebuild the schedule, unless an
    /// installment has already been paid, in which case they silently keep
    /// their prior values and the outcome reports the override.
    pub fn edit(office: &mut Office, id: &str, draft: ContractDraft) -> ServiceResult<EditOutcome> {
        Self::validate(&draft)?;
        let current = office
            .contract(id)
            .ok_or_else(|| OfficeError::NotFound(format!("contract `{id}`")))?
            .clone();

        let financial_changed = current.financial_terms()
            != (draft.total_value, draft.installment_count, draft.start_date);
        let has_paid = office.has_paid_installment(id);

        let mut outcome = EditOutcome::default();
        let (total_value, installment_count, start_date) = if financial_changed && has_paid {
            warn!(contract = %id, "financial edit ignored: contract has paid installments");
            outcome.financial_blocked = true;
            current.financial_terms()
        } else {
            (draft.total_value, draft.installment_count, draft.start_date)
        };

        let client_id = office.upsert_client(&draft.client_name, draft.phone.clone());
        let updated = {
            let contract = office
                .contract_mut(id)
                .ok_or_else(|| OfficeError::NotFound(format!("contract `{id}`")))?;
            contract.client_id = client_id;
            contract.client_name = draft.client_name.clone();
            contract.phone = draft.phone;
            contract.legal_area = draft.legal_area;
            contract.fee_type = draft.fee_type;
            contract.acquisition_channel = draft.acquisition_channel;
            contract.payment_method = draft.payment_method;
            contract.responsible = draft.responsible;
            contract.total_value = total_value;
            contract.installment_count = installment_count;
            contract.start_date = start_date;
            contract.clone()
        };

        if financial_changed && !has_paid {
            office.remove_contract_installments(id);
            let rebuilt = schedule::generate(&updated);
            info!(
                contract = %id,
                installments = rebuilt.len(),
                "schedule regenerated after financial edit"
            );
            office.installments.extend(rebuilt);
            outcome.regenerated = true;
        } else {
            // Keep display copies on the surviving schedule in sync.
            for inst in office
                .installments
                .iter_mut()
                .filter(|inst| inst.contract_id == id)
            {
                inst.client_name = updated.client_name.clone();
                inst.fee_type = updated.fee_type;
            }
        }

        Ok(outcome)
    }

    /// Manual transition; nothing closes a contract automatically.
    pub fn close(office: &mut Office, id: &str) -> ServiceResult<()> {
        Self::set_status(office, id, ContractStatus::Closed)
    }

    pub fn reopen(office: &mut Office, id: &str) -> ServiceResult<()> {
        Self::set_status(office, id, ContractStatus::Active)
    }

    fn set_status(office: &mut Office, id: &str, status: ContractStatus) -> ServiceResult<()> {
        let contract = office
            .contract_mut(id)
            .ok_or_else(|| OfficeError::NotFound(format!("contract `{id}`")))?;
        contract.status = status;
        info!(contract = %id, ?status, "contract status changed");
        Ok(())
    }

    fn validate(draft: &ContractDraft) -> ServiceResult<()> {
        if draft.client_name.trim().is_empty() {
            return Err(OfficeError::Validation("client name is required".into()));
        }
        if draft.total_value <= 0.0 {
            return Err(OfficeError::Validation(
                "total value must be greater than zero".into(),
            ));
        }
        if draft.installment_count < 1 {
            return Err(OfficeError::Validation(
                "installment count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
