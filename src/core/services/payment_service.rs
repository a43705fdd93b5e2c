//! Payment lifecycle for installments.

use chrono::NaiveDate;
use tracing::info;

use crate::core::services::ServiceResult;
use crate::core::Office;
use crate::errors::OfficeError;

/// What a `mark_paid` call did; `AlreadyPaid` is the user-visible
/// "nothing to do" notice rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Recorded,
    AlreadyPaid,
}

pub struct PaymentService;

impl PaymentService {
    /// Marks the installment paid on `payment_date`. The transition is
    /// one-way; there is no un-pay operation.
    pub fn mark_paid(
        office: &mut Office,
        installment_id: &str,
        payment_date: NaiveDate,
    ) -> ServiceResult<PaymentOutcome> {
        let inst = office
            .installment_mut(installment_id)
            .ok_or_else(|| OfficeError::NotFound(format!("installment `{installment_id}`")))?;
        if inst.is_paid() {
            return Ok(PaymentOutcome::AlreadyPaid);
        }
        inst.mark_paid(payment_date);
        info!(installment = %installment_id, %payment_date, "payment recorded");
        Ok(PaymentOutcome::Recorded)
    }
}
