//! Turns a contract into its ordered installment schedule.

use crate::domain::{Contract, Installment, InstallmentStatus};
use crate::utils::{dates, money};

/// Generates the full schedule for a contract: exactly
/// `installment_count` installments, all open, due dates stepping by whole
/// calendar months from `start_date`.
///
/// Amounts are the equal split rounded to cents; the final installment
/// absorbs the rounding remainder so the schedule sums back to
/// `total_value` exactly.
pub fn generate(contract: &Contract) -> Vec<Installment> {
    let count = contract.installment_count;
    let base = money::round_cents(contract.total_value / count as f64);

    let mut schedule = Vec::with_capacity(count as usize);
    for sequence in 1..=count {
        let amount = if sequence == count {
            money::round_cents(contract.total_value - base * (count as f64 - 1.0))
        } else {
            base
        };
        schedule.push(Installment {
            id: Installment::derive_id(&contract.id, sequence),
            contract_id: contract.id.clone(),
            client_name: contract.client_name.clone(),
            sequence,
            amount,
            due_date: dates::add_months(contract.start_date, sequence as i32 - 1),
            status: InstallmentStatus::Open,
            payment_date: None,
            fee_type: contract.fee_type,
        });
    }
    schedule
}
