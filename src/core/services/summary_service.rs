//! Period-scoped financial aggregation.
//!
//! Everything here is a pure read over the entity slices: no caching, no
//! mutation, recomputed on demand, so the same inputs always produce the
//! same summary.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{Contract, Expense, ExpenseCategory, Installment};
use crate::utils::dates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    ThisMonth,
    LastThreeMonths,
    ThisYear,
    AllTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub period: Period,
    pub revenue: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Open installments past their due date, as of `today`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverdueSnapshot {
    pub count: usize,
    pub total: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Inclusive date window for a period relative to `today`; `None`
    /// means unbounded (all time).
    pub fn period_window(period: Period, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match period {
            Period::ThisMonth => Some((
                dates::first_day_of_month(today),
                dates::last_day_of_month(today),
            )),
            Period::LastThreeMonths => {
                let start = dates::first_day_of_month(dates::add_months(today, -2));
                Some((start, dates::last_day_of_month(today)))
            }
            Period::ThisYear => {
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1)?;
                let end = NaiveDate::from_ymd_opt(today.year(), 12, 31)?;
                Some((start, end))
            }
            Period::AllTime => None,
        }
    }

    /// Revenue (paid installments by payment date), expense, and balance
    /// for the period.
    pub fn summarize(
        installments: &[Installment],
        expenses: &[Expense],
        period: Period,
        today: NaiveDate,
    ) -> PeriodSummary {
        let window = Self::period_window(period, today);
        let revenue: f64 = installments
            .iter()
            .filter(|inst| inst.is_paid())
            .filter(|inst| matches!(inst.payment_date, Some(paid) if in_window(paid, window)))
            .map(|inst| inst.amount)
            .sum();
        let expense: f64 = expenses
            .iter()
            .filter(|expense| in_window(expense.date, window))
            .map(|expense| expense.amount)
            .sum();
        PeriodSummary {
            period,
            revenue,
            expense,
            balance: revenue - expense,
        }
    }

    /// Open amounts falling due within `[today, today + days]` inclusive.
    pub fn receivable_within(installments: &[Installment], today: NaiveDate, days: i64) -> f64 {
        let horizon = today + Duration::days(days);
        installments
            .iter()
            .filter(|inst| inst.is_open())
            .filter(|inst| inst.due_date >= today && inst.due_date <= horizon)
            .map(|inst| inst.amount)
            .sum()
    }

    pub fn overdue(installments: &[Installment], today: NaiveDate) -> OverdueSnapshot {
        let late: Vec<&Installment> = installments
            .iter()
            .filter(|inst| inst.is_overdue(today))
            .collect();
        OverdueSnapshot {
            count: late.len(),
            total: late.iter().map(|inst| inst.amount).sum(),
        }
    }

    /// Paid revenue grouped by the owning contract's legal area.
    /// Installments referencing a missing contract are excluded.
    pub fn revenue_by_legal_area(
        installments: &[Installment],
        contracts: &[Contract],
        window: Option<(NaiveDate, NaiveDate)>,
    ) -> Vec<(String, f64)> {
        Self::revenue_by_contract_field(installments, contracts, window, |contract| {
            contract.legal_area.clone()
        })
    }

    /// Paid revenue grouped by the owning contract's acquisition channel.
    pub fn revenue_by_channel(
        installments: &[Installment],
        contracts: &[Contract],
        window: Option<(NaiveDate, NaiveDate)>,
    ) -> Vec<(String, f64)> {
        Self::revenue_by_contract_field(installments, contracts, window, |contract| {
            contract.acquisition_channel.clone()
        })
    }

    /// Paid revenue grouped by fee type, read from the installments' own
    /// display copy.
    pub fn revenue_by_fee_type(
        installments: &[Installment],
        window: Option<(NaiveDate, NaiveDate)>,
    ) -> Vec<(String, f64)> {
        let entries = paid_in_window(installments, window)
            .map(|inst| (inst.fee_type.label().to_string(), inst.amount));
        sorted_totals(entries)
    }

    /// The `n` clients with the highest paid revenue.
    pub fn top_clients(
        installments: &[Installment],
        window: Option<(NaiveDate, NaiveDate)>,
        n: usize,
    ) -> Vec<(String, f64)> {
        let entries = paid_in_window(installments, window)
            .map(|inst| (inst.client_name.clone(), inst.amount));
        let mut totals = sorted_totals(entries);
        totals.truncate(n);
        totals
    }

    pub fn expenses_by_category(
        expenses: &[Expense],
        window: Option<(NaiveDate, NaiveDate)>,
    ) -> Vec<(ExpenseCategory, f64)> {
        let mut totals: Vec<(ExpenseCategory, f64)> = Vec::new();
        for expense in expenses.iter().filter(|e| in_window(e.date, window)) {
            match totals.iter_mut().find(|(cat, _)| *cat == expense.category) {
                Some((_, sum)) => *sum += expense.amount,
                None => totals.push((expense.category, expense.amount)),
            }
        }
        totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        totals
    }

    /// Dashboard "average ticket": mean contract value across all
    /// contracts, zero when there are none.
    pub fn average_contract_value(contracts: &[Contract]) -> f64 {
        if contracts.is_empty() {
            return 0.0;
        }
        let total: f64 = contracts.iter().map(|c| c.total_value).sum();
        total / contracts.len() as f64
    }

    fn revenue_by_contract_field<F>(
        installments: &[Installment],
        contracts: &[Contract],
        window: Option<(NaiveDate, NaiveDate)>,
        field: F,
    ) -> Vec<(String, f64)>
    where
        F: Fn(&Contract) -> String,
    {
        let entries = paid_in_window(installments, window).filter_map(|inst| {
            contracts
                .iter()
                .find(|contract| contract.id == inst.contract_id)
                .map(|contract| (field(contract), inst.amount))
        });
        sorted_totals(entries)
    }
}

fn in_window(date: NaiveDate, window: Option<(NaiveDate, NaiveDate)>) -> bool {
    match window {
        Some((start, end)) => date >= start && date <= end,
        None => true,
    }
}

fn paid_in_window<'a>(
    installments: &'a [Installment],
    window: Option<(NaiveDate, NaiveDate)>,
) -> impl Iterator<Item = &'a Installment> {
    installments
        .iter()
        .filter(|inst| inst.is_paid())
        .filter(move |inst| matches!(inst.payment_date, Some(paid) if in_window(paid, window)))
}

/// Accumulates `(key, amount)` pairs and orders them by descending total,
/// then by key so equal totals come out in a stable order.
fn sorted_totals(entries: impl Iterator<Item = (String, f64)>) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for (key, amount) in entries {
        match totals.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, sum)) => *sum += amount,
            None => totals.push((key, amount)),
        }
    }
    totals.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContractStatus, ExpenseKind, FeeType, InstallmentStatus};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn paid(id: &str, contract_id: &str, amount: f64, paid_on: NaiveDate) -> Installment {
        Installment {
            id: id.into(),
            contract_id: contract_id.into(),
            client_name: "Cliente".into(),
            sequence: 1,
            amount,
            due_date: paid_on,
            status: InstallmentStatus::Paid,
            payment_date: Some(paid_on),
            fee_type: FeeType::Monthly,
        }
    }

    fn open(id: &str, contract_id: &str, amount: f64, due: NaiveDate) -> Installment {
        Installment {
            id: id.into(),
            contract_id: contract_id.into(),
            client_name: "Cliente".into(),
            sequence: 1,
            amount,
            due_date: due,
            status: InstallmentStatus::Open,
            payment_date: None,
            fee_type: FeeType::Monthly,
        }
    }

    fn expense(amount: f64, on: NaiveDate) -> Expense {
        Expense {
            id: "DSP_1".into(),
            description: "Rent".into(),
            category: ExpenseCategory::Rent,
            kind: ExpenseKind::Fixed,
            amount,
            date: on,
            receipt: None,
        }
    }

    fn contract(id: &str, area: &str, channel: &str) -> Contract {
        Contract {
            id: id.into(),
            client_id: Uuid::new_v4(),
            client_name: "Cliente".into(),
            phone: None,
            legal_area: area.into(),
            fee_type: FeeType::Monthly,
            acquisition_channel: channel.into(),
            payment_method: "Pix".into(),
            responsible: None,
            total_value: 1000.0,
            installment_count: 1,
            start_date: date(2025, 1, 1),
            status: ContractStatus::Active,
        }
    }

    #[test]
    fn this_month_revenue_expense_balance() {
        // Scenario: one paid installment and one expense inside March 2025.
        let installments = vec![paid("P1", "C1", 1000.0, date(2025, 3, 15))];
        let expenses = vec![expense(500.0, date(2025, 3, 1))];
        let today = date(2025, 3, 20);

        let summary =
            SummaryService::summarize(&installments, &expenses, Period::ThisMonth, today);
        assert_eq!(summary.revenue, 1000.0);
        assert_eq!(summary.expense, 500.0);
        assert_eq!(summary.balance, 500.0);
    }

    #[test]
    fn summarize_is_idempotent() {
        let installments = vec![
            paid("P1", "C1", 250.0, date(2025, 2, 5)),
            open("P2", "C1", 250.0, date(2025, 4, 5)),
        ];
        let expenses = vec![expense(90.0, date(2025, 2, 10))];
        let today = date(2025, 2, 20);
        let first =
            SummaryService::summarize(&installments, &expenses, Period::LastThreeMonths, today);
        let second =
            SummaryService::summarize(&installments, &expenses, Period::LastThreeMonths, today);
        assert_eq!(first, second);
    }

    #[test]
    fn windows_respect_calendar_boundaries() {
        let today = date(2025, 3, 20);
        assert_eq!(
            SummaryService::period_window(Period::ThisMonth, today),
            Some((date(2025, 3, 1), date(2025, 3, 31)))
        );
        assert_eq!(
            SummaryService::period_window(Period::LastThreeMonths, today),
            Some((date(2025, 1, 1), date(2025, 3, 31)))
        );
        assert_eq!(
            SummaryService::period_window(Period::ThisYear, today),
            Some((date(2025, 1, 1), date(2025, 12, 31)))
        );
        assert_eq!(SummaryService::period_window(Period::AllTime, today), None);
    }

    #[test]
    fn receivable_window_is_inclusive() {
        let today = date(2025, 3, 1);
        let installments = vec![
            open("P1", "C1", 100.0, date(2025, 3, 1)),
            open("P2", "C1", 100.0, date(2025, 3, 31)),
            open("P3", "C1", 100.0, date(2025, 4, 1)),
            open("P4", "C1", 100.0, date(2025, 2, 28)),
        ];
        assert_eq!(
            SummaryService::receivable_within(&installments, today, 30),
            200.0
        );
    }

    #[test]
    fn overdue_counts_only_open_past_due() {
        let today = date(2025, 3, 10);
        let installments = vec![
            open("P1", "C1", 100.0, date(2025, 3, 9)),
            open("P2", "C1", 150.0, date(2025, 1, 1)),
            open("P3", "C1", 100.0, date(2025, 3, 10)),
            paid("P4", "C1", 100.0, date(2025, 2, 1)),
        ];
        let snapshot = SummaryService::overdue(&installments, today);
        assert_eq!(snapshot.count, 2);
        assert_eq!(snapshot.total, 250.0);
    }

    #[test]
    fn area_grouping_skips_orphan_installments() {
        let contracts = vec![contract("C1", "Labor", "Google")];
        let installments = vec![
            paid("P1", "C1", 300.0, date(2025, 3, 1)),
            paid("P2", "C1", 200.0, date(2025, 3, 2)),
            paid("P3", "MISSING", 999.0, date(2025, 3, 3)),
        ];
        let by_area = SummaryService::revenue_by_legal_area(&installments, &contracts, None);
        assert_eq!(by_area, vec![("Labor".to_string(), 500.0)]);
    }

    #[test]
    fn top_clients_orders_and_truncates() {
        let mut a = paid("P1", "C1", 300.0, date(2025, 3, 1));
        a.client_name = "Alice".into();
        let mut b = paid("P2", "C2", 700.0, date(2025, 3, 1));
        b.client_name = "Bruno".into();
        let mut c = paid("P3", "C3", 100.0, date(2025, 3, 1));
        c.client_name = "Carla".into();
        let installments = vec![a, b, c];
        let top = SummaryService::top_clients(&installments, None, 2);
        assert_eq!(
            top,
            vec![("Bruno".to_string(), 700.0), ("Alice".to_string(), 300.0)]
        );
    }

    #[test]
    fn average_contract_value_handles_empty() {
        assert_eq!(SummaryService::average_contract_value(&[]), 0.0);
        let contracts = vec![contract("C1", "Labor", "Google"), contract("C2", "Tax", "Referral")];
        assert_eq!(SummaryService::average_contract_value(&contracts), 1000.0);
    }
}
