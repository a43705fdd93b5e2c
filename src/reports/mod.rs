//! Report builders, data shaping only.
//!
//! Each builder folds the entity lists into a [`ReportDocument`] of
//! pre-formatted rows. Typesetting belongs to a [`DocumentRenderer`]
//! implementation; a plain-text renderer ships for tests and exports.

use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::domain::{Expense, Installment};
use crate::errors::OfficeError;
use crate::utils::{dates, money};

/// A finished report ready for a rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    /// Labeled summary figures printed below the table.
    pub totals: Vec<(String, String)>,
}

impl ReportDocument {
    fn new(title: impl Into<String>, columns: Vec<&'static str>) -> Self {
        Self {
            title: title.into(),
            generated_at: Utc::now(),
            columns,
            rows: Vec::new(),
            totals: Vec::new(),
        }
    }
}

/// Rendering seam; implementations own layout and file format.
pub trait DocumentRenderer {
    fn render(&self, document: &ReportDocument, target: &Path) -> Result<(), OfficeError>;
}

/// Tab-separated output, used by tests and plain exports.
pub struct TextRenderer;

impl DocumentRenderer for TextRenderer {
    fn render(&self, document: &ReportDocument, target: &Path) -> Result<(), OfficeError> {
        let mut out = String::new();
        out.push_str(&document.title);
        out.push('\n');
        out.push_str(&document.columns.join("\t"));
        out.push('\n');
        for row in &document.rows {
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
        for (label, value) in &document.totals {
            out.push_str(&format!("{label}: {value}\n"));
        }
        std::fs::write(target, out)?;
        Ok(())
    }
}

/// Status band shown next to each cash-flow row.
fn status_band(installment: &Installment, today: NaiveDate) -> String {
    if installment.is_paid() {
        return "PAID".to_string();
    }
    let days = (installment.due_date - today).num_days();
    if days < 0 {
        format!("OVERDUE ({} days)", -days)
    } else if days == 0 {
        "DUE TODAY".to_string()
    } else if days <= 30 {
        format!("DUE IN {days} DAYS")
    } else {
        "OPEN".to_string()
    }
}

/// Full receivables listing sorted by due date, with received and pending
/// totals.
pub fn cash_flow(installments: &[Installment], today: NaiveDate) -> ReportDocument {
    let mut document = ReportDocument::new(
        "Cash Flow",
        vec!["Due date", "Client", "Amount", "Status"],
    );
    let mut sorted: Vec<&Installment> = installments.iter().collect();
    sorted.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id)));

    let mut received = 0.0;
    let mut pending = 0.0;
    for inst in sorted {
        if inst.is_paid() {
            received += inst.amount;
        } else {
            pending += inst.amount;
        }
        document.rows.push(vec![
            dates::format_display(inst.due_date),
            inst.client_name.clone(),
            money::format_brl(inst.amount),
            status_band(inst, today),
        ]);
    }
    document.totals = vec![
        ("Received".to_string(), money::format_brl(received)),
        ("Pending".to_string(), money::format_brl(pending)),
    ];
    document
}

/// Overdue open installments only, oldest due date first.
pub fn delinquency(installments: &[Installment], today: NaiveDate) -> ReportDocument {
    let mut document = ReportDocument::new(
        "Delinquency",
        vec!["Due date", "Client", "Amount", "Days overdue"],
    );
    let mut overdue: Vec<&Installment> = installments
        .iter()
        .filter(|inst| inst.is_overdue(today))
        .collect();
    overdue.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id)));

    let mut total = 0.0;
    for inst in overdue {
        total += inst.amount;
        document.rows.push(vec![
            dates::format_display(inst.due_date),
            inst.client_name.clone(),
            money::format_brl(inst.amount),
            (today - inst.due_date).num_days().to_string(),
        ]);
    }
    document.totals = vec![("Total overdue".to_string(), money::format_brl(total))];
    document
}

/// Paid installments whose due date falls in `year`, for tax filing.
pub fn annual_tax_extract(installments: &[Installment], year: i32) -> ReportDocument {
    let mut document = ReportDocument::new(
        format!("Annual Extract {year}"),
        vec!["Due date", "Client", "Amount", "Paid on"],
    );
    let mut paid: Vec<&Installment> = installments
        .iter()
        .filter(|inst| inst.is_paid() && inst.due_date.year() == year)
        .collect();
    paid.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id)));

    let mut total = 0.0;
    for inst in paid {
        total += inst.amount;
        document.rows.push(vec![
            dates::format_display(inst.due_date),
            inst.client_name.clone(),
            money::format_brl(inst.amount),
            inst.payment_date.map(dates::format_display).unwrap_or_default(),
        ]);
    }
    document.totals = vec![(format!("Total received in {year}"), money::format_brl(total))];
    document
}

/// Twelve month rows of revenue, expense, and net, plus an annual total.
pub fn monthly_income_statement(
    installments: &[Installment],
    expenses: &[Expense],
    year: i32,
) -> ReportDocument {
    let mut document = ReportDocument::new(
        format!("Income Statement {year}"),
        vec!["Month", "Revenue", "Expense", "Net"],
    );

    let mut annual_revenue = 0.0;
    let mut annual_expense = 0.0;
    for month in 1..=12u32 {
        let revenue: f64 = installments
            .iter()
            .filter(|inst| {
                matches!(inst.payment_date, Some(paid) if paid.year() == year && paid.month() == month)
            })
            .map(|inst| inst.amount)
            .sum();
        let expense: f64 = expenses
            .iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .map(|e| e.amount)
            .sum();
        annual_revenue += revenue;
        annual_expense += expense;
        document.rows.push(vec![
            format!("{year}-{month:02}"),
            money::format_brl(revenue),
            money::format_brl(expense),
            money::format_brl(revenue - expense),
        ]);
    }
    document.totals = vec![
        ("Annual revenue".to_string(), money::format_brl(annual_revenue)),
        ("Annual expense".to_string(), money::format_brl(annual_expense)),
        (
            "Annual net".to_string(),
            money::format_brl(annual_revenue - annual_expense),
        ),
    ];
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseCategory, ExpenseKind, FeeType, InstallmentStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn inst(seq: u32, due: NaiveDate, paid_on: Option<NaiveDate>) -> Installment {
        Installment {
            id: format!("CNT_0001_P{seq}"),
            contract_id: "CNT_0001".into(),
            client_name: "Joana Reis".into(),
            sequence: seq,
            amount: 100.0,
            due_date: due,
            status: if paid_on.is_some() {
                InstallmentStatus::Paid
            } else {
                InstallmentStatus::Open
            },
            payment_date: paid_on,
            fee_type: FeeType::Monthly,
        }
    }

    #[test]
    fn cash_flow_totals_and_bands() {
        let today = date(2025, 3, 10);
        let installments = vec![
            inst(1, date(2025, 1, 10), Some(date(2025, 1, 8))),
            inst(2, date(2025, 2, 10), None),
            inst(3, date(2025, 3, 10), None),
            inst(4, date(2025, 3, 25), None),
            inst(5, date(2025, 6, 10), None),
        ];
        let report = cash_flow(&installments, today);
        assert_eq!(report.rows.len(), 5);
        assert_eq!(report.rows[0][3], "PAID");
        assert_eq!(report.rows[1][3], "OVERDUE (28 days)");
        assert_eq!(report.rows[2][3], "DUE TODAY");
        assert_eq!(report.rows[3][3], "DUE IN 15 DAYS");
        assert_eq!(report.rows[4][3], "OPEN");
        assert_eq!(report.totals[0].1, "R$ 100,00");
        assert_eq!(report.totals[1].1, "R$ 400,00");
    }

    #[test]
    fn delinquency_lists_only_overdue_sorted() {
        let today = date(2025, 3, 10);
        let installments = vec![
            inst(2, date(2025, 2, 10), None),
            inst(1, date(2025, 1, 10), None),
            inst(3, date(2025, 4, 10), None),
            inst(4, date(2025, 1, 5), Some(date(2025, 1, 5))),
        ];
        let report = delinquency(&installments, today);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0][0], "10-01-2025");
        assert_eq!(report.rows[0][3], "59");
        assert_eq!(report.rows[1][0], "10-02-2025");
        assert_eq!(report.totals[0].1, "R$ 200,00");
    }

    #[test]
    fn annual_extract_filters_by_due_year() {
        let installments = vec![
            inst(1, date(2024, 12, 10), Some(date(2025, 1, 2))),
            inst(2, date(2025, 1, 10), Some(date(2025, 1, 10))),
            inst(3, date(2025, 2, 10), None),
        ];
        let report = annual_tax_extract(&installments, 2025);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.totals[0].1, "R$ 100,00");
    }

    #[test]
    fn income_statement_has_twelve_rows_and_annual_total() {
        let installments = vec![
            inst(1, date(2025, 1, 10), Some(date(2025, 1, 10))),
            inst(2, date(2025, 2, 10), Some(date(2025, 2, 12))),
        ];
        let expenses = vec![Expense {
            id: "DSP_1".into(),
            description: "Rent".into(),
            category: ExpenseCategory::Rent,
            kind: ExpenseKind::Fixed,
            amount: 50.0,
            date: date(2025, 1, 5),
            receipt: None,
        }];
        let report = monthly_income_statement(&installments, &expenses, 2025);
        assert_eq!(report.rows.len(), 12);
        assert_eq!(report.rows[0][0], "2025-01");
        assert_eq!(report.rows[0][3], "R$ 50,00");
        assert_eq!(report.totals[2].1, "R$ 150,00");
    }

    #[test]
    fn text_renderer_writes_rows_and_totals() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let target = temp.path().join("cash_flow.txt");
        let installments = vec![inst(1, date(2025, 1, 10), None)];
        let report = cash_flow(&installments, date(2025, 1, 1));
        TextRenderer.render(&report, &target).expect("render");
        let contents = std::fs::read_to_string(&target).expect("read");
        assert!(contents.starts_with("Cash Flow\n"));
        assert!(contents.contains("Joana Reis"));
        assert!(contents.contains("Pending: R$ 100,00"));
    }
}
