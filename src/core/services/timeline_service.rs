//! Per-client event timeline synthesized from the entity lists.

use chrono::NaiveDate;

use crate::domain::{Contract, Installment};
use crate::utils::{dates, money};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineKind {
    ContractStarted,
    ScheduleCreated,
    PaymentReceived,
    Overdue,
    UpcomingDue,
}

impl TimelineKind {
    /// Severity color token for presentation layers.
    pub fn color(&self) -> &'static str {
        match self {
            TimelineKind::ContractStarted => "#3498db",
            TimelineKind::ScheduleCreated => "#95a5a6",
            TimelineKind::PaymentReceived => "#2ecc71",
            TimelineKind::Overdue => "#e74c3c",
            TimelineKind::UpcomingDue => "#f1c40f",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    pub date: NaiveDate,
    pub kind: TimelineKind,
    pub title: String,
    pub description: String,
}

pub struct TimelineService;

impl TimelineService {
    /// Builds the client's event history, most recent first. Upcoming due
    /// events are limited to the next 30 days so the list stays focused on
    /// what is actionable.
    pub fn client_timeline(
        client_name: &str,
        contracts: &[Contract],
        installments: &[Installment],
        today: NaiveDate,
    ) -> Vec<TimelineEvent> {
        let mut events = Vec::new();

        for contract in contracts.iter().filter(|c| c.client_name == client_name) {
            events.push(TimelineEvent {
                date: contract.start_date,
                kind: TimelineKind::ContractStarted,
                title: format!("Contract {} signed", contract.id),
                description: format!(
                    "{} | {}",
                    contract.legal_area,
                    money::format_brl(contract.total_value)
                ),
            });
            events.push(TimelineEvent {
                date: contract.start_date,
                kind: TimelineKind::ScheduleCreated,
                title: format!("Schedule created for {}", contract.id),
                description: format!("{} installment(s)", contract.installment_count),
            });
        }

        for inst in installments
            .iter()
            .filter(|inst| inst.client_name == client_name)
        {
            if let Some(paid_on) = inst.payment_date {
                events.push(TimelineEvent {
                    date: paid_on,
                    kind: TimelineKind::PaymentReceived,
                    title: format!("Installment {} paid", inst.sequence),
                    description: money::format_brl(inst.amount),
                });
            } else if inst.is_overdue(today) {
                let days = (today - inst.due_date).num_days();
                events.push(TimelineEvent {
                    date: inst.due_date,
                    kind: TimelineKind::Overdue,
                    title: format!("Installment {} overdue", inst.sequence),
                    description: format!(
                        "{} | {} day(s) late",
                        money::format_brl(inst.amount),
                        days
                    ),
                });
            } else if inst.due_date >= today && (inst.due_date - today).num_days() <= 30 {
                events.push(TimelineEvent {
                    date: inst.due_date,
                    kind: TimelineKind::UpcomingDue,
                    title: format!("Installment {} due soon", inst.sequence),
                    description: format!(
                        "{} | due {}",
                        money::format_brl(inst.amount),
                        dates::format_display(inst.due_date)
                    ),
                });
            }
        }

        events.sort_by(|a, b| b.date.cmp(&a.date));
        events
    }
}
