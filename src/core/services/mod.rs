pub mod contract_service;
pub mod expense_service;
pub mod payment_service;
pub mod score_service;
pub mod summary_service;
pub mod timeline_service;

pub use contract_service::{ContractDraft, ContractService, EditOutcome};
pub use expense_service::{ExpenseDraft, ExpenseService};
pub use payment_service::{PaymentOutcome, PaymentService};
pub use score_service::{ScoreResult, ScoreService, Tier};
pub use summary_service::{Period, PeriodSummary, SummaryService};
pub use timeline_service::{TimelineEvent, TimelineKind, TimelineService};

use crate::errors::OfficeError;

pub type ServiceResult<T> = Result<T, OfficeError>;
