pub mod client;
pub mod common;
pub mod contract;
pub mod expense;
pub mod installment;

pub use client::Client;
pub use contract::{Contract, ContractStatus, FeeType};
pub use expense::{Expense, ExpenseCategory, ExpenseKind};
pub use installment::{Installment, InstallmentStatus};
