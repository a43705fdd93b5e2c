pub mod office;
pub mod office_manager;
pub mod schedule;
pub mod services;

pub use office::Office;
pub use office_manager::OfficeManager;
