pub mod json_backend;

use std::path::PathBuf;

use crate::core::Office;
use crate::errors::OfficeError;

pub type Result<T> = std::result::Result<T, OfficeError>;

/// Abstraction over persistence backends capable of storing the office's
/// entity collections and point-in-time backups.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<Office>;
    fn save(&self, office: &Office) -> Result<()>;

    fn save_contracts(&self, office: &Office) -> Result<()>;
    fn save_installments(&self, office: &Office) -> Result<()>;
    fn save_expenses(&self, office: &Office) -> Result<()>;
    fn save_clients(&self, office: &Office) -> Result<()>;

    /// Snapshots the current data files into a timestamped directory.
    /// Returns `None` when there is nothing to back up yet.
    fn backup(&self) -> Result<Option<PathBuf>>;
    fn list_backups(&self) -> Result<Vec<String>>;
}

pub use json_backend::JsonStorage;
