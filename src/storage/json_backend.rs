//! JSON file persistence, one file per entity collection.

use chrono::{NaiveDateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::Office;
use crate::domain::{Client, Contract, Expense, Installment};
use crate::errors::OfficeError;
use crate::utils::app_data_dir;

use super::{Result, StorageBackend};

const CONTRACTS_FILE: &str = "contracts.json";
const INSTALLMENTS_FILE: &str = "installments.json";
const EXPENSES_FILE: &str = "expenses.json";
const CLIENTS_FILE: &str = "clients.json";
const DATA_FILES: [&str; 4] = [
    CONTRACTS_FILE,
    INSTALLMENTS_FILE,
    EXPENSES_FILE,
    CLIENTS_FILE,
];

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

#[derive(Clone)]
pub struct JsonStorage {
    data_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        let data_dir = root.join("data");
        let backups_dir = root.join("backups");
        ensure_dir(&data_dir)?;
        ensure_dir(&backups_dir)?;
        Ok(Self {
            data_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn collection_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    fn load_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.collection_path(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        let path = self.collection_path(file);
        let json = serde_json::to_string_pretty(items)?;
        let tmp = tmp_path(&path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_dir_all(self.backups_dir.join(entry));
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Office> {
        let contracts: Vec<Contract> = self.load_collection(CONTRACTS_FILE)?;
        let installments: Vec<Installment> = self.load_collection(INSTALLMENTS_FILE)?;
        let expenses: Vec<Expense> = self.load_collection(EXPENSES_FILE)?;
        let clients: Vec<Client> = self.load_collection(CLIENTS_FILE)?;
        Ok(Office {
            clients,
            contracts,
            installments,
            expenses,
        })
    }

    fn save(&self, office: &Office) -> Result<()> {
        self.save_contracts(office)?;
        self.save_installments(office)?;
        self.save_expenses(office)?;
        self.save_clients(office)?;
        Ok(())
    }

    fn save_contracts(&self, office: &Office) -> Result<()> {
        self.save_collection(CONTRACTS_FILE, &office.contracts)
    }

    fn save_installments(&self, office: &Office) -> Result<()> {
        self.save_collection(INSTALLMENTS_FILE, &office.installments)
    }

    fn save_expenses(&self, office: &Office) -> Result<()> {
        self.save_collection(EXPENSES_FILE, &office.expenses)
    }

    fn save_clients(&self, office: &Office) -> Result<()> {
        self.save_collection(CLIENTS_FILE, &office.clients)
    }

    fn backup(&self) -> Result<Option<PathBuf>> {
        let present: Vec<&str> = DATA_FILES
            .iter()
            .copied()
            .filter(|file| self.collection_path(file).exists())
            .collect();
        if present.is_empty() {
            return Ok(None);
        }
        let stamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let dir = self.backups_dir.join(&stamp);
        ensure_dir(&dir)?;
        for file in present {
            fs::copy(self.collection_path(file), dir.join(file))?;
        }
        self.prune_backups()?;
        Ok(Some(dir))
    }

    fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if parse_backup_timestamp(&name).is_some() {
                entries.push(name);
            }
        }
        // Newest first; timestamps sort lexicographically.
        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries)
    }
}

/// Referential integrity notes surfaced after load; never fatal.
pub fn office_warnings(office: &Office) -> Vec<String> {
    let mut warnings = Vec::new();
    for inst in &office.installments {
        if office.contract(&inst.contract_id).is_none() {
            warnings.push(format!(
                "installment {} references unknown contract {}",
                inst.id, inst.contract_id
            ));
        }
    }
    for contract in &office.contracts {
        let scheduled = office.contract_installments(&contract.id).len() as u32;
        if contract.is_active() && scheduled != contract.installment_count {
            warnings.push(format!(
                "contract {} expects {} installment(s) but has {}",
                contract.id, contract.installment_count, scheduled
            ));
        }
    }
    warnings
}

fn parse_backup_timestamp(name: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(name, BACKUP_TIMESTAMP_FORMAT).ok()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|err| {
        OfficeError::Storage(format!(
            "unable to create directory `{}`: {err}",
            path.display()
        ))
    })
}
