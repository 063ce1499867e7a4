use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    account::Account,
    ledger::{Ledger, LedgerError},
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed ledger file `{path}`: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Inconsistent ledger file `{path}`: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: LedgerError,
    },
}

/// Bulk load/save of a whole [`Ledger`].
pub trait LedgerStore {
    /// A store with nothing saved yet yields an empty ledger.
    fn load_all(&self) -> Result<Ledger, StoreError>;

    fn save_all(&self, ledger: &Ledger) -> Result<(), StoreError>;
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    accounts: Vec<&'a Account>,
}

#[derive(Deserialize)]
struct Snapshot {
    accounts: Vec<Account>,
}

/// Keeps the ledger as a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_snapshot(&self, tmp: &Path, ledger: &Ledger) -> Result<(), StoreError> {
        let file = File::create(tmp).map_err(|err| self.io_err(err))?;
        let mut writer = BufWriter::new(file);
        let snapshot = SnapshotRef {
            accounts: ledger.accounts(),
        };
        serde_json::to_writer_pretty(&mut writer, &snapshot).map_err(|source| {
            StoreError::Format {
                path: tmp.to_path_buf(),
                source,
            }
        })?;
        writer.flush().map_err(|err| self.io_err(err))
    }
}

impl LedgerStore for JsonFileStore {
    fn load_all(&self) -> Result<Ledger, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no existing data found, starting fresh");
                return Ok(Ledger::new());
            }
            Err(err) => return Err(self.io_err(err)),
        };
        let snapshot: Snapshot =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                StoreError::Format {
                    path: self.path.clone(),
                    source,
                }
            })?;
        let ledger =
            Ledger::from_accounts(snapshot.accounts).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        info!(path = %self.path.display(), accounts = ledger.len(), "ledger loaded");
        Ok(ledger)
    }

    fn save_all(&self, ledger: &Ledger) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_err(err))?;
        }
        // written aside first, the previous file stays intact until the rename
        let tmp = self.tmp_path();
        let written = self
            .write_snapshot(&tmp, ledger)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(|err| self.io_err(err)));
        if let Err(err) = written {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!(path = %tmp.display(), error = %cleanup, "failed to remove temp file");
                }
            }
            return Err(err);
        }
        info!(path = %self.path.display(), accounts = ledger.len(), "ledger saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn missing_file_is_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("accounts.json"));
        let ledger = store.load_all().unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn save_then_load_reproduces_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("accounts.json"));

        let mut ledger = Ledger::new();
        ledger
            .create_account("Alice".to_string(), "A1".to_string(), "pw1")
            .unwrap();
        let acc = ledger.lookup_mut("A1").unwrap();
        acc.deposit(Decimal::from_str("100.10").unwrap()).unwrap();
        acc.withdraw(Decimal::from_str("0.1").unwrap()).unwrap();
        acc.record_transaction("note");

        store.save_all(&ledger).unwrap();
        assert!(!store.tmp_path().exists());

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, ledger);
        let acc = loaded.lookup("A1").unwrap();
        assert!(acc.authenticate("pw1"));
        assert_eq!(acc.history(), ["Deposit: 100.1", "Withdraw: 0.1", "note"]);
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        // the rename cannot replace a directory
        fs::create_dir(&path).unwrap();
        let store = JsonFileStore::new(&path);

        let mut ledger = Ledger::new();
        ledger
            .create_account("Alice".to_string(), "A1".to_string(), "pw1")
            .unwrap();
        ledger
            .lookup_mut("A1")
            .unwrap()
            .deposit(Decimal::from_str("5").unwrap())
            .unwrap();
        let before = ledger.clone();

        let err = store.save_all(&ledger).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!store.tmp_path().exists());
        assert!(path.is_dir());
        assert_eq!(ledger, before);
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load_all().unwrap_err();
        assert!(matches!(err, StoreError::Format { .. }));
    }

    #[test]
    fn negative_balance_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        fs::write(
            &path,
            r#"{"accounts":[{"account_number":"A1","holder_name":"Alice",
                "credential":{"phc":"not-a-hash"},
                "balance":"-1","transactions":[]}]}"#,
        )
        .unwrap();

        let err = JsonFileStore::new(&path).load_all().unwrap_err();
        assert!(matches!(
            err,
            StoreError::Corrupt {
                source: LedgerError::NegativeBalance { .. },
                ..
            }
        ));
    }
}
