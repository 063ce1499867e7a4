use std::path::PathBuf;

use clap::Parser;

use crate::{
    credential::{Credential, CredentialError},
    persistence::JsonFileStore,
};

/// Interactive personal banking ledger
#[derive(Debug, Clone, Parser)]
#[command(name = "bank-ledger", version)]
pub struct BankConfig {
    /// Where accounts are loaded from at start-up and saved to on exit
    #[arg(long, default_value = "accounts.json")]
    pub data_file: PathBuf,

    /// Secret required for the admin menu
    #[arg(
        long,
        env = "BANK_ADMIN_SECRET",
        default_value = "admin123",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub admin_secret: String,
}

impl BankConfig {
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.data_file)
    }

    pub fn admin_credential(&self) -> Result<Credential, CredentialError> {
        Credential::new(&self.admin_secret)
    }
}
