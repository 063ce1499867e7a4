use std::io;

use anyhow::{Context, Result};
use bank_ledger::{
    bin_utils::Service,
    config::BankConfig,
    persistence::{JsonFileStore, LedgerStore},
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = BankConfig::parse();
    let store: JsonFileStore = config.store();
    let admin_secret = config
        .admin_credential()
        .context("Failed to prepare the admin credential")?;

    let mut ledger = store
        .load_all()
        .with_context(|| format!("Failed to load accounts from `{}`", store.path().display()))?;

    let mut stdout = io::stdout();
    let service = Service {
        input: io::stdin().lock(),
        output: &mut stdout,
        ledger: &mut ledger,
        admin_secret: &admin_secret,
    };
    let outcome = service.run();

    // save whatever the session changed even if the menu failed part way
    store
        .save_all(&ledger)
        .with_context(|| format!("Failed to save accounts to `{}`", store.path().display()))?;
    outcome
}
