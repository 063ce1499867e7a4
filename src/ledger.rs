use std::collections::{HashMap, hash_map::Entry};

use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    account::{Account, AccountNumber},
    credential::CredentialError,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account number {0} already exists")]
    AlreadyExists(AccountNumber),
    #[error("Account {account_number} has a negative balance")]
    NegativeBalance { account_number: AccountNumber },
    #[error(transparent)]
    CredentialErr(#[from] CredentialError),
}

/// Row of the admin account listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub holder_name: String,
    pub account_number: AccountNumber,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    accounts: HashMap<AccountNumber, Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from previously stored accounts, keying each one by
    /// its own account number.
    pub fn from_accounts(
        accounts: impl IntoIterator<Item = Account>,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::new();
        for acc in accounts {
            if !acc.is_consistent() {
                return Err(LedgerError::NegativeBalance {
                    account_number: acc.account_number().to_string(),
                });
            }
            match ledger.accounts.entry(acc.account_number().to_string()) {
                Entry::Occupied(entry) => {
                    return Err(LedgerError::AlreadyExists(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(acc);
                }
            }
        }
        Ok(ledger)
    }

    pub fn create_account(
        &mut self,
        holder_name: String,
        account_number: AccountNumber,
        credential: &str,
    ) -> Result<&Account, LedgerError> {
        match self.accounts.entry(account_number) {
            Entry::Occupied(entry) => Err(LedgerError::AlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                let acc = Account::new(holder_name, entry.key().clone(), credential)?;
                debug!(account = %acc.account_number(), "account created");
                Ok(entry.insert(acc))
            }
        }
    }

    pub fn lookup(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    pub fn lookup_mut(&mut self, account_number: &str) -> Option<&mut Account> {
        self.accounts.get_mut(account_number)
    }

    /// Funded accounts are deleted too; the discarded balance is only logged.
    pub fn delete_account(&mut self, account_number: &str) -> bool {
        match self.accounts.remove(account_number) {
            Some(acc) => {
                if acc.balance() > Decimal::zero() {
                    warn!(
                        account = %account_number,
                        balance = %acc.balance(),
                        "deleted account still held funds"
                    );
                } else {
                    debug!(account = %account_number, "account deleted");
                }
                true
            }
            None => false,
        }
    }

    /// Snapshot of all accounts ordered by account number.
    pub fn list_all(&self) -> Vec<AccountSummary> {
        let mut rows: Vec<_> = self
            .accounts
            .values()
            .map(|acc| AccountSummary {
                holder_name: acc.holder_name().to_string(),
                account_number: acc.account_number().to_string(),
                balance: acc.balance(),
            })
            .collect();
        rows.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        rows
    }

    /// Accounts ordered by account number.
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<_> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.account_number().cmp(b.account_number()));
        accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
