use rust_decimal::{Decimal, prelude::Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    credential::{Credential, CredentialError},
    money,
};

pub type AccountNumber = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEventKind {
    Deposited,
    Withdrawn,
    TransferredOut { recipient: AccountNumber },
    TransferredIn { sender: AccountNumber },
}

/// Validated balance change. Produced by the `handle_*` methods, which never
/// mutate, and consumed by [`Account::apply`], which never fails.
#[derive(Debug, Clone)]
pub struct AccountEvent {
    amount: Decimal,
    kind: AccountEventKind,
}

impl AccountEvent {
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> &AccountEventKind {
        &self.kind
    }

    fn log_entry(&self) -> String {
        let amount = money::display_entry(self.amount);
        match &self.kind {
            AccountEventKind::Deposited => format!("Deposit: {amount}"),
            AccountEventKind::Withdrawn => format!("Withdraw: {amount}"),
            AccountEventKind::TransferredOut { recipient } => {
                format!("Transferred {amount} to {recipient}")
            }
            AccountEventKind::TransferredIn { sender } => {
                format!("Received {amount} from {sender}")
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid amount {amount}. Please enter a positive value.")]
    InvalidAmount { amount: Decimal },
    #[error("Insufficient funds. Current balance: {}", balance_str(.balance))]
    InsufficientFunds { balance: Decimal },
    #[error("Balance would overflow")]
    BalanceOverflow,
    #[error("Amount {amount} cannot be represented exactly at the current balance")]
    PrecisionLoss { amount: Decimal },
}

fn balance_str(balance: &Decimal) -> String {
    money::display_balance(*balance)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    account_number: AccountNumber,
    holder_name: String,
    credential: Credential,
    balance: Decimal,
    transactions: Vec<String>,
}

impl Account {
    pub fn new(
        holder_name: String,
        account_number: AccountNumber,
        credential: &str,
    ) -> Result<Self, CredentialError> {
        Ok(Self {
            account_number,
            holder_name,
            credential: Credential::new(credential)?,
            balance: Decimal::zero(),
            transactions: Vec::new(),
        })
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn authenticate(&self, candidate: &str) -> bool {
        self.credential.verify(candidate)
    }

    /// The old credential stays in place if hashing the new one fails.
    pub fn set_credential(&mut self, new_credential: &str) -> Result<(), CredentialError> {
        self.credential = Credential::new(new_credential)?;
        Ok(())
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        let evt = self.handle_credit(amount, AccountEventKind::Deposited)?;
        self.apply(&evt);
        Ok(self.balance)
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        let evt = self.handle_debit(amount, AccountEventKind::Withdrawn)?;
        self.apply(&evt);
        Ok(self.balance)
    }

    pub fn record_transaction(&mut self, text: impl Into<String>) {
        self.transactions.push(text.into());
    }

    pub fn history(&self) -> &[String] {
        &self.transactions
    }

    /// Validates a balance increase without touching the account.
    pub fn handle_credit(
        &self,
        amount: Decimal,
        kind: AccountEventKind,
    ) -> Result<AccountEvent, AccountError> {
        if amount <= Decimal::zero() {
            return Err(AccountError::InvalidAmount { amount });
        }
        let next = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow)?;
        // Decimal rounds once 28 significant digits are exceeded
        if next - self.balance != amount {
            return Err(AccountError::PrecisionLoss { amount });
        }
        Ok(AccountEvent { amount, kind })
    }

    /// Validates a balance decrease without touching the account.
    pub fn handle_debit(
        &self,
        amount: Decimal,
        kind: AccountEventKind,
    ) -> Result<AccountEvent, AccountError> {
        if amount <= Decimal::zero() {
            return Err(AccountError::InvalidAmount { amount });
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                balance: self.balance,
            });
        }
        let next = self.balance - amount;
        if self.balance - next != amount {
            return Err(AccountError::PrecisionLoss { amount });
        }
        Ok(AccountEvent { amount, kind })
    }

    /// Applies an event produced by `handle_credit`/`handle_debit` on this
    /// account's current state, appending exactly one log entry.
    pub fn apply(&mut self, event: &AccountEvent) {
        match event.kind {
            AccountEventKind::Deposited | AccountEventKind::TransferredIn { .. } => {
                self.balance += event.amount;
            }
            AccountEventKind::Withdrawn | AccountEventKind::TransferredOut { .. } => {
                self.balance -= event.amount;
            }
        }
        let entry = event.log_entry();
        debug!(account = %self.account_number, %entry, balance = %self.balance, "applied");
        self.transactions.push(entry);
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.balance >= Decimal::zero()
    }
}
