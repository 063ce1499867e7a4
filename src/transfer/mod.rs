use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::{AccountError, AccountNumber};

pub mod in_memory;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("Recipient account {0} not found")]
    RecipientNotFound(AccountNumber),
    #[error("Sender account {0} not found")]
    SenderNotFound(AccountNumber),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

/// Moves funds between two accounts as one unit: either both balances and
/// both logs change, or nothing does.
pub trait TransferCoordinator {
    fn transfer(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: Decimal,
    ) -> Result<(), TransferError>;
}
