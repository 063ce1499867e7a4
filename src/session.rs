use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    account::{Account, AccountError, AccountNumber},
    credential::{Credential, CredentialError},
    ledger::{AccountSummary, Ledger, LedgerError},
    transfer::{TransferCoordinator, TransferError},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Account {0} not found")]
    NotFound(AccountNumber),
    #[error("Incorrect password")]
    WrongCredential,
    #[error("No account is logged in")]
    NotAuthenticated,
    #[error("Admin login required")]
    NotAdmin,
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error(transparent)]
    TransferErr(#[from] TransferError),
    #[error(transparent)]
    CredentialErr(#[from] CredentialError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(AccountNumber),
    Admin,
}

/// Authenticates users against a borrowed [`Ledger`] and forwards their
/// requests to it. Only the session state is held here.
pub struct SessionController<'l> {
    ledger: &'l mut Ledger,
    admin_secret: &'l Credential,
    state: SessionState,
}

impl<'l> SessionController<'l> {
    pub fn new(ledger: &'l mut Ledger, admin_secret: &'l Credential) -> Self {
        Self {
            ledger,
            admin_secret,
            state: SessionState::Anonymous,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn create_account(
        &mut self,
        holder_name: String,
        account_number: AccountNumber,
        credential: &str,
    ) -> Result<&Account, SessionError> {
        Ok(self
            .ledger
            .create_account(holder_name, account_number, credential)?)
    }

    pub fn account_exists(&self, account_number: &str) -> bool {
        self.ledger.lookup(account_number).is_some()
    }

    pub fn login(
        &mut self,
        account_number: &str,
        credential: &str,
    ) -> Result<&Account, SessionError> {
        let acc = self
            .ledger
            .lookup(account_number)
            .ok_or_else(|| SessionError::NotFound(account_number.to_string()))?;
        if !acc.authenticate(credential) {
            warn!(account = %account_number, "rejected login");
            return Err(SessionError::WrongCredential);
        }
        info!(account = %account_number, "logged in");
        self.state = SessionState::Authenticated(account_number.to_string());
        Ok(acc)
    }

    pub fn admin_login(&mut self, candidate: &str) -> bool {
        if self.admin_secret.verify(candidate) {
            info!("admin logged in");
            self.state = SessionState::Admin;
            true
        } else {
            warn!("rejected admin login");
            false
        }
    }

    pub fn logout(&mut self) {
        if self.state != SessionState::Anonymous {
            info!(state = ?self.state, "logged out");
        }
        self.state = SessionState::Anonymous;
    }

    fn current_number(&self) -> Result<&str, SessionError> {
        match &self.state {
            SessionState::Authenticated(number) => Ok(number),
            _ => Err(SessionError::NotAuthenticated),
        }
    }

    pub fn current_account(&self) -> Result<&Account, SessionError> {
        let number = self.current_number()?;
        self.ledger
            .lookup(number)
            .ok_or_else(|| SessionError::NotFound(number.to_string()))
    }

    fn current_account_mut(&mut self) -> Result<&mut Account, SessionError> {
        let SessionState::Authenticated(number) = &self.state else {
            return Err(SessionError::NotAuthenticated);
        };
        self.ledger
            .lookup_mut(number)
            .ok_or_else(|| SessionError::NotFound(number.clone()))
    }

    /// Returns the new balance.
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, SessionError> {
        Ok(self.current_account_mut()?.deposit(amount)?)
    }

    /// Returns the new balance.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, SessionError> {
        Ok(self.current_account_mut()?.withdraw(amount)?)
    }

    pub fn balance(&self) -> Result<Decimal, SessionError> {
        Ok(self.current_account()?.balance())
    }

    pub fn history(&self) -> Result<&[String], SessionError> {
        Ok(self.current_account()?.history())
    }

    pub fn transfer(&mut self, recipient: &str, amount: Decimal) -> Result<(), SessionError> {
        let sender = self.current_number()?.to_string();
        self.ledger.transfer(&sender, recipient, amount)?;
        Ok(())
    }

    pub fn check_credential(&self, candidate: &str) -> Result<(), SessionError> {
        if self.current_account()?.authenticate(candidate) {
            Ok(())
        } else {
            Err(SessionError::WrongCredential)
        }
    }

    /// The current credential is checked again before it is replaced.
    pub fn update_credential(
        &mut self,
        current_credential: &str,
        new_credential: &str,
    ) -> Result<(), SessionError> {
        let acc = self.current_account_mut()?;
        if !acc.authenticate(current_credential) {
            warn!(account = %acc.account_number(), "rejected credential update");
            return Err(SessionError::WrongCredential);
        }
        acc.set_credential(new_credential)?;
        info!(account = %acc.account_number(), "credential updated");
        Ok(())
    }

    pub fn list_accounts(&self) -> Result<Vec<AccountSummary>, SessionError> {
        self.require_admin()?;
        Ok(self.ledger.list_all())
    }

    pub fn delete_account(&mut self, account_number: &str) -> Result<bool, SessionError> {
        self.require_admin()?;
        Ok(self.ledger.delete_account(account_number))
    }

    fn require_admin(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Admin => Ok(()),
            _ => Err(SessionError::NotAdmin),
        }
    }
}
