//! Text menu front end. It only renders and reads; every decision is taken by
//! [`SessionController`].

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::info;

use crate::{
    credential::Credential,
    ledger::Ledger,
    money,
    session::{SessionController, SessionError},
    transfer::TransferError,
};
use prompt::{InputClosed, Prompt};
use report::print_accounts;

pub mod prompt;
pub mod report;

pub struct Service<'a, R, W: 'a> {
    pub input: R,
    pub output: &'a mut W,
    pub ledger: &'a mut Ledger,
    pub admin_secret: &'a Credential,
}

impl<'a, R, W> Service<'a, R, W>
where
    R: BufRead,
    W: Write + 'a,
{
    /// Runs until the user picks Exit or the input ends. Saving is left to
    /// the caller.
    pub fn run(self) -> Result<()> {
        let mut console = Console {
            prompt: Prompt::new(self.input, self.output),
            session: SessionController::new(self.ledger, self.admin_secret),
        };
        match console.main_menu() {
            Err(err) if err.is::<InputClosed>() => {
                info!("input closed, leaving menu");
                Ok(())
            }
            other => other,
        }
    }
}

struct Console<'a, R, W> {
    prompt: Prompt<R, &'a mut W>,
    session: SessionController<'a>,
}

impl<R, W> Console<'_, R, W>
where
    R: BufRead,
    W: Write,
{
    fn main_menu(&mut self) -> Result<()> {
        loop {
            self.prompt.say("\n========== Bank Management System ==========")?;
            self.prompt.say("1. Create Bank Account")?;
            self.prompt.say("2. Login to Account")?;
            self.prompt.say("3. Admin Login")?;
            self.prompt.say("4. Exit")?;
            match self.prompt.choice("Enter your choice: ", 1, 4)? {
                1 => self.create_account()?,
                2 => self.login()?,
                3 => self.admin_login()?,
                _ => {
                    self.prompt
                        .say("Thank you for using the Bank Management System. Goodbye!")?;
                    return Ok(());
                }
            }
        }
    }

    fn create_account(&mut self) -> Result<()> {
        let name = self.prompt.ask("Enter Account Holder Name: ")?;
        let number = self.prompt.ask("Enter Account Number: ")?;
        if self.session.account_exists(&number) {
            return self
                .prompt
                .say("Account number already exists. Please try again.");
        }
        let password = self.prompt.ask("Set Password: ")?;
        match self.session.create_account(name, number, &password) {
            Ok(_) => self.prompt.say("Account created successfully."),
            Err(err) => self.prompt.say(err),
        }
    }

    fn login(&mut self) -> Result<()> {
        let number = self.prompt.ask("Enter Account Number: ")?;
        if !self.session.account_exists(&number) {
            return self.prompt.say("Account not found. Please try again.");
        }
        let password = self.prompt.ask("Enter Password: ")?;
        let login = self.session.login(&number, &password).map(|_| ());
        match login {
            Ok(()) => self.account_menu(),
            Err(SessionError::WrongCredential) => {
                self.prompt.say("Incorrect password. Access denied.")
            }
            Err(err) => self.prompt.say(err),
        }
    }

    fn account_menu(&mut self) -> Result<()> {
        loop {
            self.prompt.say("\n========== Account Menu ==========")?;
            self.prompt.say("1. Deposit")?;
            self.prompt.say("2. Withdraw")?;
            self.prompt.say("3. Check Balance")?;
            self.prompt.say("4. View Transaction History")?;
            self.prompt.say("5. Transfer Funds")?;
            self.prompt.say("6. Update Password")?;
            self.prompt.say("7. Logout")?;
            match self.prompt.choice("Enter your choice: ", 1, 7)? {
                1 => {
                    let amount = self.prompt.amount("Enter amount to deposit: ")?;
                    match self.session.deposit(amount) {
                        Ok(balance) => self.prompt.say(format!(
                            "Deposit successful. New balance: {}",
                            money::display_balance(balance)
                        ))?,
                        Err(err) => self.prompt.say(err)?,
                    }
                }
                2 => {
                    let amount = self.prompt.amount("Enter amount to withdraw: ")?;
                    match self.session.withdraw(amount) {
                        Ok(balance) => self.prompt.say(format!(
                            "Withdrawal successful. New balance: {}",
                            money::display_balance(balance)
                        ))?,
                        Err(err) => self.prompt.say(err)?,
                    }
                }
                3 => match self.session.balance() {
                    Ok(balance) => self.prompt.say(format!(
                        "Available balance: {}",
                        money::display_balance(balance)
                    ))?,
                    Err(err) => self.prompt.say(err)?,
                },
                4 => self.history()?,
                5 => self.transfer()?,
                6 => self.update_password()?,
                _ => {
                    self.session.logout();
                    return Ok(());
                }
            }
        }
    }

    fn history(&mut self) -> Result<()> {
        match self.session.history() {
            Ok([]) => self.prompt.say("No transactions yet."),
            Ok(entries) => {
                for entry in entries {
                    self.prompt.say(entry)?;
                }
                Ok(())
            }
            Err(err) => self.prompt.say(err),
        }
    }

    fn transfer(&mut self) -> Result<()> {
        let recipient = self.prompt.ask("Enter recipient's account number: ")?;
        if !self.session.account_exists(&recipient) {
            return self
                .prompt
                .say("Recipient account not found. Please try again.");
        }
        let amount = self.prompt.amount("Enter amount to transfer: ")?;
        match self.session.transfer(&recipient, amount) {
            Ok(()) => self.prompt.say("Transfer successful."),
            Err(SessionError::TransferErr(TransferError::RecipientNotFound(_))) => self
                .prompt
                .say("Recipient account not found. Please try again."),
            Err(err) => self.prompt.say(err),
        }
    }

    fn update_password(&mut self) -> Result<()> {
        let current = self.prompt.ask("Enter current password: ")?;
        match self.session.check_credential(&current) {
            Ok(()) => {}
            Err(SessionError::WrongCredential) => {
                return self.prompt.say("Incorrect password. Cannot update.");
            }
            Err(err) => return self.prompt.say(err),
        }
        let new = self.prompt.ask("Enter new password: ")?;
        match self.session.update_credential(&current, &new) {
            Ok(()) => self.prompt.say("Password updated successfully."),
            Err(err) => self.prompt.say(err),
        }
    }

    fn admin_login(&mut self) -> Result<()> {
        let candidate = self.prompt.ask("Enter Admin Password: ")?;
        if !self.session.admin_login(&candidate) {
            return self
                .prompt
                .say("Incorrect admin password. Access denied.");
        }
        self.admin_menu()
    }

    fn admin_menu(&mut self) -> Result<()> {
        loop {
            self.prompt.say("\n========== Admin Menu ==========")?;
            self.prompt.say("1. View All Accounts")?;
            self.prompt.say("2. Delete an Account")?;
            self.prompt.say("3. Logout")?;
            match self.prompt.choice("Enter your choice: ", 1, 3)? {
                1 => {
                    let accounts = self.session.list_accounts()?;
                    if accounts.is_empty() {
                        self.prompt.say("No accounts to display.")?;
                    } else {
                        print_accounts(self.prompt.output(), &accounts)?;
                    }
                }
                2 => {
                    let number = self.prompt.ask("Enter the account number to delete: ")?;
                    if self.session.delete_account(&number)? {
                        self.prompt.say("Account deleted successfully.")?;
                    } else {
                        self.prompt.say("Account not found. Please try again.")?;
                    }
                }
                _ => {
                    self.session.logout();
                    return Ok(());
                }
            }
        }
    }
}
