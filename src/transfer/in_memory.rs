use rust_decimal::Decimal;
use tracing::debug;

use crate::{account::AccountEventKind, ledger::Ledger};

use super::{TransferCoordinator, TransferError};

impl TransferCoordinator for Ledger {
    fn transfer(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        let recipient_acc = self
            .lookup(recipient)
            .ok_or_else(|| TransferError::RecipientNotFound(recipient.to_string()))?;
        let sender_acc = self
            .lookup(sender)
            .ok_or_else(|| TransferError::SenderNotFound(sender.to_string()))?;

        // both sides are validated before anything is applied, so a rejected
        // credit can never strand the debited amount
        let debit = sender_acc.handle_debit(
            amount,
            AccountEventKind::TransferredOut {
                recipient: recipient.to_string(),
            },
        )?;
        let credit = recipient_acc.handle_credit(
            amount,
            AccountEventKind::TransferredIn {
                sender: sender.to_string(),
            },
        )?;

        self.lookup_mut(sender)
            .ok_or_else(|| TransferError::SenderNotFound(sender.to_string()))?
            .apply(&debit);
        // still present: the ledger has been exclusively borrowed since the lookup
        self.lookup_mut(recipient)
            .ok_or_else(|| TransferError::RecipientNotFound(recipient.to_string()))?
            .apply(&credit);

        debug!(%sender, %recipient, %amount, "transfer completed");
        Ok(())
    }
}
