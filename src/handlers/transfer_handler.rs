//! Transfer Handler
//!
//! Moves money between two accounts. The account store has no multi-account
//! transaction, so a transfer is three ordered writes (debit sender, credit
//! recipient, record transfer) with compensating writes when a later step
//! fails:
//!
//! | failing step      | undone                         |
//! |-------------------|--------------------------------|
//! | debit sender      | nothing                        |
//! | credit recipient  | sender restored                |
//! | record transfer   | sender and recipient restored  |

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{Amount, Balance, DomainError, TransferRecord};
use crate::store::{AccountRepository, ActivityRepository};

use super::{TransferCommand, TransferError};

/// Handler for transfers
pub struct TransferHandler {
    accounts: Arc<dyn AccountRepository>,
    activity: Arc<dyn ActivityRepository>,
    // Held from the balance reads through the last write, so two transfers
    // never compute new balances from the same stale read.
    transfer_lock: Mutex<()>,
}

impl TransferHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, activity: Arc<dyn ActivityRepository>) -> Self {
        Self {
            accounts,
            activity,
            transfer_lock: Mutex::new(()),
        }
    }

    /// Execute the transfer command on its own task.
    ///
    /// Once the first write starts the transfer must reach completion or
    /// compensation, so dropping the returned future (e.g. a client hanging
    /// up) does not abort it.
    pub async fn spawn(self: &Arc<Self>, command: TransferCommand) -> Result<TransferRecord, TransferError> {
        let handler = Arc::clone(self);
        tokio::spawn(async move { handler.execute(command).await })
            .await
            .map_err(|e| TransferError::Aborted(e.to_string()))?
    }

    /// Execute the transfer command
    pub async fn execute(&self, command: TransferCommand) -> Result<TransferRecord, TransferError> {
        let amount = Amount::new(command.amount)
            .map_err(|e| DomainError::InvalidAmount(e.to_string()))?;

        if command.sender == command.recipient {
            return Err(DomainError::SameAccountTransfer.into());
        }

        let _guard = self.transfer_lock.lock().await;

        let sender = self
            .accounts
            .find(&command.sender)
            .await
            .map_err(TransferError::Lookup)?
            .ok_or_else(|| DomainError::SenderNotFound(command.sender.clone()))?;

        let recipient = self
            .accounts
            .find(&command.recipient)
            .await
            .map_err(TransferError::Lookup)?
            .ok_or_else(|| DomainError::RecipientNotFound(command.recipient.clone()))?;

        let sender_before = sender.balance();
        let recipient_before = recipient.balance();

        if !sender_before.is_sufficient_for(&amount) {
            return Err(
                DomainError::insufficient_balance(amount.value(), sender_before.value()).into(),
            );
        }

        let sender_after = sender_before
            .debit(&amount)
            .map_err(|e| DomainError::InvalidAmount(e.to_string()))?;
        let recipient_after = recipient_before
            .credit(&amount)
            .map_err(|_| DomainError::RecipientBalanceLimit(recipient.username().to_string()))?;

        // Step A: debit sender
        self.accounts
            .update_balance(sender.username(), sender_after)
            .await
            .map_err(|source| TransferError::SenderUpdateFailed {
                sender: sender.username().to_string(),
                source,
            })?;

        // Step B: credit recipient
        if let Err(source) = self
            .accounts
            .update_balance(recipient.username(), recipient_after)
            .await
        {
            let failure = TransferError::RecipientUpdateFailed {
                recipient: recipient.username().to_string(),
                source,
            };
            return Err(self
                .compensate(failure, &[(sender.username(), sender_before)])
                .await);
        }

        // Step C: record
        let record = TransferRecord::new(sender.username(), recipient.username(), &amount);
        if let Err(source) = self.activity.append_transfer(record.clone()).await {
            let failure = TransferError::TransferRecordingFailed {
                transaction_id: record.transaction_id,
                source,
            };
            return Err(self
                .compensate(
                    failure,
                    &[
                        (sender.username(), sender_before),
                        (recipient.username(), recipient_before),
                    ],
                )
                .await);
        }

        tracing::info!(
            transaction_id = %record.transaction_id,
            sender = %record.sender,
            recipient = %record.recipient,
            amount = %record.amount,
            "Transfer committed"
        );

        Ok(record)
    }

    /// Restore pre-transfer balances after `failure`.
    ///
    /// Every revert is attempted even if an earlier one fails; the first
    /// failed revert is reported as `CompensationFailed`.
    async fn compensate(&self, failure: TransferError, reverts: &[(&str, Balance)]) -> TransferError {
        tracing::warn!(error = %failure, "Transfer step failed, rolling back");

        let mut secondary = None;
        for (username, balance) in reverts {
            if let Err(e) = self.accounts.update_balance(username, *balance).await {
                tracing::error!(
                    username = %username,
                    balance = %balance,
                    error = %e,
                    "Compensating balance write failed"
                );
                secondary.get_or_insert(e);
            }
        }

        match secondary {
            Some(secondary) => TransferError::CompensationFailed {
                original: Box::new(failure),
                secondary,
            },
            None => failure,
        }
    }
}
