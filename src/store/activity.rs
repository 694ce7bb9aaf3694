//! Activity log backed by `sessions.json` and `transactions.json`
//!
//! The two collections have independent locks, so session logging never
//! contends with transfer recording.

use async_trait::async_trait;
use std::path::Path;

use crate::domain::{SessionEvent, TransferRecord};

use super::{ActivityRepository, JsonCollection, StoreError, SESSIONS_FILE, TRANSACTIONS_FILE};

#[derive(Debug)]
pub struct JsonActivityLog {
    sessions: JsonCollection<SessionEvent>,
    transactions: JsonCollection<TransferRecord>,
}

impl JsonActivityLog {
    /// Open the log inside a data directory
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            sessions: JsonCollection::new(data_dir.join(SESSIONS_FILE)),
            transactions: JsonCollection::new(data_dir.join(TRANSACTIONS_FILE)),
        }
    }

    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        self.sessions.ensure_exists().await?;
        self.transactions.ensure_exists().await?;
        Ok(())
    }

    /// Full session history, oldest first
    pub async fn session_events(&self) -> Result<Vec<SessionEvent>, StoreError> {
        self.sessions.load().await
    }

    /// Full transfer history, oldest first
    pub async fn transfers(&self) -> Result<Vec<TransferRecord>, StoreError> {
        self.transactions.load().await
    }
}

#[async_trait]
impl ActivityRepository for JsonActivityLog {
    async fn append_session_event(&self, event: SessionEvent) -> Result<(), StoreError> {
        self.sessions.append(event).await
    }

    async fn append_transfer(&self, record: TransferRecord) -> Result<(), StoreError> {
        self.transactions.append(record).await
    }
}
