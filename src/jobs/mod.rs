//! Scheduled Jobs
//!
//! Background jobs for periodic maintenance tasks.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::auth::RevocationList;

// =========================================================================
// Revocation Sweep Job
// =========================================================================

/// Drop revocation entries whose token has expired anyway.
/// Returns the number of entries removed.
pub fn sweep_expired_revocations(revocations: &RevocationList, now: DateTime<Utc>) -> usize {
    let removed = revocations.sweep_expired(now);

    if removed > 0 {
        tracing::info!(
            removed = removed,
            remaining = revocations.len(),
            "Swept expired token revocations"
        );
    }

    removed
}

// =========================================================================
// Job Scheduler
// =========================================================================

/// Configuration for job scheduler
#[derive(Debug, Clone)]
pub struct JobSchedulerConfig {
    /// Interval for the revocation sweep (default: 1 minute)
    pub revocation_sweep_interval: Duration,
}

impl Default for JobSchedulerConfig {
    fn default() -> Self {
        Self {
            revocation_sweep_interval: Duration::from_secs(60),
        }
    }
}

/// Job Scheduler - runs periodic maintenance tasks
pub struct JobScheduler {
    revocations: Arc<RevocationList>,
    config: JobSchedulerConfig,
}

impl JobScheduler {
    /// Create a new job scheduler
    pub fn new(revocations: Arc<RevocationList>) -> Self {
        Self {
            revocations,
            config: JobSchedulerConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(revocations: Arc<RevocationList>, config: JobSchedulerConfig) -> Self {
        Self { revocations, config }
    }

    /// Start the job scheduler in the background
    /// Returns a handle that can be used to abort the scheduler
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// Run the scheduler loop
    async fn run(&self) {
        tracing::info!(
            sweep_interval_secs = self.config.revocation_sweep_interval.as_secs(),
            "Job scheduler started"
        );

        let mut sweep_interval = interval(self.config.revocation_sweep_interval);

        loop {
            sweep_interval.tick().await;
            sweep_expired_revocations(&self.revocations, Utc::now());
        }
    }

    /// Run all maintenance jobs once (for manual trigger or testing)
    pub async fn run_all_once(&self) -> MaintenanceReport {
        let now = Utc::now();
        MaintenanceReport {
            revocations_swept: sweep_expired_revocations(&self.revocations, now),
            completed_at: now,
        }
    }
}

/// Report from running maintenance jobs
#[derive(Debug, Clone, Default)]
pub struct MaintenanceReport {
    pub revocations_swept: usize,
    pub completed_at: DateTime<Utc>,
}

// =========================================================================
// Tests
// =========================================================================
