//! Bot runtime - supervised polling and webhook runners.
//!
//! Each attempt builds a fresh dispatcher. An attempt that errors or panics
//! is restarted after a fixed backoff; a clean return (Ctrl+C) ends the loop.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use teloxide::prelude::*;
use tracing::{error, info, warn};

use super::dispatcher::{AppState, ThrottledBot, build_dispatcher};
use super::webhook;
use crate::config::{BotMode, Config};

/// Restart bookkeeping, shared with the health endpoint.
#[derive(Debug, Default)]
pub struct SupervisorStats {
    restarts: AtomicU64,
    last_failure: Mutex<Option<DateTime<Utc>>>,
}

impl SupervisorStats {
    pub fn restarts(&self) -> u64 {
        self.restarts.load(Ordering::Relaxed)
    }

    pub fn last_failure(&self) -> Option<DateTime<Utc>> {
        *self.last_failure.lock()
    }

    fn record_failure(&self) -> u64 {
        *self.last_failure.lock() = Some(Utc::now());
        self.restarts.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Keeps the receive loop alive.
pub struct Supervisor {
    backoff: Duration,
    stats: Arc<SupervisorStats>,
}

impl Supervisor {
    pub fn new(backoff: Duration) -> Self {
        Self {
            backoff,
            stats: Arc::new(SupervisorStats::default()),
        }
    }

    pub fn stats(&self) -> Arc<SupervisorStats> {
        self.stats.clone()
    }

    /// Run attempts produced by `attempt` until one returns `Ok`.
    pub async fn run<F, Fut>(&self, mut attempt: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        loop {
            match tokio::spawn(attempt()).await {
                Ok(Ok(())) => {
                    info!("Receive loop stopped");
                    return;
                }
                Ok(Err(e)) => error!("Receive loop failed: {:#}", e),
                Err(e) if e.is_panic() => error!("Receive loop panicked"),
                Err(e) => error!("Receive loop aborted: {}", e),
            }

            let restarts = self.stats.record_failure();
            warn!(restarts, "Restarting receive loop in {:?}", self.backoff);
            tokio::time::sleep(self.backoff).await;
        }
    }
}

/// Run the bot with the configured mode under the supervisor.
pub async fn run(config: Arc<Config>, bot: ThrottledBot, state: AppState, supervisor: &Supervisor) {
    supervisor
        .run(move || {
            let config = config.clone();
            let bot = bot.clone();
            let state = state.clone();
            async move {
                let mut dispatcher = build_dispatcher(bot.clone(), state);
                match config.bot_mode {
                    BotMode::Polling => {
                        info!("Starting bot in polling mode...");
                        dispatcher.dispatch().await;
                        Ok(())
                    }
                    BotMode::Webhook => {
                        info!("Starting bot in webhook mode...");
                        webhook::start_webhook(&config, dispatcher, bot).await
                    }
                }
            }
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[tokio::test(start_paused = true)]
    async fn restarts_until_clean_exit() {
        let supervisor = Supervisor::new(Duration::from_secs(5));
        let attempts = Arc::new(AtomicU32::new(0));

        let counter = attempts.clone();
        supervisor
            .run(move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    match n {
                        0 => anyhow::bail!("connection reset"),
                        1 => panic!("handler blew up"),
                        _ => Ok(()),
                    }
                }
            })
            .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        let stats = supervisor.stats();
        assert_eq!(stats.restarts(), 2);
        assert!(stats.last_failure().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_backoff_between_attempts() {
        let supervisor = Supervisor::new(Duration::from_secs(30));
        let started = tokio::time::Instant::now();
        let attempts = Arc::new(AtomicU32::new(0));

        let counter = attempts.clone();
        supervisor
            .run(move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        anyhow::bail!("first attempt fails");
                    }
                    Ok(())
                }
            })
            .await;

        assert!(started.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test]
    async fn clean_exit_records_nothing() {
        let supervisor = Supervisor::new(Duration::from_secs(1));
        supervisor.run(|| async { Ok(()) }).await;
        assert_eq!(supervisor.stats().restarts(), 0);
        assert!(supervisor.stats().last_failure().is_none());
    }
}
