use super::store::CodeStore;
use std::sync::Arc;
use std::time::Duration;

const SWEEP_INTERVAL_SECS: u64 = 300;

/// Spawns the periodic expiry sweep. The first tick fires immediately, which
/// covers the sweep-at-startup requirement; correctness never depends on it
/// because lookup self-heals expired entries.
pub fn spawn(store: Arc<dyn CodeStore>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
        loop {
            ticker.tick().await;
            match store.sweep().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!("Swept {} expired verification codes", removed),
                Err(e) => tracing::warn!("Verification code sweep failed: {}", e),
            }
        }
    });
}
