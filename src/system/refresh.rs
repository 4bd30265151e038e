use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::sampler::Sampler;
use super::store::SnapshotStore;

/// Spawn the background refresh loop: every `period`, sample the host and
/// publish the result. Probes run sequentially inside this task; their
/// brief OS-call blocking never touches readers, which only swap an `Arc`
/// out of the store.
///
/// The loop stops only when `shutdown` is cancelled. Sampling cannot fail
/// wholesale (each probe degrades to an absent field on its own), so every
/// tick publishes.
pub fn spawn_refresh_task(
    mut sampler: Sampler,
    store: Arc<SnapshotStore>,
    period: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The startup pass already seeded the store; skip the interval's
        // immediate first tick.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("refresh loop stopping");
                    break;
                }
                _ = ticker.tick() => {
                    let snapshot = sampler.sample();
                    tracing::debug!(timestamp = %snapshot.timestamp, "publishing snapshot");
                    store.publish(snapshot);
                }
            }
        }
    })
}
