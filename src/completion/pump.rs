//! Periodic draining of the completion channel

use super::channel::CompletionChannel;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

/// Drains a completion channel on a fixed tick, like a message loop
pub struct MessagePump {
    task: JoinHandle<()>,
}

impl MessagePump {
    /// Start the pump loop on the current tokio runtime
    pub fn spawn(channel: CompletionChannel, drain_interval: Duration) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = interval(drain_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let delivered = channel.drain_once();
                if delivered > 0 {
                    debug!("Pump delivered {} continuations", delivered);
                }
            }
        });

        info!("Message pump started (interval {:?})", drain_interval);
        Self { task }
    }

    /// Stop the pump; queued continuations stay queued
    pub fn stop(self) {
        self.task.abort();
        info!("Message pump stopped");
    }
}
