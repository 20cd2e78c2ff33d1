//! Local clock ticker

use crate::core::BarEvent;
use aether_bar_core::CLOCK_TICK_INTERVAL;
use aether_bar_types::MetricKey;
use log::debug;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Current local time as `HH:MM:SS`
pub fn local_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Send a `time` update every tick until the receiver is dropped
pub fn spawn_clock_ticker(events: UnboundedSender<BarEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval(CLOCK_TICK_INTERVAL);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticks.tick().await;
            if events
                .send(BarEvent::metric(MetricKey::Time.wire_name(), local_time()))
                .is_err()
            {
                debug!("Event loop gone, stopping clock ticker");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_local_time_shape() {
        let now = local_time();
        assert_eq!(now.len(), 8);
        assert_eq!(now.matches(':').count(), 2);
    }

    #[tokio::test]
    async fn test_first_tick_is_immediate() {
        let (tx, mut rx) = unbounded_channel();
        let handle = spawn_clock_ticker(tx);
        match rx.recv().await {
            Some(BarEvent::Update(fields)) => assert!(fields.contains_key("time")),
            other => panic!("expected time update, got {:?}", other),
        }
        drop(rx);
        handle.abort();
    }
}
