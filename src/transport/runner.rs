//! The bar's single-threaded event loop

use super::{Transport, TransportError, TransportMode};
use crate::core::{BarEvent, Dispatcher};
use aether_bar_core::RenderTarget;
use aether_bar_types::BarLayout;
use anyhow::{Context, Result};
use log::{error, info, trace};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{sleep_until, Instant};

/// Drive `dispatcher` from a transport and a queue of local events.
///
/// The startup layout is applied first. In poll mode the first request is
/// sent immediately and each transport message schedules the next request
/// `request_interval` later. Events are handled one at a time, in arrival
/// order within each source, with local events ahead of transport ones.
/// `on_cycle` runs after each handled event. Returns an error when the
/// transport closes or fails.
pub async fn run_event_loop<T, R, F>(
    transport: &mut T,
    dispatcher: &mut Dispatcher<R>,
    startup: BarLayout,
    mut local: UnboundedReceiver<BarEvent>,
    request_interval: Duration,
    mut on_cycle: F,
) -> Result<()>
where
    T: Transport,
    R: RenderTarget,
    F: FnMut(&Dispatcher<R>),
{
    dispatcher.start();
    dispatcher.apply_config(startup);
    on_cycle(dispatcher);

    let poll = transport.mode() == TransportMode::Poll;
    let mut next_request = poll.then(Instant::now);
    let mut local_open = true;
    info!("Event loop started ({:?} mode)", transport.mode());

    loop {
        let deadline = next_request.unwrap_or_else(Instant::now);

        // Local events (clock ticks, config reloads) are polled first and so
        // run ahead of transport messages already queued. Each source keeps
        // its own arrival order.
        tokio::select! {
            biased;

            event = local.recv(), if local_open => match event {
                Some(event) => dispatcher.handle_event(event),
                None => {
                    local_open = false;
                    continue;
                }
            },

            _ = sleep_until(deadline), if next_request.is_some() => {
                next_request = None;
                trace!("Requesting update");
                transport
                    .request_update()
                    .await
                    .context("Failed to request update")?;
                continue;
            }

            received = transport.recv() => match received.context("Transport failed")? {
                Some(event) => {
                    dispatcher.handle_event(event);
                    if poll {
                        next_request = Some(Instant::now() + request_interval);
                    }
                }
                None => {
                    error!("Transport closed");
                    return Err(TransportError::Closed.into());
                }
            },
        }

        on_cycle(dispatcher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BarContext;
    use crate::render::NodeTree;
    use crate::transport::{channel_transport, OutboundMessage};
    use aether_bar_core::RenderTarget;
    use aether_bar_types::parse_layout;
    use serde_json::json;
    use tokio::sync::mpsc::unbounded_channel;

    fn cpu_text(d: &Dispatcher<NodeTree>) -> String {
        let tree = d.target();
        tree.node_by_id("slot-cpu")
            .and_then(|node| tree.content(node))
            .map(|fragment| fragment.plain_text())
            .unwrap_or_default()
    }

    fn closed(result: Result<()>) -> bool {
        matches!(
            result.unwrap_err().downcast_ref::<TransportError>(),
            Some(TransportError::Closed)
        )
    }

    #[tokio::test]
    async fn test_push_mode_processes_in_order_then_fails_on_close() {
        let (mut transport, handle) = channel_transport(TransportMode::Push);
        let mut dispatcher = Dispatcher::new(NodeTree::with_regions(), BarContext::default());
        let (local_tx, local_rx) = unbounded_channel();
        drop(local_tx);

        handle.send(json!({ "cpu_usage": 5 })).unwrap();
        handle.send(json!({ "datapack": { "cpu_usage": 6 } })).unwrap();
        drop(handle);

        let mut seen = Vec::new();
        let result = run_event_loop(
            &mut transport,
            &mut dispatcher,
            parse_layout(&json!({ "cpu": {} })),
            local_rx,
            Duration::from_millis(10),
            |d| seen.push(cpu_text(d)),
        )
        .await;

        assert!(closed(result));
        assert_eq!(seen, vec!["0%", "5%", "6%"]);
    }

    #[tokio::test]
    async fn test_poll_mode_requests_after_each_message() {
        let (mut transport, mut handle) = channel_transport(TransportMode::Poll);
        let mut dispatcher = Dispatcher::new(NodeTree::with_regions(), BarContext::default());
        let (_local_tx, local_rx) = unbounded_channel();

        let collector = async move {
            assert_eq!(handle.next_request().await, Some(OutboundMessage::RequestUpdate));
            handle.send(json!({ "cpu_usage": 40 })).unwrap();
            assert_eq!(handle.next_request().await, Some(OutboundMessage::RequestUpdate));
            handle.send(json!({ "cpu_usage": 41 })).unwrap();
            assert_eq!(handle.next_request().await, Some(OutboundMessage::RequestUpdate));
        };

        let bar = run_event_loop(
            &mut transport,
            &mut dispatcher,
            parse_layout(&json!({ "cpu": {} })),
            local_rx,
            Duration::from_millis(5),
            |_| {},
        );

        let (result, ()) = tokio::join!(bar, collector);
        assert!(result.is_err());
        assert_eq!(cpu_text(&dispatcher), "41%");
    }

    #[tokio::test]
    async fn test_poll_requests_keep_minimum_spacing() {
        let interval = Duration::from_millis(40);
        let (mut transport, mut handle) = channel_transport(TransportMode::Poll);
        let mut dispatcher = Dispatcher::new(NodeTree::with_regions(), BarContext::default());
        let (_local_tx, local_rx) = unbounded_channel();

        let collector = async move {
            let mut gaps = Vec::new();
            handle.next_request().await;
            for usage in 0..3 {
                handle.send(json!({ "cpu_usage": usage })).unwrap();
                let answered = Instant::now();
                assert_eq!(handle.next_request().await, Some(OutboundMessage::RequestUpdate));
                gaps.push(answered.elapsed());
            }
            gaps
        };

        let bar = run_event_loop(
            &mut transport,
            &mut dispatcher,
            parse_layout(&json!({ "cpu": {} })),
            local_rx,
            interval,
            |_| {},
        );

        let (_, gaps) = tokio::join!(bar, collector);
        assert_eq!(gaps.len(), 3);
        for gap in gaps {
            assert!(gap >= interval, "request sent after {:?}", gap);
        }
    }

    #[tokio::test]
    async fn test_local_events_share_the_queue() {
        let (mut transport, handle) = channel_transport(TransportMode::Push);
        let mut dispatcher = Dispatcher::new(NodeTree::with_regions(), BarContext::default());
        let (local_tx, local_rx) = unbounded_channel();

        local_tx
            .send(BarEvent::Config(parse_layout(&json!({ "cpu": {}, "disk": {} }))))
            .unwrap();
        local_tx.send(BarEvent::metric("cpu_usage", 12)).unwrap();
        drop(local_tx);
        drop(handle);

        let result = run_event_loop(
            &mut transport,
            &mut dispatcher,
            parse_layout(&json!({ "memory": {} })),
            local_rx,
            Duration::from_millis(10),
            |_| {},
        )
        .await;

        assert!(closed(result));
        assert_eq!(dispatcher.mounted_slots(), vec!["cpu", "disk"]);
        assert_eq!(cpu_text(&dispatcher), "12%");
    }
}
