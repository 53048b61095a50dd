// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
// Event Bus Implementation - Pub/Sub for Graph Events
//
// In-memory event streaming over tokio broadcast channels. Enables
// real-time streaming of routing and tool activity to the CLI and
// other observers. Events are lost on restart; the bus carries
// diagnostics, not state.

use crate::domain::events::{EventSink, GraphEvent};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<GraphEvent>>,
}

impl EventBus {
    /// Capacity bounds how many events are buffered per subscriber
    /// before old ones are dropped.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Default capacity (1000).
    pub fn with_default_capacity() -> Self {
        Self::new(1000)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GraphEvent> {
        self.sender.subscribe()
    }
}

impl EventSink for EventBus {
    fn publish(&self, event: GraphEvent) {
        debug!(?event, "publishing graph event");
        // A send with no subscribers is not an error.
        let _ = self.sender.send(event);
    }
}
