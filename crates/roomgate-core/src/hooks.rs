//! Pre-join hook registry — handlers run in priority order with veto
//! semantics.
//!
//! - Handlers are called in priority order (lower = runs first).
//! - If any handler returns [`HookDecision::Reject`], dispatch stops and
//!   the rejection is returned; remaining handlers never run.
//! - Otherwise the event is allowed through.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::events::{HookDecision, PreJoinEvent};

/// Priority for handlers that must run before default room-join
/// admission handling (which runs at priority 0).
pub const PRIORITY_BEFORE_ADMISSION: i32 = -10;

/// Trait for pre-join handler implementations.
#[async_trait]
pub trait PreJoinHandler: Send + Sync + std::fmt::Debug {
    /// Handles a pre-join event.
    async fn handle(&self, event: &PreJoinEvent) -> HookDecision;

    /// Returns the handler name used in logs.
    fn name(&self) -> &str;

    /// Returns the priority (lower = runs first).
    fn priority(&self) -> i32;
}

/// Entry in the hook registry.
#[derive(Debug)]
struct HookEntry {
    /// The handler.
    handler: Arc<dyn PreJoinHandler>,
    /// Priority (lower = earlier execution).
    priority: i32,
}

/// Registry of pre-join handlers sorted by priority.
#[derive(Debug, Default)]
pub struct HookRegistry {
    /// Sorted list of handlers.
    handlers: RwLock<Vec<HookEntry>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Registers a handler.
    pub async fn register(&self, handler: Arc<dyn PreJoinHandler>) {
        let name = handler.name().to_string();
        let priority = handler.priority();

        let mut handlers = self.handlers.write().await;
        handlers.push(HookEntry { handler, priority });

        // Sort by priority (lower first)
        handlers.sort_by_key(|e| e.priority);

        info!(handler = %name, priority, "Pre-join handler registered");
    }

    /// Dispatches a pre-join event to all handlers in priority order.
    ///
    /// The first rejection stops dispatch and is returned to the host so
    /// it can answer the participant and drop the event.
    pub async fn dispatch(&self, event: &PreJoinEvent) -> HookDecision {
        let handlers = self.handlers.read().await;

        for entry in handlers.iter() {
            let decision = entry.handler.handle(event).await;
            match decision {
                HookDecision::Allow => {
                    debug!(
                        handler = %entry.handler.name(),
                        room = %event.room_address,
                        "Handler allowed join"
                    );
                }
                HookDecision::Reject(rejection) => {
                    info!(
                        handler = %entry.handler.name(),
                        room = %event.room_address,
                        participant = %event.participant,
                        reason = %rejection.text,
                        "Handler rejected join"
                    );
                    return HookDecision::Reject(rejection);
                }
            }
        }

        HookDecision::Allow
    }

    /// Returns the number of registered handlers.
    pub async fn len(&self) -> usize {
        self.handlers.read().await.len()
    }

    /// Returns whether the registry is empty.
    pub async fn is_empty(&self) -> bool {
        self.handlers.read().await.is_empty()
    }
}
