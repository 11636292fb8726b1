//! # Message Channel
//!
//! The frame side of the protocol: a FIFO queue of raw host messages in
//! front of the runtime. Each message is decoded and applied in full —
//! including its outline update and resync — before the next one is looked
//! at, so the host always observes command effects in posting order.
//!
//! Undecodable messages are dropped: the host may be a newer build speaking
//! a superset of the protocol, and an unknown message must never wedge the
//! queue.

use std::collections::VecDeque;

use menukit_editor::{Command, EditorRuntime, Measure};
use serde_json::Value;
use tracing::debug;

use crate::messages::{EditorMessage, HostMessage};

pub struct MessageChannel<M: Measure> {
    runtime: EditorRuntime<M>,
    inbox: VecDeque<Value>,
}

impl<M: Measure> MessageChannel<M> {
    pub fn new(runtime: EditorRuntime<M>) -> Self {
        Self {
            runtime,
            inbox: VecDeque::new(),
        }
    }

    pub fn runtime(&self) -> &EditorRuntime<M> {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut EditorRuntime<M> {
        &mut self.runtime
    }

    /// Queue one raw message from the host.
    pub fn post(&mut self, raw: Value) {
        self.inbox.push_back(raw);
    }

    /// Apply every queued message in arrival order and collect the
    /// responses.
    pub fn pump(&mut self) -> Vec<EditorMessage> {
        while let Some(raw) = self.inbox.pop_front() {
            match serde_json::from_value::<HostMessage>(raw) {
                Ok(message) => self.runtime.apply_command(Command::from(message)),
                Err(error) => debug!(%error, "dropping undecodable host message"),
            }
        }
        self.collect()
    }

    /// Advance the runtime's timers and collect anything they emitted.
    pub fn tick(&mut self, ms: u64) -> Vec<EditorMessage> {
        self.runtime.tick(ms);
        self.collect()
    }

    fn collect(&mut self) -> Vec<EditorMessage> {
        self.runtime
            .drain_events()
            .into_iter()
            .map(EditorMessage::from)
            .collect()
    }
}
