//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::api::{ChatClient, ChatError};

/// A client that fails a fixed number of times, then replies (or never does).
pub struct ScriptedClient {
    failures_before_reply: u32,
    reply: Option<String>,
    calls: AtomicU32,
    received: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn replying(reply: &str) -> Self {
        Self::failing_then_replying(0, reply)
    }

    pub fn failing_then_replying(failures: u32, reply: &str) -> Self {
        Self {
            failures_before_reply: failures,
            reply: Some(reply.to_string()),
            calls: AtomicU32::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn always_failing() -> Self {
        Self {
            failures_before_reply: u32::MAX,
            reply: None,
            calls: AtomicU32::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, message: &str) -> Result<String, ChatError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(message.to_string());

        match &self.reply {
            Some(reply) if call >= self.failures_before_reply => Ok(reply.clone()),
            _ => Err(ChatError::Network("connection refused".to_string())),
        }
    }
}
