//! Scripted transport for tests.

use crate::{RpcError, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Default)]
struct MockState {
    queued: HashMap<String, VecDeque<Result<Value, RpcError>>>,
    sticky: HashMap<String, Result<Value, RpcError>>,
    calls: Vec<(String, Value)>,
}

/// Answers each method from a per-method queue, then from a sticky answer.
/// Unscripted methods fail with `-32601 method not found`. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue one successful answer for `method`.
    pub fn respond(&self, method: &str, value: Value) -> &Self {
        self.push(method, Ok(value))
    }

    /// Queue one failure for `method`.
    pub fn fail(&self, method: &str, err: RpcError) -> &Self {
        self.push(method, Err(err))
    }

    /// Answer every call to `method` not covered by the queue.
    pub fn respond_always(&self, method: &str, value: Value) -> &Self {
        self.state().sticky.insert(method.to_owned(), Ok(value));
        self
    }

    fn push(&self, method: &str, answer: Result<Value, RpcError>) -> &Self {
        self.state()
            .queued
            .entry(method.to_owned())
            .or_default()
            .push_back(answer);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.state().calls.clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.state().calls.iter().map(|(method, _)| method.clone()).collect()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.state()
            .calls
            .iter()
            .filter(|(called, _)| called == method)
            .map(|(_, params)| params.clone())
            .collect()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for MockTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let mut state = self.state();
        state.calls.push((method.to_owned(), params));

        if let Some(answer) = state.queued.get_mut(method).and_then(VecDeque::pop_front) {
            return answer;
        }

        state
            .sticky
            .get(method)
            .cloned()
            .unwrap_or_else(|| Err(RpcError::rpc(-32601, format!("method not found: {method}"))))
    }

    /// Yields once so a confirmation loop lets other tasks run between polls.
    async fn sleep(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}
