use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use lt_chain_client::jsonrpc::{JsonRpcRequest, JsonRpcResponse};
use lt_chain_client::{RpcError, Transport};
use serde_json::Value;
use std::cell::Cell;
use std::time::Duration;

/// Read-only JSON-RPC endpoint reached through `fetch`.
pub(crate) struct FetchTransport {
    endpoint: String,
    next_id: Cell<u64>,
}

impl FetchTransport {
    pub(crate) fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_owned(),
            next_id: Cell::new(1),
        }
    }
}

fn transport_error(err: gloo_net::Error) -> RpcError {
    RpcError::Transport(err.to_string())
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.replace(self.next_id.get() + 1);

        let response = Request::post(&self.endpoint)
            .json(&JsonRpcRequest::new(id, method, params))
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;

        let body: JsonRpcResponse = response.json().await.map_err(|err| {
            RpcError::Transport(format!("HTTP {}: {err}", response.status()))
        })?;
        body.into_result()
    }

    async fn sleep(&self, duration: Duration) {
        TimeoutFuture::new(duration.as_millis().min(u32::MAX as u128) as u32).await
    }
}
