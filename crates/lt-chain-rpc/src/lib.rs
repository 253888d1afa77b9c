use async_trait::async_trait;
use lt_chain_client::jsonrpc::{JsonRpcRequest, JsonRpcResponse};
use lt_chain_client::{NetworkConfig, RpcError, Transport};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Read-only JSON-RPC endpoint over HTTP. The URL comes from a validated
/// `NetworkConfig`.
pub struct HttpTransport {
    endpoint: String,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn from_network(network: &NetworkConfig) -> Self {
        Self::new(&network.rpc_url)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, method: &str, params: Value) -> anyhow::Result<JsonRpcResponse> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest::new(id, method, params);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        // Nodes answer JSON-RPC errors with 200, but some gateways use 4xx/5xx
        // and still send a JSON-RPC body.
        match serde_json::from_str::<JsonRpcResponse>(&text) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => anyhow::bail!("HTTP {status}: {text}"),
            Err(err) => anyhow::bail!("malformed JSON-RPC body: {err}"),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        debug!(endpoint = %self.endpoint, method, "json-rpc request");

        let response = self.post(method, params).await.map_err(|err| {
            warn!(endpoint = %self.endpoint, method, "json-rpc transport failure: {err:#}");
            RpcError::Transport(format!("{method}: {err:#}"))
        })?;

        response.into_result()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
