//! Transport seam shared by the injected browser wallet and the read-only
//! JSON-RPC endpoint, plus the network and contract configuration.

pub mod config;
pub mod jsonrpc;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

use alloy_primitives::hex;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub use config::{AppConfig, ConfigError, NativeCurrency, NetworkConfig};

/// EIP-1193 code for a request the user declined in the wallet.
pub const USER_REJECTED_REQUEST: i64 = 4001;
/// EIP-1193 code for a chain the wallet has not been told about yet.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RpcError {
    #[error("rpc error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response to {method}: {reason}")]
    InvalidResponse { method: String, reason: String },
}

impl RpcError {
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Raw revert payload attached to the error, if the node or wallet
    /// forwarded one. Wallets nest it under `data` or `originalError.data`.
    pub fn revert_data(&self) -> Option<Vec<u8>> {
        let Self::Rpc { data: Some(data), .. } = self else {
            return None;
        };

        let candidates = [
            Some(data),
            data.get("data"),
            data.get("originalError").and_then(|inner| inner.get("data")),
        ];

        candidates
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .find_map(|raw| hex::decode(raw).ok())
            .filter(|bytes| bytes.len() >= 4)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync + ?Sized> MaybeSend for T {}

/// Browser handles are not `Send`; on wasm32 the bound disappears.
#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> MaybeSend for T {}

/// Anything that answers EIP-1193 style `request(method, params)` calls.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: MaybeSend {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError>;

    /// Suspend the calling flow, used between receipt polls.
    async fn sleep(&self, duration: Duration);
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        (**self).request(method, params).await
    }

    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await
    }
}

/// `request` followed by deserializing the result.
pub async fn request_as<T, R>(transport: &T, method: &str, params: Value) -> Result<R, RpcError>
where
    T: Transport + ?Sized,
    R: DeserializeOwned,
{
    let value = transport.request(method, params).await?;
    serde_json::from_value(value).map_err(|err| RpcError::InvalidResponse {
        method: method.to_owned(),
        reason: err.to_string(),
    })
}
