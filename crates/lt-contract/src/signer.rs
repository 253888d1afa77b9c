use alloy_primitives::Address;
use async_trait::async_trait;
use lt_chain_client::{RpcError, Transport};
use serde_json::Value;
use std::time::Duration;

/// A wallet provider bound to one authorized account.
#[derive(Debug, Clone)]
pub struct Signer<P> {
    address: Address,
    provider: P,
}

impl<P> Signer<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self { address, provider }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<P: Transport> Transport for Signer<P> {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.provider.request(method, params).await
    }

    async fn sleep(&self, duration: Duration) {
        self.provider.sleep(duration).await
    }
}
