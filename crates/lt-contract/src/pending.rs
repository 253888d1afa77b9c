use crate::ContractError;
use alloy_primitives::B256;
use lt_chain_client::{Transport, request_as};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Outcome of a mined write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub block_number: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// A submitted write that is not durable until [`PendingTransaction::confirm`]
/// returns. There is no timeout: the receipt is polled until it appears.
#[derive(Debug, Clone)]
#[must_use = "a write is not durable until it is confirmed"]
pub struct PendingTransaction<T> {
    tx_hash: B256,
    transport: T,
    poll_interval: Duration,
}

impl<T: Transport> PendingTransaction<T> {
    pub fn new(tx_hash: B256, transport: T) -> Self {
        Self {
            tx_hash,
            transport,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn tx_hash(&self) -> B256 {
        self.tx_hash
    }

    pub async fn confirm(self) -> Result<TxReceipt, ContractError> {
        loop {
            let raw: Option<RawReceipt> = request_as(
                &self.transport,
                "eth_getTransactionReceipt",
                json!([self.tx_hash.to_string()]),
            )
            .await?;

            let Some(receipt) = raw else {
                debug!(tx_hash = %self.tx_hash, "receipt not available yet");
                self.transport.sleep(self.poll_interval).await;
                continue;
            };

            // Pre-Byzantium receipts have no status; treat them as mined.
            if receipt.status.as_deref().map(parse_quantity) == Some(Some(0)) {
                warn!(tx_hash = %self.tx_hash, "transaction failed on-chain");
                return Err(ContractError::TransactionFailed {
                    tx_hash: self.tx_hash,
                });
            }

            let block_number = receipt
                .block_number
                .as_deref()
                .and_then(parse_quantity)
                .unwrap_or_default();

            debug!(tx_hash = %self.tx_hash, block_number, "transaction confirmed");
            return Ok(TxReceipt {
                tx_hash: self.tx_hash,
                block_number,
            });
        }
    }
}

pub(crate) fn parse_quantity(raw: &str) -> Option<u64> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    u64::from_str_radix(digits, 16).ok()
}

pub(crate) fn parse_tx_hash(value: Value) -> Result<B256, ContractError> {
    let raw = value
        .as_str()
        .ok_or_else(|| ContractError::decode("transaction hash", format!("expected string, got {value}")))?;
    raw.parse::<B256>()
        .map_err(|err| ContractError::decode("transaction hash", err))
}
