//! Canned JSON-RPC answers for driving a [`LinkRegistry`](crate::LinkRegistry)
//! through `MockTransport`.

use crate::RevertReason;
use crate::bindings;
use alloy_primitives::{B256, U256, hex};
use alloy_sol_types::SolValue;
use lt_api_types::Link;
use lt_chain_client::RpcError;
use serde_json::{Value, json};

fn encoded(bytes: Vec<u8>) -> Value {
    Value::String(hex::encode_prefixed(bytes))
}

pub fn links_result(links: &[Link]) -> Value {
    let links: Vec<bindings::Link> = links.iter().map(bindings::Link::from).collect();
    encoded(links.abi_encode())
}

pub fn link_result(link: &Link) -> Value {
    encoded(bindings::Link::from(link).abi_encode())
}

pub fn bool_result(value: bool) -> Value {
    encoded(value.abi_encode())
}

pub fn uint_result(value: u64) -> Value {
    encoded(U256::from(value).abi_encode())
}

pub fn contract_info_result(max_links: u64, max_title: u64, max_url: u64) -> Value {
    encoded((U256::from(max_links), U256::from(max_title), U256::from(max_url)).abi_encode_params())
}

/// Deterministic transaction hash with every byte set to `n`.
pub fn tx_hash(n: u8) -> Value {
    Value::String(B256::repeat_byte(n).to_string())
}

pub fn receipt(block_number: u64, success: bool) -> Value {
    json!({
        "blockNumber": format!("{block_number:#x}"),
        "status": if success { "0x1" } else { "0x0" },
    })
}

/// The error a node returns when a call reverts with `reason`.
pub fn revert_error(reason: RevertReason) -> RpcError {
    RpcError::Rpc {
        code: 3,
        message: "execution reverted".to_owned(),
        data: Some(encoded(reason.abi_encode())),
    }
}
