use crate::bindings::ILinkRegistry::{self, ILinkRegistryErrors};
use alloy_primitives::B256;
use alloy_sol_types::{SolError, SolInterface};
use lt_chain_client::RpcError;
use std::fmt;

/// Named errors the link registry reverts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertReason {
    EmptyTitle,
    EmptyUrl,
    InvalidUrl,
    TooManyLinks,
    NoLinksToDelete,
    UnauthorizedAccess,
}

impl RevertReason {
    pub const ALL: [RevertReason; 6] = [
        RevertReason::EmptyTitle,
        RevertReason::EmptyUrl,
        RevertReason::InvalidUrl,
        RevertReason::TooManyLinks,
        RevertReason::NoLinksToDelete,
        RevertReason::UnauthorizedAccess,
    ];

    /// Error name as declared in the ABI.
    pub fn name(self) -> &'static str {
        match self {
            RevertReason::EmptyTitle => "EmptyTitle",
            RevertReason::EmptyUrl => "EmptyURL",
            RevertReason::InvalidUrl => "InvalidURL",
            RevertReason::TooManyLinks => "TooManyLinks",
            RevertReason::NoLinksToDelete => "NoLinksToDelete",
            RevertReason::UnauthorizedAccess => "UnauthorizedAccess",
        }
    }

    /// Decode revert data by its 4-byte selector.
    pub fn decode(data: &[u8]) -> Option<Self> {
        let decoded = ILinkRegistryErrors::abi_decode(data, true).ok()?;
        Some(match decoded {
            ILinkRegistryErrors::EmptyTitle(_) => RevertReason::EmptyTitle,
            ILinkRegistryErrors::EmptyURL(_) => RevertReason::EmptyUrl,
            ILinkRegistryErrors::InvalidURL(_) => RevertReason::InvalidUrl,
            ILinkRegistryErrors::TooManyLinks(_) => RevertReason::TooManyLinks,
            ILinkRegistryErrors::NoLinksToDelete(_) => RevertReason::NoLinksToDelete,
            ILinkRegistryErrors::UnauthorizedAccess(_) => RevertReason::UnauthorizedAccess,
        })
    }

    /// Revert payload (selector only; none of the errors carry arguments).
    pub fn abi_encode(self) -> Vec<u8> {
        match self {
            RevertReason::EmptyTitle => ILinkRegistry::EmptyTitle {}.abi_encode(),
            RevertReason::EmptyUrl => ILinkRegistry::EmptyURL {}.abi_encode(),
            RevertReason::InvalidUrl => ILinkRegistry::InvalidURL {}.abi_encode(),
            RevertReason::TooManyLinks => ILinkRegistry::TooManyLinks {}.abi_encode(),
            RevertReason::NoLinksToDelete => ILinkRegistry::NoLinksToDelete {}.abi_encode(),
            RevertReason::UnauthorizedAccess => ILinkRegistry::UnauthorizedAccess {}.abi_encode(),
        }
    }

    /// First reason whose ABI name occurs in `message`.
    pub fn find_in(message: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|reason| message.contains(reason.name()))
    }
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ContractError {
    #[error("contract reverted with {0}")]
    Revert(RevertReason),
    #[error("transaction {tx_hash} failed on-chain")]
    TransactionFailed { tx_hash: B256 },
    #[error(transparent)]
    Rpc(RpcError),
    #[error("failed to decode {context}: {reason}")]
    Decode {
        context: &'static str,
        reason: String,
    },
}

impl ContractError {
    pub(crate) fn decode(context: &'static str, reason: impl fmt::Display) -> Self {
        ContractError::Decode {
            context,
            reason: reason.to_string(),
        }
    }

    /// The wallet-level error underneath, if any.
    pub fn rpc(&self) -> Option<&RpcError> {
        match self {
            ContractError::Rpc(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RpcError> for ContractError {
    fn from(err: RpcError) -> Self {
        match err.revert_data().as_deref().and_then(RevertReason::decode) {
            Some(reason) => ContractError::Revert(reason),
            None => ContractError::Rpc(err),
        }
    }
}
