//! User-facing text for failed contract writes.

use lt_chain_client::USER_REJECTED_REQUEST;
use lt_contract::{ContractError, RevertReason};

pub const EMPTY_TITLE: &str = "Title cannot be empty or too long (max 100 characters)";
pub const EMPTY_URL: &str = "URL cannot be empty";
pub const INVALID_URL: &str = "URL must start with http:// or https:// and be properly formatted";
pub const TOO_MANY_LINKS: &str = "Maximum 50 links allowed per user";
pub const NO_LINKS_TO_DELETE: &str = "No links found to delete";
pub const UNAUTHORIZED_ACCESS: &str = "You can only modify your own links";
pub const USER_REJECTED: &str = "Transaction was rejected by user";
pub const INSUFFICIENT_FUNDS: &str = "Insufficient funds for gas fees";
pub const GENERIC_FAILURE: &str = "Transaction failed. Please try again.";

fn revert_message(reason: RevertReason) -> &'static str {
    match reason {
        RevertReason::EmptyTitle => EMPTY_TITLE,
        RevertReason::EmptyUrl => EMPTY_URL,
        RevertReason::InvalidUrl => INVALID_URL,
        RevertReason::TooManyLinks => TOO_MANY_LINKS,
        RevertReason::NoLinksToDelete => NO_LINKS_TO_DELETE,
        RevertReason::UnauthorizedAccess => UNAUTHORIZED_ACCESS,
    }
}

/// Structured fields first (decoded revert selector, EIP-1193 code), then
/// the error text.
pub fn parse_contract_error(err: &ContractError) -> &'static str {
    match err {
        ContractError::Revert(reason) => revert_message(*reason),
        ContractError::Rpc(rpc) if rpc.code() == Some(USER_REJECTED_REQUEST) => USER_REJECTED,
        ContractError::Rpc(rpc) => parse_error_message(&rpc.to_string()),
        ContractError::TransactionFailed { .. } | ContractError::Decode { .. } => GENERIC_FAILURE,
    }
}

/// Substring fallback for opaque wallet errors.
pub fn parse_error_message(message: &str) -> &'static str {
    if let Some(reason) = RevertReason::find_in(message) {
        return revert_message(reason);
    }

    let lowered = message.to_lowercase();
    if lowered.contains("user rejected") || lowered.contains("user denied") {
        return USER_REJECTED;
    }
    if lowered.contains("insufficient funds") {
        return INSUFFICIENT_FUNDS;
    }

    GENERIC_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use lt_chain_client::RpcError;
    use lt_contract::testing;

    #[test]
    fn decoded_reverts_map_one_to_one() {
        let expected = [
            (RevertReason::EmptyTitle, EMPTY_TITLE),
            (RevertReason::EmptyUrl, EMPTY_URL),
            (RevertReason::InvalidUrl, INVALID_URL),
            (RevertReason::TooManyLinks, TOO_MANY_LINKS),
            (RevertReason::NoLinksToDelete, NO_LINKS_TO_DELETE),
            (RevertReason::UnauthorizedAccess, UNAUTHORIZED_ACCESS),
        ];
        for (reason, message) in expected {
            assert_eq!(parse_contract_error(&ContractError::Revert(reason)), message);
        }
    }

    #[test]
    fn too_many_links_revert_from_the_node() {
        let err = ContractError::from(testing::revert_error(RevertReason::TooManyLinks));
        assert_eq!(parse_contract_error(&err), "Maximum 50 links allowed per user");
    }

    #[test]
    fn rejection_code_wins_over_text() {
        let err = ContractError::from(RpcError::rpc(4001, "something unrelated"));
        assert_eq!(parse_contract_error(&err), USER_REJECTED);
    }

    #[test]
    fn opaque_wallet_errors_fall_back_to_substrings() {
        let funds = ContractError::from(RpcError::rpc(
            -32000,
            "insufficient funds for gas * price + value",
        ));
        assert_eq!(parse_contract_error(&funds), INSUFFICIENT_FUNDS);

        let named = ContractError::from(RpcError::rpc(
            -32603,
            "execution reverted: NoLinksToDelete()",
        ));
        assert_eq!(parse_contract_error(&named), NO_LINKS_TO_DELETE);

        assert_eq!(
            parse_error_message("ethers-user-denied: User denied transaction signature"),
            USER_REJECTED
        );
        assert_eq!(parse_error_message("user rejected transaction"), USER_REJECTED);
    }

    #[test]
    fn everything_else_is_generic() {
        let failed = ContractError::TransactionFailed {
            tx_hash: B256::ZERO,
        };
        assert_eq!(parse_contract_error(&failed), GENERIC_FAILURE);
        assert_eq!(
            parse_contract_error(&ContractError::from(RpcError::Transport("timeout".to_owned()))),
            GENERIC_FAILURE
        );
        assert_eq!(parse_error_message("nonce too low"), GENERIC_FAILURE);
    }
}
