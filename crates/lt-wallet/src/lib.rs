//! Single point of contact with the browser wallet provider.

mod address;
mod messages;

use alloy_primitives::Address;
use lt_chain_client::{NetworkConfig, RpcError, Transport, UNRECOGNIZED_CHAIN, request_as};
use lt_contract::Signer;
use serde_json::json;
use std::cell::RefCell;
use tracing::{debug, info, warn};

pub use address::{format_address, is_valid_address, parse_address};
pub use messages::{parse_contract_error, parse_error_message};

#[derive(Debug, Clone, thiserror::Error)]
pub enum WalletError {
    #[error("No wallet provider is installed")]
    NotInstalled,
    #[error("No accounts found")]
    NoAccounts,
    #[error("wallet returned an invalid account: {0}")]
    InvalidAccount(String),
    #[error(transparent)]
    Provider(#[from] RpcError),
}

/// Wraps an injected provider (or its absence) and the locally bound account.
pub struct WalletService<P> {
    provider: Option<P>,
    network: NetworkConfig,
    active: RefCell<Option<Signer<P>>>,
}

impl<P> WalletService<P>
where
    P: Transport + Clone,
{
    pub fn new(provider: Option<P>, network: NetworkConfig) -> Self {
        Self {
            provider,
            network,
            active: RefCell::new(None),
        }
    }

    pub fn is_installed(&self) -> bool {
        self.provider.is_some()
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// The account bound by the last successful `connect`/`check_existing`.
    pub fn active(&self) -> Option<Signer<P>> {
        self.active.borrow().clone()
    }

    pub fn address(&self) -> Option<Address> {
        self.active.borrow().as_ref().map(Signer::address)
    }

    /// Ask the wallet for account access, move it onto the target chain and
    /// bind the first account.
    pub async fn connect(&self) -> Result<Signer<P>, WalletError> {
        let provider = self.provider.as_ref().ok_or(WalletError::NotInstalled)?;

        let accounts: Vec<String> = request_as(provider, "eth_requestAccounts", json!([])).await?;
        let first = accounts.first().ok_or(WalletError::NoAccounts)?;
        let address = parse_account(first)?;

        self.switch_network(provider).await?;

        let signer = Signer::new(address, provider.clone());
        *self.active.borrow_mut() = Some(signer.clone());
        info!(%address, chain_id = self.network.chain_id, "wallet connected");
        Ok(signer)
    }

    async fn switch_network(&self, provider: &P) -> Result<(), WalletError> {
        let switch = self.network.switch_chain_params();
        match provider
            .request("wallet_switchEthereumChain", switch.clone())
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if err.code() == Some(UNRECOGNIZED_CHAIN) => {
                info!(chain_id = self.network.chain_id, "chain unknown to wallet, adding it");
                provider
                    .request("wallet_addEthereumChain", self.network.add_chain_params())
                    .await?;
                provider.request("wallet_switchEthereumChain", switch).await?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Non-interactive probe for an already authorized account. Never prompts;
    /// provider failures are logged and reported as no account.
    pub async fn check_existing(&self) -> Option<Signer<P>> {
        let provider = self.provider.as_ref()?;

        let accounts: Vec<String> = match request_as(provider, "eth_accounts", json!([])).await {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!("checking existing wallet authorization failed: {err}");
                return None;
            }
        };

        let address = match parse_account(accounts.first()?) {
            Ok(address) => address,
            Err(err) => {
                warn!("{err}");
                return None;
            }
        };

        let signer = Signer::new(address, provider.clone());
        *self.active.borrow_mut() = Some(signer.clone());
        debug!(%address, "found previously authorized account");
        Some(signer)
    }

    /// Forget the local binding. The wallet itself stays authorized.
    pub fn disconnect(&self) {
        if let Some(signer) = self.active.borrow_mut().take() {
            info!(address = %signer.address(), "wallet disconnected");
        }
    }
}

fn parse_account(raw: &str) -> Result<Address, WalletError> {
    raw.parse::<Address>()
        .map_err(|_| WalletError::InvalidAccount(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lt_chain_client::mock::MockTransport;

    const ACCOUNT: &str = "0xabababababababababababababababababababab";

    fn service(transport: &MockTransport) -> WalletService<MockTransport> {
        WalletService::new(Some(transport.clone()), NetworkConfig::base_sepolia())
    }

    #[tokio::test]
    async fn connect_without_provider_is_not_installed() {
        let wallet: WalletService<MockTransport> =
            WalletService::new(None, NetworkConfig::base_sepolia());
        assert!(!wallet.is_installed());
        assert!(matches!(wallet.connect().await, Err(WalletError::NotInstalled)));
        assert!(wallet.active().is_none());
    }

    #[tokio::test]
    async fn connect_with_no_accounts_stops_before_switching() {
        let transport = MockTransport::new();
        transport.respond("eth_requestAccounts", json!([]));

        let err = service(&transport).connect().await.unwrap_err();
        assert!(matches!(err, WalletError::NoAccounts));
        assert_eq!(transport.methods(), vec!["eth_requestAccounts"]);
    }

    #[tokio::test]
    async fn connect_binds_the_first_account() {
        let transport = MockTransport::new();
        transport
            .respond(
                "eth_requestAccounts",
                json!([ACCOUNT, "0xcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcd"]),
            )
            .respond("wallet_switchEthereumChain", json!(null));

        let wallet = service(&transport);
        let signer = wallet.connect().await.unwrap();

        assert_eq!(signer.address(), Address::repeat_byte(0xab));
        assert_eq!(wallet.address(), Some(Address::repeat_byte(0xab)));
        assert_eq!(
            transport.calls_to("wallet_switchEthereumChain"),
            vec![json!([{ "chainId": "0x14a34" }])]
        );
    }

    #[tokio::test]
    async fn unknown_chain_is_added_then_switched_again() {
        let transport = MockTransport::new();
        transport
            .respond("eth_requestAccounts", json!([ACCOUNT]))
            .fail(
                "wallet_switchEthereumChain",
                RpcError::rpc(UNRECOGNIZED_CHAIN, "Unrecognized chain ID \"0x14a34\"."),
            )
            .respond("wallet_addEthereumChain", json!(null))
            .respond("wallet_switchEthereumChain", json!(null));

        let network = NetworkConfig::base_sepolia();
        service(&transport).connect().await.unwrap();

        assert_eq!(
            transport.methods(),
            vec![
                "eth_requestAccounts",
                "wallet_switchEthereumChain",
                "wallet_addEthereumChain",
                "wallet_switchEthereumChain",
            ]
        );
        assert_eq!(
            transport.calls_to("wallet_addEthereumChain"),
            vec![network.add_chain_params()]
        );
    }

    #[tokio::test]
    async fn other_switch_failures_propagate() {
        let transport = MockTransport::new();
        transport
            .respond("eth_requestAccounts", json!([ACCOUNT]))
            .fail(
                "wallet_switchEthereumChain",
                RpcError::rpc(4001, "User rejected the request."),
            );

        let wallet = service(&transport);
        let err = wallet.connect().await.unwrap_err();
        assert!(matches!(err, WalletError::Provider(ref e) if e.code() == Some(4001)));
        assert!(transport.calls_to("wallet_addEthereumChain").is_empty());
        assert!(wallet.active().is_none());
    }

    #[tokio::test]
    async fn check_existing_never_prompts() {
        let transport = MockTransport::new();
        transport.respond("eth_accounts", json!([ACCOUNT]));

        let wallet = service(&transport);
        let signer = wallet.check_existing().await.unwrap();
        assert_eq!(signer.address(), Address::repeat_byte(0xab));
        assert_eq!(transport.methods(), vec!["eth_accounts"]);
    }

    #[tokio::test]
    async fn check_existing_reports_nothing_on_failure_or_empty() {
        let transport = MockTransport::new();
        transport
            .respond("eth_accounts", json!([]))
            .fail("eth_accounts", RpcError::Transport("extension crashed".to_owned()))
            .respond("eth_accounts", json!(["not-an-address"]));

        let wallet = service(&transport);
        assert!(wallet.check_existing().await.is_none());
        assert!(wallet.check_existing().await.is_none());
        assert!(wallet.check_existing().await.is_none());

        let missing: WalletService<MockTransport> =
            WalletService::new(None, NetworkConfig::base_sepolia());
        assert!(missing.check_existing().await.is_none());
    }

    #[tokio::test]
    async fn disconnect_clears_only_local_state() {
        let transport = MockTransport::new();
        transport.respond("eth_accounts", json!([ACCOUNT]));

        let wallet = service(&transport);
        wallet.check_existing().await.unwrap();
        wallet.disconnect();

        assert!(wallet.active().is_none());
        assert_eq!(transport.methods(), vec!["eth_accounts"]);
    }
}
