//! Typed facade over the link registry contract.
//!
//! A [`LinkRegistry`] bound to any [`Transport`] can read. Write operations
//! only exist on `LinkRegistry<Signer<P>>`, i.e. when the facade is bound to
//! an authorized wallet account.

pub mod bindings;
mod error;
mod pending;
mod signer;
#[cfg(any(test, feature = "mock"))]
pub mod testing;

use alloy_primitives::{Address, U256, hex};
use alloy_sol_types::SolCall;
use bindings::ILinkRegistry;
use lt_api_types::{Link, Profile};
use lt_chain_client::{Transport, request_as};
use serde_json::json;
use tracing::debug;

pub use error::{ContractError, RevertReason};
pub use pending::{DEFAULT_POLL_INTERVAL, PendingTransaction, TxReceipt};
pub use signer::Signer;

/// Limits the deployed contract enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractInfo {
    pub max_links: u64,
    pub max_title_length: u64,
    pub max_url_length: u64,
}

#[derive(Debug, Clone)]
pub struct LinkRegistry<T> {
    address: Address,
    transport: T,
}

impl<T> LinkRegistry<T> {
    pub fn new(address: Address, transport: T) -> Self {
        Self { address, transport }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> LinkRegistry<T> {
    async fn call<C: SolCall>(&self, call: C) -> Result<C::Return, ContractError> {
        debug!(contract = %self.address, function = C::SIGNATURE, "eth_call");
        let params = json!([
            {
                "to": self.address.to_string(),
                "data": hex::encode_prefixed(call.abi_encode()),
            },
            "latest"
        ]);

        let raw: String = request_as(&self.transport, "eth_call", params).await?;
        let bytes = hex::decode(&raw).map_err(|err| ContractError::decode(C::SIGNATURE, err))?;
        C::abi_decode_returns(&bytes, true).map_err(|err| ContractError::decode(C::SIGNATURE, err))
    }

    pub async fn has_links(&self, user: Address) -> Result<bool, ContractError> {
        let ret = self.call(ILinkRegistry::hasLinksCall { user }).await?;
        Ok(ret.exists)
    }

    pub async fn get_links(&self, user: Address) -> Result<Vec<Link>, ContractError> {
        let ret = self.call(ILinkRegistry::getLinksCall { user }).await?;
        Ok(ret.links.into_iter().map(Link::from).collect())
    }

    pub async fn get_link_count(&self, user: Address) -> Result<u64, ContractError> {
        let ret = self.call(ILinkRegistry::getLinkCountCall { user }).await?;
        to_u64("getLinkCount", ret.count)
    }

    pub async fn get_link(&self, user: Address, index: u64) -> Result<Link, ContractError> {
        let ret = self
            .call(ILinkRegistry::getLinkCall {
                user,
                index: U256::from(index),
            })
            .await?;
        Ok(ret.link.into())
    }

    pub async fn get_contract_info(&self) -> Result<ContractInfo, ContractError> {
        let ret = self.call(ILinkRegistry::getContractInfoCall {}).await?;
        Ok(ContractInfo {
            max_links: to_u64("getContractInfo", ret.maxLinks)?,
            max_title_length: to_u64("getContractInfo", ret.maxTitleLength)?,
            max_url_length: to_u64("getContractInfo", ret.maxUrlLength)?,
        })
    }
}

impl<P: Transport + Clone> LinkRegistry<Signer<P>> {
    pub fn signer(&self) -> &Signer<P> {
        &self.transport
    }

    async fn send<C: SolCall>(&self, call: C) -> Result<PendingTransaction<Signer<P>>, ContractError> {
        let from = self.transport.address();
        debug!(contract = %self.address, %from, function = C::SIGNATURE, "eth_sendTransaction");
        let params = json!([{
            "from": from.to_string(),
            "to": self.address.to_string(),
            "data": hex::encode_prefixed(call.abi_encode()),
        }]);

        let value = self.transport.request("eth_sendTransaction", params).await?;
        let tx_hash = pending::parse_tx_hash(value)?;
        debug!(%tx_hash, function = C::SIGNATURE, "transaction submitted");
        Ok(PendingTransaction::new(tx_hash, self.transport.clone()))
    }

    /// Replace the caller's whole link list.
    pub async fn save_links(&self, links: &[Link]) -> Result<PendingTransaction<Signer<P>>, ContractError> {
        let links = links.iter().map(bindings::Link::from).collect();
        self.send(ILinkRegistry::saveLinksCall { links }).await
    }

    pub async fn add_link(&self, link: &Link) -> Result<PendingTransaction<Signer<P>>, ContractError> {
        self.send(ILinkRegistry::addLinkCall {
            title: link.title.clone(),
            url: link.url.clone(),
        })
        .await
    }

    pub async fn remove_link(&self, index: u64) -> Result<PendingTransaction<Signer<P>>, ContractError> {
        self.send(ILinkRegistry::removeLinkCall {
            index: U256::from(index),
        })
        .await
    }

    pub async fn update_link(
        &self,
        index: u64,
        link: &Link,
    ) -> Result<PendingTransaction<Signer<P>>, ContractError> {
        self.send(ILinkRegistry::updateLinkCall {
            index: U256::from(index),
            title: link.title.clone(),
            url: link.url.clone(),
        })
        .await
    }

    pub async fn clear_links(&self) -> Result<PendingTransaction<Signer<P>>, ContractError> {
        self.send(ILinkRegistry::clearLinksCall {}).await
    }
}

/// Public read path: `None` when the address never saved links.
pub async fn fetch_profile<T: Transport>(
    registry: &LinkRegistry<T>,
    address: Address,
) -> Result<Option<Profile>, ContractError> {
    if !registry.has_links(address).await? {
        return Ok(None);
    }

    let links = registry.get_links(address).await?;
    Ok(Some(Profile {
        address: address.to_checksum(None),
        links,
    }))
}

fn to_u64(context: &'static str, value: U256) -> Result<u64, ContractError> {
    u64::try_from(value).map_err(|err| ContractError::decode(context, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolCall;
    use lt_chain_client::RpcError;
    use lt_chain_client::mock::MockTransport;
    use serde_json::Value;

    const OWNER: Address = Address::repeat_byte(0xab);
    const CONTRACT: Address = Address::repeat_byte(0x57);

    fn read_only(transport: &MockTransport) -> LinkRegistry<MockTransport> {
        LinkRegistry::new(CONTRACT, transport.clone())
    }

    fn signing(transport: &MockTransport) -> LinkRegistry<Signer<MockTransport>> {
        LinkRegistry::new(CONTRACT, Signer::new(OWNER, transport.clone()))
    }

    fn sent_data(transport: &MockTransport) -> Vec<u8> {
        let params = transport.calls_to("eth_sendTransaction").pop().unwrap();
        hex::decode(params[0]["data"].as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn reads_decode_links() {
        let transport = MockTransport::new();
        let links = vec![
            Link::new("GitHub", "https://github.com/someone"),
            Link::new("Blog", "https://blog.example.org"),
        ];
        transport.respond("eth_call", testing::links_result(&links));

        let fetched = read_only(&transport).get_links(OWNER).await.unwrap();
        assert_eq!(fetched, links);

        let params = &transport.calls_to("eth_call")[0];
        assert_eq!(params[1], "latest");
        assert_eq!(params[0]["to"], CONTRACT.to_string());
        let data = hex::decode(params[0]["data"].as_str().unwrap()).unwrap();
        let decoded = ILinkRegistry::getLinksCall::abi_decode(&data, true).unwrap();
        assert_eq!(decoded.user, OWNER);
    }

    #[tokio::test]
    async fn reads_scalars() {
        let transport = MockTransport::new();
        transport
            .respond("eth_call", testing::bool_result(true))
            .respond("eth_call", testing::uint_result(3))
            .respond("eth_call", testing::link_result(&Link::new("Site", "https://example.com")))
            .respond("eth_call", testing::contract_info_result(50, 100, 500));

        let registry = read_only(&transport);
        assert!(registry.has_links(OWNER).await.unwrap());
        assert_eq!(registry.get_link_count(OWNER).await.unwrap(), 3);
        assert_eq!(
            registry.get_link(OWNER, 2).await.unwrap(),
            Link::new("Site", "https://example.com")
        );
        assert_eq!(
            registry.get_contract_info().await.unwrap(),
            ContractInfo {
                max_links: 50,
                max_title_length: 100,
                max_url_length: 500
            }
        );
    }

    #[tokio::test]
    async fn garbage_return_data_is_a_decode_error() {
        let transport = MockTransport::new();
        transport.respond("eth_call", Value::String("0x".to_owned()));
        let err = read_only(&transport).get_links(OWNER).await.unwrap_err();
        assert!(matches!(err, ContractError::Decode { .. }));
    }

    #[tokio::test]
    async fn fetch_profile_skips_get_links_for_empty_owners() {
        let transport = MockTransport::new();
        transport.respond("eth_call", testing::bool_result(false));

        let profile = fetch_profile(&read_only(&transport), OWNER).await.unwrap();
        assert!(profile.is_none());
        assert_eq!(transport.calls_to("eth_call").len(), 1);
    }

    #[tokio::test]
    async fn fetch_profile_returns_checksummed_owner() {
        let transport = MockTransport::new();
        let links = vec![Link::new("Site", "https://example.com")];
        transport
            .respond("eth_call", testing::bool_result(true))
            .respond("eth_call", testing::links_result(&links));

        let profile = fetch_profile(&read_only(&transport), OWNER)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.address, OWNER.to_checksum(None));
        assert_eq!(profile.links, links);
    }

    #[tokio::test]
    async fn save_links_sends_from_the_signer() {
        let transport = MockTransport::new();
        transport
            .respond("eth_sendTransaction", testing::tx_hash(1))
            .respond("eth_getTransactionReceipt", testing::receipt(1, true));

        let links = vec![Link::new("GitHub", "https://github.com/someone")];
        let pending = signing(&transport).save_links(&links).await.unwrap();
        let receipt = pending.confirm().await.unwrap();
        assert_eq!(receipt.block_number, 1);

        let params = transport.calls_to("eth_sendTransaction").pop().unwrap();
        assert_eq!(params[0]["from"], OWNER.to_string());
        assert_eq!(params[0]["to"], CONTRACT.to_string());

        let decoded = ILinkRegistry::saveLinksCall::abi_decode(&sent_data(&transport), true).unwrap();
        assert_eq!(decoded.links.len(), 1);
        assert_eq!(decoded.links[0].title, "GitHub");
    }

    #[tokio::test]
    async fn index_writes_encode_their_arguments() {
        let transport = MockTransport::new();
        transport.respond_always("eth_sendTransaction", testing::tx_hash(2));
        let registry = signing(&transport);

        let _pending = registry.remove_link(4).await.unwrap();
        let decoded = ILinkRegistry::removeLinkCall::abi_decode(&sent_data(&transport), true).unwrap();
        assert_eq!(decoded.index, U256::from(4));

        let _pending = registry
            .update_link(1, &Link::new("New", "https://new.example.com"))
            .await
            .unwrap();
        let decoded = ILinkRegistry::updateLinkCall::abi_decode(&sent_data(&transport), true).unwrap();
        assert_eq!(decoded.index, U256::from(1));
        assert_eq!(decoded.url, "https://new.example.com");

        let _pending = registry
            .add_link(&Link::new("Extra", "https://extra.example.com"))
            .await
            .unwrap();
        let decoded = ILinkRegistry::addLinkCall::abi_decode(&sent_data(&transport), true).unwrap();
        assert_eq!(decoded.title, "Extra");

        let _pending = registry.clear_links().await.unwrap();
        assert_eq!(
            sent_data(&transport),
            ILinkRegistry::clearLinksCall::SELECTOR.to_vec()
        );
    }

    #[tokio::test]
    async fn reverts_are_decoded_from_wallet_errors() {
        let transport = MockTransport::new();
        transport.fail(
            "eth_sendTransaction",
            testing::revert_error(RevertReason::TooManyLinks),
        );

        let err = signing(&transport).save_links(&[]).await.unwrap_err();
        assert!(matches!(err, ContractError::Revert(RevertReason::TooManyLinks)));
    }

    #[tokio::test]
    async fn wallet_rejections_pass_through() {
        let transport = MockTransport::new();
        transport.fail(
            "eth_sendTransaction",
            RpcError::rpc(4001, "MetaMask Tx Signature: User denied transaction signature."),
        );

        let err = signing(&transport).clear_links().await.unwrap_err();
        assert_eq!(err.rpc().and_then(RpcError::code), Some(4001));
    }
}
