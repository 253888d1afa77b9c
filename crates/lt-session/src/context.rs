use crate::store::{ConnectedSession, Session, SessionAction, SessionStore};
use crate::view::ProfileView;
use alloy_primitives::Address;
use lt_api_types::Link;
use lt_chain_client::{AppConfig, Transport};
use lt_contract::{ContractError, LinkRegistry, PendingTransaction, Signer, TxReceipt, fetch_profile};
use lt_validation::{sanitize, sanitize_link, validate};
use lt_wallet::{WalletError, WalletService, parse_address, parse_contract_error};
use std::cell::{Cell, RefCell};
use std::future::Future;
use tracing::{debug, error, info, warn};

pub const PROFILE_LOAD_FAILED: &str = "Failed to load profile. Please try again.";

/// Notifications the injected wallet emits on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    AccountsChanged(Vec<String>),
    ChainChanged(String),
}

/// What the frontend must do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Unchanged,
    Disconnected,
    Reconnected,
    /// The page must be reloaded from scratch.
    Reload,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{}", .0.join("\n"))]
    Invalid(Vec<String>),
    #[error("Please connect your wallet first")]
    NotConnected,
    #[error("Another transaction is still pending")]
    Busy,
    #[error("{message}")]
    Contract {
        message: &'static str,
        #[source]
        source: ContractError,
    },
}

impl CommandError {
    /// Lines to show next to the form.
    pub fn messages(&self) -> Vec<String> {
        match self {
            CommandError::Invalid(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }

    fn contract(function: &'static str, source: ContractError) -> Self {
        let message = parse_contract_error(&source);
        error!(function, error = %source, user_message = message, "contract call failed");
        CommandError::Contract { message, source }
    }
}

/// Clears the in-flight flag when the write finishes, whichever way.
struct WriteGuard<'a>(&'a Cell<bool>);

impl<'a> WriteGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self(flag))
    }
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Page-lifetime owner of the wallet session. Hold it in an `Rc` and pass it
/// to whatever renders or handles events.
///
/// `P` is the injected wallet provider, `R` the read-only RPC transport used
/// for public profile reads.
pub struct SessionContext<P, R> {
    config: AppConfig,
    wallet: WalletService<P>,
    reader: LinkRegistry<R>,
    store: RefCell<SessionStore<P>>,
    write_in_flight: Cell<bool>,
    listener: RefCell<Option<Box<dyn Fn()>>>,
}

impl<P, R> SessionContext<P, R>
where
    P: Transport + Clone,
    R: Transport,
{
    pub fn new(config: AppConfig, provider: Option<P>, reader: R) -> Self {
        let wallet = WalletService::new(provider, config.network.clone());
        let reader = LinkRegistry::new(config.contract_address, reader);
        Self {
            config,
            wallet,
            reader,
            store: RefCell::new(SessionStore::new()),
            write_in_flight: Cell::new(false),
            listener: RefCell::new(None),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn wallet_installed(&self) -> bool {
        self.wallet.is_installed()
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session<P> {
        self.store.borrow().state().clone()
    }

    pub fn address(&self) -> Option<Address> {
        self.store.borrow().state().address()
    }

    pub fn is_writing(&self) -> bool {
        self.write_in_flight.get()
    }

    /// Called after every state change, outside any internal borrow.
    pub fn set_listener(&self, listener: impl Fn() + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    fn notify(&self) {
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener();
        }
    }

    fn dispatch(&self, action: SessionAction<P>) {
        self.store.borrow_mut().dispatch(action);
        self.notify();
    }

    fn bind(&self, signer: Signer<P>) -> ConnectedSession<P> {
        ConnectedSession::bind(signer, self.config.contract_address)
    }

    /// Restore a previously authorized account without prompting.
    pub async fn initialize(&self) {
        self.dispatch(SessionAction::SetLoading(true));
        match self.wallet.check_existing().await {
            Some(signer) => {
                let session = self.bind(signer);
                self.dispatch(SessionAction::SetConnected(session));
            }
            None => self.dispatch(SessionAction::SetLoading(false)),
        }
    }

    pub async fn connect(&self) -> Result<Address, WalletError> {
        self.dispatch(SessionAction::SetLoading(true));
        match self.wallet.connect().await {
            Ok(signer) => {
                let session = self.bind(signer);
                let address = session.address;
                self.dispatch(SessionAction::SetConnected(session));
                Ok(address)
            }
            Err(err) => {
                error!("wallet connection failed: {err}");
                self.dispatch(SessionAction::SetError(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn disconnect(&self) {
        self.wallet.disconnect();
        self.dispatch(SessionAction::SetDisconnected);
    }

    pub fn clear_error(&self) {
        self.dispatch(SessionAction::ClearError);
    }

    pub async fn handle_event(&self, event: WalletEvent) -> EventOutcome {
        match event {
            WalletEvent::AccountsChanged(accounts) => {
                let Some(first) = accounts.first() else {
                    info!("wallet revoked every account");
                    self.disconnect();
                    return EventOutcome::Disconnected;
                };

                let account = parse_address(first);
                if account.is_some() && account == self.address() {
                    return EventOutcome::Unchanged;
                }

                debug!(account = %first, "active wallet account changed");
                // Failures are already in the session state.
                let _ = self.connect().await;
                EventOutcome::Reconnected
            }
            WalletEvent::ChainChanged(chain_id) => {
                info!(%chain_id, "wallet switched chain, reloading");
                EventOutcome::Reload
            }
        }
    }

    fn connected(&self) -> Result<ConnectedSession<P>, CommandError> {
        self.store
            .borrow()
            .state()
            .connected()
            .cloned()
            .ok_or(CommandError::NotConnected)
    }

    async fn write<F, Fut>(&self, function: &'static str, send: F) -> Result<TxReceipt, CommandError>
    where
        F: FnOnce(LinkRegistry<Signer<P>>) -> Fut,
        Fut: Future<Output = Result<PendingTransaction<Signer<P>>, ContractError>>,
    {
        let session = self.connected()?;
        let Some(guard) = WriteGuard::acquire(&self.write_in_flight) else {
            warn!(function, "write rejected, another one is pending");
            return Err(CommandError::Busy);
        };
        self.notify();

        let result = match send(session.contract).await {
            Ok(pending) => {
                info!(function, tx_hash = %pending.tx_hash(), "waiting for confirmation");
                pending.confirm().await
            }
            Err(err) => Err(err),
        };

        drop(guard);
        self.notify();

        let receipt = result.map_err(|err| CommandError::contract(function, err))?;
        info!(function, tx_hash = %receipt.tx_hash, block = receipt.block_number, "write confirmed");
        Ok(receipt)
    }

    /// Replace the owner's links. Invalid batches never leave the client.
    pub async fn save_links(&self, links: &[Link]) -> Result<TxReceipt, CommandError> {
        let links = sanitize(links);
        let errors = validate(&links);
        if !errors.is_empty() {
            return Err(CommandError::Invalid(errors));
        }
        self.write("saveLinks", move |contract| async move {
            contract.save_links(&links).await
        })
        .await
    }

    pub async fn add_link(&self, link: &Link) -> Result<TxReceipt, CommandError> {
        let link = checked(link)?;
        self.write("addLink", move |contract| async move {
            contract.add_link(&link).await
        })
        .await
    }

    pub async fn update_link(&self, index: u64, link: &Link) -> Result<TxReceipt, CommandError> {
        let link = checked(link)?;
        self.write("updateLink", move |contract| async move {
            contract.update_link(index, &link).await
        })
        .await
    }

    pub async fn remove_link(&self, index: u64) -> Result<TxReceipt, CommandError> {
        self.write("removeLink", move |contract| async move {
            contract.remove_link(index).await
        })
        .await
    }

    pub async fn clear_links(&self) -> Result<TxReceipt, CommandError> {
        self.write("clearLinks", |contract| async move {
            contract.clear_links().await
        })
        .await
    }

    /// The connected owner's current links, read through their wallet.
    pub async fn my_links(&self) -> Result<Vec<Link>, CommandError> {
        let session = self.connected()?;
        if !session
            .contract
            .has_links(session.address)
            .await
            .map_err(|err| CommandError::contract("hasLinks", err))?
        {
            return Ok(Vec::new());
        }
        session
            .contract
            .get_links(session.address)
            .await
            .map_err(|err| CommandError::contract("getLinks", err))
    }

    pub fn read_only_contract(&self) -> &LinkRegistry<R> {
        &self.reader
    }

    /// Public profile lookup. Needs no wallet.
    pub async fn load_profile(&self, address: &str) -> ProfileView {
        let Some(address) = parse_address(address.trim()) else {
            return ProfileView::InvalidAddress;
        };

        match fetch_profile(&self.reader, address).await {
            Ok(Some(profile)) => ProfileView::Loaded(profile),
            Ok(None) => ProfileView::NotFound,
            Err(err) => {
                warn!(%address, "loading profile failed: {err}");
                ProfileView::Failed(PROFILE_LOAD_FAILED.to_owned())
            }
        }
    }

    /// Drop the session and any listener. The context is inert afterwards
    /// until `initialize` or `connect` runs again.
    pub fn teardown(&self) {
        self.listener.borrow_mut().take();
        self.wallet.disconnect();
        self.store.borrow_mut().dispatch(SessionAction::SetDisconnected);
    }
}

fn checked(link: &Link) -> Result<Link, CommandError> {
    let link = sanitize_link(link);
    let errors = validate(std::slice::from_ref(&link));
    if errors.is_empty() {
        Ok(link)
    } else {
        Err(CommandError::Invalid(errors))
    }
}
