use alloy_primitives::Address;
use lt_contract::{LinkRegistry, Signer};
use tracing::debug;

/// Everything a connected session carries. Built as a unit, so a session is
/// either fully bound or not bound at all.
#[derive(Debug, Clone)]
pub struct ConnectedSession<P> {
    pub address: Address,
    pub signer: Signer<P>,
    pub contract: LinkRegistry<Signer<P>>,
}

impl<P: Clone> ConnectedSession<P> {
    pub fn bind(signer: Signer<P>, contract_address: Address) -> Self {
        Self {
            address: signer.address(),
            contract: LinkRegistry::new(contract_address, signer.clone()),
            signer,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Session<P> {
    Disconnected,
    Connecting,
    Connected(ConnectedSession<P>),
    Errored { message: String },
}

impl<P> Default for Session<P> {
    fn default() -> Self {
        Session::Disconnected
    }
}

impl<P> Session<P> {
    pub fn is_connected(&self) -> bool {
        matches!(self, Session::Connected(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Session::Connecting)
    }

    pub fn address(&self) -> Option<Address> {
        match self {
            Session::Connected(session) => Some(session.address),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Session::Errored { message } => Some(message),
            _ => None,
        }
    }

    pub fn connected(&self) -> Option<&ConnectedSession<P>> {
        match self {
            Session::Connected(session) => Some(session),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Session::Disconnected => "disconnected",
            Session::Connecting => "connecting",
            Session::Connected(_) => "connected",
            Session::Errored { .. } => "errored",
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionAction<P> {
    SetLoading(bool),
    SetConnected(ConnectedSession<P>),
    SetDisconnected,
    SetError(String),
    ClearError,
}

/// Pure transition function. Loading always clears a displayed error.
pub fn reduce<P>(state: Session<P>, action: SessionAction<P>) -> Session<P> {
    match (state, action) {
        (_, SessionAction::SetLoading(true)) => Session::Connecting,
        (Session::Connected(session), SessionAction::SetLoading(false)) => {
            Session::Connected(session)
        }
        (_, SessionAction::SetLoading(false)) => Session::Disconnected,
        (_, SessionAction::SetConnected(session)) => Session::Connected(session),
        (_, SessionAction::SetDisconnected) => Session::Disconnected,
        (_, SessionAction::SetError(message)) => Session::Errored { message },
        (Session::Errored { .. }, SessionAction::ClearError) => Session::Disconnected,
        (state, SessionAction::ClearError) => state,
    }
}

#[derive(Debug)]
pub struct SessionStore<P> {
    state: Session<P>,
}

impl<P> Default for SessionStore<P> {
    fn default() -> Self {
        Self {
            state: Session::default(),
        }
    }
}

impl<P> SessionStore<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Session<P> {
        &self.state
    }

    pub fn dispatch(&mut self, action: SessionAction<P>) {
        let from = self.state.kind();
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        debug!(from, to = self.state.kind(), "session transition");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lt_chain_client::mock::MockTransport;

    type TestSession = Session<MockTransport>;

    fn connected() -> ConnectedSession<MockTransport> {
        ConnectedSession::bind(
            Signer::new(Address::repeat_byte(0xab), MockTransport::new()),
            Address::repeat_byte(0x57),
        )
    }

    fn every_state() -> Vec<TestSession> {
        vec![
            Session::Disconnected,
            Session::Connecting,
            Session::Connected(connected()),
            Session::Errored {
                message: "boom".to_owned(),
            },
        ]
    }

    #[test]
    fn starts_empty() {
        let store: SessionStore<MockTransport> = SessionStore::new();
        assert!(matches!(store.state(), Session::Disconnected));
        assert!(!store.state().is_connected());
        assert!(!store.state().is_loading());
        assert_eq!(store.state().address(), None);
    }

    #[test]
    fn loading_clears_errors_from_every_state() {
        for state in every_state() {
            let next = reduce(state, SessionAction::SetLoading(true));
            assert!(next.is_loading());
            assert_eq!(next.error(), None);
        }
    }

    #[test]
    fn loading_false_keeps_only_a_connection() {
        let kinds: Vec<&str> = every_state()
            .into_iter()
            .map(|state| reduce(state, SessionAction::SetLoading(false)).kind())
            .collect();
        assert_eq!(
            kinds,
            vec!["disconnected", "disconnected", "connected", "disconnected"]
        );
    }

    #[test]
    fn disconnect_resets_from_every_state() {
        for state in every_state() {
            let next = reduce(state, SessionAction::SetDisconnected);
            assert!(matches!(next, Session::Disconnected));
        }
    }

    #[test]
    fn connected_session_is_fully_bound() {
        let next = reduce(TestSession::Connecting, SessionAction::SetConnected(connected()));
        let session = next.connected().unwrap();
        assert_eq!(session.address, Address::repeat_byte(0xab));
        assert_eq!(session.signer.address(), session.address);
        assert_eq!(session.contract.signer().address(), session.address);
        assert_eq!(session.contract.address(), Address::repeat_byte(0x57));
        assert!(!next.is_loading());
        assert_eq!(next.error(), None);
    }

    #[test]
    fn errors_stop_loading_and_clear_back_to_empty() {
        let errored = reduce(
            TestSession::Connecting,
            SessionAction::SetError("No accounts found".to_owned()),
        );
        assert_eq!(errored.error(), Some("No accounts found"));
        assert!(!errored.is_loading());
        assert!(!errored.is_connected());

        let cleared = reduce(errored, SessionAction::ClearError);
        assert!(matches!(cleared, Session::Disconnected));
    }

    #[test]
    fn clear_error_leaves_other_states_alone() {
        let kinds: Vec<&str> = every_state()
            .into_iter()
            .map(|state| reduce(state, SessionAction::ClearError).kind())
            .collect();
        assert_eq!(
            kinds,
            vec!["disconnected", "connecting", "connected", "disconnected"]
        );
    }

    #[test]
    fn store_dispatch_applies_reduce() {
        let mut store: SessionStore<MockTransport> = SessionStore::new();
        store.dispatch(SessionAction::SetLoading(true));
        store.dispatch(SessionAction::SetConnected(connected()));
        assert_eq!(store.state().address(), Some(Address::repeat_byte(0xab)));
        store.dispatch(SessionAction::SetDisconnected);
        assert!(matches!(store.state(), Session::Disconnected));
    }
}
