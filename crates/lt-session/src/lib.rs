//! Wallet session lifecycle and the view models built on top of it.
//!
//! [`SessionStore`] is the reducer-shaped state machine; [`SessionContext`]
//! is the process-scoped object the frontend holds (one per page) that issues
//! connect/save/clear commands and feeds wallet events into the store.

mod context;
mod store;
pub mod view;

pub use context::{CommandError, EventOutcome, SessionContext, WalletEvent};
pub use store::{ConnectedSession, Session, SessionAction, SessionStore, reduce};
