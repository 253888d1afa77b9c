//! Wallet and page lifecycle events.

use crate::Context;
use crate::dom;
use crate::provider::InjectedProvider;
use lt_session::{EventOutcome, WalletEvent};
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn forward(ctx: &Weak<Context>, event: WalletEvent) {
    let Some(ctx) = ctx.upgrade() else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        if ctx.handle_event(event).await == EventOutcome::Reload {
            dom::reload();
        }
    });
}

/// Forward `accountsChanged`/`chainChanged` into the session.
pub(crate) fn bind_wallet_events(provider: &InjectedProvider, ctx: &Rc<Context>) {
    let weak = Rc::downgrade(ctx);
    provider.on("accountsChanged", move |accounts: JsValue| {
        let accounts: Vec<String> = serde_wasm_bindgen::from_value(accounts).unwrap_or_default();
        forward(&weak, WalletEvent::AccountsChanged(accounts));
    });

    let weak = Rc::downgrade(ctx);
    provider.on("chainChanged", move |chain_id: JsValue| {
        let chain_id = chain_id.as_string().unwrap_or_default();
        forward(&weak, WalletEvent::ChainChanged(chain_id));
    });
}

/// Drop the session when the page goes away.
pub(crate) fn bind_teardown(ctx: &Rc<Context>) -> Result<(), JsValue> {
    let ctx = ctx.clone();
    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        ctx.teardown();
    }) as Box<dyn FnMut(_)>);
    dom::window()?.add_event_listener_with_callback("pagehide", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Attach a delegated handler for `event` on `target`.
pub(crate) fn delegate(
    target: &web_sys::Element,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), JsValue> {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// The closest element carrying `attr` at or above the event target.
pub(crate) fn target_with(event: &web_sys::Event, attr: &str) -> Option<web_sys::Element> {
    let target: web_sys::Element = event.target()?.dyn_into().ok()?;
    target.closest(&format!("[{attr}]")).ok()?
}
