//! OnchainLinktree browser frontend.
//!
//! Binds the injected wallet as a transport, renders the owner dashboard or a
//! public profile depending on the path, and forwards wallet events into the
//! session context. Browser only.
#![cfg(target_arch = "wasm32")]

mod config;
mod dashboard;
mod dom;
mod events;
mod profile;
mod provider;
mod rpc;

use lt_session::SessionContext;
use lt_session::view::Route;
use provider::InjectedProvider;
use rpc::FetchTransport;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

pub(crate) type Context = SessionContext<InjectedProvider, FetchTransport>;

/// WASM entry point, called when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let config = config::app_config().map_err(|err| JsValue::from_str(&err.to_string()))?;
    let reader = FetchTransport::new(&config.network.rpc_url);
    let provider = InjectedProvider::detect();
    let ctx: Rc<Context> = Rc::new(SessionContext::new(config, provider.clone(), reader));

    let root = dom::by_id("app").ok_or_else(|| JsValue::from_str("missing #app"))?;
    if let Some(provider) = &provider {
        events::bind_wallet_events(provider, &ctx);
    }
    events::bind_teardown(&ctx)?;

    let path = dom::window()?.location().pathname()?;
    match Route::parse(&path) {
        Route::Dashboard => dashboard::mount(ctx, root).await,
        Route::Profile(address) => {
            // Account events on this page compare against the restored account.
            ctx.initialize().await;
            profile::mount(&ctx, &root, &address).await
        }
        Route::NotFound => {
            ctx.initialize().await;
            profile::render_not_found(&root)
        }
    }
}
