//! `window.ethereum` as a [`Transport`].

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use lt_chain_client::{RpcError, Transport};
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    type Eip1193;

    #[wasm_bindgen(method, catch)]
    fn request(this: &Eip1193, args: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &Eip1193, event: &str, handler: &js_sys::Function);
}

#[derive(Debug, Clone)]
pub(crate) struct InjectedProvider {
    inner: Eip1193,
}

impl InjectedProvider {
    /// The wallet extension's provider, if one was injected.
    pub(crate) fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Self {
            inner: ethereum.unchecked_into(),
        })
    }

    /// Subscribe to a provider event for the rest of the page's life.
    pub(crate) fn on(&self, event: &str, handler: impl FnMut(JsValue) + 'static) {
        let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
        self.inner.on(event, cb.as_ref().unchecked_ref());
        cb.forget();
    }
}

fn to_js(value: &Value) -> Result<JsValue, RpcError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| RpcError::Transport(err.to_string()))
}

/// Wallet errors are plain objects carrying `code`, `message` and sometimes
/// `data`. Anything else is a transport failure.
fn rpc_error(err: JsValue) -> RpcError {
    let field = |name: &str| js_sys::Reflect::get(&err, &JsValue::from_str(name)).ok();

    let message = field("message")
        .and_then(|value| value.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    let data = field("data")
        .filter(|value| !value.is_undefined() && !value.is_null())
        .and_then(|value| serde_wasm_bindgen::from_value::<Value>(value).ok());

    match field("code").and_then(|value| value.as_f64()) {
        Some(code) => RpcError::Rpc {
            code: code as i64,
            message,
            data,
        },
        None => RpcError::Transport(message),
    }
}

#[async_trait(?Send)]
impl Transport for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let args = to_js(&json!({ "method": method, "params": params }))?;
        let promise = self.inner.request(&args).map_err(rpc_error)?;
        let result = JsFuture::from(promise).await.map_err(rpc_error)?;
        serde_wasm_bindgen::from_value(result).map_err(|err| RpcError::InvalidResponse {
            method: method.to_owned(),
            reason: err.to_string(),
        })
    }

    async fn sleep(&self, duration: Duration) {
        TimeoutFuture::new(duration.as_millis().min(u32::MAX as u128) as u32).await
    }
}
