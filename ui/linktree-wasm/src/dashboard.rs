//! Owner dashboard: wallet connection, link editor and profile search.

use crate::Context;
use crate::dom;
use crate::events::{delegate, target_with};
use crate::provider::InjectedProvider;
use alloy_primitives::Address;
use gloo_timers::future::TimeoutFuture;
use lt_session::Session;
use lt_session::view::{LinkForm, search, share_url};
use lt_wallet::format_address;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlInputElement};

const SEARCH_INPUT_ID: &str = "profileSearch";
const FORM_ERRORS_ID: &str = "formErrors";
const COPIED_FOR_MS: u32 = 2_000;

enum Notice {
    Success(String),
    Failure(String),
}

struct Dashboard {
    ctx: Rc<Context>,
    root: Element,
    form: RefCell<LinkForm>,
    notice: RefCell<Option<Notice>>,
    /// Account whose links are currently in the form.
    loaded_for: Cell<Option<Address>>,
    copied: Cell<bool>,
}

pub(crate) async fn mount(ctx: Rc<Context>, root: Element) -> Result<(), JsValue> {
    let dashboard = Rc::new(Dashboard {
        ctx: ctx.clone(),
        root,
        form: RefCell::new(LinkForm::default()),
        notice: RefCell::new(None),
        loaded_for: Cell::new(None),
        copied: Cell::new(false),
    });

    let weak = Rc::downgrade(&dashboard);
    ctx.set_listener(move || {
        if let Some(dashboard) = weak.upgrade() {
            dashboard.render();
        }
    });

    bind_actions(&dashboard)?;
    dashboard.render();
    ctx.initialize().await;
    Ok(())
}

fn bind_actions(dashboard: &Rc<Dashboard>) -> Result<(), JsValue> {
    let d = dashboard.clone();
    delegate(&dashboard.root, "click", move |event| {
        let Some(target) = target_with(&event, "data-action") else {
            return;
        };
        let action = target.get_attribute("data-action").unwrap_or_default();
        let index = target
            .get_attribute("data-index")
            .and_then(|raw| raw.parse::<usize>().ok());
        d.on_action(&action, index);
    })?;

    let d = dashboard.clone();
    delegate(&dashboard.root, "input", move |event| {
        let Some(target) = target_with(&event, "data-field") else {
            return;
        };
        let Ok(input) = target.dyn_into::<HtmlInputElement>() else {
            return;
        };
        let index = input
            .get_attribute("data-index")
            .and_then(|raw| raw.parse::<usize>().ok());
        let Some(index) = index else {
            return;
        };

        let mut form = d.form.borrow_mut();
        match input.get_attribute("data-field").as_deref() {
            Some("title") => form.set_title(index, &input.value()),
            Some("url") => form.set_url(index, &input.value()),
            _ => return,
        }
        // Editing hides stale errors without re-rendering the inputs.
        if let Some(errors) = dom::by_id(FORM_ERRORS_ID) {
            dom::clear(&errors);
        }
    })?;

    Ok(())
}

impl Dashboard {
    fn on_action(self: &Rc<Self>, action: &str, index: Option<usize>) {
        match action {
            "connect" => {
                let ctx = self.ctx.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = ctx.connect().await {
                        gloo_console::error!("wallet connection failed:", err.to_string());
                    }
                });
            }
            "disconnect" => {
                self.form.borrow_mut().reset(Vec::new());
                self.loaded_for.set(None);
                self.ctx.disconnect();
            }
            "dismiss-error" => self.ctx.clear_error(),
            "dismiss-notice" => {
                self.notice.borrow_mut().take();
                self.render();
            }
            "add-row" => {
                self.form.borrow_mut().add_row();
                self.render();
            }
            "remove-row" => {
                if let Some(index) = index {
                    self.form.borrow_mut().remove_row(index);
                    self.render();
                }
            }
            "save" => self.save(),
            "clear" => self.clear(),
            "search" => self.search(),
            "copy-share" => self.copy_share(),
            _ => {}
        }
    }

    fn save(self: &Rc<Self>) {
        let submitted = self.form.borrow_mut().submit();
        let links = match submitted {
            Ok(links) => links,
            Err(_) => {
                self.render();
                return;
            }
        };

        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match this.ctx.save_links(&links).await {
                Ok(_) => {
                    this.set_notice(Notice::Success("Links saved successfully!".to_owned()));
                    this.reload_links().await;
                }
                Err(err) => {
                    gloo_console::error!("saving links failed:", err.to_string());
                    this.form.borrow_mut().set_errors(err.messages());
                    this.render();
                }
            }
        });
    }

    fn clear(self: &Rc<Self>) {
        let confirmed = dom::window()
            .and_then(|w| {
                w.confirm_with_message("Are you sure you want to delete all your links?")
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match this.ctx.clear_links().await {
                Ok(_) => {
                    this.form.borrow_mut().reset(Vec::new());
                    this.set_notice(Notice::Success("All links cleared".to_owned()));
                }
                Err(err) => {
                    gloo_console::error!("clearing links failed:", err.to_string());
                    this.set_notice(Notice::Failure(err.to_string()));
                }
            }
        });
    }

    fn search(self: &Rc<Self>) {
        let input = dom::by_id_typed::<HtmlInputElement>(SEARCH_INPUT_ID)
            .map(|input| input.value())
            .unwrap_or_default();
        match search(&input) {
            Ok(route) => {
                if let Err(err) = dom::navigate(&route.path()) {
                    gloo_console::error!("navigation failed:", err);
                }
            }
            Err(err) => self.set_notice(Notice::Failure(err.to_string())),
        }
    }

    fn copy_share(self: &Rc<Self>) {
        let Some(address) = self.ctx.address() else {
            return;
        };
        let url = share_url(&dom::origin(), &address.to_checksum(None));

        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = dom::copy_text(&url).await {
                gloo_console::error!("copying profile link failed:", err);
                this.set_notice(Notice::Failure("Could not copy the link".to_owned()));
                return;
            }
            this.copied.set(true);
            this.render();
            TimeoutFuture::new(COPIED_FOR_MS).await;
            this.copied.set(false);
            this.render();
        });
    }

    fn set_notice(self: &Rc<Self>, notice: Notice) {
        *self.notice.borrow_mut() = Some(notice);
        self.render();
    }

    async fn reload_links(self: &Rc<Self>) {
        match self.ctx.my_links().await {
            Ok(links) => self.form.borrow_mut().reset(links),
            Err(err) => gloo_console::warn!("reading saved links failed:", err.to_string()),
        }
        self.render();
    }

    /// Pull the owner's links once per connected account.
    fn sync_links(self: &Rc<Self>, session: &Session<InjectedProvider>) {
        let address = session.address();
        if address == self.loaded_for.get() {
            return;
        }
        self.loaded_for.set(address);
        if address.is_none() {
            return;
        }
        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            this.reload_links().await;
        });
    }

    fn render(self: &Rc<Self>) {
        let session = self.ctx.session();
        self.sync_links(&session);
        if let Err(err) = self.draw(&session) {
            gloo_console::error!("render failed:", err);
        }
    }

    fn draw(&self, session: &Session<InjectedProvider>) -> Result<(), JsValue> {
        dom::clear(&self.root);

        let header = dom::el("header", "header")?;
        dom::append(&header, &[&dom::text("h1", "title", "OnchainLinktree")?])?;
        header.append_child(&self.wallet_panel(session)?)?;
        self.root.append_child(&header)?;

        if let Some(message) = session.error() {
            let banner = dom::text("div", "banner error", message)?;
            banner.append_child(&dom::action_button("Dismiss", "dismiss-error", true)?)?;
            self.root.append_child(&banner)?;
        }

        if let Some(notice) = self.notice.borrow().as_ref() {
            let (class, message) = match notice {
                Notice::Success(message) => ("banner success", message),
                Notice::Failure(message) => ("banner error", message),
            };
            let banner = dom::text("div", class, message)?;
            banner.append_child(&dom::action_button("Dismiss", "dismiss-notice", true)?)?;
            self.root.append_child(&banner)?;
        }

        self.root.append_child(&self.search_panel()?)?;

        if let Some(address) = session.address() {
            self.root.append_child(&self.share_panel(address)?)?;
            self.root.append_child(&self.editor()?)?;
        }

        if self.ctx.is_writing() {
            self.root.append_child(&dom::text(
                "div",
                "modal",
                "Waiting for transaction confirmation...",
            )?)?;
        }

        Ok(())
    }

    fn wallet_panel(&self, session: &Session<InjectedProvider>) -> Result<Element, JsValue> {
        let panel = dom::el("div", "wallet")?;
        if !self.ctx.wallet_installed() {
            panel.append_child(&dom::text(
                "p",
                "hint",
                "Please install MetaMask or another Ethereum wallet to continue",
            )?)?;
            return Ok(panel);
        }

        match session {
            Session::Connected(connected) => {
                let address = connected.address.to_checksum(None);
                dom::append(
                    &panel,
                    &[
                        &dom::text("span", "address", &format_address(&address))?,
                        &dom::action_button("Disconnect", "disconnect", true)?,
                    ],
                )?;
            }
            Session::Connecting => {
                panel.append_child(&dom::action_button("Connecting...", "connect", false)?)?;
            }
            Session::Disconnected | Session::Errored { .. } => {
                panel.append_child(&dom::action_button("Connect Wallet", "connect", true)?)?;
            }
        }
        Ok(panel)
    }

    fn search_panel(&self) -> Result<Element, JsValue> {
        let panel = dom::el("section", "search")?;
        dom::append(
            &panel,
            &[
                &dom::input(SEARCH_INPUT_ID, "Search by wallet address (0x...)", "")?,
                &dom::action_button("View Profile", "search", true)?,
            ],
        )?;
        Ok(panel)
    }

    fn share_panel(&self, address: Address) -> Result<Element, JsValue> {
        let address = address.to_checksum(None);
        let url = share_url(&dom::origin(), &address);
        let copy_label = if self.copied.get() { "Copied!" } else { "Copy" };
        let panel = dom::el("section", "share")?;
        dom::append(
            &panel,
            &[
                &dom::text("span", "label", "Your public profile: ")?,
                &dom::link(&url, &url, true)?,
                &dom::action_button(copy_label, "copy-share", true)?,
            ],
        )?;
        Ok(panel)
    }

    fn editor(&self) -> Result<Element, JsValue> {
        let form = self.form.borrow();
        let writing = self.ctx.is_writing();
        let editor = dom::el("section", "editor")?;

        for (index, row) in form.rows().iter().enumerate() {
            let line = dom::el("div", "link-row")?;
            let title = dom::input("", "Link title", &row.title)?;
            title.set_attribute("data-field", "title")?;
            title.set_attribute("data-index", &index.to_string())?;
            let url = dom::input("", "https://...", &row.url)?;
            url.set_attribute("data-field", "url")?;
            url.set_attribute("data-index", &index.to_string())?;
            let remove = dom::action_button("Remove", "remove-row", !writing)?;
            remove.set_attribute("data-index", &index.to_string())?;
            dom::append(&line, &[&title, &url, &remove])?;
            editor.append_child(&line)?;
        }

        let errors = dom::el("ul", "errors")?;
        errors.set_id(FORM_ERRORS_ID);
        for message in form.errors() {
            errors.append_child(&dom::text("li", "", message)?)?;
        }
        if !form.errors().is_empty() {
            dom::add_class(&errors, "visible");
        }

        dom::append(
            &editor,
            &[
                &errors,
                &dom::text("p", "counter", &form.counter())?,
                &dom::action_button("Add Link", "add-row", form.can_add_row() && !writing)?,
                &dom::action_button("Save Links", "save", !writing)?,
                &dom::action_button("Clear All", "clear", !writing)?,
            ],
        )?;
        Ok(editor)
    }
}
