//! Public, read-only profile page.

use crate::Context;
use crate::dom;
use lt_session::view::{APP_NAME, ProfileView, Route};
use lt_wallet::format_address;
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub(crate) async fn mount(ctx: &Context, root: &Element, address: &str) -> Result<(), JsValue> {
    render(root, &ProfileView::Loading)?;
    let view = ctx.load_profile(address).await;
    if let ProfileView::Failed(message) = &view {
        gloo_console::warn!("profile load failed:", message.clone());
    }
    render(root, &view)
}

fn render(root: &Element, view: &ProfileView) -> Result<(), JsValue> {
    dom::clear(root);
    dom::set_title(&view.page_title());

    let page = dom::el("section", "profile")?;
    match view {
        ProfileView::Loading => {
            page.append_child(&dom::text("p", "loading", "Loading profile...")?)?;
        }
        ProfileView::Loaded(profile) => {
            page.append_child(&dom::text("h1", "address", &format_address(&profile.address))?)?;
            let list = dom::el("ul", "links")?;
            for link in &profile.links {
                let item = dom::el("li", "")?;
                item.append_child(&dom::link(&link.url, &link.title, true)?)?;
                list.append_child(&item)?;
            }
            page.append_child(&list)?;
        }
        ProfileView::InvalidAddress | ProfileView::NotFound | ProfileView::Failed(_) => {
            let message = view.error_message().unwrap_or_default();
            page.append_child(&dom::text("p", "error", message)?)?;
        }
    }

    page.append_child(&dom::link(
        &Route::Dashboard.path(),
        &format!("Create your own {APP_NAME}"),
        false,
    )?)?;
    root.append_child(&page)?;
    Ok(())
}

pub(crate) fn render_not_found(root: &Element) -> Result<(), JsValue> {
    dom::clear(root);
    dom::set_title(&format!("Not Found - {APP_NAME}"));
    dom::append(
        root,
        &[
            &dom::text("h1", "title", "Page not found")?,
            &dom::link(&Route::Dashboard.path(), "Back to home", false)?,
        ],
    )
}
