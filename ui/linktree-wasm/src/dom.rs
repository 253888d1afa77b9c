//! DOM helpers. Pages are built from scratch on every render.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, Window};

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub(crate) fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub(crate) fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub(crate) fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub(crate) fn el(tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document()?.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

pub(crate) fn text(tag: &str, class: &str, content: &str) -> Result<Element, JsValue> {
    let el = el(tag, class)?;
    el.set_text_content(Some(content));
    Ok(el)
}

/// A button routed through the delegated click handler via `data-action`.
pub(crate) fn action_button(label: &str, action: &str, enabled: bool) -> Result<Element, JsValue> {
    let button = text("button", "btn", label)?;
    button.set_attribute("type", "button")?;
    button.set_attribute("data-action", action)?;
    if !enabled {
        button.set_attribute("disabled", "")?;
    }
    Ok(button)
}

pub(crate) fn input(id: &str, placeholder: &str, value: &str) -> Result<HtmlInputElement, JsValue> {
    let input: HtmlInputElement = el("input", "input")?.dyn_into()?;
    if !id.is_empty() {
        input.set_id(id);
    }
    input.set_placeholder(placeholder);
    input.set_value(value);
    Ok(input)
}

pub(crate) fn link(href: &str, label: &str, external: bool) -> Result<Element, JsValue> {
    let a = text("a", "link", label)?;
    a.set_attribute("href", href)?;
    if external {
        a.set_attribute("target", "_blank")?;
        a.set_attribute("rel", "noopener noreferrer")?;
    }
    Ok(a)
}

pub(crate) fn append(parent: &Element, children: &[&Element]) -> Result<(), JsValue> {
    for child in children {
        parent.append_child(child)?;
    }
    Ok(())
}

/// Write `text` to the system clipboard through `navigator.clipboard`.
pub(crate) async fn copy_text(text: &str) -> Result<(), JsValue> {
    let navigator = window()?.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    let write: js_sys::Function =
        js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
    let promise: js_sys::Promise = write.call1(&clipboard, &JsValue::from_str(text))?.dyn_into()?;
    wasm_bindgen_futures::JsFuture::from(promise).await?;
    Ok(())
}

pub(crate) fn clear(el: &Element) {
    el.set_inner_html("");
}

pub(crate) fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub(crate) fn set_title(title: &str) {
    if let Ok(doc) = document() {
        doc.set_title(title);
    }
}

pub(crate) fn navigate(path: &str) -> Result<(), JsValue> {
    window()?.location().set_href(path)
}

pub(crate) fn reload() {
    if let Ok(window) = window() {
        let _ = window.location().reload();
    }
}

pub(crate) fn origin() -> String {
    window()
        .and_then(|w| w.location().origin())
        .unwrap_or_default()
}
