use crate::constants::STYLESHEET_ID;
use dome_core::{OverlaySize, Rect};
use wasm_bindgen::JsCast;
use web_sys as web;

static DOME_CSS: &str = include_str!("dome.css");

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn create<T: JsCast>(document: &web::Document, tag: &str) -> anyhow::Result<T> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))?
        .dyn_into::<T>()
        .map_err(|_| anyhow::anyhow!("<{}> has unexpected type", tag))
}

pub fn create_div(document: &web::Document, class: &str) -> anyhow::Result<web::HtmlElement> {
    let el: web::HtmlElement = create(document, "div")?;
    el.set_class_name(class);
    Ok(el)
}

pub fn append(parent: &web::Node, child: &web::Node) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("append_child: {:?}", e))
}

#[inline]
pub fn set_style(el: &web::HtmlElement, prop: &str, value: &str) {
    _ = el.style().set_property(prop, value);
}

#[inline]
pub fn clear_style(el: &web::HtmlElement, prop: &str) {
    _ = el.style().remove_property(prop);
}

pub fn set_rect_style(el: &web::HtmlElement, rect: &Rect) {
    set_style(el, "left", &format!("{}px", rect.left));
    set_style(el, "top", &format!("{}px", rect.top));
    set_style(el, "width", &format!("{}px", rect.width));
    set_style(el, "height", &format!("{}px", rect.height));
}

#[inline]
pub fn client_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    )
}

/// `el`'s rect relative to `container`'s top-left corner.
#[inline]
pub fn rect_within(el: &web::Element, container: &web::Element) -> Rect {
    client_rect(el).relative_to(&client_rect(container))
}

/// Resolve CSS lengths to pixels by laying out a hidden probe element.
pub fn measure_overlay_size(
    document: &web::Document,
    width: Option<&str>,
    height: Option<&str>,
) -> OverlaySize {
    if width.is_none() && height.is_none() {
        return OverlaySize::default();
    }
    let (Some(body), Ok(probe)) = (document.body(), create_div(document, "")) else {
        log::warn!("[dom] cannot measure overlay size; using frame size");
        return OverlaySize::default();
    };
    set_style(&probe, "position", "absolute");
    set_style(&probe, "visibility", "hidden");
    if let Some(w) = width {
        set_style(&probe, "width", w);
    }
    if let Some(h) = height {
        set_style(&probe, "height", h);
    }
    if append(&body, &probe).is_err() {
        return OverlaySize::default();
    }
    let rect = client_rect(&probe);
    probe.remove();
    OverlaySize {
        width: width.map(|_| rect.width),
        height: height.map(|_| rect.height),
    }
}

/// Install the gallery stylesheet once per document.
pub fn ensure_stylesheet(document: &web::Document) -> anyhow::Result<()> {
    if document.get_element_by_id(STYLESHEET_ID).is_some() {
        return Ok(());
    }
    let style: web::HtmlStyleElement = create(document, "style")?;
    style.set_id(STYLESHEET_ID);
    style.set_text_content(Some(DOME_CSS));
    let head = document
        .head()
        .ok_or_else(|| anyhow::anyhow!("document has no <head>"))?;
    append(&head, &style)
}

/// Drop the stylesheet once no element carrying `root_class` is left.
pub fn release_stylesheet(document: &web::Document, root_class: &str) {
    if let Ok(Some(_)) = document.query_selector(&format!(".{}", root_class)) {
        return;
    }
    if let Some(style) = document.get_element_by_id(STYLESHEET_ID) {
        style.remove();
    }
}

pub fn set_scroll_lock(document: &web::Document, class: &str, locked: bool) {
    if let Some(body) = document.body() {
        let cl = body.class_list();
        _ = if locked {
            cl.add_1(class)
        } else {
            cl.remove_1(class)
        };
    }
}
