use crate::constants::{
    ACTION_BAR_CLASS, CAPTION_CLASS, ENLARGE_CLASS, ENLARGE_CLOSING_CLASS, OPEN_BUTTON_CLASS,
    OPEN_BUTTON_LABEL,
};
use crate::dom;
use dome_core::OverlayView;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// DOM nodes backing the live overlay or its closing clone.
pub struct OverlayNodes {
    pub el: web::HtmlElement,
    pub closing: bool,
    tile: usize,
    // Kept alive for as long as the button exists.
    _on_open: Option<Closure<dyn FnMut(web::Event)>>,
}

impl OverlayNodes {
    #[inline]
    pub fn matches(&self, view: &OverlayView) -> bool {
        self.closing == view.closing && self.tile == view.tile
    }

    pub fn apply(&self, view: &OverlayView) {
        dom::set_rect_style(&self.el, &view.rect);
        dom::set_style(&self.el, "transform", &view.transform.css());
        dom::set_style(&self.el, "opacity", &format!("{}", view.opacity));
    }

    pub fn remove(self) {
        self.el.remove();
    }
}

fn image(document: &web::Document, src: &str) -> anyhow::Result<web::HtmlImageElement> {
    let img: web::HtmlImageElement = dom::create(document, "img")?;
    img.set_src(src);
    img.set_draggable(false);
    Ok(img)
}

/// The interactive overlay: image plus caption and an "Open" action.
pub fn build(
    document: &web::Document,
    parent: &web::Node,
    view: &OverlayView,
    mut on_open: impl FnMut() + 'static,
) -> anyhow::Result<OverlayNodes> {
    let el = dom::create_div(document, ENLARGE_CLASS)?;
    let img = image(document, &view.src)?;
    dom::append(&el, &img)?;

    let bar = dom::create_div(document, ACTION_BAR_CLASS)?;
    let caption = dom::create_div(document, CAPTION_CLASS)?;
    caption.set_text_content(Some(&view.caption));
    let button: web::HtmlButtonElement = dom::create(document, "button")?;
    button.set_type("button");
    button.set_class_name(OPEN_BUTTON_CLASS);
    button.set_text_content(Some(OPEN_BUTTON_LABEL));
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.stop_propagation();
        on_open();
    }) as Box<dyn FnMut(_)>);
    _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    dom::append(&bar, &caption)?;
    dom::append(&bar, &button)?;
    dom::append(&el, &bar)?;

    let nodes = OverlayNodes {
        el,
        closing: false,
        tile: view.tile,
        _on_open: Some(closure),
    };
    nodes.apply(view);
    dom::append(parent, &nodes.el)?;
    Ok(nodes)
}

/// The non-interactive copy that shrinks back onto the tile.
pub fn build_closing(
    document: &web::Document,
    parent: &web::Node,
    view: &OverlayView,
) -> anyhow::Result<OverlayNodes> {
    let el = dom::create_div(document, ENLARGE_CLOSING_CLASS)?;
    let img = image(document, &view.src)?;
    dom::append(&el, &img)?;
    let nodes = OverlayNodes {
        el,
        closing: true,
        tile: view.tile,
        _on_open: None,
    };
    nodes.apply(view);
    dom::append(parent, &nodes.el)?;
    Ok(nodes)
}
