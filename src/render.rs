//! Applies a [`DomeView`] to the DOM.
//!
//! The tree is built once at mount; tiles are rebuilt only when the layout
//! changes. Every other frame only touches the sphere transform, the focused
//! tile and the overlay.

use crate::constants::{
    EDGE_FADE_BOTTOM_CLASS, EDGE_FADE_TOP_CLASS, ENLARGING_ATTR, ITEM_CLASS, ITEM_IMAGE_CLASS,
    MAIN_CLASS, OVERLAY_BLUR_CLASS, ROOT_CLASS, SCRIM_CLASS, SCROLL_LOCK_CLASS, SPHERE_CLASS,
    STAGE_CLASS, TILE_ARIA_FALLBACK, TILE_INDEX_ATTR, VIEWER_CLASS, FRAME_CLASS,
};
use crate::dom;
use crate::overlay::{self, OverlayNodes};
use dome_core::{DomeView, FocusedTile, StyleVars, TileSlot};
use std::rc::Rc;
use web_sys as web;

struct TileNodes {
    item: web::HtmlElement,
    image: web::HtmlElement,
}

pub struct Renderer {
    document: web::Document,
    pub root: web::HtmlElement,
    pub main: web::HtmlElement,
    pub sphere: web::HtmlElement,
    pub viewer: web::HtmlElement,
    pub scrim: web::HtmlElement,
    pub frame: web::HtmlElement,
    created: Vec<web::HtmlElement>,
    tiles: Vec<TileNodes>,
    overlay: Option<OverlayNodes>,
    focused: Option<usize>,
    style_vars: StyleVars,
    scroll_locked: bool,
    on_open: Rc<dyn Fn()>,
}

impl Renderer {
    /// Build the gallery tree inside `root`. `on_open` backs the overlay's
    /// "Open" button.
    pub fn mount(
        document: web::Document,
        root: web::HtmlElement,
        on_open: Rc<dyn Fn()>,
    ) -> anyhow::Result<Self> {
        dom::ensure_stylesheet(&document)?;
        _ = root.class_list().add_1(ROOT_CLASS);

        let main = dom::create_div(&document, MAIN_CLASS)?;
        let stage = dom::create_div(&document, STAGE_CLASS)?;
        let sphere = dom::create_div(&document, SPHERE_CLASS)?;
        dom::append(&stage, &sphere)?;
        dom::append(&main, &stage)?;
        for class in [OVERLAY_BLUR_CLASS, EDGE_FADE_TOP_CLASS, EDGE_FADE_BOTTOM_CLASS] {
            let layer = dom::create_div(&document, class)?;
            dom::append(&main, &layer)?;
        }
        let viewer = dom::create_div(&document, VIEWER_CLASS)?;
        let scrim = dom::create_div(&document, SCRIM_CLASS)?;
        let frame = dom::create_div(&document, FRAME_CLASS)?;
        dom::append(&viewer, &scrim)?;
        dom::append(&viewer, &frame)?;
        dom::append(&main, &viewer)?;
        dom::append(&root, &main)?;

        Ok(Self {
            document,
            created: vec![main.clone()],
            root,
            main,
            sphere,
            viewer,
            scrim,
            frame,
            tiles: Vec::new(),
            overlay: None,
            focused: None,
            style_vars: StyleVars::new(),
            scroll_locked: false,
            on_open,
        })
    }

    pub fn build_tiles(&mut self, slots: &[TileSlot]) -> anyhow::Result<()> {
        self.sphere.set_inner_html("");
        self.tiles.clear();
        self.focused = None;
        for (i, slot) in slots.iter().enumerate() {
            let item = dom::create_div(&self.document, ITEM_CLASS)?;
            _ = item.set_attribute(TILE_INDEX_ATTR, &i.to_string());
            _ = item.set_attribute("data-src", &slot.image.src);
            _ = item.set_attribute("data-offset-x", &slot.offset_x.to_string());
            _ = item.set_attribute("data-offset-y", &slot.offset_y.to_string());
            _ = item.set_attribute("data-size-x", &slot.size_x.to_string());
            _ = item.set_attribute("data-size-y", &slot.size_y.to_string());
            dom::set_style(&item, "--offset-x", &slot.offset_x.to_string());
            dom::set_style(&item, "--offset-y", &slot.offset_y.to_string());
            dom::set_style(&item, "--item-size-x", &slot.size_x.to_string());
            dom::set_style(&item, "--item-size-y", &slot.size_y.to_string());

            let image = dom::create_div(&self.document, ITEM_IMAGE_CLASS)?;
            _ = image.set_attribute("role", "button");
            _ = image.set_attribute("tabindex", "0");
            let label = if slot.image.alt.is_empty() {
                TILE_ARIA_FALLBACK
            } else {
                slot.image.alt.as_str()
            };
            _ = image.set_attribute("aria-label", label);
            if !slot.image.is_placeholder() {
                let img: web::HtmlImageElement = dom::create(&self.document, "img")?;
                img.set_src(&slot.image.src);
                img.set_alt(&slot.image.alt);
                img.set_draggable(false);
                dom::append(&image, &img)?;
            }
            dom::append(&item, &image)?;
            dom::append(&self.sphere, &item)?;
            self.tiles.push(TileNodes { item, image });
        }
        log::debug!("[dom] built {} tiles", self.tiles.len());
        Ok(())
    }

    pub fn apply(&mut self, view: &DomeView) {
        if view.style_vars != self.style_vars {
            for (name, value) in &view.style_vars {
                dom::set_style(&self.root, name, value);
            }
            self.style_vars = view.style_vars.clone();
        }
        dom::set_style(&self.sphere, "transform", &view.sphere_transform);

        if view.enlarging {
            _ = self.root.set_attribute(ENLARGING_ATTR, "true");
        } else {
            _ = self.root.remove_attribute(ENLARGING_ATTR);
        }
        if view.scroll_locked != self.scroll_locked {
            dom::set_scroll_lock(&self.document, SCROLL_LOCK_CLASS, view.scroll_locked);
            self.scroll_locked = view.scroll_locked;
        }

        self.apply_focus(view.focused);
        self.apply_overlay(view);
    }

    fn apply_focus(&mut self, focused: Option<FocusedTile>) {
        let index = focused.map(|f| f.index);
        if self.focused != index {
            if let Some(prev) = self.focused.and_then(|i| self.tiles.get(i)) {
                dom::set_style(&prev.item, "--rot-y-delta", "0deg");
                dom::set_style(&prev.item, "--rot-x-delta", "0deg");
                dom::clear_style(&prev.image, "visibility");
                dom::clear_style(&prev.image, "opacity");
            }
            self.focused = index;
        }
        let Some(f) = focused else {
            return;
        };
        let Some(tile) = self.tiles.get(f.index) else {
            return;
        };
        dom::set_style(&tile.item, "--rot-y-delta", &format!("{}deg", f.rotation_delta.y));
        dom::set_style(&tile.item, "--rot-x-delta", &format!("{}deg", f.rotation_delta.x));
        if f.hidden {
            dom::set_style(&tile.image, "visibility", "hidden");
        } else {
            dom::clear_style(&tile.image, "visibility");
        }
        match f.opacity {
            Some(o) => dom::set_style(&tile.image, "opacity", &format!("{}", o)),
            None => dom::clear_style(&tile.image, "opacity"),
        }
    }

    fn apply_overlay(&mut self, view: &DomeView) {
        let Some(ov) = view.overlay.as_ref() else {
            if let Some(old) = self.overlay.take() {
                old.remove();
            }
            return;
        };
        if let Some(nodes) = self.overlay.as_ref().filter(|n| n.matches(ov)) {
            nodes.apply(ov);
            return;
        }
        if let Some(old) = self.overlay.take() {
            old.remove();
        }
        let built = if ov.closing {
            overlay::build_closing(&self.document, &self.viewer, ov)
        } else {
            let on_open = self.on_open.clone();
            overlay::build(&self.document, &self.viewer, ov, move || on_open())
        };
        match built {
            Ok(nodes) => self.overlay = Some(nodes),
            Err(e) => log::warn!("[dom] overlay not created: {:?}", e),
        }
    }

    /// Remove everything the renderer created and release the scroll lock.
    pub fn unmount(&mut self) {
        if let Some(old) = self.overlay.take() {
            old.remove();
        }
        for el in self.created.drain(..) {
            el.remove();
        }
        self.tiles.clear();
        dom::set_scroll_lock(&self.document, SCROLL_LOCK_CLASS, false);
        self.scroll_locked = false;
        _ = self.root.remove_attribute(ENLARGING_ATTR);
        for (name, _) in &self.style_vars {
            dom::clear_style(&self.root, name);
        }
        _ = self.root.class_list().remove_1(ROOT_CLASS);
        dom::release_stylesheet(&self.document, ROOT_CLASS);
    }
}
