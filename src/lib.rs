#![cfg(target_arch = "wasm32")]
//! Web front end for the dome gallery.
//!
//! `mount` builds the DOM under a host element, wires input, and runs a
//! `requestAnimationFrame` loop that ticks the core [`DomeGallery`] and
//! renders its view. The returned [`DomeHandle`] feeds updates and unmounts.

use dome_core::{DomeConfig, DomeGallery, DomeImage, PointerKind};
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use frame::{FrameContext, FrameLoop};
use render::Renderer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("dome-gallery loaded");
    Ok(())
}

/// Parse a JS value through JSON; `undefined`/`null` yield the default.
fn from_js<T: DeserializeOwned + Default>(value: &JsValue, what: &str) -> anyhow::Result<T> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    let json: String = js_sys::JSON::stringify(value)
        .map_err(|e| anyhow::anyhow!("{} is not serialisable: {:?}", what, e))?
        .into();
    serde_json::from_str(&json).map_err(|e| anyhow::anyhow!("invalid {}: {}", what, e))
}

#[wasm_bindgen]
pub struct DomeHandle {
    ctx: Option<Rc<FrameContext>>,
    listeners: events::Listeners,
    frame_loop: Option<FrameLoop>,
}

#[wasm_bindgen]
impl DomeHandle {
    /// Replace the image pool; the lattice is rebuilt only if it changed.
    #[wasm_bindgen(js_name = setImages)]
    pub fn set_images(&self, images: JsValue) -> Result<(), JsValue> {
        let Some(ctx) = self.ctx.as_ref() else {
            return Ok(());
        };
        let images: Vec<DomeImage> =
            from_js(&images, "images").map_err(|e| JsValue::from_str(&e.to_string()))?;
        if ctx.gallery.borrow_mut().set_images(images) {
            ctx.layout_dirty.set(true);
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = setSegments)]
    pub fn set_segments(&self, segments: usize) -> Result<(), JsValue> {
        let Some(ctx) = self.ctx.as_ref() else {
            return Ok(());
        };
        let rebuilt = ctx
            .gallery
            .borrow_mut()
            .set_segments(segments)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        if rebuilt {
            ctx.layout_dirty.set(true);
        }
        Ok(())
    }

    /// Unmount: stop the loop, remove listeners and nodes, release locks.
    pub fn destroy(&mut self) {
        self.teardown();
    }
}

impl DomeHandle {
    fn teardown(&mut self) {
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.stop();
        }
        self.listeners.clear();
        if let Some(ctx) = self.ctx.take() {
            ctx.gallery.borrow_mut().teardown();
            ctx.renderer.borrow_mut().unmount();
            log::info!("[gallery] unmounted");
        }
    }
}

/// Freeing the handle from JS without `destroy` still unmounts.
impl Drop for DomeHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Mount a dome gallery inside `root`.
///
/// `images` is an array of source strings or `{ src, alt }` objects;
/// `options` uses the camelCase option names; `on_select` receives the
/// source of the image whose "Open" action was chosen.
#[wasm_bindgen]
pub fn mount(
    root: web::HtmlElement,
    images: JsValue,
    options: JsValue,
    on_select: Option<js_sys::Function>,
) -> Result<DomeHandle, JsValue> {
    mount_inner(root, &images, &options, on_select).map_err(|e| {
        log::error!("[gallery] mount failed: {:?}", e);
        JsValue::from_str(&e.to_string())
    })
}

fn mount_inner(
    root: web::HtmlElement,
    images: &JsValue,
    options: &JsValue,
    on_select: Option<js_sys::Function>,
) -> anyhow::Result<DomeHandle> {
    let document = root
        .owner_document()
        .ok_or_else(|| anyhow::anyhow!("root element is not in a document"))?;
    let images: Vec<DomeImage> = from_js(images, "images")?;
    let config: DomeConfig = from_js(options, "options")?;

    let pending_select: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let mut gallery = DomeGallery::new(images, config)?;
    let pending = pending_select.clone();
    gallery.set_on_select(move |src| {
        *pending.borrow_mut() = Some(src.to_string());
    });

    // The overlay's button reaches the context through a weak link set below.
    let link: Rc<RefCell<Weak<FrameContext>>> = Rc::new(RefCell::new(Weak::new()));
    let link_open = link.clone();
    let on_open: Rc<dyn Fn()> = Rc::new(move || {
        let ctx = link_open.borrow().upgrade();
        if let Some(ctx) = ctx {
            ctx.select();
        }
    });
    let mut renderer = Renderer::mount(document, root, on_open)?;
    renderer.build_tiles(gallery.slots())?;

    let ctx = Rc::new(FrameContext {
        gallery: RefCell::new(gallery),
        renderer: RefCell::new(renderer),
        tracker: RefCell::new(input::VelocityTracker::default()),
        last_pointer_kind: Cell::new(PointerKind::Mouse),
        dirty: Cell::new(true),
        layout_dirty: Cell::new(false),
        pending_select,
        on_select,
    });
    *link.borrow_mut() = Rc::downgrade(&ctx);

    ctx.resize();
    let listeners = events::wire_all(&ctx);
    let frame_loop = frame::start_loop(ctx.clone());
    log::info!(
        "[gallery] mounted with {} tiles",
        ctx.gallery.borrow().slots().len()
    );
    Ok(DomeHandle {
        ctx: Some(ctx),
        listeners,
        frame_loop: Some(frame_loop),
    })
}
