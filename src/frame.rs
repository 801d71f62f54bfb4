use crate::constants::TILE_INDEX_ATTR;
use crate::dom;
use crate::input::VelocityTracker;
use crate::render::Renderer;
use dome_core::{DomeGallery, PointerKind, TapSource};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Everything one mounted dome shares between its listeners and the frame loop.
///
/// Borrows are kept short: no `RefCell` is held across a call back into JS.
pub struct FrameContext {
    pub gallery: RefCell<DomeGallery>,
    pub renderer: RefCell<Renderer>,
    pub tracker: RefCell<VelocityTracker>,
    pub last_pointer_kind: Cell<PointerKind>,
    /// Set by input handlers; the next frame re-renders.
    pub dirty: Cell<bool>,
    pub layout_dirty: Cell<bool>,
    /// Filled by the gallery's select callback, drained after borrows end.
    pub pending_select: Rc<RefCell<Option<String>>>,
    pub on_select: Option<js_sys::Function>,
}

impl FrameContext {
    pub fn frame(&self) {
        if self.layout_dirty.replace(false) {
            let gallery = self.gallery.borrow();
            if let Err(e) = self.renderer.borrow_mut().build_tiles(gallery.slots()) {
                log::warn!("[dom] tiles not rebuilt: {:?}", e);
            }
            self.dirty.set(true);
        }
        let changed = self.gallery.borrow_mut().tick(Instant::now());
        if changed || self.dirty.replace(false) {
            let view = self.gallery.borrow().view();
            self.renderer.borrow_mut().apply(&view);
        }
    }

    /// Measure the container and frame, refit the dome.
    pub fn resize(&self) {
        let (size, frame) = {
            let r = self.renderer.borrow();
            let root = dom::client_rect(&r.root);
            let frame = dom::rect_within(&r.frame, &r.viewer);
            (root, Some(frame).filter(|f| !f.is_empty()))
        };
        let overlay_size = {
            let gallery = self.gallery.borrow();
            let config = gallery.config();
            dom::window_document().map(|doc| {
                dom::measure_overlay_size(
                    &doc,
                    config.opened_image_width.as_deref(),
                    config.opened_image_height.as_deref(),
                )
            })
        };
        let mut gallery = self.gallery.borrow_mut();
        if let Some(size) = overlay_size {
            gallery.set_overlay_size(size);
        }
        gallery.resize(size.width, size.height, frame);
        self.dirty.set(true);
    }

    /// Route a tap on (or inside) a tile element to the gallery.
    pub fn tap(&self, target: Option<web::EventTarget>, source: TapSource) {
        let Some(el) = target.and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        let Ok(Some(item)) = el.closest(&format!("[{}]", TILE_INDEX_ATTR)) else {
            return;
        };
        let Some(index) = item
            .get_attribute(TILE_INDEX_ATTR)
            .and_then(|s| s.parse::<usize>().ok())
        else {
            return;
        };
        let (tile_rect, frame_rect) = {
            let r = self.renderer.borrow();
            let tile = item
                .first_element_child()
                .map(|image| dom::rect_within(&image, &r.viewer))
                .filter(|rect| !rect.is_empty());
            let frame = Some(dom::rect_within(&r.frame, &r.viewer)).filter(|f| !f.is_empty());
            (tile, frame)
        };
        let opened =
            self.gallery
                .borrow_mut()
                .tap_tile(index, source, tile_rect, frame_rect, Instant::now());
        if opened {
            self.dirty.set(true);
        }
    }

    /// The overlay's "Open" action.
    pub fn select(&self) {
        self.gallery.borrow_mut().select_current();
        let picked = self.pending_select.borrow_mut().take();
        if let (Some(src), Some(cb)) = (picked, self.on_select.as_ref()) {
            _ = cb.call1(&JsValue::NULL, &JsValue::from_str(&src));
        }
    }
}

/// Handle to a running `requestAnimationFrame` loop.
pub struct FrameLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn stop(&self) {
        if let (Some(id), Some(w)) = (self.handle.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Dropping the closure breaks the self-reference cycle.
        self.tick.borrow_mut().take();
    }
}

fn request_frame(
    tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    handle: &Rc<Cell<Option<i32>>>,
) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone()))
    else {
        return;
    };
    if let Ok(id) = w.request_animation_frame(cb.unchecked_ref()) {
        handle.set(Some(id));
    }
}

pub fn start_loop(ctx: Rc<FrameContext>) -> FrameLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let handle_clone = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        handle_clone.set(None);
        ctx.frame();
        request_frame(&tick_clone, &handle_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &handle);
    FrameLoop { tick, handle }
}
