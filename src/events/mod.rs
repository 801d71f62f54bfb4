pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_keydown;
pub use pointer::wire_input_handlers;

use crate::frame::FrameContext;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Every listener a mounted dome installs, so unmount can remove them all.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<(web::EventTarget, &'static str, Closure<dyn FnMut(web::Event)>)>,
    observer: Option<(web::ResizeObserver, Closure<dyn FnMut(js_sys::Array)>)>,
}

impl Listeners {
    pub fn add<E, F>(&mut self, target: &web::EventTarget, kind: &'static str, mut f: F)
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                f(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        self.entries.push((target.clone(), kind, closure));
    }

    pub fn observe_resize(&mut self, el: &web::Element, mut f: impl FnMut() + 'static) {
        let closure = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
            f();
        }) as Box<dyn FnMut(js_sys::Array)>);
        match web::ResizeObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(el);
                self.observer = Some((observer, closure));
            }
            Err(e) => log::warn!("[dom] ResizeObserver unavailable: {:?}", e),
        }
    }

    pub fn clear(&mut self) {
        for (target, kind, closure) in self.entries.drain(..) {
            _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        if let Some((observer, _closure)) = self.observer.take() {
            observer.disconnect();
        }
    }
}

/// Wire every listener for one mounted dome.
pub fn wire_all(ctx: &Rc<FrameContext>) -> Listeners {
    let mut listeners = Listeners::default();
    wire_input_handlers(ctx, &mut listeners);
    wire_keydown(ctx, &mut listeners);

    let root: web::Element = ctx.renderer.borrow().root.clone().into();
    let resize_ctx = ctx.clone();
    listeners.observe_resize(&root, move || resize_ctx.resize());
    listeners
}
