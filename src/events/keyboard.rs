use super::Listeners;
use crate::frame::FrameContext;
use instant::Instant;
use std::rc::Rc;
use web_sys as web;

/// Escape closes the overlay (subject to the open dwell).
pub fn wire_keydown(ctx: &Rc<FrameContext>, listeners: &mut Listeners) {
    let Some(window) = web::window() else {
        return;
    };
    let c = ctx.clone();
    listeners.add(&window, "keydown", move |ev: web::KeyboardEvent| {
        let key = ev.key();
        if c.gallery.borrow_mut().key_down(&key, Instant::now()) {
            c.dirty.set(true);
            ev.prevent_default();
        }
    });
}
