use super::Listeners;
use crate::frame::FrameContext;
use crate::input;
use dome_core::{PointerKind, TapSource};
use glam::Vec2;
use instant::Instant;
use std::rc::Rc;
use web_sys as web;

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

pub fn wire_input_handlers(ctx: &Rc<FrameContext>, listeners: &mut Listeners) {
    let (main, sphere, scrim) = {
        let r = ctx.renderer.borrow();
        (r.main.clone(), r.sphere.clone(), r.scrim.clone())
    };
    let Some(window) = web::window() else {
        log::warn!("[dom] no window; input not wired");
        return;
    };

    wire_pointerdown(ctx, listeners, &main);
    wire_pointermove(ctx, listeners, &window);
    wire_pointerup(ctx, listeners, &window);
    wire_pointercancel(ctx, listeners, &window);
    wire_taps(ctx, listeners, &sphere);

    let c = ctx.clone();
    listeners.add(&scrim, "click", move |_ev: web::MouseEvent| {
        if c.gallery.borrow_mut().click_scrim(Instant::now()) {
            c.dirty.set(true);
        }
    });
}

fn wire_pointerdown(ctx: &Rc<FrameContext>, listeners: &mut Listeners, main: &web::HtmlElement) {
    let c = ctx.clone();
    listeners.add(main, "pointerdown", move |ev: web::PointerEvent| {
        let kind = input::pointer_kind(&ev.pointer_type());
        c.last_pointer_kind.set(kind);
        if kind == PointerKind::Mouse && ev.button() != 0 {
            return;
        }
        let pos = client_pos(&ev);
        if !c.gallery.borrow_mut().pointer_down(pos) {
            return;
        }
        let mut tracker = c.tracker.borrow_mut();
        tracker.reset();
        tracker.push(pos, ev.time_stamp());
        c.dirty.set(true);
    });
}

fn wire_pointermove(ctx: &Rc<FrameContext>, listeners: &mut Listeners, window: &web::Window) {
    let c = ctx.clone();
    listeners.add(window, "pointermove", move |ev: web::PointerEvent| {
        if !c.gallery.borrow().is_dragging() {
            return;
        }
        let pos = client_pos(&ev);
        c.tracker.borrow_mut().push(pos, ev.time_stamp());
        if c.gallery.borrow_mut().pointer_move(pos) {
            c.dirty.set(true);
        }
    });
}

fn wire_pointerup(ctx: &Rc<FrameContext>, listeners: &mut Listeners, window: &web::Window) {
    let c = ctx.clone();
    listeners.add(window, "pointerup", move |ev: web::PointerEvent| {
        let kind = input::pointer_kind(&ev.pointer_type());
        c.last_pointer_kind.set(kind);
        if !c.gallery.borrow().is_dragging() {
            return;
        }
        let pos = client_pos(&ev);
        let velocity = c.tracker.borrow().velocity_at(ev.time_stamp());
        c.tracker.borrow_mut().reset();
        let release = c
            .gallery
            .borrow_mut()
            .pointer_up(pos, velocity, Instant::now());
        c.dirty.set(true);
        // A touch tap is only known to be a tap once the drag has ended.
        if !release.moved {
            c.tap(ev.target(), TapSource::PointerUp(kind));
        }
    });
}

fn wire_pointercancel(ctx: &Rc<FrameContext>, listeners: &mut Listeners, window: &web::Window) {
    let c = ctx.clone();
    listeners.add(window, "pointercancel", move |_ev: web::PointerEvent| {
        c.tracker.borrow_mut().reset();
        c.gallery.borrow_mut().pointer_cancel();
        c.dirty.set(true);
    });
}

fn wire_taps(ctx: &Rc<FrameContext>, listeners: &mut Listeners, sphere: &web::HtmlElement) {
    let c = ctx.clone();
    listeners.add(sphere, "click", move |ev: web::MouseEvent| {
        c.tap(ev.target(), TapSource::Click(c.last_pointer_kind.get()));
    });
    let c = ctx.clone();
    listeners.add(sphere, "touchend", move |ev: web::TouchEvent| {
        c.tap(ev.target(), TapSource::TouchEnd);
    });
}
