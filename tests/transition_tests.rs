// Host-side tests for the open/close transition state machine.

use dome_core::{
    rotation_delta, BaseRotation, CloseOutcome, CloseStage, ImageDescriptor, OpenRequest,
    OpenStage, OverlaySize, Rect, RotationState, TransitionController, TransitionPhase,
    TransitionTick,
};
use instant::Instant;
use std::time::Duration;

const DURATION: Duration = Duration::from_millis(300);
const FRAME: Rect = Rect::new(100.0, 50.0, 400.0, 400.0);
const TILE: Rect = Rect::new(20.0, 30.0, 80.0, 60.0);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn request(origin: Option<Rect>, size: OverlaySize) -> OpenRequest {
    OpenRequest {
        tile: 7,
        image: ImageDescriptor::new("/a.jpg", ""),
        base: BaseRotation {
            rotate_x: 2.0,
            rotate_y: 40.0,
        },
        dome: RotationState { x: 1.0, y: 10.0 },
        origin,
        frame: FRAME,
        size,
    }
}

fn rect_close(a: Rect, b: Rect) -> bool {
    (a.left - b.left).abs() < 1e-3
        && (a.top - b.top).abs() < 1e-3
        && (a.width - b.width).abs() < 1e-3
        && (a.height - b.height).abs() < 1e-3
}

fn opened(size: OverlaySize) -> (TransitionController, Instant) {
    let mut t = TransitionController::new(DURATION);
    let t0 = Instant::now();
    t.open(request(Some(TILE), size), t0);
    (t, t0)
}

#[test]
fn rotation_delta_faces_tile_to_viewer() {
    let base = BaseRotation {
        rotate_x: 2.0,
        rotate_y: 40.0,
    };
    let d = rotation_delta(base, RotationState { x: 1.0, y: 10.0 });
    assert!((d.y - -50.0).abs() < 1e-4);
    assert!((d.x - -3.0).abs() < 1e-4);

    // Past -180 the delta takes the short way round.
    let far = BaseRotation {
        rotate_x: 0.0,
        rotate_y: 200.0,
    };
    let d = rotation_delta(far, RotationState::default());
    assert!((d.y - 160.0).abs() < 1e-4);
}

#[test]
fn opening_starts_on_the_tile() {
    let (t, _) = opened(OverlaySize::default());
    assert_eq!(
        t.phase(),
        TransitionPhase::Opening {
            stage: OpenStage::Transform,
            progress: 0.0
        }
    );
    let ov = t.overlay().unwrap();
    assert_eq!(ov.rect, FRAME);
    assert!(rect_close(ov.visual_rect(), TILE));
    assert_eq!(ov.opacity, 0.0);
    assert!(!ov.closing);
    assert_eq!(ov.caption, "Selected image");

    let focused = t.focused().unwrap();
    assert_eq!(focused.index, 7);
    assert!(focused.hidden);
}

#[test]
fn opening_settles_at_the_frame() {
    let (mut t, _) = opened(OverlaySize::default());
    assert_eq!(t.tick(ms(150)), TransitionTick::Progressed);
    let mid = t.overlay().unwrap();
    assert!(mid.opacity > 0.0 && mid.opacity < 1.0);

    assert_eq!(t.tick(ms(150)), TransitionTick::Progressed);
    assert_eq!(t.phase(), TransitionPhase::Open);
    let ov = t.overlay().unwrap();
    assert_eq!(ov.rect, FRAME);
    assert_eq!(ov.opacity, 1.0);
    assert_eq!(ov.transform.css(), "translate(0px, 0px) scale(1, 1)");
    assert_eq!(t.tick(ms(16)), TransitionTick::Idle);
}

#[test]
fn custom_size_adds_a_centred_resize_stage() {
    let size = OverlaySize {
        width: Some(200.0),
        height: None,
    };
    let (mut t, _) = opened(size);
    t.tick(DURATION);
    assert!(matches!(
        t.phase(),
        TransitionPhase::Opening {
            stage: OpenStage::Resize,
            ..
        }
    ));
    t.tick(DURATION);
    assert_eq!(t.phase(), TransitionPhase::Open);
    assert_eq!(
        t.overlay().unwrap().rect,
        Rect::new(200.0, 50.0, 200.0, 400.0)
    );
}

#[test]
fn close_inside_dwell_is_ignored() {
    let (mut t, t0) = opened(OverlaySize::default());
    assert_eq!(t.close(t0 + ms(100)), CloseOutcome::TooSoon);
    assert!(matches!(t.phase(), TransitionPhase::Opening { .. }));
    assert_eq!(t.close(t0 + ms(250)), CloseOutcome::Animating);
}

#[test]
fn close_when_nothing_is_open() {
    let mut t = TransitionController::new(DURATION);
    assert_eq!(t.close(Instant::now()), CloseOutcome::NotOpen);
}

#[test]
fn closing_shrinks_onto_tile_then_fades_it_in() {
    let (mut t, t0) = opened(OverlaySize::default());
    t.tick(DURATION);
    assert_eq!(t.close(t0 + ms(400)), CloseOutcome::Animating);

    let start = t.overlay().unwrap();
    assert!(start.closing);
    assert!(rect_close(start.rect, FRAME));
    assert_eq!(t.focused_tile(), Some(7));
    // A second close while shrinking is not honoured.
    assert_eq!(t.close(t0 + ms(500)), CloseOutcome::NotOpen);

    assert_eq!(t.tick(DURATION), TransitionTick::Progressed);
    assert_eq!(
        t.phase(),
        TransitionPhase::Closing {
            stage: CloseStage::FadeIn,
            progress: 0.0
        }
    );
    assert!(t.overlay().is_none());
    assert_eq!(t.focused_tile(), None);
    let fading = t.focused().unwrap();
    assert!(!fading.hidden);
    assert_eq!(fading.opacity, Some(0.0));
    assert_eq!(fading.rotation_delta, Default::default());

    assert_eq!(t.tick(ms(300)), TransitionTick::Finished);
    assert_eq!(t.phase(), TransitionPhase::Closed);
    assert!(t.session().is_none());
    assert!(t.focused().is_none());
}

#[test]
fn closing_mid_open_starts_from_the_visible_rect() {
    let (mut t, t0) = opened(OverlaySize::default());
    t.tick(ms(100));
    let visible = t.overlay().unwrap().visual_rect();
    assert_eq!(t.close(t0 + ms(260)), CloseOutcome::Animating);
    assert!(rect_close(t.overlay().unwrap().rect, visible));
}

#[test]
fn missing_origin_resets_immediately() {
    let mut t = TransitionController::new(DURATION);
    let t0 = Instant::now();
    t.open(request(None, OverlaySize::default()), t0);
    // Without a tile rect the overlay opens in place.
    assert_eq!(t.overlay().unwrap().visual_rect(), FRAME);
    assert_eq!(t.close(t0 + ms(300)), CloseOutcome::Reset);
    assert_eq!(t.phase(), TransitionPhase::Closed);
    assert!(t.focused().is_none());
}

#[test]
fn reframe_moves_the_open_overlay() {
    let (mut t, _) = opened(OverlaySize::default());
    t.tick(DURATION);
    let moved = Rect::new(0.0, 0.0, 600.0, 600.0);
    t.reframe(moved);
    assert_eq!(t.overlay().unwrap().rect, moved);
}

#[test]
fn alt_text_becomes_caption() {
    let mut t = TransitionController::new(DURATION);
    let mut req = request(Some(TILE), OverlaySize::default());
    req.image = ImageDescriptor::new("/b.jpg", "A bridge");
    t.open(req, Instant::now());
    assert_eq!(t.overlay().unwrap().caption, "A bridge");
}
