use serde::{Deserialize, Serialize};

/// Default zoom window. Some deployments loosen the floor to 0.8 via
/// `with_scale_extent`.
pub const DEFAULT_SCALE_EXTENT: (f64, f64) = (1.0, 8.0);

/// The pannable world extends this far past the viewport on every side.
const TRANSLATE_EXTENT_PAD: f64 = 100.0;

/// Wheel delta to zoom factor exponent, matching trackpad-friendly tuning.
const WHEEL_SENSITIVITY: f64 = 0.00085;

/// Duration of the double-click reset animation.
pub const RESET_ANIMATION_MS: f64 = 750.0;

/// Affine pan/zoom layer applied on top of the geographic projection.
/// Never baked into the projection, so refitting on resize or basemap
/// change leaves the user's view alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Map a projected point to its on-screen position.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale + self.translate_x,
            y * self.scale + self.translate_y,
        )
    }

    fn lerp(from: &ZoomTransform, to: &ZoomTransform, t: f64) -> ZoomTransform {
        ZoomTransform {
            scale: from.scale + (to.scale - from.scale) * t,
            translate_x: from.translate_x + (to.translate_x - from.translate_x) * t,
            translate_y: from.translate_y + (to.translate_y - from.translate_y) * t,
        }
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ResetAnimation {
    from: ZoomTransform,
    started_at: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    Dragging,
    Animating(ResetAnimation),
}

/// Pan/zoom state for one map instance. The viewport exclusively owns the
/// current transform; scene construction reads it but requests changes only
/// through these methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    transform: ZoomTransform,
    state: GestureState,
    width: f64,
    height: f64,
    scale_min: f64,
    scale_max: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            transform: ZoomTransform::IDENTITY,
            state: GestureState::Idle,
            width,
            height,
            scale_min: DEFAULT_SCALE_EXTENT.0,
            scale_max: DEFAULT_SCALE_EXTENT.1,
        }
    }

    pub fn with_scale_extent(mut self, scale_min: f64, scale_max: f64) -> Self {
        self.scale_min = scale_min;
        self.scale_max = scale_max;
        self.transform.scale = self.transform.scale.clamp(scale_min, scale_max);
        self
    }

    pub fn current_transform(&self) -> ZoomTransform {
        self.transform
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, GestureState::Animating(_))
    }

    /// Sample the transform at `now_ms`, advancing (and finishing) an
    /// in-flight reset animation. Idle and dragging states return the
    /// settled transform unchanged.
    pub fn transform_at(&mut self, now_ms: f64) -> ZoomTransform {
        if let GestureState::Animating(animation) = self.state {
            let elapsed = now_ms - animation.started_at;
            if elapsed >= RESET_ANIMATION_MS {
                self.transform = ZoomTransform::IDENTITY;
                self.state = GestureState::Idle;
            } else {
                let t = ease_cubic_in_out((elapsed / RESET_ANIMATION_MS).max(0.0));
                self.transform =
                    ZoomTransform::lerp(&animation.from, &ZoomTransform::IDENTITY, t);
            }
        }
        self.transform
    }

    /// Wheel zoom anchored at the cursor: the projected point under
    /// `(focus_x, focus_y)` stays fixed while the scale changes.
    pub fn wheel(&mut self, delta_y: f64, focus_x: f64, focus_y: f64, now_ms: f64) {
        self.interrupt(now_ms);

        let factor = 2f64.powf(-delta_y * WHEEL_SENSITIVITY);
        let new_scale = (self.transform.scale * factor).clamp(self.scale_min, self.scale_max);
        let ratio = new_scale / self.transform.scale;

        self.transform.translate_x = focus_x - (focus_x - self.transform.translate_x) * ratio;
        self.transform.translate_y = focus_y - (focus_y - self.transform.translate_y) * ratio;
        self.transform.scale = new_scale;
        self.clamp_translate();
    }

    pub fn begin_drag(&mut self, now_ms: f64) {
        self.interrupt(now_ms);
        self.state = GestureState::Dragging;
    }

    /// Pan by a screen-space delta. Only meaningful while dragging, but
    /// tolerated from idle for programmatic nudges.
    pub fn drag_by(&mut self, dx: f64, dy: f64) {
        if matches!(self.state, GestureState::Animating(_)) {
            return;
        }
        self.transform.translate_x += dx;
        self.transform.translate_y += dy;
        self.clamp_translate();
    }

    pub fn end_drag(&mut self) {
        if self.state == GestureState::Dragging {
            self.state = GestureState::Idle;
        }
    }

    /// Double-click reset: animate back to identity over
    /// `RESET_ANIMATION_MS`, sampled by subsequent `transform_at` calls.
    pub fn reset_to_identity(&mut self, now_ms: f64) {
        self.state = GestureState::Animating(ResetAnimation {
            from: self.transform,
            started_at: now_ms,
        });
    }

    /// Install a transform captured from a previous map instance, so a
    /// rebuilt map resumes where the user left off instead of snapping back
    /// to identity. The value is clamped into this viewport's extents.
    pub fn restore_transform(&mut self, transform: ZoomTransform) {
        self.state = GestureState::Idle;
        self.transform = transform;
        self.transform.scale = self.transform.scale.clamp(self.scale_min, self.scale_max);
        self.clamp_translate();
    }

    /// Update the viewport box (resize/refit). The transform survives,
    /// re-clamped against the new extent.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.clamp_translate();
    }

    /// A gesture arriving during a reset animation wins: the animation is
    /// cancelled at its current sample and the gesture proceeds from there.
    fn interrupt(&mut self, now_ms: f64) {
        if self.is_animating() {
            self.transform_at(now_ms);
            self.state = GestureState::Idle;
        }
    }

    /// Keep the padded world extent covering the viewport, the translate
    /// analogue of the scale clamp.
    fn clamp_translate(&mut self) {
        let k = self.transform.scale;
        let pad = TRANSLATE_EXTENT_PAD;

        let (lo_x, hi_x) = (self.width - (self.width + pad) * k, pad * k);
        self.transform.translate_x = clamp_or_center(self.transform.translate_x, lo_x, hi_x);

        let (lo_y, hi_y) = (self.height - (self.height + pad) * k, pad * k);
        self.transform.translate_y = clamp_or_center(self.transform.translate_y, lo_y, hi_y);
    }
}

fn clamp_or_center(value: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        // Extent smaller than the viewport at this scale; pin to center.
        (lo + hi) / 2.0
    } else {
        value.clamp(lo, hi)
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 600.0)
    }

    #[test]
    fn starts_at_identity() {
        assert!(viewport().current_transform().is_identity());
    }

    #[test]
    fn wheel_zoom_in_raises_scale() {
        let mut vp = viewport();
        vp.wheel(-400.0, 500.0, 300.0, 0.0);
        assert!(vp.current_transform().scale > 1.0);
    }

    #[test]
    fn scale_clamps_exactly_to_the_extent_ceiling() {
        let mut vp = viewport();
        // A delta large enough to overshoot by orders of magnitude.
        vp.wheel(-100_000.0, 500.0, 300.0, 0.0);
        assert_eq!(vp.current_transform().scale, DEFAULT_SCALE_EXTENT.1);

        vp.wheel(100_000.0, 500.0, 300.0, 1.0);
        assert_eq!(vp.current_transform().scale, DEFAULT_SCALE_EXTENT.0);
    }

    #[test]
    fn wheel_keeps_the_point_under_the_cursor_fixed() {
        let mut vp = viewport();
        vp.restore_transform(ZoomTransform {
            scale: 2.0,
            translate_x: -40.0,
            translate_y: -20.0,
        });
        let (focus_x, focus_y) = (400.0, 250.0);
        let before = vp.current_transform();
        let world = (
            (focus_x - before.translate_x) / before.scale,
            (focus_y - before.translate_y) / before.scale,
        );

        vp.wheel(-200.0, focus_x, focus_y, 0.0);

        let after = vp.current_transform();
        let (sx, sy) = after.apply(world.0, world.1);
        assert!((sx - focus_x).abs() < 1e-9, "x drifted: {sx} vs {focus_x}");
        assert!((sy - focus_y).abs() < 1e-9, "y drifted: {sy} vs {focus_y}");
    }

    #[test]
    fn drag_pans_and_clamps_to_the_padded_extent() {
        let mut vp = viewport();
        vp.begin_drag(0.0);
        vp.drag_by(50.0, -30.0);
        vp.end_drag();

        let t = vp.current_transform();
        assert_eq!((t.translate_x, t.translate_y), (50.0, -30.0));

        // At scale 1 the padded extent allows at most 100px of travel.
        vp.begin_drag(1.0);
        vp.drag_by(10_000.0, 10_000.0);
        let t = vp.current_transform();
        assert_eq!((t.translate_x, t.translate_y), (100.0, 100.0));
    }

    #[test]
    fn reset_animation_lands_exactly_on_identity() {
        let mut vp = viewport();
        vp.wheel(-500.0, 200.0, 100.0, 0.0);
        assert!(!vp.current_transform().is_identity());

        vp.reset_to_identity(1_000.0);
        assert!(vp.is_animating());

        // Mid-flight the transform is between the endpoints.
        let mid = vp.transform_at(1_000.0 + RESET_ANIMATION_MS / 2.0);
        assert!(mid.scale > 1.0);

        let done = vp.transform_at(1_000.0 + RESET_ANIMATION_MS);
        assert!(done.is_identity());
        assert!(!vp.is_animating());

        // Sampling after completion stays put.
        assert!(vp.transform_at(10_000.0).is_identity());
    }

    #[test]
    fn gesture_during_reset_animation_wins() {
        let mut vp = viewport();
        vp.wheel(-500.0, 200.0, 100.0, 0.0);
        vp.reset_to_identity(1_000.0);

        // Halfway through the animation a new wheel gesture arrives.
        vp.wheel(-100.0, 200.0, 100.0, 1_000.0 + RESET_ANIMATION_MS / 2.0);
        assert!(!vp.is_animating());

        // The abandoned animation no longer advances toward identity.
        let later = vp.transform_at(20_000.0);
        assert!(!later.is_identity());
    }

    #[test]
    fn restore_transform_resumes_a_prior_view_exactly() {
        let saved = ZoomTransform {
            scale: 3.5,
            translate_x: -120.0,
            translate_y: -80.0,
        };

        let mut fresh = viewport();
        fresh.restore_transform(saved);
        assert_eq!(fresh.current_transform(), saved);
    }

    #[test]
    fn restore_transform_clamps_into_the_scale_extent() {
        let mut vp = viewport();
        vp.restore_transform(ZoomTransform {
            scale: 99.0,
            translate_x: 0.0,
            translate_y: 0.0,
        });
        assert_eq!(vp.current_transform().scale, DEFAULT_SCALE_EXTENT.1);
    }

    #[test]
    fn loosened_scale_floor_is_respected() {
        let mut vp = Viewport::new(1000.0, 600.0).with_scale_extent(0.8, 8.0);
        vp.wheel(100_000.0, 500.0, 300.0, 0.0);
        assert_eq!(vp.current_transform().scale, 0.8);
    }

    #[test]
    fn resize_keeps_the_transform() {
        let mut vp = viewport();
        vp.wheel(-300.0, 500.0, 300.0, 0.0);
        let before = vp.current_transform();

        vp.set_viewport_size(800.0, 480.0);
        let after = vp.current_transform();
        assert_eq!(after.scale, before.scale);
    }
}
