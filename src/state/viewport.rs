use super::gesture::GestureState;
use super::transform::Transform;

/// A touch position in canvas-relative screen coordinates. Keeps the
/// gesture math independent of `web_sys::Touch`, so it runs headless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

fn touch_distance(a: TouchPoint, b: TouchPoint) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

fn touch_midpoint(a: TouchPoint, b: TouchPoint) -> (f64, f64) {
    ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Owns the pan/zoom transform and the in-flight gesture bookkeeping for
/// one canvas. Methods are plain state updates; event subscription and
/// drawing live in the component layer.
#[derive(Default, Debug, Clone)]
pub struct Viewport {
    pub transform: Transform,
    gesture: GestureState,
}

impl Viewport {
    /// One touch arms panning, two arm pinching (and disarm panning, even
    /// mid-gesture). Any other count leaves the previous state standing.
    pub fn on_touch_start(&mut self, touches: &[TouchPoint]) {
        match touches {
            [t] => {
                self.gesture = GestureState {
                    panning: true,
                    last_x: t.x,
                    last_y: t.y,
                    ..GestureState::default()
                };
            }
            [a, b] => {
                let (mx, my) = touch_midpoint(*a, *b);
                self.gesture = GestureState {
                    pinch: true,
                    pinch_dist: touch_distance(*a, *b),
                    pinch_mid_x: mx,
                    pinch_mid_y: my,
                    ..GestureState::default()
                };
            }
            _ => {}
        }
    }

    /// Returns true when the event was handled (the caller should prevent
    /// the platform default and redraw). Unrecognized touch counts leave
    /// everything untouched.
    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) -> bool {
        match touches {
            [t] if self.gesture.panning => {
                let dx = t.x - self.gesture.last_x;
                let dy = t.y - self.gesture.last_y;
                self.transform.pan_by(dx, dy);
                self.gesture.last_x = t.x;
                self.gesture.last_y = t.y;
                true
            }
            [_, _] if !self.gesture.pinch => {
                // Two touches without a start event (listener attached
                // mid-gesture): record the anchors, scale from next frame.
                self.on_touch_start(touches);
                true
            }
            [a, b] => {
                self.gesture.panning = false;
                let dist = touch_distance(*a, *b);
                let (mx, my) = touch_midpoint(*a, *b);
                let drift_x = mx - self.gesture.pinch_mid_x;
                let drift_y = my - self.gesture.pinch_mid_y;
                self.transform.zoom_about(dist / self.gesture.pinch_dist, mx, my);
                // Raw midpoint drift applies on top of the focal-point
                // correction, whether or not the zoom step was accepted:
                // this is the two-finger pan, and it keeps a gesture at
                // the scale bounds from feeling stuck.
                self.transform.pan_by(drift_x, drift_y);
                self.gesture.pinch_dist = dist;
                self.gesture.pinch_mid_x = mx;
                self.gesture.pinch_mid_y = my;
                true
            }
            _ => false,
        }
    }

    /// `remaining` is the number of touches still down, `lifted` the
    /// touches that just ended. Panning is disarmed unconditionally; when
    /// the gesture fully ends with exactly one lifted touch, its position
    /// is inverse-mapped and returned as the image-space tap point.
    pub fn on_touch_end(&mut self, remaining: usize, lifted: &[TouchPoint]) -> Option<(f64, f64)> {
        self.gesture.panning = false;
        if remaining > 0 {
            return None;
        }
        self.gesture = GestureState::default();
        match lifted {
            [t] => Some(self.transform.to_image(t.x, t.y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn pt(x: f64, y: f64) -> TouchPoint {
        TouchPoint { x, y }
    }

    #[test]
    fn single_touch_pan_composes() {
        let mut vp = Viewport::default();
        vp.on_touch_start(&[pt(100.0, 100.0)]);
        assert!(vp.on_touch_move(&[pt(104.0, 97.0)]));
        assert!(vp.on_touch_move(&[pt(110.0, 101.0)]));
        assert!((vp.transform.origin_x - 10.0).abs() < EPS);
        assert!((vp.transform.origin_y - 1.0).abs() < EPS);
    }

    #[test]
    fn move_without_start_is_ignored() {
        let mut vp = Viewport::default();
        assert!(!vp.on_touch_move(&[pt(10.0, 10.0)]));
        assert_eq!(vp.transform, Transform::default());
    }

    #[test]
    fn pinch_keeps_focal_point_fixed() {
        let mut vp = Viewport::default();
        vp.on_touch_start(&[pt(90.0, 100.0), pt(110.0, 100.0)]);
        let (ix, iy) = vp.transform.to_image(100.0, 100.0);
        assert!(vp.on_touch_move(&[pt(80.0, 100.0), pt(120.0, 100.0)]));
        assert!((vp.transform.scale - 2.0).abs() < EPS);
        let (sx, sy) = vp.transform.to_screen(ix, iy);
        assert!((sx - 100.0).abs() < EPS);
        assert!((sy - 100.0).abs() < EPS);
    }

    #[test]
    fn rejected_zoom_still_applies_midpoint_drift() {
        let mut vp = Viewport::default();
        vp.on_touch_start(&[pt(0.0, 0.0), pt(10.0, 0.0)]);
        // distance x4 would push the scale to 4.0, outside the bound, but
        // the midpoint still slid from x=5 to x=30
        assert!(vp.on_touch_move(&[pt(10.0, 0.0), pt(50.0, 0.0)]));
        assert_eq!(vp.transform.scale, 1.0);
        assert!((vp.transform.origin_x - 25.0).abs() < EPS);
    }

    #[test]
    fn two_finger_drift_pans_while_pinching() {
        let mut vp = Viewport::default();
        vp.on_touch_start(&[pt(90.0, 100.0), pt(110.0, 100.0)]);
        // same spread, whole hand slides +10 in x
        assert!(vp.on_touch_move(&[pt(100.0, 100.0), pt(120.0, 100.0)]));
        assert_eq!(vp.transform.scale, 1.0);
        assert!((vp.transform.origin_x - 10.0).abs() < EPS);
        assert!(vp.transform.origin_y.abs() < EPS);
    }

    #[test]
    fn second_finger_disables_pan_without_touch_end() {
        let mut vp = Viewport::default();
        vp.on_touch_start(&[pt(50.0, 50.0)]);
        vp.on_touch_move(&[pt(60.0, 50.0)]);
        assert!((vp.transform.origin_x - 10.0).abs() < EPS);
        // second finger lands; the browser fires a fresh start with both
        vp.on_touch_start(&[pt(60.0, 50.0), pt(80.0, 50.0)]);
        let before = vp.transform;
        // a later single-touch frame must not pan once pinch mode is set
        assert!(!vp.on_touch_move(&[pt(90.0, 90.0)]));
        assert_eq!(vp.transform, before);
    }

    #[test]
    fn tap_resolves_in_image_space() {
        let mut vp = Viewport::default();
        vp.transform = Transform {
            scale: 2.0,
            origin_x: 10.0,
            origin_y: 10.0,
        };
        vp.on_touch_start(&[pt(20.0, 30.0)]);
        assert_eq!(vp.on_touch_end(0, &[pt(20.0, 30.0)]), Some((5.0, 10.0)));
    }

    #[test]
    fn lifting_both_pinch_fingers_is_not_a_tap() {
        let mut vp = Viewport::default();
        vp.on_touch_start(&[pt(0.0, 0.0), pt(10.0, 10.0)]);
        assert_eq!(vp.on_touch_end(0, &[pt(0.0, 0.0), pt(10.0, 10.0)]), None);
    }

    #[test]
    fn end_with_touches_remaining_is_not_a_tap() {
        let mut vp = Viewport::default();
        vp.on_touch_start(&[pt(0.0, 0.0), pt(10.0, 10.0)]);
        assert_eq!(vp.on_touch_end(1, &[pt(10.0, 10.0)]), None);
        // the leftover finger does not pan; a new start has to arm it
        assert!(!vp.on_touch_move(&[pt(5.0, 5.0)]));
    }

    #[test]
    fn gesture_end_always_clears_panning() {
        let mut vp = Viewport::default();
        vp.on_touch_start(&[pt(0.0, 0.0)]);
        vp.on_touch_end(0, &[pt(0.0, 0.0)]);
        assert!(!vp.on_touch_move(&[pt(10.0, 10.0)]));
    }

    #[test]
    fn two_touch_move_without_start_anchors_first() {
        let mut vp = Viewport::default();
        // no touchstart seen; the first frame only records anchors
        assert!(vp.on_touch_move(&[pt(0.0, 0.0), pt(10.0, 0.0)]));
        assert_eq!(vp.transform, Transform::default());
        // the next frame pinches off the recorded anchor
        assert!(vp.on_touch_move(&[pt(0.0, 0.0), pt(20.0, 0.0)]));
        assert!((vp.transform.scale - 2.0).abs() < EPS);
    }

    #[test]
    fn tap_hit_testing_matches_registry() {
        use crate::model::SectorRegistry;

        let reg = SectorRegistry::from_json(
            r#"[{"id":"quad","coords":"0,0,10,0,10,10,0,10","icon":"pin"}]"#,
        )
        .unwrap();
        let mut vp = Viewport::default();
        vp.on_touch_start(&[pt(5.0, 5.0)]);
        let (ix, iy) = vp.on_touch_end(0, &[pt(5.0, 5.0)]).unwrap();
        assert_eq!(reg.hit_test(ix, iy).map(|s| s.id.as_str()), Some("quad"));

        let mut vp = Viewport::default();
        vp.on_touch_start(&[pt(15.0, 15.0)]);
        let (ix, iy) = vp.on_touch_end(0, &[pt(15.0, 15.0)]).unwrap();
        assert!(reg.hit_test(ix, iy).is_none());
    }
}
