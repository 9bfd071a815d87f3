// Transient per-touch-sequence state. Reset when a gesture starts,
// cleared when the last finger lifts; never persisted.
#[derive(Default, Debug, Clone)]
pub struct GestureState {
    pub panning: bool,
    pub pinch: bool,
    /// Last single-touch position, the pan anchor.
    pub last_x: f64,
    pub last_y: f64,
    /// Inter-touch distance and midpoint of the previous pinch frame.
    pub pinch_dist: f64,
    pub pinch_mid_x: f64,
    pub pinch_mid_y: f64,
}
