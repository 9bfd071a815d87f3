pub mod gesture;
pub mod transform;
pub mod viewport;

pub use gesture::GestureState;
pub use transform::Transform;
pub use viewport::{TouchPoint, Viewport};
