//! Domain model types (pure).
//!
//! All types in this module are plain data shared between the engine, its host
//! and the simulator.

pub mod error;
pub mod event;
pub mod gesture;
pub mod transform;

// Re-export for convenience
pub use error::CarouselError;
pub use event::CarouselEvent;
pub use gesture::{GestureInput, SwipeDirection};
pub use transform::ItemTransform;
