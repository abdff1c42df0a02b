//! The scroll-state engine.
//!
//! # Layers
//!
//! - [`index_math`], [`easing`], [`layout`]: pure functions
//! - [`item_cache`]: index-keyed slot cache with a recycling pool
//! - [`scroll_state`]: offset, motion phase and toggle overlay
//! - [`Carousel`]: the facade tying them to a [`host::CarouselHost`] and a
//!   [`host::FrameScheduler`]; frame ticks and gesture handling are split
//!   across `motion.rs` and `gesture.rs`
//! - [`shared`]: `Rc<RefCell<_>>` wrapper that turns host reentrancy into an
//!   error

pub mod carousel;
pub mod constants;
pub mod easing;
mod gesture;
pub mod host;
pub mod index_math;
pub mod item_cache;
pub mod layout;
mod motion;
pub mod scroll_state;
pub mod shared;

pub use carousel::Carousel;
pub use host::{CarouselHost, DataSource, Delegate, FrameScheduler, ManualClock};
pub use item_cache::ItemCache;
pub use scroll_state::{Phase, ScrollAnimation, ScrollState};
pub use shared::{SharedCarousel, WeakCarousel};
