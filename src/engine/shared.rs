//! Shared ownership with reentrancy detection.
//!
//! Hosts that need to reach the carousel from their own callbacks hold a
//! [`WeakCarousel`]. Any call made while the engine is already running one of
//! those callbacks fails with [`CarouselError::ReentrancyViolation`] instead of
//! aliasing engine state.

use super::carousel::Carousel;
use super::host::{CarouselHost, FrameScheduler};
use crate::model::CarouselError;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A reference-counted carousel.
pub struct SharedCarousel<D: CarouselHost, S: FrameScheduler> {
    inner: Rc<RefCell<Carousel<D, S>>>,
}

impl<D: CarouselHost, S: FrameScheduler> Clone for SharedCarousel<D, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D: CarouselHost, S: FrameScheduler> SharedCarousel<D, S> {
    /// Wrap a carousel.
    pub fn new(carousel: Carousel<D, S>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(carousel)),
        }
    }

    /// Run `f` with exclusive access.
    ///
    /// # Errors
    ///
    /// [`CarouselError::ReentrancyViolation`] when called from inside another
    /// `with` on the same carousel.
    pub fn with<R>(&self, f: impl FnOnce(&mut Carousel<D, S>) -> R) -> Result<R, CarouselError> {
        let mut carousel = self
            .inner
            .try_borrow_mut()
            .map_err(|_| CarouselError::ReentrancyViolation)?;
        Ok(f(&mut carousel))
    }

    /// A non-owning handle, safe to store inside the host.
    pub fn downgrade(&self) -> WeakCarousel<D, S> {
        WeakCarousel {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Non-owning counterpart of [`SharedCarousel`].
pub struct WeakCarousel<D: CarouselHost, S: FrameScheduler> {
    inner: Weak<RefCell<Carousel<D, S>>>,
}

impl<D: CarouselHost, S: FrameScheduler> Clone for WeakCarousel<D, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<D: CarouselHost, S: FrameScheduler> WeakCarousel<D, S> {
    /// Run `f` if the carousel is still alive.
    ///
    /// Returns `None` once every [`SharedCarousel`] has been dropped.
    pub fn with<R>(
        &self,
        f: impl FnOnce(&mut Carousel<D, S>) -> R,
    ) -> Option<Result<R, CarouselError>> {
        self.inner
            .upgrade()
            .map(|inner| SharedCarousel { inner }.with(f))
    }
}
