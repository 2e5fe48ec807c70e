//=========================================================================
// Draw Surface
//=========================================================================
//
// Per-frame view of the host's drawing target.
//
// The handle is whatever immediate-mode context the host paints with
// (a window, a canvas, a test recorder). Scenes downcast it to the
// concrete type they were written for. The borrow keeps the handle valid
// for exactly one draw call.
//
//=========================================================================

use std::any::Any;
use std::fmt;

use super::time::clamp_alpha;

/// Pixel dimensions, interpolation alpha and an opaque drawing handle.
pub struct DrawSurface<'a> {
    width: u32,
    height: u32,
    alpha: f64,
    handle: &'a mut dyn Any,
}

impl<'a> DrawSurface<'a> {
    /// A surface of `width` x `height` with alpha 0.
    pub fn new(width: u32, height: u32, handle: &'a mut dyn Any) -> Self {
        Self {
            width,
            height,
            alpha: 0.0,
            handle,
        }
    }

    /// Sets the interpolation alpha exposed to the draw phase (clamped).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = clamp_alpha(alpha);
        self
    }

    /// Width in physical pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in physical pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fraction of a fixed step left in the accumulator, in `[0, 1]`.
    pub fn interpolation_alpha(&self) -> f64 {
        self.alpha
    }

    /// Downcasts the drawing handle to the host's concrete type.
    pub fn handle_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.handle.downcast_mut::<T>()
    }

    /// Shared access to the host render target, if it is a `T`.
    pub fn handle<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref::<T>()
    }
}

impl fmt::Debug for DrawSurface<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("alpha", &self.alpha)
            .finish_non_exhaustive()
    }
}
