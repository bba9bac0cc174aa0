//! Graphics state tracking for page drawing operations.
//!
//! This module provides the affine transform stack that resolves the
//! transform in effect at the instant an image is painted on a page.

use crate::source::DrawOp;

/// A 2D affine transformation matrix.
///
/// Paged document formats use matrices of the form:
/// ```text
/// [ a  b  0 ]
/// [ c  d  0 ]
/// [ e  f  1 ]
/// ```
///
/// Where (a,b,c,d) define scaling/rotation/skewing and (e,f) define translation.
/// For axis-aligned image placements, `a` and `d` carry the painted width and
/// height while `e` and `f` carry the position of the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// Horizontal scaling component
    pub a: f32,
    /// Rotation/skew component
    pub b: f32,
    /// Rotation/skew component
    pub c: f32,
    /// Vertical scaling component
    pub d: f32,
    /// Horizontal translation
    pub e: f32,
    /// Vertical translation
    pub f: f32,
}

impl Matrix {
    /// Create an identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_reflow::graphics_state::Matrix;
    ///
    /// let m = Matrix::identity();
    /// assert_eq!(m.a, 1.0);
    /// assert_eq!(m.d, 1.0);
    /// assert_eq!(m.e, 0.0);
    /// ```
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a matrix from its `[a, b, c, d, e, f]` components.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Absolute horizontal scale, i.e. the painted width of a unit square.
    pub fn scale_x(&self) -> f32 {
        self.a.abs()
    }

    /// Absolute vertical scale, i.e. the painted height of a unit square.
    pub fn scale_y(&self) -> f32 {
        self.d.abs()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tracks the current transform over one page's drawing operations.
///
/// Save pushes a copy of the current matrix, restore pops the most recently
/// saved one, and set-transform replaces the current matrix outright (image
/// placement matrices are emitted as absolute values, not increments).
///
/// A restore with an empty stack resets to the identity transform rather
/// than failing; malformed or truncated operation streams degrade
/// gracefully instead of aborting the page.
#[derive(Debug, Clone)]
pub struct TransformTracker {
    current: Matrix,
    saved: Vec<Matrix>,
}

impl TransformTracker {
    /// Create a tracker with the identity transform and an empty save stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_reflow::graphics_state::{Matrix, TransformTracker};
    ///
    /// let tracker = TransformTracker::new();
    /// assert_eq!(*tracker.current(), Matrix::identity());
    /// assert_eq!(tracker.depth(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            current: Matrix::identity(),
            saved: Vec::new(),
        }
    }

    /// The transform in effect as of the last processed operation.
    pub fn current(&self) -> &Matrix {
        &self.current
    }

    /// Number of saved states on the stack.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Process one drawing operation.
    ///
    /// Never fails; operations the tracker does not care about (including
    /// the image paint itself) leave the state untouched.
    pub fn process(&mut self, op: &DrawOp) {
        match op {
            DrawOp::Save => self.saved.push(self.current),
            DrawOp::Restore => match self.saved.pop() {
                Some(m) => self.current = m,
                None => {
                    log::warn!("restore with empty transform stack, resetting to identity");
                    self.current = Matrix::identity();
                },
            },
            DrawOp::SetTransform(m) => self.current = *m,
            DrawOp::PaintImage | DrawOp::Other => {},
        }
    }
}

impl Default for TransformTracker {
    fn default() -> Self {
        Self::new()
    }
}
