/// A position in the host surface's local space, in logical pixels.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}
impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, with edges in the same space as [`Point`].
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}
impl Bounds {
    #[must_use]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
    /// A rectangle of the given size with the origin at `(0, 0)`.
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
    /// Resize, keeping the top-left corner in place.
    #[must_use]
    pub fn with_size(self, width: f32, height: f32) -> Self {
        Self {
            right: self.left + width,
            bottom: self.top + height,
            ..self
        }
    }
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
    /// Inclusive on all four edges - a point lying exactly on `right` or `bottom` is inside.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (self.left..=self.right).contains(&point.x) && (self.top..=self.bottom).contains(&point.y)
    }
}
