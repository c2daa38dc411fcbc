//! # Palette
//!
//! The palette owns the layout of the color swatches, their hit-testing, and the selected color. The controller
//! never does geometry of its own, it only asks the palette what lies under the pointer.
//!
//! Hosts implement this per platform, drawing into whatever surface type they have.

use crate::{color::Color, units::Point};

pub trait Palette {
    /// Whatever the host draws into - a canvas, a pixel buffer, a display list...
    type Surface: ?Sized;

    /// Select the color under `point`, if any. Returns `true` only if the selection changed as a result.
    ///
    /// Points outside of the palette's own hit region must report `false` and leave the selection alone.
    fn select_at(&mut self, point: Point) -> bool;
    /// Set the selection directly. Never reports a change.
    fn select_color(&mut self, color: Color);
    #[must_use]
    fn selected_color(&self) -> Color;
    /// The host surface was resized, re-layout to fill it.
    fn update_size(&mut self, width: f32, height: f32);
    fn draw(&self, surface: &mut Self::Surface);
}

// Allow the controller to work on a borrowed palette, leaving ownership with the host.
impl<P: Palette + ?Sized> Palette for &mut P {
    type Surface = P::Surface;
    fn select_at(&mut self, point: Point) -> bool {
        (**self).select_at(point)
    }
    fn select_color(&mut self, color: Color) {
        (**self).select_color(color);
    }
    fn selected_color(&self) -> Color {
        (**self).selected_color()
    }
    fn update_size(&mut self, width: f32, height: f32) {
        (**self).update_size(width, height);
    }
    fn draw(&self, surface: &mut Self::Surface) {
        (**self).draw(surface);
    }
}
impl<P: Palette + ?Sized> Palette for Box<P> {
    type Surface = P::Surface;
    fn select_at(&mut self, point: Point) -> bool {
        (**self).select_at(point)
    }
    fn select_color(&mut self, color: Color) {
        (**self).select_color(color);
    }
    fn selected_color(&self) -> Color {
        (**self).selected_color()
    }
    fn update_size(&mut self, width: f32, height: f32) {
        (**self).update_size(width, height);
    }
    fn draw(&self, surface: &mut Self::Surface) {
        (**self).draw(surface);
    }
}

/// A palette made of a single row of equally wide vertical stripes, used to drive controller tests.
#[cfg(test)]
pub(crate) mod stripes {
    use super::Palette;
    use crate::{color::Color, units::Point};

    pub struct Stripes {
        pub colors: Vec<Color>,
        pub selected: Color,
        pub width: f32,
        pub height: f32,
        /// Number of calls to `draw`.
        pub draws: std::cell::Cell<usize>,
    }
    impl Stripes {
        pub fn new(colors: impl IntoIterator<Item = u32>, width: f32, height: f32) -> Self {
            Self {
                colors: colors.into_iter().map(Color::from_rgb).collect(),
                selected: Color::TRANSPARENT,
                width,
                height,
                draws: 0.into(),
            }
        }
    }
    impl Palette for Stripes {
        type Surface = Vec<Color>;
        fn select_at(&mut self, point: Point) -> bool {
            if !(0.0..self.width).contains(&point.x) || !(0.0..self.height).contains(&point.y) {
                return false;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let idx = (point.x / self.width * self.colors.len() as f32) as usize;
            match self.colors.get(idx) {
                Some(&color) if color != self.selected => {
                    self.selected = color;
                    true
                }
                _ => false,
            }
        }
        fn select_color(&mut self, color: Color) {
            self.selected = color;
        }
        fn selected_color(&self) -> Color {
            self.selected
        }
        fn update_size(&mut self, width: f32, height: f32) {
            self.width = width;
            self.height = height;
        }
        fn draw(&self, surface: &mut Self::Surface) {
            self.draws.set(self.draws.get() + 1);
            surface.extend_from_slice(&self.colors);
        }
    }

    #[test]
    fn hit_test() {
        let mut stripes = Stripes::new([0xFF0000, 0x00FF00], 100.0, 100.0);
        assert!(stripes.select_at(Point::new(10.0, 10.0)));
        assert_eq!(stripes.selected_color(), Color::from_rgb(0xFF0000));
        // Same stripe, no change.
        assert!(!stripes.select_at(Point::new(40.0, 90.0)));
        assert!(stripes.select_at(Point::new(60.0, 10.0)));
        assert_eq!(stripes.selected_color(), Color::from_rgb(0x00FF00));
        // Outside, no change.
        assert!(!stripes.select_at(Point::new(150.0, 10.0)));
        assert_eq!(stripes.selected_color(), Color::from_rgb(0x00FF00));
    }
    #[test]
    fn forwarding_impls() {
        let mut stripes = Stripes::new([0xFF0000], 10.0, 10.0);
        {
            let mut borrowed = &mut stripes;
            Palette::select_color(&mut borrowed, Color::WHITE);
            Palette::update_size(&mut borrowed, 20.0, 5.0);
            assert_eq!(Palette::selected_color(&borrowed), Color::WHITE);
        }
        assert_eq!((stripes.width, stripes.height), (20.0, 5.0));

        let mut boxed: Box<dyn Palette<Surface = Vec<Color>>> = Box::new(stripes);
        assert!(boxed.select_at(Point::new(1.0, 1.0)));
        let mut surface = Vec::new();
        boxed.draw(&mut surface);
        assert_eq!(surface, vec![Color::from_rgb(0xFF0000)]);
    }
}
