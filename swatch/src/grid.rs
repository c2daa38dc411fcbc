//! A palette of equally sized swatches laid out in rows, filling the whole surface.

use swatch_core::{Bounds, Color, Palette, Point};

/// Width of the selection marker, in logical pixels.
const MARKER_WIDTH: f32 = 2.0;

pub const STANDARD_COLORS: [u32; 16] = [
    0xFF0000, 0xFF8000, 0xFFFF00, 0x80FF00, //
    0x00FF00, 0x00FF80, 0x00FFFF, 0x0080FF, //
    0x0000FF, 0x8000FF, 0xFF00FF, 0xFF0080, //
    0xFFFFFF, 0xAAAAAA, 0x555555, 0x000000,
];

pub struct GridPalette {
    colors: Vec<Color>,
    columns: usize,
    width: f32,
    height: f32,
    selected: Color,
}
impl GridPalette {
    /// Nothing is selected to begin with, which reads as [`Color::TRANSPARENT`].
    #[must_use]
    pub fn new(colors: Vec<Color>, columns: usize) -> Self {
        Self {
            colors,
            columns: columns.max(1),
            width: 0.0,
            height: 0.0,
            selected: Color::TRANSPARENT,
        }
    }
    fn rows(&self) -> usize {
        self.colors.len().div_ceil(self.columns)
    }
    /// Logical size of a single cell.
    #[allow(clippy::cast_precision_loss)]
    fn cell_size(&self) -> (f32, f32) {
        (
            self.width / self.columns as f32,
            self.height / self.rows().max(1) as f32,
        )
    }
    /// Index of the swatch under `point`, if any. The trailing cells of a partial last row hold no swatch.
    #[must_use]
    pub fn cell_at(&self, point: Point) -> Option<usize> {
        use az::SaturatingAs;
        if !(0.0..self.width).contains(&point.x) || !(0.0..self.height).contains(&point.y) {
            return None;
        }
        let (cell_w, cell_h) = self.cell_size();
        // Clamp, in case of float error at the far edges.
        let column = (point.x / cell_w).saturating_as::<usize>().min(self.columns - 1);
        let row = (point.y / cell_h)
            .saturating_as::<usize>()
            .min(self.rows().saturating_sub(1));
        let idx = row * self.columns + column;
        (idx < self.colors.len()).then_some(idx)
    }
    #[allow(clippy::cast_precision_loss)]
    fn cell_rect(&self, idx: usize) -> Bounds {
        let (cell_w, cell_h) = self.cell_size();
        let left = (idx % self.columns) as f32 * cell_w;
        let top = (idx / self.columns) as f32 * cell_h;
        Bounds::new(left, top, left + cell_w, top + cell_h)
    }
}
impl Palette for GridPalette {
    type Surface = image::RgbaImage;
    fn select_at(&mut self, point: Point) -> bool {
        let Some(idx) = self.cell_at(point) else {
            return false;
        };
        let color = self.colors[idx];
        if color == self.selected {
            false
        } else {
            self.selected = color;
            true
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
    /// Fill the image with the swatches, scaled from the logical size to the image's pixel size.
    #[allow(clippy::cast_precision_loss)]
    fn draw(&self, surface: &mut Self::Surface) {
        if surface.width() == 0 || surface.height() == 0 {
            return;
        }
        let scale_x = self.width / surface.width() as f32;
        let scale_y = self.height / surface.height() as f32;
        // A color set programmatically may not be on the grid at all.
        let marked = self
            .colors
            .iter()
            .position(|&c| c == self.selected)
            .map(|idx| self.cell_rect(idx));

        for (x, y, pixel) in surface.enumerate_pixels_mut() {
            let point = Point::new((x as f32 + 0.5) * scale_x, (y as f32 + 0.5) * scale_y);
            let Some(idx) = self.cell_at(point) else {
                *pixel = image::Rgba(Color::TRANSPARENT.to_rgba8());
                continue;
            };
            let color = self.colors[idx];
            let on_marker = marked.is_some_and(|rect| {
                rect.contains(point)
                    && (point.x - rect.left < MARKER_WIDTH
                        || rect.right - point.x < MARKER_WIDTH
                        || point.y - rect.top < MARKER_WIDTH
                        || rect.bottom - point.y < MARKER_WIDTH)
            });
            let color = if on_marker {
                Color::from_channels(
                    color.alpha(),
                    !color.red(),
                    !color.green(),
                    !color.blue(),
                )
            } else {
                color
            };
            *pixel = image::Rgba(color.to_rgba8());
        }
    }
}

#[cfg(test)]
mod test {
    use super::GridPalette;
    use swatch_core::{Color, Palette, Point};

    fn grid_of_seven() -> GridPalette {
        // Two full rows of three, and a single swatch on the third.
        let mut grid = GridPalette::new((1..=7).map(Color::from_rgb).collect(), 3);
        grid.update_size(30.0, 30.0);
        grid
    }

    #[test]
    fn cells() {
        let grid = grid_of_seven();
        assert_eq!(grid.cell_at(Point::new(0.0, 0.0)), Some(0));
        assert_eq!(grid.cell_at(Point::new(15.0, 5.0)), Some(1));
        assert_eq!(grid.cell_at(Point::new(29.9, 19.9)), Some(5));
        assert_eq!(grid.cell_at(Point::new(5.0, 25.0)), Some(6));
        // Empty tail of the last row.
        assert_eq!(grid.cell_at(Point::new(15.0, 25.0)), None);
        // Outside.
        assert_eq!(grid.cell_at(Point::new(30.0, 5.0)), None);
        assert_eq!(grid.cell_at(Point::new(-1.0, 5.0)), None);
        assert_eq!(grid.cell_at(Point::new(f32::NAN, 5.0)), None);
    }
    #[test]
    fn select_reports_changes() {
        let mut grid = grid_of_seven();
        assert_eq!(grid.selected_color(), Color::TRANSPARENT);
        assert!(grid.select_at(Point::new(1.0, 1.0)));
        assert!(!grid.select_at(Point::new(2.0, 2.0)));
        assert!(grid.select_at(Point::new(25.0, 1.0)));
        assert_eq!(grid.selected_color(), Color::from_rgb(3));
        assert!(!grid.select_at(Point::new(25.0, 25.0)));
        assert_eq!(grid.selected_color(), Color::from_rgb(3));
    }
    #[test]
    fn empty_grid() {
        let mut grid = GridPalette::new(Vec::new(), 0);
        grid.update_size(10.0, 10.0);
        assert_eq!(grid.selected_color(), Color::TRANSPARENT);
        assert!(!grid.select_at(Point::new(5.0, 5.0)));
        let mut image = image::RgbaImage::new(4, 4);
        grid.draw(&mut image);
        assert!(image.pixels().all(|p| p.0 == [0; 4]));
    }
    #[test]
    fn draw_marks_selection() {
        let mut grid = GridPalette::new(
            vec![Color::from_rgb(0xFF0000), Color::from_rgb(0x0000FF)],
            2,
        );
        grid.update_size(20.0, 10.0);
        grid.select_color(Color::from_rgb(0xFF0000));
        // One pixel per logical pixel.
        let mut image = image::RgbaImage::new(20, 10);
        grid.draw(&mut image);

        // Red is selected. Its border is inverted, its middle is not.
        assert_eq!(image.get_pixel(0, 0).0, [0x00, 0xFF, 0xFF, 0xFF]);
        assert_eq!(image.get_pixel(5, 5).0, [0xFF, 0x00, 0x00, 0xFF]);
        assert_eq!(image.get_pixel(15, 0).0, [0x00, 0x00, 0xFF, 0xFF]);

        grid.select_color(Color::WHITE);
        grid.draw(&mut image);
        assert_eq!(image.get_pixel(0, 0).0, [0xFF, 0x00, 0x00, 0xFF]);
    }
}
