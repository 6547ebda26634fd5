use crate::core::data::point::Point;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PixelRectError {
    #[error("pixel rect size must be at least 2x2: {width}x{height}")]
    InvalidSize { width: i64, height: i64 },
}

/// Inclusive rectangle of pixels; the output frame of a render.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRect {
    top_left: Point,
    bottom_right: Point,
}

impl PixelRect {
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self, PixelRectError> {
        let width = i64::from(bottom_right.x) - i64::from(top_left.x) + 1;
        let height = i64::from(bottom_right.y) - i64::from(top_left.y) + 1;

        if width < 2 || height < 2 {
            return Err(PixelRectError::InvalidSize { width, height });
        }

        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// A `width` x `height` frame anchored at the origin.
    pub fn with_size(width: u32, height: u32) -> Result<Self, PixelRectError> {
        let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(PixelRectError::InvalidSize {
                width: i64::from(width),
                height: i64::from(height),
            });
        };

        Self::new(Point::new(0, 0), Point::new(w - 1, h - 1))
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        (self.bottom_right.x - self.top_left.x + 1) as u32
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        (self.bottom_right.y - self.top_left.y + 1) as u32
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.top_left.x <= point.x
            && self.top_left.y <= point.y
            && self.bottom_right.x >= point.x
            && self.bottom_right.y >= point.y
    }

    /// Row-major index of `point`, or `None` when it lies outside the rect.
    #[must_use]
    pub fn index_of(&self, point: Point) -> Option<usize> {
        if !self.contains_point(point) {
            return None;
        }

        let column = (point.x - self.top_left.x) as usize;
        let row = (point.y - self.top_left.y) as usize;

        Some(row * self.width() as usize + column)
    }

    /// Position of `point` relative to the top-left corner.
    #[must_use]
    pub fn relative(&self, point: Point) -> (f64, f64) {
        (
            f64::from(point.x - self.top_left.x),
            f64::from(point.y - self.top_left.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_size_anchors_at_origin() {
        let rect = PixelRect::with_size(800, 600).unwrap();

        assert_eq!(rect.top_left(), Point::new(0, 0));
        assert_eq!(rect.bottom_right(), Point::new(799, 599));
        assert_eq!(rect.width(), 800);
        assert_eq!(rect.height(), 600);
        assert_eq!(rect.pixel_count(), 480_000);
    }

    #[test]
    fn rejects_degenerate_and_inverted_rects() {
        assert_eq!(
            PixelRect::new(Point::new(0, 0), Point::new(0, 10)),
            Err(PixelRectError::InvalidSize { width: 1, height: 11 })
        );
        assert_eq!(
            PixelRect::new(Point::new(2, 2), Point::new(-2, -2)),
            Err(PixelRectError::InvalidSize { width: -3, height: -3 })
        );
        assert!(PixelRect::with_size(1, 100).is_err());
        assert!(PixelRect::with_size(u32::MAX, 2).is_err());
        assert!(PixelRect::with_size(2, 2).is_ok());
    }

    #[test]
    fn index_of_is_row_major_relative_to_top_left() {
        let rect = PixelRect::new(Point::new(10, 20), Point::new(13, 22)).unwrap();

        assert_eq!(rect.index_of(Point::new(10, 20)), Some(0));
        assert_eq!(rect.index_of(Point::new(13, 20)), Some(3));
        assert_eq!(rect.index_of(Point::new(10, 21)), Some(4));
        assert_eq!(rect.index_of(Point::new(13, 22)), Some(11));
        assert_eq!(rect.index_of(Point::new(14, 22)), None);
        assert_eq!(rect.index_of(Point::new(9, 20)), None);
    }

    #[test]
    fn relative_subtracts_top_left() {
        let rect = PixelRect::new(Point::new(-5, 7), Point::new(5, 17)).unwrap();

        assert_eq!(rect.relative(Point::new(0, 10)), (5.0, 3.0));
    }
}
