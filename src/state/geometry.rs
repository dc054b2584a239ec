//! Positions and axis-aligned rectangles.
//!
//! Coordinates are plain numbers, so both integer grid cells and real
//! positions inside a room are representable.

use serde::Serialize;

/// A point inside a room.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({"x": self.x, "y": self.y})
    }
}

/// Axis-aligned bounding box. All four edges belong to the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rectangle {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Rectangle {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Playable bounds of a `width` x `height` room: `[0, width-1] x [0, height-1]`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            top: 0.0,
            right: width - 1.0,
            bottom: height - 1.0,
            left: 0.0,
        }
    }

    /// Check if a position lies inside, edges included.
    pub fn contains(&self, position: Position) -> bool {
        inside_rectangle(position, *self)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "top": self.top,
            "right": self.right,
            "bottom": self.bottom,
            "left": self.left
        })
    }
}

/// Inclusive containment: `x` in `[left, right]` and `y` in `[top, bottom]`.
pub fn inside_rectangle(position: Position, rect: Rectangle) -> bool {
    position.x >= rect.left
        && position.x <= rect.right
        && position.y >= rect.top
        && position.y <= rect.bottom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_area() -> Rectangle {
        Rectangle::new(2.0, 4.0, 4.0, 2.0)
    }

    #[test]
    fn test_corners_are_inside() {
        let rect = wall_area();
        assert!(inside_rectangle(Position::new(2.0, 2.0), rect));
        assert!(inside_rectangle(Position::new(4.0, 4.0), rect));
        assert!(inside_rectangle(Position::new(4.0, 2.0), rect));
        assert!(inside_rectangle(Position::new(2.0, 4.0), rect));
    }

    #[test]
    fn test_interior_and_exterior() {
        let rect = wall_area();
        assert!(rect.contains(Position::new(3.0, 3.0)));
        assert!(rect.contains(Position::new(3.5, 2.25)));
        assert!(!rect.contains(Position::new(1.0, 1.0)));
        assert!(!rect.contains(Position::new(4.01, 3.0)));
        assert!(!rect.contains(Position::new(3.0, 1.99)));
    }

    #[test]
    fn test_from_size() {
        let bounds = Rectangle::from_size(10.0, 8.0);
        assert_eq!(bounds, Rectangle::new(0.0, 9.0, 7.0, 0.0));
        assert!(bounds.contains(Position::new(9.0, 7.0)));
        assert!(!bounds.contains(Position::new(10.0, 0.0)));
        assert!(!bounds.contains(Position::new(0.0, -1.0)));
    }

    #[test]
    fn test_to_json() {
        let rect = wall_area();
        assert_eq!(
            rect.to_json(),
            serde_json::json!({"top": 2.0, "right": 4.0, "bottom": 4.0, "left": 2.0})
        );
        assert_eq!(
            Position::new(1.0, 2.5).to_json(),
            serde_json::json!({"x": 1.0, "y": 2.5})
        );
    }
}
