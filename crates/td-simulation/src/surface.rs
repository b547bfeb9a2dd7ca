use glam::Vec2;

/// A wall of the play surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    /// The `x = 0` edge.
    Left,
    /// The `x = width` edge.
    Right,
    /// The `y = 0` edge.
    Top,
    /// The `y = height` edge.
    Bottom,
}

/// Walls touched while confining a box, at most one per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    /// Wall hit on the horizontal axis.
    pub x: Option<Wall>,
    /// Wall hit on the vertical axis.
    pub y: Option<Wall>,
}

impl Contact {
    /// Returns true if any wall was hit.
    pub fn any(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

/// The rectangular table dice roll on, spanning `(0, 0)` to `(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Width in surface units.
    pub width: f32,
    /// Height in surface units.
    pub height: f32,
}

impl Surface {
    /// Create a surface of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The surface's center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Returns true if the point lies on the surface.
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Clamp a box centered at `center` with half-extent `half` inside the
    /// surface, reporting which walls it crossed.
    pub fn confine(&self, center: &mut Vec2, half: f32) -> Contact {
        let (x, wall_x) = confine_axis(center.x, half, self.width, Wall::Left, Wall::Right);
        let (y, wall_y) = confine_axis(center.y, half, self.height, Wall::Top, Wall::Bottom);
        center.x = x;
        center.y = y;
        Contact {
            x: wall_x,
            y: wall_y,
        }
    }
}

fn confine_axis(pos: f32, half: f32, extent: f32, low: Wall, high: Wall) -> (f32, Option<Wall>) {
    if extent <= half * 2.0 {
        // Box wider than the surface: pin it to the middle.
        let mid = extent / 2.0;
        let wall = if pos < mid {
            Some(low)
        } else if pos > mid {
            Some(high)
        } else {
            None
        };
        return (mid, wall);
    }
    if pos - half < 0.0 {
        (half, Some(low))
    } else if pos + half > extent {
        (extent - half, Some(high))
    } else {
        (pos, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_box_untouched() {
        let surface = Surface::new(100.0, 100.0);
        let mut center = Vec2::new(50.0, 50.0);
        let contact = surface.confine(&mut center, 10.0);
        assert!(!contact.any());
        assert_eq!(center, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn crossing_walls_clamps_position() {
        let surface = Surface::new(100.0, 80.0);
        let mut center = Vec2::new(-5.0, 78.0);
        let contact = surface.confine(&mut center, 10.0);
        assert_eq!(contact.x, Some(Wall::Left));
        assert_eq!(contact.y, Some(Wall::Bottom));
        assert_eq!(center, Vec2::new(10.0, 70.0));
    }

    #[test]
    fn right_and_top_walls() {
        let surface = Surface::new(100.0, 80.0);
        let mut center = Vec2::new(95.0, 3.0);
        let contact = surface.confine(&mut center, 10.0);
        assert_eq!(contact.x, Some(Wall::Right));
        assert_eq!(contact.y, Some(Wall::Top));
        assert_eq!(center, Vec2::new(90.0, 10.0));
    }

    #[test]
    fn oversized_box_is_centered() {
        let surface = Surface::new(10.0, 100.0);
        let mut center = Vec2::new(2.0, 50.0);
        surface.confine(&mut center, 20.0);
        assert!((center.x - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn contains_points() {
        let surface = Surface::new(10.0, 10.0);
        assert!(surface.contains(Vec2::new(0.0, 10.0)));
        assert!(!surface.contains(Vec2::new(-0.1, 5.0)));
        assert_eq!(surface.center(), Vec2::new(5.0, 5.0));
    }
}
