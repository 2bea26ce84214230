//! Collision geometry for rockets and spikes
//!
//! Spikes are triangles and the rocket is an axis-aligned box. The overlap
//! test is a sampled approximation, not an exact polygon test: the game was
//! balanced against it, so a thin spike tip can slip between samples.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `(x, y)` is the lower-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.h
    }

    /// Strict AABB overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.top()
            && self.top() > other.y
    }

    /// The 9 sample points: corners, centre, edge midpoints
    pub fn sample_points(&self) -> [Vec2; 9] {
        let (x0, y0) = (self.x, self.y);
        let (x1, y1) = (self.right(), self.top());
        let (cx, cy) = (self.x + self.w / 2.0, self.y + self.h / 2.0);
        [
            Vec2::new(x0, y0),
            Vec2::new(x1, y0),
            Vec2::new(x0, y1),
            Vec2::new(x1, y1),
            Vec2::new(cx, cy),
            Vec2::new(cx, y0),
            Vec2::new(cx, y1),
            Vec2::new(x0, cy),
            Vec2::new(x1, cy),
        ]
    }
}

/// A spike hitbox
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// Spike filling `rect`; a top spike hangs down (apex at the bottom edge),
    /// a bottom spike points up (apex at the top edge)
    pub fn spike(rect: &Rect, pointing_down: bool) -> Self {
        let mid_x = rect.x + rect.w / 2.0;
        if pointing_down {
            Self::new(
                Vec2::new(rect.x, rect.top()),
                Vec2::new(rect.right(), rect.top()),
                Vec2::new(mid_x, rect.y),
            )
        } else {
            Self::new(
                Vec2::new(rect.x, rect.y),
                Vec2::new(rect.right(), rect.y),
                Vec2::new(mid_x, rect.top()),
            )
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        point_in_triangle(p, self.a, self.b, self.c)
    }
}

/// Signed area of (p, a, b); sign tells which side of edge a->b the point is on
#[inline]
fn edge_sign(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// Same-sign test against all three edges. Points on an edge are inside.
pub fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = edge_sign(p, a, b);
    let d2 = edge_sign(p, b, c);
    let d3 = edge_sign(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

/// True if any of the rectangle's 9 sample points lies inside the triangle
pub fn rect_intersects_triangle(rect: &Rect, tri: &Triangle) -> bool {
    rect.sample_points().iter().any(|&p| tri.contains(p))
}
