//! Pickable shapes, expressed in the owning entity's local space.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingCircle {
    pub center: Vec2,
    pub radius: f32,
}

impl BoundingCircle {
    /// Strict containment: points on the circle are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        let d = point - self.center;
        d.x * d.x + d.y * d.y < self.radius * self.radius
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSquare {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl BoundingSquare {
    /// Half-open: `[left, right) x [bottom, top)`.
    pub fn contains(&self, point: Vec2) -> bool {
        self.left <= point.x && point.x < self.right && self.bottom <= point.y && point.y < self.top
    }
}

/// Shape used by hit-testing. An entity carries at most one.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub enum BoundingShape {
    Circle(BoundingCircle),
    Square(BoundingSquare),
}

impl BoundingShape {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        BoundingShape::Circle(BoundingCircle { center, radius })
    }

    pub fn square(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        BoundingShape::Square(BoundingSquare {
            left,
            right,
            bottom,
            top,
        })
    }

    /// Test a point already transformed into local space.
    pub fn contains_local(&self, point: Vec2) -> bool {
        match self {
            BoundingShape::Circle(circle) => circle.contains(point),
            BoundingShape::Square(square) => square.contains(point),
        }
    }
}
