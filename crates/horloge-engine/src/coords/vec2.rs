use core::ops::{Add, Mul, Sub};

/// 2D vector in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Offset of length `len` at `degrees` clockwise from straight up.
    ///
    /// Screen space has +Y down, so 0° is `(0, -len)` and 90° is `(len, 0)`.
    #[inline]
    pub fn from_dial_angle(degrees: f64, len: f32) -> Self {
        let rad = degrees.to_radians();
        Self::new(len * rad.sin() as f32, -len * rad.cos() as f32)
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn dial_angle_zero_points_up() {
        assert!(near(Vec2::from_dial_angle(0.0, 10.0), Vec2::new(0.0, -10.0)));
    }

    #[test]
    fn dial_angle_quarter_turns_go_clockwise() {
        assert!(near(Vec2::from_dial_angle(90.0, 10.0), Vec2::new(10.0, 0.0)));
        assert!(near(Vec2::from_dial_angle(180.0, 10.0), Vec2::new(0.0, 10.0)));
        assert!(near(Vec2::from_dial_angle(270.0, 10.0), Vec2::new(-10.0, 0.0)));
    }

    #[test]
    fn dial_angle_preserves_length() {
        let v = Vec2::from_dial_angle(37.5, 42.0);
        assert!((v.length() - 42.0).abs() < 1e-4);
    }
}
