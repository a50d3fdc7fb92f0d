/// A 2D vector in surface coordinates (f64 to keep step arithmetic exact
/// and reproducible across runs).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Magnitude of the vector.
    pub fn mag(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector pointing in the same direction.
    /// Returns the zero vector for a zero input rather than NaN.
    pub fn norm(self) -> Self {
        let m = self.mag();
        if m == 0.0 {
            Self::ZERO
        } else {
            Self::new(self.x / m, self.y / m)
        }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).mag()
    }

    /// True when both components are finite (no NaN/inf crept in).
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::AddAssign for Point {
    fn add_assign(&mut self, other: Point) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;

    fn mul(self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }
}

impl std::ops::Div<f64> for Point {
    type Output = Point;

    fn div(self, scalar: f64) -> Point {
        Point::new(self.x / scalar, self.y / scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(a - b, Point::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(a / 2.0, Point::new(0.5, 1.0));
    }

    #[test]
    fn magnitude_and_norm() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.mag(), 5.0);
        assert_eq!(p.norm(), Point::new(0.6, 0.8));
        assert_eq!(p.norm().mag(), 1.0);
    }

    #[test]
    fn norm_of_zero_is_zero() {
        assert_eq!(Point::ZERO.norm(), Point::ZERO);
    }

    #[test]
    fn distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 7.0);
        assert_eq!(a.distance_to(b), 7.0);
    }
}
