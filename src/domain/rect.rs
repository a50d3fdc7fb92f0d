use super::Point;

/// One of the four quadrants of a rectangle, in screen orientation
/// (y grows downward, so north is the smaller y half).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::Nw, Quadrant::Ne, Quadrant::Sw, Quadrant::Se];
}

/// Axis-aligned rectangle given by its min corner and size.
/// Backs both the surface bounds and the quadtree node regions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    min: Point,
    width: f64,
    height: f64,
}

impl Rect {
    pub const fn new(min: Point, width: f64, height: f64) -> Self {
        Self { min, width, height }
    }

    /// Rectangle covering a surface of the given pixel dimensions.
    pub const fn surface(width: f64, height: f64) -> Self {
        Self::new(Point::new(0.0, 0.0), width, height)
    }

    pub const fn width(&self) -> f64 {
        self.width
    }

    pub const fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.min.x + self.width / 2.0, self.min.y + self.height / 2.0)
    }

    /// Min-inclusive, max-exclusive containment so a point on a shared
    /// quadrant boundary belongs to exactly one quadrant.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x
            && p.x < self.min.x + self.width
            && p.y >= self.min.y
            && p.y < self.min.y + self.height
    }

    /// Wrap a point back into the rectangle toroidally. Points already
    /// inside come back unchanged.
    pub fn wrap(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.min.x).rem_euclid(self.width) + self.min.x,
            (p.y - self.min.y).rem_euclid(self.height) + self.min.y,
        )
    }

    /// The quarter of this rectangle covering the given quadrant.
    pub fn quadrant(&self, q: Quadrant) -> Self {
        let w = self.width / 2.0;
        let h = self.height / 2.0;
        let min = match q {
            Quadrant::Nw => self.min,
            Quadrant::Ne => Point::new(self.min.x + w, self.min.y),
            Quadrant::Sw => Point::new(self.min.x, self.min.y + h),
            Quadrant::Se => Point::new(self.min.x + w, self.min.y + h),
        };
        Self::new(min, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment() {
        let r = Rect::surface(10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.9, 9.9)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn quadrant_split() {
        let r = Rect::surface(10.0, 10.0);
        assert_eq!(r.quadrant(Quadrant::Nw), Rect::new(Point::new(0.0, 0.0), 5.0, 5.0));
        assert_eq!(r.quadrant(Quadrant::Ne), Rect::new(Point::new(5.0, 0.0), 5.0, 5.0));
        assert_eq!(r.quadrant(Quadrant::Sw), Rect::new(Point::new(0.0, 5.0), 5.0, 5.0));
        assert_eq!(r.quadrant(Quadrant::Se), Rect::new(Point::new(5.0, 5.0), 5.0, 5.0));
    }

    #[test]
    fn boundary_point_lands_in_exactly_one_quadrant() {
        let r = Rect::surface(10.0, 10.0);
        let p = Point::new(5.0, 5.0);
        let owners = Quadrant::ALL
            .iter()
            .filter(|&&q| r.quadrant(q).contains(p))
            .count();
        assert_eq!(owners, 1);
    }

    #[test]
    fn toroidal_wrap() {
        let r = Rect::surface(64.0, 64.0);
        assert_eq!(r.wrap(Point::new(11.5, 9.5)), Point::new(11.5, 9.5));
        assert_eq!(r.wrap(Point::new(70.0, -2.0)), Point::new(6.0, 62.0));
    }

    #[test]
    fn center() {
        let r = Rect::new(Point::new(2.0, 4.0), 6.0, 8.0);
        assert_eq!(r.center(), Point::new(5.0, 8.0));
    }
}
