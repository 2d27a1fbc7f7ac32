#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn cross(self, w: Vec2) -> f64 {
        self.x * w.y - self.y * w.x
    }

    pub fn dot(self, w: Vec2) -> f64 {
        self.x * w.x + self.y * w.y
    }

    pub fn add(self, w: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + w.x,
            y: self.y + w.y,
        }
    }

    pub fn subtract(self, w: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - w.x,
            y: self.y - w.y,
        }
    }

    pub fn scale(self, k: f64) -> Vec2 {
        Vec2 {
            x: self.x * k,
            y: self.y * k,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis aligned rectangle in world units, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn centered(center: Vec2, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.,
            center.y - height / 2.,
            width,
            height,
        )
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2., self.top + self.height / 2.)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.left = center.x - self.width / 2.;
        self.top = center.y - self.height / 2.;
    }

    pub fn set_bottom(&mut self, bottom: f64) {
        self.top = bottom - self.height;
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    fn edges(&self) -> [(Vec2, Vec2); 4] {
        let top_left = Vec2::new(self.left, self.top);
        let top_right = Vec2::new(self.right(), self.top);
        let bottom_right = Vec2::new(self.right(), self.bottom());
        let bottom_left = Vec2::new(self.left, self.bottom());
        [
            (top_left, top_right),
            (top_right, bottom_right),
            (bottom_right, bottom_left),
            (bottom_left, top_left),
        ]
    }

    /// True if any part of the segment `a`-`b` lies inside or on the rectangle.
    pub fn clips(&self, a: Vec2, b: Vec2) -> bool {
        self.contains(a)
            || self.contains(b)
            || self
                .edges()
                .into_iter()
                .any(|edge| segment_intersection(edge, (a, b)).is_some())
    }
}

/// Maps `value` into `[0, period)`.
pub fn wrap(value: f64, period: f64) -> f64 {
    let wrapped = value.rem_euclid(period);
    // tiny negative inputs round up to exactly `period`
    if wrapped >= period {
        0.
    } else {
        wrapped
    }
}

pub fn segment_intersection(segment_a: (Vec2, Vec2), segment_b: (Vec2, Vec2)) -> Option<Vec2> {
    // https://stackoverflow.com/questions/563198/how-do-you-detect-where-two-line-segments-intersect

    let (p, p1) = segment_a;
    let r = p1.subtract(p);

    let (q, q1) = segment_b;
    let s = q1.subtract(q);

    let rs = r.cross(s);
    let q_p = q.subtract(p);
    let qpr = q_p.cross(r);

    if rs == 0f64 && qpr == 0f64 {
        // collinear
        let rr = r.dot(r);
        if rr == 0f64 {
            // first segment is a point, test it against the second one
            if s.dot(s) == 0f64 {
                return (q_p.dot(q_p) == 0f64).then_some(p);
            }
            return segment_intersection(segment_b, segment_a).map(|_| p);
        }
        let t0 = q_p.dot(r) / rr;
        let t1 = t0 + s.dot(r) / rr;
        let (t0, t1) = if t0 < t1 { (t0, t1) } else { (t1, t0) };

        if t0 > 1. || t1 < 0. {
            // collinear, disjoint
            None
        } else {
            Some(p.add(r.scale(t0.max(0.))))
        }
    } else if rs == 0f64 {
        // parallel, not intersecting
        None
    } else {
        let t = q_p.cross(s) / rs;
        let u = qpr / rs;
        if (0f64..=1f64).contains(&t) && (0f64..=1f64).contains(&u) {
            Some(p.add(r.scale(t)))
        } else {
            None
        }
    }
}


#[cfg(test)]
mod rect_tests {
    use super::*;

    fn rect() -> Rect {
        Rect::centered(Vec2::new(100., 100.), 30., 30.)
    }

    #[test]
    fn centered_bounds() {
        let r = rect();
        assert_eq!(r.left, 85.);
        assert_eq!(r.top, 85.);
        assert_eq!(r.right(), 115.);
        assert_eq!(r.bottom(), 115.);
        assert_eq!(r.center(), Vec2::new(100., 100.));
    }

    #[test]
    fn segment_inside() {
        assert!(rect().clips(Vec2::new(95., 100.), Vec2::new(105., 100.)));
    }

    #[test]
    fn segment_crossing() {
        assert!(rect().clips(Vec2::new(0., 100.), Vec2::new(200., 100.)));
        assert!(rect().clips(Vec2::new(0., 0.), Vec2::new(200., 200.)));
    }

    #[test]
    fn segment_touching_bottom() {
        assert!(rect().clips(Vec2::new(0., 115.), Vec2::new(200., 115.)));
    }

    #[test]
    fn segment_outside() {
        assert!(!rect().clips(Vec2::new(0., 116.), Vec2::new(200., 116.)));
        assert!(!rect().clips(Vec2::new(0., 0.), Vec2::new(80., 200.)));
    }

    #[test]
    fn wrap_range() {
        assert_eq!(wrap(-1., 500.), 499.);
        assert_eq!(wrap(500., 500.), 0.);
        assert_eq!(wrap(1250., 500.), 250.);
        assert_eq!(wrap(-1e-20, 500.), 0.);
    }
}
