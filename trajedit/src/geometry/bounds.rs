use crate::model::Point3;

/// Axis-aligned box over a set of waypoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    pub fn from_points<'a, I: IntoIterator<Item = &'a Point3>>(points: I) -> Option<Aabb> {
        let mut it = points.into_iter();
        let first = *it.next()?;
        let mut bb = Aabb { min: first, max: first };
        for p in it {
            bb.min = Point3::new(bb.min.x.min(p.x), bb.min.y.min(p.y), bb.min.z.min(p.z));
            bb.max = Point3::new(bb.max.x.max(p.x), bb.max.y.max(p.y), bb.max.z.max(p.z));
        }
        Some(bb)
    }
    pub fn size(&self) -> Point3 {
        self.max.sub(self.min)
    }
    pub fn center(&self) -> Point3 {
        Point3::new(
            0.5 * (self.min.x + self.max.x),
            0.5 * (self.min.y + self.max.y),
            0.5 * (self.min.z + self.max.z),
        )
    }
    pub fn max_dim(&self) -> f64 {
        let s = self.size();
        s.x.max(s.y).max(s.z)
    }
}

/// Where the orbit camera should look after a load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Framing {
    pub target: Point3,
    pub distance: f64,
}

impl Framing {
    pub fn from_bounds(bb: &Aabb, factor: f64, pad: f64) -> Framing {
        Framing { target: bb.center(), distance: bb.max_dim() * factor + pad }
    }
    // Camera sits on the (1,1,1) diagonal from the target.
    pub fn camera_position(&self) -> Point3 {
        let d = self.distance;
        self.target.add(Point3::new(d, d, d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_uses_largest_extent() {
        let pts = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 1.0, -1.0)];
        let bb = Aabb::from_points(&pts).unwrap();
        assert_eq!(bb.center(), Point3::new(1.0, 0.5, -0.5));
        let f = Framing::from_bounds(&bb, 2.5, 0.1);
        assert!((f.distance - 5.1).abs() < 1e-12);
        let cam = f.camera_position();
        assert!((cam.x - 6.1).abs() < 1e-12 && (cam.y - 5.6).abs() < 1e-12 && (cam.z - 4.6).abs() < 1e-12);
        assert!(Aabb::from_points(&[]).is_none());
    }
}
