/// Geographic primitives (WGS84 degrees)
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned geographic bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub min: LatLng,
    pub max: LatLng,
}

impl GeoBounds {
    pub fn of_point(p: LatLng) -> Self {
        Self { min: p, max: p }
    }

    pub fn extend(&mut self, p: LatLng) {
        self.min.lat = self.min.lat.min(p.lat);
        self.min.lng = self.min.lng.min(p.lng);
        self.max.lat = self.max.lat.max(p.lat);
        self.max.lng = self.max.lng.max(p.lng);
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min.lat + self.max.lat) / 2.0,
            (self.min.lng + self.max.lng) / 2.0,
        )
    }

    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let mut bounds = Self::of_point(*points.first()?);
        for p in points.iter().skip(1) {
            bounds.extend(*p);
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoBounds, LatLng};

    #[test]
    fn bounds_accumulate_points() {
        let pts = vec![
            LatLng::new(10.0, -5.0),
            LatLng::new(-2.0, 8.0),
            LatLng::new(4.0, 1.0),
        ];
        let b = GeoBounds::from_points(&pts).unwrap();
        assert_eq!(b.min, LatLng::new(-2.0, -5.0));
        assert_eq!(b.max, LatLng::new(10.0, 8.0));

        let c = b.center();
        assert!((c.lat - 4.0).abs() < 1e-9);
        assert!((c.lng - 1.5).abs() < 1e-9);
    }

    #[test]
    fn empty_points_give_no_bounds() {
        assert!(GeoBounds::from_points(&[]).is_none());
    }
}
