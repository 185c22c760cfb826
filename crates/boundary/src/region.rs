use foundation::geo::LatLng;

/// Size of a quantization cell, in degrees. 45° cells give a 4×8 world grid,
/// so adjacent pans land in already-loaded chunks most of the time.
pub const REGION_CELL_DEGREES: f64 = 45.0;

/// A fixed-size spatial cell identifying one region of the world grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId {
    pub lat_cell: i32,
    pub lng_cell: i32,
}

impl RegionId {
    pub fn new(lat_cell: i32, lng_cell: i32) -> Self {
        Self { lat_cell, lng_cell }
    }

    /// Quantizes a position into its region cell.
    pub fn for_position(p: LatLng) -> Self {
        Self {
            lat_cell: ((p.lat + 90.0) / REGION_CELL_DEGREES).floor() as i32,
            lng_cell: ((p.lng + 180.0) / REGION_CELL_DEGREES).floor() as i32,
        }
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}-{}", self.lat_cell, self.lng_cell)
    }
}
