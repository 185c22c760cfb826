use foundation::geo::LatLng;

use crate::region::RegionId;
use crate::tier::ZoomTier;

/// Identifies one boundary chunk: a zoom tier plus a spatial region.
///
/// Keys are content-addressed, so out-of-order load completion is safe and
/// duplicate loads for the same key converge on identical payloads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkKey {
    pub tier: ZoomTier,
    pub region: RegionId,
}

impl ChunkKey {
    pub fn new(tier: ZoomTier, region: RegionId) -> Self {
        Self { tier, region }
    }

    /// The key for whatever chunk covers `center` at the given map zoom.
    pub fn for_view(zoom: f64, center: LatLng) -> Self {
        Self {
            tier: ZoomTier::from_zoom_level(zoom),
            region: RegionId::for_position(center),
        }
    }

    /// Stable composite key used for durable records and fetch URLs.
    pub fn storage_key(&self) -> String {
        format!("{}-{}", self.tier, self.region)
    }
}

impl std::fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.tier, self.region)
    }
}
