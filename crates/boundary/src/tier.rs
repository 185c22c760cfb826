/// Chunk detail tier, mapped from a continuous map zoom level.
///
/// Tiers are deliberately coarse: boundary chunks are published per tier, so
/// adjacent zoom steps within a band reuse the same chunk.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ZoomTier {
    Low,
    Medium,
    High,
}

impl ZoomTier {
    pub const ALL: [ZoomTier; 3] = [ZoomTier::Low, ZoomTier::Medium, ZoomTier::High];

    /// Threshold bands: zoom ≤ 3 is low, ≤ 5 is medium, everything above is high.
    pub fn from_zoom_level(zoom: f64) -> Self {
        if zoom <= 3.0 {
            ZoomTier::Low
        } else if zoom <= 5.0 {
            ZoomTier::Medium
        } else {
            ZoomTier::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoomTier::Low => "low",
            ZoomTier::Medium => "medium",
            ZoomTier::High => "high",
        }
    }
}

impl std::fmt::Display for ZoomTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
