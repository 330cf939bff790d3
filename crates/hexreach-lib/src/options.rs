use serde::{Deserialize, Serialize};

/// Search radius used when the caller does not pick one.
pub const DEFAULT_MAX_DISTANCE: u32 = 3;

/// Rule toggles for a distance calculation.
///
/// Every rule is enabled by default. Missing fields in serialized form fall
/// back to the default, so `{}` is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DistanceOptions {
    /// Follow authored custom links between hexes.
    pub use_custom_links: bool,
    /// Honour Spatial Tear and Gravity Wave anomalies on hex edges.
    pub use_border_anomalies: bool,
    /// Treat supernovae as impassable and exit-blocking.
    pub use_supernova: bool,
    /// Flood gravity-rift clusters at zero extra cost.
    pub use_rift: bool,
    /// Block leaving a nebula once entered.
    pub use_nebula: bool,
    /// Treat asteroid fields as impassable and exit-blocking.
    pub use_asteroid: bool,
}

impl Default for DistanceOptions {
    fn default() -> Self {
        Self {
            use_custom_links: true,
            use_border_anomalies: true,
            use_supernova: true,
            use_rift: true,
            use_nebula: true,
            use_asteroid: true,
        }
    }
}

impl DistanceOptions {
    /// All terrain rules disabled; only plain adjacency, wormholes and
    /// overrides remain.
    pub fn permissive() -> Self {
        Self {
            use_custom_links: true,
            use_border_anomalies: false,
            use_supernova: false,
            use_rift: false,
            use_nebula: false,
            use_asteroid: false,
        }
    }
}
