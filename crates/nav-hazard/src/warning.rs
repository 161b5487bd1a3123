//! Proximity warnings for the display layer.

use nav_core::Point;

use crate::{CongestionZone, Severity};

/// Nearest zone of at least `min_severity` whose `radius_m + buffer_m`
/// contains `position`.
///
/// Ties on distance keep the earlier zone.
pub fn congestion_warning<'a>(
    position:     Point,
    zones:        &'a [CongestionZone],
    buffer_m:     f64,
    min_severity: Severity,
) -> Option<&'a CongestionZone> {
    zones
        .iter()
        .filter(|z| z.severity >= min_severity)
        .map(|z| (position.distance_m(z.point), z))
        .filter(|(d, z)| *d <= z.radius_m + buffer_m)
        .fold(None, |best: Option<(f64, &CongestionZone)>, cur| match best {
            Some(b) if b.0 <= cur.0 => Some(b),
            _ => Some(cur),
        })
        .map(|(_, z)| z)
}
