//! Position reports.

use nav_core::Point;

/// One position report from the device.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fix {
    pub position:     Point,
    /// Device timestamp, milliseconds since an arbitrary epoch.
    pub timestamp_ms: u64,
    /// Compass/course heading in degrees, when the device reports one.
    pub heading_hint: Option<f64>,
}

impl Fix {
    pub fn new(lat: f64, lng: f64, timestamp_ms: u64) -> Self {
        Self { position: Point::new(lat, lng), timestamp_ms, heading_hint: None }
    }

    pub fn at(position: Point, timestamp_ms: u64) -> Self {
        Self { position, timestamp_ms, heading_hint: None }
    }

    #[must_use]
    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading_hint = Some(heading);
        self
    }
}
