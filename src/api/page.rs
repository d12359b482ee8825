//! Dashboard page served at `/`.

use crate::tank::Reading;

/// Page template with `%LEVEL%`, `%PCT%` and `%DIST%` placeholders.
pub const TEMPLATE: &str = include_str!("index.html");

/// Render the dashboard for a reading.
///
/// Values are substituted as plain numbers with one decimal place so the
/// embedded script can use them directly.
pub fn render(reading: &Reading) -> String {
    TEMPLATE
        .replace("%LEVEL%", &format!("{:.1}", reading.water_level_mm))
        .replace("%PCT%", &format!("{:.1}", reading.percent))
        .replace("%DIST%", &format!("{:.1}", reading.distance_mm))
}
