//! Human-readable byte sizes.

const BINARY_UNITS: [&str; 8] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];
const SI_UNITS: [&str; 8] = ["kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Display options for byte sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeFormat {
    /// Powers of 1000 (kB, MB, ...) instead of 1024 (KiB, MiB, ...).
    pub si: bool,
    pub decimal_places: usize,
}

impl Default for SizeFormat {
    fn default() -> Self {
        Self {
            si: false,
            decimal_places: 1,
        }
    }
}

/// Largest number of decimal places a size is rendered with.
pub const MAX_DECIMAL_PLACES: usize = 6;

impl SizeFormat {
    pub fn format(&self, bytes: u64) -> String {
        if (bytes as f64) < threshold(self.si) {
            return format!("{} B", bytes);
        }
        format_scaled(bytes as f64, self.si, self.decimal_places)
    }
}

fn threshold(si: bool) -> f64 {
    if si {
        1000.0
    } else {
        1024.0
    }
}

/// Format a byte count, e.g. `1234567` as `"1.2 MiB"`.
///
/// Values below the threshold (1024, or 1000 with `si`) are printed as plain
/// bytes. Larger values are scaled until the rounded magnitude drops below the
/// threshold; YiB/YB is the largest unit used.
pub fn format_human_size(bytes: i64, si: bool, decimal_places: usize) -> String {
    if (bytes.unsigned_abs() as f64) < threshold(si) {
        return format!("{} B", bytes);
    }
    format_scaled(bytes as f64, si, decimal_places)
}

/// Scale `bytes` into the first unit whose rounded value is below the threshold.
///
/// The printed number is the same rounded value the unit was chosen by.
fn format_scaled(bytes: f64, si: bool, decimal_places: usize) -> String {
    let threshold = threshold(si);
    let units = if si { &SI_UNITS } else { &BINARY_UNITS };
    let decimal_places = decimal_places.min(MAX_DECIMAL_PLACES);
    let precision = 10f64.powi(decimal_places as i32);

    let mut value = bytes;
    let mut unit = 0;
    let rounded = loop {
        value /= threshold;
        let rounded = (value * precision).round() / precision;
        if rounded.abs() < threshold || unit == units.len() - 1 {
            break rounded;
        }
        unit += 1;
    };

    format!("{:.*} {}", decimal_places, rounded, units[unit])
}
