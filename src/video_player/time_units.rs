// SPDX-License-Identifier: MPL-2.0
//! Time formatting for the transport controls.

/// Formats a position as `m:ss`, minutes unpadded.
///
/// Negative and non-finite values format as `0:00`.
///
/// # Examples
///
/// ```
/// use showcase_player::video_player::time_units::format_timestamp;
///
/// assert_eq!(format_timestamp(0.0), "0:00");
/// assert_eq!(format_timestamp(65.9), "1:05");
/// assert_eq!(format_timestamp(f64::NAN), "0:00");
/// ```
pub fn format_timestamp(secs: f64) -> String {
    let whole = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Fraction of `duration_secs` reached at `position_secs`, clamped to `[0, 1]`.
///
/// Returns 0 while the duration is unknown (zero, negative or non-finite).
#[inline]
pub fn progress_fraction(position_secs: f64, duration_secs: f64) -> f64 {
    if !duration_secs.is_finite() || duration_secs <= 0.0 || !position_secs.is_finite() {
        return 0.0;
    }
    (position_secs / duration_secs).clamp(0.0, 1.0)
}
