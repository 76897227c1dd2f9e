//! Display formatting helpers.

/// Formats seconds as `HH:MM:SS`. Hours wrap at 24, so this shows time of
/// day since boot rather than a total day count.
pub fn elapsed_time(seconds: u64) -> String {
    let hours = (seconds / 3600) % 24;
    let minutes = (seconds / 60) % 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Formats a ratio in [0, 1] as a percentage with one decimal.
pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
