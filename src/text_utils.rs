/// Formats seconds as `mm:ss`. Minutes are not wrapped into hours.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "00:00".to_string();
    }
    let total = secs.floor() as u64;
    let minutes = total / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// `03:12 / 04:05`
pub fn format_progress(position: f64, duration: f64) -> String {
    format!("{} / {}", format_time(position), format_time(duration))
}
