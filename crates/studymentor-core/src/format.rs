//! Text renderings shared by the timer, stopwatch, and stats displays.

/// `MM:SS` countdown display. Minutes are not wrapped into hours.
pub fn countdown(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Stopwatch display: `HH:MM:SS` from one hour on, `MM:SS` before.
pub fn stopwatch(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Compact duration: `45m`, `2h`, `1h 30m`.
pub fn duration(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Always-both-units total used by the daily stats line: `0h 0m`.
pub fn hours_minutes(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
