use std::time::Duration;

const NANOS_PER_MICROSECOND: u128 = 1_000;
const NANOS_PER_MILLISECOND: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Largest unit first.
const UNITS: [(u128, &str); 6] = [
    (NANOS_PER_HOUR, "h"),
    (NANOS_PER_MINUTE, "m"),
    (NANOS_PER_SECOND, "s"),
    (NANOS_PER_MILLISECOND, "ms"),
    (NANOS_PER_MICROSECOND, "µs"),
    (1, "ns"),
];

const DEFAULT_MAX_COMPONENTS: usize = 2;

/// Compact two-component rendering, e.g. `1s 200ms` or `350µs`.
pub fn format_duration(duration: Duration) -> String {
    format_duration_with(duration, DEFAULT_MAX_COMPONENTS)
}

pub fn format_duration_with(duration: Duration, max_components: usize) -> String {
    let total_nanos = duration.as_nanos();
    if total_nanos == 0 {
        return "<1ns".to_string();
    }

    let mut remaining = total_nanos;
    let mut parts: Vec<String> = Vec::with_capacity(max_components.max(1));
    for (unit_nanos, suffix) in UNITS {
        if parts.len() >= max_components.max(1) {
            break;
        }
        let value = remaining / unit_nanos;
        if value == 0 {
            if !parts.is_empty() {
                break;
            }
            continue;
        }
        parts.push(format!("{value}{suffix}"));
        remaining %= unit_nanos;
        if remaining == 0 {
            break;
        }
    }
    parts.join(" ")
}
