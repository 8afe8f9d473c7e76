/// Course duration in tenths of an hour, rounded half up.
///
/// Missing or negative durations count as zero.
pub fn duration_tenths_of_hour(duration_minutes: Option<i32>) -> u32 {
    let minutes = duration_minutes.filter(|m| *m > 0).unwrap_or(0) as u64;
    // minutes / 60 hours == minutes / 6 tenths
    ((minutes * 10 + 30) / 60) as u32
}

/// Formats a course duration as hours with one decimal and a comma separator, e.g. `1,5`.
pub fn format_duration_hours(duration_minutes: Option<i32>) -> String {
    let tenths = duration_tenths_of_hour(duration_minutes);
    format!("{},{}", tenths / 10, tenths % 10)
}
