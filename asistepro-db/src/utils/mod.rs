use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the precision the store keeps (microseconds), so a value written
/// and read back compares equal.
pub fn store_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
