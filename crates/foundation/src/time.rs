/// Time primitives
///
/// News feeds and chunk records carry epoch milliseconds, so that is the
/// canonical unit here. Derived quantities (age in hours, day buckets) are
/// computed on demand rather than stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64); // milliseconds since the Unix epoch

pub const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

impl Timestamp {
    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn millis(&self) -> i64 {
        self.0
    }

    /// Hours elapsed from `self` until `later`. Negative if `later` is earlier.
    pub fn hours_until(&self, later: Timestamp) -> f64 {
        (later.0 - self.0) as f64 / MILLIS_PER_HOUR as f64
    }

    /// Whole days since the epoch, for calendar-day bucketing (UTC).
    pub fn utc_day(&self) -> i64 {
        self.0.div_euclid(MILLIS_PER_DAY)
    }

    pub fn same_utc_day(&self, other: Timestamp) -> bool {
        self.utc_day() == other.utc_day()
    }
}

#[cfg(test)]
mod tests {
    use super::{MILLIS_PER_DAY, MILLIS_PER_HOUR, Timestamp};

    #[test]
    fn hours_until_is_signed() {
        let a = Timestamp(0);
        let b = Timestamp(3 * MILLIS_PER_HOUR);
        assert!((a.hours_until(b) - 3.0).abs() < 1e-9);
        assert!((b.hours_until(a) + 3.0).abs() < 1e-9);
    }

    #[test]
    fn utc_day_buckets_at_midnight() {
        let just_before = Timestamp(MILLIS_PER_DAY - 1);
        let midnight = Timestamp(MILLIS_PER_DAY);
        assert!(!just_before.same_utc_day(midnight));
        assert!(midnight.same_utc_day(Timestamp(MILLIS_PER_DAY + 12 * MILLIS_PER_HOUR)));
    }

    #[test]
    fn utc_day_handles_pre_epoch() {
        // div_euclid keeps day boundaries consistent before 1970.
        assert_eq!(Timestamp(-1).utc_day(), -1);
        assert_eq!(Timestamp(-MILLIS_PER_DAY).utc_day(), -1);
    }
}
