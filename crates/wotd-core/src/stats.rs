//! Request counters and human-readable bot statistics.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::{domain::UserId, selector::CycleProgress};

/// Monotonic per-process request accounting.
#[derive(Clone, Debug, Default)]
pub struct RequestStats {
    pub total_requests: u64,
    unique_users: HashSet<i64>,
}

impl RequestStats {
    pub fn record(&mut self, user_id: UserId) {
        self.total_requests += 1;
        self.unique_users.insert(user_id.0);
    }

    pub fn unique_users(&self) -> usize {
        self.unique_users.len()
    }
}

/// Elapsed time as `"{d}d {h}h {m}m"`, dropping leading zero units.
pub fn format_uptime(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - since).num_seconds().max(0);
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let mins = (secs % 3600) / 60;

    if days > 0 {
        return format!("{days}d {hours}h {mins}m");
    }
    if hours > 0 {
        return format!("{hours}h {mins}m");
    }
    format!("{mins}m")
}

/// Aggregated snapshot for the /stats command. Pure derivation; holds no
/// state of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotStats {
    pub total_words: usize,
    pub used_words: usize,
    pub remaining_words: usize,
    pub cycle_progress_percent: u32,
    pub total_requests: u64,
    pub unique_users: usize,
    pub uptime: String,
}

impl BotStats {
    pub fn collect(
        progress: CycleProgress,
        requests: &RequestStats,
        since: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            total_words: progress.total,
            used_words: progress.used,
            remaining_words: progress.remaining,
            cycle_progress_percent: progress.percent_used,
            total_requests: requests.total_requests,
            unique_users: requests.unique_users(),
            uptime: format_uptime(since, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn uptime_drops_leading_zero_units() {
        assert_eq!(format_uptime(t0(), t0() + Duration::minutes(5)), "5m");
        assert_eq!(
            format_uptime(t0(), t0() + Duration::hours(2) + Duration::minutes(5)),
            "2h 5m"
        );
        assert_eq!(
            format_uptime(
                t0(),
                t0() + Duration::days(2) + Duration::hours(0) + Duration::minutes(7)
            ),
            "2d 0h 7m"
        );
        assert_eq!(format_uptime(t0(), t0()), "0m");
    }

    #[test]
    fn request_stats_count_unique_users() {
        let mut stats = RequestStats::default();
        stats.record(UserId(1));
        stats.record(UserId(1));
        stats.record(UserId(2));

        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.unique_users(), 2);
    }

    #[test]
    fn collect_combines_progress_and_requests() {
        let progress = CycleProgress {
            total: 10,
            used: 4,
            remaining: 6,
            percent_used: 40,
        };
        let mut requests = RequestStats::default();
        requests.record(UserId(9));

        let stats = BotStats::collect(
            progress,
            &requests,
            t0(),
            t0() + Duration::hours(1) + Duration::minutes(30),
        );
        assert_eq!(stats.total_words, 10);
        assert_eq!(stats.cycle_progress_percent, 40);
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.unique_users, 1);
        assert_eq!(stats.uptime, "1h 30m");
    }
}
