//! Metrics declaration and recording helpers.
//!
//! Every helper compiles to nothing when the `metrics` feature is disabled.

use std::time::Duration;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Track number of memo table hits.
    pub static ref MEMO_HIT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "rosterbox_memo_hit_total",
            "Total number of lookups answered from a memo table."
        );
        "rosterbox_memo_hit_total"
    };
    /// Track number of memo table misses that started a fetch.
    pub static ref MEMO_MISS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "rosterbox_memo_miss_total",
            "Total number of lookups that started an upstream fetch."
        );
        "rosterbox_memo_miss_total"
    };
    /// Track number of lookups that joined an in-flight fetch.
    pub static ref MEMO_JOINED_COUNTER: &'static str = {
        metrics::describe_counter!(
            "rosterbox_memo_joined_total",
            "Total number of lookups that awaited a fetch already in flight."
        );
        "rosterbox_memo_joined_total"
    };
    /// Histogram of upstream fetch duration.
    pub static ref UPSTREAM_FETCH_DURATION: &'static str = {
        metrics::describe_histogram!(
            "rosterbox_upstream_fetch_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of memoized upstream fetches in seconds."
        );
        "rosterbox_upstream_fetch_duration_seconds"
    };
    /// Track number of failed upstream fetches.
    pub static ref UPSTREAM_FAILURE_COUNTER: &'static str = {
        metrics::describe_counter!(
            "rosterbox_upstream_failure_total",
            "Total number of memoized upstream fetches that failed."
        );
        "rosterbox_upstream_failure_total"
    };
    /// Track resolver attempts by outcome.
    pub static ref RESOLVER_ATTEMPT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "rosterbox_resolver_attempt_total",
            "Total number of endpoint candidates tried by the resolver."
        );
        "rosterbox_resolver_attempt_total"
    };
}

/// How a memo table answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoOutcome {
    Hit,
    Miss,
    Joined,
}

#[cfg(feature = "metrics")]
#[inline]
pub fn record_memo_lookup(table: &str, outcome: MemoOutcome) {
    let counter = match outcome {
        MemoOutcome::Hit => *MEMO_HIT_COUNTER,
        MemoOutcome::Miss => *MEMO_MISS_COUNTER,
        MemoOutcome::Joined => *MEMO_JOINED_COUNTER,
    };
    metrics::counter!(counter, "table" => table.to_string()).increment(1);
}

#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_memo_lookup(_table: &str, _outcome: MemoOutcome) {}

/// Records the duration and outcome of one upstream fetch.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_fetch(table: &str, duration: Duration, success: bool) {
    metrics::histogram!(*UPSTREAM_FETCH_DURATION, "table" => table.to_string())
        .record(duration.as_secs_f64());
    if !success {
        metrics::counter!(*UPSTREAM_FAILURE_COUNTER, "table" => table.to_string()).increment(1);
    }
}

#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_fetch(_table: &str, _duration: Duration, _success: bool) {}

#[cfg(feature = "metrics")]
#[inline]
pub fn record_resolver_attempt(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!(*RESOLVER_ATTEMPT_COUNTER, "outcome" => outcome).increment(1);
}

#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_resolver_attempt(_success: bool) {}
