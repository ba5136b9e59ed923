//! Database metrics collection.

use metrics::{counter, histogram};
use std::time::Instant;

/// Times a single query and records its duration with its outcome.
///
/// Usage:
/// ```ignore
/// let timer = QueryTimer::new("count_group_invitations");
/// let result = sqlx::query_scalar::<_, i64>(...).fetch_one(executor).await;
/// timer.finish(&result);
/// result
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    /// Records `database_query_duration_seconds{query, status}`.
    pub fn finish<T>(self, result: &Result<T, sqlx::Error>) {
        histogram!(
            "database_query_duration_seconds",
            "query" => self.query_name,
            "status" => status_label(result.is_ok())
        )
        .record(self.start.elapsed().as_secs_f64());
    }
}

/// Records the end of a store transaction (`committed` or `rolled_back`).
pub fn record_transaction_outcome(outcome: &'static str) {
    counter!("database_transactions_total", "outcome" => outcome).increment(1);
}

fn status_label(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "error"
    }
}
