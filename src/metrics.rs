use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, HistogramVec,
    IntCounter, IntCounterVec,
};

lazy_static::lazy_static! {
    pub static ref QUERIES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "retrieval_queries_total", "Total queries", &["scope"]
    ).unwrap();
    pub static ref QUERY_DURATION: HistogramVec = register_histogram_vec!(
        "retrieval_query_duration_seconds", "Upstream query duration", &["scope"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    ).unwrap();
    pub static ref TOP_K_CLAMPED_TOTAL: IntCounter = register_int_counter!(
        "retrieval_top_k_clamped_total", "Queries whose top_k was capped at the maximum"
    ).unwrap();
    pub static ref UPSTREAM_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "retrieval_upstream_errors_total", "Failed upstream calls", &["operation"]
    ).unwrap();
    pub static ref STATS_REQUESTS_TOTAL: IntCounter = register_int_counter!(
        "retrieval_stats_requests_total", "Index stats requests"
    ).unwrap();
}

pub fn init() {
    lazy_static::initialize(&QUERIES_TOTAL);
    lazy_static::initialize(&QUERY_DURATION);
    lazy_static::initialize(&TOP_K_CLAMPED_TOTAL);
    lazy_static::initialize(&UPSTREAM_ERRORS_TOTAL);
    lazy_static::initialize(&STATS_REQUESTS_TOTAL);
}

/// Namespaces are caller input, so only whether one was given becomes a label.
pub fn scope_label(namespace: Option<&str>) -> &'static str {
    match namespace {
        Some(ns) if !ns.is_empty() => "named",
        _ => "default",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_label_is_bounded() {
        assert_eq!(scope_label(None), "default");
        assert_eq!(scope_label(Some("")), "default");
        assert_eq!(scope_label(Some("faq")), "named");
        assert_eq!(scope_label(Some("tenant-81723")), "named");
    }
}
