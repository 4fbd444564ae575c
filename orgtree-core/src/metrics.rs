#![forbid(unsafe_code)]

use std::time::Duration;

use metrics::{counter, histogram};

const METRIC_CACHE_HITS: &str = "orgtree_resolver_cache_hits_total";
const METRIC_CACHE_MISSES: &str = "orgtree_resolver_cache_misses_total";
const METRIC_RESOLUTION: &str = "orgtree_resolution_seconds";
const METRIC_LOADS: &str = "orgtree_loads_total";

pub fn record_cache_hit() {
    counter!(METRIC_CACHE_HITS).increment(1);
}

pub fn record_cache_miss() {
    counter!(METRIC_CACHE_MISSES).increment(1);
}

pub fn record_resolution(elapsed: Duration) {
    histogram!(METRIC_RESOLUTION).record(elapsed.as_secs_f64());
}

pub fn record_load(outcome: &'static str) {
    counter!(METRIC_LOADS, "outcome" => outcome).increment(1);
}
