use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, Encoder, IntCounter,
    IntCounterVec, IntGauge, TextEncoder,
};

// Prometheus metrics (default registry)
pub static EVENTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "phone_home_events_total",
        "Phone-home events applied, by event kind",
        &["event"]
    )
    .expect("register events_total")
});

pub static BACKEND_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "phone_home_backend_errors_total",
        "Backend store operations that failed"
    )
    .expect("register backend_errors_total")
});

pub static KNOWN_INSTANCES: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "phone_home_known_instances",
        "Instance ids returned by the most recent enumeration"
    )
    .expect("register known_instances")
});

/// Label used for `EVENTS_TOTAL`; unknown names collapse into `other`.
pub fn event_label(event: &crate::EventName) -> &'static str {
    match event {
        crate::EventName::Create => "create",
        crate::EventName::Delete => "delete",
        crate::EventName::Other(_) => "other",
    }
}

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
