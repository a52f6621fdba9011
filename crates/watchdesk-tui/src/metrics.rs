use metrics::{counter, gauge};
use std::net::SocketAddr;
use std::sync::OnceLock;
use watchdesk_core::Status;

static METRICS_INIT: OnceLock<()> = OnceLock::new();

/// Installs the Prometheus exporter once. Without an address the macros
/// below record into the no-op recorder.
pub fn init_metrics(listen: Option<SocketAddr>) -> anyhow::Result<()> {
    let Some(addr) = listen else {
        return Ok(());
    };
    if METRICS_INIT.get().is_some() {
        return Ok(());
    }
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    let _ = METRICS_INIT.set(());
    tracing::info!("Metrics exporter listening on http://{}", addr);
    Ok(())
}

pub fn record_view(rows: usize, total: usize) {
    counter!("view_recomputes_total").increment(1);
    gauge!("view_rows").set(rows as f64);
    gauge!("records_total").set(total as f64);
}

pub fn record_status_toggle(status: Status) {
    counter!("status_toggles_total", "status" => status.as_str()).increment(1);
}

pub fn record_delete_requested() {
    counter!("delete_requests_total").increment(1);
}

pub fn record_load_failure() {
    counter!("load_failures_total").increment(1);
}
