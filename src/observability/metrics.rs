use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub order_operations_total: IntCounterVec,
    pub active_sessions: IntGauge,
    pub asset_requests_total: IntCounterVec,
    pub asset_fetch_seconds: HistogramVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let order_operations_total = IntCounterVec::new(
            Opts::new(
                "order_operations_total",
                "Order operations by kind and outcome",
            ),
            &["operation", "outcome"],
        )
        .expect("valid order_operations_total metric");

        let active_sessions =
            IntGauge::new("active_sessions", "Current number of dashboard sessions")
                .expect("valid active_sessions metric");

        let asset_requests_total = IntCounterVec::new(
            Opts::new("asset_requests_total", "Asset requests by cache result"),
            &["result"],
        )
        .expect("valid asset_requests_total metric");

        let asset_fetch_seconds = HistogramVec::new(
            HistogramOpts::new("asset_fetch_seconds", "Time to serve an asset in seconds"),
            &["result"],
        )
        .expect("valid asset_fetch_seconds metric");

        registry
            .register(Box::new(order_operations_total.clone()))
            .expect("register order_operations_total");
        registry
            .register(Box::new(active_sessions.clone()))
            .expect("register active_sessions");
        registry
            .register(Box::new(asset_requests_total.clone()))
            .expect("register asset_requests_total");
        registry
            .register(Box::new(asset_fetch_seconds.clone()))
            .expect("register asset_fetch_seconds");

        Self {
            registry,
            order_operations_total,
            active_sessions,
            asset_requests_total,
            asset_fetch_seconds,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
