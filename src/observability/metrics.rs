use prometheus::{
    CounterVec, Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to register metric: {0}")]
    Registration(#[from] prometheus::Error),
    #[error("Failed to encode metrics: {0}")]
    Encoding(String),
}

/// Outcome label shared by the business counters
pub fn outcome(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "error"
    }
}

/// Prometheus metrics for the hotel service
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,

    // HTTP metrics
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub http_requests_in_flight: GaugeVec,

    // Business metrics
    pub bookings_total: CounterVec,
    pub orders_total: CounterVec,
    pub order_status_updates_total: CounterVec,
    pub menu_requests_total: CounterVec,
    pub qr_codes_generated_total: CounterVec,
}

impl Metrics {
    /// Create a new metrics instance with its own registry
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new(
                "http_requests_total",
                "Total number of HTTP requests processed",
            ),
            &["method", "endpoint", "status_code"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "endpoint"],
        )?;

        let http_requests_in_flight = GaugeVec::new(
            Opts::new(
                "http_requests_in_flight",
                "Number of HTTP requests currently being processed",
            ),
            &["method", "endpoint"],
        )?;

        let bookings_total = CounterVec::new(
            Opts::new("bookings_total", "Total number of booking attempts"),
            &["status"],
        )?;

        let orders_total = CounterVec::new(
            Opts::new("orders_total", "Total number of order attempts"),
            &["order_type", "status"],
        )?;

        let order_status_updates_total = CounterVec::new(
            Opts::new(
                "order_status_updates_total",
                "Total number of order status updates",
            ),
            &["status"],
        )?;

        let menu_requests_total = CounterVec::new(
            Opts::new("menu_requests_total", "Total number of menu requests"),
            &["menu_type", "status"],
        )?;

        let qr_codes_generated_total = CounterVec::new(
            Opts::new(
                "qr_codes_generated_total",
                "Total number of menu QR codes rendered",
            ),
            &["menu_type"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(bookings_total.clone()))?;
        registry.register(Box::new(orders_total.clone()))?;
        registry.register(Box::new(order_status_updates_total.clone()))?;
        registry.register(Box::new(menu_requests_total.clone()))?;
        registry.register(Box::new(qr_codes_generated_total.clone()))?;

        info!("Prometheus metrics initialized");

        Ok(Metrics {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            bookings_total,
            orders_total,
            order_status_updates_total,
            menu_requests_total,
            qr_codes_generated_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode all metrics in Prometheus text format
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| MetricsError::Encoding(e.to_string()))?;

        String::from_utf8(buffer).map_err(|e| MetricsError::Encoding(e.to_string()))
    }

    pub fn record_http_request(
        &self,
        method: &str,
        endpoint: &str,
        status_code: u16,
        duration_seconds: f64,
    ) {
        let status_str = status_code.to_string();

        self.http_requests_total
            .with_label_values(&[method, endpoint, &status_str])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, endpoint])
            .observe(duration_seconds);
    }

    pub fn increment_in_flight(&self, method: &str, endpoint: &str) {
        self.http_requests_in_flight
            .with_label_values(&[method, endpoint])
            .inc();
    }

    pub fn decrement_in_flight(&self, method: &str, endpoint: &str) {
        self.http_requests_in_flight
            .with_label_values(&[method, endpoint])
            .dec();
    }

    pub fn record_booking(&self, success: bool) {
        self.bookings_total
            .with_label_values(&[outcome(success)])
            .inc();
    }

    pub fn record_order(&self, order_type: &str, success: bool) {
        self.orders_total
            .with_label_values(&[order_type, outcome(success)])
            .inc();
    }

    pub fn record_order_status_update(&self, success: bool) {
        self.order_status_updates_total
            .with_label_values(&[outcome(success)])
            .inc();
    }

    pub fn record_menu_request(&self, menu_type: &str, success: bool) {
        self.menu_requests_total
            .with_label_values(&[menu_type, outcome(success)])
            .inc();
    }

    pub fn record_qr_code(&self, menu_type: &str) {
        self.qr_codes_generated_total
            .with_label_values(&[menu_type])
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        assert!(Metrics::new().is_ok());
    }

    #[test]
    fn test_instances_use_separate_registries() {
        let first = Metrics::new().unwrap();
        let second = Metrics::new().unwrap();

        first.record_booking(true);

        assert!(first.encode().unwrap().contains("bookings_total{status=\"success\"} 1"));
        assert!(!second.encode().unwrap().contains("bookings_total{"));
    }

    #[test]
    fn test_http_request_recording() {
        let metrics = Metrics::new().unwrap();

        metrics.record_http_request("GET", "/api/rooms", 200, 0.012);
        metrics.record_http_request("POST", "/api/orders", 400, 0.003);

        let metrics_text = metrics.encode().unwrap();
        assert!(metrics_text.contains("http_requests_total"));
        assert!(metrics_text.contains("http_request_duration_seconds"));
        assert!(metrics_text.contains("endpoint=\"/api/orders\""));
    }

    #[test]
    fn test_business_metrics_recording() {
        let metrics = Metrics::new().unwrap();

        metrics.record_order("bar", true);
        metrics.record_order("restaurant", false);
        metrics.record_order_status_update(true);
        metrics.record_menu_request("bar", true);
        metrics.record_qr_code("restaurant");

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains("orders_total{order_type=\"bar\",status=\"success\"} 1"));
        assert!(encoded.contains("orders_total{order_type=\"restaurant\",status=\"error\"} 1"));
        assert!(encoded.contains("order_status_updates_total"));
        assert!(encoded.contains("menu_requests_total"));
        assert!(encoded.contains("qr_codes_generated_total{menu_type=\"restaurant\"} 1"));
    }

    #[test]
    fn test_in_flight_requests() {
        let metrics = Metrics::new().unwrap();

        metrics.increment_in_flight("GET", "/api/menu/:menu_type");
        metrics.increment_in_flight("GET", "/api/menu/:menu_type");
        metrics.decrement_in_flight("GET", "/api/menu/:menu_type");

        let encoded = metrics.encode().unwrap();
        let line = encoded
            .lines()
            .find(|line| line.starts_with("http_requests_in_flight{"))
            .unwrap();
        assert!(line.contains("endpoint=\"/api/menu/:menu_type\""));
        assert!(line.ends_with(" 1"));
    }
}
