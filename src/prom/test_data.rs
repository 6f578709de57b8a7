/// One exposition payload as the application reports it, covering counters,
/// gauges, a histogram with two series, and a deliberately broken line.
pub const SCRAPE: &str = r#"# HELP http_requests_total Total number of HTTP requests
# TYPE http_requests_total counter
http_requests_total{method="GET",route="/api/products",status_code="200"} 42
http_requests_total{method="POST",route="/api/orders",status_code="201"} 11

# HELP http_request_duration_seconds Request latency histogram
# TYPE http_request_duration_seconds histogram
http_request_duration_seconds_bucket{route="/api/products",le="0.5"} 40
http_request_duration_seconds_bucket{route="/api/products",le="+Inf"} 42
http_request_duration_seconds_sum{route="/api/products"} 12.6
http_request_duration_seconds_count{route="/api/products"} 42
http_request_duration_seconds_sum{route="/api/orders"} 5.5
http_request_duration_seconds_count{route="/api/orders"} 11

# HELP orders_created_total Orders created since start
# TYPE orders_created_total counter
orders_created_total 17
orders_success_total 15
orders_failed_total 2
payments_processed_total 15
errors_total{service="api"} 3 1712345678901

# TYPE simulated_latency_ms gauge
simulated_latency_ms{route="/api/products"} 250.0
broken{ 12 this line matches nothing
"#;
