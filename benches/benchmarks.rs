use criterion::{black_box, criterion_group, criterion_main, Criterion};

use prompush::prom::{ExpositionParser, MetricConverter};

fn exposition_payload() -> String {
    let mut text = String::from(
        "# HELP http_requests_total Total number of HTTP requests\n\
         # TYPE http_requests_total counter\n",
    );
    for route in 0..100 {
        text.push_str(&format!(
            "http_requests_total{{method=\"GET\",route=\"/api/items/{route}\",status_code=\"200\"}} {route}\n\
             http_request_duration_seconds_sum{{route=\"/api/items/{route}\"}} {route}.5\n\
             http_request_duration_seconds_count{{route=\"/api/items/{route}\"}} 12\n",
        ));
    }
    text.push_str("orders_created_total 17\nerrors_total 3\n");
    text
}

fn parse_benchmark(c: &mut Criterion) {
    let parser = ExpositionParser::new();
    let text = exposition_payload();
    c.bench_function("parse exposition text", |b| {
        b.iter(|| parser.parse(black_box(&text)))
    });
}

fn convert_benchmark(c: &mut Criterion) {
    let parsed = ExpositionParser::new().parse(&exposition_payload());
    let converter = MetricConverter::default();
    c.bench_function("convert parsed samples", |b| {
        b.iter(|| converter.convert(black_box(&parsed), "custom.app", None))
    });
}

criterion_group!(benches, parse_benchmark, convert_benchmark);
criterion_main!(benches);
