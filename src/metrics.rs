use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and describe the service's metrics
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!("buyback_pickups_total", "Total number of pickups created");
    describe_counter!("buyback_quotes_total", "Total number of quotes generated");
    describe_histogram!("buyback_quote_price", "Price of generated quotes");
    describe_counter!(
        "buyback_pricing_errors_total",
        "Total number of pickups that could not be priced"
    );
    describe_counter!(
        "buyback_agreements_total",
        "Total number of quotes accepted through an agreement"
    );
    describe_gauge!("buyback_info", "Service version information");

    gauge!("buyback_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a created pickup and the quote generated for it
pub fn record_quote(battery_count: usize, price: f64) {
    counter!("buyback_pickups_total").increment(1);
    counter!(
        "buyback_quotes_total",
        "batteries" => battery_count_bucket(battery_count),
    )
    .increment(1);
    histogram!("buyback_quote_price").record(price);
}

/// Record a pickup rejected because its quote could not be priced
pub fn record_pricing_error(kind: &'static str) {
    counter!("buyback_pricing_errors_total", "kind" => kind).increment(1);
}

pub fn record_agreement() {
    counter!("buyback_agreements_total").increment(1);
}

// Keeps label cardinality bounded.
fn battery_count_bucket(count: usize) -> &'static str {
    match count {
        0 => "0",
        1 => "1",
        2..=5 => "2-5",
        _ => "6+",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_metrics() {
        init_metric_descriptions();

        record_quote(2, 1234.5);
        record_pricing_error("lookup");
        record_agreement();

        // Without an installed recorder these are no-ops; they must not panic
    }

    #[test]
    fn test_battery_count_bucket() {
        assert_eq!(battery_count_bucket(0), "0");
        assert_eq!(battery_count_bucket(1), "1");
        assert_eq!(battery_count_bucket(5), "2-5");
        assert_eq!(battery_count_bucket(40), "6+");
    }
}
