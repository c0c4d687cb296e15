//! End-to-end tests of the comparison engine against a mock pricing service.

use std::sync::Arc;
use std::time::Duration;

use cloud_compare::catalog::load_catalog;
use cloud_compare::client::PricingClient;
use cloud_compare::config::ServiceConfig;
use cloud_compare::models::ComparisonRequest;
use cloud_compare::provider::Provider;
use cloud_compare::state::{ComparisonEngine, RequestState};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_config(uri: &str) -> ServiceConfig {
    ServiceConfig {
        base_url: uri.to_string(),
        timeout_seconds: 5,
    }
}

fn client_for(server: &MockServer) -> PricingClient {
    PricingClient::new(&service_config(&server.uri())).unwrap()
}

fn engine_for(server: &MockServer) -> ComparisonEngine {
    ComparisonEngine::new(client_for(server), Duration::from_secs(5))
}

fn test_request(hours: f64) -> ComparisonRequest {
    ComparisonRequest {
        instance_aws: "t3.medium".to_string(),
        instance_gcp: "e2-standard-2".to_string(),
        instance_azure: "Standard_D2s_v3".to_string(),
        hours,
        storage_gb: 50,
        aws_region: "us-east-1".to_string(),
        gcp_region: "us-central1".to_string(),
        azure_region: "eastus".to_string(),
    }
}

fn catalog_body(provider: &str, family: &str, types: &[&str]) -> serde_json::Value {
    json!({
        "provider": provider,
        "instance_families": { family: types },
        "storage_types": ["standard"]
    })
}

fn cost_record(provider: &str, instance: &str, region: &str, compute: f64, storage: f64) -> serde_json::Value {
    json!({
        "provider": provider,
        "instance_type": instance,
        "region": region,
        "hours_running": 24.0,
        "storage_gb": 50.0,
        "compute_cost": compute,
        "storage_cost": storage,
        "total_cost": compute + storage,
        "currency": "USD",
        "price_source": "test"
    })
}

/// Totals: aws 42.00, gcp 35.50, azure 50.25
fn compare_body() -> serde_json::Value {
    json!({
        "comparison_timestamp": "2024-05-01T12:00:00",
        "results": {
            "aws": cost_record("aws", "t3.medium", "us-east-1", 41.0, 1.0),
            "gcp": cost_record("gcp", "e2-standard-2", "us-central1", 34.5, 1.0),
            "azure": cost_record("azure", "Standard_D2s_v3", "eastus", 49.25, 1.0)
        },
        "comparison": {
            "cheapest_provider": "gcp",
            "most_expensive_provider": "azure",
            "max_savings": 14.75,
            "percentage_savings": 29.35,
            "cost_breakdown": { "aws": 42.0, "gcp": 35.5, "azure": 50.25 }
        }
    })
}

#[tokio::test]
async fn catalog_load_survives_one_provider_failing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/instances/aws"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body(
            "aws",
            "general_purpose",
            &["t3.medium", "m5.large"],
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/instances/gcp"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/instances/azure"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body(
            "azure",
            "burstable",
            &["Standard_B2s"],
        )))
        .mount(&server)
        .await;

    let catalog = load_catalog(&client_for(&server)).await;

    assert_eq!(catalog.len(), 2);
    assert!(catalog.get(&Provider::Aws).is_some());
    assert!(catalog.get(&Provider::Gcp).is_none());
    assert!(catalog
        .get(&Provider::Azure)
        .unwrap()
        .contains_instance("Standard_B2s"));
}

#[tokio::test]
async fn compare_encodes_all_transport_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/compare"))
        .and(query_param("instance_aws", "t3.medium"))
        .and(query_param("instance_gcp", "e2-standard-2"))
        .and(query_param("instance_azure", "Standard_D2s_v3"))
        .and(query_param("hours", "24.0"))
        .and(query_param("storage_gb", "50"))
        .and(query_param("aws_region", "us-east-1"))
        .and(query_param("gcp_region", "us-central1"))
        .and(query_param("azure_region", "eastus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(compare_body()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).compare(&test_request(24.0)).await.unwrap();
    assert_eq!(result.comparison.cheapest_provider, Provider::Gcp);
}

#[tokio::test]
async fn successful_submit_produces_ordered_series_and_winner() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/compare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(compare_body()))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let state = engine.submit(&test_request(24.0), None).await;
    assert!(matches!(state, RequestState::Success(_)));

    let view = engine.view().await;
    assert_eq!(view.chart.len(), 3);
    assert_eq!(view.chart[0].label, "AWS");
    assert_eq!(view.chart[1].label, "GCP");
    assert_eq!(view.chart[2].label, "AZURE");
    assert_eq!(view.shares.len(), 3);
    assert_eq!(view.winner, Some(Provider::Gcp));

    // totals are consistent with their components
    for point in &view.chart {
        assert!((point.compute_cost + point.storage_cost - point.total_cost).abs() <= 1e-6);
    }
}

#[tokio::test]
async fn http_failure_clears_previous_success() {
    let server = MockServer::start().await;

    // first request succeeds, every later one gets a 503
    Mock::given(method("GET"))
        .and(path("/compare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(compare_body()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/compare"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let engine = engine_for(&server);

    let first = engine.submit(&test_request(24.0), None).await;
    assert!(first.result().is_some());

    let second = engine.submit(&test_request(24.0), None).await;
    assert_eq!(
        second.failure_reason(),
        Some("Failed to fetch comparison data")
    );

    // no stale payload survives the failed submit
    let view = engine.view().await;
    assert!(view.state.result().is_none());
    assert!(view.chart.is_empty());
    assert!(view.winner.is_none());
}

#[tokio::test]
async fn malformed_payload_fails_with_the_same_user_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/compare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": { "aws": { "instance_type": "t3.medium" } }
        })))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let state = engine.submit(&test_request(24.0), None).await;

    assert_eq!(
        state.failure_reason(),
        Some("Failed to fetch comparison data")
    );
}

#[tokio::test]
async fn slow_service_times_out_with_dedicated_reason() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/compare"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(compare_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let engine = ComparisonEngine::new(client_for(&server), Duration::from_millis(200));
    let state = engine.submit(&test_request(24.0), None).await;

    assert_eq!(state.failure_reason(), Some("Comparison request timed out"));
}

#[tokio::test]
async fn newer_submit_supersedes_an_in_flight_one() {
    let server = MockServer::start().await;

    // the 24h request is slow; the 48h request answers immediately with a
    // different winner
    Mock::given(method("GET"))
        .and(path("/compare"))
        .and(query_param("hours", "24.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(compare_body())
                .set_delay(Duration::from_millis(600)),
        )
        .mount(&server)
        .await;

    let fast_body = json!({
        "results": {
            "aws": cost_record("aws", "t3.medium", "us-east-1", 10.0, 1.0)
        },
        "comparison": {
            "cheapest_provider": "aws",
            "max_savings": 0.0,
            "percentage_savings": 0.0,
            "cost_breakdown": { "aws": 11.0 }
        }
    });
    Mock::given(method("GET"))
        .and(path("/compare"))
        .and(query_param("hours", "48.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fast_body))
        .mount(&server)
        .await;

    let engine = Arc::new(engine_for(&server));

    let slow = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.submit(&test_request(24.0), None).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    engine.submit(&test_request(48.0), None).await;

    // the superseded submit resolves later; its payload must be discarded
    slow.await.unwrap();

    let view = engine.view().await;
    assert_eq!(view.winner, Some(Provider::Aws));
    assert_eq!(view.chart.len(), 1);
    assert_eq!(view.chart[0].total_cost, 11.0);
}
