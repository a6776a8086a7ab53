//! HTTP-level tests against a mock FoodData Central server.

use nutrisearch_api_client::{ApiError, ClientConfig, FoodDataClient, FoodDataSource};
use nutrisearch_core::rate_limit::RateLimitConfig;
use nutrisearch_search::DataType;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> FoodDataClient {
    let config = ClientConfig::default()
        .with_api_key("test-key")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(2));
    FoodDataClient::with_config(config).unwrap()
}

fn search_page_json() -> serde_json::Value {
    json!({
        "totalHits": 2,
        "currentPage": 1,
        "totalPages": 1,
        "foods": [
            {
                "fdcId": 1105314,
                "description": "Bananas, raw",
                "dataType": "Foundation",
                "foodNutrients": [
                    {"nutrientId": 1008, "nutrientName": "Energy", "unitName": "KCAL", "value": 89.0},
                    {"nutrientId": 1003, "nutrientName": "Protein", "unitName": "G", "value": 1.09}
                ]
            },
            {
                "fdcId": 2099876,
                "description": "BANANA CHIPS",
                "dataType": "Branded",
                "brandOwner": "Snack Co",
                "foodNutrients": [{"nutrientId": 1008, "unitName": "KCAL", "value": 519}]
            }
        ]
    })
}

#[tokio::test]
async fn test_fetch_page_sends_expected_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/foods/search"))
        .and(query_param("api_key", "test-key"))
        .and(header_exists("x-request-id"))
        .and(body_partial_json(json!({
            "query": "banana",
            "dataType": ["Foundation", "SR Legacy", "Survey (FNDDS)", "Branded"],
            "pageSize": 25,
            "pageNumber": 1,
            "sortBy": "dataType.keyword",
            "sortOrder": "asc"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page_json()))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).fetch_page("banana", 1, 100).await.unwrap();

    assert_eq!(page.total_hits, 2);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.candidates.len(), 2);
    assert_eq!(page.candidates[0].data_type, DataType::Foundation);
    assert_eq!(page.candidates[1].brand_owner.as_deref(), Some("Snack Co"));
}

#[tokio::test]
async fn test_provider_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/foods/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page("banana", 1, 25).await.unwrap_err();
    match err {
        ApiError::Provider { status, ref body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream maintenance");
        }
        other => panic!("expected provider error, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/foods/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page("banana", 1, 25).await.unwrap_err();
    assert!(matches!(err, ApiError::Json(_)));
}

#[tokio::test]
async fn test_transport_failure_has_no_status() {
    // Reserve a free port, then release it so connections are refused
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let config = ClientConfig::default()
        .with_api_key("k")
        .with_base_url(format!("http://{addr}"))
        .with_timeout(Duration::from_secs(2));
    let client = FoodDataClient::with_config(config).unwrap();

    let err = client.fetch_page("banana", 1, 25).await.unwrap_err();
    assert_eq!(err.status(), None);
    assert!(matches!(err, ApiError::Request(_) | ApiError::Timeout(_)));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/foods/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_page_json())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_api_key("k")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let client = FoodDataClient::with_config(config).unwrap();

    let err = client.fetch_page("banana", 1, 25).await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)));
}

#[tokio::test]
async fn test_food_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/food/171077"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fdcId": 171077,
            "description": "Chicken, broilers or fryers, breast, meat only, cooked, roasted",
            "dataType": "SR Legacy",
            "foodNutrients": [
                {"nutrient": {"id": 1008, "number": "208", "name": "Energy", "unitName": "kcal"}, "amount": 165.0}
            ]
        })))
        .mount(&server)
        .await;

    let food = client_for(&server).fetch_food(171_077).await.unwrap().unwrap();
    assert_eq!(food.data_type, DataType::SrLegacy);
    assert_eq!(food.food_nutrients[0].value, 165.0);
}

#[tokio::test]
async fn test_food_detail_not_found_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/food/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(client_for(&server).fetch_food(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_food_detail_server_error_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/food/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_food(2).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_exhausted_budget_fails_fast() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/foods/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_api_key("k")
        .with_base_url(server.uri())
        .with_rate_limit(RateLimitConfig::strict(1, Duration::from_secs(3600)));
    let client = FoodDataClient::with_config(config).unwrap();

    assert!(client.fetch_page("banana", 1, 25).await.is_ok());
    let err = client.fetch_page("banana", 2, 25).await.unwrap_err();
    assert!(matches!(err, ApiError::RateLimited { .. }));
    assert!(!err.is_retryable());
}
