//! Integration tests for the HTTP transport.
//!
//! These tests run the customers client against a local mock server and
//! verify the wire format, header handling, and error mapping.

use paloma_shop::clients::CLIENT_VERSION;
use paloma_shop::{
    ApiKey, BaseUrl, Channel, CustomersClient, HttpClient, HttpError, HttpMethod, HttpRequest,
    Locale, OrderListQuery, PalomaConfig,
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_config(base_url: &str) -> PalomaConfig {
    PalomaConfig::builder()
        .base_url(BaseUrl::new(base_url).unwrap())
        .channel(Channel::new("shop1").unwrap())
        .locale(Locale::new("en").unwrap())
        .build()
        .unwrap()
}

fn create_client(server: &MockServer) -> CustomersClient {
    CustomersClient::new(&create_config(&server.uri())).unwrap()
}

// ============================================================================
// Request format
// ============================================================================

#[tokio::test]
async fn test_get_order_hits_locale_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop1/en/customers/cust-1/orders/ORD-42"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"orderNumber": "ORD-42"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let order = assert_ok!(client.get_order("cust-1", "ORD-42").await);

    assert_eq!(order["orderNumber"], "ORD-42");
}

#[tokio::test]
async fn test_url_for_resolves_against_base_url() {
    let client = HttpClient::new(&create_config("https://api.test")).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "shop1/en/customers/cust-1/orders/ORD-42")
        .build()
        .unwrap();

    assert_eq!(
        client.url_for(&request),
        "https://api.test/shop1/en/customers/cust-1/orders/ORD-42"
    );
}

#[tokio::test]
async fn test_json_body_is_sent_with_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shop1/users/authenticate"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"username": "jane", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"authenticated": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = assert_ok!(client.authenticate_user("jane", "secret").await);

    assert_eq!(result["authenticated"], true);
}

#[tokio::test]
async fn test_put_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/shop1/customers/cust-1/addresses/billing"))
        .and(body_json(json!({"street": "Main 1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"street": "Main 1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    assert_ok!(
        client
            .update_address("cust-1", "billing", &json!({"street": "Main 1"}))
            .await
    );
}

#[tokio::test]
async fn test_confirm_advertising_prefs_sends_form_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shop1/advertising/confirm"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("token=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"confirmed": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = assert_ok!(client.confirm_advertising_prefs("abc").await);

    assert_eq!(result["confirmed"], true);
}

#[tokio::test]
async fn test_escaped_token_reaches_server_as_single_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop1/users/password-reset/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"valid": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = assert_ok!(client.get_user_password_reset_token("a/b").await);

    assert_eq!(result["valid"], true);
}

#[tokio::test]
async fn test_exists_sends_encoded_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop1/customers/exists"))
        .and(query_param("emailAddress", "jane+shop@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"exists": false})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = assert_ok!(client.exists("jane+shop@example.com").await);

    assert_eq!(result["exists"], false);
}

#[tokio::test]
async fn test_get_orders_without_options_sends_no_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop1/en/customers/cust-1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    assert_ok!(client.get_orders("cust-1", &OrderListQuery::new()).await);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_get_orders_with_options_sends_only_those() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop1/en/customers/cust-1/orders"))
        .and(query_param("page", "1"))
        .and(query_param("size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    assert_ok!(
        client
            .get_orders("cust-1", &OrderListQuery::new().page(1).size(5))
            .await
    );

    let requests = server.received_requests().await.unwrap();
    let keys: Vec<String> = requests[0]
        .url
        .query_pairs()
        .map(|(key, _)| key.into_owned())
        .collect();
    assert_eq!(keys.len(), 2);
    assert!(!keys.contains(&"order".to_string()));
}

// ============================================================================
// Headers
// ============================================================================

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop1/customers/cust-1"))
        .and(header("x-api-key", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "cust-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = PalomaConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .channel(Channel::new("shop1").unwrap())
        .api_key(ApiKey::new("secret-key").unwrap())
        .build()
        .unwrap();
    let client = CustomersClient::new(&config).unwrap();

    assert_ok!(client.get_customer("cust-1").await);
}

#[tokio::test]
async fn test_user_agent_carries_prefix_and_version() {
    let server = MockServer::start().await;
    let user_agent = format!("MyShop/1.0 | Paloma Shop Client v{CLIENT_VERSION} | Rust");
    Mock::given(method("GET"))
        .and(path("/shop1/customers/cust-1"))
        .and(header("user-agent", user_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "cust-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = PalomaConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .channel(Channel::new("shop1").unwrap())
        .user_agent_prefix("MyShop/1.0")
        .build()
        .unwrap();
    let client = CustomersClient::new(&config).unwrap();

    assert_ok!(client.get_customer("cust-1").await);
}

// ============================================================================
// Response handling
// ============================================================================

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/shop1/users/password"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = assert_ok!(client.update_user_password(&json!({"password": "n3w"})).await);

    assert!(result.is_null());
}

#[tokio::test]
async fn test_deprecated_endpoint_still_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop1/customers/cust-1/loyalty-programs"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Deprecation", "true")
                .set_body_json(json!([])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = assert_ok!(client.get_loyalty_programs("cust-1").await);

    assert_eq!(result, json!([]));
}

#[tokio::test]
async fn test_not_found_maps_to_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop1/customers/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("X-Request-Id", "req-404")
                .set_body_json(json!({"message": "Customer not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = assert_err!(client.get_customer("missing").await);

    assert_eq!(error.status(), Some(404));
    match error {
        HttpError::Response(e) => {
            assert_eq!(e.code, 404);
            assert_eq!(e.error_reference.as_deref(), Some("req-404"));
            assert!(e.message.contains("Customer not found"));
            assert!(e.message.contains("req-404"));
        }
        other => panic!("expected a response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shop1/address/validate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = assert_err!(client.address_validate(&json!({"street": "x"})).await);

    match error {
        HttpError::Response(e) => {
            assert_eq!(e.code, 503);
            assert!(e.message.contains("upstream down"));
            assert!(e.error_reference.is_none());
        }
        other => panic!("expected a response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop1/en/orders/ORD-42/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = assert_err!(client.get_order_status("ORD-42").await);

    assert!(matches!(error, HttpError::Deserialization { code: 200, .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on the discard port.
    let client = CustomersClient::new(&create_config("http://127.0.0.1:9")).unwrap();

    let error = assert_err!(client.get_customer("cust-1").await);

    assert!(matches!(error, HttpError::Network(_)));
    assert_eq!(error.status(), None);
}

#[tokio::test]
async fn test_transport_request_returns_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop1/customers/cust-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "req-1")
                .set_body_json(json!({"id": "cust-1"})),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_config(&server.uri())).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "shop1/customers/cust-1")
        .build()
        .unwrap();

    let response = assert_ok!(client.request(request).await);

    assert_eq!(response.code, 200);
    assert_eq!(response.request_id(), Some("req-1"));
    assert_eq!(response.body["id"], "cust-1");
}
