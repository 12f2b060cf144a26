use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{member_body, unreachable_address, TestApp, TestGateway};

const FALLBACK_MESSAGE: &str = "Member Service is currently unavailable. Please try again later.";

#[tokio::test]
async fn fallback_endpoint_returns_503_with_a_fixed_body() {
    let gateway = TestGateway::spawn_gateway(unreachable_address()).await;

    let response = reqwest::get(format!("{}/fallback/member-service", gateway.address))
        .await
        .expect("Failed to execute request.");

    assert_eq!(503, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"status": "error", "message": FALLBACK_MESSAGE})
    );
}

#[tokio::test]
async fn gateway_falls_back_when_the_member_service_is_unreachable() {
    let gateway = TestGateway::spawn_gateway(unreachable_address()).await;

    let response = reqwest::get(format!("{}/api/members", gateway.address))
        .await
        .expect("Failed to execute request.");

    assert_eq!(503, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], FALLBACK_MESSAGE);
}

#[tokio::test]
async fn gateway_falls_back_when_the_member_service_is_too_slow() {
    let member_service = MockServer::start().await;
    let gateway = TestGateway::spawn_gateway(member_service.uri()).await;

    Mock::given(method("GET"))
        .and(path("/members"))
        .respond_with(
            ResponseTemplate::new(200).set_delay(std::time::Duration::from_millis(1_000)),
        )
        .mount(&member_service)
        .await;

    let response = reqwest::get(format!("{}/api/members", gateway.address))
        .await
        .expect("Failed to execute request.");

    assert_eq!(503, response.status().as_u16());
}

#[tokio::test]
async fn gateway_strips_the_api_prefix_and_forwards_the_body() {
    let member_service = MockServer::start().await;
    let gateway = TestGateway::spawn_gateway(member_service.uri()).await;
    let body = member_body("Alice", "alice@x.com");

    Mock::given(method("POST"))
        .and(path("/members"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(201).set_body_json(&body))
        .expect(1)
        .mount(&member_service)
        .await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/members", gateway.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(201, response.status().as_u16());
    assert_eq!(response.json::<serde_json::Value>().await.unwrap(), body);
}

#[tokio::test]
async fn gateway_relays_member_service_errors_without_falling_back() {
    let member_service = MockServer::start().await;
    let gateway = TestGateway::spawn_gateway(member_service.uri()).await;

    Mock::given(method("DELETE"))
        .and(path("/members/unknown"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&member_service)
        .await;

    let response = reqwest::Client::new()
        .delete(format!("{}/api/members/unknown", gateway.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn gateway_serves_the_member_service_end_to_end() {
    let test_app = TestApp::spawn_app().await;
    let gateway = TestGateway::spawn_gateway(test_app.address.clone()).await;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{}/api/members", gateway.address))
        .json(&member_body("Alice", "alice@x.com"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(201, created.status().as_u16());

    let response = client
        .get(format!("{}/api/members/email/alice@x.com", gateway.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());

    let member: serde_json::Value = response.json().await.unwrap();
    assert_eq!(member["name"], "Alice");
}
