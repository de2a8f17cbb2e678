mod common;

use ccapi_client::network::{NetworkClient, Request};
use ccapi_client::{Config, ErrorKind};
use common::{closed_port_url, serve_canned, serve_truncated, TestEnv, TOKEN};
use reqwest::{Method, StatusCode};
use std::collections::HashMap;

#[tokio::test]
async fn test_not_found_even_when_acceptable() {
    let env = TestEnv::start().await.unwrap();
    let network = NetworkClient::new(&Config::new(env.fake.url())).unwrap();

    let request = Request::new(Method::GET, "/v2/spaces/missing")
        .token(TOKEN)
        .acceptable(&[StatusCode::OK, StatusCode::NOT_FOUND]);
    let err = network.make_request(request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    let detail = err.detail().unwrap();
    assert_eq!(detail.description, "The space could not be found: missing");
}

#[tokio::test]
async fn test_not_found_without_error_document() {
    let url = serve_canned(404, "<html>nope</html>")
        .await
        .unwrap();
    let network = NetworkClient::new(&Config::new(url)).unwrap();

    let request = Request::new(Method::GET, "/v2/spaces/x")
        .token(TOKEN)
        .acceptable(&[StatusCode::OK]);
    let err = network.make_request(request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.detail().is_none());
    assert_eq!(err.body(), Some(&b"<html>nope</html>"[..]));
}

#[tokio::test]
async fn test_empty_token_is_sent_and_rejected_remotely() {
    let env = TestEnv::start().await.unwrap();
    let network = NetworkClient::new(&Config::new(env.fake.url())).unwrap();

    let request = Request::new(Method::GET, "/v2/buildpacks")
        .token("")
        .acceptable(&[StatusCode::OK]);
    let err = network.make_request(request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.detail().unwrap().error_code, "CF-NotAuthenticated");
}

#[tokio::test]
async fn test_unexpected_status_keeps_status_and_body() {
    let url = serve_canned(500, "boom")
        .await
        .unwrap();
    let network = NetworkClient::new(&Config::new(url)).unwrap();

    let request = Request::new(Method::GET, "/v2/buildpacks")
        .token(TOKEN)
        .acceptable(&[StatusCode::OK]);
    let err = network.make_request(request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.body(), Some(&b"boom"[..]));
}

#[tokio::test]
async fn test_success_returns_status_and_body() {
    let url = serve_canned(202, "{\"ok\":true}")
        .await
        .unwrap();
    let network = NetworkClient::new(&Config::new(url)).unwrap();

    let request = Request::new(Method::POST, "/anything")
        .token(TOKEN)
        .acceptable(&[StatusCode::ACCEPTED]);
    let response = network.make_request(request).await.unwrap();

    assert_eq!(response.status, StatusCode::ACCEPTED);
    let value: serde_json::Value = response.decode().unwrap();
    assert_eq!(value["ok"], true);
}

#[tokio::test]
async fn test_transport_failure() {
    let url = closed_port_url().await.unwrap();
    let network = NetworkClient::new(&Config::new(url)).unwrap();

    let request = Request::new(Method::GET, "/v2/buildpacks")
        .token(TOKEN)
        .acceptable(&[StatusCode::OK]);
    let err = network.make_request(request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HttpTransport);
}

#[tokio::test]
async fn test_truncated_body_is_read_failure() {
    let url = serve_truncated().await.unwrap();
    let network = NetworkClient::new(&Config::new(url)).unwrap();

    let request = Request::new(Method::GET, "/v2/buildpacks")
        .token(TOKEN)
        .acceptable(&[StatusCode::OK]);
    let err = network.make_request(request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ResponseRead);
}

#[tokio::test]
async fn test_malformed_host_is_configuration_error() {
    let network = NetworkClient::new(&Config::new("::not a host::")).unwrap();

    let request = Request::new(Method::GET, "/v2/buildpacks")
        .token(TOKEN)
        .acceptable(&[StatusCode::OK]);
    let err = network.make_request(request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[tokio::test]
async fn test_unencodable_body_fails_before_sending() {
    // Nothing listens here, so reaching the network would be HttpTransport
    let url = closed_port_url().await.unwrap();
    let network = NetworkClient::new(&Config::new(url)).unwrap();

    let mut body = HashMap::new();
    body.insert((1u8, 2u8), "tuple keys are not valid JSON object keys");

    let request = Request::new(Method::POST, "/v2/buildpacks")
        .token(TOKEN)
        .acceptable(&[StatusCode::CREATED])
        .json(&body);
    let err = network.make_request(request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RequestBodyEncode);
}

#[tokio::test]
#[should_panic(expected = "no acceptable status codes")]
async fn test_missing_acceptable_codes_panics() {
    let network = NetworkClient::new(&Config::new("http://127.0.0.1:1")).unwrap();

    let request = Request::new(Method::GET, "/v2/buildpacks").token(TOKEN);
    let _ = network.make_request(request).await;
}

#[tokio::test]
async fn test_trace_does_not_change_results() {
    let env = TestEnv::start().await.unwrap();
    let mut config = Config::new(env.fake.url());
    config.trace = true;
    let network = NetworkClient::new(&config).unwrap();

    let request = Request::new(Method::GET, "/v2/buildpacks/missing")
        .token(TOKEN)
        .acceptable(&[StatusCode::OK]);
    let err = network.make_request(request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let request = Request::new(Method::GET, "/v2/buildpacks")
        .token(TOKEN)
        .acceptable(&[StatusCode::OK]);
    let response = network.make_request(request).await.unwrap();
    assert_eq!(response.status, StatusCode::OK);
}
