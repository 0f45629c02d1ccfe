use super::support::{client_for, respond, respond_json};
use idk::ClientError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn auth_url_is_returned_verbatim() {
    let server = MockServer::start().await;
    let url = "https://accounts.google.com/o/oauth2/v2/auth?client_id=x&state=abc-123";

    Mock::given(method("POST"))
        .and(path("/googleAuthUrl"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"state": "abc-123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": url})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .await
        .get_authorization_url("abc-123")
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(reply.value, url);
}

#[tokio::test]
async fn auth_url_request_has_no_authorization_header() {
    let server = MockServer::start().await;
    respond_json(&server, "/googleAuthUrl", json!({"url": "https://g.co/x"})).await;

    client_for(&server)
        .await
        .get_authorization_url("s")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn empty_auth_url_is_missing() {
    let server = MockServer::start().await;
    respond_json(&server, "/googleAuthUrl", json!({"url": ""})).await;

    let err = client_for(&server)
        .await
        .get_authorization_url("s")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::MissingField { field: "url", .. }));
}

#[tokio::test]
async fn absent_or_null_auth_url_is_missing() {
    for body in [json!({}), json!({"url": null}), json!({"link": "https://g.co"})] {
        let server = MockServer::start().await;
        respond_json(&server, "/googleAuthUrl", body).await;

        let err = client_for(&server)
            .await
            .get_authorization_url("s")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::MissingField { field: "url", .. }));
    }
}

#[tokio::test]
async fn non_string_auth_url_is_a_decode_error() {
    let server = MockServer::start().await;
    respond_json(&server, "/googleAuthUrl", json!({"url": 42})).await;

    let err = client_for(&server)
        .await
        .get_authorization_url("s")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn token_exchange_returns_jwt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_json(json!({"googleAuthCode": "4/0Ab-code"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"jwtToken": "eyJhbGciOi.payload.sig"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .await
        .exchange_code_for_token("4/0Ab-code")
        .await
        .unwrap();

    assert_eq!(reply.into_value(), "eyJhbGciOi.payload.sig");
}

#[tokio::test]
async fn absent_or_empty_token_is_missing() {
    for body in [json!({}), json!({"jwtToken": ""}), json!({"jwtToken": null})] {
        let server = MockServer::start().await;
        respond_json(&server, "/token", body).await;

        let err = client_for(&server)
            .await
            .exchange_code_for_token("code")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::MissingField {
                field: "jwtToken",
                status: 200,
                ..
            }
        ));
    }
}

#[tokio::test]
async fn malformed_token_body_is_a_decode_error() {
    let server = MockServer::start().await;
    respond(&server, "/token", 200, "jwtToken=abc").await;

    let err = client_for(&server)
        .await
        .exchange_code_for_token("code")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode { status: 200, .. }));
}
