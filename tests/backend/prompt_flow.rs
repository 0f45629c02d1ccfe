use super::support::{client_for, respond, respond_json};
use idk::ClientError;
use idk::backend::{ExecutionContext, PromptResult};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn list_files() -> ExecutionContext {
    ExecutionContext::new("list files", "linux", "/home/u")
}

#[tokio::test]
async fn prompt_round_trip_is_untransformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prompt"))
        .and(header("authorization", "jwt-token-1"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "prompt": "list files",
            "os": "linux",
            "existingScript": "",
            "readmeData": "",
            "pwd": "/home/u",
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "ls -la", "actionType": "run_command"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .await
        .process_prompt(&list_files(), "jwt-token-1")
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(
        reply.value,
        PromptResult {
            response: "ls -la".into(),
            action_type: "run_command".into(),
        }
    );
}

#[tokio::test]
async fn prompt_sends_readme_and_existing_script() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prompt"))
        .and(body_json(json!({
            "prompt": "add logging",
            "os": "macos",
            "existingScript": "#!/bin/sh\necho hi\n",
            "readmeData": "# tool",
            "pwd": "/src/tool",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "#!/bin/sh\nset -x\necho hi\n",
            "actionType": "script",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = ExecutionContext::new("add logging", "macos", "/src/tool")
        .with_readme("# tool")
        .with_existing_script("#!/bin/sh\necho hi\n");
    let reply = client_for(&server)
        .await
        .process_prompt(&ctx, "t")
        .await
        .unwrap();

    assert_eq!(reply.value.action_type, "script");
}

#[tokio::test]
async fn token_is_sent_without_scheme_prefix() {
    let server = MockServer::start().await;
    respond_json(
        &server,
        "/prompt",
        json!({"response": "pwd", "actionType": "command"}),
    )
    .await;

    client_for(&server)
        .await
        .process_prompt(&list_files(), "raw.jwt.value")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0].headers.get("authorization").unwrap();
    assert_eq!(auth.to_str().unwrap(), "raw.jwt.value");
}

#[tokio::test]
async fn missing_action_type_is_a_decode_error() {
    let server = MockServer::start().await;
    respond_json(&server, "/prompt", json!({"response": "ls -la"})).await;

    let err = client_for(&server)
        .await
        .process_prompt(&list_files(), "t")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode { status: 200, .. }));
}

#[tokio::test]
async fn empty_action_type_is_accepted() {
    let server = MockServer::start().await;
    respond_json(&server, "/prompt", json!({"response": "", "actionType": ""})).await;

    let reply = client_for(&server)
        .await
        .process_prompt(&list_files(), "t")
        .await
        .unwrap();

    assert!(reply.value.response.is_empty());
    assert!(reply.value.action_type.is_empty());
}

#[tokio::test]
async fn debug_command_sends_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/debug/command"))
        .and(header("authorization", "jwt"))
        .and(body_json(json!({
            "command": "npm run build",
            "os": "linux",
            "error": "exit status 1: missing script: build",
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "Add a build script to package.json"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cause = std::io::Error::other("exit status 1: missing script: build");
    let reply = client_for(&server)
        .await
        .process_debug_command("npm run build", "linux", &cause, "jwt")
        .await
        .unwrap();

    assert_eq!(reply.value.response, "Add a build script to package.json");
}

#[tokio::test]
async fn debug_response_must_be_a_string() {
    let server = MockServer::start().await;
    respond(&server, "/debug/command", 200, r#"{"response": ["a", "b"]}"#).await;

    let cause = std::io::Error::other("boom");
    let err = client_for(&server)
        .await
        .process_debug_command("make", "linux", &cause, "jwt")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    respond_json(
        &server,
        "/api/prompt",
        json!({"response": "ls", "actionType": "command"}),
    )
    .await;

    let client = idk::BackendClient::new(&format!("{}/api/", server.uri()));
    let reply = client.process_prompt(&list_files(), "t").await.unwrap();

    assert_eq!(reply.value.response, "ls");
}
