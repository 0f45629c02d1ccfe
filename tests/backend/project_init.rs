use super::support::{client_for, respond};
use idk::ClientError;
use idk::backend::PlanCommand;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn files() -> Vec<String> {
    vec!["package.json".into(), "src/".into()]
}

#[tokio::test]
async fn plan_preserves_command_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/run/init"))
        .and(header("authorization", "jwt"))
        .and(body_json(json!({
            "files": ["package.json", "src/"],
            "readme": "# app",
            "makefile": "",
            "os": "linux",
            "projectFolderName": "app",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projectType": "node",
            "commands": [
                {"command": "npm install", "description": "install deps"},
                {"command": "npm run build", "description": "build"},
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .await
        .get_project_init("app", &files(), "# app", "", "linux", "jwt")
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(reply.value.project_type, "node");
    assert_eq!(
        reply.value.commands,
        vec![
            PlanCommand {
                command: "npm install".into(),
                description: "install deps".into(),
            },
            PlanCommand {
                command: "npm run build".into(),
                description: "build".into(),
            },
        ]
    );
}

#[tokio::test]
async fn one_malformed_command_fails_the_whole_plan() {
    let server = MockServer::start().await;
    respond(
        &server,
        "/run/init",
        200,
        r#"{"projectType":"node","commands":[
            {"command":"npm install","description":"deps"},
            {"command":"npm test"}
        ]}"#,
    )
    .await;

    let err = client_for(&server)
        .await
        .get_project_init("app", &files(), "", "", "linux", "jwt")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode { status: 200, .. }));
}

#[tokio::test]
async fn missing_commands_array_is_a_decode_error() {
    let server = MockServer::start().await;
    respond(&server, "/run/init", 200, r#"{"projectType":"rust"}"#).await;

    let err = client_for(&server)
        .await
        .get_project_init("app", &[], "", "", "linux", "jwt")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn empty_plan_is_valid() {
    let server = MockServer::start().await;
    respond(&server, "/run/init", 200, r#"{"projectType":"unknown","commands":[]}"#).await;

    let reply = client_for(&server)
        .await
        .get_project_init("app", &[], "", "", "linux", "jwt")
        .await
        .unwrap();

    assert!(reply.value.commands.is_empty());
}

#[tokio::test]
async fn positional_command_records_are_rejected() {
    let server = MockServer::start().await;
    respond(
        &server,
        "/run/init",
        200,
        r#"{"projectType":"node","commands":[["npm i","deps"]]}"#,
    )
    .await;

    let err = client_for(&server)
        .await
        .get_project_init("app", &files(), "", "", "linux", "jwt")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode { status: 200, .. }));
}
