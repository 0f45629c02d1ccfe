use crate::backend::{BackendClient, Transport};
use crate::config::Config;
use anyhow::{Context, Result, bail};
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use dialoguer::Input;
use serde::Deserialize;
use std::process::{Command, Stdio};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};
use uuid::Uuid;

/// Sign in with Google and store the backend's session token.
///
/// `NoAuth -> URLIssued -> CodeReceived -> TokenIssued`; the code arrives on
/// the local callback listener, or is pasted when the listener is disabled.
pub async fn login<T: Transport>(client: &BackendClient<T>, config: &mut Config) -> Result<()> {
    let state = Uuid::new_v4().to_string();

    // Bind before issuing the URL so the redirect cannot race the listener.
    let listener = match config.callback_port() {
        0 => None,
        port => Some(
            TcpListener::bind(("127.0.0.1", port))
                .await
                .with_context(|| {
                    format!("Failed to listen for the login callback on port {port}")
                })?,
        ),
    };

    let auth_url = client
        .get_authorization_url(&state)
        .await
        .context("Failed to get the Google sign-in URL")?
        .into_value();
    info!("authorization URL issued");

    println!("Sign in with Google by opening this URL:");
    println!();
    println!("  {auth_url}");
    println!();
    if config.login.open_browser {
        open_browser(&auth_url);
    }

    let code = match listener {
        Some(listener) => wait_for_callback(listener, &state).await?,
        None => prompt_for_code()?,
    };
    debug!("authorization code received");

    let token = client
        .exchange_code_for_token(&code)
        .await
        .context("Failed to exchange the authorization code")?
        .into_value();

    config.set_session_token(token);
    config.save().context("Failed to save session token")?;
    info!("session token stored");
    Ok(())
}

/// Forget the stored session token.
pub fn logout(config: &mut Config) -> Result<()> {
    config.clear_session_token();
    config.save().context("Failed to save config")?;
    Ok(())
}

fn prompt_for_code() -> Result<String> {
    let code: String = Input::new()
        .with_prompt("Paste the authorization code")
        .interact_text()
        .context("Failed to read the authorization code")?;
    let code = code.trim().to_string();
    if code.is_empty() {
        bail!("Authorization code cannot be empty");
    }
    Ok(code)
}

fn open_browser(url: &str) {
    let (program, args): (&str, Vec<&str>) = if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else if cfg!(windows) {
        ("cmd", vec!["/C", "start", "", url])
    } else {
        ("xdg-open", vec![url])
    };

    let spawned = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(e) = spawned {
        debug!(program, error = %e, "could not open a browser");
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Decide what a callback request means for the pending login.
pub(super) fn callback_outcome(
    query: &CallbackQuery,
    expected_state: &str,
) -> Result<String, String> {
    if let Some(error) = query.error.as_deref() {
        return Err(format!("Google sign-in was denied: {error}"));
    }
    if query.state.as_deref() != Some(expected_state) {
        return Err("Login callback state did not match this login attempt".into());
    }
    match query.code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => Ok(code.to_string()),
        _ => Err("Login callback did not include an authorization code".into()),
    }
}

#[derive(Clone)]
struct CallbackState {
    expected_state: Arc<str>,
    outcomes: mpsc::Sender<Result<String, String>>,
}

async fn handle_callback(
    State(state): State<CallbackState>,
    Query(query): Query<CallbackQuery>,
) -> (StatusCode, &'static str) {
    let outcome = callback_outcome(&query, &state.expected_state);
    let reply = if outcome.is_ok() {
        (StatusCode::OK, "Login complete. You can close this tab.")
    } else {
        (StatusCode::BAD_REQUEST, "Login failed. Return to your terminal.")
    };
    // Only the first callback counts; later ones find the receiver gone.
    let _ = state.outcomes.send(outcome).await;
    reply
}

/// Serve `GET /callback` until one callback arrives, then shut down.
pub(super) async fn wait_for_callback(
    listener: TcpListener,
    expected_state: &str,
) -> Result<String> {
    let (outcome_tx, mut outcome_rx) = mpsc::channel(1);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new()
        .route("/callback", get(handle_callback))
        .with_state(CallbackState {
            expected_state: Arc::from(expected_state),
            outcomes: outcome_tx,
        });

    let addr = listener.local_addr().context("get callback listener address")?;
    debug!(%addr, "waiting for login callback");
    println!("Waiting for Google sign-in to complete...");

    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    let outcome = outcome_rx.recv().await;
    let _ = shutdown_tx.send(());
    if let Ok(Err(e)) = server.await {
        debug!(error = %e, "login callback server stopped with an error");
    }

    match outcome {
        Some(Ok(code)) => Ok(code),
        Some(Err(message)) => bail!(message),
        None => bail!("Login callback listener stopped before a code arrived"),
    }
}
