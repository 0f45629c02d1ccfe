use super::{login, prompt};
use crate::backend::BackendClient;
use crate::cli::{Cli, Mode};
use crate::config::Config;
use crate::error::ClientError;
use anyhow::{Result, bail};
use clap::CommandFactory;
use tracing::warn;

pub const NOT_LOGGED_IN: &str = "You are not logged in. Please login first\nCommand: `idk --login`";

/// Pick the user-facing line for a failed invocation.
pub fn user_message(err: &anyhow::Error) -> String {
    let Some(client_err) = err.chain().find_map(|e| e.downcast_ref::<ClientError>()) else {
        return format!("{err:#}");
    };

    if client_err.is_unauthorized() {
        return NOT_LOGGED_IN.to_string();
    }
    match client_err {
        ClientError::Transport { url, .. } => {
            format!("Could not reach the idk backend ({url}). Please try again!")
        }
        ClientError::RemoteStatus { status, .. } => {
            format!("The idk backend returned an error (status {status}). Please try again!")
        }
        ClientError::Decode { .. } | ClientError::MissingField { .. } => {
            "The idk backend sent an unexpected response. Please try again!".to_string()
        }
    }
}

/// Load the config, then dispatch one invocation.
pub async fn run(cli: Cli) -> crate::error::Result<()> {
    let config = Config::load_or_init()?;
    dispatch(cli, config).await?;
    Ok(())
}

/// Run one invocation: login, logout, or a prompt.
pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    let client = BackendClient::new(config.backend_url());

    match cli.mode() {
        Mode::Login => {
            if let Err(e) = login::login(&client, &mut config).await {
                warn!(error = %format!("{e:#}"), "login failed");
                println!("Failed to Sign In With Google. Please try again!");
                return Err(e);
            }
            println!("Login Successful");
            println!("Try: `idk <your prompt>`");
            println!("Learn more: `idk -h`");
            Ok(())
        }
        Mode::Logout => {
            login::logout(&mut config)?;
            println!("Logout Successful");
            Ok(())
        }
        Mode::Help => {
            Cli::command().print_help()?;
            Ok(())
        }
        Mode::RunAlias(name) => report(prompt::run_alias(&client, &config, &name).await),
        Mode::Prompt {
            prompt: text,
            readme,
            alias,
        } => {
            if let Some(path) = &readme
                && !path.exists()
            {
                println!("Invalid README file path");
                bail!("readme not found: {}", path.display());
            }

            let Some(token) = config.session_token().map(str::to_string) else {
                println!("{NOT_LOGGED_IN}");
                bail!("no session token");
            };

            let request = prompt::PromptRequest {
                prompt: &text,
                readme: readme.as_deref(),
                alias: alias.as_deref(),
            };
            report(prompt::handle_prompt(&client, &mut config, &token, &request).await)
        }
    }
}

fn report(result: Result<()>) -> Result<()> {
    if let Err(e) = &result {
        warn!(error = %format!("{e:#}"), "invocation failed");
        println!("{}", user_message(e));
    }
    result
}
