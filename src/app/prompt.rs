use super::action::ActionKind;
use super::project::ProjectSnapshot;
use super::shell::{CommandFailure, run_shell};
use crate::backend::{BackendClient, ExecutionContext, ProjectInitPlan, Transport};
use crate::config::Config;
use anyhow::{Context, Result};
use console::style;
use dialoguer::Confirm;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// One prompt invocation as requested on the command line.
pub struct PromptRequest<'a> {
    pub prompt: &'a str,
    pub readme: Option<&'a Path>,
    pub alias: Option<&'a str>,
}

/// Current operating system identifier sent to the backend.
pub fn current_os() -> &'static str {
    std::env::consts::OS
}

pub fn build_context(
    request: &PromptRequest<'_>,
    config: &Config,
    pwd: &Path,
) -> Result<ExecutionContext> {
    let mut ctx = ExecutionContext::new(request.prompt, current_os(), pwd.display().to_string());

    if let Some(path) = request.readme {
        let readme = fs::read_to_string(path)
            .with_context(|| format!("Failed to read readme {}", path.display()))?;
        ctx = ctx.with_readme(readme);
    }

    if let Some(script) = request.alias.and_then(|name| config.alias(name)) {
        ctx = ctx.with_existing_script(script);
    }

    Ok(ctx)
}

pub async fn handle_prompt<T: Transport>(
    client: &BackendClient<T>,
    config: &mut Config,
    session_token: &str,
    request: &PromptRequest<'_>,
) -> Result<()> {
    let pwd = std::env::current_dir().context("Failed to read the current directory")?;
    let ctx = build_context(request, config, &pwd)?;

    let result = client
        .process_prompt(&ctx, session_token)
        .await
        .context("Failed to process prompt")?
        .into_value();
    let kind = ActionKind::classify(&result.action_type);
    debug!(action_type = %result.action_type, ?kind, "prompt processed");

    if let Some(alias) = request.alias
        && kind.is_saveable()
    {
        config.set_alias(alias, &result.response);
        config.save().context("Failed to save alias")?;
        info!(alias, "alias saved");
    }

    match kind {
        ActionKind::Command => {
            println!("{}", style(&result.response).bold());
            if confirm("Run this command?")? {
                run_and_debug(client, session_token, &result.response).await?;
            }
        }
        ActionKind::Script => {
            println!("{}", result.response);
            if let Some(alias) = request.alias {
                println!();
                println!("Saved as alias `{alias}`. Run it with: idk --alias {alias}");
            }
        }
        ActionKind::ProjectInit => {
            if !result.response.trim().is_empty() {
                println!("{}", result.response);
            }
            init_project(client, session_token, &pwd).await?;
        }
        ActionKind::Message => println!("{}", result.response),
    }

    Ok(())
}

/// Run a saved alias.
pub async fn run_alias<T: Transport>(
    client: &BackendClient<T>,
    config: &Config,
    name: &str,
) -> Result<()> {
    let Some(body) = config.alias(name) else {
        anyhow::bail!("No alias named `{name}`. Save one with: idk --alias {name} <prompt>");
    };
    println!("{}", style(body).bold());

    match config.session_token() {
        Some(token) => run_and_debug(client, token, body).await,
        None => run_shell(body).await.map_err(Into::into),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

/// Run `command`; on failure ask the backend how to fix it.
async fn run_and_debug<T: Transport>(
    client: &BackendClient<T>,
    session_token: &str,
    command: &str,
) -> Result<()> {
    let Err(failure) = run_shell(command).await else {
        return Ok(());
    };

    print_debug_help(client, session_token, command, &failure)
        .await
        .with_context(|| failure.to_string())?;
    Err(failure.into())
}

async fn print_debug_help<T: Transport>(
    client: &BackendClient<T>,
    session_token: &str,
    command: &str,
    failure: &CommandFailure,
) -> Result<()> {
    println!();
    println!("{}", style("The command failed. Asking idk what went wrong...").yellow());
    let help = client
        .process_debug_command(command, current_os(), failure, session_token)
        .await
        .context("Failed to debug command")?
        .into_value();
    println!("{}", help.response);
    Ok(())
}

async fn init_project<T: Transport>(
    client: &BackendClient<T>,
    session_token: &str,
    dir: &Path,
) -> Result<()> {
    let snapshot = ProjectSnapshot::collect(dir)?;
    let plan = client
        .get_project_init(
            &snapshot.folder_name,
            &snapshot.files,
            &snapshot.readme,
            &snapshot.makefile,
            current_os(),
            session_token,
        )
        .await
        .context("Failed to get project init plan")?
        .into_value();

    print_plan(&plan);
    if plan.commands.is_empty() {
        return Ok(());
    }

    if !confirm(&format!("Run these {} commands?", plan.commands.len()))? {
        return Ok(());
    }

    for step in &plan.commands {
        println!();
        println!("{} {}", style("$").dim(), style(&step.command).bold());
        run_and_debug(client, session_token, &step.command).await?;
    }
    Ok(())
}

pub fn render_plan(plan: &ProjectInitPlan) -> String {
    use std::fmt::Write;

    let mut out = format!("Detected project type: {}\n", plan.project_type);
    for (i, step) in plan.commands.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}  # {}", i + 1, step.command, step.description);
    }
    out
}

fn print_plan(plan: &ProjectInitPlan) {
    print!("{}", render_plan(plan));
}
