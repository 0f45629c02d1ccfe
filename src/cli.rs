use clap::Parser;
use std::path::PathBuf;

/// `idk` - ask your terminal in plain English.
#[derive(Parser, Debug)]
#[command(name = "idk")]
#[command(version)]
#[command(
    about = "Turn plain-English prompts into terminal commands and scripts.",
    long_about = None
)]
pub struct Cli {
    /// Prompt in plain English to execute terminal commands or scripts
    #[arg(value_name = "PROMPT")]
    pub prompt: Vec<String>,

    /// Log in to idk with Google
    #[arg(long, conflicts_with_all = ["logout", "prompt", "readme", "alias"])]
    pub login: bool,

    /// Log out of idk
    #[arg(long, conflicts_with_all = ["prompt", "readme", "alias"])]
    pub logout: bool,

    /// Path of your script's readme file to send with the prompt
    #[arg(long, value_name = "PATH")]
    pub readme: Option<PathBuf>,

    /// Save the result under this alias, or run a saved alias when no prompt is given
    #[arg(long, value_name = "NAME")]
    pub alias: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a single invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Login,
    Logout,
    Prompt {
        prompt: String,
        readme: Option<PathBuf>,
        alias: Option<String>,
    },
    RunAlias(String),
    Help,
}

impl Cli {
    pub fn prompt_text(&self) -> String {
        self.prompt.join(" ").trim().to_string()
    }

    pub fn mode(&self) -> Mode {
        if self.login {
            return Mode::Login;
        }
        if self.logout {
            return Mode::Logout;
        }

        let prompt = self.prompt_text();
        match (prompt.is_empty(), &self.alias) {
            (true, Some(alias)) => Mode::RunAlias(alias.clone()),
            (true, None) => Mode::Help,
            (false, alias) => Mode::Prompt {
                prompt,
                readme: self.readme.clone(),
                alias: alias.clone(),
            },
        }
    }
}
