/// What the CLI should do with a prompt's response text.
///
/// The backend's action classification is free-form; anything not recognised
/// here is shown to the user as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Response is a single shell command to confirm and run.
    Command,
    /// Response is a script to show (and optionally save under an alias).
    Script,
    /// The current directory is a project that needs initialising.
    ProjectInit,
    /// Anything else: show the text.
    Message,
}

impl ActionKind {
    pub fn classify(action_type: &str) -> Self {
        let normalized = action_type.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "command" | "run_command" | "cmd" => Self::Command,
            "script" | "create_script" | "write_script" => Self::Script,
            "project_init" | "init" | "run_init" | "init_project" => Self::ProjectInit,
            _ => Self::Message,
        }
    }

    /// Whether the response text can be saved as an alias.
    pub fn is_saveable(self) -> bool {
        matches!(self, Self::Command | Self::Script)
    }
}
