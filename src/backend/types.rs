use serde::{Deserialize, Serialize};

/// Result of a successful backend call, with the status it was served under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
    pub status: u16,
    pub value: T,
}

impl<T> Reply<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Local context sent alongside a prompt.
///
/// Every field reaches the wire; missing readme or script go out as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    pub prompt: String,
    pub os: String,
    pub readme_data: Option<String>,
    pub existing_script: Option<String>,
    pub pwd: String,
}

impl ExecutionContext {
    pub fn new(prompt: impl Into<String>, os: impl Into<String>, pwd: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            os: os.into(),
            readme_data: None,
            existing_script: None,
            pwd: pwd.into(),
        }
    }

    pub fn with_readme(mut self, readme: impl Into<String>) -> Self {
        self.readme_data = Some(readme.into());
        self
    }

    pub fn with_existing_script(mut self, script: impl Into<String>) -> Self {
        self.existing_script = Some(script.into());
        self
    }
}

/// Backend answer to a prompt.
///
/// `action_type` is passed through untouched; deciding what to do with it is
/// up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResult {
    pub response: String,
    pub action_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DebugResult {
    pub response: String,
}

/// Ordered setup plan for a detected project type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInitPlan {
    pub project_type: String,
    pub commands: Vec<PlanCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCommand {
    pub command: String,
    pub description: String,
}
