use super::decode::decode_records;
use super::{BackendClient, PROJECT_INIT_PATH, ProjectInitPlan, Reply, Transport};
use crate::error::ClientError;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectInitRequest<'a> {
    files: &'a [String],
    readme: &'a str,
    makefile: &'a str,
    os: &'a str,
    project_folder_name: &'a str,
}

impl<T: Transport> BackendClient<T> {
    /// Ask for an ordered setup plan for the project in `project_folder_name`.
    ///
    /// The whole body must decode as a plan; one malformed command fails it.
    pub async fn get_project_init(
        &self,
        project_folder_name: &str,
        files: &[String],
        readme_data: &str,
        makefile_data: &str,
        os: &str,
        session_token: &str,
    ) -> Result<Reply<ProjectInitPlan>, ClientError> {
        let request = ProjectInitRequest {
            files,
            readme: readme_data,
            makefile: makefile_data,
            os,
            project_folder_name,
        };
        let raw = self
            .post(PROJECT_INIT_PATH, &request, Some(session_token))
            .await?;
        decode_records(PROJECT_INIT_PATH, &raw, &["commands"])
    }
}
