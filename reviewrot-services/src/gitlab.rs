//! GitLab merge request client

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use reviewrot_core::{AgeFilter, GitlabConfig, LastComment, Platform, ReviewRecord};

use crate::error::Result;
use crate::ReviewService;

/// GitLab API client polling open merge requests
pub struct GitlabClient {
    http: reqwest::Client,
    host: String,
    token: String,
    repos: Vec<String>,
}

impl GitlabClient {
    pub fn new(config: &GitlabConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            host: config.host.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            repos: config.repos.clone(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn fetch_project(
        &self,
        project: &str,
        age: Option<&AgeFilter>,
    ) -> Result<Vec<ReviewRecord>> {
        let encoded = encode_project_path(project);

        let url = format!(
            "{}/api/v4/projects/{}/merge_requests?state=opened",
            self.host, encoded
        );
        let merge_requests: Vec<MergeRequest> = self.get(&url).await?;

        debug!(project = %project, count = merge_requests.len(), "Fetched open merge requests");

        let mut records = Vec::new();
        for mr in merge_requests {
            if let Some(filter) = age {
                if !filter.passes(mr.created_at) {
                    continue;
                }
            }

            let mut record = ReviewRecord::new(
                Platform::Gitlab,
                mr.author.username,
                mr.title,
                mr.web_url,
                mr.created_at,
            )
            .with_comments(mr.user_notes_count)
            .with_project(project, format!("{}/{}", self.host, project));

            if let Some(avatar) = mr.author.avatar_url {
                record = record.with_image(avatar);
            }
            if mr.user_notes_count > 0 {
                let notes_url = format!(
                    "{}/api/v4/projects/{}/merge_requests/{}/notes?sort=desc",
                    self.host, encoded, mr.iid
                );
                let notes: Vec<Note> = self.get(&notes_url).await?;
                if let Some(note) = notes.iter().find(|n| !n.system) {
                    record = record.with_last_comment(LastComment::new(
                        note.author.username.clone(),
                        note.body.clone(),
                        note.created_at,
                    ));
                }
            }

            records.push(record);
        }

        Ok(records)
    }
}

#[async_trait]
impl ReviewService for GitlabClient {
    fn name(&self) -> &'static str {
        "gitlab"
    }

    async fn request_reviews(&self, age: Option<&AgeFilter>) -> Result<Vec<ReviewRecord>> {
        let mut records = Vec::new();
        for project in &self.repos {
            records.extend(self.fetch_project(project, age).await?);
        }
        Ok(records)
    }
}

impl std::fmt::Debug for GitlabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitlabClient")
            .field("host", &self.host)
            .field("repos", &self.repos)
            .finish_non_exhaustive()
    }
}

/// Percent-encode a `group/project` path for use as a project id
fn encode_project_path(path: &str) -> String {
    path.replace('/', "%2F")
}

#[derive(Debug, Deserialize)]
struct MergeRequest {
    iid: u64,
    title: String,
    web_url: String,
    created_at: DateTime<Utc>,
    user_notes_count: u64,
    author: Account,
}

#[derive(Debug, Deserialize)]
struct Account {
    username: String,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Note {
    body: String,
    created_at: DateTime<Utc>,
    author: Account,
    #[serde(default)]
    system: bool,
}
