//! GitHub pull request client

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use reviewrot_core::{AgeFilter, GithubConfig, LastComment, Platform, ReviewRecord};

use crate::error::{Error, Result};
use crate::ReviewService;

const API_ROOT: &str = "https://api.github.com";
const USER_AGENT: &str = "reviewrot";

/// GitHub API client polling open pull requests
pub struct GithubClient {
    http: reqwest::Client,
    token: String,
    repos: Vec<String>,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: config.token.clone(),
            repos: config.repos.clone(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn fetch_repo(
        &self,
        repo: &str,
        age: Option<&AgeFilter>,
    ) -> Result<Vec<ReviewRecord>> {
        let (owner, name) = parse_repo(repo)?;

        let url = format!("{}/repos/{}/{}/pulls?state=open", API_ROOT, owner, name);
        let pulls: Vec<PullRequest> = self.get(&url).await?;

        debug!(repo = %repo, count = pulls.len(), "Fetched open pull requests");

        let mut records = Vec::new();
        for pull in pulls {
            if let Some(filter) = age {
                if !filter.passes(pull.created_at) {
                    continue;
                }
            }

            let comments_url = format!(
                "{}/repos/{}/{}/issues/{}/comments",
                API_ROOT, owner, name, pull.number
            );
            let comments: Vec<IssueComment> = self.get(&comments_url).await?;

            let mut record = ReviewRecord::new(
                Platform::Github,
                pull.user.login,
                pull.title,
                pull.html_url,
                pull.created_at,
            )
            .with_comments(comments.len() as u64)
            .with_project(repo, format!("https://github.com/{}", repo));

            if let Some(avatar) = pull.user.avatar_url {
                record = record.with_image(avatar);
            }
            if let Some(last) = comments.last() {
                record = record.with_last_comment(LastComment::new(
                    last.user.login.clone(),
                    last.body.clone().unwrap_or_default(),
                    last.created_at,
                ));
            }

            records.push(record);
        }

        Ok(records)
    }
}

#[async_trait]
impl ReviewService for GithubClient {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn request_reviews(&self, age: Option<&AgeFilter>) -> Result<Vec<ReviewRecord>> {
        let mut records = Vec::new();
        for repo in &self.repos {
            records.extend(self.fetch_repo(repo, age).await?);
        }
        Ok(records)
    }
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("repos", &self.repos)
            .finish_non_exhaustive()
    }
}

/// Split an `owner/repo` entry into its parts
fn parse_repo(repo: &str) -> Result<(&str, &str)> {
    let mut parts = repo.splitn(2, '/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(name))
            if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok((owner, name.trim_end_matches(".git")))
        }
        _ => Err(Error::Config(format!(
            "Invalid repository format: {}. Expected owner/repo",
            repo
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    number: u64,
    title: String,
    html_url: String,
    created_at: DateTime<Utc>,
    user: Account,
}

#[derive(Debug, Deserialize)]
struct Account {
    login: String,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IssueComment {
    body: Option<String>,
    created_at: DateTime<Utc>,
    user: Account,
}
