//! Gerrit change client
//!
//! Gerrit prefixes its JSON responses with the `)]}'` XSSI guard, and its
//! timestamps are `"YYYY-MM-DD HH:MM:SS.nnnnnnnnn"` in UTC rather than
//! RFC 3339, so both get dedicated handling here.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use reviewrot_core::{AgeFilter, GerritConfig, LastComment, Platform, ReviewRecord};

use crate::error::{Error, Result};
use crate::ReviewService;

const XSSI_PREFIX: &str = ")]}'";
const GERRIT_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Gerrit API client polling open changes
pub struct GerritClient {
    http: reqwest::Client,
    host: String,
    repos: Vec<String>,
}

impl GerritClient {
    pub fn new(config: &GerritConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            host: config.host.trim_end_matches('/').to_string(),
            repos: config.repos.clone(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        decode_response(&body)
    }

    async fn fetch_project(
        &self,
        project: &str,
        age: Option<&AgeFilter>,
    ) -> Result<Vec<ReviewRecord>> {
        let url = format!(
            "{}/changes/?q=project:{}+status:open&o=MESSAGES&o=DETAILED_ACCOUNTS",
            self.host, project
        );
        let changes: Vec<Change> = self.get(&url).await?;

        debug!(project = %project, count = changes.len(), "Fetched open changes");

        let mut records = Vec::new();
        for change in changes {
            if let Some(filter) = age {
                if !filter.passes(change.created) {
                    continue;
                }
            }

            let mut record = ReviewRecord::new(
                Platform::Gerrit,
                change.owner.display_name(),
                change.subject,
                format!("{}/#/c/{}", self.host, change.number),
                change.created,
            )
            .with_comments(change.messages.len() as u64)
            .with_project(
                change.project.clone(),
                format!("{}/#/q/project:{}", self.host, change.project),
            );

            if let Some(message) = change.messages.last() {
                let author = message
                    .author
                    .as_ref()
                    .map(Account::display_name)
                    .unwrap_or_else(|| "unknown".to_string());
                record = record.with_last_comment(LastComment::new(
                    author,
                    message.message.clone(),
                    message.date,
                ));
            }

            records.push(record);
        }

        Ok(records)
    }
}

#[async_trait]
impl ReviewService for GerritClient {
    fn name(&self) -> &'static str {
        "gerrit"
    }

    async fn request_reviews(&self, age: Option<&AgeFilter>) -> Result<Vec<ReviewRecord>> {
        let mut records = Vec::new();
        for project in &self.repos {
            records.extend(self.fetch_project(project, age).await?);
        }
        Ok(records)
    }
}

impl std::fmt::Debug for GerritClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GerritClient")
            .field("host", &self.host)
            .field("repos", &self.repos)
            .finish_non_exhaustive()
    }
}

/// Strip Gerrit's XSSI prefix and decode the remainder as JSON
pub fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let content = body.trim();
    let content = content.strip_prefix(XSSI_PREFIX).unwrap_or(content).trim_start();

    serde_json::from_str(content)
        .map_err(|_| Error::MalformedResponse(content.to_string()))
}

fn gerrit_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&s, GERRIT_TIMESTAMP)
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize)]
struct Change {
    subject: String,
    project: String,
    #[serde(rename = "_number")]
    number: u64,
    #[serde(deserialize_with = "gerrit_timestamp")]
    created: DateTime<Utc>,
    owner: Account,
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct Account {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

impl Account {
    fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[derive(Debug, Deserialize)]
struct Message {
    message: String,
    #[serde(deserialize_with = "gerrit_timestamp")]
    date: DateTime<Utc>,
    #[serde(default)]
    author: Option<Account>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_decode_response_strips_prefix() {
        let value: Value = decode_response(")]}'\n{\"a\": 1}").unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_decode_response_without_prefix() {
        let value: Value = decode_response("{\"a\": 1}").unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_decode_response_malformed() {
        let err = decode_response::<Value>(")]}'\nnot json").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(s) if s == "not json"));
    }

    #[test]
    fn test_deserialize_change() {
        let change: Change = decode_response(
            r#")]}'
            {
                "subject": "Refactor scheduler",
                "project": "tools/scheduler",
                "_number": 4521,
                "created": "2026-06-01 10:15:30.000000000",
                "owner": {"name": "Erin Example", "username": "erin"},
                "messages": [
                    {
                        "message": "Patch Set 1: Code-Review+1",
                        "date": "2026-06-02 11:00:00.000000000",
                        "author": {"name": "Frank Example"}
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(change.number, 4521);
        assert_eq!(change.owner.display_name(), "Erin Example");
        assert_eq!(change.created.timestamp(), 1_780_308_930);
        assert_eq!(change.messages.len(), 1);
        assert_eq!(
            change.messages[0].author.as_ref().unwrap().display_name(),
            "Frank Example"
        );
    }

    #[test]
    fn test_account_display_name_fallbacks() {
        let account = Account {
            name: None,
            username: Some("erin".to_string()),
        };
        assert_eq!(account.display_name(), "erin");

        let account = Account {
            name: None,
            username: None,
        };
        assert_eq!(account.display_name(), "unknown");
    }
}
