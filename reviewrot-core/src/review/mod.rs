//! Normalized review records
//!
//! Platform clients parse raw API payloads into [`ReviewRecord`]s so that
//! filtering and rendering never have to know which service a review came
//! from. Records are immutable value objects: built once, rendered, dropped.

mod delta;
mod render;

pub use delta::{format_duration, format_duration_at, RelativeDelta};
pub use render::{RenderOptions, Style};

use chrono::{DateTime, Utc};

/// The platform a review originated from.
///
/// Only used as the `type` discriminator in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Github,
    Gitlab,
    Gerrit,
}

impl Platform {
    /// Discriminator string for the JSON `type` field
    pub fn type_name(&self) -> &'static str {
        match self {
            Platform::Github => "GithubReview",
            Platform::Gitlab => "GitlabReview",
            Platform::Gerrit => "GerritReview",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// The most recent comment on a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastComment {
    /// Comment author display name
    pub author: String,
    /// Comment text
    pub body: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

impl LastComment {
    pub fn new(
        author: impl Into<String>,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
            created_at,
        }
    }
}

/// A single pending review request, normalized across platforms
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    /// Display name of the review submitter
    pub user: String,
    /// Review subject
    pub title: String,
    /// Canonical link to the review
    pub url: String,
    /// When the review was filed (UTC)
    pub created_at: DateTime<Utc>,
    /// Number of comments on the review
    pub comments: u64,
    /// Originating platform
    pub platform: Platform,
    /// Avatar URL for the submitter
    pub image: Option<String>,
    /// Most recent comment, if the review has any
    pub last_comment: Option<LastComment>,
    /// Platform-specific project name
    pub project_name: Option<String>,
    /// Platform-specific project URL
    pub project_url: Option<String>,
}

impl ReviewRecord {
    /// Create a record with the required fields; optional fields start unset
    pub fn new(
        platform: Platform,
        user: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user: user.into(),
            title: title.into(),
            url: url.into(),
            created_at,
            comments: 0,
            platform,
            image: None,
            last_comment: None,
            project_name: None,
            project_url: None,
        }
    }

    /// Set the comment count
    pub fn with_comments(mut self, comments: u64) -> Self {
        self.comments = comments;
        self
    }

    /// Set the submitter avatar URL
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the most recent comment
    pub fn with_last_comment(mut self, last_comment: LastComment) -> Self {
        self.last_comment = Some(last_comment);
        self
    }

    /// Set the project name and URL
    pub fn with_project(
        mut self,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.project_name = Some(name.into());
        self.project_url = Some(url.into());
        self
    }

    /// How long this review has been pending, against the current UTC time
    pub fn since(&self) -> String {
        format_duration(self.created_at)
    }

    /// How long this review has been pending as of `now`
    pub fn since_at(&self, now: DateTime<Utc>) -> String {
        format_duration_at(self.created_at, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_platform_type_names() {
        assert_eq!(Platform::Github.type_name(), "GithubReview");
        assert_eq!(Platform::Gitlab.type_name(), "GitlabReview");
        assert_eq!(Platform::Gerrit.type_name(), "GerritReview");
    }

    #[test]
    fn test_record_builder() {
        let created = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();
        let record = ReviewRecord::new(
            Platform::Github,
            "alice",
            "Fix the frobnicator",
            "https://github.com/org/repo/pull/7",
            created,
        )
        .with_comments(3)
        .with_image("https://avatars.example/alice.png")
        .with_project("org/repo", "https://github.com/org/repo");

        assert_eq!(record.user, "alice");
        assert_eq!(record.comments, 3);
        assert_eq!(record.image.as_deref(), Some("https://avatars.example/alice.png"));
        assert_eq!(record.project_name.as_deref(), Some("org/repo"));
        assert!(record.last_comment.is_none());
    }

    #[test]
    fn test_since_at_is_calendar_aware() {
        let created = Utc.with_ymd_and_hms(2024, 5, 30, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let record = ReviewRecord::new(Platform::Gerrit, "bob", "t", "u", created);
        assert_eq!(record.since_at(now), "2 years 3 months");
    }
}
