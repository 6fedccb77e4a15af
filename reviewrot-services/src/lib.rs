//! Reviewrot Services - platform clients producing normalized review records
//!
//! One client per supported platform (GitHub, GitLab, Gerrit). Each client
//! fetches the open reviews for its configured repositories, applies the age
//! filter, and hands back [`ReviewRecord`]s; everything downstream of that
//! is platform-agnostic.

pub mod error;
pub mod gerrit;
pub mod github;
pub mod gitlab;

pub use error::{Error, Result};
pub use gerrit::GerritClient;
pub use github::GithubClient;
pub use gitlab::GitlabClient;

use async_trait::async_trait;
use reviewrot_core::{AgeFilter, ReviewRecord};

/// A source of pending review requests.
///
/// Implementations fetch open reviews for their configured repositories and
/// discard those the age filter rejects. No retries, no pagination; a single
/// request per endpoint.
#[async_trait]
pub trait ReviewService {
    /// Short platform name, for logging
    fn name(&self) -> &'static str;

    /// Fetch pending reviews, filtered by age when a bound is given
    async fn request_reviews(&self, age: Option<&AgeFilter>) -> Result<Vec<ReviewRecord>>;
}
