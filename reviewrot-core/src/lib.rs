//! Reviewrot Core - shared review-record model, filtering and rendering
//!
//! This crate holds everything the platform clients and the CLI agree on:
//! the normalized [`ReviewRecord`], calendar-aware age math, the age filter,
//! the output styles and the configuration schema. It performs no I/O and
//! keeps no state; every operation is a function of its inputs and, where
//! ages are involved, the current UTC time.

pub mod config;
pub mod error;
pub mod filter;
pub mod review;

pub use config::{Config, GerritConfig, GithubConfig, GitlabConfig};
pub use error::{Error, Result};
pub use filter::{check_request_age, has_new_comments, AgeFilter, AgeState, AgeUnit};
pub use review::{
    format_duration, format_duration_at, LastComment, Platform, RelativeDelta, RenderOptions,
    ReviewRecord, Style,
};
