//! Multi-style rendering of review records
//!
//! Styles are a closed enum dispatched through an exhaustive match; each arm
//! is a pure function of the record (plus the wall clock for the "ago"
//! strings). Unknown style names are rejected when parsing, not at render
//! time.

use std::str::FromStr;

use serde_json::{json, Value};

use super::{format_duration, ReviewRecord};
use crate::error::{Error, Result};

// IRC control bytes
const BOLD: &str = "\x02";
const BLUE: &str = "\x0312";
const RESET_COLOR: &str = "\x03";

/// A named output format for review records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Single line per record
    Oneline,
    /// URL, age and comment count on their own indented lines
    Indented,
    /// Pretty-printed JSON object per record
    Json,
    /// Oneline with IRC bold/color control sequences
    Irc,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Oneline => "oneline",
            Style::Indented => "indented",
            Style::Json => "json",
            Style::Irc => "irc",
        }
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "oneline" => Ok(Style::Oneline),
            "indented" => Ok(Style::Indented),
            "json" => Ok(Style::Json),
            "irc" => Ok(Style::Irc),
            other => Err(Error::UnknownStyle(other.to_string())),
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options shared by the render styles.
///
/// `index`/`total` only affect the JSON style: when both are set, a trailing
/// comma is appended to every record except the last so a caller can emit a
/// JSON array from sequential single-record renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Position of this record in the list being rendered
    pub index: Option<usize>,
    /// Length of the list being rendered
    pub total: Option<usize>,
    /// Include the last comment body in JSON output
    pub show_last_comment: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record's position in the output list
    pub fn with_position(mut self, index: usize, total: usize) -> Self {
        self.index = Some(index);
        self.total = Some(total);
        self
    }

    /// Include the last comment body in JSON output
    pub fn with_comment_body(mut self, show: bool) -> Self {
        self.show_last_comment = show;
        self
    }
}

impl ReviewRecord {
    /// Render this record in the given style.
    ///
    /// All styles agree on content (comment-count suffix omitted at zero,
    /// singular at one; last-comment suffix only when present) and differ
    /// only in layout.
    pub fn render(&self, style: Style, opts: &RenderOptions) -> Result<String> {
        match style {
            Style::Oneline => Ok(self.render_oneline()),
            Style::Indented => Ok(self.render_indented()),
            Style::Json => self.render_json(opts),
            Style::Irc => Ok(self.render_irc()),
        }
    }

    fn render_oneline(&self) -> String {
        let mut out = format!(
            "{} filed '{}' {} {} ago",
            self.user,
            self.title,
            self.url,
            self.since()
        );
        out.push_str(&self.comment_suffix(", "));
        out.push_str(&self.last_comment_suffix(false));
        out
    }

    fn render_indented(&self) -> String {
        let mut out = format!(
            "{} filed '{}'\n\t{}\n\t{} ago",
            self.user,
            self.title,
            self.url,
            self.since()
        );
        out.push_str(&self.comment_suffix("\n\t"));
        out.push_str(&self.last_comment_suffix(false));
        out
    }

    fn render_irc(&self) -> String {
        let mut out = format!(
            "{bold}{}{bold} filed {bold}'{}'{bold} {blue}{}{reset} {} ago",
            self.user,
            self.title,
            self.url,
            self.since(),
            bold = BOLD,
            blue = BLUE,
            reset = RESET_COLOR,
        );
        out.push_str(&self.comment_suffix(", "));
        out.push_str(&self.last_comment_suffix(true));
        out
    }

    fn render_json(&self, opts: &RenderOptions) -> Result<String> {
        let value = self.to_json_value(opts.show_last_comment);
        let mut out = serde_json::to_string_pretty(&value)?;
        if let (Some(index), Some(total)) = (opts.index, opts.total) {
            if index + 1 < total {
                out.push(',');
            }
        }
        Ok(out)
    }

    /// Serialize this record as a JSON value.
    ///
    /// Callers that own array assembly should prefer this over the JSON
    /// render style and its trailing-comma contract.
    pub fn to_json_value(&self, show_last_comment: bool) -> Value {
        let mut data = json!({
            "user": self.user,
            "title": self.title,
            "url": self.url,
            "relative_time": self.since(),
            "time": self.created_at.timestamp(),
            "comments": self.comments,
            "type": self.platform.type_name(),
            "image": self.image,
        });

        if let Some(last_comment) = &self.last_comment {
            let mut comment = json!({
                "author": last_comment.author,
                "created_at": last_comment.created_at.timestamp(),
            });
            if show_last_comment {
                comment["body"] = Value::String(last_comment.body.clone());
            }
            data["last_comment"] = comment;
        }

        data
    }

    fn comment_suffix(&self, sep: &str) -> String {
        match self.comments {
            0 => String::new(),
            1 => format!("{}1 comment", sep),
            n => format!("{}{} comments", sep, n),
        }
    }

    fn last_comment_suffix(&self, bold: bool) -> String {
        match &self.last_comment {
            Some(last_comment) if bold => format!(
                ", last comment by {bold}{}{bold} {} ago",
                last_comment.author,
                format_duration(last_comment.created_at),
                bold = BOLD,
            ),
            Some(last_comment) => format!(
                ", last comment by {} {} ago",
                last_comment.author,
                format_duration(last_comment.created_at),
            ),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{LastComment, Platform};
    use chrono::{Duration, TimeZone, Utc};

    // Fresh records render a stable "less than 1 minute" age
    fn fresh_record() -> ReviewRecord {
        ReviewRecord::new(
            Platform::Github,
            "alice",
            "Fix bug",
            "https://github.com/org/repo/pull/7",
            Utc::now() - Duration::seconds(5),
        )
    }

    fn fresh_comment() -> LastComment {
        LastComment::new("bob", "looks good", Utc::now() - Duration::seconds(5))
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("oneline".parse::<Style>().unwrap(), Style::Oneline);
        assert_eq!("indented".parse::<Style>().unwrap(), Style::Indented);
        assert_eq!("json".parse::<Style>().unwrap(), Style::Json);
        assert_eq!("irc".parse::<Style>().unwrap(), Style::Irc);
    }

    #[test]
    fn test_style_from_str_unknown() {
        let err = "yaml".parse::<Style>().unwrap_err();
        assert!(matches!(err, Error::UnknownStyle(s) if s == "yaml"));
    }

    #[test]
    fn test_oneline_no_comments() {
        let out = fresh_record()
            .render(Style::Oneline, &RenderOptions::new())
            .unwrap();
        assert_eq!(
            out,
            "alice filed 'Fix bug' https://github.com/org/repo/pull/7 less than 1 minute ago"
        );
    }

    #[test]
    fn test_oneline_singular_comment() {
        let out = fresh_record()
            .with_comments(1)
            .render(Style::Oneline, &RenderOptions::new())
            .unwrap();
        assert!(out.ends_with(", 1 comment"));
        assert!(!out.contains("comments"));
    }

    #[test]
    fn test_oneline_plural_comments() {
        let out = fresh_record()
            .with_comments(3)
            .render(Style::Oneline, &RenderOptions::new())
            .unwrap();
        assert!(out.ends_with(", 3 comments"));
    }

    #[test]
    fn test_oneline_last_comment() {
        let out = fresh_record()
            .with_comments(1)
            .with_last_comment(fresh_comment())
            .render(Style::Oneline, &RenderOptions::new())
            .unwrap();
        assert!(out.ends_with(", 1 comment, last comment by bob less than 1 minute ago"));
    }

    #[test]
    fn test_indented_layout() {
        let out = fresh_record()
            .with_comments(2)
            .render(Style::Indented, &RenderOptions::new())
            .unwrap();
        assert_eq!(
            out,
            "alice filed 'Fix bug'\n\thttps://github.com/org/repo/pull/7\n\tless than 1 minute ago\n\t2 comments"
        );
    }

    #[test]
    fn test_indented_last_comment_inline_after_count() {
        let out = fresh_record()
            .with_comments(2)
            .with_last_comment(fresh_comment())
            .render(Style::Indented, &RenderOptions::new())
            .unwrap();
        assert!(out.ends_with("\n\t2 comments, last comment by bob less than 1 minute ago"));
    }

    #[test]
    fn test_indented_no_comments_omits_count_line() {
        let out = fresh_record()
            .render(Style::Indented, &RenderOptions::new())
            .unwrap();
        assert!(out.ends_with("less than 1 minute ago"));
        assert!(!out.contains("comment"));
    }

    #[test]
    fn test_irc_control_sequences() {
        let out = fresh_record()
            .render(Style::Irc, &RenderOptions::new())
            .unwrap();
        assert_eq!(
            out,
            "\x02alice\x02 filed \x02'Fix bug'\x02 \x0312https://github.com/org/repo/pull/7\x03 less than 1 minute ago"
        );
    }

    #[test]
    fn test_irc_bolds_last_comment_author() {
        let out = fresh_record()
            .with_last_comment(fresh_comment())
            .render(Style::Irc, &RenderOptions::new())
            .unwrap();
        assert!(out.ends_with(", last comment by \x02bob\x02 less than 1 minute ago"));
    }

    #[test]
    fn test_json_fields() {
        let created = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();
        let record = ReviewRecord::new(Platform::Gitlab, "alice", "Fix bug", "https://x", created)
            .with_comments(2);
        let value = record.to_json_value(false);

        assert_eq!(value["user"], "alice");
        assert_eq!(value["title"], "Fix bug");
        assert_eq!(value["url"], "https://x");
        assert_eq!(value["time"], created.timestamp());
        assert_eq!(value["comments"], 2);
        assert_eq!(value["type"], "GitlabReview");
        assert!(value["image"].is_null());
        assert!(value.get("last_comment").is_none());
        assert!(value["relative_time"].is_string());
    }

    #[test]
    fn test_json_last_comment_body_gated() {
        let commented = fresh_record().with_last_comment(fresh_comment());

        let without_body = commented.to_json_value(false);
        assert!(without_body["last_comment"].is_object());
        assert!(without_body["last_comment"].get("body").is_none());
        assert_eq!(without_body["last_comment"]["author"], "bob");

        let with_body = commented.to_json_value(true);
        assert_eq!(with_body["last_comment"]["body"], "looks good");
    }

    #[test]
    fn test_json_trailing_comma_before_last() {
        let out = fresh_record()
            .render(Style::Json, &RenderOptions::new().with_position(0, 3))
            .unwrap();
        assert!(out.ends_with(','));
        // still valid JSON once the comma is trimmed
        let parsed: Value = serde_json::from_str(out.trim_end_matches(',')).unwrap();
        assert_eq!(parsed["user"], "alice");
    }

    #[test]
    fn test_json_no_comma_on_last() {
        let out = fresh_record()
            .render(Style::Json, &RenderOptions::new().with_position(2, 3))
            .unwrap();
        assert!(!out.ends_with(','));
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["type"], "GithubReview");
    }

    #[test]
    fn test_json_single_element_no_comma() {
        let out = fresh_record()
            .render(Style::Json, &RenderOptions::new().with_position(0, 1))
            .unwrap();
        assert!(!out.ends_with(','));
    }

    #[test]
    fn test_json_without_position_is_bare_object() {
        let out = fresh_record()
            .render(Style::Json, &RenderOptions::new())
            .unwrap();
        assert!(!out.ends_with(','));
        assert!(serde_json::from_str::<Value>(&out).is_ok());
    }

    #[test]
    fn test_json_pretty_printed_two_space_indent() {
        let out = fresh_record()
            .render(Style::Json, &RenderOptions::new())
            .unwrap();
        assert!(out.contains("\n  \"user\""));
    }
}
