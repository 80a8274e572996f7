use once_cell::sync::Lazy;
use regex::Regex;

pub const SEPARATOR: &str = "---";

static SEPARATOR_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*---[ \t]*\r?$").expect("valid separator regex"));

pub fn join_emails<S: AsRef<str>>(emails: &[S]) -> String {
    emails
        .iter()
        .map(|email| email.as_ref().trim())
        .filter(|email| !email.is_empty())
        .collect::<Vec<_>>()
        .join(&format!("\n{SEPARATOR}\n"))
}

pub fn split_emails(text: &str) -> Vec<&str> {
    SEPARATOR_LINE
        .split(text)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}
