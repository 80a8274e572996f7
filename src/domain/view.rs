use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use super::types::{Category, CategoryTone, ClassificationResult};

pub const SUBJECT_PREFIX: &str = "Re: ";
pub const SUBJECT_EXCERPT_CHARS: usize = 40;

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRecord {
    pub original_email: String,
    pub category: String,
    pub suggested_reply: String,
    pub confidence_score: f64,
    pub subject: String,
    pub reply_link: String,
}

impl From<ClassificationResult> for ViewRecord {
    fn from(result: ClassificationResult) -> Self {
        let subject = derive_subject(&result.original_email);
        let reply_link = build_reply_link(&subject, &result.suggested_reply);
        Self {
            original_email: result.original_email,
            category: result.category,
            suggested_reply: result.suggested_reply,
            confidence_score: result.confidence_score,
            subject,
            reply_link,
        }
    }
}

impl ViewRecord {
    pub fn category_kind(&self) -> Category {
        Category::from_label(&self.category)
    }

    pub fn category_tone(&self) -> CategoryTone {
        self.category_kind().tone()
    }

    pub fn category_label(&self) -> String {
        let mut chars = self.category.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence_score * 100.0)
    }
}

/// `"Re: "` + first 40 characters of the email + `"..."`; shorter emails are used whole.
pub fn derive_subject(original_email: &str) -> String {
    let excerpt: String = original_email.chars().take(SUBJECT_EXCERPT_CHARS).collect();
    format!("{SUBJECT_PREFIX}{excerpt}...")
}

pub fn build_reply_link(subject: &str, body: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        encode_component(subject),
        encode_component(body)
    )
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}
