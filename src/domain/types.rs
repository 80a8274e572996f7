use serde::{Deserialize, Serialize};

use super::batch::{join_emails, split_emails};

pub const PRODUCTIVE_LABEL: &str = "produtivo";
pub const UNPRODUCTIVE_LABEL: &str = "improdutivo";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRequest {
    pub text: String,
}

impl BatchRequest {
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self { text })
        }
    }

    pub fn from_emails<S: AsRef<str>>(emails: &[S]) -> Option<Self> {
        Self::new(join_emails(emails))
    }

    pub fn email_count(&self) -> usize {
        split_emails(&self.text).len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub original_email: String,
    pub category: String,
    pub suggested_reply: String,
    pub confidence_score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Productive,
    Unproductive,
    Other(String),
}

impl Category {
    pub fn from_label(label: &str) -> Self {
        match label {
            PRODUCTIVE_LABEL => Self::Productive,
            UNPRODUCTIVE_LABEL => Self::Unproductive,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn tone(&self) -> CategoryTone {
        match self {
            Self::Productive => CategoryTone::Productive,
            Self::Unproductive => CategoryTone::Unproductive,
            Self::Other(_) => CategoryTone::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryTone {
    Productive,
    Unproductive,
    Other,
}
