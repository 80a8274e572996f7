use std::env;

use super::env::{AppConfig, ClassifierConfig, DirectoryConfig, LoggingConfig};

pub fn load_config() -> AppConfig {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Self {
        let classifier = ClassifierConfig {
            base_url: non_empty("CLASSIFIER_API_URL").or_else(|| non_empty("NEXT_PUBLIC_API_URL")),
            user_agent: non_empty("HTTP_USER_AGENT")
                .unwrap_or_else(|| format!("email-triage/{}", env!("CARGO_PKG_VERSION"))),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        Self {
            classifier,
            directories,
            logging,
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
