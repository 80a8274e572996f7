use thiserror::Error;
use url::Url;

pub const CLASSIFY_BATCH_PATH: &str = "classify-batch/";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ClassifierConfig {
    pub base_url: Option<String>,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid classifier base url {value:?}: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

impl ClassifierConfig {
    pub fn batch_endpoint(&self) -> Result<Url, ConfigError> {
        let raw = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("CLASSIFIER_API_URL"))?;

        let invalid = |source| ConfigError::InvalidUrl {
            value: raw.to_string(),
            source,
        };
        let mut base = Url::parse(raw).map_err(invalid)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(CLASSIFY_BATCH_PATH).map_err(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(url: &str) -> ClassifierConfig {
        ClassifierConfig {
            base_url: Some(url.to_string()),
            ..ClassifierConfig::default()
        }
    }

    #[test]
    fn endpoint_appends_batch_path() {
        let config = base("https://api.example.com");
        let url = config.batch_endpoint().unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/classify-batch/");
    }

    #[test]
    fn endpoint_keeps_base_path_and_tolerates_trailing_slash() {
        let config = base("http://127.0.0.1:8000/api/");
        let url = config.batch_endpoint().unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/classify-batch/");

        let config = base("http://127.0.0.1:8000/api");
        let url = config.batch_endpoint().unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/classify-batch/");
    }

    #[test]
    fn endpoint_missing_or_blank_is_an_error() {
        let config = ClassifierConfig::default();
        assert!(matches!(
            config.batch_endpoint(),
            Err(ConfigError::Missing("CLASSIFIER_API_URL"))
        ));

        let config = base("   ");
        assert!(matches!(config.batch_endpoint(), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn endpoint_rejects_unparseable_url() {
        let config = base("not a url");
        assert!(matches!(
            config.batch_endpoint(),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
