use serde_json::Value;
use thiserror::Error;

use crate::domain::ClassificationResult;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of results, got {0}")]
    NotAnArray(&'static str),
    #[error("result #{index} is malformed: {source}")]
    Item {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("result #{index} has confidence_score {value} outside [0, 1]")]
    Confidence { index: usize, value: f64 },
}

pub fn decode_results(body: &[u8]) -> Result<Vec<ClassificationResult>, SchemaError> {
    let value: Value = serde_json::from_slice(body)?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(SchemaError::NotAnArray(kind_of(&other))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let result: ClassificationResult = serde_json::from_value(item)
                .map_err(|source| SchemaError::Item { index, source })?;
            let score = result.confidence_score;
            if !score.is_finite() || !(0.0..=1.0).contains(&score) {
                return Err(SchemaError::Confidence {
                    index,
                    value: score,
                });
            }
            Ok(result)
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
