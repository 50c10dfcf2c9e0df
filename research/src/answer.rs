use agent::Result;
use regex::Regex;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

const DEFAULT_TOPIC: &str = "Research Results";
const DEFAULT_SUMMARY: &str = "Summary not available";
const SUMMARY_BACKFILL_CHARS: usize = 500;

static JSON_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("invalid json span regex"));

/// The structured answer produced for every question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StructuredAnswer {
    /// Short label for the research subject
    pub topic: String,
    /// The answer to the question
    pub summary: String,
    /// URLs or citations the answer is based on
    #[serde(default)]
    pub sources: Vec<String>,
    /// Names of the tools that contributed to the answer
    #[serde(default)]
    pub tools_used: Vec<String>,
}

impl StructuredAnswer {
    fn fallback(raw: &str) -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            summary: raw.to_string(),
            sources: Vec::new(),
            tools_used: Vec::new(),
        }
    }
}

/// Instructions telling the model to reply with a single `StructuredAnswer`
/// JSON object.
pub fn format_instructions() -> Result<String> {
    let schema = schema_for!(StructuredAnswer);
    let schema = serde_json::to_string(&schema.schema)?;

    Ok(format!(
        r#"The output should be formatted as a JSON instance that conforms to the JSON schema below.

As an example, for the schema {{"properties": {{"foo": {{"description": "a list of strings", "type": "array", "items": {{"type": "string"}}}}}}, "required": ["foo"]}}
the object {{"foo": ["bar", "baz"]}} is a well-formatted instance of the schema. The object {{"properties": {{"foo": ["bar", "baz"]}}}} is not well-formatted.

Reply with exactly one JSON object containing the fields "topic", "summary", "sources" and "tools_used".
Always fill "tools_used" with the tools you relied on, and "sources" with the URLs or citations you used when there are any.

Here is the output schema:
```
{schema}
```"#
    ))
}

/// Recovers a `StructuredAnswer` from free-form model output. Never fails:
/// anything that cannot be read as an answer object becomes a fallback
/// answer carrying the whole reply as its summary.
pub fn parse_answer(raw: &str) -> StructuredAnswer {
    match extract_answer(raw) {
        Some(answer) => answer,
        None => {
            tracing::debug!("model reply has no usable answer object, using fallback");
            StructuredAnswer::fallback(raw)
        }
    }
}

fn extract_answer(raw: &str) -> Option<StructuredAnswer> {
    let span = JSON_SPAN.find(raw)?;

    let mut fields: Map<String, Value> = match serde_json::from_str(span.as_str()) {
        Ok(fields) => fields,
        Err(e) => {
            tracing::debug!(error = %e, "answer span is not a JSON object");
            return None;
        }
    };

    fields
        .entry("topic")
        .or_insert_with(|| Value::String(DEFAULT_TOPIC.to_string()));
    fields.entry("summary").or_insert_with(|| {
        Value::String(if raw.is_empty() {
            DEFAULT_SUMMARY.to_string()
        } else {
            raw.chars().take(SUMMARY_BACKFILL_CHARS).collect()
        })
    });
    fields
        .entry("sources")
        .or_insert_with(|| Value::Array(Vec::new()));
    fields
        .entry("tools_used")
        .or_insert_with(|| Value::Array(Vec::new()));

    match serde_json::from_value(Value::Object(fields)) {
        Ok(answer) => Some(answer),
        Err(e) => {
            tracing::debug!(error = %e, "answer object has mistyped fields");
            None
        }
    }
}
