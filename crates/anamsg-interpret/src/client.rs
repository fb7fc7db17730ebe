//! # Interpreter Client — Free Text to Packed Message
//!
//! Calls an OpenAI-compatible chat-completions endpoint with a system
//! prompt built from the schema registry's JSON export, then validates the
//! model's structured answer against the registry before packing it.
//!
//! The model is treated as an untrusted collaborator: every label it
//! returns must agree with the index it returns for the same field, and
//! the time must be well-formed 24-hour `HH:MM`. Inconsistent output is
//! rejected with [`InterpretError::SchemaMismatch`] rather than silently
//! re-mapped, so a hallucinated vocabulary entry can never reach the wire.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use anamsg_core::{
    encode, schema_json, Action, FieldValues, Flag, Location, Modifier, PackedMessage, Target,
};

use crate::error::InterpretError;
use crate::retry::retry_send;

/// Default model requested from the endpoint.
const DEFAULT_MODEL: &str = "gpt-4-0125-preview";

/// Per-request timeout budget for ordinary interpretation calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Chat-completions path relative to the endpoint root.
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Client for the interpretation endpoint.
#[derive(Debug, Clone)]
pub struct InterpreterClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    model: String,
}

/// A validated interpretation: typed field variants, the model's
/// explanation, and the packed message they encode to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    /// Interpreted action.
    pub action: Action,
    /// Interpreted target.
    pub target: Target,
    /// Hour of day, `0..=23`.
    pub hour: u8,
    /// Minute, `0..=59`.
    pub minute: u8,
    /// Interpreted location.
    pub location: Location,
    /// Interpreted flag.
    pub flags: Flag,
    /// Interpreted time modifier.
    pub modifier: Modifier,
    /// The model's human-readable account of its reading.
    pub explanation: String,
    /// The packed wire integer for these fields.
    pub message: PackedMessage,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

/// The model's JSON payload.
#[derive(Deserialize)]
struct ModelOutput {
    matches: ModelMatches,
    explanation: String,
}

#[derive(Deserialize)]
struct ModelMatches {
    action: String,
    #[serde(rename = "actionIndex")]
    action_index: CodeRepr,
    target: String,
    #[serde(rename = "targetIndex")]
    target_index: CodeRepr,
    when: String,
    #[serde(rename = "timeModifier")]
    time_modifier: String,
    #[serde(rename = "timeModifierIndex")]
    time_modifier_index: CodeRepr,
    #[serde(rename = "where")]
    location: String,
    #[serde(rename = "whereIndex")]
    location_index: CodeRepr,
    flags: String,
    #[serde(rename = "flagsIndex")]
    flags_index: CodeRepr,
}

/// Models return indices as either JSON numbers or digit strings; accept
/// both, exactly once, at the boundary.
#[derive(Deserialize)]
#[serde(untagged)]
enum CodeRepr {
    Num(u8),
    Text(String),
}

impl CodeRepr {
    fn value(&self, field: &str) -> Result<u8, InterpretError> {
        match self {
            CodeRepr::Num(n) => Ok(*n),
            CodeRepr::Text(s) => s.trim().parse().map_err(|_| {
                InterpretError::SchemaMismatch(format!("{field} index {s:?} is not an integer"))
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Client impl
// ---------------------------------------------------------------------------

impl InterpreterClient {
    /// Build a client for the given endpoint root (the path
    /// `/v1/chat/completions` is appended per request).
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Result<Self, InterpretError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| InterpretError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Override the requested model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Interpret a free-text instruction into schema fields and pack them.
    pub async fn interpret(&self, message: &str) -> Result<Interpretation, InterpretError> {
        let endpoint = self
            .base_url
            .join(COMPLETIONS_PATH)
            .map_err(|e| InterpretError::Config(e.to_string()))?;

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt() },
                {
                    "role": "user",
                    "content": format!(
                        "Please convert the following message to JSON format according to the schema: {message:?}"
                    ),
                },
            ],
            "temperature": 0.1,
            "response_format": { "type": "json_object" },
        });

        tracing::info!(endpoint = %endpoint, model = %self.model, "interpreting message");

        let response = retry_send(|| {
            self.http
                .post(endpoint.clone())
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
        })
        .await
        .map_err(|source| InterpretError::Http {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InterpretError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ChatResponse = response
            .json()
            .await
            .map_err(|e| InterpretError::Deserialization(e.to_string()))?;
        let content = &envelope
            .choices
            .first()
            .ok_or_else(|| InterpretError::Deserialization("response has no choices".into()))?
            .message
            .content;

        let output: ModelOutput = serde_json::from_str(content)
            .map_err(|e| InterpretError::Deserialization(format!("model payload: {e}")))?;

        validate(output)
    }
}

/// Check the model's labels against its indices, parse the time, and pack.
fn validate(output: ModelOutput) -> Result<Interpretation, InterpretError> {
    let m = output.matches;

    let action = checked::<Action>("action", &m.action, m.action_index.value("action")?)?;
    let target = checked::<Target>("target", &m.target, m.target_index.value("target")?)?;
    let location = checked::<Location>("where", &m.location, m.location_index.value("where")?)?;
    let flags = checked::<Flag>("flags", &m.flags, m.flags_index.value("flags")?)?;
    let modifier = checked::<Modifier>(
        "modifier",
        &m.time_modifier,
        m.time_modifier_index.value("modifier")?,
    )?;

    let (hour, minute) = parse_time(&m.when)?;

    let fields = FieldValues::from_parts(action, target, hour, minute, location, flags, modifier);
    let message = encode(&fields)?;

    Ok(Interpretation {
        action,
        target,
        hour,
        minute,
        location,
        flags,
        modifier,
        explanation: output.explanation,
        message,
    })
}

/// Parse a label into its vocabulary and require its code to match the
/// model's parallel index for the same field.
fn checked<T>(field: &str, label: &str, index: u8) -> Result<T, InterpretError>
where
    T: std::str::FromStr<Err = anamsg_core::CodecError> + Copy,
    T: VocabCode,
{
    let variant: T = label
        .parse()
        .map_err(|e: anamsg_core::CodecError| InterpretError::SchemaMismatch(e.to_string()))?;
    if variant.code() != index {
        return Err(InterpretError::SchemaMismatch(format!(
            "{field} label {label:?} has code {}, but the response carried index {index}",
            variant.code()
        )));
    }
    Ok(variant)
}

/// Shared access to a vocabulary variant's wire code.
trait VocabCode {
    fn code(&self) -> u8;
}

macro_rules! impl_vocab_code {
    ($($ty:ty),+) => {
        $(impl VocabCode for $ty {
            fn code(&self) -> u8 {
                <$ty>::code(self)
            }
        })+
    };
}

impl_vocab_code!(Action, Target, Location, Flag, Modifier);

/// Parse 24-hour `HH:MM`.
fn parse_time(when: &str) -> Result<(u8, u8), InterpretError> {
    let mismatch = || {
        InterpretError::SchemaMismatch(format!("time {when:?} is not 24-hour HH:MM"))
    };
    let (h, m) = when.trim().split_once(':').ok_or_else(mismatch)?;
    let hour: u8 = h.parse().map_err(|_| mismatch())?;
    let minute: u8 = m.parse().map_err(|_| mismatch())?;
    Ok((hour, minute))
}

/// The system prompt: the schema document plus the matching rules.
fn system_prompt() -> String {
    let schema = serde_json::to_string_pretty(&schema_json()).unwrap_or_default();
    format!(
        "You are a message encoder that helps convert natural language messages into a \
structured format according to a specific schema. Your response must be in JSON format. \
The schema defines specific actions, targets, time formats, locations, and flags.\n\n\
The schema is:\n{schema}\n\n\
Your task is to:\n\
1. Take a natural language message\n\
2. Match it to the closest available options in the schema\n\
3. Return a JSON response with:\n\
   - The matched values from the schema (using exact values from the schema entries)\n\
   - A human-readable explanation of how the message was interpreted\n\n\
Rules:\n\
1. All fields must match exactly to values in the schema entries\n\
2. Time must be in 24-hour format (00:00-23:59)\n\
3. Time modifiers must be one of: \"exact\" (0), \"before\" (1), \"after\" (2), or \"approximate\" (3)\n\
4. Location must match one of the schema locations exactly\n\
5. Flags must be either \"stealth\" (0) or \"urgent\" (1)\n\
6. For each field, you must return the exact string from the schema entries\n\
7. For action and target, you must find the closest matching entry from the schema\n\n\
Example input: \"Urgently need to activate the beacon at exactly 15:30 at HQ\"\n\
Example JSON output: {{\n\
  \"matches\": {{\n\
    \"action\": \"activate\",\n\
    \"actionIndex\": 1,\n\
    \"target\": \"beacon\",\n\
    \"targetIndex\": 8,\n\
    \"when\": \"15:30\",\n\
    \"timeModifier\": \"exact\",\n\
    \"timeModifierIndex\": 0,\n\
    \"where\": \"HQ\",\n\
    \"whereIndex\": 0,\n\
    \"flags\": \"urgent\",\n\
    \"flagsIndex\": 1\n\
  }},\n\
  \"explanation\": \"Interpreted as an urgent activation of the beacon, scheduled for exactly 15:30 at HQ.\"\n\
}}\n\n\
Remember to always return your response in valid JSON format."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn canned_matches() -> serde_json::Value {
        json!({
            "matches": {
                "action": "activate",
                "actionIndex": 1,
                "target": "beacon",
                "targetIndex": 8,
                "when": "15:30",
                "timeModifier": "exact",
                "timeModifierIndex": 0,
                "where": "HQ",
                "whereIndex": 0,
                "flags": "urgent",
                "flagsIndex": 1
            },
            "explanation": "Urgent beacon activation at 15:30 at HQ."
        })
    }

    fn envelope(content: &serde_json::Value) -> serde_json::Value {
        json!({
            "choices": [
                { "message": { "role": "assistant", "content": content.to_string() } }
            ]
        })
    }

    async fn client_for(server: &MockServer) -> InterpreterClient {
        let url = Url::parse(&server.uri()).expect("mock server uri");
        InterpreterClient::new(url, "test-key").expect("client builds")
    }

    #[tokio::test]
    async fn interprets_consistent_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&canned_matches())))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let interp = client
            .interpret("Urgently need to activate the beacon at exactly 15:30 at HQ")
            .await
            .expect("interpretation succeeds");

        assert_eq!(interp.action, Action::Activate);
        assert_eq!(interp.target, Target::Beacon);
        assert_eq!((interp.hour, interp.minute), (15, 30));
        assert_eq!(interp.location, Location::Hq);
        assert_eq!(interp.flags, Flag::Urgent);
        assert_eq!(interp.modifier, Modifier::Exact);

        let expected = (1u32 << 24) | (8 << 18) | (((15u32 << 8) | (30 << 2)) << 5) | 1;
        assert_eq!(interp.message.value(), expected);
    }

    #[tokio::test]
    async fn accepts_string_typed_indices() {
        let mut content = canned_matches();
        content["matches"]["actionIndex"] = json!("1");
        content["matches"]["targetIndex"] = json!("8");

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&content)))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let interp = client.interpret("activate the beacon").await.unwrap();
        assert_eq!(interp.action, Action::Activate);
    }

    #[tokio::test]
    async fn rejects_label_index_disagreement() {
        let mut content = canned_matches();
        content["matches"]["actionIndex"] = json!(2);

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&content)))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.interpret("activate the beacon").await.unwrap_err();
        assert!(matches!(err, InterpretError::SchemaMismatch(_)), "{err}");
    }

    #[tokio::test]
    async fn rejects_hallucinated_label() {
        let mut content = canned_matches();
        content["matches"]["action"] = json!("teleport");

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&content)))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.interpret("teleport the beacon").await.unwrap_err();
        assert!(matches!(err, InterpretError::SchemaMismatch(_)), "{err}");
    }

    #[tokio::test]
    async fn rejects_malformed_time() {
        let mut content = canned_matches();
        content["matches"]["when"] = json!("half past three");

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&content)))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.interpret("meet at half past three").await.unwrap_err();
        assert!(matches!(err, InterpretError::SchemaMismatch(_)), "{err}");
    }

    #[tokio::test]
    async fn surfaces_api_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string("{\"error\":\"bad key\"}"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.interpret("activate the beacon").await.unwrap_err();
        match err {
            InterpretError::Api { status, body, .. } => {
                assert_eq!(status, 401);
                assert!(body.contains("bad key"));
            }
            other => panic!("expected Api error, got {other}"),
        }
    }

    #[test]
    fn system_prompt_embeds_schema_document() {
        let prompt = system_prompt();
        assert!(prompt.contains("\"schema_bits\": 30"));
        assert!(prompt.contains("activate"));
        assert!(prompt.contains("Extraction Point"));
    }
}
