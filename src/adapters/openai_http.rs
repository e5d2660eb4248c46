//! Chat-completions content generator implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, GeneratorSettings};
use crate::ports::ContentGenerator;

const API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_STATUS_MESSAGE: &str = "Content generation request failed";

/// HTTP transport for an OpenAI-compatible chat-completions endpoint.
///
/// Performs a single request per call. Unless a timeout is configured the
/// request blocks until the service responds or errors.
#[derive(Clone)]
pub struct HttpContentGenerator {
    api_key: String,
    endpoint: Url,
    model: String,
    client: Client,
}

impl std::fmt::Debug for HttpContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpContentGenerator")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpContentGenerator {
    /// Create a new generator with the given API key and settings.
    pub fn new(api_key: String, settings: &GeneratorSettings) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        } else {
            builder = builder.timeout(None::<Duration>);
        }
        let client = builder.build().map_err(|e| AppError::GeneratorError {
            message: format!("Failed to create HTTP client: {}", e),
            status: None,
        })?;

        Ok(Self {
            api_key,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            client,
        })
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env(settings: &GeneratorSettings) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AppError::EnvironmentVariableMissing(API_KEY_ENV.into()))?;

        Self::new(api_key, settings)
    }

    fn send_request(&self, request: &ApiRequest) -> Result<String, AppError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| AppError::GeneratorError {
                message: format!("HTTP request failed: {}", e),
                status: None,
            })?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            let api_response: ApiResponse =
                serde_json::from_str(&body_text).map_err(|e| AppError::GeneratorError {
                    message: format!("Failed to parse response: {}", e),
                    status: Some(status.as_u16()),
                })?;

            return api_response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| AppError::GeneratorError {
                    message: "No choices in response".into(),
                    status: Some(status.as_u16()),
                });
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        Err(AppError::GeneratorError { message, status: Some(status.as_u16()) })
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

impl ContentGenerator for HttpContentGenerator {
    fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let request = ApiRequest {
            model: self.model.clone(),
            messages: vec![ApiMessage { role: "user".to_string(), content: prompt.to_string() }],
        };

        self.send_request(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_for(server: &mockito::Server) -> GeneratorSettings {
        GeneratorSettings {
            endpoint: Url::parse(&server.url()).unwrap(),
            model: "test-model".to_string(),
            timeout_secs: Some(1),
            strategy: Default::default(),
        }
    }

    #[test]
    fn generate_returns_first_choice_content() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"role": "assistant", "content": "print(1)"}}]}"#,
            )
            .create();

        let generator =
            HttpContentGenerator::new("fake-key".to_string(), &settings_for(&server)).unwrap();
        let text = generator.generate("write code").unwrap();
        assert_eq!(text, "print(1)");
    }

    #[test]
    fn generate_sends_model_and_prompt() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "test-model",
                "messages": [{"role": "user", "content": "write code"}]
            })))
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "ok"}}]}"#)
            .create();

        let generator =
            HttpContentGenerator::new("fake-key".to_string(), &settings_for(&server)).unwrap();
        generator.generate("write code").unwrap();
        mock.assert();
    }

    #[test]
    fn generate_errors_on_empty_choices() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create();

        let generator =
            HttpContentGenerator::new("fake-key".to_string(), &settings_for(&server)).unwrap();
        let err = generator.generate("write code").unwrap_err();
        assert!(matches!(err, AppError::GeneratorError { status: Some(200), .. }));
    }

    #[test]
    fn generate_errors_on_500() {
        let mut server = mockito::Server::new();
        let mock = server.mock("POST", "/").with_status(500).expect(1).create();

        let generator =
            HttpContentGenerator::new("fake-key".to_string(), &settings_for(&server)).unwrap();
        let err = generator.generate("write code").unwrap_err();
        assert!(matches!(err, AppError::GeneratorError { status: Some(500), .. }));
        mock.assert();
    }

    #[test]
    fn parses_nested_error_message() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/")
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"message":"quota exhausted"}}"#)
            .create();

        let generator =
            HttpContentGenerator::new("fake-key".to_string(), &settings_for(&server)).unwrap();
        match generator.generate("write code").unwrap_err() {
            AppError::GeneratorError { message, status } => {
                assert_eq!(status, Some(429));
                assert_eq!(message, "quota exhausted");
            }
            other => panic!("unexpected error variant: {}", other),
        }
    }

    #[test]
    fn debug_redacts_api_key() {
        let server = mockito::Server::new();
        let generator =
            HttpContentGenerator::new("secret-key".to_string(), &settings_for(&server)).unwrap();
        let rendered = format!("{:?}", generator);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
