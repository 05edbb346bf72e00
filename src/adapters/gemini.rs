use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{common::json_extract::extract_json, services::response::ServiceError};

pub const TEMPERATURE: f32 = 0.7;
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
	http: reqwest::Client,
	base_url: String,
	model: String,
	api_key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
	contents: Vec<RequestContent<'a>>,
	generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
	role: &'static str,
	parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
	text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
	temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
	#[serde(default)]
	candidates: Vec<Candidate>,
	prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
	content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
	#[serde(default)]
	parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
	#[serde(default)]
	text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
	block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
	error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
	message: String,
}

impl GenerateResponse {
	fn into_text(self) -> Result<String, ServiceError> {
		let text: String = self
			.candidates
			.into_iter()
			.next()
			.and_then(|candidate| candidate.content)
			.map(|content| content.parts.into_iter().map(|part| part.text).collect())
			.unwrap_or_default();

		if text.trim().is_empty() {
			let reason = self
				.prompt_feedback
				.and_then(|feedback| feedback.block_reason)
				.unwrap_or_else(|| "empty response".to_string());
			return Err(ServiceError::UpstreamError(format!("Gemini returned no candidates ({reason})")));
		}
		Ok(text)
	}
}

impl GeminiClient {
	pub fn new(
		http: reqwest::Client,
		base_url: impl Into<String>,
		model: impl Into<String>,
		api_key: Option<String>,
	) -> Self {
		Self {
			http,
			base_url: base_url.into().trim_end_matches('/').to_string(),
			model: model.into(),
			api_key,
		}
	}

	/// Sends a single user turn and returns the text of the first candidate.
	pub async fn generate(
		&self,
		prompt: &str,
	) -> Result<String, ServiceError> {
		let key = self.api_key.as_deref().ok_or(ServiceError::NotConfigured("GEMINI_API_KEY"))?;
		tracing::debug!("Calling Gemini model {}", self.model);

		let body = GenerateRequest {
			contents: vec![RequestContent {
				role: "user",
				parts: vec![RequestPart { text: prompt }],
			}],
			generation_config: GenerationConfig { temperature: TEMPERATURE },
		};

		let response = self
			.http
			.post(format!("{}/models/{}:generateContent", self.base_url, self.model))
			.header(API_KEY_HEADER, key)
			.json(&body)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let text = response.text().await.unwrap_or_default();
			let message = serde_json::from_str::<ApiErrorBody>(&text)
				.map(|body| body.error.message)
				.unwrap_or(text);
			return Err(ServiceError::UpstreamError(format!("Gemini returned {status}: {message}")));
		}

		response.json::<GenerateResponse>().await?.into_text()
	}

	/// Like `generate`, then pulls a JSON document of type `T` out of the answer.
	pub async fn generate_json<T: DeserializeOwned>(
		&self,
		prompt: &str,
	) -> Result<T, ServiceError> {
		let text = self.generate(prompt).await?;
		extract_json(&text).map_err(|err| {
			tracing::warn!("Gemini answer without usable JSON: {}", text);
			err
		})
	}
}

#[cfg(test)]
mod test {
	use std::collections::HashMap;

	use axum::{
		extract::{Path, Query},
		http::{HeaderMap, StatusCode},
		response::IntoResponse,
		routing::post,
		Json, Router,
	};
	use serde::Deserialize;
	use serde_json::{json, Value};

	use super::GeminiClient;
	use crate::services::response::ServiceError;

	// The model name picks the canned answer.
	async fn mock_gemini() -> String {
		async fn generate(
			Path(call): Path<String>,
			Query(params): Query<HashMap<String, String>>,
			headers: HeaderMap,
			Json(body): Json<Value>,
		) -> impl IntoResponse {
			if params.contains_key("key") || headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("test-key") {
				return (
					StatusCode::FORBIDDEN,
					Json(json!({"error": {"code": 403, "message": "key must be sent in the header", "status": "PERMISSION_DENIED"}})),
				);
			}
			let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default().to_string();
			let text = match call.trim_end_matches(":generateContent") {
				"fenced" => format!("```json\n{{\"echo\": \"{prompt}\"}}\n```"),
				"blocked" => return (StatusCode::OK, Json(json!({"promptFeedback": {"blockReason": "SAFETY"}}))),
				"broken" => {
					return (
						StatusCode::BAD_REQUEST,
						Json(json!({"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}})),
					)
				}
				_ => format!("{{\"echo\": \"{prompt}\"}}"),
			};
			(
				StatusCode::OK,
				Json(json!({"candidates": [{"content": {"parts": [{"text": text}], "role": "model"}, "finishReason": "STOP"}]})),
			)
		}

		let app = Router::new().route("/models/:call", post(generate));
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
		format!("http://{addr}")
	}

	#[derive(Deserialize)]
	struct Echo {
		echo: String,
	}

	fn client(
		base_url: &str,
		model: &str,
	) -> GeminiClient {
		GeminiClient::new(reqwest::Client::new(), base_url, model, Some("test-key".into()))
	}

	#[tokio::test]
	async fn test_generate_returns_candidate_text() {
		let base_url = mock_gemini().await;
		let text = client(&base_url, "plain").generate("hello").await.unwrap();
		assert_eq!(text, r#"{"echo": "hello"}"#);
	}

	#[tokio::test]
	async fn test_generate_json_unwraps_fence() {
		let base_url = mock_gemini().await;
		let echo: Echo = client(&base_url, "fenced").generate_json("kyoto").await.unwrap();
		assert_eq!(echo.echo, "kyoto");
	}

	#[tokio::test]
	async fn test_blocked_prompt_is_upstream_error() {
		let base_url = mock_gemini().await;
		let err = client(&base_url, "blocked").generate("anything").await.unwrap_err();
		assert_eq!(err.to_string(), "upstream error: Gemini returned no candidates (SAFETY)");
	}

	#[tokio::test]
	async fn test_error_status_surfaces_api_message() {
		let base_url = mock_gemini().await;
		let err = client(&base_url, "broken").generate("anything").await.unwrap_err();
		assert!(matches!(err, ServiceError::UpstreamError(message) if message.ends_with("API key not valid")));
	}

	#[tokio::test]
	async fn test_missing_key() {
		let gemini = GeminiClient::new(reqwest::Client::new(), "http://127.0.0.1:9", "plain", None);
		let err = gemini.generate("anything").await.unwrap_err();
		assert!(matches!(err, ServiceError::NotConfigured("GEMINI_API_KEY")));
	}

	#[tokio::test]
	async fn test_transport_error_hides_key() {
		let gemini = GeminiClient::new(reqwest::Client::new(), "http://127.0.0.1:9", "plain", Some("secret-key".into()));
		let err = gemini.generate("anything").await.unwrap_err();

		assert!(matches!(err, ServiceError::HttpError(_)));
		assert!(!err.to_string().contains("secret-key"));
	}
}
