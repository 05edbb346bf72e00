//! Pulls a JSON document out of free-form model output.
//!
//! Generative models are asked for bare JSON but regularly wrap it in a
//! markdown fence or surround it with prose. Candidates are tried in order:
//! the whole text, the first fenced code block, then everything from the
//! first `{` to the last `}`.
use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::services::response::ServiceError;

fn fenced_block() -> &'static Regex {
	static FENCED: OnceLock<Regex> = OnceLock::new();
	FENCED.get_or_init(|| Regex::new(r"(?s)```(?:[A-Za-z]+)?\s*(.*?)```").expect("fenced block pattern"))
}

fn brace_span() -> &'static Regex {
	static BRACES: OnceLock<Regex> = OnceLock::new();
	BRACES.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("brace span pattern"))
}

fn candidates(text: &str) -> Vec<&str> {
	let mut found = vec![text.trim()];
	if let Some(inner) = fenced_block().captures(text).and_then(|c| c.get(1)) {
		found.push(inner.as_str().trim());
	}
	if let Some(span) = brace_span().find(text) {
		found.push(span.as_str());
	}
	found
}

pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, ServiceError> {
	for candidate in candidates(text) {
		match serde_json::from_str::<T>(candidate) {
			Ok(value) => return Ok(value),
			Err(err) => tracing::debug!("JSON candidate rejected: {}", err),
		}
	}
	Err(ServiceError::ParsingError("model response did not contain valid JSON".into()))
}
