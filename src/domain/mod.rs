pub mod chat;
pub mod hotel;
pub mod place;
pub mod post;
pub mod trip;

/// Key used to match free-text locations case-insensitively.
pub fn location_key(location: &str) -> String {
	location.trim().to_lowercase()
}

pub(crate) fn clamp_limit(limit: Option<i64>) -> i64 {
	limit.unwrap_or(50).clamp(1, 200)
}

#[test]
fn test_location_key() {
	assert_eq!(location_key("  New York "), location_key("new york"));
	assert_eq!(clamp_limit(None), 50);
	assert_eq!(clamp_limit(Some(0)), 1);
	assert_eq!(clamp_limit(Some(10_000)), 200);
}
