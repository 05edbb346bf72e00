pub mod schemas;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TripPlan {
	pub destination: String,
	pub summary: String,
	pub days: Vec<DayPlan>,
	#[serde(deserialize_with = "lenient_string")]
	pub estimated_budget: Option<String>,
	pub tips: Vec<String>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DayPlan {
	pub day: u32,
	pub title: String,
	pub activities: Vec<Activity>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
	pub time: String,
	pub name: String,
	pub description: String,
	pub location: Option<String>,
	#[serde(deserialize_with = "lenient_string")]
	pub estimated_cost: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationResearch {
	pub destination: String,
	pub overview: String,
	pub best_time_to_visit: String,
	pub top_attractions: Vec<Attraction>,
	pub local_cuisine: Vec<String>,
	pub travel_tips: Vec<String>,
	pub safety_notes: Vec<String>,
	#[serde(deserialize_with = "lenient_string")]
	pub estimated_daily_budget: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Attraction {
	pub name: String,
	pub description: String,
}

// Models answer costs as "$40", 40 or null interchangeably.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Option::<Value>::deserialize(deserializer)? {
		None | Some(Value::Null) => None,
		Some(Value::String(value)) => Some(value),
		Some(other) => Some(other.to_string()),
	})
}

#[test]
fn test_partial_plan_takes_defaults() {
	let plan: TripPlan = serde_json::from_str(
		r#"{"summary": "Three lazy days", "days": [{"day": 1, "activities": [{"name": "Beach", "estimated_cost": 12.5}]}]}"#,
	)
	.unwrap();

	assert_eq!(plan.destination, "");
	assert_eq!(plan.days[0].activities[0].estimated_cost.as_deref(), Some("12.5"));
	assert_eq!(plan.days[0].title, "");
	assert!(plan.tips.is_empty());
	assert_eq!(plan.estimated_budget, None);
}
