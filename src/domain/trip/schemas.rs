use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DestinationResearch, TripPlan};
use crate::common::validation::{require, Validate};
use crate::services::response::ServiceError;

pub const MAX_TRIP_DAYS: u32 = 30;

#[derive(Debug, Deserialize, Serialize)]
pub struct PlanTrip {
	pub destination: String,
	pub days: u32,
	#[serde(default)]
	pub budget: Option<String>,
	#[serde(default)]
	pub travelers: Option<u32>,
	#[serde(default)]
	pub interests: Vec<String>,
	#[serde(default)]
	pub start_date: Option<NaiveDate>,
}

impl Validate for PlanTrip {
	fn validate(&self) -> Result<(), ServiceError> {
		require("destination", &self.destination)?;
		if self.days < 1 || self.days > MAX_TRIP_DAYS {
			return Err(ServiceError::bad_request(format!("days must be between 1 and {MAX_TRIP_DAYS}")));
		}
		if self.travelers == Some(0) {
			return Err(ServiceError::bad_request("travelers must be at least 1"));
		}
		Ok(())
	}
}

impl PlanTrip {
	pub fn prompt(&self) -> String {
		let mut prompt = format!(
			"Create a {days}-day travel itinerary for {destination}.",
			days = self.days,
			destination = self.destination.trim()
		);
		if let Some(travelers) = self.travelers {
			prompt.push_str(&format!(" The group has {travelers} traveler(s)."));
		}
		if let Some(budget) = self.budget.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
			prompt.push_str(&format!(" The budget is {budget}."));
		}
		let interests: Vec<&str> = self.interests.iter().map(|i| i.trim()).filter(|i| !i.is_empty()).collect();
		if !interests.is_empty() {
			prompt.push_str(&format!(" Focus on: {}.", interests.join(", ")));
		}
		if let Some(start_date) = self.start_date {
			prompt.push_str(&format!(" The trip starts on {start_date}."));
		}
		prompt.push_str(
			" Respond with JSON only, no markdown, matching this shape: \
			{\"destination\": string, \"summary\": string, \"days\": [{\"day\": number, \"title\": string, \
			\"activities\": [{\"time\": string, \"name\": string, \"description\": string, \"location\": string, \
			\"estimated_cost\": string}]}], \"estimated_budget\": string, \"tips\": [string]}",
		);
		prompt
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ResearchDestination {
	pub destination: String,
}

impl Validate for ResearchDestination {
	fn validate(&self) -> Result<(), ServiceError> {
		require("destination", &self.destination)
	}
}

impl ResearchDestination {
	pub fn prompt(&self) -> String {
		format!(
			"Research {destination} as a travel destination. Respond with JSON only, no markdown, matching this shape: \
			{{\"destination\": string, \"overview\": string, \"best_time_to_visit\": string, \
			\"top_attractions\": [{{\"name\": string, \"description\": string}}], \"local_cuisine\": [string], \
			\"travel_tips\": [string], \"safety_notes\": [string], \"estimated_daily_budget\": string}}",
			destination = self.destination.trim()
		)
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TripPlanned {
	pub plan: TripPlan,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DestinationResearched {
	pub research: DestinationResearch,
}
