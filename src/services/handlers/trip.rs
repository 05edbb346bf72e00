use crate::{
	domain::trip::{
		schemas::{PlanTrip, ResearchDestination},
		DestinationResearch, TripPlan,
	},
	services::response::ServiceError,
	state::AppState,
};

pub struct TripHandler;
impl TripHandler {
	pub async fn plan(
		state: &AppState,
		request: PlanTrip,
	) -> Result<TripPlan, ServiceError> {
		let mut plan: TripPlan = state.gemini.generate_json(&request.prompt()).await?;
		if plan.destination.trim().is_empty() {
			plan.destination = request.destination.trim().to_string();
		}
		tracing::info!("Planned {} day(s) for `{}`", plan.days.len(), plan.destination);
		Ok(plan)
	}

	pub async fn research(
		state: &AppState,
		request: ResearchDestination,
	) -> Result<DestinationResearch, ServiceError> {
		let mut research: DestinationResearch = state.gemini.generate_json(&request.prompt()).await?;
		if research.destination.trim().is_empty() {
			research.destination = request.destination.trim().to_string();
		}
		Ok(research)
	}
}
