use axum::{extract::State, Json};

use crate::portfolio::PortfolioData;
use crate::state::AppState;

/// GET /api/portfolio
pub async fn handle_portfolio(State(state): State<AppState>) -> Json<PortfolioData> {
    Json(state.portfolio.as_ref().clone())
}
