use axum::{Json, extract::State};
use lt_api_types::ChainConfigResponse;

use crate::AppState;

/// Network and contract a client must target, so a frontend served from
/// elsewhere can prompt the wallet with the same chain metadata.
pub(crate) async fn chain_config(State(state): State<AppState>) -> Json<ChainConfigResponse> {
    Json(state.config.chain_config_response())
}
