use alloy_primitives::Address;
use axum::{
    Json,
    extract::{Path, State},
};
use lt_api_types::{Link, LinkCountResponse, Profile};
use lt_contract::fetch_profile;
use lt_wallet::parse_address;
use tracing::{debug, warn};

use crate::{ApiResult, AppState, bad_gateway, bad_request, not_found};

fn address_param(raw: &str) -> Result<Address, crate::ApiError> {
    parse_address(raw.trim()).ok_or_else(|| bad_request("invalid wallet address"))
}

pub(crate) async fn get_profile(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<Profile> {
    let address = address_param(&address)?;

    match fetch_profile(state.registry.as_ref(), address).await {
        Ok(Some(profile)) => {
            debug!(%address, links = profile.links.len(), "profile served");
            Ok(Json(profile))
        }
        Ok(None) => Err(not_found("no links found for this address")),
        Err(err) => {
            warn!(%address, "profile read failed: {err}");
            Err(bad_gateway(err))
        }
    }
}

pub(crate) async fn get_link_count(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<LinkCountResponse> {
    let address = address_param(&address)?;

    let count = state.registry.get_link_count(address).await.map_err(|err| {
        warn!(%address, "link count read failed: {err}");
        bad_gateway(err)
    })?;

    Ok(Json(LinkCountResponse {
        address: address.to_checksum(None),
        count,
    }))
}

pub(crate) async fn get_link(
    State(state): State<AppState>,
    Path((address, index)): Path<(String, u64)>,
) -> ApiResult<Link> {
    let address = address_param(&address)?;

    let count = state.registry.get_link_count(address).await.map_err(|err| {
        warn!(%address, "link count read failed: {err}");
        bad_gateway(err)
    })?;
    if index >= count {
        return Err(not_found("link not found"));
    }

    let link = state.registry.get_link(address, index).await.map_err(|err| {
        warn!(%address, index, "link read failed: {err}");
        bad_gateway(err)
    })?;

    Ok(Json(link))
}
