use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::services::crisis_resources;

#[derive(Debug, Deserialize)]
pub struct ResourcesQuery {
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub resources: String,
}

/// GET /api/resources — formatted crisis-resource listing. Lookup cannot
/// fail; an unknown country just gets the general section.
#[tracing::instrument]
pub async fn get_resources(Query(query): Query<ResourcesQuery>) -> Json<ResourcesResponse> {
    let country = query
        .country
        .as_deref()
        .unwrap_or(crisis_resources::HOME_COUNTRY);

    Json(ResourcesResponse {
        resources: crisis_resources::format_resources(country),
    })
}
