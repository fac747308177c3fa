use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};

use super::query::LookupParams;
use super::service::TherapistLookupService;
use crate::registry::ProviderRegistry;

pub const THERAPISTS_PATH: &str = "/api/therapists";

/// Router exposing the therapist lookup endpoint. Every method is routed here
/// so non-GET requests receive the JSON 405 body.
pub fn lookup_router<R>(service: Arc<TherapistLookupService<R>>) -> Router
where
    R: ProviderRegistry + 'static,
{
    Router::new()
        .route(THERAPISTS_PATH, any(therapists_handler::<R>))
        .with_state(service)
}

pub(crate) async fn therapists_handler<R>(
    State(service): State<Arc<TherapistLookupService<R>>>,
    method: Method,
    params: Result<Query<LookupParams>, QueryRejection>,
) -> Response
where
    R: ProviderRegistry + 'static,
{
    // An undecodable query string is treated like a missing zip.
    let params = params.map(|Query(params)| params).unwrap_or_default();

    match service.handle(&method, params).await {
        Ok(body) => (
            [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            Json(body),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
