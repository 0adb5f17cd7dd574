//! Location-filtered schedule endpoints

use axum::{
    Router,
    extract::{Path, State, rejection::PathRejection},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use roomcal_core::{
    filter_by_location,
    ics::generate_ics,
    schedule::{Schedule, generate_xml},
};

use crate::routes::AppError;
use crate::routes::decode::query_unescape;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/location/{id}", get(single_location))
        .route("/location/{id}/", get(single_location))
        .route("/location/{id}/xml", get(single_location_xml))
        .route("/location/{id}/xml/", get(single_location_xml))
}

/// Decode the `{id}` segment into a filter term.
fn location_term(path: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    let Path(raw) = path.map_err(|e| AppError::Decode(e.into()))?;
    query_unescape(&raw).map_err(AppError::Decode)
}

/// GET /location/:id - Events at this location as an .ics attachment
async fn single_location(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let location = location_term(path)?;
    tracing::info!(location = %location, "Endpoint Hit: /location/{{id}}");

    let ical_data = state.upstream.fetch().await?;
    let calendar = filter_by_location(&ical_data, &location)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar"),
            (header::CONTENT_DISPOSITION, "attachment; filename=schedule.ics"),
        ],
        generate_ics(&calendar),
    )
        .into_response())
}

/// GET /location/:id/xml - Title/presenter list for this location as XML
async fn single_location_xml(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let location = location_term(path)?;
    tracing::info!(location = %location, "Endpoint Hit: /location/{{id}}/xml");

    let ical_data = state.upstream.fetch().await?;
    let calendar = filter_by_location(&ical_data, &location)?;
    let xml = generate_xml(&Schedule::from_calendar(&calendar))?;

    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}
