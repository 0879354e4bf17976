use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::DecisionRequest;
use super::repository::{HistoryError, HistoryId, HistoryStore};
use super::service::DecisionService;

/// Header carrying the identifier a ranking was recorded under.
pub const HISTORY_ID_HEADER: &str = "x-history-id";

/// Router builder exposing ranking and history endpoints.
pub fn decision_router<S>(service: Arc<DecisionService<S>>) -> Router
where
    S: HistoryStore + 'static,
{
    Router::new()
        .route("/api/v1/edas", post(evaluate_handler::<S>))
        .route("/api/v1/history", get(list_handler::<S>))
        .route(
            "/api/v1/history/:history_id",
            get(fetch_handler::<S>).delete(delete_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<S>(
    State(service): State<Arc<DecisionService<S>>>,
    payload: Result<axum::Json<DecisionRequest>, JsonRejection>,
) -> Response
where
    S: HistoryStore + 'static,
{
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.evaluate(request) {
        Ok(outcome) => {
            let mut response = (StatusCode::OK, axum::Json(outcome.response)).into_response();
            if let Some(id) = outcome.history_id {
                if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
                    response.headers_mut().insert(HISTORY_ID_HEADER, value);
                }
            }
            response
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<S>(State(service): State<Arc<DecisionService<S>>>) -> Response
where
    S: HistoryStore + 'static,
{
    match service.histories() {
        Ok(summaries) => (StatusCode::OK, axum::Json(summaries)).into_response(),
        Err(error) => history_error_response(error),
    }
}

pub(crate) async fn fetch_handler<S>(
    State(service): State<Arc<DecisionService<S>>>,
    Path(history_id): Path<String>,
) -> Response
where
    S: HistoryStore + 'static,
{
    let record = HistoryId::parse(&history_id).and_then(|id| service.history(&id));
    match record {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => history_error_response(error),
    }
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<DecisionService<S>>>,
    Path(history_id): Path<String>,
) -> Response
where
    S: HistoryStore + 'static,
{
    match HistoryId::parse(&history_id).and_then(|id| service.forget(&id)) {
        Ok(()) => {
            let payload = json!({
                "status": "success",
                "message": "history successfully deleted",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => history_error_response(error),
    }
}

/// Body rejections share the validation error shape; `field` is the JSON
/// path serde stopped at, when it names one.
fn rejection_response(rejection: JsonRejection) -> Response {
    let message = rejection.body_text();
    let field = match &rejection {
        JsonRejection::JsonDataError(_) => rejected_path(&message),
        _ => None,
    };
    let payload = json!({
        "error": message,
        "field": field,
    });
    (rejection.status(), axum::Json(payload)).into_response()
}

fn rejected_path(message: &str) -> Option<String> {
    let (_, detail) = message.split_once(": ")?;
    let (path, _) = detail.split_once(": ")?;
    (!path.is_empty() && !path.contains(' ')).then(|| path.to_string())
}

fn history_error_response(error: HistoryError) -> Response {
    let status = match error {
        HistoryError::NotFound => StatusCode::NOT_FOUND,
        HistoryError::InvalidId(_) => StatusCode::BAD_REQUEST,
        HistoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
