/*!
 * Request Handlers
 * Dispatch of decoded requests onto the scheduler service
 */

use super::service::SchedulerService;
use super::types::{ApiError, Request, Response};
use crate::monitoring::span_request;
use tracing::debug;

/// Decode one request line and dispatch it
///
/// Malformed input produces an `invalid_request` reply rather than an error.
pub fn handle_line(service: &SchedulerService, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => dispatch(service, request),
        Err(e) => {
            debug!(error = %e, "Rejected malformed request line");
            Response::failure(ApiError::InvalidRequest(e.to_string()))
        }
    }
}

/// Run a decoded request under its own trace span
pub fn dispatch(service: &SchedulerService, request: Request) -> Response {
    let span = span_request(request.method());
    let _entered = span.enter();

    let response = match request {
        Request::Schedule { algorithm, request } => {
            Response::from_result(service.schedule(&algorithm, &request))
        }
        Request::Health => Response::from_result(Ok(service.health())),
        Request::ListHistory { session_id } => {
            Response::from_result(service.list_history(&session_id))
        }
        Request::GetHistory { id } => Response::from_result(service.get_history(id)),
        Request::HistoryByAlgorithm {
            algorithm,
            session_id,
        } => Response::from_result(service.history_by_algorithm(&algorithm, &session_id)),
        Request::RecentHistory { limit, session_id } => {
            Response::from_result(service.recent_history(limit, &session_id))
        }
        Request::DeleteHistory { id } => Response::from_result(service.delete_history(id)),
        Request::ClearHistory { session_id } => {
            Response::from_result(Ok(service.clear_history(&session_id)))
        }
    };

    match &response.error {
        Some(error) => span.record_error(&error.message),
        None => span.record_result(true),
    }
    response
}
