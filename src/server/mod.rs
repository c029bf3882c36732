// src/server/mod.rs

use serde::Serialize;
use std::{convert::Infallible, sync::Arc};
use tracing::{debug, error};
use warp::{
    http::{
        header::{
            HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        Method, StatusCode,
    },
    reject::Rejection,
    reply::{self, Reply, Response},
    Filter,
};

use crate::{sheets::GridSource, transpose::transpose};

/// Sent when the backend gave us nothing better to say.
pub const FALLBACK_ERROR: &str = "Internal Server Error";

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// The single endpoint: every path, every method.
pub fn routes(
    source: Arc<dyn GridSource>,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::any()
        .and(warp::method())
        .and(with_source(source))
        .and_then(handle)
}

fn with_source(
    source: Arc<dyn GridSource>,
) -> impl Filter<Extract = (Arc<dyn GridSource>,), Error = Infallible> + Clone {
    warp::any().map(move || source.clone())
}

/// `OPTIONS` answers the CORS preflight and stops there. Anything else reads
/// the sheet and returns its records; methods other than GET are served the
/// same way.
pub async fn handle(method: Method, source: Arc<dyn GridSource>) -> Result<Response, Rejection> {
    if method == Method::OPTIONS {
        let preflight =
            reply::with_header(warp::reply(), ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type");
        return Ok(with_cors(reply::with_status(
            preflight,
            StatusCode::NO_CONTENT,
        )));
    }

    match source.fetch_grid().await {
        Ok(grid) => {
            let records = transpose(grid.as_ref());
            debug!(%method, records = records.len(), "serving records");
            Ok(with_cors(reply::with_status(
                reply::json(&records),
                StatusCode::OK,
            )))
        }
        Err(e) => {
            error!(error = ?e, "Error fetching from Google Sheets API");
            let body = ErrorResponse {
                error: e.message().unwrap_or(FALLBACK_ERROR).to_string(),
            };
            Ok(with_cors(reply::with_status(
                reply::json(&body),
                StatusCode::INTERNAL_SERVER_ERROR,
            )))
        }
    }
}

/// Origin and method headers go on every response, whatever the outcome.
fn with_cors(reply: impl Reply) -> Response {
    let mut response = reply.into_response();
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET"));
    response
}
