//! Request routing for the prediction endpoint.

use std::sync::Arc;

use log::warn;

use crate::prediction::PredictionService;
use crate::server::http::{HttpRequest, HttpResponse};

/// The only routed path.
pub const PREDICT_PATH: &str = "/predict-teks";

/// Map a parsed request to a response.
///
/// | condition                      | status |
/// |--------------------------------|--------|
/// | unknown path                   | 404    |
/// | method other than `GET`        | 405    |
/// | `text` missing or empty        | 422    |
/// | pipeline failure               | 500    |
/// | success                        | 200    |
pub async fn handle(service: Arc<PredictionService>, request: HttpRequest) -> HttpResponse {
    if request.path != PREDICT_PATH {
        return HttpResponse::detail(404, "Not Found");
    }
    if request.method != "GET" {
        return HttpResponse::detail(405, "Method Not Allowed");
    }

    let text = match request.query_param("text") {
        Some(text) if !text.is_empty() => text.to_string(),
        Some(_) => return HttpResponse::detail(422, "Query parameter 'text' must not be empty"),
        None => return HttpResponse::detail(422, "Missing query parameter 'text'"),
    };

    // The pipeline is CPU-bound; keep it off the reactor threads.
    let outcome = tokio::task::spawn_blocking(move || service.predict(&text)).await;

    match outcome {
        Ok(Ok(result)) => match HttpResponse::json(200, &result) {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to encode prediction: {e}");
                HttpResponse::detail(500, "Internal Server Error")
            }
        },
        Ok(Err(e)) => {
            warn!("Prediction failed: {e}");
            HttpResponse::detail(500, "Internal Server Error")
        }
        Err(e) => {
            warn!("Prediction task failed: {e}");
            HttpResponse::detail(500, "Internal Server Error")
        }
    }
}
