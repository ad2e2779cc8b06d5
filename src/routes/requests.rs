use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, RequestListResponse, SubmitRequestBody};
use crate::routes::AppState;
use crate::services::CacheKey;

/// Configure public request routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/requests", web::post().to(submit_request))
        .route("/requests", web::get().to(my_requests));
}

/// Submit a find-my-car request
///
/// POST /api/v1/requests
///
/// New requests always start in `pending`; status changes are an admin
/// concern.
async fn submit_request(
    state: web::Data<AppState>,
    body: web::Json<SubmitRequestBody>,
) -> impl Responder {
    if let Err(errors) = body.validate() {
        tracing::info!("Validation failed for request submission: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let payload = serde_json::json!({
        "user_id": body.user_id,
        "first_name": body.first_name,
        "last_name": body.last_name,
        "email": body.email,
        "phone": body.phone,
        "make": body.make,
        "model": body.model,
        "year": body.year,
        "engine_size": body.engine_size,
        "transmission": body.transmission,
        "body_type": body.body_type,
        "max_price": body.max_price,
        "max_mileage": body.max_mileage,
        "admin_notes": body.notes,
        "status": "pending",
    });

    match state.supabase.insert_request(payload).await {
        Ok(request) => {
            tracing::info!(
                "Stored car request {} ({} {})",
                request.id,
                request.make,
                request.model
            );

            // The new request becomes the latest one, so the cached
            // recommendation rail for this user is stale
            if let Some(user_id) = &request.user_id {
                let key = CacheKey::recommendations(user_id);
                if let Err(e) = state.cache.delete(&key).await {
                    tracing::warn!("Failed to invalidate recommendations cache: {}", e);
                }
            }

            HttpResponse::Created().json(request)
        }
        Err(e) => {
            tracing::error!("Failed to store car request: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to store request".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

/// List the requesting user's own submissions, newest first
///
/// GET /api/v1/requests?userId={userId}
async fn my_requests(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) if !id.is_empty() => id,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing userId parameter".to_string(),
                message: "userId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    match state.supabase.requests_for_user(user_id).await {
        Ok(requests) => {
            let total = requests.len();
            HttpResponse::Ok().json(RequestListResponse { requests, total })
        }
        Err(e) => {
            tracing::error!("Failed to fetch requests for {}: {}", user_id, e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to fetch requests".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}
