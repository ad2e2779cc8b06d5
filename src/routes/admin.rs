use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    AdminListResponse, CreateAdminBody, CreateCarBody, ErrorResponse, LoginBody, LoginResponse,
    RequestListResponse, RequestStatus, UpdateNotesBody, UpdateResponse, UpdateStatusBody,
};
use crate::routes::AppState;
use crate::services::AdminClaims;

/// Configure admin routes (bearer-token protected except login)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/login", web::post().to(login))
            .route("/cars", web::post().to(create_car))
            .route("/cars/{id}/visibility", web::patch().to(toggle_visibility))
            .route("/cars/{id}/featured", web::patch().to(toggle_featured))
            .route("/cars/{id}", web::delete().to(delete_car))
            .route("/requests", web::get().to(list_requests))
            .route("/requests/{id}/status", web::patch().to(update_status))
            .route("/requests/{id}/notes", web::patch().to(update_notes))
            .route("/admins", web::get().to(list_admins))
            .route("/admins", web::post().to(create_admin))
            .route("/admins/{id}", web::delete().to(delete_admin)),
    );
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse {
        error: "Unauthorized".to_string(),
        message: "A valid admin bearer token is required".to_string(),
        status_code: 401,
    })
}

/// Extract and verify the bearer token on an admin request
fn authorize(req: &HttpRequest, state: &AppState) -> Result<AdminClaims, HttpResponse> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let token = header.strip_prefix("Bearer ").unwrap_or_default();
    if token.is_empty() {
        return Err(unauthorized());
    }

    state.auth.verify_token(token).map_err(|_| unauthorized())
}

fn upstream_error(context: &str, e: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("{}: {}", context, e);
    HttpResponse::BadGateway().json(ErrorResponse {
        error: context.to_string(),
        message: e.to_string(),
        status_code: 502,
    })
}

/// Drop every cached listing and recommendation snapshot
///
/// Any car mutation can change what every user should see, so the
/// whole namespace goes.
async fn invalidate_car_caches(state: &AppState) {
    for pattern in ["cars:*", "car:*", "rec:*"] {
        if let Err(e) = state.cache.invalidate_pattern(pattern).await {
            tracing::warn!("Failed to invalidate cache pattern {}: {}", pattern, e);
        }
    }
}

/// Admin login
///
/// POST /api/v1/admin/login
///
/// Verifies the password against the bcrypt hash in the admins table
/// and returns a signed session token.
async fn login(state: web::Data<AppState>, body: web::Json<LoginBody>) -> impl Responder {
    if let Err(errors) = body.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let admin = match state.supabase.find_admin(&body.email).await {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            tracing::info!("Login attempt for unknown admin {}", body.email);
            return unauthorized();
        }
        Err(e) => return upstream_error("Failed to fetch admin", e),
    };

    match state.auth.verify_password(&body.password, &admin.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!("Failed login for admin {}", body.email);
            return unauthorized();
        }
        Err(e) => return upstream_error("Password verification failed", e),
    }

    match state.auth.issue_token(&admin.id, &admin.email) {
        Ok(token) => HttpResponse::Ok().json(LoginResponse {
            token,
            email: admin.email,
            expires_in_secs: state.auth.token_ttl_secs(),
        }),
        Err(e) => upstream_error("Failed to issue token", e),
    }
}

/// Create a listing
///
/// POST /api/v1/admin/cars
async fn create_car(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateCarBody>,
) -> impl Responder {
    if let Err(resp) = authorize(&req, &state) {
        return resp;
    }

    if let Err(errors) = body.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let payload = serde_json::json!({
        "make": body.make,
        "model": body.model,
        "year": body.year,
        "price": body.price,
        "mileage": body.mileage,
        "transmission": body.transmission,
        "body_type": body.body_type,
        "fuel_type": body.fuel_type,
        "engine_size": body.engine_size,
        "exterior_color": body.exterior_color,
        "interior_color": body.interior_color,
        "description": body.description,
        "images": body.images,
        "is_featured": body.is_featured,
        "is_visible": body.is_visible,
        "dealer_name": body.dealer_name,
        "dealer_phone": body.dealer_phone,
        "dealer_email": body.dealer_email,
        "location": body.location,
    });

    match state.supabase.insert_car(payload).await {
        Ok(car) => {
            tracing::info!("Created listing {} ({} {})", car.id, car.make, car.model);
            invalidate_car_caches(&state).await;
            HttpResponse::Created().json(car)
        }
        Err(e) => upstream_error("Failed to create car", e),
    }
}

#[derive(Debug, serde::Deserialize)]
struct FlagBody {
    value: bool,
}

/// Toggle listing visibility
///
/// PATCH /api/v1/admin/cars/{id}/visibility  {"value": false}
async fn toggle_visibility(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<FlagBody>,
) -> impl Responder {
    if let Err(resp) = authorize(&req, &state) {
        return resp;
    }

    let id = path.into_inner();
    let patch = serde_json::json!({ "is_visible": body.value });

    match state.supabase.update_car(&id, patch).await {
        Ok(()) => {
            tracing::info!("Set listing {} visibility to {}", id, body.value);
            invalidate_car_caches(&state).await;
            HttpResponse::Ok().json(UpdateResponse { success: true, id })
        }
        Err(e) => upstream_error("Failed to update visibility", e),
    }
}

/// Toggle the featured flag
///
/// PATCH /api/v1/admin/cars/{id}/featured  {"value": true}
async fn toggle_featured(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<FlagBody>,
) -> impl Responder {
    if let Err(resp) = authorize(&req, &state) {
        return resp;
    }

    let id = path.into_inner();
    let patch = serde_json::json!({ "is_featured": body.value });

    match state.supabase.update_car(&id, patch).await {
        Ok(()) => {
            tracing::info!("Set listing {} featured to {}", id, body.value);
            invalidate_car_caches(&state).await;
            HttpResponse::Ok().json(UpdateResponse { success: true, id })
        }
        Err(e) => upstream_error("Failed to update featured flag", e),
    }
}

/// Delete a listing
///
/// DELETE /api/v1/admin/cars/{id}
async fn delete_car(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(resp) = authorize(&req, &state) {
        return resp;
    }

    let id = path.into_inner();

    match state.supabase.delete_car(&id).await {
        Ok(()) => {
            tracing::info!("Deleted listing {}", id);
            invalidate_car_caches(&state).await;
            HttpResponse::Ok().json(UpdateResponse { success: true, id })
        }
        Err(e) => upstream_error("Failed to delete car", e),
    }
}

/// List car requests for the dashboard
///
/// GET /api/v1/admin/requests?status=pending
async fn list_requests(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    if let Err(resp) = authorize(&req, &state) {
        return resp;
    }

    let status = match query.get("status").map(String::as_str) {
        None | Some("") | Some("all") => None,
        Some(raw) => match RequestStatus::parse(raw) {
            Some(status) => Some(status),
            None => {
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Invalid status".to_string(),
                    message: "Status must be one of: pending, processing, matched, contacted, closed"
                        .to_string(),
                    status_code: 400,
                });
            }
        },
    };

    match state.supabase.list_requests(status).await {
        Ok(requests) => {
            let total = requests.len();
            HttpResponse::Ok().json(RequestListResponse { requests, total })
        }
        Err(e) => upstream_error("Failed to list requests", e),
    }
}

/// Update a request's status
///
/// PATCH /api/v1/admin/requests/{id}/status  {"status": "contacted"}
async fn update_status(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<UpdateStatusBody>,
) -> impl Responder {
    if let Err(resp) = authorize(&req, &state) {
        return resp;
    }

    let status = match RequestStatus::parse(&body.status) {
        Some(status) => status,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid status".to_string(),
                message: "Status must be one of: pending, processing, matched, contacted, closed"
                    .to_string(),
                status_code: 400,
            });
        }
    };

    let id = path.into_inner();
    let patch = serde_json::json!({ "status": status.as_str() });

    match state.supabase.update_request(&id, patch).await {
        Ok(()) => {
            tracing::info!("Set request {} status to {}", id, status.as_str());
            HttpResponse::Ok().json(UpdateResponse { success: true, id })
        }
        Err(e) => upstream_error("Failed to update status", e),
    }
}

/// Update a request's admin notes
///
/// PATCH /api/v1/admin/requests/{id}/notes  {"notes": "..."}
async fn update_notes(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<UpdateNotesBody>,
) -> impl Responder {
    if let Err(resp) = authorize(&req, &state) {
        return resp;
    }

    let id = path.into_inner();
    let patch = serde_json::json!({ "admin_notes": body.notes });

    match state.supabase.update_request(&id, patch).await {
        Ok(()) => HttpResponse::Ok().json(UpdateResponse { success: true, id }),
        Err(e) => upstream_error("Failed to update notes", e),
    }
}

/// List admin accounts
///
/// GET /api/v1/admin/admins
async fn list_admins(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(resp) = authorize(&req, &state) {
        return resp;
    }

    match state.supabase.list_admins().await {
        Ok(admins) => {
            let total = admins.len();
            HttpResponse::Ok().json(AdminListResponse { admins, total })
        }
        Err(e) => upstream_error("Failed to list admins", e),
    }
}

/// Create an admin account
///
/// POST /api/v1/admin/admins  {"email": "...", "password": "..."}
async fn create_admin(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateAdminBody>,
) -> impl Responder {
    if let Err(resp) = authorize(&req, &state) {
        return resp;
    }

    if let Err(errors) = body.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.supabase.find_admin(&body.email).await {
        Ok(Some(_)) => {
            return HttpResponse::Conflict().json(ErrorResponse {
                error: "Admin already exists".to_string(),
                message: format!("An admin with email {} already exists", body.email),
                status_code: 409,
            });
        }
        Ok(None) => {}
        Err(e) => return upstream_error("Failed to check admin", e),
    }

    let password_hash = match state.auth.hash_password(&body.password) {
        Ok(hash) => hash,
        Err(e) => return upstream_error("Failed to hash password", e),
    };

    match state.supabase.insert_admin(&body.email, &password_hash).await {
        Ok(admin) => {
            tracing::info!("Created admin account {}", admin.email);
            HttpResponse::Created().json(admin)
        }
        Err(e) => upstream_error("Failed to create admin", e),
    }
}

/// Delete an admin account
///
/// DELETE /api/v1/admin/admins/{id}
///
/// Admins cannot delete their own account.
async fn delete_admin(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let claims = match authorize(&req, &state) {
        Ok(claims) => claims,
        Err(resp) => return resp,
    };

    let id = path.into_inner();

    if claims.sub == id {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Cannot delete own account".to_string(),
            message: "You cannot delete the admin account you are signed in with".to_string(),
            status_code: 400,
        });
    }

    match state.supabase.delete_admin(&id).await {
        Ok(()) => {
            tracing::info!("Deleted admin account {}", id);
            HttpResponse::Ok().json(UpdateResponse { success: true, id })
        }
        Err(e) => upstream_error("Failed to delete admin", e),
    }
}
