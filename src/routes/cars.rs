use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    Car, CarFilter, CarListResponse, ErrorResponse, HealthResponse, ListCarsQuery, RecommendQuery,
    RecommendationsResponse,
};
use crate::routes::AppState;
use crate::services::{CacheKey, SupabaseError};

/// Configure public listing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/cars", web::get().to(list_cars))
        .route("/cars/{id}", web::get().to(get_car))
        .route("/recommendations", web::get().to(recommendations));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// The shared listing cache entry must only ever hold the full default
/// page; a caller-bounded fetch would serve truncated results to
/// everyone else for the whole TTL.
fn is_full_page(requested: Option<u16>, max_list_limit: u16) -> bool {
    match requested {
        None => true,
        Some(limit) => limit >= max_list_limit,
    }
}

/// Public listings endpoint
///
/// GET /api/v1/cars?make=&bodyType=&transmission=&minPrice=&maxPrice=&maxMileage=&limit=
///
/// Returns visible listings, featured first then newest first.
async fn list_cars(
    state: web::Data<AppState>,
    query: web::Query<ListCarsQuery>,
) -> impl Responder {
    let filter = CarFilter {
        make: query.make.clone().filter(|s| !s.is_empty()),
        body_type: query.body_type.clone().filter(|s| !s.is_empty()),
        transmission: query.transmission.clone().filter(|s| !s.is_empty()),
        min_price: query.min_price,
        max_price: query.max_price,
        max_mileage: query.max_mileage,
    };

    let limit = query
        .limit
        .map(|l| l.min(state.max_list_limit))
        .unwrap_or(state.max_list_limit);

    let unfiltered = filter.make.is_none()
        && filter.body_type.is_none()
        && filter.transmission.is_none()
        && filter.min_price.is_none()
        && filter.max_price.is_none()
        && filter.max_mileage.is_none();

    // Only the default front-page query is worth caching
    if unfiltered {
        let key = CacheKey::visible_cars();
        if let Ok(cars) = state.cache.get::<Vec<Car>>(&key).await {
            let cars: Vec<Car> = cars.into_iter().take(limit as usize).collect();
            let total = cars.len();
            return HttpResponse::Ok().json(CarListResponse { cars, total });
        }
    }

    let cars = match state.supabase.visible_cars(&filter, Some(limit)).await {
        Ok(cars) => cars,
        Err(e) => {
            tracing::error!("Failed to query cars: {}", e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to query cars".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    // Re-check visibility locally; the store should not return hidden rows
    // but nothing downstream may rely on that
    let cars: Vec<Car> = cars
        .into_iter()
        .filter(|car| crate::core::matches_browse_filter(car, &filter))
        .collect();

    if unfiltered && is_full_page(query.limit, state.max_list_limit) {
        if let Err(e) = state.cache.set(&CacheKey::visible_cars(), &cars).await {
            tracing::warn!("Failed to cache visible cars: {}", e);
        }
    }

    let total = cars.len();
    HttpResponse::Ok().json(CarListResponse { cars, total })
}

/// Single listing endpoint
///
/// GET /api/v1/cars/{id}
///
/// Hidden listings are indistinguishable from missing ones.
async fn get_car(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    let key = CacheKey::car(&id);
    if let Ok(car) = state.cache.get::<Car>(&key).await {
        return HttpResponse::Ok().json(car);
    }

    match state.supabase.get_visible_car(&id).await {
        Ok(car) => {
            if let Err(e) = state.cache.set(&key, &car).await {
                tracing::warn!("Failed to cache car {}: {}", id, e);
            }
            HttpResponse::Ok().json(car)
        }
        Err(SupabaseError::NotFound(_)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Car not found".to_string(),
            message: format!("No visible car with id {}", id),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch car {}: {}", id, e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to fetch car".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Recommendations endpoint
///
/// GET /api/v1/recommendations?userId={userId}
///
/// Runs the recommendation rule over the user's latest request and the
/// current visible listings. A user with no requests gets an empty list.
async fn recommendations(
    state: web::Data<AppState>,
    query: web::Query<RecommendQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &query.user_id;

    let key = CacheKey::recommendations(user_id);
    if let Ok(response) = state.cache.get::<RecommendationsResponse>(&key).await {
        tracing::debug!("Recommendation cache hit for {}", user_id);
        return HttpResponse::Ok().json(response);
    }

    let latest_request = match state.supabase.latest_request_for(user_id).await {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Failed to fetch latest request for {}: {}", user_id, e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to fetch latest request".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    // Filters the store can express are pushed down; the recommender
    // re-applies the full rule over the snapshot either way.
    let mut filter = CarFilter::default();
    if let Some(request) = &latest_request {
        if !request.make.is_empty() {
            filter.make = Some(request.make.clone());
        }
        filter.body_type = request.body_type.clone();
        filter.max_price = request.max_price;
        filter.max_mileage = request.max_mileage;
    }

    let candidates = match state.supabase.visible_cars(&filter, None).await {
        Ok(cars) => cars,
        Err(e) => {
            tracing::error!("Failed to query candidates for {}: {}", user_id, e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to query candidates".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    let result = state
        .recommender
        .recommend(latest_request.as_ref(), candidates);

    let response = RecommendationsResponse {
        recommendations: result.recommendations,
        total_candidates: result.total_candidates,
    };

    tracing::info!(
        "Returning {} recommendations for user {} (from {} candidates)",
        response.recommendations.len(),
        user_id,
        response.total_candidates
    );

    if let Err(e) = state.cache.set(&key, &response).await {
        tracing::warn!("Failed to cache recommendations for {}: {}", user_id, e);
    }

    HttpResponse::Ok().json(response)
}
