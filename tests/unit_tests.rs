// Unit tests for Carmatch

use carmatch::core::{matches_browse_filter, matches_request};
use carmatch::models::{Car, CarFilter, CarRequest, RequestStatus};
use chrono::Utc;

fn car(make: &str, model: &str, year: i32, price: f64) -> Car {
    Car {
        id: format!("{}-{}-{}", make, model, year),
        make: make.to_string(),
        model: model.to_string(),
        year,
        price,
        mileage: Some(35_000),
        transmission: Some("Automatic".to_string()),
        body_type: Some("Sedan".to_string()),
        fuel_type: None,
        engine_size: None,
        exterior_color: None,
        interior_color: None,
        description: None,
        images: vec![],
        is_featured: Some(false),
        is_visible: Some(true),
        dealer_name: None,
        dealer_phone: None,
        dealer_email: None,
        location: None,
        created_at: Some(Utc::now()),
        updated_at: None,
    }
}

fn request(make: &str, model: &str, year: i32) -> CarRequest {
    CarRequest {
        id: "r1".to_string(),
        user_id: Some("user_1".to_string()),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: "test@example.com".to_string(),
        phone: None,
        make: make.to_string(),
        model: model.to_string(),
        year,
        engine_size: None,
        transmission: None,
        body_type: None,
        max_price: None,
        max_mileage: None,
        admin_notes: None,
        status: RequestStatus::Pending,
        created_at: Some(Utc::now()),
        updated_at: None,
    }
}

#[test]
fn test_make_and_model_must_both_match() {
    let r = request("Toyota", "Camry", 2021);

    assert!(matches_request(&car("Toyota", "Camry", 2019, 20_000.0), &r));
    assert!(!matches_request(&car("Toyota", "Corolla", 2021, 20_000.0), &r));
    assert!(!matches_request(&car("Honda", "Camry", 2021, 20_000.0), &r));
}

#[test]
fn test_year_window_only_without_model() {
    // With a model, year is ignored entirely
    let with_model = request("Toyota", "Camry", 2021);
    assert!(matches_request(
        &car("Toyota", "Camry", 1999, 20_000.0),
        &with_model
    ));

    // Without a model, year applies with a ±2 window
    let without_model = request("Honda", "", 2020);
    assert!(matches_request(
        &car("Honda", "Civic", 2018, 20_000.0),
        &without_model
    ));
    assert!(matches_request(
        &car("Honda", "Accord", 2022, 20_000.0),
        &without_model
    ));
    assert!(!matches_request(
        &car("Honda", "Civic", 2023, 20_000.0),
        &without_model
    ));
}

#[test]
fn test_price_cap_overrides_otherwise_perfect_match() {
    let mut r = request("Toyota", "Camry", 2021);
    r.max_price = Some(30_000.0);

    let mut expensive = car("Toyota", "Camry", 2021, 30_001.0);
    expensive.is_featured = Some(true);

    assert!(!matches_request(&expensive, &r));
    assert!(matches_request(&car("Toyota", "Camry", 2021, 30_000.0), &r));
}

#[test]
fn test_missing_mileage_passes_mileage_cap() {
    let mut r = request("Toyota", "Camry", 2021);
    r.max_mileage = Some(10_000);

    let mut unknown_mileage = car("Toyota", "Camry", 2021, 20_000.0);
    unknown_mileage.mileage = None;

    assert!(matches_request(&unknown_mileage, &r));
}

#[test]
fn test_browse_filter_transmission() {
    let filter = CarFilter {
        transmission: Some("Manual".to_string()),
        ..Default::default()
    };

    let automatic = car("Mazda", "MX-5", 2022, 34_000.0);
    let mut manual = car("Mazda", "MX-5", 2022, 34_000.0);
    manual.transmission = Some("Manual".to_string());

    assert!(matches_browse_filter(&manual, &filter));
    assert!(!matches_browse_filter(&automatic, &filter));
}

#[test]
fn test_empty_browse_filter_accepts_all_visible() {
    let filter = CarFilter::default();

    assert!(matches_browse_filter(&car("Kia", "Rio", 2015, 9_000.0), &filter));

    let mut hidden = car("Kia", "Rio", 2015, 9_000.0);
    hidden.is_visible = Some(false);
    assert!(!matches_browse_filter(&hidden, &filter));
}

#[test]
fn test_car_request_parses_store_row() {
    // Shape of a row as the hosted store returns it
    let json = r#"{
        "id": "9e4a",
        "user_id": "u1",
        "first_name": "Dana",
        "last_name": "Reyes",
        "email": "dana@example.com",
        "phone": null,
        "make": "Toyota",
        "model": "Corolla",
        "year": 2021,
        "body_type": null,
        "max_price": 25000,
        "max_mileage": null,
        "admin_notes": null,
        "status": null,
        "created_at": "2026-08-01T10:00:00Z",
        "updated_at": "2026-08-01T10:00:00Z"
    }"#;

    let request: CarRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.max_price, Some(25_000.0));
    assert!(request.max_mileage.is_none());
}
