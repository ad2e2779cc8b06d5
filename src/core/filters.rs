use crate::models::{Car, CarFilter, CarRequest};

/// Check if a listing matches a user's car request
///
/// Filters are conjunctive and each one applies only when the request
/// carries the corresponding field. Model and year are an either/or
/// branch: an exact model match wins, and only a request without a
/// model falls back to the ±2 year window. This mirrors the original
/// marketplace behavior and is intentional.
#[inline]
pub fn matches_request(car: &Car, request: &CarRequest) -> bool {
    // Hidden listings are never eligible, no matter how well they match
    if !car.visible() {
        return false;
    }

    if !request.make.is_empty() && car.make != request.make {
        return false;
    }

    if !request.model.is_empty() {
        if car.model != request.model {
            return false;
        }
    } else if request.year != 0 {
        let year_range = 2;
        if car.year < request.year - year_range || car.year > request.year + year_range {
            return false;
        }
    }

    if let Some(body_type) = &request.body_type {
        if car.body_type.as_deref() != Some(body_type.as_str()) {
            return false;
        }
    }

    if let Some(max_price) = request.max_price {
        if car.price > max_price {
            return false;
        }
    }

    if let Some(max_mileage) = request.max_mileage {
        if car.mileage.unwrap_or(0) > max_mileage {
            return false;
        }
    }

    true
}

/// Check if a visible listing passes the public browse filter
#[inline]
pub fn matches_browse_filter(car: &Car, filter: &CarFilter) -> bool {
    if !car.visible() {
        return false;
    }

    if let Some(make) = &filter.make {
        if &car.make != make {
            return false;
        }
    }

    if let Some(body_type) = &filter.body_type {
        if car.body_type.as_deref() != Some(body_type.as_str()) {
            return false;
        }
    }

    if let Some(transmission) = &filter.transmission {
        if car.transmission.as_deref() != Some(transmission.as_str()) {
            return false;
        }
    }

    if let Some(min_price) = filter.min_price {
        if car.price < min_price {
            return false;
        }
    }

    if let Some(max_price) = filter.max_price {
        if car.price > max_price {
            return false;
        }
    }

    if let Some(max_mileage) = filter.max_mileage {
        if car.mileage.unwrap_or(0) > max_mileage {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_car(make: &str, model: &str, year: i32, price: f64) -> Car {
        Car {
            id: "test_car".to_string(),
            make: make.to_string(),
            model: model.to_string(),
            year,
            price,
            mileage: Some(40_000),
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

    fn create_test_request(make: &str, model: &str, year: i32) -> CarRequest {
        CarRequest {
            id: "test_request".to_string(),
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
            status: Default::default(),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    #[test]
    fn test_exact_make_and_model_match() {
        let car = create_test_car("Toyota", "Camry", 2021, 28_000.0);
        let request = create_test_request("Toyota", "Camry", 2021);

        assert!(matches_request(&car, &request));
    }

    #[test]
    fn test_wrong_make_rejected() {
        let car = create_test_car("Honda", "Camry", 2021, 28_000.0);
        let request = create_test_request("Toyota", "Camry", 2021);

        assert!(!matches_request(&car, &request));
    }

    #[test]
    fn test_model_takes_precedence_over_year() {
        // The model filter is exact; a matching year must not rescue a
        // listing with a different model.
        let car = create_test_car("Toyota", "Corolla", 2021, 28_000.0);
        let request = create_test_request("Toyota", "Camry", 2021);

        assert!(!matches_request(&car, &request));
    }

    #[test]
    fn test_year_window_without_model() {
        let request = create_test_request("Honda", "", 2020);

        let within = create_test_car("Honda", "Civic", 2018, 28_000.0);
        let above = create_test_car("Honda", "Civic", 2022, 28_000.0);
        let outside = create_test_car("Honda", "Civic", 2017, 28_000.0);

        assert!(matches_request(&within, &request));
        assert!(matches_request(&above, &request));
        assert!(!matches_request(&outside, &request));
    }

    #[test]
    fn test_no_model_no_year_skips_both() {
        let request = create_test_request("Honda", "", 0);
        let car = create_test_car("Honda", "Anything", 1999, 28_000.0);

        assert!(matches_request(&car, &request));
    }

    #[test]
    fn test_max_price_cap() {
        let mut request = create_test_request("Toyota", "Corolla", 2021);
        request.max_price = Some(25_000.0);

        let cheap = create_test_car("Toyota", "Corolla", 2021, 24_000.0);
        let expensive = create_test_car("Toyota", "Corolla", 2021, 26_000.0);

        assert!(matches_request(&cheap, &request));
        assert!(!matches_request(&expensive, &request));
    }

    #[test]
    fn test_max_mileage_cap() {
        let mut request = create_test_request("Toyota", "Corolla", 2021);
        request.max_mileage = Some(30_000);

        let mut high_mileage = create_test_car("Toyota", "Corolla", 2021, 24_000.0);
        high_mileage.mileage = Some(80_000);

        let car = create_test_car("Toyota", "Corolla", 2021, 24_000.0);

        assert!(matches_request(&car, &request));
        assert!(!matches_request(&high_mileage, &request));
    }

    #[test]
    fn test_body_type_exact_match() {
        let mut request = create_test_request("Toyota", "Corolla", 2021);
        request.body_type = Some("SUV".to_string());

        let sedan = create_test_car("Toyota", "Corolla", 2021, 24_000.0);
        assert!(!matches_request(&sedan, &request));

        let mut suv = create_test_car("Toyota", "Corolla", 2021, 24_000.0);
        suv.body_type = Some("SUV".to_string());
        assert!(matches_request(&suv, &request));
    }

    #[test]
    fn test_hidden_listing_never_matches() {
        let mut car = create_test_car("Toyota", "Camry", 2021, 28_000.0);
        car.is_visible = Some(false);
        let request = create_test_request("Toyota", "Camry", 2021);

        assert!(!matches_request(&car, &request));
    }

    #[test]
    fn test_browse_filter_price_band() {
        let filter = CarFilter {
            min_price: Some(20_000.0),
            max_price: Some(30_000.0),
            ..Default::default()
        };

        assert!(matches_browse_filter(
            &create_test_car("Toyota", "Camry", 2021, 25_000.0),
            &filter
        ));
        assert!(!matches_browse_filter(
            &create_test_car("Toyota", "Camry", 2021, 35_000.0),
            &filter
        ));
        assert!(!matches_browse_filter(
            &create_test_car("Toyota", "Camry", 2021, 15_000.0),
            &filter
        ));
    }

    #[test]
    fn test_browse_filter_hides_invisible() {
        let mut car = create_test_car("Toyota", "Camry", 2021, 25_000.0);
        car.is_visible = Some(false);

        assert!(!matches_browse_filter(&car, &CarFilter::default()));
    }
}
