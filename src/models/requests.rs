use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// Query parameters for the public listings endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCarsQuery {
    pub make: Option<String>,
    #[serde(alias = "body_type", rename = "bodyType")]
    pub body_type: Option<String>,
    pub transmission: Option<String>,
    #[serde(alias = "min_price", rename = "minPrice")]
    pub min_price: Option<f64>,
    #[serde(alias = "max_price", rename = "maxPrice")]
    pub max_price: Option<f64>,
    #[serde(alias = "max_mileage", rename = "maxMileage")]
    pub max_mileage: Option<i64>,
    pub limit: Option<u16>,
}

/// Request to submit a find-my-car request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitRequestBody {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Option<String>,
    #[validate(length(min = 1))]
    #[serde(alias = "first_name", rename = "firstName")]
    pub first_name: String,
    #[validate(length(min = 1))]
    #[serde(alias = "last_name", rename = "lastName")]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1))]
    pub make: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[serde(alias = "engineSize", rename = "engineSize")]
    pub engine_size: Option<String>,
    pub transmission: Option<String>,
    #[serde(alias = "bodyType", rename = "bodyType")]
    pub body_type: Option<String>,
    #[serde(alias = "maxPrice", rename = "maxPrice")]
    pub max_price: Option<f64>,
    #[serde(alias = "maxMileage", rename = "maxMileage")]
    pub max_mileage: Option<i64>,
    pub notes: Option<String>,
}

/// Request to create a listing from the admin panel
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCarBody {
    #[validate(length(min = 1))]
    pub make: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub mileage: Option<i64>,
    pub transmission: Option<String>,
    #[serde(alias = "bodyType", rename = "bodyType")]
    pub body_type: Option<String>,
    #[serde(alias = "fuelType", rename = "fuelType")]
    pub fuel_type: Option<String>,
    #[serde(alias = "engineSize", rename = "engineSize")]
    pub engine_size: Option<String>,
    #[serde(alias = "exteriorColor", rename = "exteriorColor")]
    pub exterior_color: Option<String>,
    #[serde(alias = "interiorColor", rename = "interiorColor")]
    pub interior_color: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, alias = "isFeatured", rename = "isFeatured")]
    pub is_featured: bool,
    #[serde(default = "default_true", alias = "isVisible", rename = "isVisible")]
    pub is_visible: bool,
    #[serde(alias = "dealerName", rename = "dealerName")]
    pub dealer_name: Option<String>,
    #[serde(alias = "dealerPhone", rename = "dealerPhone")]
    pub dealer_phone: Option<String>,
    #[serde(alias = "dealerEmail", rename = "dealerEmail")]
    pub dealer_email: Option<String>,
    pub location: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Request to update a car request's status
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusBody {
    #[validate(length(min = 1))]
    pub status: String,
}

/// Request to update a car request's admin notes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNotesBody {
    pub notes: String,
}

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginBody {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request to create an admin account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAdminBody {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_cars_query_accepts_both_casings() {
        let camel: ListCarsQuery = serde_json::from_str(
            r#"{"make": "Toyota", "bodyType": "SUV", "minPrice": 10000, "maxPrice": 30000, "maxMileage": 80000}"#,
        )
        .unwrap();
        let snake: ListCarsQuery = serde_json::from_str(
            r#"{"make": "Toyota", "body_type": "SUV", "min_price": 10000, "max_price": 30000, "max_mileage": 80000}"#,
        )
        .unwrap();

        for query in [camel, snake] {
            assert_eq!(query.body_type.as_deref(), Some("SUV"));
            assert_eq!(query.min_price, Some(10_000.0));
            assert_eq!(query.max_price, Some(30_000.0));
            assert_eq!(query.max_mileage, Some(80_000));
        }
    }
}
