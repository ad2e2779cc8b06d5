use serde::{Deserialize, Serialize};

/// A vehicle listing as stored in the `cars` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    #[serde(default)]
    pub mileage: Option<i64>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub engine_size: Option<String>,
    #[serde(default)]
    pub exterior_color: Option<String>,
    #[serde(default)]
    pub interior_color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default = "default_visible")]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub dealer_name: Option<String>,
    #[serde(default)]
    pub dealer_phone: Option<String>,
    #[serde(default)]
    pub dealer_email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Car {
    /// Helper to get is_featured as a bool, defaulting to false
    pub fn featured(&self) -> bool {
        self.is_featured.unwrap_or(false)
    }

    /// Helper to get is_visible as a bool, defaulting to true
    pub fn visible(&self) -> bool {
        self.is_visible.unwrap_or(true)
    }
}

fn default_visible() -> Option<bool> {
    Some(true)
}

// The images column is nullable in the hosted store
fn null_to_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// A user's find-my-car request as stored in the `car_requests` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarRequest {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(default)]
    pub engine_size: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub max_mileage: Option<i64>,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default, deserialize_with = "status_or_default")]
    pub status: RequestStatus,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Lifecycle status of a car request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Processing,
    Matched,
    Contacted,
    Closed,
}

// The hosted store allows a null status on old rows; treat it as pending.
fn status_or_default<'de, D>(deserializer: D) -> Result<RequestStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<RequestStatus>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

impl RequestStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "pending" => Some(RequestStatus::Pending),
            "processing" => Some(RequestStatus::Processing),
            "matched" => Some(RequestStatus::Matched),
            "contacted" => Some(RequestStatus::Contacted),
            "closed" => Some(RequestStatus::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Processing => "processing",
            RequestStatus::Matched => "matched",
            RequestStatus::Contacted => "contacted",
            RequestStatus::Closed => "closed",
        }
    }
}

/// Admin account as stored in the `admins` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Public browse filter over visible listings
#[derive(Debug, Clone, Default)]
pub struct CarFilter {
    pub make: Option<String>,
    pub body_type: Option<String>,
    pub transmission: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub max_mileage: Option<i64>,
}
