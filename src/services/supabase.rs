use crate::models::{Admin, Car, CarFilter, CarRequest, RequestStatus};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid service key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Supabase PostgREST client
///
/// Handles all communication with the hosted store including:
/// - Reading visible listings and per-user requests
/// - Persisting find-my-car submissions
/// - Admin mutations on listings, requests and admin accounts
pub struct SupabaseClient {
    base_url: String,
    service_key: String,
    client: Client,
    tables: SupabaseTables,
}

/// Table names in the hosted store
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub cars: String,
    pub car_requests: String,
    pub admins: String,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, service_key: String, tables: SupabaseTables) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            service_key,
            client,
            tables,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            table
        )
    }

    fn check_status(status: reqwest::StatusCode, context: &str) -> Result<(), SupabaseError> {
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }
        if !status.is_success() {
            return Err(SupabaseError::ApiError(format!("{}: {}", context, status)));
        }
        Ok(())
    }

    async fn get_rows(&self, url: &str, context: &str) -> Result<Vec<Value>, SupabaseError> {
        let response = self
            .client
            .get(url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", &self.service_key))
            .send()
            .await?;

        Self::check_status(response.status(), context)?;

        let json: Value = response.json().await?;
        let rows = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected JSON array".into()))?;

        Ok(rows.clone())
    }

    /// Fetch the user's most recent car request, if any
    pub async fn latest_request_for(
        &self,
        user_id: &str,
    ) -> Result<Option<CarRequest>, SupabaseError> {
        let url = format!(
            "{}?select=*&user_id=eq.{}&order=created_at.desc&limit=1",
            self.table_url(&self.tables.car_requests),
            urlencoding::encode(user_id),
        );

        tracing::debug!("Fetching latest request from: {}", url);

        let rows = self.get_rows(&url, "Failed to fetch latest request").await?;

        match rows.first() {
            Some(row) => serde_json::from_value(row.clone()).map(Some).map_err(|e| {
                SupabaseError::InvalidResponse(format!("Failed to parse request: {}", e))
            }),
            None => Ok(None),
        }
    }

    /// Fetch all of a user's requests, newest first
    pub async fn requests_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<CarRequest>, SupabaseError> {
        let url = format!(
            "{}?select=*&user_id=eq.{}&order=created_at.desc",
            self.table_url(&self.tables.car_requests),
            urlencoding::encode(user_id),
        );

        let rows = self.get_rows(&url, "Failed to fetch user requests").await?;
        Ok(parse_rows(&rows))
    }

    /// Fetch all requests for the admin dashboard, optionally by status
    pub async fn list_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<CarRequest>, SupabaseError> {
        let mut url = format!(
            "{}?select=*&order=created_at.desc",
            self.table_url(&self.tables.car_requests),
        );
        if let Some(status) = status {
            url.push_str(&format!("&status=eq.{}", status.as_str()));
        }

        let rows = self.get_rows(&url, "Failed to list requests").await?;
        Ok(parse_rows(&rows))
    }

    /// Query visible listings, featured first then newest
    ///
    /// Equality and range filters are pushed down to PostgREST; anything
    /// the store cannot express is re-checked by the core filters.
    pub async fn visible_cars(
        &self,
        filter: &CarFilter,
        limit: Option<u16>,
    ) -> Result<Vec<Car>, SupabaseError> {
        let mut url = format!(
            "{}?select=*&is_visible=eq.true&order=is_featured.desc,created_at.desc",
            self.table_url(&self.tables.cars),
        );

        if let Some(make) = &filter.make {
            url.push_str(&format!("&make=eq.{}", urlencoding::encode(make)));
        }
        if let Some(body_type) = &filter.body_type {
            url.push_str(&format!("&body_type=eq.{}", urlencoding::encode(body_type)));
        }
        if let Some(transmission) = &filter.transmission {
            url.push_str(&format!(
                "&transmission=eq.{}",
                urlencoding::encode(transmission)
            ));
        }
        if let Some(min_price) = filter.min_price {
            url.push_str(&format!("&price=gte.{}", min_price));
        }
        if let Some(max_price) = filter.max_price {
            url.push_str(&format!("&price=lte.{}", max_price));
        }
        if let Some(max_mileage) = filter.max_mileage {
            url.push_str(&format!("&mileage=lte.{}", max_mileage));
        }
        if let Some(limit) = limit {
            url.push_str(&format!("&limit={}", limit));
        }

        tracing::debug!("Querying visible cars: {}", url);

        let rows = self.get_rows(&url, "Failed to query cars").await?;
        let cars: Vec<Car> = parse_rows(&rows);

        tracing::debug!("Queried {} visible cars", cars.len());

        Ok(cars)
    }

    /// Fetch a single visible listing by id
    pub async fn get_visible_car(&self, id: &str) -> Result<Car, SupabaseError> {
        let url = format!(
            "{}?select=*&id=eq.{}&is_visible=eq.true&limit=1",
            self.table_url(&self.tables.cars),
            urlencoding::encode(id),
        );

        let rows = self.get_rows(&url, "Failed to fetch car").await?;

        let row = rows
            .first()
            .ok_or_else(|| SupabaseError::NotFound(format!("Car not found: {}", id)))?;

        serde_json::from_value(row.clone())
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse car: {}", e)))
    }

    /// Insert a new car request; returns the stored row
    pub async fn insert_request(&self, payload: Value) -> Result<CarRequest, SupabaseError> {
        let row = self
            .insert_row(&self.tables.car_requests, payload, "Failed to insert request")
            .await?;

        serde_json::from_value(row)
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse request: {}", e)))
    }

    /// Insert a new listing; returns the stored row
    pub async fn insert_car(&self, payload: Value) -> Result<Car, SupabaseError> {
        let row = self
            .insert_row(&self.tables.cars, payload, "Failed to insert car")
            .await?;

        serde_json::from_value(row)
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse car: {}", e)))
    }

    /// Single-field update on a listing (visibility / featured toggles)
    pub async fn update_car(&self, id: &str, patch: Value) -> Result<(), SupabaseError> {
        self.patch_row(&self.tables.cars, id, patch, "Failed to update car")
            .await
    }

    /// Single-field update on a request (status / admin notes)
    pub async fn update_request(&self, id: &str, patch: Value) -> Result<(), SupabaseError> {
        self.patch_row(
            &self.tables.car_requests,
            id,
            patch,
            "Failed to update request",
        )
        .await
    }

    /// Delete a listing
    pub async fn delete_car(&self, id: &str) -> Result<(), SupabaseError> {
        self.delete_row(&self.tables.cars, id, "Failed to delete car")
            .await
    }

    /// Look up an admin account by email
    pub async fn find_admin(&self, email: &str) -> Result<Option<Admin>, SupabaseError> {
        let url = format!(
            "{}?select=*&email=eq.{}&limit=1",
            self.table_url(&self.tables.admins),
            urlencoding::encode(email),
        );

        let rows = self.get_rows(&url, "Failed to fetch admin").await?;

        match rows.first() {
            Some(row) => serde_json::from_value(row.clone()).map(Some).map_err(|e| {
                SupabaseError::InvalidResponse(format!("Failed to parse admin: {}", e))
            }),
            None => Ok(None),
        }
    }

    /// List all admin accounts
    pub async fn list_admins(&self) -> Result<Vec<Admin>, SupabaseError> {
        let url = format!(
            "{}?select=*&order=created_at.desc",
            self.table_url(&self.tables.admins),
        );

        let rows = self.get_rows(&url, "Failed to list admins").await?;
        Ok(parse_rows(&rows))
    }

    /// Create an admin account with a pre-hashed password
    pub async fn insert_admin(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Admin, SupabaseError> {
        let payload = serde_json::json!({
            "email": email,
            "password_hash": password_hash,
        });

        let row = self
            .insert_row(&self.tables.admins, payload, "Failed to insert admin")
            .await?;

        serde_json::from_value(row)
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse admin: {}", e)))
    }

    /// Delete an admin account
    pub async fn delete_admin(&self, id: &str) -> Result<(), SupabaseError> {
        self.delete_row(&self.tables.admins, id, "Failed to delete admin")
            .await
    }

    async fn insert_row(
        &self,
        table: &str,
        payload: Value,
        context: &str,
    ) -> Result<Value, SupabaseError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", &self.service_key))
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await?;

        Self::check_status(response.status(), context)?;

        let json: Value = response.json().await?;
        json.as_array()
            .and_then(|rows| rows.first().cloned())
            .ok_or_else(|| SupabaseError::InvalidResponse("Insert returned no rows".into()))
    }

    async fn patch_row(
        &self,
        table: &str,
        id: &str,
        patch: Value,
        context: &str,
    ) -> Result<(), SupabaseError> {
        let url = format!("{}?id=eq.{}", self.table_url(table), urlencoding::encode(id));

        let response = self
            .client
            .patch(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", &self.service_key))
            .json(&patch)
            .send()
            .await?;

        Self::check_status(response.status(), context)
    }

    async fn delete_row(&self, table: &str, id: &str, context: &str) -> Result<(), SupabaseError> {
        let url = format!("{}?id=eq.{}", self.table_url(table), urlencoding::encode(id));

        let response = self
            .client
            .delete(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", &self.service_key))
            .send()
            .await?;

        Self::check_status(response.status(), context)
    }
}

/// Parse rows leniently, dropping any the store returns in an unexpected shape
fn parse_rows<T: serde::de::DeserializeOwned>(rows: &[Value]) -> Vec<T> {
    rows.iter()
        .filter_map(|row| serde_json::from_value(row.clone()).ok())
        .collect()
}
