// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Admin, Car, CarFilter, CarRequest, RequestStatus};
pub use requests::{
    CreateAdminBody, CreateCarBody, ListCarsQuery, LoginBody, RecommendQuery, SubmitRequestBody,
    UpdateNotesBody, UpdateStatusBody,
};
pub use responses::{
    AdminListResponse, CarListResponse, ErrorResponse, HealthResponse, LoginResponse,
    RecommendationsResponse, RequestListResponse, UpdateResponse,
};
