//! DTOs de request/response de la API

pub mod auth_dto;
pub mod booking_dto;
pub mod common_dto;
pub mod customer_dto;
pub mod driver_dto;
pub mod payment_dto;
pub mod purchase_request_dto;
pub mod vehicle_dto;

pub use common_dto::{ApiResponse, CachedResponse};
