//! Controllers de la API
//!
//! Orquestan repositorios, servicios y cache por recurso; los handlers de
//! routes/ son adaptadores finos sobre estos.

pub mod auth_controller;
pub mod booking_controller;
pub mod cache_controller;
pub mod customer_controller;
pub mod dashboard_controller;
pub mod driver_controller;
pub mod payment_controller;
pub mod purchase_request_controller;
pub mod vehicle_controller;
