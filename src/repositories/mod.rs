//! Repositories module
//!
//! Acceso a datos con sqlx. Cada repositorio envuelve el pool y expone
//! consultas tipadas; el cache de lectura vive por encima, nunca acá.

pub mod booking_repository;
pub mod customer_repository;
pub mod driver_repository;
pub mod payment_repository;
pub mod purchase_request_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use booking_repository::{BookingRepository, ServiceTable};
pub use customer_repository::CustomerRepository;
pub use driver_repository::DriverRepository;
pub use payment_repository::PaymentRepository;
pub use purchase_request_repository::PurchaseRequestRepository;
pub use user_repository::UserRepository;
pub use vehicle_repository::VehicleRepository;
