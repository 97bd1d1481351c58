//! Modelos de dominio
//!
//! Structs tipados que mapean las tablas del data store. La agregación y la
//! máquina de estados operan sobre estos tipos validados, nunca sobre JSON
//! suelto.

pub mod auth;
pub mod booking;
pub mod customer;
pub mod dashboard;
pub mod driver;
pub mod payment;
pub mod purchase_request;
pub mod user;
pub mod vehicle;

pub use auth::AuthUser;
pub use booking::Booking;
pub use customer::Customer;
pub use dashboard::{
    BookingTableRow, DashboardReport, DashboardSummary, MethodBucket, MonthlyPaymentEntry,
    StatusBucket, TrendEntry,
};
pub use driver::Driver;
pub use payment::{DerivedPaymentStatus, Payment};
pub use purchase_request::{PurchaseRequest, PurchaseRequestStatus};
pub use user::User;
pub use vehicle::{Vehicle, VehicleType};
