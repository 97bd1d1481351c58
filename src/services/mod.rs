//! Services module
//!
//! Lógica de negocio: agregación pura del dashboard, resolución de
//! identidad, máquina de estados de compras y orquestación de registro
//! y administración de staff.

pub mod dashboard_service;
pub mod identity_service;
pub mod purchase_request_service;
pub mod registration_service;
pub mod staff_service;

pub use dashboard_service::*;
pub use identity_service::{resolve_display_identity, DisplayIdentity};
pub use purchase_request_service::{CompletionPhoto, PurchaseRequestService};
pub use registration_service::{RegistrationInput, RegistrationService};
pub use staff_service::StaffService;
