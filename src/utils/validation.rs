//! Validaciones compartidas
//!
//! Helpers de validación usados por los DTOs de registro y de entidades.

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::errors::AppError;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9\s\-]{6,19}$").unwrap();
}

/// Validar formato de email
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validar formato de teléfono (dígitos, espacios y guiones, prefijo + opcional)
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Validar que un campo requerido no esté vacío
pub fn require_non_empty(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("El campo '{}' es requerido", field)));
    }
    Ok(())
}

/// Roles válidos para registro de usuarios finales
pub const SELF_REGISTER_ROLES: [&str; 2] = ["customer", "driver"];

/// Roles válidos para staff (asignados por un admin)
pub const STAFF_ROLES: [&str; 2] = ["admin", "staff"];

pub fn is_self_register_role(role: &str) -> bool {
    SELF_REGISTER_ROLES.contains(&role)
}

pub fn is_staff_role(role: &str) -> bool {
    STAFF_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@domain"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("+34 600 123 456"));
        assert!(is_valid_phone("0612345678"));
        assert!(!is_valid_phone("abc"));
        assert!(!is_valid_phone("12"));
    }

    #[test]
    fn test_roles() {
        assert!(is_self_register_role("customer"));
        assert!(is_self_register_role("driver"));
        assert!(!is_self_register_role("admin"));
        assert!(is_staff_role("admin"));
        assert!(!is_staff_role("driver"));
    }
}
