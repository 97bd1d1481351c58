//! Resolución de identidad para display
//!
//! users, customers y drivers se solapan en nombre/email/teléfono. Esta es
//! LA función de fallback, con precedencia fija, que antes estaba repetida
//! en cada call site:
//!
//! nombre: tabla de rol → users.full_name → metadata.full_name →
//! parte local del email → "Unknown"

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Customer, Driver, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayIdentity {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn metadata_str<'a>(metadata: Option<&'a Value>, field: &str) -> Option<&'a str> {
    metadata.and_then(|m| m.get(field)).and_then(Value::as_str)
}

fn email_local_part(email: &str) -> Option<String> {
    email.split('@').next().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Resolver nombre/email/teléfono de display con la precedencia documentada
pub fn resolve_display_identity(
    user: Option<&User>,
    customer: Option<&Customer>,
    driver: Option<&Driver>,
    metadata: Option<&Value>,
) -> DisplayIdentity {
    let email = non_empty(customer.and_then(|c| c.email.as_deref()))
        .or_else(|| non_empty(driver.and_then(|d| d.email.as_deref())))
        .or_else(|| non_empty(user.and_then(|u| u.email.as_deref())))
        .or_else(|| non_empty(metadata_str(metadata, "email")));

    let phone = non_empty(customer.and_then(|c| c.phone.as_deref()))
        .or_else(|| non_empty(driver.and_then(|d| d.phone.as_deref())))
        .or_else(|| non_empty(user.and_then(|u| u.phone.as_deref())))
        .or_else(|| non_empty(metadata_str(metadata, "phone")));

    let name = non_empty(customer.and_then(|c| c.full_name.as_deref()))
        .or_else(|| non_empty(driver.and_then(|d| d.full_name.as_deref())))
        .or_else(|| non_empty(user.and_then(|u| u.full_name.as_deref())))
        .or_else(|| non_empty(metadata_str(metadata, "full_name")))
        .or_else(|| email.as_deref().and_then(email_local_part))
        .unwrap_or_else(|| "Unknown".to_string());

    DisplayIdentity { name, email, phone }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn user(full_name: Option<&str>, email: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.map(String::from),
            full_name: full_name.map(String::from),
            phone: None,
            role: Some("customer".to_string()),
            metadata: None,
            password_hash: None,
            created_at: Utc::now(),
        }
    }

    fn customer(full_name: Option<&str>) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            user_id: None,
            full_name: full_name.map(String::from),
            email: None,
            phone: Some("+34 600 000 001".to_string()),
            address: None,
            id_document_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_table_name_wins() {
        let u = user(Some("User Name"), Some("user@example.com"));
        let c = customer(Some("Customer Name"));
        let identity = resolve_display_identity(Some(&u), Some(&c), None, None);
        assert_eq!(identity.name, "Customer Name");
        assert_eq!(identity.phone.as_deref(), Some("+34 600 000 001"));
    }

    #[test]
    fn test_falls_back_to_user_then_metadata() {
        let u = user(Some("User Name"), Some("user@example.com"));
        let identity = resolve_display_identity(Some(&u), Some(&customer(None)), None, None);
        assert_eq!(identity.name, "User Name");

        let metadata = json!({ "full_name": "Meta Name" });
        let anon = user(None, Some("user@example.com"));
        let identity =
            resolve_display_identity(Some(&anon), None, None, Some(&metadata));
        assert_eq!(identity.name, "Meta Name");
    }

    #[test]
    fn test_falls_back_to_email_local_part() {
        let u = user(None, Some("jdoe@example.com"));
        let identity = resolve_display_identity(Some(&u), None, None, None);
        assert_eq!(identity.name, "jdoe");
        assert_eq!(identity.email.as_deref(), Some("jdoe@example.com"));
    }

    #[test]
    fn test_unknown_when_nothing_available() {
        let identity = resolve_display_identity(None, None, None, None);
        assert_eq!(identity.name, "Unknown");
        assert!(identity.email.is_none());
        assert!(identity.phone.is_none());
    }

    #[test]
    fn test_blank_strings_do_not_count() {
        let u = user(Some("   "), Some("real@example.com"));
        let identity = resolve_display_identity(Some(&u), None, None, None);
        assert_eq!(identity.name, "real");
    }
}
