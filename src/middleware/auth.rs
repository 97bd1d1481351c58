//! Middleware de autenticación JWT
//!
//! Extrae y valida el token Bearer, e inyecta el usuario autenticado como
//! extension del request. Los checks de rol viven en los handlers.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::models::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)
        .map_err(|_| AppError::Unauthorized("Token inválido o expirado".to_string()))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido en el token".to_string()))?;

    let auth_user = AuthUser {
        id: user_id,
        email: claims.email,
        role: claims.role,
    };

    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}

/// Exigir rol admin
pub fn require_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden("Se requiere rol admin".to_string()));
    }
    Ok(())
}

/// Exigir rol de staff (admin incluido)
pub fn require_staff(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_staff() {
        return Err(AppError::Forbidden("Se requiere rol de staff".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&user("admin")).is_ok());
        assert!(require_admin(&user("staff")).is_err());
        assert!(require_admin(&user("customer")).is_err());
    }

    #[test]
    fn test_require_staff_accepts_admin_and_staff() {
        assert!(require_staff(&user("admin")).is_ok());
        assert!(require_staff(&user("staff")).is_ok());
        assert!(require_staff(&user("driver")).is_err());
    }
}
