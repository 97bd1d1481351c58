use validator::Validate;

use crate::dto::auth_dto::{
    AssignRoleRequest, CreateStaffRequest, LoginRequest, LoginResponse, RegisterRequest,
};
use crate::dto::common_dto::ApiResponse;
use crate::models::{AuthUser, User};
use crate::repositories::{CustomerRepository, DriverRepository, UserRepository};
use crate::services::registration_service::{RegistrationInput, RegistrationService};
use crate::services::staff_service::StaffService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use uuid::Uuid;

pub struct AuthController {
    users: UserRepository,
    registration: RegistrationService,
    staff: StaffService,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        let users = UserRepository::new(state.pool.clone());
        let registration = RegistrationService::new(
            UserRepository::new(state.pool.clone()),
            CustomerRepository::new(state.pool.clone()),
            DriverRepository::new(state.pool.clone()),
            std::sync::Arc::clone(&state.storage),
            state.cache.clone(),
        );
        let staff = StaffService::new(
            UserRepository::new(state.pool.clone()),
            state.functions.clone(),
            state.cache.clone(),
        );
        Self { users, registration, staff, jwt_config: JwtConfig::from(&state.config) }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = bcrypt::verify(&request.password, hash)
            .map_err(|e| AppError::Hash(format!("Error verificando password: {}", e)))?;
        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let role = user.role.clone().unwrap_or_else(|| "customer".to_string());
        let email = user.email.clone().unwrap_or_default();
        let token = generate_token(user.id, &role, &email, &self.jwt_config)?;

        Ok(LoginResponse::success(token, user.id, role))
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<ApiResponse<User>, AppError> {
        request.validate()?;

        let user = self
            .registration
            .register(RegistrationInput {
                email: request.email,
                password: request.password,
                full_name: request.full_name,
                phone: request.phone,
                role: request.role,
                address: request.address,
                id_document_base64: request.id_document_base64,
                license_number: request.license_number,
                license_expiry: request.license_expiry,
                license_photo_base64: request.license_photo_base64,
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            user,
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn me(&self, auth: &AuthUser) -> Result<User, AppError> {
        self.users
            .find_by_id(auth.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
    }

    pub async fn create_staff(
        &self,
        request: CreateStaffRequest,
    ) -> Result<ApiResponse<Uuid>, AppError> {
        request.validate()?;
        let user_id = self
            .staff
            .create_staff_user(&request.email, &request.password, &request.full_name, &request.role)
            .await?;
        Ok(ApiResponse::success_with_message(
            user_id,
            "Usuario staff creado exitosamente".to_string(),
        ))
    }

    pub async fn assign_role(
        &self,
        user_id: Uuid,
        request: AssignRoleRequest,
    ) -> Result<ApiResponse<User>, AppError> {
        let user = self.staff.assign_role(user_id, &request.role).await?;
        Ok(ApiResponse::success(user))
    }

    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), AppError> {
        self.staff.delete_user(user_id).await
    }
}
