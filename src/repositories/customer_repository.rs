//! Repositorio de clientes

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Customer;
use crate::utils::errors::AppError;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Customer>, AppError> {
        let pattern = format!("%{}%", term);
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customers
            WHERE full_name ILIKE $1 OR email ILIKE $1 OR phone ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn create(
        &self,
        user_id: Option<Uuid>,
        full_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        id_document_url: Option<String>,
    ) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (id, user_id, full_name, email, phone, address, id_document_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(id_document_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn update(
        &self,
        id: Uuid,
        full_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers SET
                full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;

        Ok(customer)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cliente no encontrado".to_string()));
        }
        Ok(())
    }
}
