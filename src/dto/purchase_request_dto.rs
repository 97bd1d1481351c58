use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// Request para crear una solicitud de compra
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePurchaseRequestRequest {
    #[validate(length(min = 1, message = "item_name es requerido"))]
    pub item_name: String,
    #[validate(range(min = 1, message = "quantity debe ser positivo"))]
    pub quantity: i32,
    pub unit_price: Decimal,
    #[serde(default)]
    pub tax: Decimal,
    #[serde(default)]
    pub shipping_cost: Decimal,
    pub supplier_id: Option<Uuid>,
    pub notes: Option<String>,
}

// Query de listado por estado
#[derive(Debug, Deserialize)]
pub struct PurchaseRequestListQuery {
    pub status: Option<String>,
}

// Request de rechazo
#[derive(Debug, Deserialize)]
pub struct RejectPurchaseRequestRequest {
    pub reason: Option<String>,
}

// Request de cierre, con evidencia opcional en base64
#[derive(Debug, Deserialize)]
pub struct CompletePurchaseRequestRequest {
    pub received_date: NaiveDate,
    pub notes: Option<String>,
    pub photo_base64: Option<String>,
    pub photo_file_name: Option<String>,
    pub photo_content_type: Option<String>,
}
