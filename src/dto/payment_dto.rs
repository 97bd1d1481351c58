use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

// Request para registrar un pago
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub booking_id: Option<Uuid>,
    pub amount: Decimal,
    pub status: Option<String>,
    pub payment_method: Option<String>,
}

// Request para cambiar el estado de un pago
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub status: String,
}
