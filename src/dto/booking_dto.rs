use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

// Request para crear una reserva
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub vehicle_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub staff_id: Option<Uuid>,
}

// Request para cambiar el estado de una reserva
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

// Query de listado con filtros en SQL
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<String>,
    pub vehicle_id: Option<Uuid>,
}
