//! Shapes del dashboard
//!
//! Tipos de salida de la agregación: cards KPI y series listas para
//! graficar. Todos serializan a JSON y pueden persistirse en el cache.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cards KPI del tope del dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_vehicles: u64,
    /// Regla documentada: activo Y (sin estado o "available")
    pub available_vehicles: u64,
    pub total_bookings: u64,
    pub active_bookings: u64,
    pub total_customers: u64,
    pub total_staff: u64,
    /// Pagos pagados dentro de [primer día, último día] del mes actual
    pub revenue_this_month: Decimal,
    pub unpaid_this_month: Decimal,
    // Tablas de servicios extra: solo se consume el conteo
    pub handling_bookings: u64,
    pub baggage_bookings: u64,
    pub transfer_bookings: u64,
}

/// Bucket del histograma de estado de vehículos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBucket {
    pub label: String,
    pub count: u64,
}

/// Totales pagado/no pagado por mes calendario (Jan..Dec, sin año)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPaymentEntry {
    pub month: String,
    pub paid: Decimal,
    pub unpaid: Decimal,
}

/// Punto de la serie de reservas de los últimos 30 días
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendEntry {
    /// Clave YYYY-MM-DD
    pub date: String,
    pub count: u64,
}

/// Bucket del histograma de métodos de pago
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodBucket {
    pub label: String,
    pub count: u64,
}

/// Fila denormalizada de reserva para la tabla del dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingTableRow {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub staff_name: Option<String>,
    pub vehicle_label: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub paid_total: Decimal,
    pub unpaid_total: Decimal,
    pub payment_status: String,
}

/// Reporte completo del dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub summary: DashboardSummary,
    pub vehicle_status: Vec<StatusBucket>,
    pub monthly_payments: Vec<MonthlyPaymentEntry>,
    pub booking_trend: Vec<TrendEntry>,
    pub payment_methods: Vec<MethodBucket>,
    pub bookings: Vec<BookingTableRow>,
}
