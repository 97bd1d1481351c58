use chrono::Utc;

use crate::cache::{keys, FetchError, ReadThroughCache};
use crate::dto::common_dto::CachedResponse;
use crate::models::DashboardReport;
use crate::repositories::{
    BookingRepository, CustomerRepository, PaymentRepository, ServiceTable, UserRepository,
    VehicleRepository,
};
use crate::services::dashboard_service::{build_report, DashboardInputs};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct DashboardController {
    cache: ReadThroughCache,
    pool: sqlx::PgPool,
}

impl DashboardController {
    pub fn new(state: &AppState) -> Self {
        Self { cache: state.cache.clone(), pool: state.pool.clone() }
    }

    /// Reporte completo del dashboard, servido por el cache.
    ///
    /// El fetcher junta todas las filas crudas y delega la agregación a las
    /// funciones puras de dashboard_service con la fecha de hoy.
    pub async fn report(&self) -> Result<CachedResponse<DashboardReport>, AppError> {
        let pool = self.pool.clone();
        let snapshot = self
            .cache
            .get(keys::dashboard(), move || {
                let pool = pool.clone();
                async move { fetch_report(pool).await }
            })
            .await;
        Ok(CachedResponse::from_snapshot(snapshot))
    }
}

async fn fetch_report(pool: sqlx::PgPool) -> Result<DashboardReport, FetchError> {
    let bookings_repo = BookingRepository::new(pool.clone());

    let inputs = DashboardInputs {
        vehicles: VehicleRepository::new(pool.clone()).find_all().await?,
        bookings: bookings_repo.find_all().await?,
        payments: PaymentRepository::new(pool.clone()).find_all().await?,
        customers: CustomerRepository::new(pool.clone()).find_all().await?,
        users: UserRepository::new(pool).find_all().await?,
        handling_count: bookings_repo.count_service_table(ServiceTable::Handling).await?,
        baggage_count: bookings_repo.count_service_table(ServiceTable::Baggage).await?,
        transfer_count: bookings_repo
            .count_service_table(ServiceTable::AirportTransfer)
            .await?,
    };

    Ok(build_report(&inputs, Utc::now().date_naive()))
}
