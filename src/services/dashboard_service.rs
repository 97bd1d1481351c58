//! Agregación del dashboard
//!
//! Transforma filas crudas en cards KPI y series de gráficos. Todo es puro
//! sobre sus inputs (la fecha de hoy entra como parámetro) para que sea
//! determinista y testeable sin I/O.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{
    Booking, BookingTableRow, Customer, DashboardReport, DashboardSummary, DerivedPaymentStatus,
    MethodBucket, MonthlyPaymentEntry, Payment, StatusBucket, TrendEntry, User, Vehicle,
};
use crate::services::identity_service::resolve_display_identity;

/// Filas crudas que consume la agregación
#[derive(Debug, Default)]
pub struct DashboardInputs {
    pub vehicles: Vec<Vehicle>,
    pub bookings: Vec<Booking>,
    pub payments: Vec<Payment>,
    pub customers: Vec<Customer>,
    pub users: Vec<User>,
    // Tablas de servicios extra: solo cuenta de filas
    pub handling_count: u64,
    pub baggage_count: u64,
    pub transfer_count: u64,
}

const MONTH_LABELS: [&str; 12] =
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

const METHOD_LABELS: [&str; 5] =
    ["Cash", "Bank Transfer", "Credit Card", "Debit Card", "Other"];

/// Histograma de estado de vehículos sobre los 4 buckets fijos.
///
/// Ojo: "Booked" se define como `status != "available"` sobre el vehículo,
/// así que se solapa con "On Ride" y "Maintenance". Es la regla documentada
/// del sistema original y los conteos publicados dependen de ella.
pub fn vehicle_status_histogram(vehicles: &[Vehicle]) -> Vec<StatusBucket> {
    let booked = vehicles.iter().filter(|v| v.counts_as_booked()).count() as u64;
    let on_ride = vehicles.iter().filter(|v| v.counts_as_on_ride()).count() as u64;
    let available = vehicles.iter().filter(|v| v.counts_as_available()).count() as u64;
    let maintenance = vehicles.iter().filter(|v| v.counts_as_maintenance()).count() as u64;

    vec![
        StatusBucket { label: "Booked".to_string(), count: booked },
        StatusBucket { label: "On Ride".to_string(), count: on_ride },
        StatusBucket { label: "Available".to_string(), count: available },
        StatusBucket { label: "Maintenance".to_string(), count: maintenance },
    ]
}

/// Totales pagado/no pagado por nombre de mes (Jan..Dec).
///
/// No hay desambiguación por año: pagos de años distintos colapsan en el
/// mismo bucket mensual.
pub fn monthly_payment_totals(payments: &[Payment]) -> Vec<MonthlyPaymentEntry> {
    let mut paid = [Decimal::ZERO; 12];
    let mut unpaid = [Decimal::ZERO; 12];

    for payment in payments {
        let month = payment.created_at.month0() as usize;
        if payment.is_paid() {
            paid[month] += payment.amount_or_zero();
        } else {
            unpaid[month] += payment.amount_or_zero();
        }
    }

    MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| MonthlyPaymentEntry {
            month: label.to_string(),
            paid: paid[i],
            unpaid: unpaid[i],
        })
        .collect()
}

/// Serie de conteo de reservas de los 30 días hasta `today`, con ceros
/// explícitos para los días sin reservas (sin huecos).
pub fn booking_trend(bookings: &[Booking], today: NaiveDate) -> Vec<TrendEntry> {
    let mut by_day: HashMap<NaiveDate, u64> = HashMap::new();
    for booking in bookings {
        *by_day.entry(booking.created_at.date_naive()).or_insert(0) += 1;
    }

    (0..30)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            TrendEntry {
                date: day.format("%Y-%m-%d").to_string(),
                count: by_day.get(&day).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Histograma de métodos de pago sobre el set fijo de etiquetas; cualquier
/// método no reconocido cae en "Other".
pub fn payment_method_histogram(payments: &[Payment]) -> Vec<MethodBucket> {
    let mut counts = [0u64; 5];

    for payment in payments {
        let index = match payment
            .payment_method
            .as_deref()
            .map(|m| m.trim().to_lowercase())
            .as_deref()
        {
            Some("cash") => 0,
            Some("bank transfer") | Some("bank_transfer") => 1,
            Some("credit card") | Some("credit_card") => 2,
            Some("debit card") | Some("debit_card") => 3,
            _ => 4,
        };
        counts[index] += 1;
    }

    METHOD_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| MethodBucket { label: label.to_string(), count: counts[i] })
        .collect()
}

/// Filas denormalizadas de reservas: identidad del cliente resuelta por la
/// cadena de fallback, nombre del staff, totales pagado/no pagado por
/// reserva y estado de pago derivado.
pub fn build_booking_rows(
    bookings: &[Booking],
    payments: &[Payment],
    customers: &[Customer],
    users: &[User],
    vehicles: &[Vehicle],
) -> Vec<BookingTableRow> {
    let users_by_id: HashMap<Uuid, &User> = users.iter().map(|u| (u.id, u)).collect();
    let customers_by_user: HashMap<Uuid, &Customer> = customers
        .iter()
        .filter_map(|c| c.user_id.map(|uid| (uid, c)))
        .collect();
    let vehicles_by_id: HashMap<Uuid, &Vehicle> = vehicles.iter().map(|v| (v.id, v)).collect();

    let mut payments_by_booking: HashMap<Uuid, Vec<&Payment>> = HashMap::new();
    for payment in payments {
        if let Some(booking_id) = payment.booking_id {
            payments_by_booking.entry(booking_id).or_default().push(payment);
        }
    }

    bookings
        .iter()
        .map(|booking| {
            let user = booking.user_id.and_then(|id| users_by_id.get(&id)).copied();
            let customer =
                booking.user_id.and_then(|id| customers_by_user.get(&id)).copied();
            let metadata = user.and_then(|u| u.metadata.as_ref());
            let identity = resolve_display_identity(user, customer, None, metadata);

            let staff_name = booking
                .staff_id
                .and_then(|id| users_by_id.get(&id))
                .map(|staff| resolve_display_identity(Some(staff), None, None, None).name);

            let mut paid_total = Decimal::ZERO;
            let mut unpaid_total = Decimal::ZERO;
            if let Some(rows) = payments_by_booking.get(&booking.id) {
                for payment in rows {
                    if payment.is_paid() {
                        paid_total += payment.amount_or_zero();
                    } else {
                        unpaid_total += payment.amount_or_zero();
                    }
                }
            }

            BookingTableRow {
                id: booking.id,
                customer_name: identity.name,
                customer_email: identity.email,
                customer_phone: identity.phone,
                staff_name,
                vehicle_label: booking
                    .vehicle_id
                    .and_then(|id| vehicles_by_id.get(&id))
                    .map(|v| v.display_label()),
                status: booking.status.clone(),
                start_date: booking.start_date,
                end_date: booking.end_date,
                paid_total,
                unpaid_total,
                payment_status: DerivedPaymentStatus::derive(paid_total, unpaid_total)
                    .as_str()
                    .to_string(),
            }
        })
        .collect()
}

/// Ventana [primer día, último día] del mes de `today`
pub fn current_month_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .unwrap_or(today);
    let last = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    }
    .map(|next_first| next_first - Duration::days(1))
    .unwrap_or(today);
    (first, last)
}

/// Cards KPI del dashboard
pub fn build_summary(inputs: &DashboardInputs, today: NaiveDate) -> DashboardSummary {
    let (month_first, month_last) = current_month_window(today);

    let mut revenue_this_month = Decimal::ZERO;
    let mut unpaid_this_month = Decimal::ZERO;
    for payment in &inputs.payments {
        let day = payment.created_at.date_naive();
        if day >= month_first && day <= month_last {
            if payment.is_paid() {
                revenue_this_month += payment.amount_or_zero();
            } else {
                unpaid_this_month += payment.amount_or_zero();
            }
        }
    }

    DashboardSummary {
        total_vehicles: inputs.vehicles.len() as u64,
        available_vehicles: inputs
            .vehicles
            .iter()
            .filter(|v| v.counts_as_available())
            .count() as u64,
        total_bookings: inputs.bookings.len() as u64,
        active_bookings: inputs.bookings.iter().filter(|b| b.is_active()).count() as u64,
        total_customers: inputs.customers.len() as u64,
        total_staff: inputs.users.iter().filter(|u| u.is_staff()).count() as u64,
        revenue_this_month,
        unpaid_this_month,
        handling_bookings: inputs.handling_count,
        baggage_bookings: inputs.baggage_count,
        transfer_bookings: inputs.transfer_count,
    }
}

/// Reporte completo, determinista dado (inputs, today)
pub fn build_report(inputs: &DashboardInputs, today: NaiveDate) -> DashboardReport {
    DashboardReport {
        summary: build_summary(inputs, today),
        vehicle_status: vehicle_status_histogram(&inputs.vehicles),
        monthly_payments: monthly_payment_totals(&inputs.payments),
        booking_trend: booking_trend(&inputs.bookings, today),
        payment_methods: payment_method_histogram(&inputs.payments),
        bookings: build_booking_rows(
            &inputs.bookings,
            &inputs.payments,
            &inputs.customers,
            &inputs.users,
            &inputs.vehicles,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn vehicle(status: Option<&str>, is_active: Option<bool>) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            make: None,
            model: None,
            year: None,
            license_plate: None,
            status: status.map(String::from),
            is_active,
            daily_rate: None,
            vehicle_type_id: None,
            photo_url: None,
            created_at: Utc::now(),
        }
    }

    fn payment_on(
        booking_id: Option<Uuid>,
        amount: i64,
        status: &str,
        method: Option<&str>,
        created: chrono::DateTime<Utc>,
    ) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            booking_id,
            amount: Some(dec(amount)),
            status: Some(status.to_string()),
            payment_method: method.map(String::from),
            created_at: created,
        }
    }

    fn booking_created(created: chrono::DateTime<Utc>) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            vehicle_id: None,
            user_id: None,
            status: Some("confirmed".to_string()),
            start_date: None,
            end_date: None,
            staff_id: None,
            created_at: created,
        }
    }

    #[test]
    fn test_vehicle_histogram_documented_bucket_rule() {
        // Escenario de referencia: available/activo, maintenance/activo,
        // rented/inactivo
        let vehicles = vec![
            vehicle(Some("available"), Some(true)),
            vehicle(Some("maintenance"), Some(true)),
            vehicle(Some("rented"), Some(false)),
        ];

        let buckets = vehicle_status_histogram(&vehicles);
        let by_label: HashMap<&str, u64> =
            buckets.iter().map(|b| (b.label.as_str(), b.count)).collect();

        assert_eq!(by_label["Available"], 1);
        assert_eq!(by_label["Maintenance"], 1);
        assert_eq!(by_label["On Ride"], 1);
        // "Booked" = status != available: cuenta maintenance y rented
        assert_eq!(by_label["Booked"], 2);
    }

    #[test]
    fn test_monthly_totals_collapse_years() {
        let march_2024 = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let march_2025 = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();
        let payments = vec![
            payment_on(None, 100, "Paid", None, march_2024),
            payment_on(None, 40, "Completed", None, march_2025),
            payment_on(None, 30, "Unpaid", None, march_2025),
        ];

        let entries = monthly_payment_totals(&payments);
        assert_eq!(entries.len(), 12);
        let march = entries.iter().find(|e| e.month == "Mar").unwrap();
        assert_eq!(march.paid, dec(140));
        assert_eq!(march.unpaid, dec(30));

        let january = entries.iter().find(|e| e.month == "Jan").unwrap();
        assert_eq!(january.paid, dec(0));
    }

    #[test]
    fn test_booking_trend_zero_fills_missing_days() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let bookings = vec![
            booking_created(Utc.with_ymd_and_hms(2025, 6, 28, 9, 0, 0).unwrap()),
            booking_created(Utc.with_ymd_and_hms(2025, 6, 28, 17, 0, 0).unwrap()),
            booking_created(Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()),
        ];

        let trend = booking_trend(&bookings, today);
        assert_eq!(trend.len(), 30);
        assert_eq!(trend.first().unwrap().date, "2025-06-01");
        assert_eq!(trend.last().unwrap().date, "2025-06-30");

        let day_28 = trend.iter().find(|e| e.date == "2025-06-28").unwrap();
        assert_eq!(day_28.count, 2);
        // Día sin reservas dentro de la ventana: cero explícito, no hueco
        let day_15 = trend.iter().find(|e| e.date == "2025-06-15").unwrap();
        assert_eq!(day_15.count, 0);
    }

    #[test]
    fn test_payment_method_unknown_folds_into_other() {
        let now = Utc::now();
        let payments = vec![
            payment_on(None, 10, "Paid", Some("Cash"), now),
            payment_on(None, 10, "Paid", Some("bank_transfer"), now),
            payment_on(None, 10, "Paid", Some("Credit Card"), now),
            payment_on(None, 10, "Paid", Some("crypto"), now),
            payment_on(None, 10, "Paid", None, now),
        ];

        let buckets = payment_method_histogram(&payments);
        let by_label: HashMap<&str, u64> =
            buckets.iter().map(|b| (b.label.as_str(), b.count)).collect();

        assert_eq!(by_label["Cash"], 1);
        assert_eq!(by_label["Bank Transfer"], 1);
        assert_eq!(by_label["Credit Card"], 1);
        assert_eq!(by_label["Debit Card"], 0);
        assert_eq!(by_label["Other"], 2);
    }

    #[test]
    fn test_booking_rows_partial_payment_derivation() {
        let user_id = Uuid::new_v4();
        let user = User {
            id: user_id,
            email: Some("cliente@example.com".to_string()),
            full_name: Some("Cliente Uno".to_string()),
            phone: None,
            role: Some("customer".to_string()),
            metadata: None,
            password_hash: None,
            created_at: Utc::now(),
        };
        let mut booking = booking_created(Utc::now());
        booking.user_id = Some(user_id);

        let payments = vec![
            payment_on(Some(booking.id), 100, "Paid", None, Utc::now()),
            payment_on(Some(booking.id), 50, "Unpaid", None, Utc::now()),
        ];

        let rows = build_booking_rows(&[booking], &payments, &[], &[user], &[]);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.customer_name, "Cliente Uno");
        assert_eq!(row.paid_total, dec(100));
        assert_eq!(row.unpaid_total, dec(50));
        assert_eq!(row.payment_status, "Partial");
    }

    #[test]
    fn test_summary_current_month_window() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 15).unwrap();
        let inputs = DashboardInputs {
            payments: vec![
                payment_on(None, 200, "Paid", None, Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()),
                payment_on(None, 300, "Paid", None, Utc.with_ymd_and_hms(2025, 2, 28, 23, 0, 0).unwrap()),
                payment_on(None, 75, "Unpaid", None, Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap()),
                // Fuera de la ventana del mes
                payment_on(None, 999, "Paid", None, Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap()),
                payment_on(None, 999, "Paid", None, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()),
            ],
            ..Default::default()
        };

        let summary = build_summary(&inputs, today);
        assert_eq!(summary.revenue_this_month, dec(500));
        assert_eq!(summary.unpaid_this_month, dec(75));
    }

    #[test]
    fn test_current_month_window_december() {
        let (first, last) = current_month_window(NaiveDate::from_ymd_opt(2025, 12, 20).unwrap());
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_report_is_deterministic() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let inputs = DashboardInputs {
            vehicles: vec![vehicle(Some("available"), Some(true))],
            bookings: vec![booking_created(Utc.with_ymd_and_hms(2025, 6, 29, 9, 0, 0).unwrap())],
            ..Default::default()
        };

        let a = build_report(&inputs, today);
        let b = build_report(&inputs, today);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }
}
