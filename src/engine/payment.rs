use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::payment::{Payment, PaymentMethod, PaymentStatus};
use crate::models::route::Route;

/// Opens a pending payment for a confirmed route, defaulting to UPI.
pub fn open_payment(route: Route, now: DateTime<Utc>) -> Payment {
    Payment {
        id: Uuid::new_v4(),
        amount: route.price,
        route,
        method: PaymentMethod::default(),
        status: PaymentStatus::Pending,
        ride_id: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn select_method(
    payment: &mut Payment,
    method: PaymentMethod,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    expect_status(payment, PaymentStatus::Pending)?;

    payment.method = method;
    payment.updated_at = now;
    Ok(())
}

pub fn start_processing(payment: &mut Payment, now: DateTime<Utc>) -> Result<(), AppError> {
    expect_status(payment, PaymentStatus::Pending)?;

    payment.status = PaymentStatus::Processing;
    payment.updated_at = now;
    Ok(())
}

/// Settles a processing payment and links the ride it paid for.
pub fn complete(
    payment: &mut Payment,
    ride_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    expect_status(payment, PaymentStatus::Processing)?;

    payment.status = PaymentStatus::Completed;
    payment.ride_id = Some(ride_id);
    payment.updated_at = now;
    Ok(())
}

fn expect_status(payment: &Payment, expected: PaymentStatus) -> Result<(), AppError> {
    if payment.status != expected {
        return Err(AppError::Conflict(format!(
            "payment {} is {:?}, expected {:?}",
            payment.id, payment.status, expected
        )));
    }

    Ok(())
}
