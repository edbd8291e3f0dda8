//! Shared fixtures for repository tests.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use parkhub_core::tariff::compute_amount;
use parkhub_core::types::DbId;
use parkhub_db::models::request::{NewRequest, SlotRequest};
use parkhub_db::models::slot::{NewSlot, ParkingSlot};
use parkhub_db::models::user::{NewUser, User};
use parkhub_db::models::vehicle::{NewVehicle, Vehicle};
use parkhub_db::repositories::{RequestRepo, SlotRepo, UserRepo, VehicleRepo};

/// Insert a user with a throwaway credential set.
pub async fn seed_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$test$hash".to_string(),
            role: "user".to_string(),
            otp_code: "000000".to_string(),
            otp_expires_at: Utc::now() + Duration::minutes(5),
        },
    )
    .await
    .expect("user insert should succeed")
}

/// Insert a vehicle owned by `user_id`.
pub async fn seed_vehicle(
    pool: &PgPool,
    user_id: DbId,
    plate: &str,
    vehicle_type: &str,
    size: &str,
) -> Vehicle {
    VehicleRepo::create(
        pool,
        &NewVehicle {
            user_id,
            plate_number: plate.to_string(),
            vehicle_type: vehicle_type.to_string(),
            size: size.to_string(),
        },
    )
    .await
    .expect("vehicle insert should succeed")
}

/// Insert a single available slot.
pub async fn seed_slot(
    pool: &PgPool,
    slot_number: &str,
    vehicle_type: &str,
    size: &str,
) -> ParkingSlot {
    let created = SlotRepo::bulk_create(
        pool,
        &[NewSlot {
            slot_number: slot_number.to_string(),
            size: size.to_string(),
            vehicle_type: vehicle_type.to_string(),
            location: "Level 1 North".to_string(),
        }],
    )
    .await
    .expect("slot insert should succeed");
    created.into_iter().next().unwrap()
}

/// Insert a pending request for a two-hour window starting now.
pub async fn seed_request(pool: &PgPool, user_id: DbId, vehicle_id: DbId) -> SlotRequest {
    let entry = Utc::now();
    let exit = entry + Duration::hours(2);
    let amount = compute_amount(entry, exit).unwrap();
    RequestRepo::create(
        pool,
        &NewRequest {
            user_id,
            vehicle_id,
            entry_time: entry,
            exit_time: exit,
            amount,
        },
    )
    .await
    .expect("request insert should succeed")
}
