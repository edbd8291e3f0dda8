//! Tests for the slot allocation transaction: the conditional claim, the
//! paired request transition, and the races between concurrent decisions.

mod common;

use common::{seed_request, seed_slot, seed_user, seed_vehicle};
use parkhub_db::repositories::{RequestRepo, SlotRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn allocation_claims_slot_and_approves_request(pool: PgPool) {
    let user = seed_user(&pool, "driver@example.com").await;
    let vehicle = seed_vehicle(&pool, user.id, "RAD 123 A", "car", "medium").await;
    let slot = seed_slot(&pool, "B-07", "car", "medium").await;
    let request = seed_request(&pool, user.id, vehicle.id).await;

    let approved = RequestRepo::allocate(&pool, request.id, slot.id, &slot.slot_number)
        .await
        .unwrap()
        .expect("allocation should succeed");

    assert_eq!(approved.request_status, "approved");
    assert_eq!(approved.slot_id, Some(slot.id));
    assert_eq!(approved.slot_number.as_deref(), Some("B-07"));
    assert!(approved.approved_at.is_some());

    let slot_after = SlotRepo::find_by_id(&pool, slot.id).await.unwrap().unwrap();
    assert_eq!(slot_after.status, "unavailable");
}

#[sqlx::test(migrations = "./migrations")]
async fn candidates_exclude_claimed_and_mismatched_slots(pool: PgPool) {
    let user = seed_user(&pool, "driver@example.com").await;
    let vehicle = seed_vehicle(&pool, user.id, "RAD 123 A", "car", "medium").await;
    let matching = seed_slot(&pool, "B-01", "car", "medium").await;
    seed_slot(&pool, "B-02", "truck", "large").await;
    seed_slot(&pool, "B-03", "car", "small").await;
    let request = seed_request(&pool, user.id, vehicle.id).await;

    let candidates = SlotRepo::find_candidates(&pool, "car", "medium").await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, matching.id);

    // Once claimed, the slot disappears from the candidate set.
    RequestRepo::allocate(&pool, request.id, matching.id, &matching.slot_number)
        .await
        .unwrap()
        .expect("allocation should succeed");
    let candidates = SlotRepo::find_candidates(&pool, "car", "medium").await.unwrap();
    assert!(candidates.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn candidates_are_ordered_by_lowest_id(pool: PgPool) {
    let user = seed_user(&pool, "driver@example.com").await;
    seed_vehicle(&pool, user.id, "RAD 123 A", "car", "medium").await;
    let first = seed_slot(&pool, "A-01", "car", "medium").await;
    let second = seed_slot(&pool, "A-02", "car", "medium").await;

    let candidates = SlotRepo::find_candidates(&pool, "car", "medium").await.unwrap();
    assert_eq!(
        candidates.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn concurrent_allocations_for_one_slot_have_a_single_winner(pool: PgPool) {
    let user = seed_user(&pool, "driver@example.com").await;
    let vehicle_a = seed_vehicle(&pool, user.id, "RAD 111 A", "car", "medium").await;
    let vehicle_b = seed_vehicle(&pool, user.id, "RAD 222 B", "car", "medium").await;
    let slot = seed_slot(&pool, "B-07", "car", "medium").await;
    let request_a = seed_request(&pool, user.id, vehicle_a.id).await;
    let request_b = seed_request(&pool, user.id, vehicle_b.id).await;

    let (result_a, result_b) = tokio::join!(
        RequestRepo::allocate(&pool, request_a.id, slot.id, &slot.slot_number),
        RequestRepo::allocate(&pool, request_b.id, slot.id, &slot.slot_number),
    );

    let won_a = result_a.unwrap().is_some();
    let won_b = result_b.unwrap().is_some();
    assert!(
        won_a ^ won_b,
        "exactly one allocation must win the slot (a: {won_a}, b: {won_b})"
    );

    let slot_after = SlotRepo::find_by_id(&pool, slot.id).await.unwrap().unwrap();
    assert_eq!(slot_after.status, "unavailable");

    // The loser's request is untouched and still claimable elsewhere.
    let loser_id = if won_a { request_b.id } else { request_a.id };
    let loser = RequestRepo::find_by_id(&pool, loser_id).await.unwrap().unwrap();
    assert_eq!(loser.request_status, "pending");
    assert!(loser.slot_id.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn lost_slot_claim_rolls_back_without_touching_the_request(pool: PgPool) {
    let user = seed_user(&pool, "driver@example.com").await;
    let vehicle_a = seed_vehicle(&pool, user.id, "RAD 111 A", "car", "medium").await;
    let vehicle_b = seed_vehicle(&pool, user.id, "RAD 222 B", "car", "medium").await;
    let slot = seed_slot(&pool, "B-07", "car", "medium").await;
    let request_a = seed_request(&pool, user.id, vehicle_a.id).await;
    let request_b = seed_request(&pool, user.id, vehicle_b.id).await;

    RequestRepo::allocate(&pool, request_a.id, slot.id, &slot.slot_number)
        .await
        .unwrap()
        .expect("first allocation should succeed");

    // The slot is already claimed; the second attempt must miss and leave
    // request B pending.
    let second = RequestRepo::allocate(&pool, request_b.id, slot.id, &slot.slot_number)
        .await
        .unwrap();
    assert!(second.is_none());

    let request_b_after = RequestRepo::find_by_id(&pool, request_b.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(request_b_after.request_status, "pending");
    assert!(request_b_after.slot_id.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn allocation_on_a_settled_request_releases_the_claimed_slot(pool: PgPool) {
    let user = seed_user(&pool, "driver@example.com").await;
    let vehicle = seed_vehicle(&pool, user.id, "RAD 123 A", "car", "medium").await;
    let slot = seed_slot(&pool, "B-07", "car", "medium").await;
    let request = seed_request(&pool, user.id, vehicle.id).await;

    // Settle the request first (a concurrent reject won the race).
    RequestRepo::mark_rejected(&pool, request.id)
        .await
        .unwrap()
        .expect("rejection should succeed");

    // The allocation claims the slot, then misses the request transition and
    // must roll the claim back.
    let result = RequestRepo::allocate(&pool, request.id, slot.id, &slot.slot_number)
        .await
        .unwrap();
    assert!(result.is_none());

    let slot_after = SlotRepo::find_by_id(&pool, slot.id).await.unwrap().unwrap();
    assert_eq!(slot_after.status, "available", "rollback must release the slot");
}

#[sqlx::test(migrations = "./migrations")]
async fn approve_is_not_repeatable(pool: PgPool) {
    let user = seed_user(&pool, "driver@example.com").await;
    let vehicle = seed_vehicle(&pool, user.id, "RAD 123 A", "car", "medium").await;
    let slot_one = seed_slot(&pool, "B-07", "car", "medium").await;
    let slot_two = seed_slot(&pool, "B-08", "car", "medium").await;
    let request = seed_request(&pool, user.id, vehicle.id).await;

    RequestRepo::allocate(&pool, request.id, slot_one.id, &slot_one.slot_number)
        .await
        .unwrap()
        .expect("first approval should succeed");

    // A settled request no longer loads for decision, and a direct re-run
    // cannot double-allocate.
    assert!(RequestRepo::find_pending_decision(&pool, request.id)
        .await
        .unwrap()
        .is_none());

    let again = RequestRepo::allocate(&pool, request.id, slot_two.id, &slot_two.slot_number)
        .await
        .unwrap();
    assert!(again.is_none());

    let slot_two_after = SlotRepo::find_by_id(&pool, slot_two.id).await.unwrap().unwrap();
    assert_eq!(slot_two_after.status, "available");
}

#[sqlx::test(migrations = "./migrations")]
async fn reject_loses_against_a_prior_approval(pool: PgPool) {
    let user = seed_user(&pool, "driver@example.com").await;
    let vehicle = seed_vehicle(&pool, user.id, "RAD 123 A", "car", "medium").await;
    let slot = seed_slot(&pool, "B-07", "car", "medium").await;
    let request = seed_request(&pool, user.id, vehicle.id).await;

    RequestRepo::allocate(&pool, request.id, slot.id, &slot.slot_number)
        .await
        .unwrap()
        .expect("approval should succeed");

    let rejected = RequestRepo::mark_rejected(&pool, request.id).await.unwrap();
    assert!(rejected.is_none());

    let after = RequestRepo::find_by_id(&pool, request.id).await.unwrap().unwrap();
    assert_eq!(after.request_status, "approved");
}

#[sqlx::test(migrations = "./migrations")]
async fn read_back_reports_persisted_slot_and_amount(pool: PgPool) {
    let user = seed_user(&pool, "driver@example.com").await;
    let vehicle = seed_vehicle(&pool, user.id, "RAD 123 A", "car", "medium").await;
    let slot = seed_slot(&pool, "B-07", "car", "medium").await;
    let request = seed_request(&pool, user.id, vehicle.id).await;

    RequestRepo::allocate(&pool, request.id, slot.id, &slot.slot_number)
        .await
        .unwrap()
        .expect("approval should succeed");

    let (slot_number, amount) = RequestRepo::read_back(&pool, request.id)
        .await
        .unwrap()
        .expect("approved request should read back");
    assert_eq!(slot_number.as_deref(), Some("B-07"));
    assert_eq!(amount, request.amount);
}
