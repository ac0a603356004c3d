//! Integration tests for the contact unlock flow.
//!
//! The unlock is the money path: one credit buys permanent access to a
//! client's contact, atomically. These tests pin down the balance and
//! ledger behavior under duplicates and empty balances.

mod common;

use common::{fixtures, TestHarness};
use conecta_core::common::{ApiError, RequestId};
use conecta_core::domains::credits::{CreditTransaction, ProviderCredits};
use conecta_core::domains::requests::ServiceRequest;
use conecta_core::domains::unlocks::{unlock_contact, ContactUnlock, UNLOCK_COST};
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn unlock_spends_one_credit_and_records_everything(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let client = fixtures::create_test_client(pool, "Ana").await.unwrap();
    let provider = fixtures::create_test_professional(pool, "Carlos")
        .await
        .unwrap();
    let request = fixtures::create_test_request(pool, client).await.unwrap();
    fixtures::grant_credits(pool, provider, 5).await.unwrap();

    let unlock = unlock_contact(provider, request, pool).await.unwrap();
    assert_eq!(unlock.provider_id, provider);
    assert_eq!(unlock.request_id, request);
    assert_eq!(unlock.credits_used, UNLOCK_COST);

    let balance = ProviderCredits::get_or_create(provider, pool).await.unwrap();
    assert_eq!(balance, 4);

    // Ledger holds the purchase and the unlock, newest first
    let ledger = CreditTransaction::list_for_provider(provider, pool)
        .await
        .unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger[0].transaction_type, "unlock");
    assert_eq!(ledger[0].amount, -UNLOCK_COST);
    assert_eq!(ledger[1].transaction_type, "purchase");
    assert_eq!(ledger[1].amount, 5);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn double_unlock_charges_once(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let client = fixtures::create_test_client(pool, "Ana").await.unwrap();
    let provider = fixtures::create_test_professional(pool, "Carlos")
        .await
        .unwrap();
    let request = fixtures::create_test_request(pool, client).await.unwrap();
    fixtures::grant_credits(pool, provider, 3).await.unwrap();

    unlock_contact(provider, request, pool).await.unwrap();
    let err = unlock_contact(provider, request, pool).await.unwrap_err();
    assert!(matches!(err, ApiError::AlreadyUnlocked));

    // The duplicate attempt must not charge: net change stays -1
    let balance = ProviderCredits::get_or_create(provider, pool).await.unwrap();
    assert_eq!(balance, 2);

    // Exactly one unlock record exists for the pair
    let unlock = ContactUnlock::find_for_pair(provider, request, pool)
        .await
        .unwrap();
    assert!(unlock.is_some());
    let ids = ContactUnlock::list_unlocked_request_ids(provider, pool)
        .await
        .unwrap();
    assert_eq!(ids, vec![request]);

    // And exactly one unlock ledger entry
    let unlock_entries = CreditTransaction::list_for_provider(provider, pool)
        .await
        .unwrap()
        .into_iter()
        .filter(|t| t.transaction_type == "unlock")
        .count();
    assert_eq!(unlock_entries, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unlock_with_zero_balance_fails_cleanly(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let client = fixtures::create_test_client(pool, "Ana").await.unwrap();
    let provider = fixtures::create_test_professional(pool, "Carlos")
        .await
        .unwrap();
    let request = fixtures::create_test_request(pool, client).await.unwrap();

    let err = unlock_contact(provider, request, pool).await.unwrap_err();
    assert!(matches!(err, ApiError::InsufficientCredits));

    // Nothing was written
    let unlock = ContactUnlock::find_for_pair(provider, request, pool)
        .await
        .unwrap();
    assert!(unlock.is_none());
    let ledger = CreditTransaction::list_for_provider(provider, pool)
        .await
        .unwrap();
    assert!(ledger.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unlock_with_exactly_one_credit_succeeds_then_blocks(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let client = fixtures::create_test_client(pool, "Ana").await.unwrap();
    let provider = fixtures::create_test_professional(pool, "Carlos")
        .await
        .unwrap();
    let first = fixtures::create_test_request(pool, client).await.unwrap();
    let second = fixtures::create_test_request(pool, client).await.unwrap();
    fixtures::grant_credits(pool, provider, 1).await.unwrap();

    unlock_contact(provider, first, pool).await.unwrap();
    let balance = ProviderCredits::get_or_create(provider, pool).await.unwrap();
    assert_eq!(balance, 0);

    // The last credit is gone; a different request cannot be unlocked
    let err = unlock_contact(provider, second, pool).await.unwrap_err();
    assert!(matches!(err, ApiError::InsufficientCredits));
    let balance = ProviderCredits::get_or_create(provider, pool).await.unwrap();
    assert_eq!(balance, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_unlocks_cannot_overspend(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let client = fixtures::create_test_client(pool, "Ana").await.unwrap();
    let provider = fixtures::create_test_professional(pool, "Carlos")
        .await
        .unwrap();
    let first = fixtures::create_test_request(pool, client).await.unwrap();
    let second = fixtures::create_test_request(pool, client).await.unwrap();
    fixtures::grant_credits(pool, provider, 1).await.unwrap();

    // Race two unlocks against the single credit. The conditional decrement
    // serializes on the balance row: exactly one wins.
    let (r1, r2) = tokio::join!(
        unlock_contact(provider, first, pool),
        unlock_contact(provider, second, pool),
    );

    let (won, lost) = match (r1, r2) {
        (Ok(u), Err(e)) => (u, e),
        (Err(e), Ok(u)) => (u, e),
        (Ok(_), Ok(_)) => panic!("both unlocks spent the single credit"),
        (Err(e1), Err(e2)) => panic!("both unlocks failed: {e1}, {e2}"),
    };
    assert!(matches!(lost, ApiError::InsufficientCredits));

    let balance = ProviderCredits::get_or_create(provider, pool).await.unwrap();
    assert_eq!(balance, 0);

    // One unlock row, one spend ledger entry
    let ids = ContactUnlock::list_unlocked_request_ids(provider, pool)
        .await
        .unwrap();
    assert_eq!(ids, vec![won.request_id]);
    let spends = CreditTransaction::list_for_provider(provider, pool)
        .await
        .unwrap()
        .into_iter()
        .filter(|t| t.transaction_type == "unlock")
        .count();
    assert_eq!(spends, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unlock_unknown_request_is_not_found(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let provider = fixtures::create_test_professional(pool, "Carlos")
        .await
        .unwrap();
    fixtures::grant_credits(pool, provider, 1).await.unwrap();

    let err = unlock_contact(provider, RequestId::new(), pool)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    // The failed unlock must not charge
    let balance = ProviderCredits::get_or_create(provider, pool).await.unwrap();
    assert_eq!(balance, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unlock_does_not_touch_request_status(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let client = fixtures::create_test_client(pool, "Ana").await.unwrap();
    let provider = fixtures::create_test_professional(pool, "Carlos")
        .await
        .unwrap();
    let request = fixtures::create_test_request(pool, client).await.unwrap();
    fixtures::grant_credits(pool, provider, 1).await.unwrap();

    unlock_contact(provider, request, pool).await.unwrap();

    let after = ServiceRequest::find_by_id(request, pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.status, "open");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unlocked_contacts_join_request_and_client(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let client = fixtures::create_test_client(pool, "Ana").await.unwrap();
    let provider = fixtures::create_test_professional(pool, "Carlos")
        .await
        .unwrap();
    let request = fixtures::create_test_request(pool, client).await.unwrap();
    fixtures::grant_credits(pool, provider, 2).await.unwrap();

    unlock_contact(provider, request, pool).await.unwrap();

    let contacts = ContactUnlock::list_unlocked_contacts(provider, pool)
        .await
        .unwrap();
    assert_eq!(contacts.len(), 1);
    let contact = &contacts[0];
    assert_eq!(contact.request_id, request);
    assert_eq!(contact.client_name, "Ana");
    assert!(contact.client_phone.is_some());
}
