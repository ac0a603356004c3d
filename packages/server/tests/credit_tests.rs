//! Integration tests for credit balances and the purchase ledger.

mod common;

use common::{fixtures, TestHarness};
use conecta_core::common::ApiError;
use conecta_core::domains::credits::{purchase_credits, CreditTransaction, ProviderCredits};
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn balance_reads_zero_before_any_purchase(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let provider = fixtures::create_test_professional(pool, "Carlos")
        .await
        .unwrap();

    // The balance row is created lazily on first read
    let balance = ProviderCredits::get_or_create(provider, pool).await.unwrap();
    assert_eq!(balance, 0);

    // A second read is stable
    let balance = ProviderCredits::get_or_create(provider, pool).await.unwrap();
    assert_eq!(balance, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn purchase_adds_credits_and_appends_ledger_entry(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let provider = fixtures::create_test_professional(pool, "Carlos")
        .await
        .unwrap();

    let balance = purchase_credits(provider, 10, "pix", pool).await.unwrap();
    assert_eq!(balance, 10);

    let balance = purchase_credits(provider, 5, "credit_card", pool)
        .await
        .unwrap();
    assert_eq!(balance, 15);

    let ledger = CreditTransaction::list_for_provider(provider, pool)
        .await
        .unwrap();
    assert_eq!(ledger.len(), 2);
    // Newest first
    assert_eq!(ledger[0].amount, 5);
    assert_eq!(ledger[0].payment_method.as_deref(), Some("credit_card"));
    assert_eq!(ledger[1].amount, 10);
    assert_eq!(ledger[1].payment_method.as_deref(), Some("pix"));
    assert!(ledger.iter().all(|t| t.transaction_type == "purchase"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn purchase_rejects_non_positive_amounts(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let provider = fixtures::create_test_professional(pool, "Carlos")
        .await
        .unwrap();

    for amount in [0, -1, -100] {
        let err = purchase_credits(provider, amount, "pix", pool)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    let ledger = CreditTransaction::count_for_provider(provider, pool)
        .await
        .unwrap();
    assert_eq!(ledger, 0);
}
