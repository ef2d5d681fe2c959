//! End-to-end off-ramp flow over scripted clients.

use alloy::primitives::{address, U256};
use parking_lot::Mutex;
use ramp_api::{
    AccountVerifier, ApiError, ApiResult, BeneficiaryResolver, BoxFuture, CreateOrderRequest,
    CreatedOrder, OrderApi, OrderStatusSnapshot, RateQuoter, RateSource,
};
use ramp_app::{AppError, OfframpFlow, OfframpRequest};
use ramp_chain::{FundTransfer, MockWallet, Wallet};
use ramp_core::{Amount, Network, OrderStatus, PayoutOrder, TokenSymbol};
use ramp_monitor::{ActiveOrderSlot, MockNotifier, MonitorConfig, SettlementOutcome};
use ramp_registry::TokenRegistry;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const RECEIVE_ADDRESS: &str = "0x00000000000000000000000000000000000000b1";

struct FixedRateSource(Decimal);

impl RateSource for FixedRateSource {
    fn fetch_rate(
        &self,
        _token: &TokenSymbol,
        _amount: Amount,
        _currency: &str,
    ) -> BoxFuture<'_, ApiResult<Decimal>> {
        let rate = self.0;
        Box::pin(async move { Ok(rate) })
    }
}

struct FixedVerifier {
    name: Option<String>,
}

impl AccountVerifier for FixedVerifier {
    fn verify_account(
        &self,
        _institution_code: &str,
        _account_identifier: &str,
    ) -> BoxFuture<'_, ApiResult<String>> {
        let response = self
            .name
            .clone()
            .ok_or_else(|| ApiError::Rejected("account not found".to_string()));
        Box::pin(async move { response })
    }
}

struct ScriptedOrders {
    created: Mutex<Vec<CreateOrderRequest>>,
    statuses: Mutex<VecDeque<OrderStatusSnapshot>>,
    polls: AtomicUsize,
}

impl ScriptedOrders {
    fn new(statuses: Vec<OrderStatus>) -> Arc<Self> {
        Arc::new(Self {
            created: Mutex::new(Vec::new()),
            statuses: Mutex::new(
                statuses
                    .into_iter()
                    .map(|status| OrderStatusSnapshot {
                        status,
                        amount_paid: None,
                        tx_hash: None,
                    })
                    .collect(),
            ),
            polls: AtomicUsize::new(0),
        })
    }
}

impl OrderApi for ScriptedOrders {
    fn create_order(&self, request: CreateOrderRequest) -> BoxFuture<'_, ApiResult<CreatedOrder>> {
        self.created.lock().push(request);
        Box::pin(async move {
            Ok(CreatedOrder {
                id: "ord_42".to_string(),
                receive_address: RECEIVE_ADDRESS.to_string(),
            })
        })
    }

    fn order_status(&self, _order_id: &str) -> BoxFuture<'_, ApiResult<OrderStatusSnapshot>> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let snapshot = self
            .statuses
            .lock()
            .pop_front()
            .expect("polled after terminal response");
        Box::pin(async move { Ok(snapshot) })
    }
}

struct Harness {
    flow: OfframpFlow,
    orders: Arc<ScriptedOrders>,
    wallet: Arc<MockWallet>,
    notifier: Arc<MockNotifier>,
    slot: ActiveOrderSlot,
}

fn harness(statuses: Vec<OrderStatus>, verified_name: Option<&str>, connect: bool) -> Harness {
    let orders = ScriptedOrders::new(statuses);
    let wallet = Arc::new(MockWallet::new(Network::Celo.chain_id()));
    let notifier = Arc::new(MockNotifier::new());
    let slot = ActiveOrderSlot::new();

    let flow = OfframpFlow::new(
        RateQuoter::new(Arc::new(FixedRateSource(dec!(1520.10))), "NGN"),
        BeneficiaryResolver::new(Arc::new(FixedVerifier {
            name: verified_name.map(str::to_string),
        })),
        orders.clone(),
        connect.then(|| wallet.clone() as Arc<dyn Wallet>),
        FundTransfer::new(TokenRegistry::bundled(), Network::Celo),
        notifier.clone(),
        slot.clone(),
        MonitorConfig {
            poll_interval: Duration::ZERO,
            max_attempts: 120,
        },
        "NGN",
    );

    Harness {
        flow,
        orders,
        wallet,
        notifier,
        slot,
    }
}

fn usdc_request() -> OfframpRequest {
    OfframpRequest {
        token: TokenSymbol::new("USDC").unwrap(),
        amount_input: "50".to_string(),
        account_identifier: "0123456789".to_string(),
        institution_code: "GTB".to_string(),
    }
}

#[tokio::test]
async fn test_full_offramp_happy_path() {
    let h = harness(
        vec![OrderStatus::Pending, OrderStatus::Processing, OrderStatus::Settled],
        Some("ADA OBI"),
        true,
    );

    let receipt = h.flow.run(&usdc_request()).await.unwrap();

    // Order created with the aggregator's expected shape.
    let created = h.orders.created.lock();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].amount, 50.0);
    assert_eq!(created[0].token, "USDC");
    assert_eq!(created[0].network, "celo");
    assert_eq!(created[0].recipient.account_identifier, "0123456789");
    drop(created);

    // Transfer of 50 × 10^6 raw units to the Celo USDC contract.
    let transfers = h.wallet.recorded_transfers();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].amount_raw, U256::from(50_000_000u64));
    assert_eq!(
        transfers[0].token,
        address!("cebA9300f2b948710d2653dD7B07f33A8B32118C")
    );
    assert_eq!(
        transfers[0].to,
        RECEIVE_ADDRESS.parse::<alloy::primitives::Address>().unwrap()
    );

    // Monitoring ran to settlement at the returned order id.
    assert_eq!(receipt.order_id, "ord_42");
    assert_eq!(receipt.outcome, SettlementOutcome::Settled);
    assert_eq!(h.orders.polls.load(Ordering::SeqCst), 3);
    assert!(h.slot.current().is_none());

    // One settlement success (the transfer success is separate).
    assert_eq!(h.notifier.count_successes(), 2);
    assert_eq!(h.notifier.count_failures(), 0);
}

#[tokio::test]
async fn test_failed_settlement_reports_failure() {
    let h = harness(
        vec![OrderStatus::Pending, OrderStatus::Failed],
        Some("ADA OBI"),
        true,
    );

    let receipt = h.flow.run(&usdc_request()).await.unwrap();

    assert_eq!(receipt.outcome, SettlementOutcome::Failed);
    assert_eq!(h.notifier.count_failures(), 1);
    assert!(h.slot.current().is_none());
}

#[tokio::test]
async fn test_unresolved_beneficiary_blocks_order_creation() {
    let h = harness(vec![], None, true);

    let err = h.flow.run(&usdc_request()).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(err.to_string().contains("verify account name"));
    assert!(h.orders.created.lock().is_empty());
    assert!(h.wallet.recorded_transfers().is_empty());
}

#[tokio::test]
async fn test_invalid_amount_blocks_everything() {
    let h = harness(vec![], Some("ADA OBI"), true);

    let mut request = usdc_request();
    request.amount_input = "-5".to_string();
    let err = h.flow.run(&request).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(h.orders.created.lock().is_empty());
}

#[tokio::test]
async fn test_active_order_blocks_resubmission() {
    let h = harness(vec![], Some("ADA OBI"), true);
    h.slot
        .claim(PayoutOrder::pending("ord_existing", "0xdeposit"))
        .unwrap();

    let err = h.flow.run(&usdc_request()).await.unwrap_err();

    assert!(err.to_string().contains("ord_existing"));
    assert!(h.orders.created.lock().is_empty());
}

#[tokio::test]
async fn test_no_wallet_aborts_after_order_creation() {
    let h = harness(vec![], Some("ADA OBI"), false);

    let err = h.flow.run(&usdc_request()).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Chain(ramp_chain::ChainError::WalletNotConnected)
    ));
    // The order was created before the wallet check; it is orphaned
    // server-side, and the local slot is released for retry.
    assert_eq!(h.orders.created.lock().len(), 1);
    assert_eq!(h.orders.polls.load(Ordering::SeqCst), 0);
    assert!(h.slot.current().is_none());
}

#[tokio::test]
async fn test_rejected_transfer_clears_slot_without_monitoring() {
    let h = harness(vec![], Some("ADA OBI"), true);
    h.wallet.fail_next_transfer("user rejected the transaction");

    let err = h.flow.run(&usdc_request()).await.unwrap_err();

    assert!(matches!(err, AppError::Chain(_)));
    assert_eq!(h.orders.polls.load(Ordering::SeqCst), 0);
    assert!(h.slot.current().is_none());
    assert_eq!(h.notifier.count_failures(), 1);
}
