mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use storefront_checkout::{QuoteConfig, QuoteCoordinator, QuoteStatus};
use storefront_commerce::prelude::*;
use tokio::time::{sleep, sleep_until, Instant};

fn spawn(backend: &Arc<FakeBackend>) -> QuoteCoordinator {
    QuoteCoordinator::spawn(Arc::clone(backend), QuoteConfig::default())
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_collapse_into_one_request_after_the_quiet_period() {
    let backend = Arc::new(FakeBackend::default());
    let coordinator = spawn(&backend);
    let start = Instant::now();

    for n in 1..=5 {
        coordinator.update(quote_inputs(&format!("{n} Main St")));
        sleep(Duration::from_millis(100)).await;
    }

    let view = coordinator.settled().await;

    assert_eq!(backend.quote_calls(), 1);
    // Last edit at +400ms, quiet period 500ms.
    assert_eq!(backend.quote_times()[0] - start, Duration::from_millis(900));
    assert_eq!(view.status, QuoteStatus::Ready);
    assert_eq!(view.revision, 5);

    let log = backend.quote_log.lock().unwrap();
    assert!(log[0].1.address.contains("5 Main St"));
    assert_eq!(log[0].1.items.len(), 2);
    assert!(log[0]
        .1
        .items
        .iter()
        .all(|line| line.shipment_option.as_str() == "standard"));
}

#[tokio::test(start_paused = true)]
async fn edit_inside_the_window_restarts_the_timer() {
    let backend = Arc::new(FakeBackend::default());
    let coordinator = spawn(&backend);
    let start = Instant::now();

    coordinator.update(quote_inputs("1 Main St"));
    sleep_until(start + Duration::from_millis(450)).await;
    assert_eq!(backend.quote_calls(), 0);

    coordinator.update(quote_inputs("2 Main St"));
    sleep_until(start + Duration::from_millis(900)).await;
    assert_eq!(backend.quote_calls(), 0);
    assert_eq!(coordinator.current().status, QuoteStatus::Debouncing);

    coordinator.settled().await;
    assert_eq!(backend.quote_calls(), 1);
    assert_eq!(backend.quote_times()[0] - start, Duration::from_millis(950));
}

#[tokio::test(start_paused = true)]
async fn identical_inputs_are_not_a_change() {
    let backend = Arc::new(FakeBackend::default());
    let coordinator = spawn(&backend);

    let first = coordinator.update(quote_inputs("1 Main St"));
    coordinator.settled().await;
    let second = coordinator.update(quote_inputs("1 Main St"));
    sleep(Duration::from_secs(2)).await;

    assert_eq!(first, second);
    assert_eq!(backend.quote_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn superseded_response_is_never_applied() {
    let backend = Arc::new(FakeBackend::default());
    let stale = quote(9900, 9900);
    let fresh = quote(4400, 600);
    backend.script_quote(Reply::ok(stale).after(Duration::from_millis(1000)));
    backend.script_quote(Reply::ok(fresh));

    let coordinator = spawn(&backend);
    let start = Instant::now();

    coordinator.update(quote_inputs("1 Main St"));
    // First request goes out at +500ms and would resolve at +1500ms.
    sleep_until(start + Duration::from_millis(600)).await;
    assert_eq!(backend.quote_calls(), 1);
    assert_eq!(coordinator.current().status, QuoteStatus::Requesting);

    coordinator.update(quote_inputs("2 Main St"));
    let view = coordinator.settled().await;
    assert_eq!(view.quote, Some(fresh));
    assert_eq!(backend.quote_calls(), 2);

    // Past the moment the first response would have landed.
    sleep_until(start + Duration::from_millis(2000)).await;
    let view = coordinator.current();
    assert_eq!(view.quote, Some(fresh));
    assert_eq!(view.status, QuoteStatus::Ready);
}

#[tokio::test(start_paused = true)]
async fn failure_keeps_the_previous_quote() {
    let backend = Arc::new(FakeBackend::default());
    let good = quote(4400, 600);
    backend.script_quote(Reply::ok(good));
    backend.script_quote(Reply::err(server_error()));

    let coordinator = spawn(&backend);

    coordinator.update(quote_inputs("1 Main St"));
    let first = coordinator.settled().await;
    assert_eq!(first.quote, Some(good));

    coordinator.update(quote_inputs("2 Main St"));
    let second = coordinator.settled().await;

    assert_eq!(second.status, QuoteStatus::Failed);
    assert_eq!(second.quote, Some(good));
    assert_eq!(second.current_quote(), None);
    assert!(second.error.is_some());
    assert_eq!(backend.quote_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn incomplete_inputs_never_reach_the_backend() {
    let backend = Arc::new(FakeBackend::default());
    let coordinator = spawn(&backend);

    coordinator.update_with(|inputs| {
        *inputs = quote_inputs("1 Main St");
        inputs.shipment_option = None;
    });
    assert_eq!(coordinator.settled().await.status, QuoteStatus::Idle);

    coordinator.update(QuoteInputs {
        address: Some(Address::default()),
        ..quote_inputs("1 Main St")
    });
    assert_eq!(coordinator.settled().await.status, QuoteStatus::Idle);

    coordinator.update(QuoteInputs {
        items: Vec::new(),
        ..quote_inputs("1 Main St")
    });
    sleep(Duration::from_secs(5)).await;

    assert_eq!(coordinator.current().status, QuoteStatus::Idle);
    assert_eq!(backend.quote_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn quote_supersedes_the_estimate_for_display() {
    let backend = Arc::new(FakeBackend::default());
    backend.script_quote(Reply::ok(quote(5000, 700)));
    let coordinator = spawn(&backend);

    let standard = ShipmentOption::new("standard", "Standard", usd(900));
    let mut cart = Cart::from_items(items());
    cart.apply_coupon(&CouponBook::standard(), "SAVE10").unwrap();
    let aggregate = cart
        .totals(SelectionMode::All, Some(&standard))
        .unwrap()
        .into_priced()
        .unwrap();

    let before = coordinator.current().reconcile(&aggregate).unwrap();
    assert_eq!(before.source, TotalsSource::Estimate);
    assert_eq!(before.shipping, usd(900));

    coordinator.update(quote_inputs("1 Main St"));
    let after = coordinator.settled().await.reconcile(&aggregate).unwrap();

    assert_eq!(after.source, TotalsSource::Quote);
    assert_eq!(after.items_total, usd(5000));
    assert_eq!(after.coupon_discount, usd(500));
    assert_eq!(after.shipping, usd(700));
    assert_eq!(after.total, usd(5200));
}

#[tokio::test(start_paused = true)]
async fn failed_requote_after_an_item_change_shows_the_estimate() {
    let backend = Arc::new(FakeBackend::default());
    backend.script_quote(Reply::ok(quote(4400, 600)));
    backend.script_quote(Reply::err(server_error()));
    let coordinator = spawn(&backend);

    let standard = ShipmentOption::new("standard", "Standard", usd(900));
    let mut cart = Cart::from_items(items());

    coordinator.update(quote_inputs("1 Main St"));
    coordinator.settled().await;

    cart.set_quantity(&SkuId::new("nuts"), 200).unwrap();
    let aggregate = cart
        .totals(SelectionMode::All, Some(&standard))
        .unwrap()
        .into_priced()
        .unwrap();
    coordinator.update_with(|inputs| inputs.items = cart.items.clone());

    // Debouncing: the old quote no longer describes this cart.
    let pending = coordinator.current().reconcile(&aggregate).unwrap();
    assert_eq!(pending.source, TotalsSource::Estimate);

    let view = coordinator.settled().await;
    assert_eq!(view.status, QuoteStatus::Failed);
    assert_eq!(view.quote, Some(quote(4400, 600)));

    let shown = view.reconcile(&aggregate).unwrap();
    // 6 bolts at the bulk price, 200 nuts at 2.50.
    assert_eq!(shown.source, TotalsSource::Estimate);
    assert_eq!(shown.items_total, usd(54800));
    assert_eq!(shown.shipping, usd(900));
    assert_eq!(shown.total, usd(55700));
}
