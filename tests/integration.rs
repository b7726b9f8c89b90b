//! Comprehensive integration tests for the Party Orchestration Engine.
//!
//! This test suite covers all orchestration scenarios including:
//! - Voucher tier boundaries across party revenues
//! - Proportional voucher discounting on the host's selection
//! - Shipping fee splitting and the free-shipping threshold
//! - Shipping group merging via shipping targets
//! - Loyalty point awarding
//! - Validation and policy error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use party_engine::api::{AppState, create_router};
use party_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/party").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Parse a decimal field that the engine serializes as a string.
fn decimal_field(value: &Value) -> Decimal {
    decimal(value.as_str().expect("expected a decimal string"))
}

async fn post_orchestrate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/orchestrate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn line(product: &str, quantity: &str, rate: &str) -> Value {
    json!({
        "product_id": product,
        "quantity": quantity,
        "rate": rate
    })
}

fn guest(customer_id: &str, shipping_target: Option<&str>) -> Value {
    json!({
        "customer_id": customer_id,
        "shipping_target_id": shipping_target
    })
}

fn create_request(
    host_selection: Vec<Value>,
    guests: Vec<Value>,
    guest_selections: Vec<Vec<Value>>,
) -> Value {
    json!({
        "party": {
            "id": "PARTY-2025-0001",
            "host_id": "HOST-001",
            "sales_partner": "PARTNER-07",
            "status": "products",
            "host_selection": host_selection,
            "guests": guests,
            "guest_selections": guest_selections
        }
    })
}

/// A standard valid request: host + 3 guests, each shipping to themselves.
fn standard_request() -> Value {
    create_request(
        vec![line("FW-100", "2", "40")],
        vec![
            guest("CUST-001", None),
            guest("CUST-002", None),
            guest("CUST-003", None),
        ],
        vec![
            vec![line("FW-200", "2", "60")],
            vec![line("FW-300", "1", "80")],
            vec![line("FW-100", "3", "30")],
        ],
    )
}

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn test_standard_party_produces_four_orders() {
    let (status, body) = post_orchestrate(create_router_for_test(), standard_request()).await;

    assert_eq!(status, StatusCode::OK);
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 4);
    assert_eq!(orders[0]["customer_id"], "HOST-001");
    assert_eq!(body["status"], "completed");
    assert_eq!(body["party_id"], "PARTY-2025-0001");
}

#[tokio::test]
async fn test_totals_revenue_and_voucher() {
    let (status, body) = post_orchestrate(create_router_for_test(), standard_request()).await;

    assert_eq!(status, StatusCode::OK);
    // 80 + 120 + 80 + 90 = 370 -> tier 350 -> voucher 30
    assert_eq!(
        decimal_field(&body["totals"]["total_revenue"]),
        decimal("370")
    );
    assert_eq!(
        decimal_field(&body["totals"]["voucher_amount"]),
        decimal("30")
    );
    assert_eq!(
        decimal_field(&body["totals"]["voucher_applied"]),
        decimal("30")
    );
    assert_eq!(body["voucher"]["outcome"], "fully_applied");
}

#[tokio::test]
async fn test_host_rates_carry_the_discount() {
    let (_, body) = post_orchestrate(create_router_for_test(), standard_request()).await;

    // Host's FW-100: 2 x 40 eligible, voucher 30 -> 15 off per unit.
    let host_items = body["orders"][0]["items"].as_array().unwrap();
    assert_eq!(decimal_field(&host_items[0]["rate"]), decimal("25"));
    assert_eq!(decimal_field(&host_items[0]["amount"]), decimal("50"));
}

#[tokio::test]
async fn test_points_awarded_to_sales_partner() {
    let (_, body) = post_orchestrate(create_router_for_test(), standard_request()).await;

    let points = body["points"].as_array().unwrap();
    // FW-100 x2, FW-200 x2, FW-300 x1, FW-100 x3 all carry points.
    assert_eq!(points.len(), 4);
    assert!(points.iter().all(|p| p["sales_partner"] == "PARTNER-07"));
    assert!(points.iter().all(|p| p["cancelled"] == false));
}

#[tokio::test]
async fn test_audit_trace_present() {
    let (_, body) = post_orchestrate(create_router_for_test(), standard_request()).await;

    let steps = body["audit_trace"]["steps"].as_array().unwrap();
    let rule_ids: Vec<&str> = steps
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();
    assert!(rule_ids.contains(&"total_revenue"));
    assert!(rule_ids.contains(&"voucher_tier_lookup"));
    assert!(rule_ids.contains(&"voucher_usage"));
    assert!(rule_ids.contains(&"shipping_allocation"));
}

// =============================================================================
// Voucher Tiers
// =============================================================================

/// Runs a party whose host only ordered an ineligible product, so the
/// raw tier amount stays visible in the totals.
async fn revenue_and_voucher(guest_rate: &str) -> (Decimal, Decimal) {
    let request = create_request(
        vec![line("FW-300", "1", "10")],
        vec![
            guest("CUST-001", None),
            guest("CUST-002", None),
            guest("CUST-003", None),
        ],
        vec![
            vec![line("FW-200", "1", guest_rate)],
            vec![line("FW-200", "1", "5")],
            vec![line("FW-200", "1", "5")],
        ],
    );

    let (status, body) = post_orchestrate(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::OK);
    (
        decimal_field(&body["totals"]["total_revenue"]),
        decimal_field(&body["totals"]["voucher_amount"]),
    )
}

#[tokio::test]
async fn test_voucher_below_first_tier() {
    // 10 + 329.99 + 5 + 5 = 349.99, just under the 350 tier.
    let (revenue, voucher) = revenue_and_voucher("329.99").await;
    assert_eq!(revenue, decimal("349.99"));
    assert_eq!(voucher, decimal("0"));
}

#[tokio::test]
async fn test_voucher_tier_boundary_inclusive() {
    // 10 + 330 + 5 + 5 = 350 exactly.
    let (revenue, voucher) = revenue_and_voucher("330").await;
    assert_eq!(revenue, decimal("350"));
    assert_eq!(voucher, decimal("30"));
}

#[tokio::test]
async fn test_voucher_top_tier_capped() {
    // 10 + 5000 + 5 + 5 = 5020, far past the 1100 tier.
    let (_, voucher) = revenue_and_voucher("5000").await;
    assert_eq!(voucher, decimal("130"));
}

#[tokio::test]
async fn test_unused_voucher_lapses_with_warning() {
    let request = create_request(
        vec![line("FW-300", "1", "10")],
        vec![
            guest("CUST-001", None),
            guest("CUST-002", None),
            guest("CUST-003", None),
        ],
        vec![
            vec![line("FW-200", "1", "330")],
            vec![line("FW-200", "1", "5")],
            vec![line("FW-200", "1", "5")],
        ],
    );

    let (_, body) = post_orchestrate(create_router_for_test(), request).await;

    assert_eq!(body["voucher"]["outcome"], "no_eligible_items");
    let warnings = body["audit_trace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "VOUCHER_LAPSED"));
    assert_eq!(decimal_field(&body["totals"]["voucher_applied"]), decimal("0"));
}

// =============================================================================
// Shipping Allocation
// =============================================================================

#[tokio::test]
async fn test_shipping_fee_split_across_group_of_three() {
    // Three guest orders ship to CUST-002, totalling 150 < 200. The host
    // ships to herself and stays above the threshold on her own.
    let request = create_request(
        vec![line("FW-100", "1", "300")],
        vec![
            guest("CUST-001", Some("CUST-002")),
            guest("CUST-002", Some("CUST-002")),
            guest("CUST-003", Some("CUST-002")),
        ],
        vec![
            vec![line("FW-200", "1", "50")],
            vec![line("FW-200", "1", "50")],
            vec![line("FW-200", "1", "50")],
        ],
    );

    let (status, body) = post_orchestrate(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::OK);

    let orders = body["orders"].as_array().unwrap();
    // Host: 300 - 30 voucher = 270 >= 200, ships free on her own.
    assert_eq!(decimal_field(&orders[0]["shipping_cost"]), decimal("0"));
    // Guests: one group of 3 totalling 150 < 200 -> round(7/3, 2) = 2.33.
    for order in &orders[1..] {
        assert_eq!(decimal_field(&order["shipping_cost"]), decimal("2.33"));
        let note = order["shipping_note"].as_str().unwrap();
        assert!(note.contains("3 order(s)"));
        assert!(note.contains("150.00"));
    }
    // 0 + 3 * 2.33 = 6.99; the drift from the flat 7.00 is accepted.
    assert_eq!(
        decimal_field(&body["totals"]["shipping_total"]),
        decimal("6.99")
    );
}

#[tokio::test]
async fn test_free_shipping_threshold_is_inclusive() {
    // Two guests ship to CUST-002 for a group total of exactly 200; the
    // third guest ships to herself far below the threshold.
    let request = create_request(
        vec![line("FW-100", "1", "300")],
        vec![
            guest("CUST-001", Some("CUST-002")),
            guest("CUST-002", Some("CUST-002")),
            guest("CUST-003", None),
        ],
        vec![
            vec![line("FW-200", "1", "120")],
            vec![line("FW-200", "1", "80")],
            vec![line("FW-200", "1", "10")],
        ],
    );

    let (status, body) = post_orchestrate(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::OK);

    let orders = body["orders"].as_array().unwrap();
    // The CUST-002 group (120 + 80 = 200) ships free, boundary inclusive.
    assert_eq!(decimal_field(&orders[1]["shipping_cost"]), decimal("0"));
    assert_eq!(decimal_field(&orders[2]["shipping_cost"]), decimal("0"));
    assert!(
        orders[1]["shipping_note"]
            .as_str()
            .unwrap()
            .contains("Free shipping")
    );
    // CUST-003 ships alone below the threshold and pays the full fee.
    assert_eq!(decimal_field(&orders[3]["shipping_cost"]), decimal("7.00"));
}

#[tokio::test]
async fn test_orchestration_is_idempotent_across_identical_requests() {
    let router = create_router_for_test();
    let (_, first) = post_orchestrate(router.clone(), standard_request()).await;
    let (_, second) = post_orchestrate(router, standard_request()).await;

    let costs = |body: &Value| -> Vec<(String, String)> {
        body["orders"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| {
                (
                    o["shipping_cost"].as_str().unwrap().to_string(),
                    o["shipping_note"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    };

    assert_eq!(costs(&first), costs(&second));
    assert_eq!(first["totals"], second["totals"]);
    // Each run still gets its own identity.
    assert_ne!(first["orchestration_id"], second["orchestration_id"]);
}

#[tokio::test]
async fn test_every_participant_appears_exactly_once() {
    let (_, body) = post_orchestrate(create_router_for_test(), standard_request()).await;

    let orders = body["orders"].as_array().unwrap();
    let mut customers: Vec<&str> = orders
        .iter()
        .map(|o| o["customer_id"].as_str().unwrap())
        .collect();
    customers.sort();
    assert_eq!(
        customers,
        vec!["CUST-001", "CUST-002", "CUST-003", "HOST-001"]
    );
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_too_few_guests_is_rejected() {
    let request = create_request(
        vec![line("FW-100", "1", "40")],
        vec![guest("CUST-001", None), guest("CUST-002", None)],
        vec![
            vec![line("FW-200", "1", "60")],
            vec![line("FW-200", "1", "60")],
        ],
    );

    let (status, body) = post_orchestrate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"].as_str().unwrap().contains("3 guests"));
}

#[tokio::test]
async fn test_guest_without_products_is_rejected() {
    let request = create_request(
        vec![line("FW-100", "1", "40")],
        vec![
            guest("CUST-001", None),
            guest("CUST-002", None),
            guest("CUST-003", None),
        ],
        vec![
            vec![line("FW-200", "1", "60")],
            vec![],
            vec![line("FW-200", "1", "60")],
        ],
    );

    let (status, body) = post_orchestrate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["details"]
            .as_str()
            .unwrap()
            .contains("Guest 2 (CUST-002)")
    );
}

#[tokio::test]
async fn test_completed_party_conflicts() {
    let mut request = standard_request();
    request["party"]["status"] = json!("completed");

    let (status, body) = post_orchestrate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PARTY_ALREADY_COMPLETED");
}

#[tokio::test]
async fn test_block_policy_returns_unprocessable() {
    // Eligible value 10 against a 30 voucher.
    let mut request = create_request(
        vec![line("FW-100", "1", "10")],
        vec![
            guest("CUST-001", None),
            guest("CUST-002", None),
            guest("CUST-003", None),
        ],
        vec![
            vec![line("FW-200", "1", "330")],
            vec![line("FW-200", "1", "5")],
            vec![line("FW-200", "1", "5")],
        ],
    );
    request["options"] = json!({"on_underused_voucher": "block"});

    let (status, body) = post_orchestrate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VOUCHER_UNDERUSED");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/orchestrate")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_is_reported() {
    let (status, body) = post_orchestrate(
        create_router_for_test(),
        json!({"party": {"id": "PARTY-2025-0001"}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("missing field"));
}

// =============================================================================
// Options
// =============================================================================

#[tokio::test]
async fn test_skip_address_checks_flows_to_drafts() {
    let mut request = standard_request();
    request["options"] = json!({"skip_address_checks": true});

    let (status, body) = post_orchestrate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    let orders = body["orders"].as_array().unwrap();
    assert!(orders.iter().all(|o| o["skip_address_checks"] == true));
}

#[tokio::test]
async fn test_explicit_transaction_date_is_used() {
    let mut request = standard_request();
    request["options"] = json!({"transaction_date": "2025-06-15"});

    let (_, body) = post_orchestrate(create_router_for_test(), request).await;

    let points = body["points"].as_array().unwrap();
    assert!(points.iter().all(|p| p["transaction_date"] == "2025-06-15"));
}

#[tokio::test]
async fn test_host_duplicated_as_guest_is_normalized() {
    let mut request = standard_request();
    request["party"]["guests"]
        .as_array_mut()
        .unwrap()
        .push(guest("HOST-001", None));
    request["party"]["guest_selections"]
        .as_array_mut()
        .unwrap()
        .push(json!([]));

    let (status, body) = post_orchestrate(create_router_for_test(), request).await;

    // The host row is dropped before validation, so the empty selection
    // attached to it cannot fail the run.
    assert_eq!(status, StatusCode::OK);
    let warnings = body["audit_trace"]["warnings"].as_array().unwrap();
    assert!(
        warnings
            .iter()
            .any(|w| w["code"] == "HOST_REMOVED_FROM_GUESTS")
    );
    assert_eq!(body["orders"].as_array().unwrap().len(), 4);
}
