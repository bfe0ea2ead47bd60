use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

use bookstore_core::StockRecordId;
use bookstore_inventory::StockRecord;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(seed: Vec<StockRecord>) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let services = bookstore_api::app::services::build_in_memory_services(seed)
            .await
            .expect("failed to seed stock");
        let app = bookstore_api::app::build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn stock(name: &str, quantity: i64) -> StockRecord {
    StockRecord::new(StockRecordId::new(), name, quantity)
}

async fn get_stock_eventually(
    client: &reqwest::Client,
    base_url: &str,
    id: StockRecordId,
    expected_quantity: i64,
) -> serde_json::Value {
    // The decrement is fire-and-forget relative to the order response.
    // Poll briefly until the reconciler catches up.
    for _ in 0..100 {
        let res = client
            .get(format!("{}/books_stock/{}", base_url, id))
            .send()
            .await
            .unwrap();

        if res.status() == StatusCode::OK {
            let body: serde_json::Value = res.json().await.unwrap();
            if body["quantity"].as_i64() == Some(expected_quantity) {
                return body;
            }
        }

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    panic!("stock did not reach the expected quantity within timeout");
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn(vec![]).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn accepting_an_order_returns_a_fresh_order_id() {
    let srv = TestServer::spawn(vec![stock("Dune", 5)]).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/orders/", srv.base_url))
        .json(&json!({ "books": [{ "title": "Dune" }], "quantity": 2 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    // The body is the bare order id.
    assert!(Uuid::parse_str(&body).is_ok(), "body was not a uuid: {body}");
}

#[tokio::test]
async fn over_ordering_is_rejected_with_a_named_title() {
    let srv = TestServer::spawn(vec![stock("Dune", 5)]).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/orders/", srv.base_url))
        .json(&json!({ "books": [{ "title": "Dune" }], "quantity": 7 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Not stock available for the book: Dune")
    );
    assert_eq!(body["status"], 400);
    assert_eq!(body["details"], "");
}

#[tokio::test]
async fn unknown_title_is_rejected_and_nothing_is_persisted() {
    let srv = TestServer::spawn(vec![stock("Dune", 5)]).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/orders/", srv.base_url))
        .json(&json!({ "books": [{ "title": "Foo" }], "quantity": 1 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Invalid book name");

    let res = client
        .get(format!("{}/orders/", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let orders: serde_json::Value = res.json().await.unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn exact_quantity_is_accepted_and_stock_drains_to_zero() {
    let dune = stock("Dune", 5);
    let dune_id = dune.id_typed();
    let srv = TestServer::spawn(vec![dune]).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/orders/", srv.base_url))
        .json(&json!({ "books": [{ "title": "Dune" }], "quantity": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = get_stock_eventually(&client, &srv.base_url, dune_id, 0).await;
    assert_eq!(body["name"], "Dune");
}

#[tokio::test]
async fn listed_orders_match_what_was_accepted() {
    let srv = TestServer::spawn(vec![stock("Dune", 10), stock("Hyperion", 10)]).await;

    let client = reqwest::Client::new();
    let mut accepted_ids = Vec::new();
    for (title, quantity) in [("Dune", 2), ("Hyperion", 3)] {
        let res = client
            .post(format!("{}/orders/", srv.base_url))
            .json(&json!({ "books": [{ "title": title }], "quantity": quantity }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        accepted_ids.push(res.text().await.unwrap());
    }

    let res = client
        .get(format!("{}/orders/", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let orders: serde_json::Value = res.json().await.unwrap();
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 2);

    assert_eq!(orders[0]["id"], accepted_ids[0].as_str());
    assert_eq!(orders[0]["books"][0]["title"], "Dune");
    assert_eq!(orders[0]["quantity"], 2);
    assert_eq!(orders[1]["id"], accepted_ids[1].as_str());
    assert_eq!(orders[1]["books"][0]["title"], "Hyperion");
    assert_eq!(orders[1]["quantity"], 3);
}

#[tokio::test]
async fn stock_lookup_finds_seeded_records_by_id() {
    let dune = stock("Dune", 5);
    let dune_id = dune.id_typed();
    let srv = TestServer::spawn(vec![dune]).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/books_stock/{}", srv.base_url, dune_id))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["id"], dune_id.to_string());
    assert_eq!(body["name"], "Dune");
    assert_eq!(body["quantity"], 5);
}

#[tokio::test]
async fn unknown_and_malformed_stock_ids_are_not_found() {
    let srv = TestServer::spawn(vec![stock("Dune", 5)]).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/books_stock/{}", srv.base_url, Uuid::now_v7()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/books_stock/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
