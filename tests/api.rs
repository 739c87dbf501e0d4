//! End-to-end tests against a live server on an ephemeral port.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use inventory_gateway::app_state::AppState;
use inventory_gateway::domain::{Hub, ItemDraft, Store};
use inventory_gateway::service::InventoryService;
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn spawn_app() -> (SocketAddr, Arc<InventoryService>) {
    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    let Ok(store) = Store::with_demo_items() else {
        panic!("demo seed is valid");
    };
    let inventory = Arc::new(InventoryService::new(Arc::new(store), Hub::new(1)));
    let state = AppState {
        inventory: Arc::clone(&inventory),
        sse_keep_alive: Duration::from_secs(15),
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, inventory_gateway::app(state)).await;
    });
    (addr, inventory)
}

async fn json_body(response: reqwest::Response) -> Value {
    let Ok(body) = response.json::<Value>().await else {
        panic!("body is not JSON");
    };
    body
}

async fn send(request: reqwest::RequestBuilder) -> reqwest::Response {
    let Ok(response) = request.send().await else {
        panic!("request failed");
    };
    response
}

#[tokio::test]
async fn ping_returns_pong() {
    let (addr, _) = spawn_app().await;
    let response = send(reqwest::Client::new().get(format!("http://{addr}/ping"))).await;
    assert_eq!(response.status(), 200);
    let Ok(text) = response.text().await else {
        panic!("no body");
    };
    assert_eq!(text, "pong");
}

#[tokio::test]
async fn crud_scenario() {
    let (addr, _) = spawn_app().await;
    let client = reqwest::Client::new();
    let base = format!("http://{addr}");

    let created = send(
        client
            .post(format!("{base}/items"))
            .json(&json!({"id": 77, "name": "Lapiz", "price": 5})),
    )
    .await;
    assert_eq!(created.status(), 201);
    assert_eq!(
        json_body(created).await,
        json!({"id": 3, "name": "Lapiz", "price": 5})
    );

    let list = json_body(send(client.get(format!("{base}/items"))).await).await;
    assert_eq!(
        list,
        json!([
            {"id": 1, "name": "Lapicera", "price": 10},
            {"id": 2, "name": "Cuaderno", "price": 50},
            {"id": 3, "name": "Lapiz", "price": 5},
        ])
    );

    let deleted = send(client.delete(format!("{base}/items/1"))).await;
    assert_eq!(deleted.status(), 204);

    let missing = send(client.get(format!("{base}/items/1"))).await;
    assert_eq!(missing.status(), 404);
    assert_eq!(json_body(missing).await["error"]["code"], 2001);

    let goma = send(
        client
            .post(format!("{base}/items"))
            .json(&json!({"name": "Goma", "price": 2})),
    )
    .await;
    assert_eq!(json_body(goma).await["id"], 4);
}

#[tokio::test]
async fn update_uses_path_id() {
    let (addr, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let updated = send(
        client
            .put(format!("http://{addr}/items/2"))
            .json(&json!({"id": 9, "name": "Cuaderno A4", "price": 60})),
    )
    .await;
    assert_eq!(updated.status(), 200);
    assert_eq!(
        json_body(updated).await,
        json!({"id": 2, "name": "Cuaderno A4", "price": 60})
    );

    let untouched = json_body(send(client.get(format!("http://{addr}/items/1"))).await).await;
    assert_eq!(untouched, json!({"id": 1, "name": "Lapicera", "price": 10}));
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let (addr, _) = spawn_app().await;
    let client = reqwest::Client::new();
    let url = format!("http://{addr}/items/404");

    assert_eq!(send(client.get(&url)).await.status(), 404);
    assert_eq!(
        send(client.put(&url).json(&json!({"name": "x", "price": 1})))
            .await
            .status(),
        404
    );
    assert_eq!(send(client.delete(&url)).await.status(), 404);
}

#[tokio::test]
async fn malformed_input_is_rejected() {
    let (addr, inventory) = spawn_app().await;
    let client = reqwest::Client::new();

    let not_json = send(
        client
            .post(format!("http://{addr}/items"))
            .header("content-type", "application/json")
            .body("{not json"),
    )
    .await;
    assert_eq!(not_json.status(), 400);
    assert_eq!(json_body(not_json).await["error"]["code"], 1001);

    let negative = send(
        client
            .post(format!("http://{addr}/items"))
            .json(&json!({"name": "Goma", "price": -3})),
    )
    .await;
    assert_eq!(negative.status(), 400);

    let bad_id = send(client.get(format!("http://{addr}/items/abc"))).await;
    assert_eq!(bad_id.status(), 400);

    assert_eq!(inventory.list_items().len(), 2);
}

/// Reads SSE frames until one complete `data:` payload is available.
async fn next_sse_payload(response: &mut reqwest::Response, buffer: &mut String) -> Value {
    loop {
        if let Some(end) = buffer.find("\n\n") {
            let frame: String = buffer.drain(..end + 2).collect();
            let data: String = frame
                .lines()
                .filter_map(|line| line.strip_prefix("data:"))
                .map(str::trim_start)
                .collect();
            if data.is_empty() {
                continue;
            }
            let Ok(value) = serde_json::from_str(&data) else {
                panic!("frame is not JSON: {data}");
            };
            return value;
        }
        let Ok(Some(chunk)) = response.chunk().await else {
            panic!("sse stream ended");
        };
        buffer.push_str(&String::from_utf8_lossy(&chunk));
    }
}

#[tokio::test]
async fn sse_stream_sends_init_then_changes() {
    let (addr, inventory) = spawn_app().await;
    let client = reqwest::Client::new();

    let mut stream = send(client.get(format!("http://{addr}/events"))).await;
    assert_eq!(stream.status(), 200);
    let mut buffer = String::new();

    let init = next_sse_payload(&mut stream, &mut buffer).await;
    assert_eq!(init["action"], "init");
    assert_eq!(
        init["items"],
        serde_json::to_value(inventory.list_items()).unwrap_or_default()
    );

    let _ = send(
        client
            .post(format!("http://{addr}/items"))
            .json(&json!({"name": "Lapiz", "price": 5})),
    )
    .await;
    let created = next_sse_payload(&mut stream, &mut buffer).await;
    assert_eq!(
        created,
        json!({"action": "create", "item": {"id": 3, "name": "Lapiz", "price": 5}})
    );

    let _ = send(client.delete(format!("http://{addr}/items/3"))).await;
    let deleted = next_sse_payload(&mut stream, &mut buffer).await;
    assert_eq!(deleted, json!({"action": "delete", "id": 3}));

    assert_eq!(inventory.hub().subscriber_count(), 1);
    drop(stream);
    drop(client);
    wait_for_no_subscribers(&inventory).await;
}

#[tokio::test]
async fn sse_stream_ends_when_client_falls_behind() {
    let (addr, inventory) = spawn_app().await;

    let mut stream = send(reqwest::Client::new().get(format!("http://{addr}/events"))).await;
    let mut buffer = String::new();
    let init = next_sse_payload(&mut stream, &mut buffer).await;
    assert_eq!(init["action"], "init");

    // No await in between, so the session task cannot drain the first
    // event before the second one is published.
    let Ok(first) = ItemDraft::new("Lapiz", 5) else {
        panic!("valid draft");
    };
    let Ok(second) = ItemDraft::new("Goma", 2) else {
        panic!("valid draft");
    };
    let _ = inventory.create_item(first);
    let _ = inventory.create_item(second);
    assert_eq!(inventory.hub().subscriber_count(), 0);

    let queued = next_sse_payload(&mut stream, &mut buffer).await;
    assert_eq!(
        queued,
        json!({"action": "create", "item": {"id": 3, "name": "Lapiz", "price": 5}})
    );

    loop {
        match stream.chunk().await {
            Ok(Some(chunk)) => buffer.push_str(&String::from_utf8_lossy(&chunk)),
            Ok(None) | Err(_) => break,
        }
    }
    assert!(!buffer.contains("Goma"));
}

async fn wait_for_no_subscribers(inventory: &InventoryService) {
    for _ in 0..50 {
        if inventory.hub().subscriber_count() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(inventory.hub().subscriber_count(), 0);
}

#[tokio::test]
async fn websocket_stream_sends_init_then_changes() {
    let (addr, inventory) = spawn_app().await;

    let Ok((mut socket, _)) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws")).await
    else {
        panic!("ws connect failed");
    };

    let Some(Ok(first)) = socket.next().await else {
        panic!("missing init frame");
    };
    let Ok(init) = serde_json::from_str::<Value>(first.to_text().unwrap_or_default()) else {
        panic!("init is not JSON");
    };
    assert_eq!(init["action"], "init");
    assert_eq!(init["items"].as_array().map(Vec::len), Some(2));

    let _ = send(
        reqwest::Client::new()
            .put(format!("http://{addr}/items/1"))
            .json(&json!({"name": "Lapicera azul", "price": 12})),
    )
    .await;

    let Some(Ok(second)) = socket.next().await else {
        panic!("missing update frame");
    };
    let Ok(update) = serde_json::from_str::<Value>(second.to_text().unwrap_or_default()) else {
        panic!("update is not JSON");
    };
    assert_eq!(
        update,
        json!({"action": "update", "item": {"id": 1, "name": "Lapicera azul", "price": 12}})
    );

    let _ = socket.close(None).await;
    drop(socket);
    wait_for_no_subscribers(&inventory).await;
}

#[tokio::test]
async fn health_reports_counts() {
    let (addr, _) = spawn_app().await;
    let body = json_body(send(reqwest::Client::new().get(format!("http://{addr}/health"))).await).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["items"], 2);
    assert_eq!(body["subscribers"], 0);
}
