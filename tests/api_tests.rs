#![allow(clippy::needless_borrows_for_generic_args)]

use base64::{engine::general_purpose::STANDARD, Engine};
use hotel_ulin::models::{
    Booking, BookingCreatedResponse, CreateBookingRequest, CreateOrderRequest, MenuResponse,
    MenuType, Order, OrderCreatedResponse, OrderItem, QrCodeResponse,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

mod common;
use common::*;

fn booking_request() -> CreateBookingRequest {
    CreateBookingRequest {
        guest_name: "Arben Hoxha".to_string(),
        guest_email: "arben@example.com".to_string(),
        guest_phone: "+355 68 000 1111".to_string(),
        check_in_date: "2025-08-10".to_string(),
        check_out_date: "2025-08-14".to_string(),
        room_type: "Deluxe Beachfront".to_string(),
        number_of_guests: 2,
        special_requests: Some("Sea view".to_string()),
    }
}

fn order_request(order_type: &str) -> CreateOrderRequest {
    CreateOrderRequest {
        table_number: Some("12".to_string()),
        customer_name: Some("Elira".to_string()),
        customer_phone: Some("+355 69 222 3333".to_string()),
        items: vec![
            OrderItem {
                item_id: "rest_1".to_string(),
                name: "Grilled Sea Bass".to_string(),
                price: dec!(18.00),
                quantity: 2,
            },
            OrderItem {
                item_id: "rest_6".to_string(),
                name: "Baklava".to_string(),
                price: dec!(6.00),
                quantity: 1,
            },
        ],
        order_type: order_type.to_string(),
        special_instructions: None,
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let test_env = TestEnvironment::new().await;

    let response = test_env
        .client
        .get(&test_env.url("/api/health"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "Hotel Ulin API");
}

#[tokio::test]
async fn test_rooms_and_availability() {
    let test_env = TestEnvironment::new().await;
    test_env.seed_test_data().await;

    let response = test_env
        .client
        .get(&test_env.url("/api/rooms"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    let rooms = body["rooms"].as_array().expect("Expected rooms array");
    assert_eq!(rooms.len(), 12);
    assert_eq!(rooms[0]["room_type"], "Deluxe Beachfront");

    let response = test_env
        .client
        .get(&test_env.url("/api/rooms/availability"))
        .query(&[("check_in", "2025-08-10"), ("check_out", "2025-08-14")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["available_rooms"].as_array().unwrap().len(), 12);
    assert_eq!(body["check_in"], "2025-08-10");
    assert_eq!(body["check_out"], "2025-08-14");

    // Missing check_out
    let response = test_env
        .client
        .get(&test_env.url("/api/rooms/availability"))
        .query(&[("check_in", "2025-08-10")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 400);

    // Unparseable date
    let response = test_env
        .client
        .get(&test_env.url("/api/rooms/availability"))
        .query(&[("check_in", "10.08.2025"), ("check_out", "2025-08-14")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let test_env = TestEnvironment::new().await;
    let client = &test_env.client;

    let response = client
        .post(&test_env.url("/api/bookings"))
        .json(&booking_request())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let created: BookingCreatedResponse =
        response.json().await.expect("Failed to parse response");
    assert_eq!(created.message, "Booking created successfully");
    assert_eq!(created.total_price, dec!(120));

    let response = client
        .get(&test_env.url(&format!("/api/bookings/{}", created.booking_id)))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let booking: Booking = response.json().await.expect("Failed to parse response");
    assert_eq!(booking.booking_id, created.booking_id);
    assert_eq!(booking.guest_email, "arben@example.com");
    assert_eq!(booking.special_requests, "Sea view");

    let response = client
        .get(&test_env.url("/api/bookings"))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["bookings"].as_array().unwrap().len(), 1);

    let response = client
        .get(&test_env.url("/api/bookings/unknown-booking"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Booking not found");
}

#[tokio::test]
async fn test_invalid_bookings_rejected() {
    let test_env = TestEnvironment::new().await;
    let client = &test_env.client;

    let mut request = booking_request();
    request.guest_email = "not-an-email".to_string();
    let response = client
        .post(&test_env.url("/api/bookings"))
        .json(&request)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 400);

    // Missing guest_name
    let response = client
        .post(&test_env.url("/api/bookings"))
        .json(&json!({
            "guest_email": "a@b.com",
            "guest_phone": "1",
            "check_in_date": "2025-08-10",
            "check_out_date": "2025-08-11",
            "room_type": "Deluxe Beachfront",
            "number_of_guests": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .post(&test_env.url("/api/bookings"))
        .header("content-type", "text/plain")
        .body("guest_name=x")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 415);

    let response = client
        .get(&test_env.url("/api/bookings"))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["bookings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_menus_grouped_by_category() {
    let test_env = TestEnvironment::new().await;
    test_env.seed_test_data().await;

    let response = test_env
        .client
        .get(&test_env.url("/api/menu/restaurant"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let menu: MenuResponse = response.json().await.expect("Failed to parse response");

    assert_eq!(menu.menu_type, MenuType::Restaurant);
    assert_eq!(
        menu.menu.categories().collect::<Vec<_>>(),
        vec!["Main Course", "Appetizer", "Salad", "Vegetarian", "Dessert"]
    );
    assert_eq!(menu.menu.get("Main Course").unwrap().len(), 2);
    assert_eq!(menu.menu.item_count(), 6);

    let response = test_env
        .client
        .get(&test_env.url("/api/menu/bar"))
        .send()
        .await
        .expect("Failed to send request");
    let menu: MenuResponse = response.json().await.expect("Failed to parse response");
    assert_eq!(menu.menu.get("Cocktails").unwrap().len(), 2);
    assert!(menu
        .menu
        .categories()
        .all(|c| c != "Main Course"));

    let response = test_env
        .client
        .get(&test_env.url("/api/menu/spa"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_qr_code_points_at_ordering_page() {
    let test_env = TestEnvironment::new().await;

    let response = test_env
        .client
        .get(&test_env.url("/api/qr-code/bar"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let qr: QrCodeResponse = response.json().await.expect("Failed to parse response");

    let expected_url = format!("{}/order/bar", PUBLIC_BASE_URL);
    assert_eq!(qr.url, expected_url);
    assert_eq!(qr.menu_type, MenuType::Bar);

    let png = STANDARD
        .decode(qr.qr_code.trim_start_matches("data:image/png;base64,"))
        .expect("QR payload is not base64");
    let image = image::load_from_memory(&png)
        .expect("QR payload is not an image")
        .to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        image.width() as usize,
        image.height() as usize,
        |x, y| image.get_pixel(x as u32, y as u32).0[0],
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1);
    let (_, content) = grids[0].decode().expect("QR code does not decode");
    assert_eq!(content, expected_url);

    let response = test_env
        .client
        .get(&test_env.url("/api/qr-code/lobby"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_qr_code_without_configured_base_url_uses_host() {
    let test_env = TestEnvironment::with_base_url(None).await;

    let response = test_env
        .client
        .get(&test_env.url("/api/qr-code/restaurant"))
        .header("x-forwarded-proto", "https")
        .header("x-forwarded-host", "rooms.hotelulin.example")
        .send()
        .await
        .expect("Failed to send request");
    let qr: QrCodeResponse = response.json().await.expect("Failed to parse response");
    assert_eq!(qr.url, "https://rooms.hotelulin.example/order/restaurant");

    let response = test_env
        .client
        .get(&test_env.url("/api/qr-code/restaurant"))
        .send()
        .await
        .expect("Failed to send request");
    let qr: QrCodeResponse = response.json().await.expect("Failed to parse response");
    assert_eq!(
        qr.url,
        format!("{}/order/restaurant", test_env.base_url)
    );
}

#[tokio::test]
async fn test_order_lifecycle() {
    let test_env = TestEnvironment::new().await;
    let client = &test_env.client;

    let response = client
        .post(&test_env.url("/api/orders"))
        .json(&order_request("restaurant"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let created: OrderCreatedResponse = response.json().await.expect("Failed to parse response");
    assert_eq!(created.message, "Order created successfully");
    assert_eq!(created.total_amount, dec!(42));

    let order_url = test_env.url(&format!("/api/orders/{}", created.order_id));
    let order: Order = client
        .get(&order_url)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(order.status, "pending");
    assert_eq!(order.order_type, MenuType::Restaurant);
    assert_eq!(order.table_number, "12");
    assert_eq!(order.special_instructions, "");

    for status in ["preparing", "ready", "ready"] {
        let response = client
            .put(&format!("{}/status", order_url))
            .query(&[("status", status)])
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["message"], "Order status updated successfully");
    }

    let order: Order = client
        .get(&order_url)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(order.status, "ready");
    assert_eq!(order.total_amount, dec!(42));

    let response = client
        .get(&test_env.url("/api/orders"))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["orders"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_order_errors() {
    let test_env = TestEnvironment::new().await;
    let client = &test_env.client;

    let response = client
        .put(&test_env.url("/api/orders/missing-order/status"))
        .query(&[("status", "served")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Order not found");

    let response = client
        .get(&test_env.url("/api/orders/missing-order"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 404);

    let response = client
        .post(&test_env.url("/api/orders"))
        .json(&order_request("spa"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 400);

    let mut empty = order_request("bar");
    empty.items.clear();
    let response = client
        .post(&test_env.url("/api/orders"))
        .json(&empty)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .post(&test_env.url("/api/orders"))
        .header("content-type", "application/json")
        .body("{\"order_type\": \"bar\", \"items\": [")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .get(&test_env.url("/api/orders"))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_order_price_out_of_range() {
    let test_env = TestEnvironment::new().await;
    let client = &test_env.client;

    let response = client
        .post(&test_env.url("/api/orders"))
        .json(&json!({
            "items": [{"item_id": "bar_1", "name": "Mojito", "price": 7.0e28, "quantity": 2}],
            "order_type": "bar"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("price"));

    let response = client
        .get(&test_env.url("/api/orders"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let test_env = TestEnvironment::new().await;

    let mut request = booking_request();
    request.special_requests = Some("x".repeat(128 * 1024));

    let response = test_env
        .client
        .post(&test_env.url("/api/bookings"))
        .json(&request)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 413);
}

#[tokio::test]
async fn test_metrics_exposed() {
    let test_env = TestEnvironment::new().await;
    test_env.seed_test_data().await;

    test_env
        .client
        .get(&test_env.url("/api/menu/bar"))
        .send()
        .await
        .expect("Failed to send request");

    let response = test_env
        .client
        .get(&test_env.url("/metrics"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.expect("Failed to read metrics");
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("menu_requests_total"));
}
