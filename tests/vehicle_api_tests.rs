use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use ev_catalog::config::environment::EnvironmentConfig;
use ev_catalog::database::connection::create_pool;
use ev_catalog::routes::vehicle_routes::create_vehicle_router;
use ev_catalog::state::AppState;

// Función helper para crear la app de test con su base aislada en memoria
async fn create_test_app() -> Router {
    let pool = create_pool(Some("sqlite::memory:")).await.unwrap();
    let config = EnvironmentConfig {
        environment: "test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        csv_path: "/nonexistent.csv".to_string(),
        cors_origins: Vec::new(),
    };
    let state = AppState::new(pool, config);

    Router::new()
        .nest("/api/vehicles", create_vehicle_router())
        .with_state(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn seed_vehicle(app: &Router, payload: Value) -> Value {
    let (status, body) = send(app, "POST", "/api/vehicles", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn bmw_ix3() -> Value {
    json!({
        "brand": "BMW",
        "model": "iX3",
        "accelSec": 6.8,
        "topSpeedKmH": 180,
        "rangeKm": 460,
        "efficiencyWhKm": 186,
        "fastChargeKmH": 560,
        "rapidCharge": "Yes",
        "powerTrain": "RWD",
        "plugType": "Type2 CCS",
        "bodyStyle": "SUV",
        "segment": "D",
        "seats": 5,
        "priceEuro": 68040,
        "date": "2021-01-01"
    })
}

fn tesla_model3() -> Value {
    json!({
        "brand": "Tesla",
        "model": "Model 3",
        "accelSec": 5.6,
        "topSpeedKmH": 225,
        "rangeKm": 460,
        "efficiencyWhKm": 153,
        "fastChargeKmH": 650,
        "rapidCharge": "Yes",
        "powerTrain": "AWD",
        "plugType": "Type2 CCS",
        "bodyStyle": "Sedan",
        "segment": "D",
        "seats": 5,
        "priceEuro": 55480,
        "date": "2021-02-01"
    })
}

fn filters_uri(filters: &Value) -> String {
    format!(
        "/api/vehicles?columnFilters={}",
        urlencoding::encode(&filters.to_string())
    )
}

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let app = create_test_app().await;

    let created = seed_vehicle(&app, bmw_ix3()).await;
    assert!(created["id"].is_string());
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/api/vehicles/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["brand"], "BMW");
    assert_eq!(fetched["model"], "iX3");
    assert_eq!(fetched["accelSec"], 6.8);
    assert_eq!(fetched["topSpeedKmH"], 180);
    assert_eq!(fetched["priceEuro"], 68040);
    assert_eq!(fetched["id"], created["id"]);
}

#[tokio::test]
async fn test_get_unknown_id_returns_404() {
    let app = create_test_app().await;

    let uri = format!("/api/vehicles/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Vehicle not found");
}

#[tokio::test]
async fn test_create_coerces_malformed_numerics_to_zero() {
    let app = create_test_app().await;

    let created = seed_vehicle(
        &app,
        json!({
            "brand": "BMW",
            "model": "i3",
            "accelSec": "rápido",
            "topSpeedKmH": null,
            "priceEuro": "38000"
        }),
    )
    .await;

    assert_eq!(created["accelSec"], 0.0);
    assert_eq!(created["topSpeedKmH"], 0);
    assert_eq!(created["priceEuro"], 38000);
    assert_eq!(created["rangeKm"], 0);
}

#[tokio::test]
async fn test_create_rejects_non_object_body() {
    let app = create_test_app().await;

    let (status, _) = send(&app, "POST", "/api/vehicles", Some(json!([1, 2, 3]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_merges_partial_payload() {
    let app = create_test_app().await;
    let created = seed_vehicle(&app, bmw_ix3()).await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/vehicles/{}", id),
        Some(json!({"priceEuro": 64990, "rapidCharge": "No"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["priceEuro"], 64990);
    assert_eq!(updated["rapidCharge"], "No");
    // el resto de campos queda intacto
    assert_eq!(updated["brand"], "BMW");
    assert_eq!(updated["model"], "iX3");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_is_idempotent_modulo_timestamps() {
    let app = create_test_app().await;
    let created = seed_vehicle(&app, bmw_ix3()).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/vehicles/{}", id);
    let payload = json!({"model": "iX3 M Sport", "seats": 4});

    let (_, first) = send(&app, "PUT", &uri, Some(payload.clone())).await;
    let (_, second) = send(&app, "PUT", &uri, Some(payload)).await;

    let strip = |mut v: Value| {
        v.as_object_mut().unwrap().remove("updatedAt");
        v
    };
    assert_eq!(strip(first), strip(second));
}

#[tokio::test]
async fn test_update_unknown_id_returns_404() {
    let app = create_test_app().await;

    let uri = format!("/api/vehicles/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, "PUT", &uri, Some(json!({"brand": "Audi"}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    let app = create_test_app().await;
    let created = seed_vehicle(&app, bmw_ix3()).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/vehicles/{}", id);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Vehicle deleted successfully");

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// Escenario de referencia: iX3 + Model 3 sembrados, búsqueda, filtro
// equals y paginación
#[tokio::test]
async fn test_search_filter_and_pagination_scenario() {
    let app = create_test_app().await;
    seed_vehicle(&app, bmw_ix3()).await;
    seed_vehicle(&app, tesla_model3()).await;

    // search=bmw, case-insensitive, solo matchea el iX3
    let (status, body) = send(&app, "GET", "/api/vehicles?search=bmw", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["vehicles"][0]["model"], "iX3");

    // filtro equals sobre brand, case-sensitive, solo matchea el Model 3
    let uri = filters_uri(&json!({"brand": {"type": "equals", "value": "Tesla"}}));
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["vehicles"][0]["model"], "Model 3");

    // página de 1 sobre 2 registros
    let (status, body) = send(&app, "GET", "/api/vehicles?page=1&limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vehicles"].as_array().unwrap().len(), 1);
    assert_eq!(body["total"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["currentPage"], 1);
}

#[tokio::test]
async fn test_page_beyond_end_returns_empty_with_same_total() {
    let app = create_test_app().await;
    seed_vehicle(&app, bmw_ix3()).await;
    seed_vehicle(&app, tesla_model3()).await;

    let (status, body) = send(&app, "GET", "/api/vehicles?page=9&limit=1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["vehicles"].as_array().unwrap().is_empty());
    assert_eq!(body["total"], 2);
    assert_eq!(body["totalPages"], 2);
}

#[tokio::test]
async fn test_search_and_filters_combine_conjunctively() {
    let app = create_test_app().await;
    seed_vehicle(&app, bmw_ix3()).await;
    seed_vehicle(&app, tesla_model3()).await;

    // ambos son segmento D, pero el filtro por brand descarta el BMW
    let uri = format!(
        "{}&search=d",
        filters_uri(&json!({"brand": {"type": "startsWith", "value": "Tes"}}))
    );
    let (status, body) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["vehicles"][0]["brand"], "Tesla");
}

#[tokio::test]
async fn test_is_empty_filter_matches_only_empty_model() {
    let app = create_test_app().await;
    seed_vehicle(&app, bmw_ix3()).await;
    seed_vehicle(&app, json!({"brand": "Misterioso", "priceEuro": 1000})).await;

    let uri = filters_uri(&json!({"model": {"type": "isEmpty"}}));
    let (status, body) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["vehicles"][0]["brand"], "Misterioso");
}

#[tokio::test]
async fn test_sort_by_numeric_field_descending() {
    let app = create_test_app().await;
    seed_vehicle(&app, bmw_ix3()).await;
    seed_vehicle(&app, tesla_model3()).await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/vehicles?sortField=priceEuro&sortDirection=desc",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vehicles"][0]["priceEuro"], 68040);
    assert_eq!(body["vehicles"][1]["priceEuro"], 55480);
}

#[tokio::test]
async fn test_unknown_filter_field_is_rejected() {
    let app = create_test_app().await;
    seed_vehicle(&app, bmw_ix3()).await;

    let uri = filters_uri(&json!({"vin": {"type": "equals", "value": "X"}}));
    let (status, _) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_column_filters_json_is_rejected() {
    let app = create_test_app().await;

    let uri = format!(
        "/api/vehicles?columnFilters={}",
        urlencoding::encode("{not json")
    );
    let (status, _) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_distinct_values_sorted_without_duplicates_or_empties() {
    let app = create_test_app().await;
    seed_vehicle(&app, tesla_model3()).await;
    seed_vehicle(&app, bmw_ix3()).await;
    seed_vehicle(&app, bmw_ix3()).await;
    seed_vehicle(&app, json!({"model": "SinMarca"})).await;

    let (status, body) = send(&app, "GET", "/api/vehicles/filters/brand", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["BMW", "Tesla"]));
}

#[tokio::test]
async fn test_distinct_values_rejects_non_whitelisted_field() {
    let app = create_test_app().await;

    let (status, _) = send(&app, "GET", "/api/vehicles/filters/priceEuro", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/vehicles/filters/model", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
