//! HTTP-level integration tests for the `/dino` endpoints.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router.

mod common;

use axum::body::Body;
use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, delete, get, post_json, put_json, row_count, send};
use serde_json::{json, Value};
use sqlx::PgPool;

fn trex() -> Value {
    json!({
        "name": "Trex",
        "image": "https://x.io/t.png",
        "power": "bite",
    })
}

fn raptor() -> Value {
    json!({
        "name": "Raptor",
        "image": "https://x.io/r.png",
        "power": "speed",
    })
}

/// Create a dinosaur through the API and assert success.
async fn create(pool: &PgPool, payload: Value) {
    let app = build_test_app(pool.clone()).await;
    let response = post_json(app, "/dino", payload).await;
    assert_eq!(response.status(), StatusCode::OK);
}

async fn list(pool: &PgPool) -> Vec<Value> {
    let app = build_test_app(pool.clone()).await;
    let response = get(app, "/dino").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response)
        .await
        .as_array()
        .expect("response should be an array")
        .clone()
}

// ---------------------------------------------------------------------------
// POST /dino
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn create_then_list_returns_row_with_assigned_id(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = post_json(app, "/dino", trex()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "message": "Created" }));

    let rows = list(&pool).await;
    assert_eq!(
        rows,
        vec![json!({
            "id": 1,
            "name": "Trex",
            "image": "https://x.io/t.png",
            "power": "bite",
        })]
    );
}

#[sqlx::test(migrations = false)]
async fn create_persists_trimmed_name(pool: PgPool) {
    create(
        &pool,
        json!({ "name": "  Trex  ", "image": "https://x.io/t.png", "power": "bite" }),
    )
    .await;

    let rows = list(&pool).await;
    assert_eq!(rows[0]["name"], "Trex");
}

#[sqlx::test(migrations = false)]
async fn create_with_missing_field_returns_422_and_adds_nothing(pool: PgPool) {
    for field in ["name", "image", "power"] {
        let mut payload = trex();
        payload.as_object_mut().unwrap().remove(field);

        let app = build_test_app(pool.clone()).await;
        let response = post_json(app, "/dino", payload).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["message"], format!("{field} is a required field"));
    }

    assert_eq!(row_count(&pool).await, 0);
}

#[sqlx::test(migrations = false)]
async fn create_with_invalid_url_returns_422(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = post_json(
        app,
        "/dino",
        json!({ "name": "Trex", "image": "t.png", "power": "bite" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["message"], "image must be a valid URL");
    assert_eq!(row_count(&pool).await, 0);
}

#[sqlx::test(migrations = false)]
async fn create_with_non_web_url_scheme_returns_422(pool: PgPool) {
    for image in ["foo:bar", "javascript:alert(1)"] {
        let app = build_test_app(pool.clone()).await;
        let response = post_json(
            app,
            "/dino",
            json!({ "name": "Trex", "image": image, "power": "bite" }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{image}");
        assert_eq!(body_json(response).await["message"], "image must be a valid URL");
    }
    assert_eq!(row_count(&pool).await, 0);
}

#[sqlx::test(migrations = false)]
async fn create_without_body_returns_422(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = send(app, Method::POST, "/dino", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["message"], "Provide JSON body");
}

#[sqlx::test(migrations = false)]
async fn create_with_malformed_json_returns_422(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = send(app, Method::POST, "/dino", Body::from("{\"name\": ")).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["message"], "Malformed JSON body");
}

// ---------------------------------------------------------------------------
// GET /dino, GET /dino/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn list_on_empty_table_returns_empty_array(pool: PgPool) {
    assert!(list(&pool).await.is_empty());
}

#[sqlx::test(migrations = false)]
async fn get_by_id_returns_single_row_array(pool: PgPool) {
    create(&pool, trex()).await;
    create(&pool, raptor()).await;

    let app = build_test_app(pool.clone()).await;
    let response = get(app, "/dino/2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        json!([{
            "id": 2,
            "name": "Raptor",
            "image": "https://x.io/r.png",
            "power": "speed",
        }])
    );
}

#[sqlx::test(migrations = false)]
async fn get_by_missing_id_returns_empty_array(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = get(app, "/dino/999").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = false)]
async fn get_by_malformed_id_returns_422(pool: PgPool) {
    for uri in ["/dino/abc", "/dino/12x", "/dino/-1"] {
        let app = build_test_app(pool.clone()).await;
        let response = get(app, uri).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(body_json(response).await["message"], "Invalid param type");
    }
}

#[sqlx::test(migrations = false)]
async fn non_utf8_id_returns_json_422(pool: PgPool) {
    for method in [Method::GET, Method::DELETE] {
        let app = build_test_app(pool.clone()).await;
        let response = send(app, method.clone(), "/dino/%FF", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{method}");
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(body_json(response).await["message"], "Invalid param type");
    }
}

#[sqlx::test(migrations = false)]
async fn unsupported_method_returns_json_405(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = send(app, Method::PATCH, "/dino", Body::from(trex().to_string())).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert_eq!(body_json(response).await["message"], "Method Not Allowed");
    assert_eq!(row_count(&pool).await, 0);
}

// ---------------------------------------------------------------------------
// PUT /dino
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn update_changes_only_given_column(pool: PgPool) {
    create(&pool, trex()).await;

    let app = build_test_app(pool.clone()).await;
    let response = put_json(app, "/dino", json!({ "id": 1, "name": "Rex" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "message": "Updated" }));

    let rows = list(&pool).await;
    assert_eq!(
        rows,
        vec![json!({
            "id": 1,
            "name": "Rex",
            "image": "https://x.io/t.png",
            "power": "bite",
        })]
    );
}

#[sqlx::test(migrations = false)]
async fn update_with_id_above_bound_returns_422(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = put_json(app, "/dino", json!({ "id": 101, "name": "Rex" })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["message"],
        "id must be less than or equal to 100"
    );
}

#[sqlx::test(migrations = false)]
async fn update_with_unknown_column_returns_422_and_changes_nothing(pool: PgPool) {
    create(&pool, trex()).await;

    let app = build_test_app(pool.clone()).await;
    let response = put_json(app, "/dino", json!({ "id": 1, "id = 5, name": "x" })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(list(&pool).await[0]["name"], "Trex");
}

#[sqlx::test(migrations = false)]
async fn update_with_non_web_url_scheme_returns_422_and_changes_nothing(pool: PgPool) {
    create(&pool, trex()).await;

    for image in ["foo:bar", "javascript:alert(1)"] {
        let app = build_test_app(pool.clone()).await;
        let response = put_json(app, "/dino", json!({ "id": 1, "image": image })).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{image}");
        assert_eq!(body_json(response).await["message"], "image must be a valid URL");
    }
    assert_eq!(list(&pool).await[0]["image"], "https://x.io/t.png");
}

#[sqlx::test(migrations = false)]
async fn update_with_only_id_returns_422(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = put_json(app, "/dino", json!({ "id": 1 })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["message"], "No fields to update");
}

#[sqlx::test(migrations = false)]
async fn update_without_body_returns_422(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = send(app, Method::PUT, "/dino", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["message"], "Provide JSON body");
}

#[sqlx::test(migrations = false)]
async fn update_of_missing_row_is_a_no_op(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = put_json(app, "/dino", json!({ "id": 50, "power": "roar" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(row_count(&pool).await, 0);
}

// ---------------------------------------------------------------------------
// DELETE /dino/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn delete_removes_row(pool: PgPool) {
    create(&pool, trex()).await;
    create(&pool, raptor()).await;

    let app = build_test_app(pool.clone()).await;
    let response = delete(app, "/dino/1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "message": "Deleted" }));

    let rows = list(&pool).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Raptor");
}

#[sqlx::test(migrations = false)]
async fn delete_of_missing_row_returns_200(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = delete(app, "/dino/77").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Deleted");
}

#[sqlx::test(migrations = false)]
async fn delete_with_malformed_id_returns_422(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = delete(app, "/dino/one").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["message"], "Invalid param type");
}
