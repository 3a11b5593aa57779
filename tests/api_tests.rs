use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use svd_rec_api::{
    api::{create_router, AppState},
    config::Config,
    db::{sample::sample_interactions, sample::sample_users, InteractionStore, UserRegistry},
    models::{ItemId, UserId},
    services::RatingModel,
};

fn seeded_config() -> Config {
    Config {
        random_seed: Some(7),
        ..Config::default()
    }
}

fn create_test_server() -> TestServer {
    let state = AppState::bootstrap(&seeded_config()).unwrap();
    TestServer::new(create_router(state)).unwrap()
}

/// Scores items by id so the expected ranking is obvious
struct ItemIdModel;

impl RatingModel for ItemIdModel {
    fn predict(&self, _user_id: UserId, item_id: ItemId) -> f64 {
        (item_id - 100) as f64
    }
}

struct PanickingModel;

impl RatingModel for PanickingModel {
    fn predict(&self, _user_id: UserId, _item_id: ItemId) -> f64 {
        panic!("model exploded")
    }
}

struct NanModel;

impl RatingModel for NanModel {
    fn predict(&self, _user_id: UserId, _item_id: ItemId) -> f64 {
        f64::NAN
    }
}

fn server_with_model(model: Arc<dyn RatingModel>) -> TestServer {
    let state = AppState::new(
        UserRegistry::new(sample_users()),
        InteractionStore::new(sample_interactions()),
        model,
    );
    TestServer::new(create_router(state)).unwrap()
}

fn item_ids(body: &Value) -> Vec<i64> {
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["item_id"].as_i64().unwrap())
        .collect()
}

fn scores(body: &Value) -> Vec<f64> {
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["predicted_score"].as_f64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"]["trained_on"], 4);
    assert_eq!(body["model"]["held_out"], 1);
}

#[tokio::test]
async fn test_recommend_user_1() {
    let server = create_test_server();
    let response = server.get("/recommend").add_query_param("user_id", 1).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["user_id"], 1);

    let items: HashSet<i64> = item_ids(&body).into_iter().collect();
    assert_eq!(items, HashSet::from([103, 104, 105]));
}

#[tokio::test]
async fn test_recommend_user_3() {
    let server = create_test_server();
    let response = server.get("/recommend").add_query_param("user_id", 3).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let items: HashSet<i64> = item_ids(&body).into_iter().collect();
    assert_eq!(items, HashSet::from([101, 102, 103, 104]));
}

#[tokio::test]
async fn test_known_users_get_sorted_unseen_items() {
    let server = create_test_server();
    let interacted = [(1, vec![101, 102]), (2, vec![103, 104]), (3, vec![105])];

    for (user_id, seen) in interacted {
        let response = server
            .get("/recommend")
            .add_query_param("user_id", user_id)
            .await;
        response.assert_status_ok();
        let body: Value = response.json();

        let items = item_ids(&body);
        assert!(items.len() <= 5);
        assert!(items.iter().all(|item| !seen.contains(item)));

        let scores = scores(&body);
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert!(scores.iter().all(|s| (1.0..=5.0).contains(s)));
        for s in scores {
            assert_eq!((s * 100.0).round() / 100.0, s);
        }
    }
}

#[tokio::test]
async fn test_recommend_is_idempotent() {
    let server = create_test_server();
    let first: Value = server
        .get("/recommend")
        .add_query_param("user_id", 2)
        .await
        .json();
    let second: Value = server
        .get("/recommend")
        .add_query_param("user_id", 2)
        .await
        .json();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_user_returns_404() {
    let server = create_test_server();
    for user_id in [99, 0, -1] {
        let response = server
            .get("/recommend")
            .add_query_param("user_id", user_id)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body, serde_json::json!({ "error": "User not found" }));
    }
}

#[tokio::test]
async fn test_missing_user_id_returns_400() {
    let server = create_test_server();
    let response = server.get("/recommend").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("user_id"));
}

#[tokio::test]
async fn test_non_integer_user_id_returns_400() {
    let server = create_test_server();
    let response = server
        .get("/recommend")
        .add_query_param("user_id", "abc")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_repeated_user_id_uses_first_value() {
    let server = create_test_server();
    let response = server
        .get("/recommend")
        .add_query_param("user_id", 1)
        .add_query_param("user_id", 2)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["user_id"], 1);
    let items: HashSet<i64> = item_ids(&body).into_iter().collect();
    assert_eq!(items, HashSet::from([103, 104, 105]));
}

#[tokio::test]
async fn test_repeated_bad_user_id_returns_json_400() {
    let server = create_test_server();
    let response = server
        .get("/recommend")
        .add_query_param("user_id", "x")
        .add_query_param("user_id", 2)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("'x'"));
}

#[tokio::test]
async fn test_ranking_follows_model_scores() {
    let server = server_with_model(Arc::new(ItemIdModel));
    let response = server.get("/recommend").add_query_param("user_id", 3).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(item_ids(&body), vec![104, 103, 102, 101]);
    assert_eq!(scores(&body), vec![4.0, 3.0, 2.0, 1.0]);
}

#[tokio::test]
async fn test_invalid_prediction_returns_500() {
    let server = server_with_model(Arc::new(NanModel));
    let response = server.get("/recommend").add_query_param("user_id", 1).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Non-finite prediction"));
}

#[tokio::test]
async fn test_panic_returns_500_json() {
    let server = server_with_model(Arc::new(PanickingModel));
    let response = server.get("/recommend").add_query_param("user_id", 2).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "model exploded");
}

#[tokio::test]
async fn test_unknown_user_is_checked_before_scoring() {
    let server = server_with_model(Arc::new(PanickingModel));
    let response = server.get("/recommend").add_query_param("user_id", 99).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let server = create_test_server();
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid_like(header.to_str().unwrap()));
}

fn uuid_like(value: &str) -> bool {
    value.len() == 36 && value.chars().filter(|c| *c == '-').count() == 4
}
