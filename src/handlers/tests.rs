//! Router tests: page, JSON API and health endpoints

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::util::ServiceExt;

use crate::config::Config;
use crate::logic::features::FeatureLayout;
use crate::logic::model::{ArtifactInfo, Predictor, SaltModel, Scaler};
use crate::{create_router, AppState};

const FEATURES: [&str; 6] = ["ph", "Hardness", "Solids", "Chloramines", "Sulfate", "Conductivity"];

fn test_app_with(scaler: Scaler, model: SaltModel) -> Router {
    let layout = FeatureLayout::new(FEATURES.iter().map(|s| s.to_string()).collect()).unwrap();

    let info = ArtifactInfo {
        model_dir: "memory".to_string(),
        model_kind: model.kind().to_string(),
        scaler_kind: scaler.kind().to_string(),
        layout: layout.info(),
        loaded_at: chrono::Utc::now(),
    };
    let predictor = Predictor::new(layout, Arc::new(scaler), Arc::new(model));

    create_router(AppState::new(predictor, info, Config::default()))
}

fn identity_scaler(width: usize) -> Scaler {
    Scaler::standard(vec![0.0; width], vec![1.0; width])
}

/// Picks the last column, so prediction == Conductivity
fn conductivity_model(width: usize) -> SaltModel {
    let mut coefficients = vec![0.0; width];
    coefficients[width - 1] = 1.0;
    SaltModel::Linear { coefficients, intercept: 0.0 }
}

fn test_app() -> Router {
    test_app_with(identity_scaler(6), conductivity_model(6))
}

fn form_body(conductivity: &str) -> String {
    FEATURES
        .iter()
        .map(|name| {
            let value = if *name == "Conductivity" { conductivity } else { "1.5" };
            format!("{}={}", name, value)
        })
        .collect::<Vec<_>>()
        .join("&")
}

async fn post_form(app: Router, body: String) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_json(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/predict")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// ============================================================================
// Page
// ============================================================================

#[tokio::test]
async fn test_index_renders_one_input_per_feature() {
    let (status, html) = get(test_app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches(r#"type="number""#).count(), FEATURES.len());
    assert!(html.contains(r#"name="Conductivity""#));
    assert!(!html.contains("Prediction Summary"));
}

#[tokio::test]
async fn test_submit_drinkable() {
    let (status, html) = post_form(test_app(), form_body("120")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Predicted Salt Level: 120.00 mg/L"));
    assert!(html.contains("✅ Water is Drinkable"));
    assert!(html.contains("12.0% of unsafe limit"));
    assert_eq!(html.matches("<rect").count(), 5);
    // submitted values stay in the widgets
    assert!(html.contains(r#"name="Conductivity" value="120""#));
}

#[tokio::test]
async fn test_submit_not_drinkable_caps_indicator() {
    let (_, html) = post_form(test_app(), form_body("500")).await;
    assert!(html.contains("🚫 Water is Not Drinkable"));
    assert!(html.contains("50.0% of unsafe limit"));

    let (_, html) = post_form(test_app(), form_body("5000")).await;
    assert!(html.contains("Predicted Salt Level: 5000.00 mg/L"));
    assert!(html.contains("100.0% of unsafe limit"));
}

#[tokio::test]
async fn test_submit_bad_number_shows_inline_error() {
    let (status, html) = post_form(test_app(), form_body("salty")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("⚠️ Error during prediction:"));
    assert!(html.contains("salty"));
    assert!(!html.contains("Prediction Summary"));
    // page is still usable
    assert!(html.contains("🔮 Predict Salt Level"));
    assert_eq!(html.matches(r#"type="number""#).count(), FEATURES.len());
}

#[tokio::test]
async fn test_submit_missing_field_shows_inline_error() {
    let (status, html) = post_form(test_app(), "ph=7&Hardness=1".to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("missing value for feature &#39;Solids&#39;"));
}

#[tokio::test]
async fn test_scaler_failure_is_caught() {
    // scaler fitted on five columns while the layout has six
    let app = test_app_with(identity_scaler(5), conductivity_model(6));
    let (status, html) = post_form(app, form_body("120")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("⚠️ Error during prediction: scaler expects 5 features, got 6"));
}

#[tokio::test]
async fn test_model_failure_is_caught() {
    // scaler agrees with the layout, model was fitted on five columns
    let app = test_app_with(identity_scaler(6), conductivity_model(5));
    let (status, html) = post_form(app.clone(), form_body("120")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("⚠️ Error during prediction: model expects 5 features, got 6"));
    assert!(!html.contains("Prediction Summary"));
    assert!(html.contains("🔮 Predict Salt Level"));

    let (_, body) = get(app, "/health").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["engine"]["failure_count"], 1);
}

#[tokio::test]
async fn test_submit_non_finite_shows_inline_error() {
    for value in ["NaN", "inf"] {
        let (status, html) = post_form(test_app(), form_body(value)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("⚠️ Error during prediction:"));
        assert!(html.contains("must be a finite number"));
        assert!(!html.contains("Prediction Summary"));
        assert!(!html.contains("<svg"));
    }
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn test_api_predict() {
    let body = serde_json::json!({
        "features": {
            "Conductivity": 612.5,
            "ph": 7.1,
            "Hardness": 204.0,
            "Solids": 20791.3,
            "Chloramines": 7.3,
            "Sulfate": 368.5
        }
    });
    let (status, json) = post_json(test_app(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["prediction_mg_l"], 612.5);
    assert_eq!(json["drinkable"], false);
    assert_eq!(json["headline"], "Predicted Salt Level: 612.50 mg/L");
    assert_eq!(json["layout_hash"].as_str().unwrap().len(), 8);

    let chart = json["chart"].as_array().unwrap();
    assert_eq!(chart.len(), 5);
    assert_eq!(chart[0]["feature"], "ph");
    assert_eq!(chart[4]["feature"], "Sulfate");
}

#[tokio::test]
async fn test_api_missing_feature_is_unprocessable() {
    let body = serde_json::json!({ "features": { "ph": 7.0 } });
    let (status, json) = post_json(test_app(), body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("missing value for feature"));
    assert_eq!(json["status"], 422);
}

#[tokio::test]
async fn test_api_empty_features_is_bad_request() {
    let body = serde_json::json!({ "features": {} });
    let (status, _) = post_json(test_app(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Health / metadata
// ============================================================================

#[tokio::test]
async fn test_features_endpoint() {
    let (status, body) = get(test_app(), "/api/v1/features").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["model_kind"], "linear");
    assert_eq!(json["scaler_kind"], "standard");
    assert_eq!(json["layout"]["feature_count"], 6);
    assert_eq!(json["layout"]["feature_names"][0], "ph");
}

#[tokio::test]
async fn test_health_counts_predictions() {
    let app = test_app();
    post_form(app.clone(), form_body("120")).await;
    post_form(app.clone(), form_body("300")).await;

    let (status, body) = get(app, "/health").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["engine"]["prediction_count"], 2);
    assert_eq!(json["engine"]["failure_count"], 0);
}
