use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{rejection::FormRejection, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde_json::Value;

use crate::blueprint::{self, Fonts};
use crate::error::AppError;
use crate::estimate;
use crate::model::Regressor;
use crate::pages;
use crate::types::SplitQuery;

// ---------- Server state ----------

/// Built once in `main`; never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn Regressor>,
    pub fonts: Arc<Fonts>,
    pub log_predictions: bool,
}

impl AppState {
    pub fn new(model: Arc<dyn Regressor>, fonts: Fonts) -> Self {
        Self {
            model,
            fonts: Arc::new(fonts),
            log_predictions: false,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict))
        .route("/split", get(split))
        .route("/blueprint", get(blueprint_page))
        .route("/generate_blueprint", post(generate_blueprint))
        .with_state(state)
}

// ---------- Handlers ----------

async fn home() -> Html<String> {
    Html(pages::index(None))
}

async fn predict(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Html<String> {
    // A body that is not urlencoded carries no fields; the form reports what is missing.
    let form = form.map(|Form(f)| f).unwrap_or_else(|e| {
        tracing::debug!("predict body is not a form: {}", e);
        HashMap::new()
    });
    match estimate::estimate(state.model.as_ref(), &form, state.log_predictions) {
        Ok(est) => Html(pages::estimate(&est.prediction, est.total_area)),
        Err(e) => {
            tracing::warn!("prediction failed: {}", e);
            Html(pages::index(Some(&format!("Error: {}", e))))
        }
    }
}

async fn split(Query(query): Query<SplitQuery>) -> Html<String> {
    Html(pages::split(query.total_area()))
}

async fn blueprint_page() -> Html<String> {
    Html(pages::blueprint_preview())
}

async fn generate_blueprint(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    // An unreadable body is treated like one without rooms.
    let payload = serde_json::from_slice::<Value>(&body).unwrap_or_else(|e| {
        tracing::debug!("blueprint body is not json: {}", e);
        Value::Null
    });

    let fonts = Arc::clone(&state.fonts);
    let png = tokio::task::spawn_blocking(move || blueprint::generate(&payload, &fonts))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let disposition = format!("attachment; filename=\"{}\"", blueprint::DOWNLOAD_NAME);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .map_err(|e| AppError::Internal(format!("Invalid header: {}", e)))?,
            ),
        ],
        png,
    )
        .into_response())
}
