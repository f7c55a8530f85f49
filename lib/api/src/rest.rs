use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, ResponseError, Result as ActixResult};
use collrec_core::{Error, UserId};
use collrec_ranking::SignalWeights;
use collrec_storage::RecommendationService;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] Error),

    #[error("Background task failed: {0}")]
    Blocking(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(Error::InvalidWeights(_)) => StatusCode::BAD_REQUEST,
            ApiError::Core(Error::NotPreprocessed) => StatusCode::CONFLICT,
            ApiError::Core(Error::DataUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Core(_) | ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

#[derive(Debug, Deserialize)]
struct RecommendQuery {
    top_n: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendRequest {
    #[serde(default)]
    weights: Option<SignalWeights>,
    #[serde(default)]
    top_n: Option<usize>,
}

#[derive(Serialize)]
struct StatusResponse {
    message: &'static str,
    ready: bool,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        service: Arc<RecommendationService>,
        host: &str,
        port: u16,
    ) -> std::io::Result<()> {
        info!(host, port, "starting REST API");
        let data = web::Data::from(service);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(data.clone())
                .configure(configure)
        })
        .bind((host, port))?
        .run()
        .await
    }
}

/// Register every route on `cfg`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/preprocess_data", web::get().to(preprocess_data))
        .route("/recommendations/{user_id}", web::get().to(get_recommendations))
        .route("/recommendations/{user_id}", web::post().to(post_recommendations));
}

async fn index(service: web::Data<RecommendationService>) -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        message: "collrec recommendation service",
        ready: service.is_ready(),
    })
}

async fn preprocess_data(
    service: web::Data<RecommendationService>,
) -> ActixResult<HttpResponse, ApiError> {
    let worker = service.clone();
    let stats = web::block(move || worker.preprocess())
        .await
        .map_err(|e| ApiError::Blocking(e.to_string()))?
        .map_err(|e| {
            warn!(error = %e, "preprocess request failed");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Data successfully loaded and preprocessed.",
        "stats": stats,
    })))
}

async fn get_recommendations(
    service: web::Data<RecommendationService>,
    path: web::Path<UserId>,
    query: web::Query<RecommendQuery>,
) -> ActixResult<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let collections = service.recommend(user_id, None, query.top_n)?;
    Ok(HttpResponse::Ok().json(collections))
}

async fn post_recommendations(
    service: web::Data<RecommendationService>,
    path: web::Path<UserId>,
    body: Option<web::Json<RecommendRequest>>,
) -> ActixResult<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let request = body.map(web::Json::into_inner).unwrap_or_default();
    let collections = service.recommend(user_id, request.weights.as_ref(), request.top_n)?;
    Ok(HttpResponse::Ok().json(collections))
}
