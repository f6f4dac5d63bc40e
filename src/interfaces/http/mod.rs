use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    AUTHORIZATION, CONTENT_TYPE,
};
use actix_web::middleware::DefaultHeaders;
use actix_web::{dev::Server, get, web, App, HttpResponse, HttpServer, Responder};
use serde::Serialize;
use tracing::{debug, warn};

use crate::application::PublishedTable;
use crate::domain::error::{AppError, Result};
use crate::domain::stats::PercentageTable;
use crate::infrastructure::config::ServiceConfig;

pub const LIVENESS_MESSAGE: &str = "Tag statistics API is up and running!";

pub const ALLOWED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "OPTIONS"];

pub struct HttpState {
    pub table: Arc<PublishedTable>,
    /// Shown to clients when no data is loaded
    pub data_file: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[get("/")]
async fn home() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(LIVENESS_MESSAGE)
}

#[get("/data")]
async fn get_data(data: web::Data<HttpState>) -> impl Responder {
    match published_data(&data) {
        Ok(table) => {
            debug!(years = table.len(), "Serving percentage table");
            HttpResponse::Ok().json(table)
        }
        Err(err) => {
            warn!(error = %err, "Data requested but no table is loaded");
            HttpResponse::InternalServerError().json(ErrorBody {
                error: err.to_string(),
            })
        }
    }
}

fn published_data(state: &HttpState) -> Result<&PercentageTable> {
    let table = state.table.get();
    if table.is_empty() {
        return Err(AppError::NoDataAvailable(format!(
            "Check if '{}' exists and is correctly formatted.",
            state.data_file
        )));
    }
    Ok(table)
}

/// Preflight handling; any origin, the listed methods and headers
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(ALLOWED_METHODS)
        .allowed_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(3600)
}

/// CORS headers for responses to requests that carry no `Origin`
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS.join(", ")))
        .add((ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home).service(get_data);
}

pub fn start_server(table: Arc<PublishedTable>, config: &ServiceConfig) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState {
        table,
        data_file: config.data_file.display().to_string(),
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .wrap(cors())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::DatasetLoader;
    use actix_web::http::header::HeaderMap;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use actix_web::web::Bytes;
    use std::collections::BTreeMap;

    fn state_with(table: Option<PercentageTable>) -> web::Data<HttpState> {
        let published = PublishedTable::new();
        if let Some(table) = table {
            published.publish(table).unwrap();
        }
        web::Data::new(HttpState {
            table: Arc::new(published),
            data_file: "stackoverflow_data.csv".to_string(),
        })
    }

    async fn send(
        state: web::Data<HttpState>,
        req: test::TestRequest,
    ) -> (StatusCode, HeaderMap, Bytes) {
        let app = test::init_service(
            App::new()
                .wrap(cors_headers())
                .wrap(cors())
                .app_data(state)
                .configure(configure),
        )
        .await;
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = test::read_body(resp).await;
        (status, headers, body)
    }

    fn header<'a>(headers: &'a HeaderMap, name: actix_web::http::header::HeaderName) -> &'a str {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    fn single_tag_table() -> PercentageTable {
        PercentageTable::from(BTreeMap::from([(
            2020,
            BTreeMap::from([("python".to_string(), 100.0)]),
        )]))
    }

    #[actix_web::test]
    async fn test_home_succeeds_without_data() {
        let (status, headers, body) =
            send(state_with(None), test::TestRequest::get().uri("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Bytes::from_static(LIVENESS_MESSAGE.as_bytes()));
        assert_eq!(header(&headers, ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }

    #[actix_web::test]
    async fn test_data_returns_nested_percentages() {
        let (status, headers, body) = send(
            state_with(Some(single_tag_table())),
            test::TestRequest::get().uri("/data"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"2020": {"python": 100.0}}));
        assert_eq!(
            header(&headers, ACCESS_CONTROL_ALLOW_METHODS),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            header(&headers, ACCESS_CONTROL_ALLOW_HEADERS),
            "Content-Type, Authorization"
        );
    }

    #[actix_web::test]
    async fn test_data_without_table_is_error() {
        let (status, headers, body) =
            send(state_with(None), test::TestRequest::get().uri("/data")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(header(&headers, ACCESS_CONTROL_ALLOW_ORIGIN), "*");
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let message = json["error"].as_str().unwrap();
        assert!(message.contains("stackoverflow_data.csv"));
    }

    #[actix_web::test]
    async fn test_unparseable_only_dataset_is_error() {
        let dataset = DatasetLoader::default()
            .load_content("Question,Tag,Published Date\nWhat?,python,not-a-date\n")
            .unwrap();
        let (status, _, _) = send(
            state_with(Some(dataset.table)),
            test::TestRequest::get().uri("/data"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_cross_origin_request_gets_wildcard() {
        let (status, headers, _) = send(
            state_with(Some(single_tag_table())),
            test::TestRequest::get()
                .uri("/data")
                .insert_header(("Origin", "https://dashboard.example.com")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(header(&headers, ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }

    #[actix_web::test]
    async fn test_preflight_is_accepted() {
        let (status, headers, _) = send(
            state_with(None),
            test::TestRequest::default()
                .method(actix_web::http::Method::OPTIONS)
                .uri("/data")
                .insert_header(("Origin", "https://dashboard.example.com"))
                .insert_header(("Access-Control-Request-Method", "GET"))
                .insert_header(("Access-Control-Request-Headers", "content-type")),
        )
        .await;

        assert!(status.is_success());
        assert_eq!(header(&headers, ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }
}
