use std::sync::Arc;

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, FromRequest, State};
use axum::http::{header, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use error::{Error, Failure};
use store::EmployeeStore;
use structs::api;
use structs::employee::Documents;
use uploads::UploadDirectory;

pub mod coercion;
pub mod configuration;
pub mod error;
pub mod onboarding;
pub mod store;
pub mod structs;
pub mod telemetry;
pub mod uploads;

/// Shared by every request: the record store and the uploads directory.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EmployeeStore>,
    pub uploads: UploadDirectory,
}

impl AppState {
    pub fn new(store: Arc<dyn EmployeeStore>, uploads: UploadDirectory) -> Self {
        AppState { store, uploads }
    }
}

#[tracing::instrument(name = "health check", skip_all)]
async fn health_check(State(state): State<AppState>) -> Json<api::HealthBody> {
    Json(api::HealthBody {
        ok: true,
        db: state.store.connection_state().code(),
    })
}

#[tracing::instrument(name = "onboard employee", skip_all)]
async fn onboard(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<(StatusCode, Json<api::CreatedBody>), Failure> {
    let bad_request = |error: Error| error.with_status(StatusCode::BAD_REQUEST);

    let (form, documents) = if onboarding::is_json(request.headers()) {
        let Json(form) = Json::<api::OnboardForm>::from_request(request, &state)
            .await
            .map_err(|rejection| bad_request(Error::BadRequest(rejection.body_text())))?;
        (form, Documents::default())
    } else {
        onboarding::read_multipart(request, &state.uploads)
            .await
            .map_err(bad_request)?
    };
    let employee = form
        .into_employee(documents, chrono::Utc::now())
        .map_err(bad_request)?;
    let id = state.store.insert(employee).await.map_err(bad_request)?;

    tracing::info!(%id, "employee onboarded");
    Ok((
        StatusCode::CREATED,
        Json(api::CreatedBody {
            ok: true,
            id: id.to_hex(),
        }),
    ))
}

#[tracing::instrument(name = "list employees", skip_all)]
async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<api::EmployeeListItem>>, Failure> {
    let summaries = state
        .store
        .list_summaries()
        .await
        .map_err(|error| error.with_status(StatusCode::INTERNAL_SERVER_ERROR))?;

    Ok(Json(
        summaries
            .into_iter()
            .map(api::EmployeeListItem::from)
            .collect(),
    ))
}

pub async fn run(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, app(state)).await
}

pub fn app(state: AppState) -> Router {
    let uploaded_files = ServeDir::new(state.uploads.root());

    Router::new()
        .route("/health", get(health_check))
        .route("/api/onboard", post(onboard))
        .route("/api/employees", get(list_employees))
        .nest_service(uploads::PUBLIC_PREFIX, uploaded_files)
        .layer(DefaultBodyLimit::disable())
        .layer(
            ServiceBuilder::new()
                .layer(SetSensitiveRequestHeadersLayer::new([
                    header::AUTHORIZATION,
                    header::COOKIE,
                ]))
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "http.request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
