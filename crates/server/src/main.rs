// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use leadbook_api::{
    ApiError, AuthenticatedActor, CREATE_LIMIT, CREATE_WINDOW, CreateLeadRequest,
    CreateLeadResponse, DeleteLeadResponse, EXPORT_CONTENT_DISPOSITION, EXPORT_CONTENT_TYPE,
    ExportLeadsRequest, ImportLeadsRequest, ImportLeadsResponse, ImportRowError,
    LeadDetailResponse, ListLeadsRequest, ListLeadsResponse, RateLimiter, UpdateLeadRequest,
    UpdateLeadResponse, create_lead, decode_csv_rows, delete_lead, export_leads, get_lead_detail,
    import_leads, list_leads, update_lead,
};
use leadbook_domain::RawLeadInput;
use leadbook_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Leadbook Server - HTTP server for the Leadbook buyer-lead CRM
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, and the process-wide creation limiter.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for lead records and change history.
    persistence: Arc<Mutex<Persistence>>,
    /// The per-actor lead creation rate limiter.
    limiter: Arc<RateLimiter>,
}

/// API response for the liveness probe.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct HealthResponse {
    /// Fixed `"ok"` marker.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Field-keyed validation messages, present only on validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field_errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Error response type for the import endpoint.
///
/// Import failures answer with row-keyed entries instead of the flat shape,
/// so a spreadsheet client renders one report whatever the failure was.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ImportErrorResponse {
    /// Always `false`.
    ok: bool,
    /// Per-row failures, with whole-batch failures at row 0.
    errors: Vec<ImportRowError>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Field-keyed validation messages, when the failure is a validation one.
    field_errors: Option<BTreeMap<String, Vec<String>>>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            field_errors: self.field_errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        if let ApiError::Internal { .. } = err {
            error!(error = %err, "Internal error");
        }
        let status: StatusCode = status_for(&err);
        let message: String = err.to_string();
        let field_errors: Option<BTreeMap<String, Vec<String>>> = match err {
            ApiError::ValidationFailed(failures) => Some(failures.into_field_errors()),
            _ => None,
        };
        Self {
            status,
            message,
            field_errors,
        }
    }
}

/// HTTP error wrapper for the import endpoint.
struct ImportHttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The row-keyed failures.
    errors: Vec<ImportRowError>,
}

impl IntoResponse for ImportHttpError {
    fn into_response(self) -> Response {
        let body: Json<ImportErrorResponse> = Json(ImportErrorResponse {
            ok: false,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for ImportHttpError {
    fn from(err: ApiError) -> Self {
        if let ApiError::Internal { .. } = err {
            error!(error = %err, "Internal error");
        }
        let status: StatusCode = status_for(&err);
        Self {
            status,
            errors: err.into_import_errors(),
        }
    }
}

/// Maps an API error onto its HTTP status code.
fn status_for(err: &ApiError) -> StatusCode {
    StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Reads one identity header as an optional string.
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(String::from)
}

/// Resolves the authenticated actor from the identity headers.
///
/// The fronting identity layer injects `x-actor-*` headers after
/// authenticating the caller; a request without an actor id is unauthorized.
fn actor_from_headers(headers: &HeaderMap) -> Result<AuthenticatedActor, ApiError> {
    let Some(id) = header_value(headers, "x-actor-id") else {
        return Err(ApiError::Unauthorized);
    };
    let display_name: Option<String> = header_value(headers, "x-actor-name");
    let email: Option<String> = header_value(headers, "x-actor-email");
    let is_admin: bool =
        header_value(headers, "x-actor-admin").is_some_and(|value| value == "true" || value == "1");
    Ok(AuthenticatedActor::new(id, display_name, email, is_admin))
}

/// Decodes an import body as either a JSON row set or a CSV document.
///
/// The split is on the request content type; anything that is not CSV is
/// read as JSON.
fn decode_import_body(headers: &HeaderMap, body: &str) -> Result<ImportLeadsRequest, ApiError> {
    let content_type: Option<String> = header_value(headers, "content-type");
    if content_type.is_some_and(|value| value.starts_with("text/csv")) {
        let rows: Vec<RawLeadInput> = decode_csv_rows(body)?;
        return Ok(ImportLeadsRequest { rows });
    }
    serde_json::from_str(body).map_err(|err| ApiError::BatchValidationFailed {
        errors: vec![ImportRowError {
            row: 0,
            message: format!("Invalid import body: {err}"),
        }],
    })
}

/// Handler for GET `/leads` endpoint.
///
/// Lists the actor's leads with filters, search, sort, and pagination.
async fn handle_list_leads(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListLeadsRequest>,
) -> Result<Json<ListLeadsResponse>, HttpError> {
    let actor: AuthenticatedActor = actor_from_headers(&headers)?;
    info!(actor_id = %actor.id, "Handling list_leads request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListLeadsResponse = list_leads(&mut persistence, &query, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/leads` endpoint.
///
/// Validates the submission and creates a lead owned by the actor.
async fn handle_create_lead(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateLeadRequest>,
) -> Result<Json<CreateLeadResponse>, HttpError> {
    let actor: AuthenticatedActor = actor_from_headers(&headers)?;
    info!(actor_id = %actor.id, "Handling create_lead request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateLeadResponse =
        create_lead(&mut persistence, &app_state.limiter, req, &actor)?;
    drop(persistence);

    info!(lead_id = %response.id, "Successfully created lead");
    Ok(Json(response))
}

/// Handler for GET `/leads/{lead_id}` endpoint.
///
/// Returns the lead with its most recent changes, newest first.
async fn handle_get_lead(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(lead_id): Path<String>,
) -> Result<Json<LeadDetailResponse>, HttpError> {
    let actor: AuthenticatedActor = actor_from_headers(&headers)?;
    info!(actor_id = %actor.id, lead_id = %lead_id, "Handling get_lead request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LeadDetailResponse = get_lead_detail(&mut persistence, &lead_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/leads/{lead_id}` endpoint.
///
/// Rewrites the lead when the submitted freshness token still matches the
/// stored record.
async fn handle_update_lead(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(lead_id): Path<String>,
    Json(req): Json<UpdateLeadRequest>,
) -> Result<Json<UpdateLeadResponse>, HttpError> {
    let actor: AuthenticatedActor = actor_from_headers(&headers)?;
    info!(actor_id = %actor.id, lead_id = %lead_id, "Handling update_lead request");

    let mut persistence = app_state.persistence.lock().await;
    let response: UpdateLeadResponse = update_lead(&mut persistence, &lead_id, req, &actor)?;
    drop(persistence);

    info!(lead_id = %response.id, "Successfully updated lead");
    Ok(Json(response))
}

/// Handler for DELETE `/leads/{lead_id}` endpoint.
///
/// Removes the lead along with its change history.
async fn handle_delete_lead(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(lead_id): Path<String>,
) -> Result<Json<DeleteLeadResponse>, HttpError> {
    let actor: AuthenticatedActor = actor_from_headers(&headers)?;
    info!(actor_id = %actor.id, lead_id = %lead_id, "Handling delete_lead request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteLeadResponse = delete_lead(&mut persistence, &lead_id, &actor)?;
    drop(persistence);

    info!(lead_id = %response.id, "Successfully deleted lead");
    Ok(Json(response))
}

/// Handler for POST `/leads/import` endpoint.
///
/// Accepts a JSON row set or a raw CSV document and inserts the batch
/// atomically.
async fn handle_import_leads(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ImportLeadsResponse>, ImportHttpError> {
    let actor: AuthenticatedActor = actor_from_headers(&headers)?;
    info!(actor_id = %actor.id, "Handling import_leads request");

    let request: ImportLeadsRequest = decode_import_body(&headers, &body)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ImportLeadsResponse = import_leads(&mut persistence, request, &actor)?;
    drop(persistence);

    info!(inserted = response.inserted, "Successfully imported leads");
    Ok(Json(response))
}

/// Handler for GET `/leads/export` endpoint.
///
/// Returns the actor's filtered leads as a CSV download.
async fn handle_export_leads(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<ExportLeadsRequest>,
) -> Result<Response, HttpError> {
    let actor: AuthenticatedActor = actor_from_headers(&headers)?;
    info!(actor_id = %actor.id, "Handling export_leads request");

    let mut persistence = app_state.persistence.lock().await;
    let document: String = export_leads(&mut persistence, &query, &actor)?;
    drop(persistence);

    let download_headers = [
        (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE),
        (header::CONTENT_DISPOSITION, EXPORT_CONTENT_DISPOSITION),
    ];
    Ok((download_headers, document).into_response())
}

/// Handler for GET `/health` endpoint.
///
/// Answers once the store lock is reachable, without touching any table.
async fn handle_health(AxumState(app_state): AxumState<AppState>) -> Json<HealthResponse> {
    let persistence = app_state.persistence.lock().await;
    drop(persistence);

    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/leads", get(handle_list_leads))
        .route("/leads", post(handle_create_lead))
        .route("/leads/import", post(handle_import_leads))
        .route("/leads/export", get(handle_export_leads))
        .route("/leads/{lead_id}", get(handle_get_lead))
        .route("/leads/{lead_id}", put(handle_update_lead))
        .route("/leads/{lead_id}", delete(handle_delete_lead))
        .route("/health", get(handle_health))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Leadbook Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        limiter: Arc::new(RateLimiter::new(CREATE_LIMIT, CREATE_WINDOW)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            limiter: Arc::new(RateLimiter::new(CREATE_LIMIT, CREATE_WINDOW)),
        }
    }

    /// Helper to build a complete, valid lead submission body.
    fn create_lead_body() -> Value {
        json!({
            "fullName": "Asha Kapoor",
            "email": "asha.kapoor@example.com",
            "phone": "9876543210",
            "city": "Chandigarh",
            "propertyType": "Apartment",
            "bhk": "2",
            "purpose": "Buy",
            "budgetMin": 5_000_000,
            "budgetMax": 7_000_000,
            "timeline": "0-3m",
            "source": "Website",
            "notes": "Prefers a corner unit",
            "tags": ["urgent"]
        })
    }

    /// Helper to build a request authenticated as the given actor.
    fn authed_request(method: &str, uri: &str, actor_id: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-actor-id", actor_id)
            .body(body)
            .unwrap()
    }

    /// Helper to build a request authenticated as an admin actor.
    fn admin_request(method: &str, uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-actor-id", "admin-9")
            .header("x-actor-admin", "true")
            .body(body)
            .unwrap()
    }

    /// Helper to read a response body as JSON.
    async fn read_json(response: Response) -> Value {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body_bytes).expect("Response body was not JSON")
    }

    /// Helper to read a response body as text.
    async fn read_text(response: Response) -> String {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        String::from_utf8(body_bytes.to_vec()).expect("Response body was not UTF-8")
    }

    /// Helper to create one lead through the API, returning its id.
    async fn create_test_lead(app: &Router, actor_id: &str, body: &Value) -> String {
        let response = app
            .clone()
            .oneshot(authed_request(
                "POST",
                "/leads",
                actor_id,
                Body::from(body.to_string()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let created: Value = read_json(response).await;
        created["id"]
            .as_str()
            .expect("Create response had no id")
            .to_string()
    }

    #[tokio::test]
    async fn test_request_without_actor_id_is_unauthorized() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/leads")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);

        let body: Value = read_json(response).await;
        assert_eq!(body["error"], json!(true));
        assert_eq!(body["message"], json!("Unauthorized"));
    }

    #[tokio::test]
    async fn test_blank_actor_id_is_unauthorized() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/leads")
                    .header("x-actor-id", "")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_health_needs_no_identity() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body: Value = read_json(response).await;
        assert_eq!(body["status"], json!("ok"));
    }

    #[tokio::test]
    async fn test_create_and_fetch_round_trip() {
        let app: Router = build_router(create_test_app_state());

        let lead_id: String = create_test_lead(&app, "agent-1", &create_lead_body()).await;
        assert_eq!(lead_id.len(), 32);

        let response = app
            .oneshot(authed_request(
                "GET",
                &format!("/leads/{lead_id}"),
                "agent-1",
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body: Value = read_json(response).await;
        assert_eq!(body["lead"]["id"], json!(lead_id));
        assert_eq!(body["lead"]["ownerId"], json!("agent-1"));
        assert_eq!(body["lead"]["fullName"], json!("Asha Kapoor"));
        assert_eq!(body["lead"]["bhk"], json!("2"));
        assert_eq!(body["history"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_create_with_bad_submission_reports_field_errors() {
        let app: Router = build_router(create_test_app_state());

        let mut body: Value = create_lead_body();
        body["phone"] = json!(null);

        let response = app
            .oneshot(authed_request(
                "POST",
                "/leads",
                "agent-1",
                Body::from(body.to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

        let report: Value = read_json(response).await;
        assert_eq!(report["error"], json!(true));
        assert_eq!(
            report["message"],
            json!("Validation failed: Phone is required")
        );
        assert_eq!(report["fieldErrors"]["phone"][0], json!("Phone is required"));
    }

    #[tokio::test]
    async fn test_create_rate_limit_answers_429() {
        let app: Router = build_router(create_test_app_state());

        for _ in 0..CREATE_LIMIT {
            let response = app
                .clone()
                .oneshot(authed_request(
                    "POST",
                    "/leads",
                    "agent-1",
                    Body::from(create_lead_body().to_string()),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), HttpStatusCode::OK);
        }

        let response = app
            .oneshot(authed_request(
                "POST",
                "/leads",
                "agent-1",
                Body::from(create_lead_body().to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::TOO_MANY_REQUESTS);

        let report: Value = read_json(response).await;
        assert_eq!(
            report["message"],
            json!("Rate limit exceeded. Try again soon.")
        );
    }

    #[tokio::test]
    async fn test_list_scopes_to_the_calling_agent() {
        let app: Router = build_router(create_test_app_state());

        create_test_lead(&app, "agent-1", &create_lead_body()).await;

        let mut second: Value = create_lead_body();
        second["fullName"] = json!("Rohan Mehta");
        second["phone"] = json!("8800112233");
        second["city"] = json!("Zirakpur");
        create_test_lead(&app, "agent-2", &second).await;

        let response = app
            .clone()
            .oneshot(authed_request("GET", "/leads", "agent-1", Body::empty()))
            .await
            .unwrap();
        let listing: Value = read_json(response).await;
        assert_eq!(listing["total"], json!(1));
        assert_eq!(listing["items"][0]["ownerId"], json!("agent-1"));

        let response = app
            .oneshot(admin_request("GET", "/leads", Body::empty()))
            .await
            .unwrap();
        let listing: Value = read_json(response).await;
        assert_eq!(listing["total"], json!(2));
    }

    #[tokio::test]
    async fn test_list_reads_filters_from_the_query_string() {
        let app: Router = build_router(create_test_app_state());

        create_test_lead(&app, "agent-1", &create_lead_body()).await;

        let mut second: Value = create_lead_body();
        second["fullName"] = json!("Rohan Mehta");
        second["phone"] = json!("8800112233");
        second["city"] = json!("Zirakpur");
        create_test_lead(&app, "agent-1", &second).await;

        let response = app
            .clone()
            .oneshot(authed_request(
                "GET",
                "/leads?city=Zirakpur&pageSize=10",
                "agent-1",
                Body::empty(),
            ))
            .await
            .unwrap();
        let listing: Value = read_json(response).await;
        assert_eq!(listing["total"], json!(1));
        assert_eq!(listing["items"][0]["city"], json!("Zirakpur"));

        let response = app
            .oneshot(authed_request(
                "GET",
                "/leads?q=8800",
                "agent-1",
                Body::empty(),
            ))
            .await
            .unwrap();
        let listing: Value = read_json(response).await;
        assert_eq!(listing["items"][0]["fullName"], json!("Rohan Mehta"));
    }

    #[tokio::test]
    async fn test_fetching_a_foreign_lead_is_forbidden() {
        let app: Router = build_router(create_test_app_state());

        let lead_id: String = create_test_lead(&app, "agent-1", &create_lead_body()).await;

        let response = app
            .oneshot(authed_request(
                "GET",
                &format!("/leads/{lead_id}"),
                "agent-2",
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);

        let body: Value = read_json(response).await;
        assert_eq!(body["message"], json!("Forbidden"));
    }

    #[tokio::test]
    async fn test_admin_flag_accepts_numeric_truth() {
        let app: Router = build_router(create_test_app_state());

        let lead_id: String = create_test_lead(&app, "agent-1", &create_lead_body()).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/leads/{lead_id}"))
                    .header("x-actor-id", "admin-9")
                    .header("x-actor-admin", "1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_fetching_an_unknown_lead_is_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(authed_request(
                "GET",
                "/leads/no-such-record",
                "agent-1",
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);

        let body: Value = read_json(response).await;
        assert_eq!(body["message"], json!("Not found"));
    }

    #[tokio::test]
    async fn test_update_round_trip_with_fresh_token() {
        let app: Router = build_router(create_test_app_state());

        let lead_id: String = create_test_lead(&app, "agent-1", &create_lead_body()).await;

        let response = app
            .clone()
            .oneshot(authed_request(
                "GET",
                &format!("/leads/{lead_id}"),
                "agent-1",
                Body::empty(),
            ))
            .await
            .unwrap();
        let detail: Value = read_json(response).await;
        let token: i64 = detail["lead"]["updatedAt"]
            .as_i64()
            .expect("missing updatedAt");

        let mut body: Value = create_lead_body();
        body["phone"] = json!("9998887776");
        body["updatedAt"] = json!(token);

        let response = app
            .clone()
            .oneshot(authed_request(
                "PUT",
                &format!("/leads/{lead_id}"),
                "agent-1",
                Body::from(body.to_string()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let updated: Value = read_json(response).await;
        assert_eq!(updated["message"], json!("Lead updated"));

        let response = app
            .oneshot(authed_request(
                "GET",
                &format!("/leads/{lead_id}"),
                "agent-1",
                Body::empty(),
            ))
            .await
            .unwrap();
        let detail: Value = read_json(response).await;
        assert_eq!(detail["lead"]["phone"], json!("9998887776"));
        assert_eq!(detail["history"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_update_with_stale_token_conflicts() {
        let app: Router = build_router(create_test_app_state());

        let lead_id: String = create_test_lead(&app, "agent-1", &create_lead_body()).await;

        let mut body: Value = create_lead_body();
        body["updatedAt"] = json!(1);

        let response = app
            .oneshot(authed_request(
                "PUT",
                &format!("/leads/{lead_id}"),
                "agent-1",
                Body::from(body.to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::CONFLICT);

        let report: Value = read_json(response).await;
        assert_eq!(report["message"], json!("Record changed, please refresh."));
    }

    #[tokio::test]
    async fn test_updating_a_foreign_lead_is_forbidden() {
        let app: Router = build_router(create_test_app_state());

        let lead_id: String = create_test_lead(&app, "agent-1", &create_lead_body()).await;

        let mut body: Value = create_lead_body();
        body["updatedAt"] = json!(0);

        let response = app
            .oneshot(authed_request(
                "PUT",
                &format!("/leads/{lead_id}"),
                "agent-2",
                Body::from(body.to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_delete_removes_the_lead() {
        let app: Router = build_router(create_test_app_state());

        let lead_id: String = create_test_lead(&app, "agent-1", &create_lead_body()).await;

        let response = app
            .clone()
            .oneshot(authed_request(
                "DELETE",
                &format!("/leads/{lead_id}"),
                "agent-1",
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let deleted: Value = read_json(response).await;
        assert_eq!(deleted["message"], json!("Lead deleted"));

        let response = app
            .oneshot(authed_request(
                "GET",
                &format!("/leads/{lead_id}"),
                "agent-1",
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_import_accepts_a_json_row_set() {
        let app: Router = build_router(create_test_app_state());

        let mut second: Value = create_lead_body();
        second["fullName"] = json!("Rohan Mehta");
        second["phone"] = json!("8800112233");
        let rows: Value = json!({ "rows": [create_lead_body(), second] });

        let response = app
            .clone()
            .oneshot(authed_request(
                "POST",
                "/leads/import",
                "agent-1",
                Body::from(rows.to_string()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let report: Value = read_json(response).await;
        assert_eq!(report["ok"], json!(true));
        assert_eq!(report["inserted"], json!(2));

        let response = app
            .oneshot(authed_request("GET", "/leads", "agent-1", Body::empty()))
            .await
            .unwrap();
        let listing: Value = read_json(response).await;
        assert_eq!(listing["total"], json!(2));
    }

    #[tokio::test]
    async fn test_import_accepts_a_csv_document() {
        let app: Router = build_router(create_test_app_state());

        let csv: &str = "fullName,phone,city,propertyType,purpose,timeline,source\n\
                         Meera Nair,7700997788,Mohali,Plot,Buy,>6m,Referral\n";

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/leads/import")
                    .header("content-type", "text/csv")
                    .header("x-actor-id", "agent-1")
                    .body(Body::from(csv))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let report: Value = read_json(response).await;
        assert_eq!(report["inserted"], json!(1));

        let response = app
            .oneshot(authed_request(
                "GET",
                "/leads?q=Meera",
                "agent-1",
                Body::empty(),
            ))
            .await
            .unwrap();
        let listing: Value = read_json(response).await;
        assert_eq!(listing["total"], json!(1));
    }

    #[tokio::test]
    async fn test_import_without_identity_reports_at_row_zero() {
        let app: Router = build_router(create_test_app_state());

        let rows: Value = json!({ "rows": [create_lead_body()] });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/leads/import")
                    .header("content-type", "application/json")
                    .body(Body::from(rows.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);

        let report: Value = read_json(response).await;
        assert_eq!(report["ok"], json!(false));
        assert_eq!(report["errors"][0]["row"], json!(0));
        assert_eq!(report["errors"][0]["message"], json!("Unauthorized"));
    }

    #[tokio::test]
    async fn test_import_reports_spreadsheet_row_numbers() {
        let app: Router = build_router(create_test_app_state());

        let mut bad: Value = create_lead_body();
        bad["phone"] = json!(null);
        let rows: Value = json!({ "rows": [create_lead_body(), bad] });

        let response = app
            .clone()
            .oneshot(authed_request(
                "POST",
                "/leads/import",
                "agent-1",
                Body::from(rows.to_string()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let report: Value = read_json(response).await;
        assert_eq!(report["ok"], json!(false));
        assert_eq!(report["errors"][0]["row"], json!(3));
        assert_eq!(report["errors"][0]["message"], json!("Phone is required"));

        // A failing batch inserts nothing
        let response = app
            .oneshot(authed_request("GET", "/leads", "agent-1", Body::empty()))
            .await
            .unwrap();
        let listing: Value = read_json(response).await;
        assert_eq!(listing["total"], json!(0));
    }

    #[tokio::test]
    async fn test_import_with_an_unreadable_body_reports_at_row_zero() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(authed_request(
                "POST",
                "/leads/import",
                "agent-1",
                Body::from("not a row set"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let report: Value = read_json(response).await;
        assert_eq!(report["errors"][0]["row"], json!(0));
        assert!(
            report["errors"][0]["message"]
                .as_str()
                .is_some_and(|message| message.starts_with("Invalid import body"))
        );
    }

    #[tokio::test]
    async fn test_export_answers_with_a_csv_download() {
        let app: Router = build_router(create_test_app_state());

        create_test_lead(&app, "agent-1", &create_lead_body()).await;

        let response = app
            .oneshot(authed_request(
                "GET",
                "/leads/export",
                "agent-1",
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("content-type")
                .map(|value| value.to_str().unwrap()),
            Some("text/csv; charset=utf-8")
        );
        assert_eq!(
            response
                .headers()
                .get("content-disposition")
                .map(|value| value.to_str().unwrap()),
            Some("attachment; filename=buyers.csv")
        );

        let document: String = read_text(response).await;
        assert!(document.starts_with("\"fullName\",\"email\",\"phone\""));
        assert!(document.contains("\"Asha Kapoor\""));
    }

    #[tokio::test]
    async fn test_export_without_identity_is_unauthorized() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/leads/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }
}
