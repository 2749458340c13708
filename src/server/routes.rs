//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::constants::session::SESSION_HEADER;
use crate::coord::Coordinates;
use crate::error::Error;
use crate::form::{use_my_location, SearchForm};
use crate::geo::Geocoder;
use crate::map::MapView;
use crate::results::{SearchResponse, SortKey, ViewMode};
use crate::search::{available_categories, Category, SearchOrchestrator, SearchSettings};
use crate::server::state::AppState;
use crate::session::PageSession;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use uuid::Uuid;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/client-config", get(client_config_handler))
        .route("/api/search", post(search_handler))
        .route("/api/session", get(session_handler))
        .route("/api/session/view", put(session_view_handler))
        .route("/api/map", get(map_handler))
        .route("/api/geolocate", post(geolocate_handler))
        .fallback_service(ServeDir::new(static_dir()).append_index_html_on_directories(true))
        .with_state(state)
}

/// Static files path
///
/// Relative to cwd first, then next to the executable.
fn static_dir() -> PathBuf {
    let local = PathBuf::from("static");
    if local.exists() {
        return local;
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("static")))
        .filter(|path| path.exists())
        .unwrap_or(local)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::EmptyAddress => (StatusCode::BAD_REQUEST, "EMPTY_ADDRESS"),
            Error::MissingCategory => (StatusCode::BAD_REQUEST, "MISSING_CATEGORY"),
            Error::InvalidCategory(_) => (StatusCode::BAD_REQUEST, "INVALID_CATEGORY"),
            Error::InvalidCoordinates(_) => (StatusCode::BAD_REQUEST, "INVALID_COORDINATES"),
            Error::ImpreciseLocation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "IMPRECISE_LOCATION"),
            Error::LocationNotFound(_) => (StatusCode::UNPROCESSABLE_ENTITY, "LOCATION_NOT_FOUND"),
            Error::AddressNotFound { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ADDRESS_NOT_FOUND")
            }
            Error::Superseded => (StatusCode::CONFLICT, "SUPERSEDED"),
            Error::MissingSession => (StatusCode::BAD_REQUEST, "MISSING_SESSION"),
            Error::Vendor { .. } | Error::Http(_) | Error::Json(_) => {
                (StatusCode::BAD_GATEWAY, "SEARCH_FAILED")
            }
            Error::MapUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "MAP_UNAVAILABLE"),
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            Error::Io(_) | Error::Server(_) | Error::Geo(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };
        ApiError {
            error: err.user_message(),
            code: code.to_string(),
            status,
        }
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub slug: String,
    pub keyword: String,
}

impl From<Category> for CategoryInfo {
    fn from(category: Category) -> Self {
        Self {
            name: category.display_name().to_string(),
            slug: category.slug().to_string(),
            keyword: category.keyword().to_string(),
        }
    }
}

/// Categories list response
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

/// List searchable categories
///
/// GET /api/categories
async fn categories_handler() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: available_categories().into_iter().map(Into::into).collect(),
    })
}

/// Settings the front end needs before its first render
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientConfigResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_js_key: Option<String>,
    pub default_center: Coordinates,
    pub debounce_ms: u64,
    pub categories: Vec<String>,
}

/// GET /api/client-config
async fn client_config_handler(State(state): State<Arc<AppState>>) -> Json<ClientConfigResponse> {
    let config = state.config.read().await;
    Json(ClientConfigResponse {
        maps_js_key: config.maps_js_key(),
        default_center: config.default_map_center(),
        debounce_ms: config.search.debounce_ms,
        categories: available_categories()
            .into_iter()
            .map(|c| c.display_name().to_string())
            .collect(),
    })
}

/// Search request body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub address: String,
    /// Display name or slug
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

/// Page-load id from the session header
fn session_id(headers: &HeaderMap) -> crate::error::Result<Uuid> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .ok_or(Error::MissingSession)
}

/// Run the full form flow and store the outcome in the caller's session
///
/// POST /api/search
async fn search_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let id = session_id(&headers)?;
    let config = state.config.read().await.clone();

    // Input problems never reach the vendor
    let form = match parse_form(req.address, req.category.as_deref()) {
        Ok(form) => form,
        Err(e) => return Err(reject(&state, id, e).await),
    };
    if let Err(e) = form.validate() {
        return Err(reject(&state, id, e).await);
    }

    let client = match state.google() {
        Ok(client) => client,
        Err(e) => return Err(reject(&state, id, e).await),
    };
    let geocoder = Geocoder::new(client, config.search.country.clone());

    let debouncer = state.debouncer(id).await;
    let submission = match form.submit(&geocoder, &debouncer).await {
        Ok(submission) => submission,
        // The newer submission from this page owns the session now
        Err(Error::Superseded) => return Err(Error::Superseded.into()),
        Err(e) => return Err(reject(&state, id, e).await),
    };

    state.with_session(id, PageSession::begin_search).await;

    let orchestrator = SearchOrchestrator::new(client, SearchSettings::from(&config.search));
    let outcome = orchestrator.search(&submission.query).await;

    let sort = state
        .with_session(id, |session| {
            session.complete(&outcome);
            if let Some(sort) = req.sort {
                session.set_sort(sort);
            }
            session.sort
        })
        .await;

    let results = outcome?;
    Ok(Json(SearchResponse::new(
        submission.query,
        Some(submission.resolved.display_name),
        &results,
        sort,
    )))
}

/// Record a failure that stopped a search before dispatch
async fn reject(state: &AppState, id: Uuid, err: Error) -> ApiError {
    state.with_session(id, |session| session.reject(&err)).await;
    err.into()
}

fn parse_form(address: String, category: Option<&str>) -> crate::error::Result<SearchForm> {
    let category = match category.map(str::trim).filter(|c| !c.is_empty()) {
        Some(name) => Some(name.parse::<Category>()?),
        None => None,
    };
    Ok(SearchForm::new(address, category))
}

/// Caller's session with results in the selected order
///
/// GET /api/session
async fn session_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<PageSession>, ApiError> {
    let id = session_id(&headers)?;
    Ok(Json(state.with_session(id, |session| session.snapshot()).await))
}

/// View/sort toggle request
#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    #[serde(default)]
    pub view: Option<ViewMode>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

/// Change view or sort without searching again
///
/// PUT /api/session/view
async fn session_view_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ViewRequest>,
) -> Result<Json<PageSession>, ApiError> {
    let id = session_id(&headers)?;
    let session = state
        .with_session(id, |session| {
            if let Some(view) = req.view {
                session.set_view(view);
            }
            if let Some(sort) = req.sort {
                session.set_sort(sort);
            }
            session.snapshot()
        })
        .await;
    Ok(Json(session))
}

/// Map view for the caller's results in their selected order
///
/// GET /api/map
async fn map_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MapView>, ApiError> {
    let id = session_id(&headers)?;
    let results = state.with_session(id, |session| session.sorted_results()).await;
    let config = state.config.read().await;
    let key = config.maps_js_key();

    Ok(Json(MapView::build(&results, &config.map, key.as_deref())?))
}

/// Geolocate request body
#[derive(Debug, Deserialize)]
pub struct GeolocateRequest {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeolocateResponse {
    pub address: String,
}

/// Formatted address for the device position
///
/// POST /api/geolocate
async fn geolocate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GeolocateRequest>,
) -> Result<Json<GeolocateResponse>, ApiError> {
    let position = Coordinates::new(req.lat, req.lng);
    position.validate()?;

    let country = state.config.read().await.search.country.clone();
    let geocoder = Geocoder::new(state.google()?, country);
    let address = use_my_location(&geocoder, position).await?;

    Ok(Json(GeolocateResponse { address }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::google::GoogleMapsClient;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;
    use wiremock::matchers::{any, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> Config {
        let mut config = Config::default();
        config.search.debounce_ms = 0;
        config.api_keys.google = "test-key".to_string();
        config
    }

    /// Page-load id used by tests that act as a single browser
    const CLIENT: &str = "6f1c2a9e-4b7d-4f0a-9d53-2f8e1c7b5a10";

    fn create_app_with(server: &MockServer, config: Config) -> Router {
        let client = GoogleMapsClient::with_base_url("test-key", 5, &server.uri()).unwrap();
        create_router(Arc::new(AppState::with_client(config, client)))
    }

    fn create_test_app(server: &MockServer) -> Router {
        create_app_with(server, test_config())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::body::Bytes) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    async fn get_json<T: DeserializeOwned>(app: &Router, uri: &str) -> (StatusCode, T) {
        get_json_as(app, CLIENT, uri).await
    }

    async fn get_json_as<T: DeserializeOwned>(
        app: &Router,
        client: &str,
        uri: &str,
    ) -> (StatusCode, T) {
        let request = Request::builder()
            .uri(uri)
            .header(SESSION_HEADER, client)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn send_json<T: DeserializeOwned>(
        app: &Router,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, T) {
        send_json_as(app, CLIENT, method, uri, body).await
    }

    async fn send_json_as<T: DeserializeOwned>(
        app: &Router,
        client: &str,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, T) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .header(SESSION_HEADER, client)
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = send(app, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn mount_precise_geocode(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .and(query_param("address", "10 Downing Street, London"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [{
                    "formatted_address": "10 Downing St, London SW1A 2AA, UK",
                    "geometry": {"location": {"lat": 51.5034, "lng": -0.1276}},
                    "types": ["premise"]
                }]
            })))
            .mount(server)
            .await;
    }

    fn nearby_body(ids: &[(&str, f64)]) -> serde_json::Value {
        let results: Vec<_> = ids
            .iter()
            .map(|(id, lat)| {
                serde_json::json!({
                    "place_id": id,
                    "name": format!("Clinic {}", id),
                    "vicinity": "Soho, London",
                    "geometry": {"location": {"lat": lat, "lng": -0.1276}}
                })
            })
            .collect();
        serde_json::json!({"status": "OK", "results": results})
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let server = MockServer::start().await;
        let app = create_test_app(&server);

        let (status, body): (_, StatusResponse) = get_json(&app, "/api/status").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.running);
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_categories_endpoint() {
        let server = MockServer::start().await;
        let app = create_test_app(&server);

        let (status, body): (_, CategoriesResponse) = get_json(&app, "/api/categories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.categories.len(), 5);
        assert_eq!(body.categories[0].name, "Bars and Clubs");
        assert_eq!(body.categories[3].slug, "sexual-health-centres");
    }

    #[tokio::test]
    async fn test_client_config_endpoint() {
        let server = MockServer::start().await;
        let app = create_test_app(&server);

        let (status, body): (_, ClientConfigResponse) = get_json(&app, "/api/client-config").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.maps_js_key.as_deref(), Some("test-key"));
        assert_eq!(body.default_center, Coordinates::new(51.5074, -0.1278));
        assert_eq!(body.debounce_ms, 0);
        assert_eq!(body.categories.len(), 5);
    }

    #[tokio::test]
    async fn test_search_empty_address_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        let app = create_test_app(&server);

        let (status, err): (_, ApiError) = send_json(
            &app,
            "POST",
            "/api/search",
            serde_json::json!({"address": "  ", "category": "Sports"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "EMPTY_ADDRESS");
        assert_eq!(err.error, "Please enter a location");

        let (_, session): (_, PageSession) = get_json(&app, "/api/session").await;
        assert_eq!(session.error.as_deref(), Some("Please enter a location"));
        assert!(!session.has_searched);
    }

    #[tokio::test]
    async fn test_search_category_errors() {
        let server = MockServer::start().await;
        let app = create_test_app(&server);

        let (status, err): (_, ApiError) = send_json(
            &app,
            "POST",
            "/api/search",
            serde_json::json!({"address": "SW1A 2AA"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "MISSING_CATEGORY");

        let (status, err): (_, ApiError) = send_json(
            &app,
            "POST",
            "/api/search",
            serde_json::json!({"address": "SW1A 2AA", "category": "Karaoke"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_CATEGORY");
    }

    #[tokio::test]
    async fn test_search_imprecise_location() {
        let server = MockServer::start().await;
        Mock::given(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [{
                    "formatted_address": "London, UK",
                    "geometry": {"location": {"lat": 51.5072, "lng": -0.1276}},
                    "types": ["locality", "political"]
                }]
            })))
            .mount(&server)
            .await;
        let app = create_test_app(&server);

        let (status, err): (_, ApiError) = send_json(
            &app,
            "POST",
            "/api/search",
            serde_json::json!({"address": "London", "category": "Sports"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code, "IMPRECISE_LOCATION");
        assert_eq!(err.error, "Please enter a more specific address or postcode");
    }

    #[tokio::test]
    async fn test_search_end_to_end_with_secondary_merge() {
        let server = MockServer::start().await;
        mount_precise_geocode(&server).await;
        Mock::given(path("/place/nearbysearch/json"))
            .and(query_param("type", "establishment"))
            .and(query_param("radius", "50000"))
            .and(query_param(
                "keyword",
                Category::SexualHealthCentres.keyword(),
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(nearby_body(&[("a", 51.52), ("b", 51.51)])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/place/nearbysearch/json"))
            .and(query_param_is_missing("type"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(nearby_body(&[("b", 51.51), ("c", 51.50)])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/place/details/json"))
            .and(query_param("place_id", "a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "result": {"website": "https://clinic-a.example"}
            })))
            .mount(&server)
            .await;
        Mock::given(path("/place/details/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"status": "NOT_FOUND"}),
            ))
            .mount(&server)
            .await;
        let app = create_test_app(&server);

        let (status, response): (_, SearchResponse) = send_json(
            &app,
            "POST",
            "/api/search",
            serde_json::json!({
                "address": "10 Downing Street, London",
                "category": "Sexual Health Centres"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.count, 3);
        assert_eq!(
            response.query.address.as_deref(),
            Some("10 Downing St, London SW1A 2AA, UK")
        );
        assert!(response
            .results
            .iter()
            .all(|r| r.category == "Sexual Health Centres"));
        // Default sort is by distance from the search center
        let ids: Vec<_> = response.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(
            response.results[2].website.as_deref(),
            Some("https://clinic-a.example")
        );
        assert!(response.results[0].website.is_none());

        let (_, session): (_, PageSession) = get_json(&app, "/api/session").await;
        assert!(session.has_searched);
        assert!(!session.loading);
        assert!(session.error.is_none());
        assert_eq!(session.results.len(), 3);
    }

    #[tokio::test]
    async fn test_search_vendor_failure_clears_results() {
        let server = MockServer::start().await;
        mount_precise_geocode(&server).await;
        Mock::given(path("/place/nearbysearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OVER_QUERY_LIMIT",
                "results": []
            })))
            .mount(&server)
            .await;
        let app = create_test_app(&server);

        let (status, err): (_, ApiError) = send_json(
            &app,
            "POST",
            "/api/search",
            serde_json::json!({"address": "10 Downing Street, London", "category": "sports"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.code, "SEARCH_FAILED");
        assert_eq!(err.error, "Unable to search right now. Please try again later.");

        let (_, session): (_, PageSession) = get_json(&app, "/api/session").await;
        assert!(session.results.is_empty());
        assert!(!session.loading);
        assert_eq!(
            session.error.as_deref(),
            Some("Unable to search right now. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_view_toggle_and_map() {
        let server = MockServer::start().await;
        mount_precise_geocode(&server).await;
        Mock::given(path("/place/nearbysearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [
                    {"place_id": "low", "name": "Low", "rating": 3.1,
                     "geometry": {"location": {"lat": 51.50, "lng": -0.12}}},
                    {"place_id": "high", "name": "High", "rating": 4.9,
                     "geometry": {"location": {"lat": 51.53, "lng": -0.14}}}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(path("/place/details/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"status": "OK", "result": {}}),
            ))
            .mount(&server)
            .await;
        let app = create_test_app(&server);

        let (status, _): (_, SearchResponse) = send_json(
            &app,
            "POST",
            "/api/search",
            serde_json::json!({"address": "10 Downing Street, London", "category": "Sports"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, session): (_, PageSession) = send_json(
            &app,
            "PUT",
            "/api/session/view",
            serde_json::json!({"view": "map", "sort": "rating"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session.view, ViewMode::Map);
        assert_eq!(session.results[0].id, "high");

        let (status, map): (_, MapView) = get_json(&app, "/api/map").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(map.markers.len(), 2);
        assert_eq!(map.center, Coordinates::new(51.53, -0.14));
        assert!(map.fit_bounds.is_some());
    }

    #[tokio::test]
    async fn test_map_before_search_uses_default_center() {
        let server = MockServer::start().await;
        let app = create_test_app(&server);

        let (status, map): (_, MapView) = get_json(&app, "/api/map").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(map.center, Coordinates::new(51.5074, -0.1278));
        assert!(map.fit_bounds.is_none());
    }

    #[tokio::test]
    async fn test_geolocate() {
        let server = MockServer::start().await;
        Mock::given(path("/geocode/json"))
            .and(query_param("latlng", "51.5034,-0.1276"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [{
                    "formatted_address": "10 Downing St, London SW1A 2AA, UK",
                    "geometry": {"location": {"lat": 51.5034, "lng": -0.1276}},
                    "types": ["street_address"]
                }]
            })))
            .mount(&server)
            .await;
        let app = create_test_app(&server);

        let (status, body): (_, GeolocateResponse) = send_json(
            &app,
            "POST",
            "/api/geolocate",
            serde_json::json!({"lat": 51.5034, "lng": -0.1276}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.address, "10 Downing St, London SW1A 2AA, UK");
    }

    #[tokio::test]
    async fn test_geolocate_invalid_coordinates() {
        let server = MockServer::start().await;
        let app = create_test_app(&server);

        let (status, err): (_, ApiError) = send_json(
            &app,
            "POST",
            "/api/geolocate",
            serde_json::json!({"lat": 91.0, "lng": 0.0}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_geolocate_no_address() {
        let server = MockServer::start().await;
        Mock::given(path("/geocode/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "ZERO_RESULTS", "results": []})),
            )
            .mount(&server)
            .await;
        let app = create_test_app(&server);

        let (status, err): (_, ApiError) = send_json(
            &app,
            "POST",
            "/api/geolocate",
            serde_json::json!({"lat": 55.0, "lng": -3.0}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error, "Could not find address for this location");
    }

    #[tokio::test]
    async fn test_concurrent_clients_keep_their_own_sessions() {
        let server = MockServer::start().await;
        mount_precise_geocode(&server).await;
        Mock::given(path("/place/nearbysearch/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(nearby_body(&[("shared", 51.51)])),
            )
            .mount(&server)
            .await;
        Mock::given(path("/place/details/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"status": "OK", "result": {}}),
            ))
            .mount(&server)
            .await;
        let mut config = test_config();
        config.search.debounce_ms = 200;
        let app = create_app_with(&server, config);

        let alice = "0b6c8a52-3a51-4e0e-8d2c-64f1f4d1a001";
        let bob = "0b6c8a52-3a51-4e0e-8d2c-64f1f4d1a002";

        // Bob submits while Alice's debounce window is still open
        let alice_search = send_json_as::<serde_json::Value>(
            &app,
            alice,
            "POST",
            "/api/search",
            serde_json::json!({"address": "10 Downing Street, London", "category": "Sports"}),
        );
        let bob_search = async {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            send_json_as::<serde_json::Value>(
                &app,
                bob,
                "POST",
                "/api/search",
                serde_json::json!({
                    "address": "10 Downing Street, London",
                    "category": "Sexual Health Centres"
                }),
            )
            .await
        };
        let ((alice_status, _), (bob_status, _)) = tokio::join!(alice_search, bob_search);

        assert_eq!(alice_status, StatusCode::OK);
        assert_eq!(bob_status, StatusCode::OK);

        let (_, session): (_, PageSession) = get_json_as(&app, alice, "/api/session").await;
        assert_eq!(session.results[0].category, "Sports");
        let (_, session): (_, PageSession) = get_json_as(&app, bob, "/api/session").await;
        assert_eq!(session.results[0].category, "Sexual Health Centres");
    }

    #[tokio::test]
    async fn test_view_toggle_is_per_client() {
        let server = MockServer::start().await;
        let app = create_test_app(&server);
        let other = "0b6c8a52-3a51-4e0e-8d2c-64f1f4d1a003";

        let (_, session): (_, PageSession) = send_json(
            &app,
            "PUT",
            "/api/session/view",
            serde_json::json!({"view": "map"}),
        )
        .await;
        assert_eq!(session.view, ViewMode::Map);

        let (_, session): (_, PageSession) = get_json_as(&app, other, "/api/session").await;
        assert_eq!(session.view, ViewMode::List);
    }

    #[tokio::test]
    async fn test_session_routes_require_session_header() {
        let server = MockServer::start().await;
        let app = create_test_app(&server);

        let (status, body) = send(
            &app,
            Request::builder().uri("/api/session").body(Body::empty()).unwrap(),
        )
        .await;
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "MISSING_SESSION");

        let (status, err): (_, ApiError) = get_json_as(&app, "not-a-uuid", "/api/map").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "MISSING_SESSION");
    }

    #[tokio::test]
    async fn test_search_without_api_key_records_error() {
        let app = create_router(Arc::new(AppState::build(test_config(), None)));

        let (status, err): (_, ApiError) = send_json(
            &app,
            "POST",
            "/api/search",
            serde_json::json!({"address": "10 Downing Street, London", "category": "Sports"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "CONFIG_ERROR");

        let (_, session): (_, PageSession) = get_json(&app, "/api/session").await;
        assert_eq!(session.error, Some(err.error));
        assert!(!session.loading);
    }

    #[test]
    fn test_api_error_statuses() {
        let cases = [
            (Error::Superseded, StatusCode::CONFLICT, "SUPERSEDED"),
            (Error::MissingSession, StatusCode::BAD_REQUEST, "MISSING_SESSION"),
            (
                Error::MapUnavailable("no key".into()),
                StatusCode::SERVICE_UNAVAILABLE,
                "MAP_UNAVAILABLE",
            ),
            (
                Error::Config("bad".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
            (
                Error::LocationNotFound("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "LOCATION_NOT_FOUND",
            ),
        ];
        for (err, status, code) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status, status);
            assert_eq!(api.code, code);
        }
    }
}
