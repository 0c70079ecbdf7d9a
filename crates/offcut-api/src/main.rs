use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use offcut_core::{
    render_svg, CanvasConfig, Inventory, LeftoverCalculator, LeftoverReport, OffcutError,
    PackSnapshot, Packer, PieceRequest, Rectangle,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting Offcut API");

    let app = router();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind to {addr}: {err}");
            std::process::exit(1);
        }
    };

    info!("API server listening on http://{addr}");
    info!("Try: curl http://localhost:{port}/api/health");

    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {err}");
    }
}

fn router() -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/leftovers", post(leftovers))
        .route("/api/pack/add", post(pack_add))
        .route("/api/pack/arrange", post(pack_arrange))
        .route("/api/pack/remove", post(pack_remove))
        .route("/api/generate/svg", post(generate_svg))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Current canvas as held by the caller
#[derive(Deserialize)]
struct CanvasState {
    #[serde(default)]
    canvas: CanvasConfig,
    #[serde(default)]
    rectangles: Vec<Rectangle>,
}

#[derive(Deserialize)]
struct AddRequest {
    #[serde(flatten)]
    state: CanvasState,
    piece: PieceRequest,
}

#[derive(Deserialize)]
struct RemoveRequest {
    #[serde(flatten)]
    state: CanvasState,
    index: usize,
}

#[derive(Serialize)]
struct ArrangeResponse {
    #[serde(flatten)]
    snapshot: PackSnapshot,
    dropped: Vec<Rectangle>,
}

impl CanvasState {
    fn into_packer(self) -> Result<Packer, OffcutError> {
        Packer::with_rectangles(self.canvas, self.rectangles)
    }
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "offcut-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Recomputes every leftover piece from the posted inventory
async fn leftovers(Json(inventory): Json<Inventory>) -> Result<Json<LeftoverReport>, AppError> {
    info!(
        "Received leftover request with {} stock sheets and {} orders",
        inventory.stock.len(),
        inventory.orders.len()
    );

    let report =
        blocking(move || Ok(LeftoverCalculator::from_inventory(&inventory).calculate())).await?;

    info!(
        "Leftover pass complete: {} pieces, {:.4} m² remaining",
        report.summary.total_pieces, report.summary.total_remaining_area
    );

    Ok(Json(report))
}

async fn pack_add(Json(request): Json<AddRequest>) -> Result<Json<PackSnapshot>, AppError> {
    let snapshot = blocking(move || {
        let mut packer = request.state.into_packer()?;
        packer.add_piece(&request.piece)?;

        info!(
            "Piece added: {} on canvas, {}% utilization",
            packer.len(),
            packer.utilization_label()
        );

        Ok(packer.snapshot())
    })
    .await?;

    Ok(Json(snapshot))
}

async fn pack_arrange(Json(state): Json<CanvasState>) -> Result<Json<ArrangeResponse>, AppError> {
    let response = blocking(move || {
        let mut packer = state.into_packer()?;
        let dropped = packer.auto_arrange();

        if !dropped.is_empty() {
            warn!("Auto-arrange dropped {} pieces", dropped.len());
        }

        Ok(ArrangeResponse {
            snapshot: packer.snapshot(),
            dropped,
        })
    })
    .await?;

    Ok(Json(response))
}

async fn pack_remove(Json(request): Json<RemoveRequest>) -> Result<Json<PackSnapshot>, AppError> {
    let mut packer = request.state.into_packer()?;
    packer.remove(request.index)?;
    Ok(Json(packer.snapshot()))
}

/// Generate SVG visualization
async fn generate_svg(Json(state): Json<CanvasState>) -> Result<Response, AppError> {
    info!("Generating SVG for {} pieces", state.rectangles.len());

    state.canvas.validate()?;
    let svg = render_svg(&state.rectangles, &state.canvas).map_err(anyhow::Error::from)?;

    Ok((StatusCode::OK, [("Content-Type", "image/svg+xml")], svg).into_response())
}

/// Grid scans and leftover passes run on the blocking pool.
async fn blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(anyhow::Error::from)?
}

/// Application error type
struct AppError(anyhow::Error);

impl From<OffcutError> for AppError {
    fn from(err: OffcutError) -> Self {
        AppError(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        let status = match self.0.downcast_ref::<OffcutError>() {
            Some(_) => StatusCode::BAD_REQUEST,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
