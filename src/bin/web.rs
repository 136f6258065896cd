//! Admin web server: import brackets, preview and run match resets over REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, CASCADE_MODE (graph or flat).

use actix_web::{
    get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_reset::{
    preview_reset, reset_match_result, BracketContext, BracketTopology, CascadeStrategy, Edge,
    EdgeTopology, EventScope, FlatScanCascade, Frame, GraphCascade, InMemoryMatchStore, MatchId,
    MatchStore, ResetError, StoreError, TournamentId,
};
use serde::Deserialize;
use std::sync::RwLock;

/// How the cascade below a reset target is discovered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum CascadeMode {
    /// Walk the imported next-match edges.
    Graph,
    /// Scan the match listing; single-elimination brackets only.
    Flat,
}

impl CascadeMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "graph" => Some(CascadeMode::Graph),
            "flat" => Some(CascadeMode::Flat),
            _ => None,
        }
    }
}

struct AdminState {
    store: InMemoryMatchStore,
    topology: RwLock<EdgeTopology>,
    mode: CascadeMode,
}

type AppState = Data<AdminState>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// A bracket as handed over by the tournament service: structure, edges, recorded frames.
#[derive(Deserialize)]
struct ImportBracketBody {
    context: BracketContext,
    #[serde(default)]
    edges: Vec<Edge>,
    #[serde(default)]
    frames: Vec<Frame>,
}

/// Path segments: tournament id and stage id (e.g. /api/brackets/{tournament_id}/{stage_id})
#[derive(Deserialize)]
struct BracketPath {
    tournament_id: TournamentId,
    stage_id: u64,
}

impl BracketPath {
    fn scope(&self) -> EventScope {
        EventScope {
            tournament_id: self.tournament_id,
            stage_id: self.stage_id,
        }
    }
}

/// Path segments: bracket plus match id.
#[derive(Deserialize)]
struct MatchPath {
    tournament_id: TournamentId,
    stage_id: u64,
    match_id: MatchId,
}

impl MatchPath {
    fn scope(&self) -> EventScope {
        EventScope {
            tournament_id: self.tournament_id,
            stage_id: self.stage_id,
        }
    }
}

fn store_error_response(e: &StoreError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        StoreError::ScopeNotFound { .. } | StoreError::MatchNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        StoreError::Conflict(_) | StoreError::StageConflict(_) => {
            HttpResponse::Conflict().json(body)
        }
        StoreError::LockPoisoned(_) | StoreError::Backend(_) => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn reset_error_response(e: &ResetError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ResetError::NotFound(_) => HttpResponse::NotFound().json(body),
        ResetError::InvalidState { .. } => HttpResponse::Conflict().json(body),
        ResetError::Internal(StoreError::ScopeNotFound { .. }) => HttpResponse::NotFound().json(body),
        ResetError::Internal(_) => HttpResponse::InternalServerError().json(body),
    }
}

/// Run `f` with the configured cascade strategy, holding the topology read lock if needed.
fn with_strategy<T>(
    state: &AdminState,
    f: impl FnOnce(&dyn CascadeStrategy) -> Result<T, ResetError>,
) -> Result<T, ResetError> {
    match state.mode {
        CascadeMode::Flat => f(&FlatScanCascade),
        CascadeMode::Graph => {
            let topology = state
                .topology
                .read()
                .map_err(|_| StoreError::LockPoisoned("topology read"))?;
            f(&GraphCascade::new(&*topology))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-reset",
    })
}

/// Import a bracket (stage, groups, rounds, matches) with its edges and frames.
#[post("/api/brackets")]
async fn api_import_bracket(state: AppState, body: Json<ImportBracketBody>) -> HttpResponse {
    let ImportBracketBody {
        context,
        edges,
        frames,
    } = body.into_inner();

    let mut topology = match state.topology.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let scope = match state.store.import(context, frames) {
        Ok(scope) => scope,
        Err(e) => return store_error_response(&e),
    };
    topology.extend(edges);
    log::info!(
        "Imported bracket for tournament {} stage {}",
        scope.tournament_id,
        scope.stage_id
    );
    HttpResponse::Ok().json(scope)
}

/// Get a bracket by scope (404 if not found).
#[get("/api/brackets/{tournament_id}/{stage_id}")]
async fn api_get_bracket(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    match state.store.bracket_context(&path.scope()) {
        Ok(context) => HttpResponse::Ok().json(context),
        Err(e) => store_error_response(&e),
    }
}

/// Next-match edges of one match, as the topology provider reports them.
/// 404 unless the match belongs to the bracket named in the path.
#[get("/api/brackets/{tournament_id}/{stage_id}/matches/{match_id}/next")]
async fn api_next_matches(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    match state.store.bracket_context(&path.scope()) {
        Ok(context) if context.find_match(path.match_id).is_some() => {}
        Ok(_) => return store_error_response(&StoreError::MatchNotFound(path.match_id)),
        Err(e) => return store_error_response(&e),
    }
    let topology = match state.topology.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match topology.next_matches(path.match_id) {
        Ok(next) => HttpResponse::Ok().json(next),
        Err(e) => store_error_response(&e),
    }
}

/// Show what a reset would touch, without writing.
#[get("/api/brackets/{tournament_id}/{stage_id}/matches/{match_id}/reset-plan")]
async fn api_reset_plan(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let scope = path.scope();
    let result = with_strategy(&state, |strategy| {
        preview_reset(&state.store, strategy, &scope, path.match_id)
    });
    match result {
        Ok(plan) => HttpResponse::Ok().json(plan),
        Err(e) => reset_error_response(&e),
    }
}

/// Reset a match result and scrub its cascade.
#[post("/api/brackets/{tournament_id}/{stage_id}/matches/{match_id}/reset")]
async fn api_reset_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let scope = path.scope();
    let result = with_strategy(&state, |strategy| {
        reset_match_result(&state.store, strategy, &scope, path.match_id)
    });
    match result {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => {
            log::warn!("Reset of match {} failed: {}", path.match_id, e);
            reset_error_response(&e)
        }
    }
}

/// Current state of one match.
#[get("/api/matches/{match_id}")]
async fn api_get_match(state: AppState, path: Path<MatchId>) -> HttpResponse {
    match state.store.get_match(path.into_inner()) {
        Ok(Some(m)) => HttpResponse::Ok().json(m),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({ "error": "No match" })),
        Err(e) => store_error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cascade_mode() -> CascadeMode {
    CascadeMode::Graph
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let mode = match std::env::var("CASCADE_MODE") {
        Ok(value) => CascadeMode::parse(&value).unwrap_or_else(|| {
            log::warn!("Unknown CASCADE_MODE {:?}, using graph", value);
            default_cascade_mode()
        }),
        Err(_) => default_cascade_mode(),
    };
    let bind = (host.as_str(), port);
    log::info!(
        "Starting server at http://{}:{} (cascade mode: {:?})",
        bind.0,
        bind.1,
        mode
    );

    let state = Data::new(AdminState {
        store: InMemoryMatchStore::new(),
        topology: RwLock::new(EdgeTopology::new()),
        mode,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_import_bracket)
            .service(api_get_bracket)
            .service(api_next_matches)
            .service(api_reset_plan)
            .service(api_reset_match)
            .service(api_get_match)
    })
    .bind(bind)?
    .run()
    .await
}
