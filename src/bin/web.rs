//! Single binary web server: JSON REST API over in-memory tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, SHUFFLE_SEED, INACTIVITY_TIMEOUT_HOURS, FIRST_KICKOFF, SLOT_MINUTES, DAY_CUTOFF.

use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use group_stage_tournament::{
    create_tournament, generate_schedule_with, parse_team_names, schedule_csv_string,
    shuffle_groups, shuffle_groups_seeded, tournament_standings, AppConfig, MatchId, Tournament,
    TournamentError, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory tournaments by id. The write lock makes each operation one-writer-at-a-time.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

type Config = Data<AppConfig>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Teams may be sent as a list or as newline-separated text (one team per line).
#[derive(Deserialize)]
#[serde(untagged)]
enum TeamList {
    Names(Vec<String>),
    Text(String),
}

impl TeamList {
    fn into_names(self) -> Vec<String> {
        match self {
            TeamList::Names(names) => names
                .into_iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
            TeamList::Text(text) => parse_team_names(&text),
        }
    }
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    teams: TeamList,
    #[serde(default = "default_num_groups")]
    num_groups: usize,
}

fn default_num_groups() -> usize {
    1
}

#[derive(Debug, Deserialize, Default, PartialEq)]
struct ShuffleBody {
    seed: Option<u64>,
    /// Drop existing fixtures first; otherwise shuffling a scheduled tournament is refused.
    #[serde(default)]
    discard_schedule: bool,
}

/// An empty body means defaults; a body that does not parse is an error, never defaults.
fn parse_shuffle_body(raw: &[u8]) -> Result<ShuffleBody, serde_json::Error> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(ShuffleBody::default());
    }
    serde_json::from_slice(raw)
}

/// Scores arrive as numbers or strings; anything that is not a non-negative integer is rejected.
#[derive(Deserialize)]
struct ScoreBody {
    #[serde(default)]
    home_score: serde_json::Value,
    #[serde(default)]
    away_score: serde_json::Value,
}

fn score_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn bad_request(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Run `op` on one tournament under the write lock, refreshing its activity time.
fn with_tournament<F>(state: &AppState, id: TournamentId, op: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            op(&mut entry.tournament)
        }
        None => not_found(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "group-stage-tournament",
    })
}

/// List all tournaments.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut list: Vec<&Tournament> = g.values().map(|e| &e.tournament).collect();
    list.sort_by_key(|t| t.created_at);
    HttpResponse::Ok().json(list)
}

/// Create a tournament and allocate its teams into groups.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let names = body.teams.into_names();
    let tournament = match create_tournament(
        &body.name,
        body.start_date,
        body.end_date,
        &names,
        body.num_groups,
    ) {
        Ok(t) => t,
        Err(e) => return bad_request(e),
    };
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t))
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove(&path.id) {
        Some(_) => {
            log::info!("Deleted tournament {}", path.id);
            HttpResponse::NoContent().finish()
        }
        None => not_found(),
    }
}

/// Reshuffle teams across groups. Uses the body seed, else SHUFFLE_SEED, else a fresh random source.
#[post("/api/tournaments/{id}/shuffle")]
async fn api_shuffle_groups(
    state: AppState,
    config: Config,
    path: Path<TournamentPath>,
    body: Bytes,
) -> HttpResponse {
    let body = match parse_shuffle_body(&body) {
        Ok(parsed) => parsed,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": format!("Invalid shuffle request: {}", e) }))
        }
    };
    let seed = body.seed.or(config.shuffle_seed);
    with_tournament(&state, path.id, |t| {
        // Work on a copy so a refused shuffle also keeps the discarded schedule.
        let mut draft = t.clone();
        if body.discard_schedule {
            draft.clear_schedule();
        }
        let result = match seed {
            Some(seed) => shuffle_groups_seeded(&mut draft, seed),
            None => shuffle_groups(&mut draft, &mut rand::thread_rng()),
        };
        match result {
            Ok(()) => {
                *t = draft;
                HttpResponse::Ok().json(t)
            }
            Err(e) => bad_request(e),
        }
    })
}

/// Generate the group-stage schedule (once).
#[post("/api/tournaments/{id}/schedule")]
async fn api_generate_schedule(
    state: AppState,
    config: Config,
    path: Path<TournamentPath>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let generated = generate_schedule_with(t, &config.slots).map(|fixtures| fixtures.len());
        match generated {
            Ok(_) => HttpResponse::Ok().json(t),
            Err(e) => bad_request(e),
        }
    })
}

/// Discard all fixtures.
#[delete("/api/tournaments/{id}/schedule")]
async fn api_clear_schedule(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let removed = t.clear_schedule();
        log::info!("Cleared {} matches from tournament {}", removed, t.id);
        HttpResponse::Ok().json(t)
    })
}

/// Record a match result. An invalid score leaves the match unchanged.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_update_score(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let home = score_text(&body.home_score);
    let away = score_text(&body.away_score);
    with_tournament(&state, path.id, |t| {
        match t.update_match_score(path.match_id, &home, &away) {
            Ok(()) => HttpResponse::Ok().json(t),
            Err(e) => bad_request(e),
        }
    })
}

/// Mark a scheduled match as in progress.
#[post("/api/tournaments/{id}/matches/{match_id}/start")]
async fn api_start_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.start_match(path.match_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => bad_request(e),
    })
}

/// Current standings for every group.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(tournament_standings(t))
    })
}

/// Fixture list as CSV.
#[get("/api/tournaments/{id}/schedule.csv")]
async fn api_schedule_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match schedule_csv_string(&t.matches) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => {
            log::error!("CSV export failed for tournament {}: {}", t.id, e);
            HttpResponse::InternalServerError().body("export error")
        }
    })
}

/// Move from the group stage to the knockout stage.
#[post("/api/tournaments/{id}/advance")]
async fn api_advance(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.advance_to_knockout() {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => bad_request(e),
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    if let Some(seed) = config.shuffle_seed {
        log::info!("Shuffles are seeded with {}", seed);
    }

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));
    let inactivity_timeout = config.inactivity_timeout();
    let config = Data::new(config);

    // Background task: every 30 minutes, remove tournaments past the inactivity timeout
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_shuffle_groups)
            .service(api_generate_schedule)
            .service(api_clear_schedule)
            .service(api_update_score)
            .service(api_start_match)
            .service(api_standings)
            .service(api_schedule_csv)
            .service(api_advance)
    })
    .bind(bind)?
    .run()
    .await
}
