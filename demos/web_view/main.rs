use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use simulation::{Command, Session, Settings};
use std::env;
use tower_http::cors::CorsLayer;

// https://docs.rs/axum/latest/axum/index.html#using-the-state-extractor

#[derive(Serialize)]
struct Segment {
    p1: (f64, f64),
    p2: (f64, f64),
    landable: bool,
}

#[derive(Serialize)]
struct Landscape {
    width: f64,
    height: f64,
    tile_width: f64,
    segments: Vec<Segment>,
}

#[derive(Serialize)]
pub enum FlightState {
    Flying,
    Landed,
    CrashedWrongTerrain,
    CrashedNotVertical,
    CrashedTooFastHorizontal,
    CrashedTooFastVertical,
}

impl From<&simulation::FlightState> for FlightState {
    fn from(value: &simulation::FlightState) -> Self {
        type FS = simulation::FlightState;
        type L = simulation::Landing;
        match value {
            FS::Flying => Self::Flying,
            FS::Landed | FS::Crashed(L::Correct) => Self::Landed,
            FS::Crashed(L::WrongTerrain) => Self::CrashedWrongTerrain,
            FS::Crashed(L::NotVertical { .. }) => Self::CrashedNotVertical,
            FS::Crashed(L::TooFastHorizontal { .. }) => Self::CrashedTooFastHorizontal,
            FS::Crashed(L::TooFastVertical { .. }) => Self::CrashedTooFastVertical,
        }
    }
}

#[derive(Serialize)]
struct Lander {
    position: (f64, f64),
    screen_position: (f64, f64),
    velocity: (f64, f64),
    angle: f64,
    target_angle: f64,
    fuel: u32,
    landed: bool,
}

#[derive(Serialize)]
struct Camera {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

#[derive(Serialize)]
struct SessionState {
    tick: usize,
    lander: Lander,
    camera: Camera,
    flight_state: FlightState,
}

#[derive(Clone)]
struct AppState {
    state: Arc<Mutex<Session>>,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let settings = match env::args().nth(1) {
        Some(path) => simulation::init::json::parse_settings(path).unwrap_or_else(|e| panic!("{e}")),
        None => Settings::default(),
    };
    let session = Session::new(settings).unwrap_or_else(|e| panic!("{e}"));
    let app = AppState {
        state: Arc::new(Mutex::new(session)),
    };

    let router = Router::new()
        .route("/landscape", get(handle_landscape))
        .route("/state", get(handle_state))
        .route("/command/:name", put(handle_command))
        .route("/tick", put(handle_tick))
        .route(
            "/reset",
            put(|State(state): State<AppState>| async move {
                state.state.lock().unwrap().reset();
            }),
        )
        .with_state(app)
        .layer(CorsLayer::permissive());

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    log::info!("Serving lander state on {:?}", listener.local_addr());
    axum::serve(listener, router).await.unwrap();
}

async fn handle_landscape(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let session = state.state.lock().unwrap();
    let landscape = landscape_view(session.landscape());
    serde_json::to_value(landscape)
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

fn landscape_view(landscape: &simulation::Landscape) -> Landscape {
    Landscape {
        width: landscape.width(),
        height: landscape.height(),
        tile_width: landscape.tile_width(),
        segments: landscape
            .segments()
            .iter()
            .map(|s| Segment {
                p1: (s.p1.x, s.p1.y),
                p2: (s.p2.x, s.p2.y),
                landable: s.landable,
            })
            .collect(),
    }
}

async fn handle_state(State(state): State<AppState>) -> Json<SessionState> {
    let session = state.state.lock().unwrap();
    Json(session_state(&session))
}

async fn handle_command(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<(), (StatusCode, String)> {
    let command = Command::from_name(&name)
        .ok_or((StatusCode::BAD_REQUEST, format!("Unknown command {name}")))?;
    state.state.lock().unwrap().apply_command(command);
    Ok(())
}

async fn handle_tick(
    State(state): State<AppState>,
) -> Result<Json<SessionState>, (StatusCode, String)> {
    let mut session = state.state.lock().unwrap();
    session.tick().map_err(|e| {
        let e = format!("Tick failed: {e}");
        log::error!("{e}");
        (StatusCode::INTERNAL_SERVER_ERROR, e)
    })?;
    Ok(Json(session_state(&session)))
}

fn session_state(session: &Session) -> SessionState {
    let lander = session.lander();
    let screen = session.screen_position(lander.position());
    let rect = session.camera().rect;
    SessionState {
        tick: session.ticks(),
        lander: Lander {
            position: (lander.position().x, lander.position().y),
            screen_position: (screen.x, screen.y),
            velocity: (lander.velocity().x, lander.velocity().y),
            angle: lander.angle(),
            target_angle: lander.target_angle(),
            fuel: lander.fuel(),
            landed: lander.landed(),
        },
        camera: Camera {
            left: rect.left,
            top: rect.top,
            width: rect.width,
            height: rect.height,
        },
        flight_state: session.flight_state().into(),
    }
}

#[cfg(test)]
mod web_view_tests {
    use super::*;

    #[test]
    fn state_json() {
        let mut session = Session::new(Settings::default()).unwrap();
        session.apply_command(Command::Thrust);
        session.tick().unwrap();

        let value = serde_json::to_value(session_state(&session)).unwrap();
        assert_eq!(value["tick"], 1);
        assert_eq!(value["flight_state"], "Flying");
        assert_eq!(value["lander"]["fuel"], 999);
        assert_eq!(value["lander"]["landed"], false);
        assert_eq!(value["camera"]["width"], 1400.);
    }

    #[test]
    fn landscape_json() {
        let landscape = simulation::Landscape::default();
        let value = serde_json::to_value(landscape_view(&landscape)).unwrap();
        let segments = value["segments"].as_array().unwrap();
        assert_eq!(segments.len(), landscape.segments().len());
        assert!(segments.iter().any(|s| s["landable"] == true));
        assert_eq!(value["tile_width"], landscape.tile_width());
    }
}
