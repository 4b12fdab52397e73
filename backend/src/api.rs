//! HTTP controller for multiplayer sessions
//!
//! A thin axum layer over [`GameService`]: it parses requests, forwards
//! square notation to the service untouched, and maps the service's typed
//! failures to HTTP statuses with their human-readable reason as the
//! body. All game knowledge lives in `chess-core`.

use crate::service::{GameService, ServiceError};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use chess_core::{ChessError, ChessGame, Color, GameResult, GameTurn, Piece, PieceKind, Status};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone)]
pub struct AppState {
    pub service: GameService,
}

pub fn router(service: GameService) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/games", post(create_game))
        .route("/games/{id}", get(get_game))
        .route("/games/{id}/move", post(move_piece))
        .route("/games/{id}/moves/{square}", get(available_moves))
        .route("/games/{id}/status", get(game_status))
        .with_state(state)
}

#[derive(Deserialize)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub white_player: Option<String>,
    #[serde(default)]
    pub black_player: Option<String>,
}

#[derive(Serialize)]
pub struct GameResponse {
    pub game_id: String,
    pub white_player: String,
    pub black_player: String,
    pub turn: GameTurn,
    pub finished: bool,
    pub created_at: String,
    pub board: BoardDto,
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub source: String,
    pub target: String,
}

#[derive(Serialize)]
pub struct MoveResponse {
    pub game_id: String,
    pub turn: GameTurn,
    pub finished: bool,
    pub captured: Option<PieceDto>,
    pub board: BoardDto,
}

#[derive(Serialize)]
pub struct MovesResponse {
    pub game_id: String,
    pub source: String,
    pub targets: Vec<String>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub game_id: String,
    pub turn: GameTurn,
    pub white_score: f64,
    pub black_score: f64,
    pub result: GameResult,
    pub game_over: bool,
}

/// One occupied square in a board snapshot.
#[derive(Serialize)]
pub struct PieceDto {
    pub color: Color,
    pub kind: PieceKind,
    pub symbol: char,
}

impl From<Piece> for PieceDto {
    fn from(piece: Piece) -> Self {
        PieceDto {
            color: piece.color,
            kind: piece.kind,
            symbol: piece.symbol(),
        }
    }
}

/// All 64 squares keyed by algebraic notation; empty squares map to null.
pub type BoardDto = BTreeMap<String, Option<PieceDto>>;

fn board_dto(game: &ChessGame) -> BoardDto {
    game.board()
        .squares()
        .map(|(square, piece)| (square.to_string(), piece.map(PieceDto::from)))
        .collect()
}

async fn create_game(
    State(state): State<AppState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameResponse>), (StatusCode, String)> {
    let game_id = payload
        .game_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(generate_game_id);
    let white = payload.white_player.unwrap_or_else(|| "white".to_string());
    let black = payload.black_player.unwrap_or_else(|| "black".to_string());

    state
        .service
        .create_game(&game_id, &white, &black)
        .await
        .map_err(error_response)?;
    tracing::info!(game_id = %game_id, "game created");

    let response = game_response(&state.service, &game_id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, (StatusCode, String)> {
    Ok(Json(game_response(&state.service, &id).await?))
}

async fn move_piece(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, (StatusCode, String)> {
    let (outcome, game) = state
        .service
        .apply_move(&id, &payload.source, &payload.target)
        .await
        .map_err(error_response)?;
    tracing::info!(
        game_id = %id,
        source = %payload.source,
        target = %payload.target,
        finished = outcome.finished,
        "move accepted"
    );

    Ok(Json(MoveResponse {
        game_id: id,
        turn: game.turn(),
        finished: outcome.finished,
        captured: outcome.captured.map(PieceDto::from),
        board: board_dto(&game),
    }))
}

async fn available_moves(
    State(state): State<AppState>,
    Path((id, square)): Path<(String, String)>,
) -> Result<Json<MovesResponse>, (StatusCode, String)> {
    let targets = state
        .service
        .available_targets(&id, &square)
        .await
        .map_err(error_response)?;

    Ok(Json(MovesResponse {
        game_id: id,
        source: square,
        targets: targets.iter().map(ToString::to_string).collect(),
    }))
}

async fn game_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, (StatusCode, String)> {
    let turn = state.service.get_turn(&id).await.map_err(error_response)?;
    let (_, game) = state
        .service
        .snapshot(&id)
        .await
        .map_err(error_response)?;
    let status = Status::new(game.board());

    Ok(Json(StatusResponse {
        game_id: id,
        turn,
        white_score: status.score(Color::White),
        black_score: status.score(Color::Black),
        result: status.result(),
        game_over: status.is_game_over(),
    }))
}

async fn game_response(
    service: &GameService,
    id: &str,
) -> Result<GameResponse, (StatusCode, String)> {
    let (record, game) = service.snapshot(id).await.map_err(error_response)?;
    Ok(GameResponse {
        game_id: record.id,
        white_player: record.white_player,
        black_player: record.black_player,
        turn: game.turn(),
        finished: game.is_finished(),
        created_at: record.created_at,
        board: board_dto(&game),
    })
}

/// Maps a service failure to an HTTP status plus its reason.
///
/// Notation errors are the client's formatting problem (400); rule
/// rejections are well-formed but not allowed right now (422); a finished
/// game or a taken ID conflicts with existing state (409).
fn error_response(err: ServiceError) -> (StatusCode, String) {
    let status = match &err {
        ServiceError::GameNotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::GameAlreadyExists(_) => StatusCode::CONFLICT,
        ServiceError::Rule(ChessError::InvalidPosition { .. }) => StatusCode::BAD_REQUEST,
        ServiceError::Rule(ChessError::GameFinished) => StatusCode::CONFLICT,
        ServiceError::Rule(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Corrupt { .. } | ServiceError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("request failed: {err}");
    }
    (status, err.to_string())
}

fn generate_game_id() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::rng();
    (0..8)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
