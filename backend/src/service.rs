//! Game session service
//!
//! Owns the persistence of multiplayer sessions (sqlite via sqlx) and a
//! live session registry. Every game ID maps to its own
//! `tokio::sync::Mutex<ChessGame>`, so concurrent requests for the same
//! game are serialized while different games proceed independently. The
//! database stores one row per session plus one row per accepted ply;
//! loading a game replays the stored plies through the rule engine, which
//! keeps a restored board consistent with every move accepted before.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chess_core::{ChessError, ChessGame, GameTurn, MoveOutcome, Square};
use sqlx::{Pool, Row, Sqlite};
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;

/// Errors surfaced by the session service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("game {0:?} not found")]
    GameNotFound(String),

    #[error("game {0:?} already exists")]
    GameAlreadyExists(String),

    /// A rule engine rejection, propagated unchanged.
    #[error(transparent)]
    Rule(#[from] ChessError),

    /// The stored move list no longer replays cleanly.
    #[error("stored game {game_id:?} is corrupt: {detail}")]
    Corrupt { game_id: String, detail: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Stored metadata of one session.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub id: String,
    pub white_player: String,
    pub black_player: String,
    pub created_at: String,
}

type SessionHandle = Arc<AsyncMutex<ChessGame>>;

/// Loads, mutates and persists game sessions addressed by ID.
#[derive(Clone)]
pub struct GameService {
    db: Pool<Sqlite>,
    sessions: Arc<Mutex<HashMap<String, SessionHandle>>>,
}

impl GameService {
    pub fn new(db: Pool<Sqlite>) -> Self {
        GameService {
            db,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates the `games` and `moves` tables when missing.
    pub async fn init_schema(&self) -> Result<(), ServiceError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS games (
                id TEXT PRIMARY KEY,
                white_player TEXT NOT NULL,
                black_player TEXT NOT NULL,
                turn TEXT NOT NULL,
                created_at TEXT NOT NULL
            );",
        )
        .execute(&self.db)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS moves (
                game_id TEXT NOT NULL,
                ply INTEGER NOT NULL,
                source TEXT NOT NULL,
                target TEXT NOT NULL,
                PRIMARY KEY (game_id, ply)
            );",
        )
        .execute(&self.db)
        .await?;
        Ok(())
    }

    /// Creates and starts a fresh session under `id`.
    pub async fn create_game(
        &self,
        id: &str,
        white_player: &str,
        black_player: &str,
    ) -> Result<(), ServiceError> {
        let mut game = ChessGame::new();
        game.start();

        let created_at = chrono::Utc::now().to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO games (id, white_player, black_player, turn, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(white_player)
        .bind(black_player)
        .bind(game.turn().as_str())
        .bind(&created_at)
        .execute(&self.db)
        .await;

        match result {
            Ok(_) => {}
            // SQLite unique constraint violation
            Err(err) if err.to_string().contains("UNIQUE constraint failed") => {
                return Err(ServiceError::GameAlreadyExists(id.to_string()));
            }
            Err(err) => return Err(err.into()),
        }

        let mut sessions = self.sessions.lock().unwrap();
        sessions.insert(id.to_string(), Arc::new(AsyncMutex::new(game)));
        Ok(())
    }

    /// Stored metadata of a session, or `GameNotFound`.
    pub async fn record(&self, id: &str) -> Result<GameRecord, ServiceError> {
        let row = sqlx::query(
            "SELECT id, white_player, black_player, created_at FROM games WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        let row = row.ok_or_else(|| ServiceError::GameNotFound(id.to_string()))?;
        Ok(GameRecord {
            id: row.get("id"),
            white_player: row.get("white_player"),
            black_player: row.get("black_player"),
            created_at: row.get("created_at"),
        })
    }

    /// The stored turn of a session.
    pub async fn get_turn(&self, id: &str) -> Result<GameTurn, ServiceError> {
        let row = sqlx::query("SELECT turn FROM games WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        let row = row.ok_or_else(|| ServiceError::GameNotFound(id.to_string()))?;
        let turn: String = row.get("turn");
        GameTurn::from_name(&turn).ok_or_else(|| ServiceError::Corrupt {
            game_id: id.to_string(),
            detail: format!("unknown turn {turn:?}"),
        })
    }

    /// Metadata plus a snapshot of the current game state.
    pub async fn snapshot(&self, id: &str) -> Result<(GameRecord, ChessGame), ServiceError> {
        let record = self.record(id).await?;
        let handle = self.session(id).await?;
        let game = handle.lock().await.clone();
        Ok((record, game))
    }

    /// Validates, executes and persists one move.
    ///
    /// The per-game lock is held from validation through persistence, so
    /// two racing requests for the same game cannot both move the same
    /// color. A rejected move persists nothing.
    pub async fn apply_move(
        &self,
        id: &str,
        source: &str,
        target: &str,
    ) -> Result<(MoveOutcome, ChessGame), ServiceError> {
        let from: Square = source.parse::<Square>()?;
        let to: Square = target.parse::<Square>()?;

        let handle = self.session(id).await?;
        let mut game = handle.lock().await;

        let ply: i64 = sqlx::query("SELECT COUNT(*) AS plies FROM moves WHERE game_id = $1")
            .bind(id)
            .fetch_one(&self.db)
            .await?
            .get("plies");

        let outcome = game.move_piece(from, to)?;

        if let Err(err) = self.persist_move(id, ply, source, target, game.turn()).await {
            // drop the cached session; the next load replays the stored truth
            self.sessions.lock().unwrap().remove(id);
            return Err(err);
        }
        Ok((outcome, game.clone()))
    }

    /// Every square the piece on `square` can currently reach.
    pub async fn available_targets(
        &self,
        id: &str,
        square: &str,
    ) -> Result<Vec<Square>, ServiceError> {
        let source: Square = square.parse::<Square>()?;
        let handle = self.session(id).await?;
        let game = handle.lock().await;
        Ok(game.board().available_targets(source)?)
    }

    async fn persist_move(
        &self,
        id: &str,
        ply: i64,
        source: &str,
        target: &str,
        turn: GameTurn,
    ) -> Result<(), ServiceError> {
        sqlx::query("INSERT INTO moves (game_id, ply, source, target) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(ply)
            .bind(source)
            .bind(target)
            .execute(&self.db)
            .await?;
        sqlx::query("UPDATE games SET turn = $1 WHERE id = $2")
            .bind(turn.as_str())
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    /// The live handle for a session, rebuilding it from the stored move
    /// list when it is not cached.
    async fn session(&self, id: &str) -> Result<SessionHandle, ServiceError> {
        {
            let sessions = self.sessions.lock().unwrap();
            if let Some(handle) = sessions.get(id) {
                return Ok(handle.clone());
            }
        }

        self.record(id).await?;
        let rows = sqlx::query("SELECT source, target FROM moves WHERE game_id = $1 ORDER BY ply")
            .bind(id)
            .fetch_all(&self.db)
            .await?;

        let mut game = ChessGame::new();
        game.start();
        for row in rows {
            let source: String = row.get("source");
            let target: String = row.get("target");
            let from = source
                .parse::<Square>()
                .map_err(|err| self.corrupt(id, &err))?;
            let to = target
                .parse::<Square>()
                .map_err(|err| self.corrupt(id, &err))?;
            game.move_piece(from, to)
                .map_err(|err| self.corrupt(id, &err))?;
        }
        tracing::debug!(game_id = id, "session rebuilt from stored moves");

        let handle: SessionHandle = Arc::new(AsyncMutex::new(game));
        let mut sessions = self.sessions.lock().unwrap();
        // another request may have rebuilt it meanwhile; keep the first
        Ok(sessions.entry(id.to_string()).or_insert(handle).clone())
    }

    fn corrupt(&self, id: &str, err: &ChessError) -> ServiceError {
        ServiceError::Corrupt {
            game_id: id.to_string(),
            detail: err.to_string(),
        }
    }
}
