//! Route handlers for boards, lists, cards and auth.
//!
//! # Responsibility
//! - Decode path/body input, run one core use-case, encode the result.
//! - Keep storage work off the async executor.
//!
//! # Invariants
//! - Each request opens its own migrated connection; no handler shares a
//!   connection or other mutable state with another request.
//! - Deletes answer `200` with an empty body, including for missing ids.
//! - Undecodable bodies and path ids answer `400` with a JSON error body.

use crate::error::ApiError;
use crate::extract::{JsonBody, PathParam};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rusqlite::Connection;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use taskboard_core::db::open_db;
use taskboard_core::{
    core_version, AuthService, Board, BoardId, BoardInput, BoardService, Card, CardId, CardPatch,
    CardService, Credentials, ListService, MoveCard, NewCard, NewTaskList, ServiceResult,
    SqliteBoardRepository, SqliteCardRepository, SqliteTaskListRepository, SqliteUserRepository,
    TaskList, TaskListId, TaskListPatch, User,
};

/// Shared handler state: where the database lives.
#[derive(Debug, Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    pub fn db_path(&self) -> &std::path::Path {
        self.db_path.as_path()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Runs `f` with a fresh connection on the blocking pool.
async fn with_connection<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Connection) -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let db_path = Arc::clone(&state.db_path);
    tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
        let conn = open_db(db_path.as_path())?;
        Ok(f(&conn)?)
    })
    .await
    .map_err(|err| ApiError::Join(err.to_string()))?
}

fn board_service(conn: &Connection) -> ServiceResult<BoardService<SqliteBoardRepository<'_>>> {
    Ok(BoardService::new(SqliteBoardRepository::try_new(conn)?))
}

fn list_service(
    conn: &Connection,
) -> ServiceResult<ListService<SqliteTaskListRepository<'_>, SqliteBoardRepository<'_>>> {
    Ok(ListService::new(
        SqliteTaskListRepository::try_new(conn)?,
        SqliteBoardRepository::try_new(conn)?,
    ))
}

fn card_service(
    conn: &Connection,
) -> ServiceResult<CardService<SqliteCardRepository<'_>, SqliteTaskListRepository<'_>>> {
    Ok(CardService::new(
        SqliteCardRepository::try_new(conn)?,
        SqliteTaskListRepository::try_new(conn)?,
    ))
}

fn auth_service(conn: &Connection) -> ServiceResult<AuthService<SqliteUserRepository<'_>>> {
    Ok(AuthService::new(SqliteUserRepository::try_new(conn)?))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": core_version() }))
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> ApiResult<User> {
    let user =
        with_connection(&state, move |conn| auth_service(conn)?.register(&credentials)).await?;
    Ok(Json(user))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> ApiResult<User> {
    let user = with_connection(&state, move |conn| auth_service(conn)?.login(&credentials)).await?;
    Ok(Json(user))
}

pub async fn list_boards(State(state): State<AppState>) -> ApiResult<Vec<Board>> {
    let boards = with_connection(&state, |conn| board_service(conn)?.list_boards()).await?;
    Ok(Json(boards))
}

pub async fn create_board(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<BoardInput>,
) -> ApiResult<Board> {
    let board = with_connection(&state, move |conn| {
        board_service(conn)?.create_board(input.into_name())
    })
    .await?;
    Ok(Json(board))
}

pub async fn update_board(
    State(state): State<AppState>,
    PathParam(id): PathParam<BoardId>,
    JsonBody(input): JsonBody<BoardInput>,
) -> ApiResult<Board> {
    let board = with_connection(&state, move |conn| {
        board_service(conn)?.update_board(id, input.into_name())
    })
    .await?;
    Ok(Json(board))
}

pub async fn delete_board(
    State(state): State<AppState>,
    PathParam(id): PathParam<BoardId>,
) -> Result<StatusCode, ApiError> {
    with_connection(&state, move |conn| board_service(conn)?.delete_board(id)).await?;
    Ok(StatusCode::OK)
}

pub async fn list_lists(
    State(state): State<AppState>,
    PathParam(board_id): PathParam<BoardId>,
) -> ApiResult<Vec<TaskList>> {
    let lists =
        with_connection(&state, move |conn| list_service(conn)?.list_by_board(board_id)).await?;
    Ok(Json(lists))
}

pub async fn create_list(
    State(state): State<AppState>,
    PathParam(board_id): PathParam<BoardId>,
    JsonBody(input): JsonBody<NewTaskList>,
) -> ApiResult<TaskList> {
    let list = with_connection(&state, move |conn| {
        list_service(conn)?.create_list(board_id, input)
    })
    .await?;
    Ok(Json(list))
}

pub async fn update_list(
    State(state): State<AppState>,
    PathParam(id): PathParam<TaskListId>,
    JsonBody(patch): JsonBody<TaskListPatch>,
) -> ApiResult<TaskList> {
    let list = with_connection(&state, move |conn| {
        list_service(conn)?.update_list(id, &patch)
    })
    .await?;
    Ok(Json(list))
}

pub async fn delete_list(
    State(state): State<AppState>,
    PathParam(id): PathParam<TaskListId>,
) -> Result<StatusCode, ApiError> {
    with_connection(&state, move |conn| list_service(conn)?.delete_list(id)).await?;
    Ok(StatusCode::OK)
}

pub async fn list_cards(
    State(state): State<AppState>,
    PathParam(list_id): PathParam<TaskListId>,
) -> ApiResult<Vec<Card>> {
    let cards =
        with_connection(&state, move |conn| card_service(conn)?.list_by_list(list_id)).await?;
    Ok(Json(cards))
}

pub async fn create_card(
    State(state): State<AppState>,
    PathParam(list_id): PathParam<TaskListId>,
    JsonBody(input): JsonBody<NewCard>,
) -> ApiResult<Card> {
    let card = with_connection(&state, move |conn| {
        card_service(conn)?.create_card(list_id, input)
    })
    .await?;
    Ok(Json(card))
}

pub async fn update_card(
    State(state): State<AppState>,
    PathParam(id): PathParam<CardId>,
    JsonBody(patch): JsonBody<CardPatch>,
) -> ApiResult<Card> {
    let card = with_connection(&state, move |conn| {
        card_service(conn)?.update_card(id, &patch)
    })
    .await?;
    Ok(Json(card))
}

pub async fn move_card(
    State(state): State<AppState>,
    PathParam(id): PathParam<CardId>,
    JsonBody(request): JsonBody<MoveCard>,
) -> ApiResult<Card> {
    let card = with_connection(&state, move |conn| {
        card_service(conn)?.move_card(id, &request)
    })
    .await?;
    Ok(Json(card))
}

pub async fn delete_card(
    State(state): State<AppState>,
    PathParam(id): PathParam<CardId>,
) -> Result<StatusCode, ApiError> {
    with_connection(&state, move |conn| card_service(conn)?.delete_card(id)).await?;
    Ok(StatusCode::OK)
}
