use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Router,
};
use serde::Serialize;

use crate::{
    application::{error::TodoError, todo_service::TodoService},
    domain::todo::{Todo, TodoId},
    http::types::ApiResponse,
};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

/// `/todos` answers only its own methods. The update and delete paths send
/// every non-OPTIONS method to their handler, which rejects anything else.
/// Bodies are not size-capped, so an oversized item still gets an envelope.
pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>).options(preflight).fallback(method_not_allowed))
        .route("/todos/update", put(update_todo::<S>).options(preflight).fallback(update_todo::<S>))
        .route("/todos/delete", delete(delete_todo::<S>).options(preflight).fallback(delete_todo::<S>))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

async fn create_todo<S: TodoService>(State(state): State<AppState<S>>, method: Method, body: Bytes) -> Response {
    if method != Method::POST { return method_not_allowed().await; }
    let result: Result<Todo, TodoError> = async {
        let input = decode_todo(&body)?;
        state.service.create(input).await
    }
    .await;
    respond(result.map(ApiResponse::data))
}

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>, method: Method) -> Response {
    if method != Method::GET { return method_not_allowed().await; }
    respond(state.service.list().await.map(ApiResponse::data))
}

async fn update_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    method: Method,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Response {
    if method != Method::PUT { return method_not_allowed().await; }
    let result: Result<Todo, TodoError> = async {
        let id = parse_id(&query)?;
        let input = decode_todo(&body)?;
        state.service.update(id, input).await
    }
    .await;
    respond(result.map(ApiResponse::data))
}

async fn delete_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    method: Method,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    if method != Method::DELETE { return method_not_allowed().await; }
    let result: Result<(), TodoError> = async {
        let id = parse_id(&query)?;
        state.service.delete(id).await
    }
    .await;
    respond(result.map(|()| ApiResponse::<()>::message("Todo deleted successfully")))
}

async fn preflight() -> StatusCode { StatusCode::OK }

async fn method_not_allowed() -> Response { (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response() }

fn respond<T: Serialize>(result: Result<ApiResponse<T>, TodoError>) -> Response {
    result.unwrap_or_else(ApiResponse::from).into_response()
}

fn decode_todo(body: &[u8]) -> Result<Todo, TodoError> {
    Todo::from_json(body).map_err(|e| {
        tracing::debug!(error = %e, "undecodable body");
        TodoError::InvalidJson
    })
}

fn parse_id(query: &[(String, String)]) -> Result<TodoId, TodoError> {
    let raw = query.iter().find(|(k, _)| k == "id").map(|(_, v)| v.as_str()).unwrap_or_default();
    if raw.is_empty() {
        return Err(TodoError::IdRequired);
    }
    raw.parse().map(TodoId).map_err(|_| TodoError::InvalidId)
}
