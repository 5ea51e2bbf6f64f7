use axum::{
    extract::State,
    response::Json,
};
use serde_json::Value;
use crate::books::dto::BookListResponse;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::search_author_cmd::{SearchAuthorCommand, SearchAuthorCommandRequest};
use crate::catalog::command::search_title_author_cmd::{SearchTitleAuthorCommand, SearchTitleAuthorCommandRequest};
use crate::catalog::command::search_title_cmd::{SearchTitleCommand, SearchTitleCommandRequest};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

pub(crate) async fn save_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddBookCommandResponse>, ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn search_by_title_author(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<BookListResponse>, ServerError> {
    let req: SearchTitleAuthorCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = SearchTitleAuthorCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn search_by_author(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<BookListResponse>, ServerError> {
    let req: SearchAuthorCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = SearchAuthorCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn search_by_title(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<BookListResponse>, ServerError> {
    let req: SearchTitleCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = SearchTitleCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn list_all_books(
    State(state): State<AppState>) -> Result<Json<BookListResponse>, ServerError> {
    let res = ListBooksCommand::new(state.catalog).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res))
}
