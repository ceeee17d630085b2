//! Student handlers: create, list, read, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::extractors::ValidatedJson;
use crate::models::{Student, StudentInput};
use crate::response::{message, MessageBody};
use crate::service::StudentService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

#[utoipa::path(
    post,
    path = "/students",
    request_body = StudentInput,
    responses(
        (status = 200, description = "Student created", body = Student),
        (status = 400, description = "Email in use or invalid field", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<StudentInput>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::create(state.store.as_ref(), &input).await?;
    Ok(Json(student))
}

#[utoipa::path(
    get,
    path = "/students",
    responses((status = 200, description = "All students", body = [Student]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let rows = StudentService::list(state.store.as_ref()).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student", body = Student),
        (status = 404, description = "Student not found", body = ErrorBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id_str)?;
    let student = StudentService::read(state.store.as_ref(), id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student id")),
    request_body = StudentInput,
    responses(
        (status = 200, description = "Updated student", body = Student),
        (status = 400, description = "Invalid field", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidatedJson(input): ValidatedJson<StudentInput>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id_str)?;
    let student = StudentService::update(state.store.as_ref(), id, &input).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student deleted", body = MessageBody),
        (status = 404, description = "Student not found", body = ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    let id = parse_id(&id_str)?;
    StudentService::delete(state.store.as_ref(), id).await?;
    Ok(message("Student deleted successfully"))
}
