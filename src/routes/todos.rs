use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TodoInput, TodoQuery},
    repo::todos,
    response::ApiResponse,
};
use actix_web::{delete, get, post, put, web, Responder};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Lists the authenticated user's todos, one page at a time.
///
/// ## Query Parameters:
/// - `limit` (default 10) and `page` (default 1).
/// - `sort_by`: one of `created_at`, `updated_at`, `title`, `status`; any
///   other value silently becomes `created_at`.
/// - `sort_order`: `asc` or `desc` (case-insensitive); anything else becomes
///   `desc`.
/// - `search`: substring match against title or description.
/// - `status`: exact status match.
///
/// The response data carries `items`, `page`, `limit`, `total` and the
/// effective filter values after fallback, so callers can see what was
/// actually applied.
#[get("")]
pub async fn list_todos(
    pool: web::Data<PgPool>,
    query: web::Query<TodoQuery>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let page = todos::list(&pool, user.0, &query).await?;

    Ok(ApiResponse::ok(page, "Todos fetched successfully."))
}

/// Creates a todo owned by the authenticated user.
///
/// Status is forced to `pending`; a status field in the payload is ignored.
///
/// ## Responses:
/// - `201 Created`: envelope with the stored todo.
/// - `422 Unprocessable Entity`: title missing/too long or description
///   missing.
#[post("")]
pub async fn create_todo(
    pool: web::Data<PgPool>,
    todo_data: web::Json<TodoInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let todo = todos::create(pool.get_ref(), user.0, &todo_data).await?;

    Ok(ApiResponse::created(todo, "Todo created successfully."))
}

/// Updates the title and description of one of the user's todos.
///
/// ## Responses:
/// - `200 OK`: envelope with the updated todo.
/// - `403 Forbidden`: the todo exists but belongs to someone else. Checked
///   before payload validation, matching request order.
/// - `404 Not Found`: no live todo with this id.
/// - `422 Unprocessable Entity`: invalid payload.
#[put("/{id}")]
pub async fn update_todo(
    pool: web::Data<PgPool>,
    todo_id: web::Path<Uuid>,
    todo_data: web::Json<TodoInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let todo_id = todo_id.into_inner();

    let owner_id = todos::find_owner(pool.get_ref(), todo_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;
    if owner_id != user.0 {
        return Err(AppError::Forbidden);
    }

    todo_data.validate()?;

    let todo = todos::update(pool.get_ref(), user.0, todo_id, &todo_data).await?;

    Ok(ApiResponse::ok(todo, "Todo updated successfully."))
}

/// Soft-deletes one of the user's todos.
///
/// The row stays in storage with a deletion marker and disappears from all
/// further reads.
///
/// ## Responses:
/// - `200 OK`: envelope with `data: null`.
/// - `403 Forbidden`: the todo belongs to someone else.
/// - `404 Not Found`: no live todo with this id (including already-deleted
///   ones).
#[delete("/{id}")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    todo_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let todo_id = todo_id.into_inner();

    let owner_id = todos::find_owner(pool.get_ref(), todo_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;
    if owner_id != user.0 {
        return Err(AppError::Forbidden);
    }

    todos::soft_delete(pool.get_ref(), user.0, todo_id).await?;

    Ok(ApiResponse::ok(Value::Null, "Todo deleted successfully."))
}
