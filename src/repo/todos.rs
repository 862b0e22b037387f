//! Todo storage and list-query composition.
//!
//! Every function takes the owning user's id; there is no way to reach
//! another user's rows from here. Soft-deleted rows are invisible to every
//! lookup.

use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::{Todo, TodoInput, TodoQuery, TodoStatus};

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_PAGE: i64 = 1;

const TODO_COLUMNS: &str =
    "id, user_id, title, description, status, created_at, updated_at, deleted_at";

/// Columns the list endpoint may sort by. Any other requested value falls
/// back to `CreatedAt` without erroring.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    CreatedAt,
    UpdatedAt,
    Title,
    Status,
}

impl SortBy {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("created_at") => SortBy::CreatedAt,
            Some("updated_at") => SortBy::UpdatedAt,
            Some("title") => SortBy::Title,
            Some("status") => SortBy::Status,
            _ => SortBy::CreatedAt,
        }
    }

    fn column(self) -> &'static str {
        match self {
            SortBy::CreatedAt => "created_at",
            SortBy::UpdatedAt => "updated_at",
            SortBy::Title => "title",
            SortBy::Status => "status",
        }
    }
}

/// Sort direction; anything that is not `asc` (case-insensitive) means
/// `desc`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// The post-validation filter values, echoed back to the caller so a silent
/// fallback (unknown sort field, bad sort order) is observable.
#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveFilters {
    pub search: String,
    pub status: Option<TodoStatus>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

/// One page of todos plus the pagination numbers and effective filters.
/// `total` counts every matching row, not just this page.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoPage {
    pub items: Vec<Todo>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub filters: EffectiveFilters,
}

/// Raw query parameters normalized into the values the SQL actually uses.
#[derive(Debug, PartialEq, Eq)]
struct ListParams {
    limit: i64,
    page: i64,
    sort_by: SortBy,
    sort_order: SortOrder,
    search: String,
    status: Option<TodoStatus>,
}

impl ListParams {
    fn from_query(query: &TodoQuery) -> Self {
        Self {
            // Defaults 10 and 1; no upper bound on limit.
            limit: query.limit.unwrap_or(DEFAULT_LIMIT).max(1),
            page: query.page.unwrap_or(DEFAULT_PAGE).max(1),
            sort_by: SortBy::parse(query.sort_by.as_deref()),
            sort_order: SortOrder::parse(query.sort_order.as_deref()),
            search: query.search.clone().unwrap_or_default(),
            status: query.status,
        }
    }
}

/// Lists one page of the owner's todos.
///
/// Conditions for the search term and status filter are appended
/// dynamically with numbered parameters; the sort column and direction come
/// from the allow-listed enums above and are interpolated as keywords.
pub async fn list(
    pool: &PgPool,
    owner_id: i32,
    query: &TodoQuery,
) -> Result<TodoPage, sqlx::Error> {
    let params = ListParams::from_query(query);

    let mut where_sql = String::from("WHERE user_id = $1 AND deleted_at IS NULL");
    let mut next_param = 2;

    if !params.search.is_empty() {
        where_sql.push_str(&format!(
            " AND (title ILIKE ${} OR description ILIKE ${})",
            next_param,
            next_param + 1
        ));
        next_param += 2;
    }
    if params.status.is_some() {
        where_sql.push_str(&format!(" AND status = ${}", next_param));
        next_param += 1;
    }

    let count_sql = format!("SELECT COUNT(*) FROM todos {}", where_sql);
    let page_sql = format!(
        "SELECT {} FROM todos {} ORDER BY {} {} LIMIT ${} OFFSET ${}",
        TODO_COLUMNS,
        where_sql,
        params.sort_by.column(),
        params.sort_order.keyword(),
        next_param,
        next_param + 1
    );

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(owner_id);
    let mut page_query = sqlx::query_as::<_, Todo>(&page_sql).bind(owner_id);

    if !params.search.is_empty() {
        let pattern = format!("%{}%", params.search);
        count_query = count_query.bind(pattern.clone()).bind(pattern.clone());
        page_query = page_query.bind(pattern.clone()).bind(pattern);
    }
    if let Some(status) = params.status {
        count_query = count_query.bind(status);
        page_query = page_query.bind(status);
    }

    let total = count_query.fetch_one(pool).await?;
    let items = page_query
        .bind(params.limit)
        .bind((params.page - 1) * params.limit)
        .fetch_all(pool)
        .await?;

    Ok(TodoPage {
        items,
        page: params.page,
        limit: params.limit,
        total,
        filters: EffectiveFilters {
            search: params.search,
            status: params.status,
            sort_by: params.sort_by,
            sort_order: params.sort_order,
        },
    })
}

/// Inserts a todo for the owner. Status always starts as `Pending`; the
/// client has no say.
pub async fn create(
    ex: impl PgExecutor<'_>,
    owner_id: i32,
    input: &TodoInput,
) -> Result<Todo, sqlx::Error> {
    sqlx::query_as::<_, Todo>(&format!(
        "INSERT INTO todos (id, user_id, title, description, status) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        TODO_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(TodoStatus::Pending)
    .fetch_one(ex)
    .await
}

/// Ownership probe for update/delete: who owns this live row, if anyone?
/// Soft-deleted rows report no owner.
pub async fn find_owner(
    ex: impl PgExecutor<'_>,
    todo_id: Uuid,
) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT user_id FROM todos WHERE id = $1 AND deleted_at IS NULL")
        .bind(todo_id)
        .fetch_optional(ex)
        .await
}

/// Rewrites title and description. Status is not reachable from here.
pub async fn update(
    ex: impl PgExecutor<'_>,
    owner_id: i32,
    todo_id: Uuid,
    input: &TodoInput,
) -> Result<Todo, sqlx::Error> {
    sqlx::query_as::<_, Todo>(&format!(
        "UPDATE todos SET title = $1, description = $2, updated_at = now() \
         WHERE id = $3 AND user_id = $4 AND deleted_at IS NULL RETURNING {}",
        TODO_COLUMNS
    ))
    .bind(&input.title)
    .bind(&input.description)
    .bind(todo_id)
    .bind(owner_id)
    .fetch_one(ex)
    .await
}

/// Marks the row deleted, keeping it in storage. Subsequent lookups treat
/// it as gone.
pub async fn soft_delete(
    ex: impl PgExecutor<'_>,
    owner_id: i32,
    todo_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE todos SET deleted_at = now() WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL",
    )
    .bind(todo_id)
    .bind(owner_id)
    .execute(ex)
    .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sort_by_allow_list_with_fallback() {
        assert_eq!(SortBy::parse(Some("created_at")), SortBy::CreatedAt);
        assert_eq!(SortBy::parse(Some("updated_at")), SortBy::UpdatedAt);
        assert_eq!(SortBy::parse(Some("title")), SortBy::Title);
        assert_eq!(SortBy::parse(Some("status")), SortBy::Status);

        // Unknown fields fall back silently instead of erroring.
        assert_eq!(SortBy::parse(Some("unknown_field")), SortBy::CreatedAt);
        assert_eq!(SortBy::parse(Some("Title")), SortBy::CreatedAt);
        assert_eq!(SortBy::parse(None), SortBy::CreatedAt);
    }

    #[test]
    fn test_sort_order_is_case_insensitive_with_desc_fallback() {
        assert_eq!(SortOrder::parse(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("ASC")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("sideways")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(None), SortOrder::Desc);
    }

    #[test]
    fn test_list_params_defaults() {
        let query = TodoQuery {
            limit: None,
            page: None,
            sort_by: None,
            sort_order: None,
            search: None,
            status: None,
        };
        let params = ListParams::from_query(&query);

        assert_eq!(
            params,
            ListParams {
                limit: DEFAULT_LIMIT,
                page: DEFAULT_PAGE,
                sort_by: SortBy::CreatedAt,
                sort_order: SortOrder::Desc,
                search: String::new(),
                status: None,
            }
        );
    }

    #[test]
    fn test_list_params_clamp_to_one() {
        let query = TodoQuery {
            limit: Some(0),
            page: Some(-3),
            sort_by: None,
            sort_order: None,
            search: None,
            status: None,
        };
        let params = ListParams::from_query(&query);

        assert_eq!(params.limit, 1);
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_effective_filters_serialize_as_wire_names() {
        let filters = EffectiveFilters {
            search: String::new(),
            status: Some(TodoStatus::Completed),
            sort_by: SortBy::CreatedAt,
            sort_order: SortOrder::Desc,
        };
        let value = serde_json::to_value(&filters).unwrap();

        assert_eq!(value["sort_by"], "created_at");
        assert_eq!(value["sort_order"], "desc");
        assert_eq!(value["status"], "completed");
        assert_eq!(value["search"], "");
    }
}
