// ============================
// ticklist-backend-lib/src/todo.rs
// ============================
//! Todo service and query engine: upsert, delete and the composite
//! filter + counted page fetch with category-name enrichment.
use chrono::{DateTime, Duration, NaiveDate, Utc};
use metrics::counter;
use ticklist_common::{PageResult, TodoUpsert, TodoView, TODO_STATUS_PENDING};
use uuid::Uuid;

use crate::error::AppError;
use crate::metrics::{TODO_CREATED, TODO_DELETED, TODO_PAGED, TODO_UPDATED};
use crate::storage::{Storage, Todo};

/// Default (and maximum) page size
const DEFAULT_PAGE_SIZE: i32 = 100;

/// Request-scoped filter for the paginated listing. Every field is
/// optional; set fields are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    /// Category equality when non-empty
    pub category_id: String,
    /// Status equality when `> 0`; `0` means "no filter", not status 0
    pub status: i32,
    /// Substring match against title OR content when non-empty
    pub keyword: String,
    /// `created_at >= start_date` at 00:00:00
    pub start_date: Option<NaiveDate>,
    /// `created_at <= end_date + 23:59:59` — inclusive of the whole day
    pub end_date: Option<NaiveDate>,
}

impl TodoFilter {
    fn matches(&self, todo: &Todo) -> bool {
        if !self.category_id.is_empty() && todo.category_id != self.category_id {
            return false;
        }

        if self.status > 0 && todo.status != self.status {
            return false;
        }

        if !self.keyword.is_empty()
            && !todo.title.contains(&self.keyword)
            && !todo.content.contains(&self.keyword)
        {
            return false;
        }

        if let Some(start) = self.start_date {
            let floor = start.and_hms_opt(0, 0, 0).unwrap().and_utc();
            if todo.created_at < floor {
                return false;
            }
        }

        if let Some(end) = self.end_date {
            let ceiling = end.and_hms_opt(0, 0, 0).unwrap().and_utc()
                + Duration::hours(23)
                + Duration::minutes(59)
                + Duration::seconds(59);
            if todo.created_at > ceiling {
                return false;
            }
        }

        true
    }
}

/// Create a todo, or update one when `req.id` is set.
///
/// Update semantics mirror a partial write: non-empty `title` and
/// `category_id`, `status > 0` and a supplied due date overwrite, while
/// `content` is always written — an empty string is a meaningful value
/// that clears the stored content, not an omission.
pub async fn create_or_update<S: Storage>(
    storage: &S,
    user_id: &str,
    due_date: Option<DateTime<Utc>>,
    req: &TodoUpsert,
) -> Result<(), AppError> {
    if req.id.is_empty() {
        if req.category_id.is_empty() {
            return Err(AppError::CategoryIdRequired);
        }
        if req.title.is_empty() {
            return Err(AppError::TitleRequired);
        }

        let now = Utc::now();
        let status = if req.status > 0 {
            req.status
        } else {
            TODO_STATUS_PENDING
        };
        storage
            .create_todo(Todo {
                id: Uuid::new_v4().to_string(),
                title: req.title.clone(),
                content: req.content.clone(),
                status,
                category_id: req.category_id.clone(),
                user_id: user_id.to_string(),
                due_date,
                created_at: now,
                updated_at: now,
            })
            .await?;
        counter!(TODO_CREATED).increment(1);
    } else {
        let mut todo = storage
            .todo_by_id(&req.id)
            .await?
            .ok_or(AppError::TodoNotFound)?;
        if todo.user_id != user_id {
            return Err(AppError::NotOwner);
        }

        if !req.title.is_empty() {
            todo.title = req.title.clone();
        }
        if !req.category_id.is_empty() {
            todo.category_id = req.category_id.clone();
        }
        if req.status > 0 {
            todo.status = req.status;
        }
        if due_date.is_some() {
            todo.due_date = due_date;
        }
        todo.content = req.content.clone();
        todo.updated_at = Utc::now();

        storage.update_todo(todo).await?;
        counter!(TODO_UPDATED).increment(1);
    }

    Ok(())
}

/// Delete a todo by id.
pub async fn delete<S: Storage>(storage: &S, user_id: &str, id: &str) -> Result<(), AppError> {
    let todo = storage
        .todo_by_id(id)
        .await?
        .ok_or(AppError::TodoNotFound)?;
    if todo.user_id != user_id {
        return Err(AppError::NotOwner);
    }

    storage.delete_todo(id).await?;
    counter!(TODO_DELETED).increment(1);
    Ok(())
}

/// One counted, filtered, ordered page of the caller's todos, each
/// record enriched with its category's display name.
pub async fn page<S: Storage>(
    storage: &S,
    user_id: &str,
    filter: &TodoFilter,
    page: i32,
    page_size: i32,
) -> Result<PageResult<TodoView>, AppError> {
    let page = if page < 1 { 1 } else { page };
    // Out-of-range sizes reset to the default ceiling, they are not
    // clamped to the nearest bound.
    let page_size = if !(1..=DEFAULT_PAGE_SIZE).contains(&page_size) {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    };

    let mut matched: Vec<Todo> = storage
        .todos_by_user(user_id)
        .await?
        .into_iter()
        .filter(|t| filter.matches(t))
        .collect();
    let total = matched.len() as i64;

    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let offset = ((page - 1) * page_size) as usize;
    let records: Vec<Todo> = matched
        .into_iter()
        .skip(offset)
        .take(page_size as usize)
        .collect();

    // Resolve the page's category names in one call. A missing
    // category fails the whole page; no partial results.
    let mut ids: Vec<String> = records.iter().map(|t| t.category_id.clone()).collect();
    ids.sort();
    ids.dedup();
    let names = storage.category_names(&ids).await?;

    let views = records
        .into_iter()
        .map(|t| {
            let category_name = names
                .get(&t.category_id)
                .cloned()
                .ok_or(AppError::CategoryNotFound)?;
            Ok(TodoView {
                id: t.id,
                title: t.title,
                content: t.content,
                status: t.status,
                category_id: t.category_id,
                category_name,
                due_date: t.due_date,
                created_at: t.created_at,
                updated_at: t.updated_at,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    counter!(TODO_PAGED).increment(1);
    Ok(PageResult {
        total,
        size: page_size,
        current: page,
        records: views,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo_created_at(created_at: DateTime<Utc>) -> Todo {
        Todo {
            id: "t1".to_string(),
            title: "write spec".to_string(),
            content: "draft the outline".to_string(),
            status: TODO_STATUS_PENDING,
            category_id: "c1".to_string(),
            user_id: "u1".to_string(),
            due_date: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TodoFilter::default();
        assert!(filter.matches(&todo_created_at(Utc::now())));
    }

    #[test]
    fn test_status_zero_means_no_filter() {
        let todo = todo_created_at(Utc::now());

        let unfiltered = TodoFilter {
            status: 0,
            ..TodoFilter::default()
        };
        assert!(unfiltered.matches(&todo));

        let completed_only = TodoFilter {
            status: 2,
            ..TodoFilter::default()
        };
        assert!(!completed_only.matches(&todo));
    }

    #[test]
    fn test_keyword_matches_title_or_content() {
        let todo = todo_created_at(Utc::now());

        let on_title = TodoFilter {
            keyword: "spec".to_string(),
            ..TodoFilter::default()
        };
        assert!(on_title.matches(&todo));

        let on_content = TodoFilter {
            keyword: "outline".to_string(),
            ..TodoFilter::default()
        };
        assert!(on_content.matches(&todo));

        let on_neither = TodoFilter {
            keyword: "missing".to_string(),
            ..TodoFilter::default()
        };
        assert!(!on_neither.matches(&todo));
    }

    #[test]
    fn test_end_date_includes_the_whole_day() {
        let todo = todo_created_at(ts("2024-01-05T23:59:59Z"));

        let including = TodoFilter {
            end_date: Some("2024-01-05".parse().unwrap()),
            ..TodoFilter::default()
        };
        assert!(including.matches(&todo));

        let excluding = TodoFilter {
            end_date: Some("2024-01-04".parse().unwrap()),
            ..TodoFilter::default()
        };
        assert!(!excluding.matches(&todo));
    }

    #[test]
    fn test_start_date_is_a_floor() {
        let todo = todo_created_at(ts("2024-01-05T00:00:00Z"));

        let at_floor = TodoFilter {
            start_date: Some("2024-01-05".parse().unwrap()),
            ..TodoFilter::default()
        };
        assert!(at_floor.matches(&todo));

        let after = TodoFilter {
            start_date: Some("2024-01-06".parse().unwrap()),
            ..TodoFilter::default()
        };
        assert!(!after.matches(&todo));
    }
}
