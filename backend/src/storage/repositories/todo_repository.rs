use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::models::todo::Todo;
use crate::storage::connection::DbConnection;
use crate::storage::error::StoreError;
use crate::storage::traits::TodoStorage;

/// Range locally generated IDs are drawn from
pub const ID_RANGE: RangeInclusive<i64> = 1_000..=99_999_999;

/// Draws attempted before giving up on finding a free ID
pub const MAX_ID_ATTEMPTS: u32 = 100;

const SELECT_ALL: &str = r#"
    SELECT id, todoTitle, body, completed, date
    FROM TodoEntity
    ORDER BY date DESC, rowid ASC
"#;

const SELECT_BY_ID: &str = r#"
    SELECT id, todoTitle, body, completed, date
    FROM TodoEntity
    WHERE id = ?
"#;

const SEARCH: &str = r#"
    SELECT id, todoTitle, body, completed, date
    FROM TodoEntity
    WHERE todoTitle LIKE ? ESCAPE '\' OR body LIKE ? ESCAPE '\'
    ORDER BY date DESC, rowid ASC
"#;

const INSERT_OR_SKIP: &str = r#"
    INSERT INTO TodoEntity (id, todoTitle, body, completed, date)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT(id) DO NOTHING
"#;

const INSERT: &str = r#"
    INSERT INTO TodoEntity (id, todoTitle, body, completed, date)
    VALUES (?, ?, ?, ?, ?)
"#;

/// SQLite-backed local todo store.
///
/// All operations take `queue` for their whole duration. Tokio's mutex is
/// fair, so operations run one at a time in the order they were submitted.
#[derive(Clone)]
pub struct TodoRepository {
    db: DbConnection,
    queue: Arc<Mutex<()>>,
}

impl TodoRepository {
    pub fn new(db: DbConnection) -> Self {
        Self {
            db,
            queue: Arc::new(Mutex::new(())),
        }
    }

    fn todo_from_row(row: &SqliteRow) -> Result<Todo, sqlx::Error> {
        let date: Option<DateTime<Utc>> = row.try_get("date")?;
        Ok(Todo {
            id: row.try_get("id")?,
            title: row.try_get("todoTitle")?,
            body: row.try_get("body")?,
            completed: row.try_get("completed")?,
            created_date: date.unwrap_or_default(),
        })
    }

    async fn find_todo(tx: &mut Transaction<'static, Sqlite>, id: i64) -> Result<Option<Todo>, sqlx::Error> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;

        row.as_ref().map(Self::todo_from_row).transpose()
    }

    async fn fetch_ids(&self) -> Result<HashSet<i64>, sqlx::Error> {
        let rows = sqlx::query("SELECT id FROM TodoEntity")
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(|row| row.try_get::<i64, _>("id")).collect()
    }

    async fn begin(&self, on_error: fn(String) -> StoreError) -> Result<Transaction<'static, Sqlite>, StoreError> {
        self.db
            .pool()
            .begin()
            .await
            .map_err(|e| on_error(e.to_string()))
    }

    /// Commit on success, roll back otherwise.
    async fn finish<T>(
        tx: Transaction<'static, Sqlite>,
        outcome: Result<T, StoreError>,
        on_commit_error: fn(String) -> StoreError,
    ) -> Result<T, StoreError> {
        match outcome {
            Ok(value) => {
                // A transaction dropped after a failed commit is rolled back by sqlx
                tx.commit().await.map_err(|e| on_commit_error(e.to_string()))?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = tx.rollback().await {
                    warn!("Rollback failed: {}", rollback_error);
                }
                Err(error)
            }
        }
    }

    async fn insert_all(tx: &mut Transaction<'static, Sqlite>, todos: &[Todo]) -> Result<u64, StoreError> {
        let mut inserted = 0;
        for todo in todos {
            let result = sqlx::query(INSERT_OR_SKIP)
                .bind(todo.id)
                .bind(&todo.title)
                .bind(&todo.body)
                .bind(todo.completed)
                .bind(todo.created_date)
                .execute(&mut **tx)
                .await
                .map_err(|e| StoreError::SaveFailed(e.to_string()))?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    async fn toggle_in(tx: &mut Transaction<'static, Sqlite>, id: i64) -> Result<Todo, StoreError> {
        let mut todo = Self::find_todo(tx, id)
            .await
            .map_err(|e| StoreError::UpdateFailed(e.to_string()))?
            .ok_or(StoreError::NotFound(id))?;

        todo.completed = !todo.completed;

        sqlx::query("UPDATE TodoEntity SET completed = ? WHERE id = ?")
            .bind(todo.completed)
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(|e| StoreError::UpdateFailed(e.to_string()))?;

        Ok(todo)
    }

    async fn delete_in(tx: &mut Transaction<'static, Sqlite>, id: i64) -> Result<Todo, StoreError> {
        let snapshot = Self::find_todo(tx, id)
            .await
            .map_err(|e| StoreError::DeleteFailed(e.to_string()))?
            .ok_or(StoreError::NotFound(id))?;

        sqlx::query("DELETE FROM TodoEntity WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(|e| StoreError::DeleteFailed(e.to_string()))?;

        Ok(snapshot)
    }

    async fn edit_in(
        tx: &mut Transaction<'static, Sqlite>,
        id: i64,
        title: Option<String>,
        body: Option<String>,
    ) -> Result<Todo, StoreError> {
        let mut todo = Self::find_todo(tx, id)
            .await
            .map_err(|e| StoreError::UpdateFailed(e.to_string()))?
            .ok_or(StoreError::NotFound(id))?;

        sqlx::query("UPDATE TodoEntity SET todoTitle = ?, body = ? WHERE id = ?")
            .bind(&title)
            .bind(&body)
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(|e| StoreError::UpdateFailed(e.to_string()))?;

        todo.title = title;
        todo.body = body;
        Ok(todo)
    }
}

/// Draw a random ID from `range` that is not in `existing`
fn draw_unique_id<R: Rng>(
    rng: &mut R,
    range: RangeInclusive<i64>,
    existing: &HashSet<i64>,
    attempts: u32,
) -> Result<i64, StoreError> {
    for _ in 0..attempts {
        let candidate = rng.gen_range(range.clone());
        if !existing.contains(&candidate) {
            return Ok(candidate);
        }
    }
    Err(StoreError::IdsExhausted { attempts })
}

/// Wrap `text` in a LIKE pattern matching it as a literal substring
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl TodoStorage for TodoRepository {
    async fn insert_many(&self, todos: &[Todo]) -> Result<(), StoreError> {
        let _turn = self.queue.lock().await;
        debug!("Saving {} todos", todos.len());

        let mut tx = self.begin(StoreError::SaveFailed).await?;
        let outcome = Self::insert_all(&mut tx, todos).await;
        let inserted = Self::finish(tx, outcome, StoreError::SaveFailed).await?;

        let skipped = todos.len() as u64 - inserted;
        if skipped > 0 {
            info!("Saved {} todos, skipped {} with existing IDs", inserted, skipped);
        } else {
            info!("Saved {} todos", inserted);
        }
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Todo>, StoreError> {
        let _turn = self.queue.lock().await;

        let rows = sqlx::query(SELECT_ALL)
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| StoreError::FetchFailed(e.to_string()))?;

        rows.iter()
            .map(Self::todo_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::FetchFailed(e.to_string()))
    }

    async fn toggle_completed(&self, id: i64) -> Result<Todo, StoreError> {
        let _turn = self.queue.lock().await;
        debug!("Toggling completion of todo {}", id);

        let mut tx = self.begin(StoreError::UpdateFailed).await?;
        let outcome = Self::toggle_in(&mut tx, id).await;
        Self::finish(tx, outcome, StoreError::UpdateFailed).await
    }

    async fn delete(&self, id: i64) -> Result<Todo, StoreError> {
        let _turn = self.queue.lock().await;
        debug!("Deleting todo {}", id);

        let mut tx = self.begin(StoreError::DeleteFailed).await?;
        let outcome = Self::delete_in(&mut tx, id).await;
        Self::finish(tx, outcome, StoreError::DeleteFailed).await
    }

    async fn insert_one(&self, title: Option<String>, body: Option<String>) -> Result<Todo, StoreError> {
        let _turn = self.queue.lock().await;

        let existing = self
            .fetch_ids()
            .await
            .map_err(|e| StoreError::AddFailed(e.to_string()))?;
        let id = draw_unique_id(&mut rand::thread_rng(), ID_RANGE, &existing, MAX_ID_ATTEMPTS)?;

        let todo = Todo {
            id,
            title,
            body,
            completed: false,
            created_date: Utc::now(),
        };

        sqlx::query(INSERT)
            .bind(todo.id)
            .bind(&todo.title)
            .bind(&todo.body)
            .bind(todo.completed)
            .bind(todo.created_date)
            .execute(self.db.pool())
            .await
            .map_err(|e| StoreError::AddFailed(e.to_string()))?;

        debug!("Added todo {}", todo.id);
        Ok(todo)
    }

    async fn edit_title_and_body(
        &self,
        id: i64,
        title: Option<String>,
        body: Option<String>,
    ) -> Result<Todo, StoreError> {
        let _turn = self.queue.lock().await;
        debug!("Editing todo {}", id);

        let mut tx = self.begin(StoreError::UpdateFailed).await?;
        let outcome = Self::edit_in(&mut tx, id, title, body).await;
        Self::finish(tx, outcome, StoreError::UpdateFailed).await
    }

    async fn search(&self, text: &str) -> Result<Vec<Todo>, StoreError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let _turn = self.queue.lock().await;
        let pattern = like_pattern(text);

        let rows = sqlx::query(SEARCH)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| {
                warn!("Search query failed: {}", e);
                StoreError::SearchFailed
            })?;

        rows.iter()
            .map(Self::todo_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                warn!("Search result could not be read: {}", e);
                StoreError::SearchFailed
            })
    }
}
