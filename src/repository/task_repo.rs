//! Task Repository - SQLite CRUD Operations

use async_trait::async_trait;
use rusqlite::{params, Connection};

use super::db::{db_error, SqliteStorage};
use super::traits::TaskStorage;
use crate::domain::{Identifier, StorageError, StorageResult, Task};

fn list_exists(conn: &Connection, list_id: &Identifier) -> rusqlite::Result<bool> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM lists WHERE id = ?1",
        params![list_id.as_str()],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count > 0)
}

#[async_trait]
impl TaskStorage for SqliteStorage {
    async fn fetch_tasks(&self, list_id: &Identifier) -> StorageResult<Vec<Task>> {
        let list_id = list_id.clone();
        self.run(move |conn| {
            let err = db_error(StorageError::CannotFetch);
            if !list_exists(conn, &list_id).map_err(&err)? {
                log::warn!("Fetch of tasks for unknown list {}", list_id);
                return Err(StorageError::CannotFetch);
            }
            let mut stmt = conn
                .prepare(
                    "SELECT id, name, is_done FROM tasks WHERE list_id = ?1
                     ORDER BY position ASC, rowid ASC",
                )
                .map_err(&err)?;
            let rows = stmt
                .query_map(params![list_id.as_str()], |row| {
                    Ok(Task {
                        identifier: Identifier::new(row.get::<_, String>(0)?),
                        name: row.get::<_, String>(1)?,
                        is_done: row.get::<_, i64>(2)? != 0,
                    })
                })
                .map_err(&err)?;
            let tasks = rows.collect::<rusqlite::Result<Vec<_>>>().map_err(&err)?;
            Ok(tasks)
        })
        .await
    }

    async fn create_task(&self, list_id: &Identifier, task: &Task) -> StorageResult<Identifier> {
        let list_id = list_id.clone();
        let task = task.clone();
        self.run(move |conn| {
            let err = db_error(StorageError::CannotCreate);
            if !list_exists(conn, &list_id).map_err(&err)? {
                log::warn!("Create of task in unknown list {}", list_id);
                return Err(StorageError::CannotCreate);
            }
            conn.execute(
                "INSERT INTO tasks (id, list_id, name, is_done, position)
                 VALUES (?1, ?2, ?3, ?4,
                    (SELECT COALESCE(MAX(position), -1) + 1 FROM tasks WHERE list_id = ?2))",
                params![
                    task.identifier.as_str(),
                    list_id.as_str(),
                    task.name,
                    task.is_done
                ],
            )
            .map_err(&err)?;
            Ok(task.identifier)
        })
        .await
    }

    async fn update_task(
        &self,
        task_id: &Identifier,
        name: Option<&str>,
        is_done: Option<bool>,
    ) -> StorageResult<()> {
        let task_id = task_id.clone();
        let name = name.map(str::to_owned);
        self.run(move |conn| {
            let affected = conn
                .execute(
                    "UPDATE tasks SET name = COALESCE(?1, name), is_done = COALESCE(?2, is_done)
                     WHERE id = ?3",
                    params![name, is_done, task_id.as_str()],
                )
                .map_err(db_error(StorageError::CannotUpdate))?;
            if affected == 0 {
                log::warn!("Update of unknown task {}", task_id);
                return Err(StorageError::CannotUpdate);
            }
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, task_id: &Identifier) -> StorageResult<()> {
        let task_id = task_id.clone();
        self.run(move |conn| {
            let affected = conn
                .execute("DELETE FROM tasks WHERE id = ?1", params![task_id.as_str()])
                .map_err(db_error(StorageError::CannotDelete))?;
            if affected == 0 {
                log::warn!("Delete of unknown task {}", task_id);
                return Err(StorageError::CannotDelete);
            }
            Ok(())
        })
        .await
    }
}
