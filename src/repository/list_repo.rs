//! List Repository - SQLite CRUD Operations

use async_trait::async_trait;
use rusqlite::params;

use super::db::{db_error, SqliteStorage};
use super::traits::ListStorage;
use crate::domain::{Identifier, List, StorageError, StorageResult};

#[async_trait]
impl ListStorage for SqliteStorage {
    async fn fetch_lists(&self) -> StorageResult<Vec<List>> {
        self.run(|conn| {
            let err = db_error(StorageError::CannotFetch);
            let mut stmt = conn
                .prepare("SELECT id, name FROM lists ORDER BY position ASC, rowid ASC")
                .map_err(&err)?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(List::with_identifier(
                        Identifier::new(row.get::<_, String>(0)?),
                        row.get::<_, String>(1)?,
                    ))
                })
                .map_err(&err)?;
            let lists = rows.collect::<rusqlite::Result<Vec<_>>>().map_err(&err)?;
            Ok(lists)
        })
        .await
    }

    async fn create_list(&self, list: &List) -> StorageResult<Identifier> {
        let identifier = list.identifier.clone().unwrap_or_else(Identifier::generate);
        let name = list.name.clone();
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO lists (id, name, position)
                 VALUES (?1, ?2, (SELECT COALESCE(MAX(position), -1) + 1 FROM lists))",
                params![identifier.as_str(), name],
            )
            .map_err(db_error(StorageError::CannotCreate))?;
            Ok(identifier)
        })
        .await
    }

    async fn update_list(&self, identifier: &Identifier, name: Option<&str>) -> StorageResult<()> {
        let identifier = identifier.clone();
        let name = name.map(str::to_owned);
        self.run(move |conn| {
            let err = db_error(StorageError::CannotUpdate);
            let affected = match name {
                Some(name) => conn
                    .execute(
                        "UPDATE lists SET name = ?1 WHERE id = ?2",
                        params![name, identifier.as_str()],
                    )
                    .map_err(&err)?,
                None => conn
                    .query_row(
                        "SELECT COUNT(*) FROM lists WHERE id = ?1",
                        params![identifier.as_str()],
                        |row| row.get::<_, i64>(0),
                    )
                    .map_err(&err)? as usize,
            };
            if affected == 0 {
                log::warn!("Update of unknown list {}", identifier);
                return Err(StorageError::CannotUpdate);
            }
            Ok(())
        })
        .await
    }

    async fn delete_list(&self, identifier: &Identifier) -> StorageResult<()> {
        let identifier = identifier.clone();
        self.run(move |conn| {
            // Tasks go with it through ON DELETE CASCADE
            let affected = conn
                .execute("DELETE FROM lists WHERE id = ?1", params![identifier.as_str()])
                .map_err(db_error(StorageError::CannotDelete))?;
            if affected == 0 {
                log::warn!("Delete of unknown list {}", identifier);
                return Err(StorageError::CannotDelete);
            }
            Ok(())
        })
        .await
    }
}
