use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::repository::{self, StoredDocument};
use crate::collections::CollectionClient;
use crate::error::AppError;
use crate::models::Document;

/// [`CollectionClient`] backed by the local `documents` table.
pub struct SqliteCollection<T> {
    db: SqlitePool,
    _record: PhantomData<fn() -> T>,
}

impl<T: Document> SqliteCollection<T> {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    fn encode(record: &T) -> Result<String, AppError> {
        let mut body = record.clone();
        body.set_key(None);
        serde_json::to_string(&body).map_err(|e| AppError::Decode {
            collection: T::COLLECTION,
            message: format!("cannot encode record: {}", e),
        })
    }

    fn decode(document: StoredDocument) -> Result<T, AppError> {
        let mut record: T = serde_json::from_str(&document.body).map_err(|e| AppError::Decode {
            collection: T::COLLECTION,
            message: format!("document {}: {}", document.id, e),
        })?;
        record.set_key(Some(document.id));
        Ok(record)
    }

    fn write_error(logical_key: &str, e: sqlx::Error) -> AppError {
        match e.as_database_error() {
            Some(db) if db.is_unique_violation() => AppError::Conflict(format!(
                "{} already holds a record for {}",
                T::COLLECTION,
                logical_key
            )),
            _ => AppError::Database(e),
        }
    }
}

#[async_trait]
impl<T: Document> CollectionClient<T> for SqliteCollection<T> {
    async fn list_all(&self) -> Result<Vec<T>, AppError> {
        repository::list_documents(&self.db, T::COLLECTION)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    /// Any internal key on the payload is ignored; the store assigns one.
    async fn create(&self, payload: &T) -> Result<T, AppError> {
        let body = Self::encode(payload)?;
        let document =
            repository::insert_document(&self.db, T::COLLECTION, payload.logical_key(), &body)
                .await
                .map_err(|e| Self::write_error(payload.logical_key(), e))?;
        Self::decode(document)
    }

    async fn update(&self, key: &str, payload: &T) -> Result<T, AppError> {
        let body = Self::encode(payload)?;
        let document = repository::update_document(
            &self.db,
            T::COLLECTION,
            key,
            payload.logical_key(),
            &body,
        )
        .await
        .map_err(|e| Self::write_error(payload.logical_key(), e))?
        .ok_or(AppError::NotFound)?;
        Self::decode(document)
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        if repository::delete_document(&self.db, T::COLLECTION, key).await? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}
