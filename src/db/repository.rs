use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// One row of the `documents` table. `body` is the record's JSON without
/// its internal key.
#[derive(Debug, Clone, FromRow)]
pub struct StoredDocument {
    pub id: String,
    pub collection: String,
    pub logical_key: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

pub async fn list_documents(
    db: &SqlitePool,
    collection: &str,
) -> Result<Vec<StoredDocument>, sqlx::Error> {
    sqlx::query_as::<_, StoredDocument>(
        r#"
        SELECT id, collection, logical_key, body, created_at, updated_at
        FROM documents
        WHERE collection = ?1
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(collection)
    .fetch_all(db)
    .await
}

pub async fn find_document(
    db: &SqlitePool,
    collection: &str,
    id: &str,
) -> Result<Option<StoredDocument>, sqlx::Error> {
    sqlx::query_as::<_, StoredDocument>(
        "SELECT id, collection, logical_key, body, created_at, updated_at FROM documents WHERE collection = ?1 AND id = ?2",
    )
    .bind(collection)
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_document(
    db: &SqlitePool,
    collection: &str,
    logical_key: &str,
    body: &str,
) -> Result<StoredDocument, sqlx::Error> {
    let id = Uuid::new_v4().simple().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO documents
            (id, collection, logical_key, body, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        "#,
    )
    .bind(&id)
    .bind(collection)
    .bind(logical_key)
    .bind(body)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(StoredDocument {
        id,
        collection: collection.to_string(),
        logical_key: logical_key.to_string(),
        body: body.to_string(),
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn update_document(
    db: &SqlitePool,
    collection: &str,
    id: &str,
    logical_key: &str,
    body: &str,
) -> Result<Option<StoredDocument>, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        UPDATE documents
        SET logical_key = ?1,
            body = ?2,
            updated_at = ?3
        WHERE collection = ?4 AND id = ?5
        "#,
    )
    .bind(logical_key)
    .bind(body)
    .bind(&now)
    .bind(collection)
    .bind(id)
    .execute(db)
    .await?
    .rows_affected();

    if result == 0 {
        return Ok(None);
    }

    find_document(db, collection, id).await
}

pub async fn delete_document(
    db: &SqlitePool,
    collection: &str,
    id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM documents WHERE collection = ?1 AND id = ?2")
        .bind(collection)
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
