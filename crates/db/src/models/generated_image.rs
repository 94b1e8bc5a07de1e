use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::entities::generated_image;

/// Sentinel identity used when a caller does not supply one.
pub const ANONYMOUS_USER_ID: &str = "anonymous";
/// Page size applied when a listing caller does not bound the result.
pub const DEFAULT_LIST_LIMIT: u64 = 50;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct GeneratedImage {
    pub id: i64,
    pub prompt: String,
    pub image_url: String,
    pub width: i64,
    pub height: i64,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
pub struct CreateGeneratedImage {
    pub prompt: String,
    pub image_url: String,
    pub width: i64,
    pub height: i64,
    pub user_id: String,
}

impl GeneratedImage {
    fn from_model(model: generated_image::Model) -> Self {
        Self {
            id: model.id,
            prompt: model.prompt,
            image_url: model.image_url,
            width: model.width,
            height: model.height,
            created_at: model.created_at,
            user_id: model.user_id,
        }
    }

    /// Inserts a record and returns it with the store-assigned `id` and
    /// `created_at`. Records are immutable after this point.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        data: &CreateGeneratedImage,
    ) -> Result<Self, DbErr> {
        let active = generated_image::ActiveModel {
            prompt: Set(data.prompt.clone()),
            image_url: Set(data.image_url.clone()),
            width: Set(data.width),
            height: Set(data.height),
            created_at: Set(Utc::now()),
            user_id: Set(data.user_id.clone()),
            ..Default::default()
        };
        let model = active.insert(db).await?;
        Ok(Self::from_model(model))
    }

    /// Newest-first listing for one identity. Ties on `created_at` fall back
    /// to `id` so pages stay stable under concurrent inserts.
    pub async fn list_for_user<C: ConnectionTrait>(
        db: &C,
        user_id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Self>, DbErr> {
        let records = generated_image::Entity::find()
            .filter(generated_image::Column::UserId.eq(user_id))
            .order_by_desc(generated_image::Column::CreatedAt)
            .order_by_desc(generated_image::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(db)
            .await?;
        Ok(records.into_iter().map(Self::from_model).collect())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;

    async fn setup_db() -> sea_orm::DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db_migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    fn record(prompt: &str, user_id: &str) -> CreateGeneratedImage {
        CreateGeneratedImage {
            prompt: prompt.to_string(),
            image_url: format!("https://cdn/{prompt}.png"),
            width: 1024,
            height: 1024,
            user_id: user_id.to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_created_at() {
        let db = setup_db().await;

        let before = Utc::now();
        let saved = GeneratedImage::create(&db, &record("fox", ANONYMOUS_USER_ID))
            .await
            .unwrap();

        assert!(saved.id > 0);
        assert_eq!(saved.prompt, "fox");
        assert_eq!(saved.image_url, "https://cdn/fox.png");
        assert_eq!((saved.width, saved.height), (1024, 1024));
        assert_eq!(saved.user_id, ANONYMOUS_USER_ID);
        assert!(saved.created_at.timestamp() >= before.timestamp());

        let next = GeneratedImage::create(&db, &record("owl", ANONYMOUS_USER_ID))
            .await
            .unwrap();
        assert!(next.id > saved.id);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_scoped_to_user() {
        let db = setup_db().await;

        for prompt in ["one", "two", "three"] {
            GeneratedImage::create(&db, &record(prompt, "alice"))
                .await
                .unwrap();
        }
        GeneratedImage::create(&db, &record("other", "bob"))
            .await
            .unwrap();

        let listed = GeneratedImage::list_for_user(&db, "alice", DEFAULT_LIST_LIMIT, 0)
            .await
            .unwrap();
        let prompts: Vec<_> = listed.iter().map(|r| r.prompt.as_str()).collect();
        assert_eq!(prompts, ["three", "two", "one"]);
        assert!(listed.iter().all(|r| r.user_id == "alice"));
    }

    #[tokio::test]
    async fn list_applies_limit_and_offset() {
        let db = setup_db().await;

        for prompt in ["a", "b", "c", "d"] {
            GeneratedImage::create(&db, &record(prompt, "alice"))
                .await
                .unwrap();
        }

        let page = GeneratedImage::list_for_user(&db, "alice", 2, 1).await.unwrap();
        let prompts: Vec<_> = page.iter().map(|r| r.prompt.as_str()).collect();
        assert_eq!(prompts, ["c", "b"]);
    }

    #[tokio::test]
    async fn list_returns_empty_for_unknown_user() {
        let db = setup_db().await;

        let listed = GeneratedImage::list_for_user(&db, "nobody", DEFAULT_LIST_LIMIT, 0)
            .await
            .unwrap();
        assert!(listed.is_empty());
    }
}
