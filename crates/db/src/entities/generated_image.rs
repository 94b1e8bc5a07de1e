use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "generated_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub prompt: String,
    pub image_url: String,
    pub width: i64,
    pub height: i64,
    pub created_at: DateTimeUtc,
    pub user_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
