use sea_orm_migration::{prelude::*, sea_orm::DatabaseBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .if_not_exists()
                    .table(GeneratedImages::Table)
                    .col(pk_id_col(manager, GeneratedImages::Id))
                    .col(ColumnDef::new(GeneratedImages::Prompt).text().not_null())
                    .col(ColumnDef::new(GeneratedImages::ImageUrl).text().not_null())
                    .col(
                        ColumnDef::new(GeneratedImages::Width)
                            .integer()
                            .not_null()
                            .default(Expr::val(1024)),
                    )
                    .col(
                        ColumnDef::new(GeneratedImages::Height)
                            .integer()
                            .not_null()
                            .default(Expr::val(1024)),
                    )
                    .col(timestamp_col(GeneratedImages::CreatedAt))
                    .col(
                        ColumnDef::new(GeneratedImages::UserId)
                            .string_len(128)
                            .not_null()
                            .default(Expr::val("anonymous")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_generated_images_user_created")
                    .table(GeneratedImages::Table)
                    .col(GeneratedImages::UserId)
                    .col(GeneratedImages::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GeneratedImages::Table).to_owned())
            .await?;
        Ok(())
    }
}

fn pk_id_col<T: Iden>(manager: &SchemaManager, col: T) -> ColumnDef {
    let mut col = ColumnDef::new(col);
    match manager.get_database_backend() {
        DatabaseBackend::Sqlite => {
            col.integer();
        }
        _ => {
            col.big_integer();
        }
    }
    col.not_null().auto_increment().primary_key().to_owned()
}

fn timestamp_col<T: Iden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(Iden)]
enum GeneratedImages {
    Table,
    Id,
    Prompt,
    ImageUrl,
    Width,
    Height,
    CreatedAt,
    UserId,
}
