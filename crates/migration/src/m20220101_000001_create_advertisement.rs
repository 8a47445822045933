//! Create `advertisements` table.
//! Price is fixed-point NUMERIC(10, 2) and must stay positive; `created_at`
//! is filled by the database on insert.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advertisement::Table)
                    .if_not_exists()
                    .col(pk_auto(Advertisement::Id))
                    .col(string_len(Advertisement::Title, 255))
                    .col(text(Advertisement::Description))
                    .col(
                        decimal_len(Advertisement::Price, 10, 2)
                            .check(Expr::col(Advertisement::Price).gt(0)),
                    )
                    .col(string_len(Advertisement::Author, 100))
                    .col(
                        timestamp_with_time_zone(Advertisement::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Advertisement::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Advertisement {
    #[sea_orm(iden = "advertisements")]
    Table,
    Id,
    Title,
    Description,
    Price,
    Author,
    CreatedAt,
}
