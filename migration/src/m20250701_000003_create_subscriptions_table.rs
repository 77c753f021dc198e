use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscriptions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::Uuid)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subscriptions::ConsumerId).integer().not_null())
                    .col(ColumnDef::new(Subscriptions::MessId).integer().not_null())
                    .col(ColumnDef::new(Subscriptions::PlanName).string().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::PlanDescription)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Subscriptions::Price).big_integer().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::DurationDays)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Subscriptions::StartsAt).timestamp().not_null())
                    .col(ColumnDef::new(Subscriptions::EndsAt).timestamp().not_null())
                    .col(ColumnDef::new(Subscriptions::Status).string().not_null())
                    .col(ColumnDef::new(Subscriptions::PaymentOrderRef).string())
                    .col(
                        ColumnDef::new(Subscriptions::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_consumer")
                            .from(Subscriptions::Table, Subscriptions::ConsumerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_mess")
                            .from(Subscriptions::Table, Subscriptions::MessId)
                            .to(MessProfiles::Table, MessProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscriptions_consumer_mess")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::ConsumerId)
                    .col(Subscriptions::MessId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    Uuid,
    ConsumerId,
    MessId,
    PlanName,
    PlanDescription,
    Price,
    DurationDays,
    StartsAt,
    EndsAt,
    Status,
    PaymentOrderRef,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum MessProfiles {
    Table,
    Id,
}
