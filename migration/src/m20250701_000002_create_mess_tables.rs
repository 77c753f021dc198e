use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Mess Profiles Table
        manager
            .create_table(
                Table::create()
                    .table(MessProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MessProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MessProfiles::OwnerId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MessProfiles::Name).string().not_null())
                    .col(ColumnDef::new(MessProfiles::ServiceType).string().not_null())
                    .col(ColumnDef::new(MessProfiles::Address).string().not_null())
                    .col(ColumnDef::new(MessProfiles::Latitude).double())
                    .col(ColumnDef::new(MessProfiles::Longitude).double())
                    .col(ColumnDef::new(MessProfiles::ImageUrl).string())
                    .col(
                        ColumnDef::new(MessProfiles::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MessProfiles::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mess_profiles_owner")
                            .from(MessProfiles::Table, MessProfiles::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Mess Plans Table
        manager
            .create_table(
                Table::create()
                    .table(MessPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MessPlans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MessPlans::MessId).integer().not_null())
                    .col(ColumnDef::new(MessPlans::Name).string().not_null())
                    .col(
                        ColumnDef::new(MessPlans::Description)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MessPlans::Price).big_integer().not_null())
                    .col(ColumnDef::new(MessPlans::DurationDays).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mess_plans_mess")
                            .from(MessPlans::Table, MessPlans::MessId)
                            .to(MessProfiles::Table, MessProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Mess Menus Table (one row per mess per date)
        manager
            .create_table(
                Table::create()
                    .table(MessMenus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MessMenus::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MessMenus::MessId).integer().not_null())
                    .col(ColumnDef::new(MessMenus::MenuDate).date().not_null())
                    .col(ColumnDef::new(MessMenus::Breakfast).text())
                    .col(ColumnDef::new(MessMenus::Lunch).text())
                    .col(ColumnDef::new(MessMenus::Dinner).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mess_menus_mess")
                            .from(MessMenus::Table, MessMenus::MessId)
                            .to(MessProfiles::Table, MessProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mess_menus_mess_date")
                    .table(MessMenus::Table)
                    .col(MessMenus::MessId)
                    .col(MessMenus::MenuDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MessMenus::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MessPlans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MessProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MessProfiles {
    Table,
    Id,
    OwnerId,
    Name,
    ServiceType,
    Address,
    Latitude,
    Longitude,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MessPlans {
    Table,
    Id,
    MessId,
    Name,
    Description,
    Price,
    DurationDays,
}

#[derive(DeriveIden)]
enum MessMenus {
    Table,
    Id,
    MessId,
    MenuDate,
    Breakfast,
    Lunch,
    Dinner,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
