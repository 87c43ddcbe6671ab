use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)] // Full schema in one migration requires extensive table definitions
    #[allow(clippy::match_wildcard_for_single_variants)] // Wildcard matches for unsupported databases are semantically correct
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Enable UUID extension for PostgreSQL
        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            manager
                .get_connection()
                .execute_unprepared("CREATE EXTENSION IF NOT EXISTS \"uuid-ossp\";")
                .await?;
        }

        // Create farms table
        let mut farms_table = Table::create()
            .table(Farms::Table)
            .if_not_exists()
            .col(ColumnDef::new(Farms::Title).string().not_null())
            .col(ColumnDef::new(Farms::ImageUrl).text())
            .col(ColumnDef::new(Farms::Description).text())
            .col(ColumnDef::new(Farms::EntranceFee).decimal_len(6, 2))
            .col(ColumnDef::new(Farms::Phone).string())
            .col(ColumnDef::new(Farms::Email).string().unique_key())
            .col(ColumnDef::new(Farms::Website).text())
            .col(
                ColumnDef::new(Farms::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(Farms::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned();
        add_uuid_primary_key(manager, &mut farms_table, Farms::Id)?;
        manager.create_table(farms_table).await?;

        // Create addresses table (one per farm)
        let mut addresses_table = Table::create()
            .table(Addresses::Table)
            .if_not_exists()
            .col(ColumnDef::new(Addresses::Street).string().not_null())
            .col(ColumnDef::new(Addresses::City).string().not_null())
            .col(ColumnDef::new(Addresses::State).string().not_null())
            .col(ColumnDef::new(Addresses::Country).string().not_null())
            .col(ColumnDef::new(Addresses::ZipCode).string().not_null())
            .col(ColumnDef::new(Addresses::Latitude).double().not_null())
            .col(ColumnDef::new(Addresses::Longitude).double().not_null())
            .col(
                ColumnDef::new(Addresses::FarmId)
                    .uuid()
                    .not_null()
                    .unique_key(),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_addresses_farm_id")
                    .from(Addresses::Table, Addresses::FarmId)
                    .to(Farms::Table, Farms::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .to_owned();
        add_uuid_primary_key(manager, &mut addresses_table, Addresses::Id)?;
        manager.create_table(addresses_table).await?;

        // Create working_hours table
        let mut working_hours_table = Table::create()
            .table(WorkingHours::Table)
            .if_not_exists()
            .col(ColumnDef::new(WorkingHours::Day).string_len(3).not_null())
            .col(ColumnDef::new(WorkingHours::OpeningTime).time())
            .col(ColumnDef::new(WorkingHours::ClosingTime).time())
            .col(ColumnDef::new(WorkingHours::FarmId).uuid().not_null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_working_hours_farm_id")
                    .from(WorkingHours::Table, WorkingHours::FarmId)
                    .to(Farms::Table, Farms::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .to_owned();
        add_uuid_primary_key(manager, &mut working_hours_table, WorkingHours::Id)?;
        manager.create_table(working_hours_table).await?;

        // Create plant_categories table
        let mut plant_categories_table = Table::create()
            .table(PlantCategories::Table)
            .if_not_exists()
            .col(ColumnDef::new(PlantCategories::Name).string().not_null())
            .col(
                ColumnDef::new(PlantCategories::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(PlantCategories::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned();
        add_uuid_primary_key(manager, &mut plant_categories_table, PlantCategories::Id)?;
        manager.create_table(plant_categories_table).await?;

        // Create plants table; category deletion is blocked while referenced
        let mut plants_table = Table::create()
            .table(Plants::Table)
            .if_not_exists()
            .col(ColumnDef::new(Plants::Title).string().not_null())
            .col(ColumnDef::new(Plants::ScientificName).string())
            .col(ColumnDef::new(Plants::CountryOfOrigin).string())
            .col(ColumnDef::new(Plants::CategoryId).uuid().not_null())
            .col(
                ColumnDef::new(Plants::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(Plants::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_plants_category_id")
                    .from(Plants::Table, Plants::CategoryId)
                    .to(PlantCategories::Table, PlantCategories::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .to_owned();
        add_uuid_primary_key(manager, &mut plants_table, Plants::Id)?;
        manager.create_table(plants_table).await?;

        // Create farm_plants association table
        let mut farm_plants_table = Table::create()
            .table(FarmPlants::Table)
            .if_not_exists()
            .col(ColumnDef::new(FarmPlants::FarmId).uuid().not_null())
            .col(ColumnDef::new(FarmPlants::PlantId).uuid().not_null())
            .col(ColumnDef::new(FarmPlants::ImageUrl).text())
            .col(ColumnDef::new(FarmPlants::Description).text())
            .col(ColumnDef::new(FarmPlants::Organic).boolean().not_null())
            .col(ColumnDef::new(FarmPlants::SeasonStart).date().not_null())
            .col(ColumnDef::new(FarmPlants::SeasonEnd).date().not_null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_farm_plants_farm_id")
                    .from(FarmPlants::Table, FarmPlants::FarmId)
                    .to(Farms::Table, Farms::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_farm_plants_plant_id")
                    .from(FarmPlants::Table, FarmPlants::PlantId)
                    .to(Plants::Table, Plants::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .to_owned();
        add_uuid_primary_key(manager, &mut farm_plants_table, FarmPlants::Id)?;
        manager.create_table(farm_plants_table).await?;

        // Indexes for the list-query access patterns
        manager
            .create_index(
                Index::create()
                    .name("idx_addresses_lat_long")
                    .table(Addresses::Table)
                    .col(Addresses::Latitude)
                    .col(Addresses::Longitude)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_working_hours_day")
                    .table(WorkingHours::Table)
                    .col(WorkingHours::Day)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_farm_plants_plant_id")
                    .table(FarmPlants::Table)
                    .col(FarmPlants::PlantId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_farm_plants_farm_id")
                    .table(FarmPlants::Table)
                    .col(FarmPlants::FarmId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FarmPlants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlantCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WorkingHours::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Addresses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Farms::Table).to_owned())
            .await?;
        Ok(())
    }
}

/// Add an ID column with appropriate type and default based on database backend
fn add_uuid_primary_key<T>(
    manager: &SchemaManager<'_>,
    table: &mut TableCreateStatement,
    id_column: T,
) -> Result<(), DbErr>
where
    T: IntoIden + 'static,
{
    match manager.get_database_backend() {
        sea_orm::DatabaseBackend::Postgres => {
            table.col(
                ColumnDef::new(id_column)
                    .uuid()
                    .not_null()
                    .primary_key()
                    .default(Expr::cust("uuid_generate_v4()")),
            );
        }
        sea_orm::DatabaseBackend::Sqlite => {
            table.col(ColumnDef::new(id_column).uuid().not_null().primary_key());
        }
        _ => {
            return Err(DbErr::Custom("Unsupported database backend".to_string()));
        }
    }
    Ok(())
}

#[derive(DeriveIden)]
enum Farms {
    Table,
    Id,
    Title,
    ImageUrl,
    Description,
    EntranceFee,
    Phone,
    Email,
    Website,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
    Street,
    City,
    State,
    Country,
    ZipCode,
    Latitude,
    Longitude,
    FarmId,
}

#[derive(DeriveIden)]
enum WorkingHours {
    Table,
    Id,
    Day,
    OpeningTime,
    ClosingTime,
    FarmId,
}

#[derive(DeriveIden)]
enum PlantCategories {
    Table,
    Id,
    Name,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Plants {
    Table,
    Id,
    Title,
    ScientificName,
    CountryOfOrigin,
    CategoryId,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum FarmPlants {
    Table,
    Id,
    FarmId,
    PlantId,
    ImageUrl,
    Description,
    Organic,
    SeasonStart,
    SeasonEnd,
}
