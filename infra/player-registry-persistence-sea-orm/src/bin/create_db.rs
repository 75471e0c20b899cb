use player_registry_persistence_sea_orm::{DatabaseConfig, create_db_pool, entity::player};
use sea_orm::{ConnectionTrait, Schema};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = DatabaseConfig::from_env().expect("Invalid database configuration");
    let pool = create_db_pool(&config)
        .await
        .expect("Failed to connect to database");

    let schema = Schema::new(pool.get_database_backend());
    let player_table = schema.create_table_from_entity(player::Entity);

    pool.execute(&player_table)
        .await
        .expect("Failed to create players table");

    println!("Created database tables successfully");
}
