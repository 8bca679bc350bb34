//! Configuración de conexión a SQLite
//!
//! Este módulo maneja el pool de conexiones y la creación del schema.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS vehicles (
    id BLOB PRIMARY KEY,
    brand TEXT NOT NULL DEFAULT '',
    model TEXT NOT NULL DEFAULT '',
    accel_sec REAL NOT NULL DEFAULT 0,
    top_speed_km_h INTEGER NOT NULL DEFAULT 0,
    range_km INTEGER NOT NULL DEFAULT 0,
    efficiency_wh_km INTEGER NOT NULL DEFAULT 0,
    fast_charge_km_h INTEGER NOT NULL DEFAULT 0,
    rapid_charge TEXT NOT NULL DEFAULT '',
    power_train TEXT NOT NULL DEFAULT '',
    plug_type TEXT NOT NULL DEFAULT '',
    body_style TEXT NOT NULL DEFAULT '',
    segment TEXT NOT NULL DEFAULT '',
    seats INTEGER NOT NULL DEFAULT 0,
    price_euro INTEGER NOT NULL DEFAULT 0,
    date TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

/// Crear un pool de conexiones a la base de datos, con el schema listo
pub async fn create_pool(database_url: Option<&str>) -> Result<SqlitePool> {
    let database_url = match database_url {
        Some(url) => url.to_string(),
        None => std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://ev_catalog.db".to_string()),
    };

    // Cada conexión a :memory: abre una base distinta; el pool queda en
    // una sola conexión para que todas las queries vean la misma
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Crear la tabla vehicles si no existe. Idempotente.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}
