//! Importador de datos de arranque
//!
//! Corre una sola vez al inicio del proceso: si la tabla vehicles está
//! vacía, la siembra desde el CSV configurado o, si el archivo no existe,
//! con un set fijo de registros de muestra. Cualquier fallo se loguea y
//! se descarta; el seed nunca tumba el proceso.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::config::environment::EnvironmentConfig;
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::repositories::vehicle_repository::VehicleRepository;

/// Retraso antes del seed para dejar asentar la conexión
const STARTUP_DELAY: Duration = Duration::from_secs(1);

/// Task de arranque lanzada desde main
pub async fn run_startup_import(pool: SqlitePool, config: EnvironmentConfig) {
    tokio::time::sleep(STARTUP_DELAY).await;

    match import_if_empty(&pool, &config.csv_path).await {
        Ok(Some(count)) => info!("✅ Seed inicial completado: {} vehículos importados", count),
        Ok(None) => info!("Seed omitido: la tabla vehicles ya tiene datos"),
        Err(e) => error!("❌ Error importando datos de arranque: {}", e),
    }
}

/// Seed idempotente: solo actúa sobre una tabla vacía
pub async fn import_if_empty(pool: &SqlitePool, csv_path: &str) -> Result<Option<u64>> {
    let repository = VehicleRepository::new(pool.clone());

    if repository.count_all().await? > 0 {
        return Ok(None);
    }

    let records = if Path::new(csv_path).exists() {
        info!("Importando datos desde {}", csv_path);
        parse_csv(csv_path)?
    } else {
        info!("CSV no encontrado en {}, usando datos de muestra", csv_path);
        sample_vehicles()
    };

    let inserted = repository.insert_many(records).await?;
    Ok(Some(inserted))
}

/// Parsear el CSV de especificaciones. Texto recortado de espacios,
/// numéricos con fallback a cero si no parsean.
fn parse_csv(path: &str) -> Result<Vec<CreateVehicleRequest>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let text = |name: &str| -> String {
            headers
                .iter()
                .position(|h| h == name)
                .and_then(|i| row.get(i))
                .unwrap_or("")
                .trim()
                .to_string()
        };
        let integer = |name: &str| -> i64 { text(name).parse::<i64>().unwrap_or(0).max(0) };

        records.push(CreateVehicleRequest {
            brand: text("Brand"),
            model: text("Model"),
            accel_sec: text("AccelSec").parse::<f64>().unwrap_or(0.0).max(0.0),
            top_speed_km_h: integer("TopSpeed_KmH"),
            range_km: integer("Range_Km"),
            efficiency_wh_km: integer("Efficiency_WhKm"),
            fast_charge_km_h: integer("FastCharge_KmH"),
            rapid_charge: text("RapidCharge"),
            power_train: text("PowerTrain"),
            plug_type: text("PlugType"),
            body_style: text("BodyStyle"),
            segment: text("Segment"),
            seats: integer("Seats"),
            price_euro: integer("PriceEuro"),
            date: text("Date"),
        });
    }

    Ok(records)
}

/// Set fijo de registros de muestra para cuando no hay CSV
fn sample_vehicles() -> Vec<CreateVehicleRequest> {
    vec![
        CreateVehicleRequest {
            brand: "BMW".to_string(),
            model: "iX3".to_string(),
            accel_sec: 6.8,
            top_speed_km_h: 180,
            range_km: 460,
            efficiency_wh_km: 186,
            fast_charge_km_h: 560,
            rapid_charge: "Yes".to_string(),
            power_train: "RWD".to_string(),
            plug_type: "Type2 CCS".to_string(),
            body_style: "SUV".to_string(),
            segment: "D".to_string(),
            seats: 5,
            price_euro: 68040,
            date: "2021-01-01".to_string(),
        },
        CreateVehicleRequest {
            brand: "BMW".to_string(),
            model: "i4".to_string(),
            accel_sec: 5.7,
            top_speed_km_h: 190,
            range_km: 590,
            efficiency_wh_km: 165,
            fast_charge_km_h: 630,
            rapid_charge: "Yes".to_string(),
            power_train: "RWD".to_string(),
            plug_type: "Type2 CCS".to_string(),
            body_style: "Sedan".to_string(),
            segment: "D".to_string(),
            seats: 5,
            price_euro: 58300,
            date: "2021-01-01".to_string(),
        },
    ]
}
