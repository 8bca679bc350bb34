use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::vehicle::Vehicle;
use crate::services::query_composer::ComposedQuery;
use crate::utils::errors::{AppError, AppResult};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, brand, model, accel_sec, top_speed_km_h, range_km, efficiency_wh_km, fast_charge_km_h, rapid_charge, power_train, plug_type, body_style, segment, seats, price_euro, date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.brand)
        .bind(request.model)
        .bind(request.accel_sec)
        .bind(request.top_speed_km_h)
        .bind(request.range_km)
        .bind(request.efficiency_wh_km)
        .bind(request.fast_charge_km_h)
        .bind(request.rapid_charge)
        .bind(request.power_train)
        .bind(request.plug_type)
        .bind(request.body_style)
        .bind(request.segment)
        .bind(request.seats)
        .bind(request.price_euro)
        .bind(request.date)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating vehicle: {}", e)))?;

        Ok(vehicle)
    }

    /// Insertar el lote de seed en una sola transacción
    pub async fn insert_many(&self, requests: Vec<CreateVehicleRequest>) -> AppResult<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting bulk insert: {}", e)))?;

        let mut inserted = 0u64;
        for request in requests {
            let now = Utc::now();
            sqlx::query(
                r#"
                INSERT INTO vehicles (id, brand, model, accel_sec, top_speed_km_h, range_km, efficiency_wh_km, fast_charge_km_h, rapid_charge, power_train, plug_type, body_style, segment, seats, price_euro, date, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(request.brand)
            .bind(request.model)
            .bind(request.accel_sec)
            .bind(request.top_speed_km_h)
            .bind(request.range_km)
            .bind(request.efficiency_wh_km)
            .bind(request.fast_charge_km_h)
            .bind(request.rapid_charge)
            .bind(request.power_train)
            .bind(request.plug_type)
            .bind(request.body_style)
            .bind(request.segment)
            .bind(request.seats)
            .bind(request.price_euro)
            .bind(request.date)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Error inserting vehicle: {}", e)))?;
            inserted += 1;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing bulk insert: {}", e)))?;

        Ok(inserted)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding vehicle: {}", e)))?;

        Ok(vehicle)
    }

    /// Página de resultados para la query compuesta
    pub async fn search(&self, query: &ComposedQuery) -> AppResult<Vec<Vehicle>> {
        let sql = query.select_sql();
        let mut stmt = sqlx::query_as::<_, Vehicle>(&sql);
        for bind in query.binds() {
            stmt = stmt.bind(bind);
        }
        let vehicles = stmt
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing vehicles: {}", e)))?;

        Ok(vehicles)
    }

    /// Total de registros que satisfacen el mismo predicado, sin paginar
    pub async fn count(&self, query: &ComposedQuery) -> AppResult<i64> {
        let sql = query.count_sql();
        let mut stmt = sqlx::query_scalar::<_, i64>(&sql);
        for bind in query.binds() {
            stmt = stmt.bind(bind);
        }
        let total = stmt
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error counting vehicles: {}", e)))?;

        Ok(total)
    }

    pub async fn count_all(&self) -> AppResult<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error counting vehicles: {}", e)))?;

        Ok(total)
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> AppResult<Vehicle> {
        // Obtener registro actual para el merge campo a campo
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET brand = ?, model = ?, accel_sec = ?, top_speed_km_h = ?, range_km = ?, efficiency_wh_km = ?, fast_charge_km_h = ?, rapid_charge = ?, power_train = ?, plug_type = ?, body_style = ?, segment = ?, seats = ?, price_euro = ?, date = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(request.brand.unwrap_or(current.brand))
        .bind(request.model.unwrap_or(current.model))
        .bind(request.accel_sec.unwrap_or(current.accel_sec))
        .bind(request.top_speed_km_h.unwrap_or(current.top_speed_km_h))
        .bind(request.range_km.unwrap_or(current.range_km))
        .bind(request.efficiency_wh_km.unwrap_or(current.efficiency_wh_km))
        .bind(request.fast_charge_km_h.unwrap_or(current.fast_charge_km_h))
        .bind(request.rapid_charge.unwrap_or(current.rapid_charge))
        .bind(request.power_train.unwrap_or(current.power_train))
        .bind(request.plug_type.unwrap_or(current.plug_type))
        .bind(request.body_style.unwrap_or(current.body_style))
        .bind(request.segment.unwrap_or(current.segment))
        .bind(request.seats.unwrap_or(current.seats))
        .bind(request.price_euro.unwrap_or(current.price_euro))
        .bind(request.date.unwrap_or(current.date))
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating vehicle: {}", e)))?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting vehicle: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        Ok(())
    }

    /// Valores distintos no vacíos de una columna whitelisteada,
    /// ordenados ascendente
    pub async fn distinct_values(&self, column: &'static str) -> AppResult<Vec<String>> {
        let sql = format!(
            "SELECT DISTINCT {col} FROM vehicles WHERE {col} IS NOT NULL AND {col} != '' ORDER BY {col} ASC",
            col = column
        );
        let values = sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing distinct values: {}", e)))?;

        Ok(values)
    }
}
