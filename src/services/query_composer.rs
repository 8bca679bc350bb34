//! Composición de queries del listado
//!
//! Este módulo traduce los parámetros del grid (búsqueda libre, filtros por
//! columna, orden y paginación) a una cláusula WHERE parametrizada que
//! comparten el query de página y el query de conteo. Los nombres de campo
//! llegan en camelCase desde el cliente y se resuelven contra una tabla fija
//! campo → columna; un campo desconocido rechaza el request completo.

use std::collections::BTreeMap;

use crate::dto::vehicle_dto::{ColumnFilter, FilterMode, ListQueryParams};
use crate::utils::errors::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Columnas recorridas por la búsqueda de texto libre
const SEARCH_COLUMNS: [&str; 6] = [
    "brand",
    "model",
    "body_style",
    "power_train",
    "plug_type",
    "segment",
];

/// Campos habilitados para el lookup de valores distintos
const DISTINCT_FIELDS: [&str; 6] = [
    "brand",
    "bodyStyle",
    "powerTrain",
    "plugType",
    "segment",
    "rapidCharge",
];

/// Resolver un nombre de campo del wire a su columna SQL
fn resolve_column(field: &str) -> Option<&'static str> {
    match field {
        "brand" => Some("brand"),
        "model" => Some("model"),
        "accelSec" => Some("accel_sec"),
        "topSpeedKmH" => Some("top_speed_km_h"),
        "rangeKm" => Some("range_km"),
        "efficiencyWhKm" => Some("efficiency_wh_km"),
        "fastChargeKmH" => Some("fast_charge_km_h"),
        "rapidCharge" => Some("rapid_charge"),
        "powerTrain" => Some("power_train"),
        "plugType" => Some("plug_type"),
        "bodyStyle" => Some("body_style"),
        "segment" => Some("segment"),
        "seats" => Some("seats"),
        "priceEuro" => Some("price_euro"),
        "date" => Some("date"),
        "createdAt" => Some("created_at"),
        "updatedAt" => Some("updated_at"),
        _ => None,
    }
}

/// Resolver un campo del whitelist de valores distintos
pub fn resolve_distinct_column(field: &str) -> AppResult<&'static str> {
    if !DISTINCT_FIELDS.contains(&field) {
        return Err(AppError::BadRequest(format!(
            "Invalid filter field: {}",
            field
        )));
    }
    resolve_column(field)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid filter field: {}", field)))
}

/// Escapar metacaracteres de LIKE para que el valor del filtro
/// matchee literal
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == '%' || c == '_' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Query compuesta: WHERE + binds en orden, compartidos por el query de
/// página y el de conteo
#[derive(Debug)]
pub struct ComposedQuery {
    where_sql: String,
    binds: Vec<String>,
    order_sql: String,
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl ComposedQuery {
    pub fn select_sql(&self) -> String {
        format!(
            "SELECT * FROM vehicles{} {} LIMIT ? OFFSET ?",
            self.where_sql, self.order_sql
        )
    }

    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM vehicles{}", self.where_sql)
    }

    pub fn binds(&self) -> &[String] {
        &self.binds
    }
}

/// Componer la query del listado a partir de los parámetros del request.
/// La búsqueda y todos los filtros se combinan en conjunción.
pub fn compose(params: &ListQueryParams) -> AppResult<ComposedQuery> {
    let mut conditions: Vec<String> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    // Búsqueda libre: substring case-insensitive sobre el set fijo de
    // columnas de texto
    let search = params.search.as_deref().unwrap_or("");
    if !search.is_empty() {
        let pattern = format!("%{}%", escape_like(search));
        let ors: Vec<String> = SEARCH_COLUMNS
            .iter()
            .map(|col| format!("{} LIKE ? ESCAPE '\\'", col))
            .collect();
        conditions.push(format!("({})", ors.join(" OR ")));
        for _ in SEARCH_COLUMNS {
            binds.push(pattern.clone());
        }
    }

    // Filtros por columna, en orden estable de nombre de campo
    let filters = parse_column_filters(params.column_filters.as_deref())?;
    for (field, filter) in &filters {
        let column = resolve_column(field).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown filter field: {}", field))
        })?;

        match filter.mode {
            FilterMode::Equals => {
                conditions.push(format!("{} = ?", column));
                binds.push(filter.value.clone());
            }
            FilterMode::Contains => {
                conditions.push(format!("{} LIKE ? ESCAPE '\\'", column));
                binds.push(format!("%{}%", escape_like(&filter.value)));
            }
            FilterMode::StartsWith => {
                conditions.push(format!("{} LIKE ? ESCAPE '\\'", column));
                binds.push(format!("{}%", escape_like(&filter.value)));
            }
            FilterMode::EndsWith => {
                conditions.push(format!("{} LIKE ? ESCAPE '\\'", column));
                binds.push(format!("%{}", escape_like(&filter.value)));
            }
            FilterMode::IsEmpty => {
                conditions.push(format!("({col} IS NULL OR {col} = '')", col = column));
            }
        }
    }

    let where_sql = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    // Orden: una sola clave, fallback a brand; empates rotos por id para
    // que la paginación sea determinista sobre un dataset fijo
    let sort_column = params
        .sort_field
        .as_deref()
        .and_then(resolve_column)
        .unwrap_or("brand");
    let sort_direction = match params.sort_direction.as_deref() {
        Some("desc") => "DESC",
        _ => "ASC",
    };
    let order_sql = format!("ORDER BY {} {}, id ASC", sort_column, sort_direction);

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    Ok(ComposedQuery {
        where_sql,
        binds,
        order_sql,
        page,
        limit,
        offset: (page - 1) * limit,
    })
}

/// Parsear el parámetro columnFilters (objeto JSON serializado).
/// BTreeMap para que el orden de las cláusulas sea estable.
fn parse_column_filters(
    raw: Option<&str>,
) -> AppResult<BTreeMap<String, ColumnFilter>> {
    match raw {
        None | Some("") => Ok(BTreeMap::new()),
        Some(json) => serde_json::from_str(json)
            .map_err(|e| AppError::BadRequest(format!("Invalid columnFilters: {}", e))),
    }
}
