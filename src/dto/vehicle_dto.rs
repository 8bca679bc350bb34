//! DTOs de Vehicle
//!
//! Requests y responses del API de vehículos. Los campos numéricos de los
//! payloads se coercionan de forma permisiva: ausente, malformado o negativo
//! termina en cero, nunca en rechazo del request.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::vehicle::Vehicle;

/// Request para crear un vehículo
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accel_sec: f64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub top_speed_km_h: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub range_km: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub efficiency_wh_km: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub fast_charge_km_h: i64,
    #[serde(default)]
    pub rapid_charge: String,
    #[serde(default)]
    pub power_train: String,
    #[serde(default)]
    pub plug_type: String,
    #[serde(default)]
    pub body_style: String,
    #[serde(default)]
    pub segment: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub seats: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub price_euro: i64,
    #[serde(default)]
    pub date: String,
}

/// Request para actualizar un vehículo - todos los campos opcionales,
/// merge campo a campo sobre el registro existente
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub brand: Option<String>,
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub accel_sec: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub top_speed_km_h: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub range_km: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub efficiency_wh_km: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub fast_charge_km_h: Option<i64>,
    pub rapid_charge: Option<String>,
    pub power_train: Option<String>,
    pub plug_type: Option<String>,
    pub body_style: Option<String>,
    pub segment: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub seats: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub price_euro: Option<i64>,
    pub date: Option<String>,
}

/// Parámetros de query del listado
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQueryParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
    /// Objeto JSON serializado: { campo: { type, value } }
    pub column_filters: Option<String>,
}

/// Modo de un filtro por columna
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterMode {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    IsEmpty,
}

/// Filtro por columna tal como lo manda el cliente
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnFilter {
    #[serde(rename = "type")]
    pub mode: FilterMode,
    #[serde(default)]
    pub value: String,
}

/// Response del listado con envelope de paginación
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListResponse {
    pub vehicles: Vec<Vehicle>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total: i64,
}

/// Response de confirmación de borrado
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

// Coerción permisiva de numéricos: número, string numérico, o cero.
// Negativos se llevan a cero para sostener la invariante de no-negatividad.
fn coerce_f64(value: &serde_json::Value) -> f64 {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if parsed.is_finite() {
        parsed.max(0.0)
    } else {
        0.0
    }
}

fn coerce_i64(value: &serde_json::Value) -> i64 {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_i64().unwrap_or_else(|| n.as_f64().unwrap_or(0.0) as i64),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .unwrap_or_else(|_| s.parse::<f64>().map(|f| f as i64).unwrap_or(0))
        }
        _ => 0,
    };
    parsed.max(0)
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_i64(&value))
}

fn lenient_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(coerce_f64(&value)))
}

fn lenient_opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(coerce_i64(&value)))
}
