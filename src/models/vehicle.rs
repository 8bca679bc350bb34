//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle que mapea exactamente
//! a la tabla vehicles con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles.
/// En el wire todos los campos van en camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub accel_sec: f64,
    pub top_speed_km_h: i64,
    pub range_km: i64,
    pub efficiency_wh_km: i64,
    pub fast_charge_km_h: i64,
    pub rapid_charge: String,
    pub power_train: String,
    pub plug_type: String,
    pub body_style: String,
    pub segment: String,
    pub seats: i64,
    pub price_euro: i64,
    pub date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_serializes_camel_case() {
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
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
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(json["topSpeedKmH"], 180);
        assert_eq!(json["efficiencyWhKm"], 186);
        assert_eq!(json["priceEuro"], 68040);
        assert_eq!(json["rapidCharge"], "Yes");
        assert!(json.get("top_speed_km_h").is_none());
    }
}
