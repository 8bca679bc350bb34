use crate::dto::vehicle_dto::{
    CreateVehicleRequest, DeleteResponse, ListQueryParams, UpdateVehicleRequest,
    VehicleListResponse,
};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::query_composer;
use crate::utils::errors::{AppError, AppResult};
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self, params: ListQueryParams) -> AppResult<VehicleListResponse> {
        let composed = query_composer::compose(&params)?;

        // Página y total corren como queries separadas sobre el mismo
        // predicado; una escritura concurrente puede moverlos entre ambas
        let (vehicles, total) = tokio::try_join!(
            self.repository.search(&composed),
            self.repository.count(&composed)
        )?;

        let total_pages = (total + composed.limit - 1) / composed.limit;

        Ok(VehicleListResponse {
            vehicles,
            total_pages,
            current_page: composed.page,
            total,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        self.repository.insert(request).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<Vehicle> {
        self.repository.update(id, request).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteResponse> {
        self.repository.delete(id).await?;
        Ok(DeleteResponse {
            message: "Vehicle deleted successfully".to_string(),
        })
    }

    pub async fn distinct_values(&self, field: &str) -> AppResult<Vec<String>> {
        let column = query_composer::resolve_distinct_column(field)?;
        self.repository.distinct_values(column).await
    }
}
