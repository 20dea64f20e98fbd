use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{TripError, TripResult},
    models::{TripBreakdown, TripFilter, TripListing, TripRecord},
    repository::TripRepository,
    window::TimeRange,
};

#[derive(Clone)]
pub struct PgTripRepository {
    db: DatabaseConnection,
}

impl PgTripRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn store_err(e: sea_orm::DbErr) -> TripError {
    TripError::Store(format!("Database error: {}", e))
}

fn apply_range(mut query: Select<entity::Entity>, range: TimeRange) -> Select<entity::Entity> {
    if let Some(start) = range.start {
        query = query.filter(entity::Column::CreatedAt.gte(start));
    }
    if let Some(end) = range.end {
        query = query.filter(entity::Column::CreatedAt.lte(end));
    }
    query
}

fn apply_filter(query: Select<entity::Entity>, filter: TripFilter) -> Select<entity::Entity> {
    let query = apply_range(query, filter.range);
    match filter.owner_id {
        Some(owner_id) => query.filter(entity::Column::UserId.eq(owner_id)),
        None => query,
    }
}

#[async_trait]
impl TripRepository for PgTripRepository {
    async fn insert(&self, owner_id: Uuid, breakdown: TripBreakdown) -> TripResult<TripRecord> {
        let active_model: entity::ActiveModel = TripRecord::new(owner_id, breakdown).into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(store_err)?;

        tracing::info!(trip_id = %model.id, "Created trip");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> TripResult<Option<TripRecord>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(Into::into))
    }

    async fn list_by_window(&self, range: TimeRange) -> TripResult<Vec<TripRecord>> {
        let models = apply_range(entity::Entity::find(), range)
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> TripResult<Vec<TripRecord>> {
        let models = entity::Entity::find()
            .filter(entity::Column::UserId.eq(owner_id))
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_page(
        &self,
        filter: TripFilter,
        limit: u64,
        offset: u64,
    ) -> TripResult<Vec<TripListing>> {
        let rows = apply_filter(entity::Entity::find(), filter)
            .find_also_related(domain_users::entity::Entity)
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(rows
            .into_iter()
            .map(|(trip, owner)| TripListing::new(trip.into(), owner.map(|u| u.username)))
            .collect())
    }

    async fn count_matching(&self, filter: TripFilter) -> TripResult<u64> {
        apply_filter(entity::Entity::find(), filter)
            .count(&self.db)
            .await
            .map_err(store_err)
    }

    async fn delete_by_id(&self, id: Uuid) -> TripResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        if result.rows_affected > 0 {
            tracing::info!(trip_id = %id, "Deleted trip");
        }
        Ok(result.rows_affected > 0)
    }
}
