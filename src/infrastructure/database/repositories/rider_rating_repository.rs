use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::debug;
use validator::Validate;

use super::map_write_err;
use crate::domain::rider_rating::{
    CreateRiderRating, RiderRating, RiderRatingFilter, RiderRatingKey, RiderRatingQuery,
    RiderRatingRepository, RiderRatingSortField, UpdateRiderRating,
};
use crate::infrastructure::database::entities::{rider, rider_rating, user};
use crate::infrastructure::database::predicate::{
    datetime_condition, int_condition, string_condition,
};
use crate::query::SortDir;
use crate::shared::{PaginatedResult, StoreError, StoreResult};

pub struct SeaOrmRiderRatingRepository {
    db: DatabaseConnection,
}

impl SeaOrmRiderRatingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn model_to_domain(m: rider_rating::Model) -> RiderRating {
    RiderRating {
        id: m.id,
        rider_id: m.rider_id,
        user_id: m.user_id,
        rating: m.rating,
        review: m.review,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn key_condition(key: &RiderRatingKey) -> Condition {
    Condition::all().add(match key {
        RiderRatingKey::Id(v) => rider_rating::Column::Id.eq(v.clone()),
    })
}

fn key_parts(key: &RiderRatingKey) -> (&'static str, String) {
    match key {
        RiderRatingKey::Id(v) => ("id", v.clone()),
    }
}

pub(crate) fn condition(f: &RiderRatingFilter) -> StoreResult<Condition> {
    let mut cond = Condition::all();
    if let Some(x) = &f.id {
        cond = cond.add(string_condition(rider_rating::Column::Id, x));
    }
    if let Some(x) = &f.rider_id {
        cond = cond.add(string_condition(rider_rating::Column::RiderId, x));
    }
    if let Some(x) = &f.user_id {
        cond = cond.add(string_condition(rider_rating::Column::UserId, x));
    }
    if let Some(x) = &f.rating {
        cond = cond.add(int_condition(rider_rating::Column::Rating, x));
    }
    if let Some(x) = &f.review {
        cond = cond.add(string_condition(rider_rating::Column::Review, x));
    }
    if let Some(x) = &f.created_at {
        cond = cond.add(datetime_condition(rider_rating::Column::CreatedAt, x));
    }
    if let Some(x) = &f.updated_at {
        cond = cond.add(datetime_condition(rider_rating::Column::UpdatedAt, x));
    }
    for sub in &f.and {
        cond = cond.add(condition(sub)?);
    }
    if !f.or.is_empty() {
        let mut any = Condition::any();
        for sub in &f.or {
            any = any.add(condition(sub)?);
        }
        cond = cond.add(any);
    }
    for sub in &f.not {
        cond = cond.add(condition(sub)?.not());
    }
    Ok(cond)
}

pub(crate) fn order_column(field: RiderRatingSortField) -> rider_rating::Column {
    match field {
        RiderRatingSortField::Rating => rider_rating::Column::Rating,
        RiderRatingSortField::CreatedAt => rider_rating::Column::CreatedAt,
    }
}

// ── Write paths (shared with the batch executor) ────────────────

pub(crate) async fn insert_rider_rating<C: ConnectionTrait>(
    conn: &C,
    data: CreateRiderRating,
) -> StoreResult<RiderRating> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let rider_exists = rider::Entity::find()
        .filter(rider::Column::Id.eq(data.rider_id.as_str()))
        .count(conn)
        .await?;
    if rider_exists == 0 {
        return Err(StoreError::not_found("Rider", "id", data.rider_id));
    }
    let user_exists = user::Entity::find()
        .filter(user::Column::Id.eq(data.user_id.as_str()))
        .count(conn)
        .await?;
    if user_exists == 0 {
        return Err(StoreError::not_found("User", "id", data.user_id));
    }

    let now = Utc::now();
    let model = rider_rating::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        rider_id: Set(data.rider_id),
        user_id: Set(data.user_id),
        rating: Set(data.rating),
        review: Set(data.review),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model
        .insert(conn)
        .await
        .map_err(|e| map_write_err("RiderRating", e))?;
    debug!("Rating {} created for rider {}", inserted.id, inserted.rider_id);
    Ok(model_to_domain(inserted))
}

pub(crate) async fn update_rider_rating<C: ConnectionTrait>(
    conn: &C,
    key: &RiderRatingKey,
    data: UpdateRiderRating,
) -> StoreResult<RiderRating> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let existing = rider_rating::Entity::find()
        .filter(key_condition(key))
        .one(conn)
        .await?;
    let Some(existing) = existing else {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("RiderRating", field, value));
    };

    let mut active: rider_rating::ActiveModel = existing.into();
    if let Some(v) = data.rating {
        active.rating = Set(v);
    }
    if let Some(v) = data.review {
        active.review = Set(v);
    }
    active.updated_at = Set(Utc::now());

    let updated = active
        .update(conn)
        .await
        .map_err(|e| map_write_err("RiderRating", e))?;
    Ok(model_to_domain(updated))
}

pub(crate) async fn delete_rider_rating<C: ConnectionTrait>(
    conn: &C,
    key: &RiderRatingKey,
) -> StoreResult<()> {
    let result = rider_rating::Entity::delete_many()
        .filter(key_condition(key))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("RiderRating", field, value));
    }
    Ok(())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl RiderRatingRepository for SeaOrmRiderRatingRepository {
    async fn find_unique(&self, key: &RiderRatingKey) -> StoreResult<Option<RiderRating>> {
        let model = rider_rating::Entity::find()
            .filter(key_condition(key))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn get(&self, key: &RiderRatingKey) -> StoreResult<RiderRating> {
        self.find_unique(key).await?.ok_or_else(|| {
            let (field, value) = key_parts(key);
            StoreError::not_found("RiderRating", field, value)
        })
    }

    async fn list(&self, query: &RiderRatingQuery) -> StoreResult<PaginatedResult<RiderRating>> {
        let page = query.page.normalized();

        let mut select = rider_rating::Entity::find();
        if let Some(filter) = &query.filter {
            select = select.filter(condition(filter)?);
        }
        for (field, dir) in &query.order {
            select = select.order_by(
                order_column(*field),
                match dir {
                    SortDir::Asc => sea_orm::Order::Asc,
                    SortDir::Desc => sea_orm::Order::Desc,
                },
            );
        }

        let total = select.clone().count(&self.db).await?;
        let models = select
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn count(&self, filter: Option<&RiderRatingFilter>) -> StoreResult<u64> {
        let mut select = rider_rating::Entity::find();
        if let Some(f) = filter {
            select = select.filter(condition(f)?);
        }
        Ok(select.count(&self.db).await?)
    }

    async fn create(&self, data: CreateRiderRating) -> StoreResult<RiderRating> {
        insert_rider_rating(&self.db, data).await
    }

    async fn update(
        &self,
        key: &RiderRatingKey,
        data: UpdateRiderRating,
    ) -> StoreResult<RiderRating> {
        update_rider_rating(&self.db, key, data).await
    }

    async fn delete(&self, key: &RiderRatingKey) -> StoreResult<()> {
        delete_rider_rating(&self.db, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::{
        seed_rider, seed_user, test_db,
    };
    use crate::query::IntFilter;

    #[tokio::test]
    async fn rating_outside_range_fails_validation() {
        let db = test_db().await;
        let rider = seed_rider(&db, "alpha").await;
        let user = seed_user(&db, "alpha").await;
        let repo = SeaOrmRiderRatingRepository::new(db);

        let err = repo
            .create(CreateRiderRating {
                rider_id: rider.id,
                user_id: user.id,
                rating: 6,
                review: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn five_star_filter() {
        let db = test_db().await;
        let rider = seed_rider(&db, "beta").await;
        let user = seed_user(&db, "beta").await;
        let repo = SeaOrmRiderRatingRepository::new(db);

        for rating in [5, 3] {
            repo.create(CreateRiderRating {
                rider_id: rider.id.clone(),
                user_id: user.id.clone(),
                rating,
                review: None,
            })
            .await
            .unwrap();
        }

        let filter = RiderRatingFilter {
            rating: Some(IntFilter {
                gte: Some(5),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(repo.count(Some(&filter)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn clearing_review_stores_null() {
        let db = test_db().await;
        let rider = seed_rider(&db, "gamma").await;
        let user = seed_user(&db, "gamma").await;
        let repo = SeaOrmRiderRatingRepository::new(db);

        let rating = repo
            .create(CreateRiderRating {
                rider_id: rider.id,
                user_id: user.id,
                rating: 4,
                review: Some("quick and careful".to_string()),
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                &RiderRatingKey::Id(rating.id),
                UpdateRiderRating {
                    review: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.review.is_none());
    }
}
