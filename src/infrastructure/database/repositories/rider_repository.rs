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
use crate::domain::rider::{
    CreateRider, Rider, RiderFilter, RiderKey, RiderQuery, RiderRepository, RiderSortField,
    RiderStatus, UpdateRider,
};
use crate::infrastructure::crypto::password::hash_password;
use crate::infrastructure::database::entities::rider;
use crate::infrastructure::database::predicate::{
    bool_condition, datetime_condition, enum_condition, float_condition, string_condition,
};
use crate::query::SortDir;
use crate::shared::{PaginatedResult, StoreError, StoreResult};

pub struct SeaOrmRiderRepository {
    db: DatabaseConnection,
}

impl SeaOrmRiderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn status_to_entity(status: &RiderStatus) -> rider::RiderStatus {
    match status {
        RiderStatus::Pending => rider::RiderStatus::Pending,
        RiderStatus::Approved => rider::RiderStatus::Approved,
        RiderStatus::Suspended => rider::RiderStatus::Suspended,
        RiderStatus::Inactive => rider::RiderStatus::Inactive,
    }
}

fn status_to_domain(status: rider::RiderStatus) -> RiderStatus {
    match status {
        rider::RiderStatus::Pending => RiderStatus::Pending,
        rider::RiderStatus::Approved => RiderStatus::Approved,
        rider::RiderStatus::Suspended => RiderStatus::Suspended,
        rider::RiderStatus::Inactive => RiderStatus::Inactive,
    }
}

pub(crate) fn model_to_domain(m: rider::Model) -> Rider {
    Rider {
        id: m.id,
        fullname: m.fullname,
        username: m.username,
        email: m.email,
        phone: m.phone,
        password: m.password,
        avg_rating: m.avg_rating,
        status: status_to_domain(m.status),
        is_verified: m.is_verified,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn key_condition(key: &RiderKey) -> Condition {
    Condition::all().add(match key {
        RiderKey::Id(v) => rider::Column::Id.eq(v.clone()),
        RiderKey::Username(v) => rider::Column::Username.eq(v.clone()),
        RiderKey::Email(v) => rider::Column::Email.eq(v.clone()),
        RiderKey::Phone(v) => rider::Column::Phone.eq(v.clone()),
    })
}

fn key_parts(key: &RiderKey) -> (&'static str, String) {
    match key {
        RiderKey::Id(v) => ("id", v.clone()),
        RiderKey::Username(v) => ("username", v.clone()),
        RiderKey::Email(v) => ("email", v.clone()),
        RiderKey::Phone(v) => ("phone", v.clone()),
    }
}

pub(crate) fn condition(f: &RiderFilter) -> StoreResult<Condition> {
    let mut cond = Condition::all();
    if let Some(x) = &f.id {
        cond = cond.add(string_condition(rider::Column::Id, x));
    }
    if let Some(x) = &f.fullname {
        cond = cond.add(string_condition(rider::Column::Fullname, x));
    }
    if let Some(x) = &f.username {
        cond = cond.add(string_condition(rider::Column::Username, x));
    }
    if let Some(x) = &f.email {
        cond = cond.add(string_condition(rider::Column::Email, x));
    }
    if let Some(x) = &f.phone {
        cond = cond.add(string_condition(rider::Column::Phone, x));
    }
    if let Some(x) = &f.avg_rating {
        cond = cond.add(float_condition(rider::Column::AvgRating, x));
    }
    if let Some(x) = &f.status {
        cond = cond.add(enum_condition(rider::Column::Status, x, status_to_entity));
    }
    if let Some(x) = &f.is_verified {
        cond = cond.add(bool_condition(rider::Column::IsVerified, x));
    }
    if let Some(x) = &f.created_at {
        cond = cond.add(datetime_condition(rider::Column::CreatedAt, x));
    }
    if let Some(x) = &f.updated_at {
        cond = cond.add(datetime_condition(rider::Column::UpdatedAt, x));
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

fn order_column(field: RiderSortField) -> rider::Column {
    match field {
        RiderSortField::Username => rider::Column::Username,
        RiderSortField::AvgRating => rider::Column::AvgRating,
        RiderSortField::CreatedAt => rider::Column::CreatedAt,
    }
}

// ── Write paths (shared with the batch executor) ────────────────

pub(crate) async fn insert_rider<C: ConnectionTrait>(
    conn: &C,
    data: CreateRider,
) -> StoreResult<Rider> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let now = Utc::now();
    let password = hash_password(&data.password)
        .map_err(|e| StoreError::Validation(format!("Failed to hash password: {}", e)))?;

    let model = rider::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        fullname: Set(data.fullname),
        username: Set(data.username),
        email: Set(data.email),
        phone: Set(data.phone),
        password: Set(password),
        avg_rating: Set(0.0),
        status: Set(data
            .status
            .as_ref()
            .map_or(rider::RiderStatus::Pending, status_to_entity)),
        is_verified: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model
        .insert(conn)
        .await
        .map_err(|e| map_write_err("Rider", e))?;
    debug!("Rider created: {}", inserted.id);
    Ok(model_to_domain(inserted))
}

pub(crate) async fn update_rider<C: ConnectionTrait>(
    conn: &C,
    key: &RiderKey,
    data: UpdateRider,
) -> StoreResult<Rider> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let existing = rider::Entity::find()
        .filter(key_condition(key))
        .one(conn)
        .await?;
    let Some(existing) = existing else {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("Rider", field, value));
    };

    let mut active: rider::ActiveModel = existing.into();
    if let Some(v) = data.fullname {
        active.fullname = Set(v);
    }
    if let Some(v) = data.username {
        active.username = Set(v);
    }
    if let Some(v) = data.email {
        active.email = Set(v);
    }
    if let Some(v) = data.phone {
        active.phone = Set(v);
    }
    if let Some(v) = data.password {
        let hashed = hash_password(&v)
            .map_err(|e| StoreError::Validation(format!("Failed to hash password: {}", e)))?;
        active.password = Set(hashed);
    }
    if let Some(v) = data.avg_rating {
        active.avg_rating = Set(v);
    }
    if let Some(v) = data.status {
        active.status = Set(status_to_entity(&v));
    }
    if let Some(v) = data.is_verified {
        active.is_verified = Set(v);
    }
    active.updated_at = Set(Utc::now());

    let updated = active
        .update(conn)
        .await
        .map_err(|e| map_write_err("Rider", e))?;
    Ok(model_to_domain(updated))
}

pub(crate) async fn delete_rider<C: ConnectionTrait>(conn: &C, key: &RiderKey) -> StoreResult<()> {
    let result = rider::Entity::delete_many()
        .filter(key_condition(key))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("Rider", field, value));
    }
    Ok(())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl RiderRepository for SeaOrmRiderRepository {
    async fn find_unique(&self, key: &RiderKey) -> StoreResult<Option<Rider>> {
        let model = rider::Entity::find()
            .filter(key_condition(key))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn get(&self, key: &RiderKey) -> StoreResult<Rider> {
        self.find_unique(key).await?.ok_or_else(|| {
            let (field, value) = key_parts(key);
            StoreError::not_found("Rider", field, value)
        })
    }

    async fn list(&self, query: &RiderQuery) -> StoreResult<PaginatedResult<Rider>> {
        let page = query.page.normalized();

        let mut select = rider::Entity::find();
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

    async fn count(&self, filter: Option<&RiderFilter>) -> StoreResult<u64> {
        let mut select = rider::Entity::find();
        if let Some(f) = filter {
            select = select.filter(condition(f)?);
        }
        Ok(select.count(&self.db).await?)
    }

    async fn create(&self, data: CreateRider) -> StoreResult<Rider> {
        insert_rider(&self.db, data).await
    }

    async fn update(&self, key: &RiderKey, data: UpdateRider) -> StoreResult<Rider> {
        update_rider(&self.db, key, data).await
    }

    async fn delete(&self, key: &RiderKey) -> StoreResult<()> {
        delete_rider(&self.db, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::test_db;
    use crate::query::EnumFilter;

    fn sample_create(tag: &str) -> CreateRider {
        CreateRider {
            fullname: format!("Test Rider {}", tag),
            username: format!("rider_{}", tag),
            email: format!("rider.{}@example.com", tag),
            phone: format!("+234700{}", tag),
            password: "ride-or-die-99".to_string(),
            status: None,
        }
    }

    #[tokio::test]
    async fn defaults_are_filled_on_create() {
        let repo = SeaOrmRiderRepository::new(test_db().await);
        let rider = repo.create(sample_create("alpha")).await.unwrap();
        assert_eq!(rider.status, RiderStatus::Pending);
        assert_eq!(rider.avg_rating, 0.0);
        assert!(!rider.is_verified);
    }

    #[tokio::test]
    async fn status_filter_matches_only_approved() {
        let repo = SeaOrmRiderRepository::new(test_db().await);
        let a = repo.create(sample_create("beta")).await.unwrap();
        repo.create(sample_create("gamma")).await.unwrap();

        repo.update(
            &RiderKey::Id(a.id.clone()),
            UpdateRider {
                status: Some(RiderStatus::Approved),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let filter = RiderFilter {
            status: Some(EnumFilter::equals(RiderStatus::Approved)),
            ..Default::default()
        };
        let count = repo.count(Some(&filter)).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn duplicate_phone_is_a_constraint_violation() {
        let repo = SeaOrmRiderRepository::new(test_db().await);
        repo.create(sample_create("delta")).await.unwrap();

        let mut dup = sample_create("epsilon");
        dup.phone = "+234700delta".to_string();
        let err = repo.create(dup).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
    }
}
