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
use crate::domain::rider_credentials::{
    CreateRiderCredentials, CredentialStatus, RiderCredentials, RiderCredentialsFilter,
    RiderCredentialsKey, RiderCredentialsQuery, RiderCredentialsRepository,
    RiderCredentialsSortField, UpdateRiderCredentials,
};
use crate::infrastructure::database::entities::{rider, rider_credentials};
use crate::infrastructure::database::predicate::{
    datetime_condition, enum_condition, string_condition,
};
use crate::query::SortDir;
use crate::shared::{PaginatedResult, StoreError, StoreResult};

pub struct SeaOrmRiderCredentialsRepository {
    db: DatabaseConnection,
}

impl SeaOrmRiderCredentialsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_entity(status: &CredentialStatus) -> rider_credentials::CredentialStatus {
    match status {
        CredentialStatus::Pending => rider_credentials::CredentialStatus::Pending,
        CredentialStatus::Approved => rider_credentials::CredentialStatus::Approved,
        CredentialStatus::Rejected => rider_credentials::CredentialStatus::Rejected,
    }
}

fn status_to_domain(status: rider_credentials::CredentialStatus) -> CredentialStatus {
    match status {
        rider_credentials::CredentialStatus::Pending => CredentialStatus::Pending,
        rider_credentials::CredentialStatus::Approved => CredentialStatus::Approved,
        rider_credentials::CredentialStatus::Rejected => CredentialStatus::Rejected,
    }
}

pub(crate) fn model_to_domain(m: rider_credentials::Model) -> RiderCredentials {
    RiderCredentials {
        id: m.id,
        rider_id: m.rider_id,
        nin: m.nin,
        driver_license: m.driver_license,
        plate_number: m.plate_number,
        status: status_to_domain(m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn key_condition(key: &RiderCredentialsKey) -> Condition {
    Condition::all().add(match key {
        RiderCredentialsKey::Id(v) => rider_credentials::Column::Id.eq(v.clone()),
        RiderCredentialsKey::Nin(v) => rider_credentials::Column::Nin.eq(v.clone()),
        RiderCredentialsKey::DriverLicense(v) => {
            rider_credentials::Column::DriverLicense.eq(v.clone())
        }
        RiderCredentialsKey::PlateNumber(v) => {
            rider_credentials::Column::PlateNumber.eq(v.clone())
        }
    })
}

fn key_parts(key: &RiderCredentialsKey) -> (&'static str, String) {
    match key {
        RiderCredentialsKey::Id(v) => ("id", v.clone()),
        RiderCredentialsKey::Nin(v) => ("nin", v.clone()),
        RiderCredentialsKey::DriverLicense(v) => ("driver_license", v.clone()),
        RiderCredentialsKey::PlateNumber(v) => ("plate_number", v.clone()),
    }
}

pub(crate) fn condition(f: &RiderCredentialsFilter) -> StoreResult<Condition> {
    let mut cond = Condition::all();
    if let Some(x) = &f.id {
        cond = cond.add(string_condition(rider_credentials::Column::Id, x));
    }
    if let Some(x) = &f.rider_id {
        cond = cond.add(string_condition(rider_credentials::Column::RiderId, x));
    }
    if let Some(x) = &f.nin {
        cond = cond.add(string_condition(rider_credentials::Column::Nin, x));
    }
    if let Some(x) = &f.driver_license {
        cond = cond.add(string_condition(rider_credentials::Column::DriverLicense, x));
    }
    if let Some(x) = &f.plate_number {
        cond = cond.add(string_condition(rider_credentials::Column::PlateNumber, x));
    }
    if let Some(x) = &f.status {
        cond = cond.add(enum_condition(
            rider_credentials::Column::Status,
            x,
            status_to_entity,
        ));
    }
    if let Some(x) = &f.created_at {
        cond = cond.add(datetime_condition(rider_credentials::Column::CreatedAt, x));
    }
    if let Some(x) = &f.updated_at {
        cond = cond.add(datetime_condition(rider_credentials::Column::UpdatedAt, x));
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

pub(crate) fn order_column(field: RiderCredentialsSortField) -> rider_credentials::Column {
    match field {
        RiderCredentialsSortField::Status => rider_credentials::Column::Status,
        RiderCredentialsSortField::CreatedAt => rider_credentials::Column::CreatedAt,
    }
}

// ── Write paths (shared with the batch executor) ────────────────

pub(crate) async fn insert_rider_credentials<C: ConnectionTrait>(
    conn: &C,
    data: CreateRiderCredentials,
) -> StoreResult<RiderCredentials> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let rider_exists = rider::Entity::find()
        .filter(rider::Column::Id.eq(data.rider_id.as_str()))
        .count(conn)
        .await?;
    if rider_exists == 0 {
        return Err(StoreError::not_found("Rider", "id", data.rider_id));
    }

    let now = Utc::now();
    let model = rider_credentials::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        rider_id: Set(data.rider_id),
        nin: Set(data.nin),
        driver_license: Set(data.driver_license),
        plate_number: Set(data.plate_number),
        status: Set(data
            .status
            .as_ref()
            .map_or(rider_credentials::CredentialStatus::Pending, status_to_entity)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model
        .insert(conn)
        .await
        .map_err(|e| map_write_err("RiderCredentials", e))?;
    debug!("Credentials {} submitted for rider {}", inserted.id, inserted.rider_id);
    Ok(model_to_domain(inserted))
}

pub(crate) async fn update_rider_credentials<C: ConnectionTrait>(
    conn: &C,
    key: &RiderCredentialsKey,
    data: UpdateRiderCredentials,
) -> StoreResult<RiderCredentials> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let existing = rider_credentials::Entity::find()
        .filter(key_condition(key))
        .one(conn)
        .await?;
    let Some(existing) = existing else {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("RiderCredentials", field, value));
    };

    let mut active: rider_credentials::ActiveModel = existing.into();
    if let Some(v) = data.nin {
        active.nin = Set(v);
    }
    if let Some(v) = data.driver_license {
        active.driver_license = Set(v);
    }
    if let Some(v) = data.plate_number {
        active.plate_number = Set(v);
    }
    if let Some(v) = data.status {
        active.status = Set(status_to_entity(&v));
    }
    active.updated_at = Set(Utc::now());

    let updated = active
        .update(conn)
        .await
        .map_err(|e| map_write_err("RiderCredentials", e))?;
    Ok(model_to_domain(updated))
}

pub(crate) async fn delete_rider_credentials<C: ConnectionTrait>(
    conn: &C,
    key: &RiderCredentialsKey,
) -> StoreResult<()> {
    let result = rider_credentials::Entity::delete_many()
        .filter(key_condition(key))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("RiderCredentials", field, value));
    }
    Ok(())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl RiderCredentialsRepository for SeaOrmRiderCredentialsRepository {
    async fn find_unique(&self, key: &RiderCredentialsKey) -> StoreResult<Option<RiderCredentials>> {
        let model = rider_credentials::Entity::find()
            .filter(key_condition(key))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn get(&self, key: &RiderCredentialsKey) -> StoreResult<RiderCredentials> {
        self.find_unique(key).await?.ok_or_else(|| {
            let (field, value) = key_parts(key);
            StoreError::not_found("RiderCredentials", field, value)
        })
    }

    async fn list(
        &self,
        query: &RiderCredentialsQuery,
    ) -> StoreResult<PaginatedResult<RiderCredentials>> {
        let page = query.page.normalized();

        let mut select = rider_credentials::Entity::find();
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

    async fn count(&self, filter: Option<&RiderCredentialsFilter>) -> StoreResult<u64> {
        let mut select = rider_credentials::Entity::find();
        if let Some(f) = filter {
            select = select.filter(condition(f)?);
        }
        Ok(select.count(&self.db).await?)
    }

    async fn create(&self, data: CreateRiderCredentials) -> StoreResult<RiderCredentials> {
        insert_rider_credentials(&self.db, data).await
    }

    async fn update(
        &self,
        key: &RiderCredentialsKey,
        data: UpdateRiderCredentials,
    ) -> StoreResult<RiderCredentials> {
        update_rider_credentials(&self.db, key, data).await
    }

    async fn delete(&self, key: &RiderCredentialsKey) -> StoreResult<()> {
        delete_rider_credentials(&self.db, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::{seed_rider, test_db};

    fn sample_create(rider_id: &str, tag: &str) -> CreateRiderCredentials {
        CreateRiderCredentials {
            rider_id: rider_id.to_string(),
            nin: format!("NIN-{}", tag),
            driver_license: format!("DL-{}", tag),
            plate_number: format!("LAG-{}", tag),
            status: None,
        }
    }

    #[tokio::test]
    async fn duplicate_nin_is_a_constraint_violation() {
        let db = test_db().await;
        let rider = seed_rider(&db, "alpha").await;
        let repo = SeaOrmRiderCredentialsRepository::new(db);

        repo.create(sample_create(&rider.id, "0001")).await.unwrap();
        let mut dup = sample_create(&rider.id, "0002");
        dup.nin = "NIN-0001".to_string();
        let err = repo.create(dup).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn resubmission_rows_coexist_per_rider() {
        let db = test_db().await;
        let rider = seed_rider(&db, "beta").await;
        let repo = SeaOrmRiderCredentialsRepository::new(db);

        let first = repo.create(sample_create(&rider.id, "1001")).await.unwrap();
        repo.update(
            &RiderCredentialsKey::Id(first.id),
            UpdateRiderCredentials {
                status: Some(CredentialStatus::Rejected),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        repo.create(sample_create(&rider.id, "1002")).await.unwrap();

        let filter = RiderCredentialsFilter {
            rider_id: Some(crate::query::StringFilter::equals(rider.id.clone())),
            ..Default::default()
        };
        assert_eq!(repo.count(Some(&filter)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn lookup_by_plate_number() {
        let db = test_db().await;
        let rider = seed_rider(&db, "gamma").await;
        let repo = SeaOrmRiderCredentialsRepository::new(db);

        let created = repo.create(sample_create(&rider.id, "2001")).await.unwrap();
        let found = repo
            .get(&RiderCredentialsKey::PlateNumber("LAG-2001".to_string()))
            .await
            .unwrap();
        assert_eq!(found.id, created.id);
    }
}
