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
use crate::domain::operating_area::{
    CreateOperatingArea, OperatingArea, OperatingAreaFilter, OperatingAreaKey, OperatingAreaQuery,
    OperatingAreaRepository, OperatingAreaSortField, OperatingAreaStatus, UpdateOperatingArea,
};
use crate::infrastructure::database::entities::operating_area;
use crate::infrastructure::database::predicate::{
    datetime_condition, enum_condition, string_condition,
};
use crate::query::SortDir;
use crate::shared::{PaginatedResult, StoreError, StoreResult};

pub struct SeaOrmOperatingAreaRepository {
    db: DatabaseConnection,
}

impl SeaOrmOperatingAreaRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_entity(status: &OperatingAreaStatus) -> operating_area::OperatingAreaStatus {
    match status {
        OperatingAreaStatus::Active => operating_area::OperatingAreaStatus::Active,
        OperatingAreaStatus::Inactive => operating_area::OperatingAreaStatus::Inactive,
    }
}

fn status_to_domain(status: operating_area::OperatingAreaStatus) -> OperatingAreaStatus {
    match status {
        operating_area::OperatingAreaStatus::Active => OperatingAreaStatus::Active,
        operating_area::OperatingAreaStatus::Inactive => OperatingAreaStatus::Inactive,
    }
}

fn model_to_domain(m: operating_area::Model) -> OperatingArea {
    OperatingArea {
        id: m.id,
        name: m.name,
        status: status_to_domain(m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn key_condition(key: &OperatingAreaKey) -> Condition {
    Condition::all().add(match key {
        OperatingAreaKey::Id(v) => operating_area::Column::Id.eq(v.clone()),
    })
}

fn key_parts(key: &OperatingAreaKey) -> (&'static str, String) {
    match key {
        OperatingAreaKey::Id(v) => ("id", v.clone()),
    }
}

pub(crate) fn condition(f: &OperatingAreaFilter) -> StoreResult<Condition> {
    let mut cond = Condition::all();
    if let Some(x) = &f.id {
        cond = cond.add(string_condition(operating_area::Column::Id, x));
    }
    if let Some(x) = &f.name {
        cond = cond.add(string_condition(operating_area::Column::Name, x));
    }
    if let Some(x) = &f.status {
        cond = cond.add(enum_condition(
            operating_area::Column::Status,
            x,
            status_to_entity,
        ));
    }
    if let Some(x) = &f.created_at {
        cond = cond.add(datetime_condition(operating_area::Column::CreatedAt, x));
    }
    if let Some(x) = &f.updated_at {
        cond = cond.add(datetime_condition(operating_area::Column::UpdatedAt, x));
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

fn order_column(field: OperatingAreaSortField) -> operating_area::Column {
    match field {
        OperatingAreaSortField::Name => operating_area::Column::Name,
        OperatingAreaSortField::CreatedAt => operating_area::Column::CreatedAt,
    }
}

// ── Write paths (shared with the batch executor) ────────────────

pub(crate) async fn insert_operating_area<C: ConnectionTrait>(
    conn: &C,
    data: CreateOperatingArea,
) -> StoreResult<OperatingArea> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let now = Utc::now();
    let model = operating_area::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(data.name),
        status: Set(data
            .status
            .as_ref()
            .map_or(operating_area::OperatingAreaStatus::Active, status_to_entity)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model
        .insert(conn)
        .await
        .map_err(|e| map_write_err("OperatingArea", e))?;
    debug!("Operating area created: {}", inserted.id);
    Ok(model_to_domain(inserted))
}

pub(crate) async fn update_operating_area<C: ConnectionTrait>(
    conn: &C,
    key: &OperatingAreaKey,
    data: UpdateOperatingArea,
) -> StoreResult<OperatingArea> {
    let existing = operating_area::Entity::find()
        .filter(key_condition(key))
        .one(conn)
        .await?;
    let Some(existing) = existing else {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("OperatingArea", field, value));
    };

    let mut active: operating_area::ActiveModel = existing.into();
    if let Some(v) = data.name {
        active.name = Set(v);
    }
    if let Some(v) = data.status {
        active.status = Set(status_to_entity(&v));
    }
    active.updated_at = Set(Utc::now());

    let updated = active
        .update(conn)
        .await
        .map_err(|e| map_write_err("OperatingArea", e))?;
    Ok(model_to_domain(updated))
}

pub(crate) async fn delete_operating_area<C: ConnectionTrait>(
    conn: &C,
    key: &OperatingAreaKey,
) -> StoreResult<()> {
    let result = operating_area::Entity::delete_many()
        .filter(key_condition(key))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("OperatingArea", field, value));
    }
    Ok(())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl OperatingAreaRepository for SeaOrmOperatingAreaRepository {
    async fn find_unique(&self, key: &OperatingAreaKey) -> StoreResult<Option<OperatingArea>> {
        let model = operating_area::Entity::find()
            .filter(key_condition(key))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn get(&self, key: &OperatingAreaKey) -> StoreResult<OperatingArea> {
        self.find_unique(key).await?.ok_or_else(|| {
            let (field, value) = key_parts(key);
            StoreError::not_found("OperatingArea", field, value)
        })
    }

    async fn list(&self, query: &OperatingAreaQuery) -> StoreResult<PaginatedResult<OperatingArea>> {
        let page = query.page.normalized();

        let mut select = operating_area::Entity::find();
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

    async fn count(&self, filter: Option<&OperatingAreaFilter>) -> StoreResult<u64> {
        let mut select = operating_area::Entity::find();
        if let Some(f) = filter {
            select = select.filter(condition(f)?);
        }
        Ok(select.count(&self.db).await?)
    }

    async fn create(&self, data: CreateOperatingArea) -> StoreResult<OperatingArea> {
        insert_operating_area(&self.db, data).await
    }

    async fn update(
        &self,
        key: &OperatingAreaKey,
        data: UpdateOperatingArea,
    ) -> StoreResult<OperatingArea> {
        update_operating_area(&self.db, key, data).await
    }

    async fn delete(&self, key: &OperatingAreaKey) -> StoreResult<()> {
        delete_operating_area(&self.db, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::test_db;
    use crate::query::EnumFilter;

    #[tokio::test]
    async fn create_defaults_to_active() {
        let repo = SeaOrmOperatingAreaRepository::new(test_db().await);
        let area = repo
            .create(CreateOperatingArea {
                name: "Yaba".to_string(),
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(area.status, OperatingAreaStatus::Active);
    }

    #[tokio::test]
    async fn deactivate_then_filter_by_status() {
        let repo = SeaOrmOperatingAreaRepository::new(test_db().await);
        let area = repo
            .create(CreateOperatingArea {
                name: "Ikeja".to_string(),
                status: None,
            })
            .await
            .unwrap();

        repo.update(
            &OperatingAreaKey::Id(area.id),
            UpdateOperatingArea {
                status: Some(OperatingAreaStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let filter = OperatingAreaFilter {
            status: Some(EnumFilter::equals(OperatingAreaStatus::Inactive)),
            ..Default::default()
        };
        assert_eq!(repo.count(Some(&filter)).await.unwrap(), 1);
    }
}
