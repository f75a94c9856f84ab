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
use crate::domain::bank_details::{
    BankDetails, BankDetailsFilter, BankDetailsKey, BankDetailsQuery, BankDetailsRepository,
    BankDetailsSortField, CreateBankDetails, UpdateBankDetails,
};
use crate::infrastructure::database::entities::{bank_details, rider};
use crate::infrastructure::database::predicate::{datetime_condition, string_condition};
use crate::query::SortDir;
use crate::shared::{PaginatedResult, StoreError, StoreResult};

pub struct SeaOrmBankDetailsRepository {
    db: DatabaseConnection,
}

impl SeaOrmBankDetailsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn model_to_domain(m: bank_details::Model) -> BankDetails {
    BankDetails {
        id: m.id,
        rider_id: m.rider_id,
        bank_name: m.bank_name,
        account_number: m.account_number,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn key_condition(key: &BankDetailsKey) -> Condition {
    Condition::all().add(match key {
        BankDetailsKey::Id(v) => bank_details::Column::Id.eq(v.clone()),
        BankDetailsKey::RiderId(v) => bank_details::Column::RiderId.eq(v.clone()),
    })
}

fn key_parts(key: &BankDetailsKey) -> (&'static str, String) {
    match key {
        BankDetailsKey::Id(v) => ("id", v.clone()),
        BankDetailsKey::RiderId(v) => ("rider_id", v.clone()),
    }
}

pub(crate) fn condition(f: &BankDetailsFilter) -> StoreResult<Condition> {
    let mut cond = Condition::all();
    if let Some(x) = &f.id {
        cond = cond.add(string_condition(bank_details::Column::Id, x));
    }
    if let Some(x) = &f.rider_id {
        cond = cond.add(string_condition(bank_details::Column::RiderId, x));
    }
    if let Some(x) = &f.bank_name {
        cond = cond.add(string_condition(bank_details::Column::BankName, x));
    }
    if let Some(x) = &f.account_number {
        cond = cond.add(string_condition(bank_details::Column::AccountNumber, x));
    }
    if let Some(x) = &f.created_at {
        cond = cond.add(datetime_condition(bank_details::Column::CreatedAt, x));
    }
    if let Some(x) = &f.updated_at {
        cond = cond.add(datetime_condition(bank_details::Column::UpdatedAt, x));
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

fn order_column(field: BankDetailsSortField) -> bank_details::Column {
    match field {
        BankDetailsSortField::BankName => bank_details::Column::BankName,
        BankDetailsSortField::CreatedAt => bank_details::Column::CreatedAt,
    }
}

// ── Write paths (shared with the batch executor) ────────────────

pub(crate) async fn insert_bank_details<C: ConnectionTrait>(
    conn: &C,
    data: CreateBankDetails,
) -> StoreResult<BankDetails> {
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
    let model = bank_details::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        rider_id: Set(data.rider_id),
        bank_name: Set(data.bank_name),
        account_number: Set(data.account_number),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model
        .insert(conn)
        .await
        .map_err(|e| map_write_err("BankDetails", e))?;
    debug!("Bank details created for rider {}", inserted.rider_id);
    Ok(model_to_domain(inserted))
}

pub(crate) async fn update_bank_details<C: ConnectionTrait>(
    conn: &C,
    key: &BankDetailsKey,
    data: UpdateBankDetails,
) -> StoreResult<BankDetails> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let existing = bank_details::Entity::find()
        .filter(key_condition(key))
        .one(conn)
        .await?;
    let Some(existing) = existing else {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("BankDetails", field, value));
    };

    let mut active: bank_details::ActiveModel = existing.into();
    if let Some(v) = data.bank_name {
        active.bank_name = Set(v);
    }
    if let Some(v) = data.account_number {
        active.account_number = Set(v);
    }
    active.updated_at = Set(Utc::now());

    let updated = active
        .update(conn)
        .await
        .map_err(|e| map_write_err("BankDetails", e))?;
    Ok(model_to_domain(updated))
}

pub(crate) async fn delete_bank_details<C: ConnectionTrait>(
    conn: &C,
    key: &BankDetailsKey,
) -> StoreResult<()> {
    let result = bank_details::Entity::delete_many()
        .filter(key_condition(key))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("BankDetails", field, value));
    }
    Ok(())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl BankDetailsRepository for SeaOrmBankDetailsRepository {
    async fn find_unique(&self, key: &BankDetailsKey) -> StoreResult<Option<BankDetails>> {
        let model = bank_details::Entity::find()
            .filter(key_condition(key))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn get(&self, key: &BankDetailsKey) -> StoreResult<BankDetails> {
        self.find_unique(key).await?.ok_or_else(|| {
            let (field, value) = key_parts(key);
            StoreError::not_found("BankDetails", field, value)
        })
    }

    async fn list(&self, query: &BankDetailsQuery) -> StoreResult<PaginatedResult<BankDetails>> {
        let page = query.page.normalized();

        let mut select = bank_details::Entity::find();
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

    async fn count(&self, filter: Option<&BankDetailsFilter>) -> StoreResult<u64> {
        let mut select = bank_details::Entity::find();
        if let Some(f) = filter {
            select = select.filter(condition(f)?);
        }
        Ok(select.count(&self.db).await?)
    }

    async fn create(&self, data: CreateBankDetails) -> StoreResult<BankDetails> {
        insert_bank_details(&self.db, data).await
    }

    async fn update(
        &self,
        key: &BankDetailsKey,
        data: UpdateBankDetails,
    ) -> StoreResult<BankDetails> {
        update_bank_details(&self.db, key, data).await
    }

    async fn delete(&self, key: &BankDetailsKey) -> StoreResult<()> {
        delete_bank_details(&self.db, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::{seed_rider, test_db};

    #[tokio::test]
    async fn one_account_per_rider() {
        let db = test_db().await;
        let rider = seed_rider(&db, "alpha").await;
        let repo = SeaOrmBankDetailsRepository::new(db);

        repo.create(CreateBankDetails {
            rider_id: rider.id.clone(),
            bank_name: "First Bank".to_string(),
            account_number: "0123456789".to_string(),
        })
        .await
        .unwrap();

        let err = repo
            .create(CreateBankDetails {
                rider_id: rider.id.clone(),
                bank_name: "GTBank".to_string(),
                account_number: "9876543210".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));

        let by_rider = repo
            .get(&BankDetailsKey::RiderId(rider.id.clone()))
            .await
            .unwrap();
        assert_eq!(by_rider.bank_name, "First Bank");
    }

    #[tokio::test]
    async fn create_for_unknown_rider_is_not_found() {
        let repo = SeaOrmBankDetailsRepository::new(test_db().await);
        let err = repo
            .create(CreateBankDetails {
                rider_id: "missing".to_string(),
                bank_name: "First Bank".to_string(),
                account_number: "0123456789".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Rider", .. }));
    }
}
