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
use crate::domain::delivery::{
    CreateDelivery, Delivery, DeliveryFilter, DeliveryKey, DeliveryQuery, DeliveryRepository,
    DeliverySortField, DeliveryStatus, UpdateDelivery,
};
use crate::infrastructure::database::entities::{delivery, rider, user};
use crate::infrastructure::database::predicate::{
    bool_condition, datetime_condition, enum_condition, json_condition, string_condition,
};
use crate::query::SortDir;
use crate::shared::{PaginatedResult, StoreError, StoreResult};

pub struct SeaOrmDeliveryRepository {
    db: DatabaseConnection,
}

impl SeaOrmDeliveryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn status_to_entity(status: &DeliveryStatus) -> delivery::DeliveryStatus {
    match status {
        DeliveryStatus::Pending => delivery::DeliveryStatus::Pending,
        DeliveryStatus::Assigned => delivery::DeliveryStatus::Assigned,
        DeliveryStatus::PickedUp => delivery::DeliveryStatus::PickedUp,
        DeliveryStatus::Delivered => delivery::DeliveryStatus::Delivered,
        DeliveryStatus::Rejected => delivery::DeliveryStatus::Rejected,
    }
}

fn status_to_domain(status: delivery::DeliveryStatus) -> DeliveryStatus {
    match status {
        delivery::DeliveryStatus::Pending => DeliveryStatus::Pending,
        delivery::DeliveryStatus::Assigned => DeliveryStatus::Assigned,
        delivery::DeliveryStatus::PickedUp => DeliveryStatus::PickedUp,
        delivery::DeliveryStatus::Delivered => DeliveryStatus::Delivered,
        delivery::DeliveryStatus::Rejected => DeliveryStatus::Rejected,
    }
}

pub(crate) fn model_to_domain(m: delivery::Model) -> Delivery {
    Delivery {
        id: m.id,
        user_id: m.user_id,
        rider_id: m.rider_id,
        pickup_coordinate: m.pickup_coordinate,
        delivery_coordinate: m.delivery_coordinate,
        delivery_code: m.delivery_code,
        is_pickedup: m.is_pickedup,
        is_delivered: m.is_delivered,
        status: status_to_domain(m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn key_condition(key: &DeliveryKey) -> Condition {
    Condition::all().add(match key {
        DeliveryKey::Id(v) => delivery::Column::Id.eq(v.clone()),
        DeliveryKey::DeliveryCode(v) => delivery::Column::DeliveryCode.eq(v.clone()),
    })
}

fn key_parts(key: &DeliveryKey) -> (&'static str, String) {
    match key {
        DeliveryKey::Id(v) => ("id", v.clone()),
        DeliveryKey::DeliveryCode(v) => ("delivery_code", v.clone()),
    }
}

pub(crate) fn condition(f: &DeliveryFilter) -> StoreResult<Condition> {
    let mut cond = Condition::all();
    if let Some(x) = &f.id {
        cond = cond.add(string_condition(delivery::Column::Id, x));
    }
    if let Some(x) = &f.user_id {
        cond = cond.add(string_condition(delivery::Column::UserId, x));
    }
    if let Some(x) = &f.rider_id {
        cond = cond.add(string_condition(delivery::Column::RiderId, x));
    }
    if let Some(x) = &f.pickup_coordinate {
        cond = cond.add(json_condition(delivery::Column::PickupCoordinate, x)?);
    }
    if let Some(x) = &f.delivery_coordinate {
        cond = cond.add(json_condition(delivery::Column::DeliveryCoordinate, x)?);
    }
    if let Some(x) = &f.delivery_code {
        cond = cond.add(string_condition(delivery::Column::DeliveryCode, x));
    }
    if let Some(x) = &f.is_pickedup {
        cond = cond.add(bool_condition(delivery::Column::IsPickedup, x));
    }
    if let Some(x) = &f.is_delivered {
        cond = cond.add(bool_condition(delivery::Column::IsDelivered, x));
    }
    if let Some(x) = &f.status {
        cond = cond.add(enum_condition(delivery::Column::Status, x, status_to_entity));
    }
    if let Some(x) = &f.created_at {
        cond = cond.add(datetime_condition(delivery::Column::CreatedAt, x));
    }
    if let Some(x) = &f.updated_at {
        cond = cond.add(datetime_condition(delivery::Column::UpdatedAt, x));
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

pub(crate) fn order_column(field: DeliverySortField) -> delivery::Column {
    match field {
        DeliverySortField::Status => delivery::Column::Status,
        DeliverySortField::CreatedAt => delivery::Column::CreatedAt,
        DeliverySortField::UpdatedAt => delivery::Column::UpdatedAt,
    }
}

// ── FK guards ───────────────────────────────────────────────────

async fn ensure_user_exists<C: ConnectionTrait>(conn: &C, user_id: &str) -> StoreResult<()> {
    let found = user::Entity::find()
        .filter(user::Column::Id.eq(user_id))
        .count(conn)
        .await?;
    if found == 0 {
        return Err(StoreError::not_found("User", "id", user_id));
    }
    Ok(())
}

async fn ensure_rider_exists<C: ConnectionTrait>(conn: &C, rider_id: &str) -> StoreResult<()> {
    let found = rider::Entity::find()
        .filter(rider::Column::Id.eq(rider_id))
        .count(conn)
        .await?;
    if found == 0 {
        return Err(StoreError::not_found("Rider", "id", rider_id));
    }
    Ok(())
}

// ── Write paths (shared with the batch executor) ────────────────

pub(crate) async fn insert_delivery<C: ConnectionTrait>(
    conn: &C,
    data: CreateDelivery,
) -> StoreResult<Delivery> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    ensure_user_exists(conn, &data.user_id).await?;
    if let Some(rider_id) = &data.rider_id {
        ensure_rider_exists(conn, rider_id).await?;
    }

    let now = Utc::now();
    let status = data.status.as_ref().map_or_else(
        || {
            if data.rider_id.is_some() {
                delivery::DeliveryStatus::Assigned
            } else {
                delivery::DeliveryStatus::Pending
            }
        },
        status_to_entity,
    );

    let model = delivery::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(data.user_id),
        rider_id: Set(data.rider_id),
        pickup_coordinate: Set(data.pickup_coordinate),
        delivery_coordinate: Set(data.delivery_coordinate),
        delivery_code: Set(data.delivery_code),
        is_pickedup: Set(false),
        is_delivered: Set(false),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model
        .insert(conn)
        .await
        .map_err(|e| map_write_err("Delivery", e))?;
    debug!("Delivery created: {}", inserted.id);
    Ok(model_to_domain(inserted))
}

pub(crate) async fn update_delivery<C: ConnectionTrait>(
    conn: &C,
    key: &DeliveryKey,
    data: UpdateDelivery,
) -> StoreResult<Delivery> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let existing = delivery::Entity::find()
        .filter(key_condition(key))
        .one(conn)
        .await?;
    let Some(existing) = existing else {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("Delivery", field, value));
    };

    if let Some(Some(rider_id)) = &data.rider_id {
        ensure_rider_exists(conn, rider_id).await?;
    }

    let mut active: delivery::ActiveModel = existing.into();
    if let Some(v) = data.rider_id {
        active.rider_id = Set(v);
    }
    if let Some(v) = data.pickup_coordinate {
        active.pickup_coordinate = Set(v);
    }
    if let Some(v) = data.delivery_coordinate {
        active.delivery_coordinate = Set(v);
    }
    if let Some(v) = data.delivery_code {
        active.delivery_code = Set(v);
    }
    if let Some(v) = data.is_pickedup {
        active.is_pickedup = Set(v);
    }
    if let Some(v) = data.is_delivered {
        active.is_delivered = Set(v);
    }
    if let Some(v) = data.status {
        active.status = Set(status_to_entity(&v));
    }
    active.updated_at = Set(Utc::now());

    let updated = active
        .update(conn)
        .await
        .map_err(|e| map_write_err("Delivery", e))?;
    Ok(model_to_domain(updated))
}

pub(crate) async fn delete_delivery<C: ConnectionTrait>(
    conn: &C,
    key: &DeliveryKey,
) -> StoreResult<()> {
    let result = delivery::Entity::delete_many()
        .filter(key_condition(key))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("Delivery", field, value));
    }
    Ok(())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl DeliveryRepository for SeaOrmDeliveryRepository {
    async fn find_unique(&self, key: &DeliveryKey) -> StoreResult<Option<Delivery>> {
        let model = delivery::Entity::find()
            .filter(key_condition(key))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn get(&self, key: &DeliveryKey) -> StoreResult<Delivery> {
        self.find_unique(key).await?.ok_or_else(|| {
            let (field, value) = key_parts(key);
            StoreError::not_found("Delivery", field, value)
        })
    }

    async fn list(&self, query: &DeliveryQuery) -> StoreResult<PaginatedResult<Delivery>> {
        let page = query.page.normalized();

        let mut select = delivery::Entity::find();
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

    async fn count(&self, filter: Option<&DeliveryFilter>) -> StoreResult<u64> {
        let mut select = delivery::Entity::find();
        if let Some(f) = filter {
            select = select.filter(condition(f)?);
        }
        Ok(select.count(&self.db).await?)
    }

    async fn create(&self, data: CreateDelivery) -> StoreResult<Delivery> {
        insert_delivery(&self.db, data).await
    }

    async fn update(&self, key: &DeliveryKey, data: UpdateDelivery) -> StoreResult<Delivery> {
        update_delivery(&self.db, key, data).await
    }

    async fn delete(&self, key: &DeliveryKey) -> StoreResult<()> {
        delete_delivery(&self.db, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::delivery::generate_delivery_code;
    use crate::infrastructure::database::repositories::test_support::{
        seed_rider, seed_user, test_db,
    };
    use crate::query::{BoolFilter, JsonFilter};

    fn coords(lat: f64, lng: f64) -> serde_json::Value {
        serde_json::json!({"lat": lat, "lng": lng})
    }

    fn sample_create(user_id: &str) -> CreateDelivery {
        CreateDelivery {
            user_id: user_id.to_string(),
            rider_id: None,
            pickup_coordinate: coords(6.45, 3.39),
            delivery_coordinate: coords(6.52, 3.37),
            delivery_code: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn create_requires_existing_user() {
        let db = test_db().await;
        let repo = SeaOrmDeliveryRepository::new(db);
        let err = repo.create(sample_create("missing-user")).await.unwrap_err();
        assert!(
            matches!(err, StoreError::NotFound { entity: "User", .. }),
            "{err}"
        );
    }

    #[tokio::test]
    async fn assigning_unknown_rider_is_not_found() {
        let db = test_db().await;
        let user = seed_user(&db, "alpha").await;
        let repo = SeaOrmDeliveryRepository::new(db);
        let created = repo.create(sample_create(&user.id)).await.unwrap();

        let err = repo
            .update(
                &DeliveryKey::Id(created.id),
                UpdateDelivery {
                    rider_id: Some(Some("missing-rider".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Rider", .. }));
    }

    #[tokio::test]
    async fn assign_then_unassign_rider() {
        let db = test_db().await;
        let user = seed_user(&db, "beta").await;
        let rider = seed_rider(&db, "beta").await;
        let repo = SeaOrmDeliveryRepository::new(db);
        let created = repo.create(sample_create(&user.id)).await.unwrap();
        let key = DeliveryKey::Id(created.id.clone());

        let assigned = repo
            .update(
                &key,
                UpdateDelivery {
                    rider_id: Some(Some(rider.id.clone())),
                    status: Some(DeliveryStatus::Assigned),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(assigned.rider_id.as_deref(), Some(rider.id.as_str()));
        assert!(assigned.is_assigned());

        let unassigned = repo
            .update(
                &key,
                UpdateDelivery {
                    rider_id: Some(None),
                    status: Some(DeliveryStatus::Pending),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(unassigned.rider_id.is_none());
    }

    #[tokio::test]
    async fn delivery_code_is_unique_and_a_key() {
        let db = test_db().await;
        let user = seed_user(&db, "gamma").await;
        let repo = SeaOrmDeliveryRepository::new(db);

        let code = generate_delivery_code();
        let mut first = sample_create(&user.id);
        first.delivery_code = Some(code.clone());
        let created = repo.create(first).await.unwrap();

        let found = repo
            .find_unique(&DeliveryKey::DeliveryCode(code.clone()))
            .await
            .unwrap()
            .expect("row by code");
        assert_eq!(found.id, created.id);

        let mut second = sample_create(&user.id);
        second.delivery_code = Some(code);
        let err = repo.create(second).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn json_coordinate_filter_selects_by_latitude() {
        let db = test_db().await;
        let user = seed_user(&db, "delta").await;
        let repo = SeaOrmDeliveryRepository::new(db);

        repo.create(sample_create(&user.id)).await.unwrap();
        let mut far = sample_create(&user.id);
        far.pickup_coordinate = coords(9.08, 7.49);
        repo.create(far).await.unwrap();

        let filter = DeliveryFilter {
            pickup_coordinate: Some(JsonFilter::at(&["lat"]).equals(9.08)),
            ..Default::default()
        };
        let count = repo.count(Some(&filter)).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn open_deliveries_filter_combines_flags_and_status() {
        let db = test_db().await;
        let user = seed_user(&db, "epsilon").await;
        let repo = SeaOrmDeliveryRepository::new(db);

        let open = repo.create(sample_create(&user.id)).await.unwrap();
        let done = repo.create(sample_create(&user.id)).await.unwrap();
        repo.update(
            &DeliveryKey::Id(done.id),
            UpdateDelivery {
                is_pickedup: Some(true),
                is_delivered: Some(true),
                status: Some(DeliveryStatus::Delivered),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let query = DeliveryQuery {
            filter: Some(DeliveryFilter {
                is_delivered: Some(BoolFilter::equals(false)),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = repo.list(&query).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].id, open.id);
    }
}
