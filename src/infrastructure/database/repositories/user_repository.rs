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
use crate::domain::user::{
    CreateUser, UpdateUser, User, UserFilter, UserKey, UserQuery, UserRepository, UserSortField,
};
use crate::infrastructure::crypto::password::hash_password;
use crate::infrastructure::database::entities::user;
use crate::infrastructure::database::predicate::{
    datetime_condition, json_condition, string_condition,
};
use crate::query::SortDir;
use crate::shared::{PaginatedResult, StoreError, StoreResult};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        fullname: m.fullname,
        username: m.username,
        email: m.email,
        phone: m.phone,
        password: m.password,
        current_position: m.current_position,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn key_condition(key: &UserKey) -> Condition {
    Condition::all().add(match key {
        UserKey::Id(v) => user::Column::Id.eq(v.clone()),
        UserKey::Username(v) => user::Column::Username.eq(v.clone()),
        UserKey::Email(v) => user::Column::Email.eq(v.clone()),
        UserKey::Phone(v) => user::Column::Phone.eq(v.clone()),
    })
}

fn key_parts(key: &UserKey) -> (&'static str, String) {
    match key {
        UserKey::Id(v) => ("id", v.clone()),
        UserKey::Username(v) => ("username", v.clone()),
        UserKey::Email(v) => ("email", v.clone()),
        UserKey::Phone(v) => ("phone", v.clone()),
    }
}

pub(crate) fn condition(f: &UserFilter) -> StoreResult<Condition> {
    let mut cond = Condition::all();
    if let Some(x) = &f.id {
        cond = cond.add(string_condition(user::Column::Id, x));
    }
    if let Some(x) = &f.fullname {
        cond = cond.add(string_condition(user::Column::Fullname, x));
    }
    if let Some(x) = &f.username {
        cond = cond.add(string_condition(user::Column::Username, x));
    }
    if let Some(x) = &f.email {
        cond = cond.add(string_condition(user::Column::Email, x));
    }
    if let Some(x) = &f.phone {
        cond = cond.add(string_condition(user::Column::Phone, x));
    }
    if let Some(x) = &f.current_position {
        cond = cond.add(json_condition(user::Column::CurrentPosition, x)?);
    }
    if let Some(x) = &f.created_at {
        cond = cond.add(datetime_condition(user::Column::CreatedAt, x));
    }
    if let Some(x) = &f.updated_at {
        cond = cond.add(datetime_condition(user::Column::UpdatedAt, x));
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

fn order_column(field: UserSortField) -> user::Column {
    match field {
        UserSortField::Username => user::Column::Username,
        UserSortField::Email => user::Column::Email,
        UserSortField::CreatedAt => user::Column::CreatedAt,
    }
}

// ── Write paths (shared with the batch executor) ────────────────

pub(crate) async fn insert_user<C: ConnectionTrait>(
    conn: &C,
    data: CreateUser,
) -> StoreResult<User> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let now = Utc::now();
    let password = hash_password(&data.password)
        .map_err(|e| StoreError::Validation(format!("Failed to hash password: {}", e)))?;

    let model = user::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        fullname: Set(data.fullname),
        username: Set(data.username),
        email: Set(data.email),
        phone: Set(data.phone),
        password: Set(password),
        current_position: Set(data.current_position),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model
        .insert(conn)
        .await
        .map_err(|e| map_write_err("User", e))?;
    debug!("User created: {}", inserted.id);
    Ok(model_to_domain(inserted))
}

pub(crate) async fn update_user<C: ConnectionTrait>(
    conn: &C,
    key: &UserKey,
    data: UpdateUser,
) -> StoreResult<User> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let existing = user::Entity::find()
        .filter(key_condition(key))
        .one(conn)
        .await?;
    let Some(existing) = existing else {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("User", field, value));
    };

    let mut active: user::ActiveModel = existing.into();
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
    if let Some(v) = data.current_position {
        active.current_position = Set(v);
    }
    active.updated_at = Set(Utc::now());

    let updated = active
        .update(conn)
        .await
        .map_err(|e| map_write_err("User", e))?;
    Ok(model_to_domain(updated))
}

pub(crate) async fn delete_user<C: ConnectionTrait>(conn: &C, key: &UserKey) -> StoreResult<()> {
    let result = user::Entity::delete_many()
        .filter(key_condition(key))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("User", field, value));
    }
    Ok(())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_unique(&self, key: &UserKey) -> StoreResult<Option<User>> {
        let model = user::Entity::find()
            .filter(key_condition(key))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn get(&self, key: &UserKey) -> StoreResult<User> {
        self.find_unique(key).await?.ok_or_else(|| {
            let (field, value) = key_parts(key);
            StoreError::not_found("User", field, value)
        })
    }

    async fn list(&self, query: &UserQuery) -> StoreResult<PaginatedResult<User>> {
        let page = query.page.normalized();

        let mut select = user::Entity::find();
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

    async fn count(&self, filter: Option<&UserFilter>) -> StoreResult<u64> {
        let mut select = user::Entity::find();
        if let Some(f) = filter {
            select = select.filter(condition(f)?);
        }
        Ok(select.count(&self.db).await?)
    }

    async fn create(&self, data: CreateUser) -> StoreResult<User> {
        insert_user(&self.db, data).await
    }

    async fn update(&self, key: &UserKey, data: UpdateUser) -> StoreResult<User> {
        update_user(&self.db, key, data).await
    }

    async fn delete(&self, key: &UserKey) -> StoreResult<()> {
        delete_user(&self.db, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::test_db;
    use crate::query::StringFilter;

    fn sample_create(tag: &str) -> CreateUser {
        CreateUser {
            fullname: format!("Test User {}", tag),
            username: format!("user_{}", tag),
            email: format!("{}@example.com", tag),
            phone: format!("+234800{}", tag),
            password: "hunter2hunter2".to_string(),
            current_position: None,
        }
    }

    #[tokio::test]
    async fn create_then_find_unique_by_each_key() {
        let repo = SeaOrmUserRepository::new(test_db().await);
        let created = repo.create(sample_create("alpha")).await.unwrap();

        for key in [
            UserKey::Id(created.id.clone()),
            UserKey::Username(created.username.clone()),
            UserKey::Email(created.email.clone()),
            UserKey::Phone(created.phone.clone()),
        ] {
            let found = repo.find_unique(&key).await.unwrap().expect("row exists");
            assert_eq!(found, created);
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_constraint_violation() {
        let repo = SeaOrmUserRepository::new(test_db().await);
        repo.create(sample_create("beta")).await.unwrap();

        let mut dup = sample_create("gamma");
        dup.email = "beta@example.com".to_string();
        let err = repo.create(dup).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)), "{err}");
    }

    #[tokio::test]
    async fn delete_then_lookup_misses() {
        let repo = SeaOrmUserRepository::new(test_db().await);
        let created = repo.create(sample_create("delta")).await.unwrap();
        let key = UserKey::Id(created.id.clone());

        repo.delete(&key).await.unwrap();
        assert!(repo.find_unique(&key).await.unwrap().is_none());
        let err = repo.get(&key).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        let err = repo.delete(&key).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_is_idempotent() {
        let repo = SeaOrmUserRepository::new(test_db().await);
        let created = repo.create(sample_create("epsilon")).await.unwrap();
        let key = UserKey::Id(created.id.clone());
        let patch = UpdateUser {
            fullname: Some("Renamed".to_string()),
            current_position: Some(Some(serde_json::json!({"lat": 6.5, "lng": 3.3}))),
            ..Default::default()
        };

        let once = repo.update(&key, patch.clone()).await.unwrap();
        let twice = repo.update(&key, patch).await.unwrap();
        assert_eq!(once.fullname, "Renamed");
        assert_eq!(once.fullname, twice.fullname);
        assert_eq!(once.current_position, twice.current_position);
    }

    #[tokio::test]
    async fn clearing_position_stores_null() {
        let repo = SeaOrmUserRepository::new(test_db().await);
        let mut create = sample_create("zeta");
        create.current_position = Some(serde_json::json!({"lat": 1.0, "lng": 2.0}));
        let created = repo.create(create).await.unwrap();
        assert!(created.current_position.is_some());

        let key = UserKey::Id(created.id.clone());
        let cleared = repo
            .update(
                &key,
                UpdateUser {
                    current_position: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.current_position.is_none());
    }

    #[tokio::test]
    async fn invalid_email_fails_validation() {
        let repo = SeaOrmUserRepository::new(test_db().await);
        let mut bad = sample_create("eta");
        bad.email = "not-an-email".to_string();
        let err = repo.create(bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn list_filters_and_orders() {
        let repo = SeaOrmUserRepository::new(test_db().await);
        for tag in ["theta", "iota", "kappa"] {
            repo.create(sample_create(tag)).await.unwrap();
        }

        let query = UserQuery {
            filter: Some(UserFilter {
                username: Some(StringFilter {
                    starts_with: Some("user_".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            order: vec![(UserSortField::Username, SortDir::Desc)],
            ..Default::default()
        };
        let result = repo.list(&query).await.unwrap();
        assert_eq!(result.total, 3);
        let names: Vec<_> = result.items.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["user_theta", "user_kappa", "user_iota"]);
    }

    #[tokio::test]
    async fn nested_or_not_filter() {
        let repo = SeaOrmUserRepository::new(test_db().await);
        for tag in ["lambda", "mu"] {
            repo.create(sample_create(tag)).await.unwrap();
        }

        // (username = user_lambda OR username = user_mu) AND NOT email contains mu
        let filter = UserFilter {
            or: vec![
                UserFilter {
                    username: Some(StringFilter::equals("user_lambda")),
                    ..Default::default()
                },
                UserFilter {
                    username: Some(StringFilter::equals("user_mu")),
                    ..Default::default()
                },
            ],
            not: vec![UserFilter {
                email: Some(StringFilter::contains("mu")),
                ..Default::default()
            }],
            ..Default::default()
        };
        let count = repo.count(Some(&filter)).await.unwrap();
        assert_eq!(count, 1);
    }
}
