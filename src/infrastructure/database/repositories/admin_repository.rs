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
use crate::domain::admin::{
    Admin, AdminFilter, AdminKey, AdminQuery, AdminRepository, AdminSortField, CreateAdmin, Role,
    UpdateAdmin,
};
use crate::infrastructure::crypto::password::hash_password;
use crate::infrastructure::database::entities::admin;
use crate::infrastructure::database::predicate::{
    datetime_condition, enum_condition, string_condition,
};
use crate::query::SortDir;
use crate::shared::{PaginatedResult, StoreError, StoreResult};

pub struct SeaOrmAdminRepository {
    db: DatabaseConnection,
}

impl SeaOrmAdminRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn role_to_entity(role: &Role) -> admin::Role {
    match role {
        Role::User => admin::Role::User,
        Role::Rider => admin::Role::Rider,
        Role::Admin => admin::Role::Admin,
    }
}

fn role_to_domain(role: admin::Role) -> Role {
    match role {
        admin::Role::User => Role::User,
        admin::Role::Rider => Role::Rider,
        admin::Role::Admin => Role::Admin,
    }
}

fn model_to_domain(m: admin::Model) -> Admin {
    Admin {
        id: m.id,
        fullname: m.fullname,
        username: m.username,
        email: m.email,
        role: role_to_domain(m.role),
        password: m.password,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn key_condition(key: &AdminKey) -> Condition {
    Condition::all().add(match key {
        AdminKey::Id(v) => admin::Column::Id.eq(v.clone()),
        AdminKey::Username(v) => admin::Column::Username.eq(v.clone()),
        AdminKey::Email(v) => admin::Column::Email.eq(v.clone()),
    })
}

fn key_parts(key: &AdminKey) -> (&'static str, String) {
    match key {
        AdminKey::Id(v) => ("id", v.clone()),
        AdminKey::Username(v) => ("username", v.clone()),
        AdminKey::Email(v) => ("email", v.clone()),
    }
}

pub(crate) fn condition(f: &AdminFilter) -> StoreResult<Condition> {
    let mut cond = Condition::all();
    if let Some(x) = &f.id {
        cond = cond.add(string_condition(admin::Column::Id, x));
    }
    if let Some(x) = &f.fullname {
        cond = cond.add(string_condition(admin::Column::Fullname, x));
    }
    if let Some(x) = &f.username {
        cond = cond.add(string_condition(admin::Column::Username, x));
    }
    if let Some(x) = &f.email {
        cond = cond.add(string_condition(admin::Column::Email, x));
    }
    if let Some(x) = &f.role {
        cond = cond.add(enum_condition(admin::Column::Role, x, role_to_entity));
    }
    if let Some(x) = &f.created_at {
        cond = cond.add(datetime_condition(admin::Column::CreatedAt, x));
    }
    if let Some(x) = &f.updated_at {
        cond = cond.add(datetime_condition(admin::Column::UpdatedAt, x));
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

fn order_column(field: AdminSortField) -> admin::Column {
    match field {
        AdminSortField::Username => admin::Column::Username,
        AdminSortField::Email => admin::Column::Email,
        AdminSortField::CreatedAt => admin::Column::CreatedAt,
    }
}

// ── Write paths (shared with the batch executor) ────────────────

pub(crate) async fn insert_admin<C: ConnectionTrait>(
    conn: &C,
    data: CreateAdmin,
) -> StoreResult<Admin> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let now = Utc::now();
    let password = hash_password(&data.password)
        .map_err(|e| StoreError::Validation(format!("Failed to hash password: {}", e)))?;

    let model = admin::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        fullname: Set(data.fullname),
        username: Set(data.username),
        email: Set(data.email),
        role: Set(data.role.as_ref().map_or(admin::Role::Admin, role_to_entity)),
        password: Set(password),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model
        .insert(conn)
        .await
        .map_err(|e| map_write_err("Admin", e))?;
    debug!("Admin created: {}", inserted.id);
    Ok(model_to_domain(inserted))
}

pub(crate) async fn update_admin<C: ConnectionTrait>(
    conn: &C,
    key: &AdminKey,
    data: UpdateAdmin,
) -> StoreResult<Admin> {
    data.validate()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    let existing = admin::Entity::find()
        .filter(key_condition(key))
        .one(conn)
        .await?;
    let Some(existing) = existing else {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("Admin", field, value));
    };

    let mut active: admin::ActiveModel = existing.into();
    if let Some(v) = data.fullname {
        active.fullname = Set(v);
    }
    if let Some(v) = data.username {
        active.username = Set(v);
    }
    if let Some(v) = data.email {
        active.email = Set(v);
    }
    if let Some(v) = data.password {
        let hashed = hash_password(&v)
            .map_err(|e| StoreError::Validation(format!("Failed to hash password: {}", e)))?;
        active.password = Set(hashed);
    }
    if let Some(v) = data.role {
        active.role = Set(role_to_entity(&v));
    }
    active.updated_at = Set(Utc::now());

    let updated = active
        .update(conn)
        .await
        .map_err(|e| map_write_err("Admin", e))?;
    Ok(model_to_domain(updated))
}

pub(crate) async fn delete_admin<C: ConnectionTrait>(conn: &C, key: &AdminKey) -> StoreResult<()> {
    let result = admin::Entity::delete_many()
        .filter(key_condition(key))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        let (field, value) = key_parts(key);
        return Err(StoreError::not_found("Admin", field, value));
    }
    Ok(())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AdminRepository for SeaOrmAdminRepository {
    async fn find_unique(&self, key: &AdminKey) -> StoreResult<Option<Admin>> {
        let model = admin::Entity::find()
            .filter(key_condition(key))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn get(&self, key: &AdminKey) -> StoreResult<Admin> {
        self.find_unique(key).await?.ok_or_else(|| {
            let (field, value) = key_parts(key);
            StoreError::not_found("Admin", field, value)
        })
    }

    async fn list(&self, query: &AdminQuery) -> StoreResult<PaginatedResult<Admin>> {
        let page = query.page.normalized();

        let mut select = admin::Entity::find();
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

    async fn count(&self, filter: Option<&AdminFilter>) -> StoreResult<u64> {
        let mut select = admin::Entity::find();
        if let Some(f) = filter {
            select = select.filter(condition(f)?);
        }
        Ok(select.count(&self.db).await?)
    }

    async fn create(&self, data: CreateAdmin) -> StoreResult<Admin> {
        insert_admin(&self.db, data).await
    }

    async fn update(&self, key: &AdminKey, data: UpdateAdmin) -> StoreResult<Admin> {
        update_admin(&self.db, key, data).await
    }

    async fn delete(&self, key: &AdminKey) -> StoreResult<()> {
        delete_admin(&self.db, key).await
    }
}
