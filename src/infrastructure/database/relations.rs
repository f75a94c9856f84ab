//! Batched relation loading.
//!
//! One `IN` query per relation per call, grouped into maps keyed by the
//! parent id, so a `find_many` page of parents never fans out into
//! per-row queries.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use crate::domain::bank_details::BankDetails;
use crate::domain::delivery::{Delivery, DeliverySortField};
use crate::domain::relations::RelationLoader;
use crate::domain::rider::Rider;
use crate::domain::rider_credentials::{RiderCredentials, RiderCredentialsSortField};
use crate::domain::rider_rating::{RiderRating, RiderRatingSortField};
use crate::domain::user::User;
use crate::query::SortDir;
use crate::shared::StoreResult;

use super::entities::{bank_details, delivery, rider, rider_credentials, rider_rating, user};
use super::repositories::{
    bank_details_repository, delivery_repository, rider_credentials_repository,
    rider_rating_repository, rider_repository, user_repository,
};

pub struct SeaOrmRelationLoader {
    db: DatabaseConnection,
}

impl SeaOrmRelationLoader {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sea_order(dir: &SortDir) -> sea_orm::Order {
    match dir {
        SortDir::Asc => sea_orm::Order::Asc,
        SortDir::Desc => sea_orm::Order::Desc,
    }
}

fn dedup(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

#[async_trait]
impl RelationLoader for SeaOrmRelationLoader {
    async fn deliveries_for_users(
        &self,
        user_ids: &[String],
        order: &[(DeliverySortField, SortDir)],
    ) -> StoreResult<HashMap<String, Vec<Delivery>>> {
        let ids = dedup(user_ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        debug!("Loading deliveries for {} users", ids.len());

        let mut select = delivery::Entity::find().filter(delivery::Column::UserId.is_in(ids));
        for (field, dir) in order {
            select = select.order_by(delivery_repository::order_column(*field), sea_order(dir));
        }

        let mut grouped: HashMap<String, Vec<Delivery>> = HashMap::new();
        for model in select.all(&self.db).await? {
            grouped
                .entry(model.user_id.clone())
                .or_default()
                .push(delivery_repository::model_to_domain(model));
        }
        Ok(grouped)
    }

    async fn ratings_for_users(
        &self,
        user_ids: &[String],
        order: &[(RiderRatingSortField, SortDir)],
    ) -> StoreResult<HashMap<String, Vec<RiderRating>>> {
        let ids = dedup(user_ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut select =
            rider_rating::Entity::find().filter(rider_rating::Column::UserId.is_in(ids));
        for (field, dir) in order {
            select = select.order_by(rider_rating_repository::order_column(*field), sea_order(dir));
        }

        let mut grouped: HashMap<String, Vec<RiderRating>> = HashMap::new();
        for model in select.all(&self.db).await? {
            grouped
                .entry(model.user_id.clone())
                .or_default()
                .push(rider_rating_repository::model_to_domain(model));
        }
        Ok(grouped)
    }

    async fn deliveries_for_riders(
        &self,
        rider_ids: &[String],
        order: &[(DeliverySortField, SortDir)],
    ) -> StoreResult<HashMap<String, Vec<Delivery>>> {
        let ids = dedup(rider_ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        debug!("Loading deliveries for {} riders", ids.len());

        let mut select = delivery::Entity::find().filter(delivery::Column::RiderId.is_in(ids));
        for (field, dir) in order {
            select = select.order_by(delivery_repository::order_column(*field), sea_order(dir));
        }

        let mut grouped: HashMap<String, Vec<Delivery>> = HashMap::new();
        for model in select.all(&self.db).await? {
            let Some(rider_id) = model.rider_id.clone() else {
                continue;
            };
            grouped
                .entry(rider_id)
                .or_default()
                .push(delivery_repository::model_to_domain(model));
        }
        Ok(grouped)
    }

    async fn ratings_for_riders(
        &self,
        rider_ids: &[String],
        order: &[(RiderRatingSortField, SortDir)],
    ) -> StoreResult<HashMap<String, Vec<RiderRating>>> {
        let ids = dedup(rider_ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut select =
            rider_rating::Entity::find().filter(rider_rating::Column::RiderId.is_in(ids));
        for (field, dir) in order {
            select = select.order_by(rider_rating_repository::order_column(*field), sea_order(dir));
        }

        let mut grouped: HashMap<String, Vec<RiderRating>> = HashMap::new();
        for model in select.all(&self.db).await? {
            grouped
                .entry(model.rider_id.clone())
                .or_default()
                .push(rider_rating_repository::model_to_domain(model));
        }
        Ok(grouped)
    }

    async fn credentials_for_riders(
        &self,
        rider_ids: &[String],
        order: &[(RiderCredentialsSortField, SortDir)],
    ) -> StoreResult<HashMap<String, Vec<RiderCredentials>>> {
        let ids = dedup(rider_ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut select = rider_credentials::Entity::find()
            .filter(rider_credentials::Column::RiderId.is_in(ids));
        for (field, dir) in order {
            select = select.order_by(
                rider_credentials_repository::order_column(*field),
                sea_order(dir),
            );
        }

        let mut grouped: HashMap<String, Vec<RiderCredentials>> = HashMap::new();
        for model in select.all(&self.db).await? {
            grouped
                .entry(model.rider_id.clone())
                .or_default()
                .push(rider_credentials_repository::model_to_domain(model));
        }
        Ok(grouped)
    }

    async fn bank_details_for_riders(
        &self,
        rider_ids: &[String],
    ) -> StoreResult<HashMap<String, BankDetails>> {
        let ids = dedup(rider_ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let models = bank_details::Entity::find()
            .filter(bank_details::Column::RiderId.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| {
                (
                    m.rider_id.clone(),
                    bank_details_repository::model_to_domain(m),
                )
            })
            .collect())
    }

    async fn users_for_deliveries(
        &self,
        deliveries: &[Delivery],
    ) -> StoreResult<HashMap<String, User>> {
        let ids: Vec<String> = deliveries.iter().map(|d| d.user_id.clone()).collect();
        let ids = dedup(&ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let models = user::Entity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| (m.id.clone(), user_repository::model_to_domain(m)))
            .collect())
    }

    async fn riders_for_deliveries(
        &self,
        deliveries: &[Delivery],
    ) -> StoreResult<HashMap<String, Rider>> {
        let ids: Vec<String> = deliveries
            .iter()
            .filter_map(|d| d.rider_id.clone())
            .collect();
        let ids = dedup(&ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let models = rider::Entity::find()
            .filter(rider::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| (m.id.clone(), rider_repository::model_to_domain(m)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::delivery::{CreateDelivery, DeliveryStatus, UpdateDelivery};
    use crate::domain::rider::{CreateRider, RiderKey};
    use crate::domain::rider_rating::CreateRiderRating;
    use crate::infrastructure::database::repositories::test_support::{
        seed_rider, seed_user, test_db,
    };
    use crate::infrastructure::database::repositories::{
        delivery_repository::insert_delivery, rider_rating_repository::insert_rider_rating,
        rider_repository::insert_rider,
    };
    use crate::shared::StoreError;

    fn coords(lat: f64, lng: f64) -> serde_json::Value {
        serde_json::json!({"lat": lat, "lng": lng})
    }

    fn delivery_for(user_id: &str, rider_id: Option<&str>) -> CreateDelivery {
        CreateDelivery {
            user_id: user_id.to_string(),
            rider_id: rider_id.map(str::to_string),
            pickup_coordinate: coords(6.45, 3.39),
            delivery_coordinate: coords(6.52, 3.37),
            delivery_code: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn user_delivery_appears_exactly_once() {
        let db = test_db().await;
        let user = seed_user(&db, "alpha").await;
        let other = seed_user(&db, "beta").await;
        let created = insert_delivery(&db, delivery_for(&user.id, None)).await.unwrap();
        insert_delivery(&db, delivery_for(&other.id, None)).await.unwrap();

        let loader = SeaOrmRelationLoader::new(db);
        let map = loader
            .deliveries_for_users(&[user.id.clone(), other.id.clone()], &[])
            .await
            .unwrap();

        let for_user = &map[&user.id];
        assert_eq!(for_user.len(), 1);
        assert_eq!(for_user[0].id, created.id);
        assert_eq!(map[&other.id].len(), 1);
    }

    #[tokio::test]
    async fn duplicate_parent_ids_do_not_duplicate_children() {
        let db = test_db().await;
        let user = seed_user(&db, "gamma").await;
        insert_delivery(&db, delivery_for(&user.id, None)).await.unwrap();

        let loader = SeaOrmRelationLoader::new(db);
        let map = loader
            .deliveries_for_users(&[user.id.clone(), user.id.clone()], &[])
            .await
            .unwrap();
        assert_eq!(map[&user.id].len(), 1);
    }

    #[tokio::test]
    async fn relation_order_is_independent_of_parent_order() {
        let db = test_db().await;
        let user = seed_user(&db, "delta").await;
        let a = insert_delivery(&db, delivery_for(&user.id, None)).await.unwrap();
        let b = insert_delivery(&db, delivery_for(&user.id, None)).await.unwrap();

        // Make ordering observable via status
        crate::infrastructure::database::repositories::delivery_repository::update_delivery(
            &db,
            &crate::domain::delivery::DeliveryKey::Id(b.id.clone()),
            UpdateDelivery {
                status: Some(DeliveryStatus::Rejected),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let loader = SeaOrmRelationLoader::new(db);
        let map = loader
            .deliveries_for_users(
                &[user.id.clone()],
                &[(DeliverySortField::Status, SortDir::Desc)],
            )
            .await
            .unwrap();
        let ids: Vec<_> = map[&user.id].iter().map(|d| d.id.as_str()).collect();
        // Rejected > Pending in lexicographic status order
        assert_eq!(ids, [b.id.as_str(), a.id.as_str()]);
    }

    #[tokio::test]
    async fn riders_for_deliveries_skips_unassigned() {
        let db = test_db().await;
        let user = seed_user(&db, "epsilon").await;
        let rider = seed_rider(&db, "epsilon").await;
        let assigned = insert_delivery(&db, delivery_for(&user.id, Some(&rider.id)))
            .await
            .unwrap();
        let unassigned = insert_delivery(&db, delivery_for(&user.id, None)).await.unwrap();

        let loader = SeaOrmRelationLoader::new(db);
        let riders = loader
            .riders_for_deliveries(&[assigned.clone(), unassigned])
            .await
            .unwrap();
        assert_eq!(riders.len(), 1);
        assert_eq!(
            riders[assigned.rider_id.as_ref().unwrap()].id,
            rider.id
        );
    }

    // End-to-end walk: duplicate rider email rejected, then the rider's
    // delivery resolves exactly once.
    #[tokio::test]
    async fn rider_email_collision_then_single_included_delivery() {
        let db = test_db().await;
        let rider = insert_rider(
            &db,
            CreateRider {
                fullname: "R One".to_string(),
                username: "r1".to_string(),
                email: "r1@x.com".to_string(),
                phone: "+2347001110001".to_string(),
                password: "password123".to_string(),
                status: None,
            },
        )
        .await
        .unwrap();

        let err = insert_rider(
            &db,
            CreateRider {
                fullname: "R Two".to_string(),
                username: "r2".to_string(),
                email: "r1@x.com".to_string(),
                phone: "+2347001110002".to_string(),
                password: "password123".to_string(),
                status: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));

        let user = seed_user(&db, "zeta").await;
        let created = insert_delivery(&db, delivery_for(&user.id, Some(&rider.id)))
            .await
            .unwrap();

        let loader = SeaOrmRelationLoader::new(db.clone());
        let map = loader
            .deliveries_for_riders(&[rider.id.clone()], &[])
            .await
            .unwrap();
        let for_rider = &map[&rider.id];
        assert_eq!(for_rider.len(), 1);
        assert_eq!(for_rider[0].id, created.id);

        // the rider row itself is still reachable by unique key
        let repo = super::super::repositories::rider_repository::SeaOrmRiderRepository::new(db);
        use crate::domain::rider::RiderRepository as _;
        let found = repo
            .find_unique(&RiderKey::Email("r1@x.com".to_string()))
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn ratings_group_by_both_parents() {
        let db = test_db().await;
        let user = seed_user(&db, "eta").await;
        let rider = seed_rider(&db, "eta").await;
        insert_rider_rating(
            &db,
            CreateRiderRating {
                rider_id: rider.id.clone(),
                user_id: user.id.clone(),
                rating: 5,
                review: None,
            },
        )
        .await
        .unwrap();

        let loader = SeaOrmRelationLoader::new(db);
        let by_rider = loader.ratings_for_riders(&[rider.id.clone()], &[]).await.unwrap();
        let by_user = loader.ratings_for_users(&[user.id.clone()], &[]).await.unwrap();
        assert_eq!(by_rider[&rider.id].len(), 1);
        assert_eq!(by_user[&user.id].len(), 1);
    }
}
