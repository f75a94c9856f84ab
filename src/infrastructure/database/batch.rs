//! Batch execution with all-or-nothing commit semantics.
//!
//! Every operation in the list runs inside one storage transaction; the
//! first failure rolls back everything already applied and is surfaced
//! to the caller unchanged.

use sea_orm::{DatabaseTransaction, TransactionError, TransactionTrait};
use tracing::debug;

use crate::domain::batch::BatchOp;
use crate::shared::{StoreError, StoreResult};

use super::repositories::{
    admin_repository, bank_details_repository, delivery_repository, operating_area_repository,
    rider_credentials_repository, rider_rating_repository, rider_repository, user_repository,
    SeaOrmStore,
};

async fn apply(txn: &DatabaseTransaction, op: BatchOp) -> StoreResult<()> {
    match op {
        BatchOp::CreateAdmin(data) => admin_repository::insert_admin(txn, data).await.map(|_| ()),
        BatchOp::UpdateAdmin(key, data) => admin_repository::update_admin(txn, &key, data)
            .await
            .map(|_| ()),
        BatchOp::DeleteAdmin(key) => admin_repository::delete_admin(txn, &key).await,

        BatchOp::CreateUser(data) => user_repository::insert_user(txn, data).await.map(|_| ()),
        BatchOp::UpdateUser(key, data) => user_repository::update_user(txn, &key, data)
            .await
            .map(|_| ()),
        BatchOp::DeleteUser(key) => user_repository::delete_user(txn, &key).await,

        BatchOp::CreateRider(data) => rider_repository::insert_rider(txn, data).await.map(|_| ()),
        BatchOp::UpdateRider(key, data) => rider_repository::update_rider(txn, &key, data)
            .await
            .map(|_| ()),
        BatchOp::DeleteRider(key) => rider_repository::delete_rider(txn, &key).await,

        BatchOp::CreateDelivery(data) => delivery_repository::insert_delivery(txn, data)
            .await
            .map(|_| ()),
        BatchOp::UpdateDelivery(key, data) => {
            delivery_repository::update_delivery(txn, &key, data)
                .await
                .map(|_| ())
        }
        BatchOp::DeleteDelivery(key) => delivery_repository::delete_delivery(txn, &key).await,

        BatchOp::CreateOperatingArea(data) => {
            operating_area_repository::insert_operating_area(txn, data)
                .await
                .map(|_| ())
        }
        BatchOp::UpdateOperatingArea(key, data) => {
            operating_area_repository::update_operating_area(txn, &key, data)
                .await
                .map(|_| ())
        }
        BatchOp::DeleteOperatingArea(key) => {
            operating_area_repository::delete_operating_area(txn, &key).await
        }

        BatchOp::CreateBankDetails(data) => {
            bank_details_repository::insert_bank_details(txn, data)
                .await
                .map(|_| ())
        }
        BatchOp::UpdateBankDetails(key, data) => {
            bank_details_repository::update_bank_details(txn, &key, data)
                .await
                .map(|_| ())
        }
        BatchOp::DeleteBankDetails(key) => {
            bank_details_repository::delete_bank_details(txn, &key).await
        }

        BatchOp::CreateRiderRating(data) => {
            rider_rating_repository::insert_rider_rating(txn, data)
                .await
                .map(|_| ())
        }
        BatchOp::UpdateRiderRating(key, data) => {
            rider_rating_repository::update_rider_rating(txn, &key, data)
                .await
                .map(|_| ())
        }
        BatchOp::DeleteRiderRating(key) => {
            rider_rating_repository::delete_rider_rating(txn, &key).await
        }

        BatchOp::CreateRiderCredentials(data) => {
            rider_credentials_repository::insert_rider_credentials(txn, data)
                .await
                .map(|_| ())
        }
        BatchOp::UpdateRiderCredentials(key, data) => {
            rider_credentials_repository::update_rider_credentials(txn, &key, data)
                .await
                .map(|_| ())
        }
        BatchOp::DeleteRiderCredentials(key) => {
            rider_credentials_repository::delete_rider_credentials(txn, &key).await
        }
    }
}

impl SeaOrmStore {
    /// Run every operation inside one transaction. If any statement
    /// fails, all prior statements roll back and the first error is
    /// returned.
    pub async fn execute_batch(&self, ops: Vec<BatchOp>) -> StoreResult<()> {
        if ops.is_empty() {
            return Ok(());
        }
        debug!("Executing batch of {} operations", ops.len());

        let result = self
            .connection()
            .transaction::<_, (), StoreError>(move |txn| {
                Box::pin(async move {
                    for op in ops {
                        apply(txn, op).await?;
                    }
                    Ok(())
                })
            })
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Connection(e)) => Err(StoreError::Storage(e)),
            Err(TransactionError::Transaction(e)) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::operating_area::{CreateOperatingArea, OperatingAreaStatus};
    use crate::domain::provider::RepositoryProvider;
    use crate::domain::user::CreateUser;
    use crate::infrastructure::database::repositories::test_support::test_db;

    fn user(tag: &str, email: &str) -> CreateUser {
        CreateUser {
            fullname: format!("Batch User {}", tag),
            username: format!("batch_{}", tag),
            email: email.to_string(),
            phone: format!("+234900{}", tag),
            password: "batchpassword".to_string(),
            current_position: None,
        }
    }

    #[tokio::test]
    async fn batch_commits_all_statements() {
        let store = SeaOrmStore::new(test_db().await);
        store
            .execute_batch(vec![
                BatchOp::CreateOperatingArea(CreateOperatingArea {
                    name: "Surulere".to_string(),
                    status: None,
                }),
                BatchOp::CreateOperatingArea(CreateOperatingArea {
                    name: "Lekki".to_string(),
                    status: Some(OperatingAreaStatus::Inactive),
                }),
            ])
            .await
            .unwrap();

        assert_eq!(store.operating_areas().count(None).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn failing_statement_rolls_back_the_batch() {
        let store = SeaOrmStore::new(test_db().await);
        let err = store
            .execute_batch(vec![
                BatchOp::CreateUser(user("one", "dup@example.com")),
                BatchOp::CreateUser(user("two", "dup@example.com")),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));

        // nothing from the batch may remain
        assert_eq!(store.users().count(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let store = SeaOrmStore::new(test_db().await);
        store.execute_batch(vec![]).await.unwrap();
    }
}
