//! Process-local customer store.
//!
//! Mirrors the `customers` table: identity keys that are never reused and a
//! unique email index. Nothing is persisted.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crm_core::AccountId;

use super::{CustomerStore, RepositoryError};
use crate::models::{Customer, CustomerDetails};

#[derive(Debug)]
struct Table {
    rows: BTreeMap<AccountId, Customer>,
    next_id: i32,
}

impl Table {
    fn email_taken(&self, email: &str, exclude_id: Option<AccountId>) -> bool {
        self.rows
            .values()
            .any(|c| c.details.email == email && Some(c.account_id) != exclude_id)
    }
}

/// In-memory [`CustomerStore`].
#[derive(Debug)]
pub struct InMemoryCustomerStore {
    table: RwLock<Table>,
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCustomerStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored customers.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let table = self.table.read().await;
        let mut customers: Vec<Customer> = table.rows.values().cloned().collect();
        customers.sort_by(|a, b| {
            b.date_created
                .cmp(&a.date_created)
                .then_with(|| b.account_id.cmp(&a.account_id))
        });
        Ok(customers)
    }

    async fn get_by_id(&self, id: AccountId) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|c| c.details.email == email)
            .cloned())
    }

    async fn create(&self, details: &CustomerDetails) -> Result<Customer, RepositoryError> {
        let mut table = self.table.write().await;

        if table.email_taken(&details.email, None) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let account_id = AccountId::new(table.next_id);
        table.next_id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::DataCorruption("account id overflow".to_owned()))?;

        let customer = Customer {
            account_id,
            details: details.clone(),
            date_created: Utc::now(),
        };
        table.rows.insert(account_id, customer.clone());

        Ok(customer)
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, RepositoryError> {
        let mut table = self.table.write().await;

        if !table.rows.contains_key(&customer.account_id) {
            return Err(RepositoryError::NotFound);
        }
        if table.email_taken(&customer.details.email, Some(customer.account_id)) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let stored = table
            .rows
            .get_mut(&customer.account_id)
            .ok_or(RepositoryError::NotFound)?;
        stored.details = customer.details.clone();

        Ok(stored.clone())
    }

    async fn delete(&self, id: AccountId) -> Result<bool, RepositoryError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn email_exists(
        &self,
        email: &str,
        exclude_id: Option<AccountId>,
    ) -> Result<bool, RepositoryError> {
        Ok(self.table.read().await.email_taken(email, exclude_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn details(email: &str) -> CustomerDetails {
        CustomerDetails::new("Ann", "Lee", email)
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = InMemoryCustomerStore::new();
        let a = store.create(&details("a@x.com")).await.unwrap();
        let b = store.create(&details("b@x.com")).await.unwrap();
        assert_eq!(a.account_id, AccountId::new(1));
        assert_eq!(b.account_id, AccountId::new(2));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = InMemoryCustomerStore::new();
        let a = store.create(&details("a@x.com")).await.unwrap();
        assert!(store.delete(a.account_id).await.unwrap());
        let b = store.create(&details("a@x.com")).await.unwrap();
        assert_ne!(a.account_id, b.account_id);
    }

    #[tokio::test]
    async fn test_create_duplicate_email_conflicts() {
        let store = InMemoryCustomerStore::new();
        store.create(&details("a@x.com")).await.unwrap();
        let err = store.create(&details("a@x.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = InMemoryCustomerStore::new();
        let ghost = Customer {
            account_id: AccountId::new(99),
            details: details("ghost@x.com"),
            date_created: Utc::now(),
        };
        let err = store.update(&ghost).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_keeps_date_created() {
        let store = InMemoryCustomerStore::new();
        let created = store.create(&details("a@x.com")).await.unwrap();

        let mut changed = created.clone();
        changed.details.city = Some("Oslo".to_owned());
        changed.date_created = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();

        let updated = store.update(&changed).await.unwrap();
        assert_eq!(updated.date_created, created.date_created);
        assert_eq!(updated.details.city.as_deref(), Some("Oslo"));
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let store = InMemoryCustomerStore::new();
        store.create(&details("a@x.com")).await.unwrap();
        let mut b = store.create(&details("b@x.com")).await.unwrap();
        b.details.email = "a@x.com".to_owned();
        let err = store.update(&b).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let store = InMemoryCustomerStore::new();
        assert!(!store.delete(AccountId::new(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_email_exists_with_exclusion() {
        let store = InMemoryCustomerStore::new();
        let a = store.create(&details("a@x.com")).await.unwrap();
        assert!(store.email_exists("a@x.com", None).await.unwrap());
        assert!(!store.email_exists("a@x.com", Some(a.account_id)).await.unwrap());
        assert!(store.email_exists("a@x.com", Some(AccountId::new(42))).await.unwrap());
        assert!(!store.email_exists("b@x.com", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_by_email_exact_match() {
        let store = InMemoryCustomerStore::new();
        let a = store.create(&details("a@x.com")).await.unwrap();
        assert_eq!(store.get_by_email("a@x.com").await.unwrap(), Some(a));
        assert!(store.get_by_email("A@X.COM").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let store = InMemoryCustomerStore::new();
        let a = store.create(&details("a@x.com")).await.unwrap();
        let b = store.create(&details("b@x.com")).await.unwrap();

        // Force a clear ordering regardless of clock resolution.
        {
            let mut table = store.table.write().await;
            let row = table.rows.get_mut(&a.account_id).unwrap();
            row.date_created = b.date_created + Duration::seconds(5);
        }

        let ids: Vec<AccountId> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.account_id)
            .collect();
        assert_eq!(ids, vec![a.account_id, b.account_id]);
    }

    #[tokio::test]
    async fn test_list_all_ties_break_on_id() {
        let store = InMemoryCustomerStore::new();
        let a = store.create(&details("a@x.com")).await.unwrap();
        let b = store.create(&details("b@x.com")).await.unwrap();
        {
            let mut table = store.table.write().await;
            let stamp = a.date_created;
            for row in table.rows.values_mut() {
                row.date_created = stamp;
            }
        }

        let ids: Vec<AccountId> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.account_id)
            .collect();
        assert_eq!(ids, vec![b.account_id, a.account_id]);
    }
}
