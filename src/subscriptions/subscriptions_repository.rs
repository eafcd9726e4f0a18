use std::sync::RwLock;

use uuid::Uuid;

use super::subscriptions_errors::SubscriptionError;
use super::subscriptions_model::Subscription;
use super::subscriptions_traits::SubscriptionStoreTrait;
use crate::errors::{Error, Result};

/// Reference store implementation backed by an in-memory list.
///
/// Desktop builds persist through their own store; this one backs tests
/// and headless use. Insertion order is preserved but carries no
/// meaning for the calculations.
#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: RwLock<Vec<Subscription>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscriptions(subscriptions: Vec<Subscription>) -> Self {
        InMemorySubscriptionRepository {
            subscriptions: RwLock::new(subscriptions),
        }
    }
}

impl SubscriptionStoreTrait for InMemorySubscriptionRepository {
    fn get_subscriptions(&self) -> Result<Vec<Subscription>> {
        let guard = self
            .subscriptions
            .read()
            .map_err(|e| Error::Repository(e.to_string()))?;
        Ok(guard.clone())
    }

    fn get_subscription(&self, id: &str) -> Result<Subscription> {
        let guard = self
            .subscriptions
            .read()
            .map_err(|e| Error::Repository(e.to_string()))?;
        guard
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| SubscriptionError::NotFound(id.to_string()).into())
    }

    fn add_subscription(&self, mut subscription: Subscription) -> Result<Subscription> {
        if subscription.id.is_empty() {
            subscription.id = Uuid::new_v4().to_string();
        }
        let mut guard = self
            .subscriptions
            .write()
            .map_err(|e| Error::Repository(e.to_string()))?;
        if guard.iter().any(|s| s.id == subscription.id) {
            return Err(SubscriptionError::InvalidData(format!(
                "Duplicate subscription id: {}",
                subscription.id
            ))
            .into());
        }
        guard.push(subscription.clone());
        Ok(subscription)
    }

    fn update_subscription(&self, subscription: Subscription) -> Result<Subscription> {
        let mut guard = self
            .subscriptions
            .write()
            .map_err(|e| Error::Repository(e.to_string()))?;
        match guard.iter_mut().find(|s| s.id == subscription.id) {
            Some(slot) => {
                *slot = subscription.clone();
                Ok(subscription)
            }
            None => Err(SubscriptionError::NotFound(subscription.id).into()),
        }
    }

    fn remove_subscription(&self, id: &str) -> Result<()> {
        let mut guard = self
            .subscriptions
            .write()
            .map_err(|e| Error::Repository(e.to_string()))?;
        let before = guard.len();
        guard.retain(|s| s.id != id);
        if guard.len() == before {
            return Err(SubscriptionError::NotFound(id.to_string()).into());
        }
        Ok(())
    }

    fn replace_subscriptions(&self, subscriptions: Vec<Subscription>) -> Result<()> {
        let mut guard = self
            .subscriptions
            .write()
            .map_err(|e| Error::Repository(e.to_string()))?;
        *guard = subscriptions;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscriptions::BillingCycle;
    use rust_decimal_macros::dec;

    fn make_subscription(id: &str) -> Subscription {
        Subscription {
            id: id.to_string(),
            name: format!("sub {}", id),
            group: None,
            price: dec!(9.9),
            currency: crate::constants::BASE_CURRENCY,
            cycle: BillingCycle::Monthly,
            start_date: None,
            next_due_date: None,
            auto_renew: false,
        }
    }

    #[test]
    fn test_add_mints_id_when_missing() {
        let repo = InMemorySubscriptionRepository::new();
        let added = repo.add_subscription(make_subscription("")).unwrap();
        assert!(!added.id.is_empty());
        assert_eq!(repo.get_subscriptions().unwrap().len(), 1);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let repo = InMemorySubscriptionRepository::new();
        repo.add_subscription(make_subscription("a")).unwrap();
        assert!(repo.add_subscription(make_subscription("a")).is_err());
    }

    #[test]
    fn test_update_replaces_record() {
        let repo = InMemorySubscriptionRepository::with_subscriptions(vec![
            make_subscription("a"),
            make_subscription("b"),
        ]);
        let mut changed = make_subscription("b");
        changed.price = dec!(19.9);
        repo.update_subscription(changed).unwrap();
        assert_eq!(repo.get_subscription("b").unwrap().price, dec!(19.9));
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let repo = InMemorySubscriptionRepository::new();
        let result = repo.update_subscription(make_subscription("ghost"));
        assert!(matches!(
            result,
            Err(Error::Subscription(SubscriptionError::NotFound(_)))
        ));
    }

    #[test]
    fn test_remove_and_replace() {
        let repo = InMemorySubscriptionRepository::with_subscriptions(vec![
            make_subscription("a"),
            make_subscription("b"),
        ]);
        repo.remove_subscription("a").unwrap();
        assert!(repo.get_subscription("a").is_err());

        repo.replace_subscriptions(vec![make_subscription("c")])
            .unwrap();
        let all = repo.get_subscriptions().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "c");
    }
}
