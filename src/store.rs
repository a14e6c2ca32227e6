//! In-process storage for the service's resources.
//!
//! Handlers only see the [`Repository`] trait; the concurrent-map backed
//! [`InMemoryRepository`] is the only implementation and nothing survives a
//! restart.

use chrono::{NaiveDate, NaiveDateTime};
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;

use crate::models::{
    Agreement, Battery, BatteryType, Chemistry, Condition, CustomerType, PaymentMethod, Pickup,
    PricingConfig, Quote, QuoteConfigRecord, User,
};

/// Id-keyed storage for one resource type
pub trait Repository<T>: Send + Sync {
    fn get(&self, id: i64) -> Option<T>;

    /// Insert or replace the value stored under `id`
    fn insert(&self, id: i64, value: T);

    /// Apply `f` to the stored value. Returns false if `id` is unknown.
    fn update(&self, id: i64, f: &mut dyn FnMut(&mut T)) -> bool;

    fn exists(&self, id: i64) -> bool;

    /// One past the highest stored id, or 1 when empty
    fn next_id(&self) -> i64;

    /// Store `build(id)` under a fresh id and return it. The id is reserved
    /// while `build` runs, so concurrent callers never share one.
    fn insert_with_next_id(&self, build: &mut dyn FnMut(i64) -> T) -> T;

    /// Value stored under the highest id
    fn latest(&self) -> Option<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Repository backed by a concurrent hash map
pub struct InMemoryRepository<T> {
    entries: DashMap<i64, T>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    fn max_id(&self) -> Option<i64> {
        self.entries.iter().map(|entry| *entry.key()).max()
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> Repository<T> for InMemoryRepository<T> {
    fn get(&self, id: i64) -> Option<T> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    fn insert(&self, id: i64, value: T) {
        self.entries.insert(id, value);
    }

    fn update(&self, id: i64, f: &mut dyn FnMut(&mut T)) -> bool {
        match self.entries.get_mut(&id) {
            Some(mut entry) => {
                f(entry.value_mut());
                true
            }
            None => false,
        }
    }

    fn exists(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    fn next_id(&self) -> i64 {
        self.max_id().map_or(1, |id| id + 1)
    }

    fn insert_with_next_id(&self, build: &mut dyn FnMut(i64) -> T) -> T {
        loop {
            let id = self.next_id();
            match self.entries.entry(id) {
                Entry::Vacant(slot) => {
                    let value = build(id);
                    slot.insert(value.clone());
                    return value;
                }
                // Another caller claimed this id first
                Entry::Occupied(_) => continue,
            }
        }
    }

    fn latest(&self) -> Option<T> {
        self.max_id().and_then(|id| self.get(id))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// One repository per resource exposed by the API
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn Repository<User>>,
    pub pickups: Arc<dyn Repository<Pickup>>,
    pub quotes: Arc<dyn Repository<Quote>>,
    pub agreements: Arc<dyn Repository<Agreement>>,
    pub quote_configs: Arc<dyn Repository<QuoteConfigRecord>>,
}

impl Store {
    pub fn empty() -> Self {
        Self {
            users: Arc::new(InMemoryRepository::new()),
            pickups: Arc::new(InMemoryRepository::new()),
            quotes: Arc::new(InMemoryRepository::new()),
            agreements: Arc::new(InMemoryRepository::new()),
            quote_configs: Arc::new(InMemoryRepository::new()),
        }
    }

    /// Store holding one sample record of each resource, including the
    /// default pricing configuration
    pub fn seeded() -> Self {
        let store = Self::empty();
        let at = sample_timestamp();

        store.users.insert(
            1,
            User {
                id: 1,
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                business_name: None,
                address: "123 Gravy Ln".to_string(),
                customer_type: CustomerType::Residential,
                email: "johndoe@gmail.com".to_string(),
                is_active: true,
                created_at: at,
                updated_at: at,
            },
        );

        store.pickups.insert(
            1,
            Pickup {
                id: 1,
                owner_id: 1,
                pick_up_address: "123 Gravy Ln".to_string(),
                batteries: vec![Battery {
                    chemistry: Chemistry::LiFePO4,
                    battery_type: BatteryType::Home,
                    owner_id: 1,
                    brand: Some("Tesla".to_string()),
                    model: Some("PowerWall123".to_string()),
                    vehicle_make: None,
                    vehicle_model: None,
                    weight_lbs: 35.0,
                    input_voltage: 240,
                    output_voltage: 120,
                    marked_capacity_kwh: 150.0,
                    approx_length_used_days: 200,
                    date_originally_purchased: "2021-01-01 23:26:08.712542".to_string(),
                    is_functioning: true,
                    condition_originally_purchased: Condition::New,
                    comments: Some("It's dusty but it works fine".to_string()),
                }],
                address_type: CustomerType::Residential,
                requested_pickup_date: "2021-01-01 23:26:08.712542".to_string(),
                comments: Some("Moving out of town and no longer need this".to_string()),
                created_at: at,
                updated_at: at,
            },
        );

        store.quotes.insert(
            1,
            Quote {
                id: 1,
                quote_price: 10000.0,
                quote_issued_date: at,
                quote_expiry_date: at + chrono::Duration::days(31),
                seller_id: 1,
                associated_pickup_id: 1,
                is_approved: true,
            },
        );

        store.agreements.insert(
            1,
            Agreement {
                id: 1,
                associated_quote_id: 1,
                agreed_date: "2021-01-01 23:26:08.712542".to_string(),
                payment_method: PaymentMethod::Cash,
                comments: Some("please only big bills".to_string()),
                created_at: at,
                updated_at: at,
            },
        );

        store.quote_configs.insert(
            1,
            QuoteConfigRecord {
                id: 1,
                pricing: PricingConfig::sample(),
                created_at: at,
                updated_at: at,
            },
        );

        store
    }
}

fn sample_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 1, 1)
        .and_then(|date| date.and_hms_micro_opt(23, 26, 8, 712_542))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_starts_at_one() {
        let repo: InMemoryRepository<String> = InMemoryRepository::new();
        assert_eq!(repo.next_id(), 1);
        assert!(repo.is_empty());
        assert!(repo.latest().is_none());
    }

    #[test]
    fn test_next_id_follows_highest_key() {
        let repo = InMemoryRepository::new();
        repo.insert(1, "a".to_string());
        repo.insert(7, "b".to_string());
        repo.insert(3, "c".to_string());

        assert_eq!(repo.next_id(), 8);
        assert_eq!(repo.latest(), Some("b".to_string()));
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_update_existing_and_missing() {
        let repo = InMemoryRepository::new();
        repo.insert(2, 10);

        assert!(repo.update(2, &mut |value| *value += 5));
        assert_eq!(repo.get(2), Some(15));

        assert!(!repo.update(3, &mut |value| *value += 5));
        assert!(!repo.exists(3));
    }

    #[test]
    fn test_insert_with_next_id_is_unique_under_contention() {
        let repo: InMemoryRepository<i64> = InMemoryRepository::new();
        repo.insert(1, 1);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        repo.insert_with_next_id(&mut |id| id);
                    }
                });
            }
        });

        assert_eq!(repo.len(), 401);
        assert_eq!(repo.next_id(), 402);
        for id in 1..=401 {
            assert_eq!(repo.get(id), Some(id));
        }
    }

    #[test]
    fn test_seeded_store() {
        let store = Store::seeded();
        assert!(store.users.exists(1));
        assert!(store.pickups.exists(1));
        assert_eq!(store.quotes.get(1).map(|q| q.is_approved), Some(true));
        assert_eq!(store.agreements.next_id(), 2);
        assert_eq!(
            store.quote_configs.latest().map(|c| c.pricing),
            Some(PricingConfig::sample())
        );
    }
}
