use crate::core::BillStore;
use crate::domain::model::Bill;
use crate::utils::error::{Result, SplitError};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// 記憶體內的帳單儲存，單一讀寫鎖保護整個集合
#[derive(Debug, Default)]
pub struct InMemoryBillStore {
    bills: RwLock<HashMap<String, Bill>>,
}

impl InMemoryBillStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> SplitError {
    SplitError::StoreUnavailable {
        message: "bill store lock poisoned".to_string(),
    }
}

impl BillStore for InMemoryBillStore {
    fn create(&self, bill: Bill) -> Result<()> {
        let mut bills = self.bills.write().map_err(poisoned)?;
        if bills.contains_key(&bill.id) {
            return Err(SplitError::AlreadyExists { id: bill.id });
        }

        bills.insert(bill.id.clone(), bill);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Bill> {
        let bills = self.bills.read().map_err(poisoned)?;
        bills.get(id).cloned().ok_or_else(|| SplitError::not_found(id))
    }

    fn update(&self, bill: Bill) -> Result<()> {
        let mut bills = self.bills.write().map_err(poisoned)?;
        match bills.get_mut(&bill.id) {
            Some(slot) => {
                *slot = bill;
                Ok(())
            }
            None => Err(SplitError::not_found(bill.id)),
        }
    }

    fn modify(&self, id: &str, f: &mut dyn FnMut(&mut Bill) -> Result<()>) -> Result<Bill> {
        let mut bills = self.bills.write().map_err(poisoned)?;
        let slot = bills.get_mut(id).ok_or_else(|| SplitError::not_found(id))?;

        let mut next = slot.clone();
        f(&mut next)?;
        *slot = next.clone();
        Ok(next)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut bills = self.bills.write().map_err(poisoned)?;
        bills
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SplitError::not_found(id))
    }

    fn list_all(&self) -> Result<Vec<Bill>> {
        let bills = self.bills.read().map_err(poisoned)?;
        let mut all: Vec<Bill> = bills.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Item, Participant};
    use chrono::{Duration, Utc};
    use std::sync::Arc;
    use std::thread;

    fn bill(id: &str) -> Bill {
        Bill {
            id: id.to_string(),
            title: format!("Bill {}", id),
            description: None,
            items: vec![],
            participants: vec![Participant {
                id: "p1".to_string(),
                name: "Anna".to_string(),
                email: None,
            }],
            tip: 0.0,
            currency: "RUB".to_string(),
            created_at: Utc::now(),
            created_by: "Anonymous".to_string(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = InMemoryBillStore::new();
        store.create(bill("b1")).unwrap();

        assert_eq!(store.get("b1").unwrap().title, "Bill b1");
        assert!(matches!(
            store.create(bill("b1")),
            Err(SplitError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_missing_bill_errors() {
        let store = InMemoryBillStore::new();

        assert!(matches!(store.get("nope"), Err(SplitError::NotFound { .. })));
        assert!(matches!(
            store.update(bill("nope")),
            Err(SplitError::NotFound { .. })
        ));
        assert!(matches!(store.delete("nope"), Err(SplitError::NotFound { .. })));
    }

    #[test]
    fn test_update_and_delete() {
        let store = InMemoryBillStore::new();
        store.create(bill("b1")).unwrap();

        let mut updated = store.get("b1").unwrap();
        updated.title = "Renamed".to_string();
        store.update(updated).unwrap();
        assert_eq!(store.get("b1").unwrap().title, "Renamed");

        store.delete("b1").unwrap();
        assert!(store.get("b1").is_err());
    }

    #[test]
    fn test_modify_keeps_bill_when_closure_fails() {
        let store = InMemoryBillStore::new();
        store.create(bill("b1")).unwrap();

        let err = store
            .modify("b1", &mut |bill| {
                bill.title = "half written".to_string();
                Err(SplitError::invalid_input("rejected"))
            })
            .unwrap_err();
        assert!(matches!(err, SplitError::InvalidInput { .. }));
        assert_eq!(store.get("b1").unwrap().title, "Bill b1");

        let updated = store
            .modify("b1", &mut |bill| {
                bill.tip = 5.0;
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.tip, 5.0);
        assert_eq!(store.get("b1").unwrap().tip, 5.0);

        assert!(matches!(
            store.modify("nope", &mut |_| Ok(())),
            Err(SplitError::NotFound { .. })
        ));
    }

    #[test]
    fn test_concurrent_modify_loses_no_update() {
        let store = Arc::new(InMemoryBillStore::new());
        store.create(bill("shared")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|w| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for n in 0..25 {
                        store
                            .modify("shared", &mut |bill| {
                                bill.items.push(Item {
                                    id: format!("i{}_{}", w, n),
                                    name: "x".to_string(),
                                    price: 1.0,
                                    consumed_by: vec!["p1".to_string()],
                                });
                                Ok(())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.get("shared").unwrap().items.len(), 200);
    }

    #[test]
    fn test_list_all_is_ordered_by_creation() {
        let store = InMemoryBillStore::new();
        let mut later = bill("a_later");
        later.created_at = Utc::now() + Duration::seconds(10);
        store.create(later).unwrap();
        store.create(bill("z_earlier")).unwrap();

        let ids: Vec<String> = store.list_all().unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["z_earlier".to_string(), "a_later".to_string()]);
    }

    #[test]
    fn test_concurrent_writes_are_never_torn() {
        let store = Arc::new(InMemoryBillStore::new());
        store.create(bill("shared")).unwrap();

        let writers: Vec<_> = (0..4)
            .map(|w| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for n in 0..50 {
                        let mut next = bill("shared");
                        // 名稱與項目數一致，讀者可以檢查是否為同一次寫入
                        let count = (w * 50 + n) % 7;
                        next.title = format!("items={}", count);
                        next.items = (0..count)
                            .map(|i| Item {
                                id: format!("i{}", i),
                                name: "x".to_string(),
                                price: 1.0,
                                consumed_by: vec![],
                            })
                            .collect();
                        store.update(next).unwrap();
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let seen = store.get("shared").unwrap();
                        if seen.title.starts_with("items=") {
                            assert_eq!(seen.title, format!("items={}", seen.items.len()));
                        }
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }
    }
}
