//! In-memory record store.
//!
//! DashMap-backed primary maps keyed by id, with secondary indexes claiming
//! `cpf` and `email` through the entry API so uniqueness holds under
//! concurrent inserts.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use super::{RecordStore, StoreError, StoreResult};
use crate::models::{Order, User};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    orders: DashMap<Uuid, Order>,
    cpf_index: DashMap<String, Uuid>,
    email_index: DashMap<String, Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn claim_email(&self, email: &str, id: Uuid) -> StoreResult<()> {
        match self.email_index.entry(email.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate { field: "email" }),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_user(&self, user: User) -> StoreResult<()> {
        match self.cpf_index.entry(user.cpf.clone()) {
            Entry::Occupied(_) => return Err(StoreError::Duplicate { field: "cpf" }),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }
        if let Err(err) = self.claim_email(&user.email, user.id) {
            // Roll back the cpf claim so a retry with a fresh email works.
            self.cpf_index.remove(&user.cpf);
            return Err(err);
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_user_by_cpf(&self, cpf: &str) -> StoreResult<Option<User>> {
        let Some(id) = self.cpf_index.get(cpf).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.iter().map(|e| e.value().clone()).collect())
    }

    async fn update_user(&self, user: User) -> StoreResult<()> {
        let Some(prior) = self.users.get(&user.id).map(|u| u.clone()) else {
            return Err(StoreError::Backend(format!(
                "update of unknown user {}",
                user.id
            )));
        };
        // cpf is immutable; only the email index can move.
        if prior.email != user.email {
            self.claim_email(&user.email, user.id)?;
            self.email_index.remove(&prior.email);
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        let Some((_, user)) = self.users.remove(&id) else {
            return Ok(false);
        };
        self.cpf_index.remove(&user.cpf);
        self.email_index.remove(&user.email);
        Ok(true)
    }

    async fn insert_order(&self, order: Order) -> StoreResult<()> {
        self.orders.insert(order.id, order);
        Ok(())
    }

    async fn get_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        Ok(self.orders.get(&id).map(|o| o.clone()))
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.orders.iter().map(|e| e.value().clone()).collect())
    }

    async fn list_orders_by_deliveryman(&self, deliveryman_id: Uuid) -> StoreResult<Vec<Order>> {
        Ok(self
            .orders
            .iter()
            .filter(|e| e.value().deliveryman_id == deliveryman_id)
            .map(|e| e.value().clone())
            .collect())
    }

    async fn update_order(&self, order: Order) -> StoreResult<()> {
        if !self.orders.contains_key(&order.id) {
            return Err(StoreError::Backend(format!(
                "update of unknown order {}",
                order.id
            )));
        }
        self.orders.insert(order.id, order);
        Ok(())
    }

    async fn delete_order(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.orders.remove(&id).is_some())
    }
}
