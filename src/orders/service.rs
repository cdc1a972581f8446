//! Order operations, gated by role and ownership.
//!
//! Status state machine: `Pending -> Delivered` happens through
//! `update_order` and requires a delivery photo; `Pending -> Returned`
//! happens only through `return_order` by the assigned deliverer. Both
//! end states are terminal.

use std::sync::Arc;

use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};
use crate::models::{Order, OrderStatus, Role, User};
use crate::policy::{require_admin, resolve_actor};
use crate::store::RecordStore;

/// Order creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "address must not be empty"))]
    #[schema(example = "Rua X, 123, Centro")]
    pub address: String,
    pub recipient_id: Uuid,
    pub deliveryman_id: Uuid,
    /// Optional proof-of-delivery attached up front.
    pub delivery_photo: Option<String>,
}

/// Partial order update. Unset fields keep their prior values.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub address: Option<String>,
    pub status: Option<OrderStatus>,
    pub delivery_photo: Option<String>,
    /// Admin-only reassignment.
    pub recipient_id: Option<Uuid>,
    /// Admin-only reassignment.
    pub deliveryman_id: Option<Uuid>,
}

pub struct OrderService {
    store: Arc<dyn RecordStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Admin-only. Both referenced users must exist at creation time; the
    /// deliveryman must carry the deliverer role. Referential integrity is
    /// not enforced after this point.
    pub async fn create_order(
        &self,
        actor_id: Uuid,
        req: CreateOrderRequest,
    ) -> DomainResult<Order> {
        let actor = resolve_actor(self.store.as_ref(), actor_id).await?;
        require_admin(&actor)?;

        self.store
            .get_user(req.recipient_id)
            .await?
            .ok_or(DomainError::NotFound("recipient"))?;
        let deliveryman = self
            .store
            .get_user(req.deliveryman_id)
            .await?
            .ok_or(DomainError::NotFound("deliveryman"))?;
        check_deliverer_role(&deliveryman)?;

        let order = Order {
            id: Uuid::new_v4(),
            address: req.address,
            recipient_id: req.recipient_id,
            deliveryman_id: req.deliveryman_id,
            status: OrderStatus::Pending,
            delivery_photo: normalize_photo(req.delivery_photo)?,
        };
        self.store.insert_order(order.clone()).await?;
        tracing::info!(order_id = %order.id, deliveryman_id = %order.deliveryman_id, "order created");
        Ok(order)
    }

    /// Admins see every order; deliverers see only their assigned orders;
    /// customers are refused.
    pub async fn list_orders(&self, actor_id: Uuid) -> DomainResult<Vec<Order>> {
        let actor = resolve_actor(self.store.as_ref(), actor_id).await?;
        match actor.role {
            Role::Admin => Ok(self.store.list_orders().await?),
            Role::Deliverer => Ok(self.store.list_orders_by_deliveryman(actor_id).await?),
            Role::Customer => Err(DomainError::Forbidden),
        }
    }

    /// Admin or the assigned deliveryman.
    pub async fn get_order(&self, actor_id: Uuid, order_id: Uuid) -> DomainResult<Order> {
        let actor = resolve_actor(self.store.as_ref(), actor_id).await?;
        let order = self
            .store
            .get_order(order_id)
            .await?
            .ok_or(DomainError::NotFound("order"))?;
        if !actor.role.is_admin() && order.deliveryman_id != actor_id {
            return Err(DomainError::Forbidden);
        }
        Ok(order)
    }

    /// Partial update by the admin or the assigned deliveryman.
    ///
    /// A status of `Delivered` requires a delivery photo, supplied in the
    /// same request or already present; otherwise the call fails with
    /// `BadRequest` and the order is left untouched. Reassigning the
    /// recipient or deliveryman is admin-only.
    pub async fn update_order(
        &self,
        actor_id: Uuid,
        order_id: Uuid,
        req: UpdateOrderRequest,
    ) -> DomainResult<Order> {
        let actor = resolve_actor(self.store.as_ref(), actor_id).await?;
        let mut order = self
            .store
            .get_order(order_id)
            .await?
            .ok_or(DomainError::NotFound("order"))?;

        if !actor.role.is_admin() && order.deliveryman_id != actor_id {
            return Err(DomainError::Forbidden);
        }

        if req.recipient_id.is_some() || req.deliveryman_id.is_some() {
            require_admin(&actor)?;
        }
        if let Some(recipient_id) = req.recipient_id {
            self.store
                .get_user(recipient_id)
                .await?
                .ok_or(DomainError::NotFound("recipient"))?;
            order.recipient_id = recipient_id;
        }
        if let Some(deliveryman_id) = req.deliveryman_id {
            let deliveryman = self
                .store
                .get_user(deliveryman_id)
                .await?
                .ok_or(DomainError::NotFound("deliveryman"))?;
            check_deliverer_role(&deliveryman)?;
            order.deliveryman_id = deliveryman_id;
        }

        if let Some(address) = req.address {
            if address.is_empty() {
                return Err(DomainError::BadRequest(
                    "address must not be empty".to_string(),
                ));
            }
            order.address = address;
        }
        // Photo is applied before the status so that a photo supplied in
        // the same request satisfies the delivered-implies-photo invariant.
        if let Some(photo) = req.delivery_photo {
            order.delivery_photo = normalize_photo(Some(photo))?;
        }
        if let Some(status) = req.status {
            apply_status(&mut order, status)?;
        }

        self.store.update_order(order.clone()).await?;
        Ok(order)
    }

    /// Mark an order as returned. Allowed only for the assigned deliverer
    /// themselves; a return is an operational admission by the deliverer,
    /// so admins deliberately get no override here.
    pub async fn return_order(&self, actor_id: Uuid, order_id: Uuid) -> DomainResult<Order> {
        let actor = resolve_actor(self.store.as_ref(), actor_id).await?;
        let mut order = self
            .store
            .get_order(order_id)
            .await?
            .ok_or(DomainError::NotFound("order"))?;

        match actor.role {
            Role::Deliverer if order.deliveryman_id == actor_id => {}
            Role::Admin | Role::Deliverer | Role::Customer => {
                return Err(DomainError::Forbidden);
            }
        }

        if order.status.is_terminal() {
            return Err(DomainError::BadRequest(
                "only pending orders can be returned".to_string(),
            ));
        }
        order.status = OrderStatus::Returned;
        self.store.update_order(order.clone()).await?;
        tracing::info!(order_id = %order.id, "order returned");
        Ok(order)
    }

    /// Admin-only. A second delete of the same id fails with `NotFound`.
    pub async fn delete_order(&self, actor_id: Uuid, order_id: Uuid) -> DomainResult<()> {
        let actor = resolve_actor(self.store.as_ref(), actor_id).await?;
        require_admin(&actor)?;
        if !self.store.delete_order(order_id).await? {
            return Err(DomainError::NotFound("order"));
        }
        tracing::info!(order_id = %order_id, "order deleted");
        Ok(())
    }
}

fn check_deliverer_role(user: &User) -> DomainResult<()> {
    match user.role {
        Role::Deliverer => Ok(()),
        Role::Admin | Role::Customer => Err(DomainError::BadRequest(
            "deliveryman must have the deliverer role".to_string(),
        )),
    }
}

fn normalize_photo(photo: Option<String>) -> DomainResult<Option<String>> {
    match photo {
        Some(p) if p.is_empty() => Err(DomainError::BadRequest(
            "delivery photo must not be empty".to_string(),
        )),
        other => Ok(other),
    }
}

/// Status transition rules. Mutates the order only on an accepted
/// transition; callers persist afterwards, so a refusal leaves the stored
/// record unchanged.
fn apply_status(order: &mut Order, next: OrderStatus) -> DomainResult<()> {
    if order.status == next {
        return Ok(());
    }
    match (order.status, next) {
        (OrderStatus::Pending, OrderStatus::Delivered) => {
            if !order.has_delivery_proof() {
                return Err(DomainError::BadRequest(
                    "proof of delivery is required to mark an order delivered".to_string(),
                ));
            }
            order.status = OrderStatus::Delivered;
            Ok(())
        }
        (OrderStatus::Pending, OrderStatus::Returned) => Err(DomainError::BadRequest(
            "orders are returned through the return operation".to_string(),
        )),
        (OrderStatus::Delivered | OrderStatus::Returned, _) => Err(DomainError::BadRequest(
            "delivered and returned orders accept no further status change".to_string(),
        )),
        // `Pending -> Pending` is the equality no-op above.
        (OrderStatus::Pending, OrderStatus::Pending) => Ok(()),
    }
}
