//! End-to-end scenarios over the service layer: login, user management,
//! and the order lifecycle with its role/ownership rules.

use std::sync::Arc;

use fastfeet::auth::{AuthService, password};
use fastfeet::error::DomainError;
use fastfeet::models::{OrderStatus, Role, User};
use fastfeet::orders::{CreateOrderRequest, OrderService, UpdateOrderRequest};
use fastfeet::store::{MemoryStore, RecordStore};
use fastfeet::users::{CreateUserRequest, UpdateUserRequest, UserService};
use uuid::Uuid;

struct App {
    store: Arc<MemoryStore>,
    auth: AuthService,
    users: UserService,
    orders: OrderService,
    admin: Uuid,
}

/// Stand up the services over a fresh store with one seeded admin,
/// mirroring process bootstrap.
async fn app() -> App {
    let store = Arc::new(MemoryStore::new());
    let admin = User {
        id: Uuid::new_v4(),
        name: "Admin".to_string(),
        cpf: "00000000000".to_string(),
        email: "admin@fastfeet.local".to_string(),
        password_hash: password::hash("admin123").unwrap(),
        role: Role::Admin,
    };
    let admin_id = admin.id;
    store.insert_user(admin).await.unwrap();

    App {
        auth: AuthService::new(store.clone(), "test-secret".to_string(), 3600),
        users: UserService::new(store.clone()),
        orders: OrderService::new(store.clone()),
        store,
        admin: admin_id,
    }
}

fn user_req(name: &str, cpf: &str, email: &str, role: Role) -> CreateUserRequest {
    CreateUserRequest {
        name: name.to_string(),
        cpf: cpf.to_string(),
        email: email.to_string(),
        password: "senha123".to_string(),
        role,
    }
}

async fn create(app: &App, name: &str, cpf: &str, email: &str, role: Role) -> Uuid {
    app.users
        .create_user(app.admin, user_req(name, cpf, email, role))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn login_flow_issues_token_that_authorizes_requests() {
    let app = app().await;
    let joao = create(&app, "Joao", "11111111111", "j@x.com", Role::Deliverer).await;

    // Login with cpf + password.
    let resp = app.auth.authenticate("11111111111", "senha123").await.unwrap();
    assert_eq!(resp.user.id, joao);

    // The token decodes to the identity used by every protected operation.
    let claims = app.auth.verify_token(&resp.token).unwrap();
    assert_eq!(claims.sub, joao);
    assert_eq!(claims.role, Role::Deliverer);

    // Wrong password and unknown cpf fail with their own kinds.
    assert_eq!(
        app.auth.authenticate("11111111111", "nope").await.unwrap_err(),
        DomainError::InvalidCredentials
    );
    assert_eq!(
        app.auth.authenticate("99999999999", "senha123").await.unwrap_err(),
        DomainError::NotFound("user")
    );
}

#[tokio::test]
async fn management_operations_are_forbidden_for_non_admins() {
    let app = app().await;
    let deliverer = create(&app, "D", "11111111111", "d@x.com", Role::Deliverer).await;
    let customer = create(&app, "C", "22222222222", "c@x.com", Role::Customer).await;

    let order_req = || CreateOrderRequest {
        address: "Rua X, 123".to_string(),
        recipient_id: customer,
        deliveryman_id: deliverer,
        delivery_photo: None,
    };
    let order = app.orders.create_order(app.admin, order_req()).await.unwrap();

    for actor in [deliverer, customer] {
        assert_eq!(
            app.users
                .create_user(actor, user_req("X", "33333333333", "x@x.com", Role::Customer))
                .await
                .unwrap_err(),
            DomainError::Forbidden
        );
        assert_eq!(app.users.list_users(actor).await.unwrap_err(), DomainError::Forbidden);
        assert_eq!(
            app.users.delete_user(actor, customer).await.unwrap_err(),
            DomainError::Forbidden
        );
        assert_eq!(
            app.orders.create_order(actor, order_req()).await.unwrap_err(),
            DomainError::Forbidden
        );
        assert_eq!(
            app.orders.delete_order(actor, order.id).await.unwrap_err(),
            DomainError::Forbidden
        );
    }
}

#[tokio::test]
async fn user_creation_scenario_with_conflict() {
    let app = app().await;

    // Admin creates Joao -> success, and the payload has no password field.
    let view = app
        .users
        .create_user(
            app.admin,
            user_req("Joao", "11111111111", "j@x.com", Role::Deliverer),
        )
        .await
        .unwrap();
    let json = serde_json::to_value(&view).unwrap();
    assert!(!json.as_object().unwrap().contains_key("password"));
    assert!(!json.as_object().unwrap().contains_key("password_hash"));

    // A second user with the same cpf conflicts.
    assert_eq!(
        app.users
            .create_user(
                app.admin,
                user_req("Other", "11111111111", "o@x.com", Role::Customer),
            )
            .await
            .unwrap_err(),
        DomainError::Conflict("cpf")
    );
}

#[tokio::test]
async fn get_user_matrix() {
    let app = app().await;
    let a = create(&app, "A", "11111111111", "a@x.com", Role::Deliverer).await;
    let b = create(&app, "B", "22222222222", "b@x.com", Role::Customer).await;

    // Self read succeeds regardless of role.
    for actor in [app.admin, a, b] {
        assert!(app.users.get_user(actor, actor).await.is_ok());
    }
    // Cross read succeeds only for the admin.
    assert!(app.users.get_user(app.admin, a).await.is_ok());
    assert_eq!(app.users.get_user(a, b).await.unwrap_err(), DomainError::Forbidden);
    assert_eq!(app.users.get_user(b, a).await.unwrap_err(), DomainError::Forbidden);
}

#[tokio::test]
async fn delivery_completion_scenario() {
    let app = app().await;
    let deliverer = create(&app, "D", "11111111111", "d@x.com", Role::Deliverer).await;
    let recipient = create(&app, "R", "22222222222", "r@x.com", Role::Customer).await;

    // Admin creates the order; it starts pending.
    let order = app
        .orders
        .create_order(
            app.admin,
            CreateOrderRequest {
                address: "Rua X".to_string(),
                recipient_id: recipient,
                deliveryman_id: deliverer,
                delivery_photo: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);

    // Completion without proof is refused and changes nothing.
    let err = app
        .orders
        .update_order(
            deliverer,
            order.id,
            UpdateOrderRequest {
                status: Some(OrderStatus::Delivered),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BadRequest(_)));
    let stored = app.store.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);

    // With the photo attached in the same request it succeeds.
    let delivered = app
        .orders
        .update_order(
            deliverer,
            order.id,
            UpdateOrderRequest {
                status: Some(OrderStatus::Delivered),
                delivery_photo: Some("img.png".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert_eq!(delivered.delivery_photo.as_deref(), Some("img.png"));
}

#[tokio::test]
async fn foreign_deliverer_cannot_see_anothers_order() {
    let app = app().await;
    let d1 = create(&app, "D1", "11111111111", "d1@x.com", Role::Deliverer).await;
    let d2 = create(&app, "D2", "22222222222", "d2@x.com", Role::Deliverer).await;
    let recipient = create(&app, "R", "33333333333", "r@x.com", Role::Customer).await;

    let order = app
        .orders
        .create_order(
            app.admin,
            CreateOrderRequest {
                address: "Rua X".to_string(),
                recipient_id: recipient,
                deliveryman_id: d1,
                delivery_photo: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(
        app.orders.get_order(d2, order.id).await.unwrap_err(),
        DomainError::Forbidden
    );
    // And d2's own listing does not include it.
    assert!(app.orders.list_orders(d2).await.unwrap().is_empty());
}

#[tokio::test]
async fn return_scenario_excludes_admin_override() {
    let app = app().await;
    let deliverer = create(&app, "D", "11111111111", "d@x.com", Role::Deliverer).await;
    let recipient = create(&app, "R", "22222222222", "r@x.com", Role::Customer).await;

    let order = app
        .orders
        .create_order(
            app.admin,
            CreateOrderRequest {
                address: "Rua X".to_string(),
                recipient_id: recipient,
                deliveryman_id: deliverer,
                delivery_photo: None,
            },
        )
        .await
        .unwrap();

    // The admin is refused; the assigned deliverer succeeds.
    assert_eq!(
        app.orders.return_order(app.admin, order.id).await.unwrap_err(),
        DomainError::Forbidden
    );
    let returned = app.orders.return_order(deliverer, order.id).await.unwrap();
    assert_eq!(returned.status, OrderStatus::Returned);
}

#[tokio::test]
async fn deliveries_listing_is_visible_to_the_deliverer_only() {
    let app = app().await;
    let deliverer = create(&app, "D", "11111111111", "d@x.com", Role::Deliverer).await;
    let recipient = create(&app, "R", "22222222222", "r@x.com", Role::Customer).await;

    for _ in 0..2 {
        app.orders
            .create_order(
                app.admin,
                CreateOrderRequest {
                    address: "Rua X".to_string(),
                    recipient_id: recipient,
                    deliveryman_id: deliverer,
                    delivery_photo: None,
                },
            )
            .await
            .unwrap();
    }

    let mine = app.users.list_deliveries(deliverer, deliverer).await.unwrap();
    assert_eq!(mine.len(), 2);

    // No admin override on this one.
    assert_eq!(
        app.users
            .list_deliveries(app.admin, deliverer)
            .await
            .unwrap_err(),
        DomainError::Forbidden
    );
}

#[tokio::test]
async fn deleting_a_referenced_user_leaves_the_order_dangling() {
    let app = app().await;
    let deliverer = create(&app, "D", "11111111111", "d@x.com", Role::Deliverer).await;
    let recipient = create(&app, "R", "22222222222", "r@x.com", Role::Customer).await;

    let order = app
        .orders
        .create_order(
            app.admin,
            CreateOrderRequest {
                address: "Rua X".to_string(),
                recipient_id: recipient,
                deliveryman_id: deliverer,
                delivery_photo: None,
            },
        )
        .await
        .unwrap();

    // No cascade and no referential block: the delete succeeds and the
    // order keeps its now-dangling reference.
    app.users.delete_user(app.admin, recipient).await.unwrap();
    let stored = app.store.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(stored.recipient_id, recipient);

    // Second delete reports absence.
    assert_eq!(
        app.users.delete_user(app.admin, recipient).await.unwrap_err(),
        DomainError::NotFound("user")
    );
}

#[tokio::test]
async fn admin_can_update_another_users_email_and_role() {
    let app = app().await;
    let target = create(&app, "T", "11111111111", "t@x.com", Role::Customer).await;

    let view = app
        .users
        .update_user(
            app.admin,
            target,
            UpdateUserRequest {
                email: Some("promoted@x.com".to_string()),
                role: Some(Role::Deliverer),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(view.email, "promoted@x.com");
    assert_eq!(view.role, Role::Deliverer);

    // The promoted user can now be assigned an order.
    let recipient = create(&app, "R", "22222222222", "r@x.com", Role::Customer).await;
    assert!(
        app.orders
            .create_order(
                app.admin,
                CreateOrderRequest {
                    address: "Rua X".to_string(),
                    recipient_id: recipient,
                    deliveryman_id: target,
                    delivery_photo: None,
                },
            )
            .await
            .is_ok()
    );
}
