//! FastFeet backend entry point.
//!
//! Control flow: transport -> authentication check -> authorization check
//! (role/ownership) -> domain operation -> record store -> response.

use std::sync::Arc;

use fastfeet::auth::password;
use fastfeet::config::AppConfig;
use fastfeet::models::{Role, User};
use fastfeet::store::{MemoryStore, RecordStore};
use fastfeet::{gateway, logging};
use uuid::Uuid;

/// Get the environment name from the command line (`--env`/`-e`).
fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from the command line (`--port`).
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

/// Create the configured admin account when the store is empty, so a
/// fresh deployment has an acting user able to create everything else.
async fn seed_admin(config: &AppConfig, store: &dyn RecordStore) -> anyhow::Result<()> {
    let Some(seed) = &config.seed_admin else {
        return Ok(());
    };
    if !store.list_users().await?.is_empty() {
        return Ok(());
    }

    let admin = User {
        id: Uuid::new_v4(),
        name: seed.name.clone(),
        cpf: seed.cpf.clone(),
        email: seed.email.clone(),
        password_hash: password::hash(&seed.password)?,
        role: Role::Admin,
    };
    tracing::info!(admin_id = %admin.id, cpf = %admin.cpf, "seeded bootstrap admin");
    store.insert_user(admin).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env)?;
    let _log_guard = logging::init_logging(&config);

    tracing::info!("Starting fastfeet backend in {} mode", env);

    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
    seed_admin(&config, store.as_ref()).await?;

    let port = get_port_override().unwrap_or(config.gateway.port);
    gateway::run_server(&config, port, store).await
}
