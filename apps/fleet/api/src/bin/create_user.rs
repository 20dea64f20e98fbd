//! Provision a login for the fleet API.
//!
//! ```text
//! DATABASE_URL=postgresql://... create_user --username dispatcher --password 'correct horse'
//! ```

use clap::Parser;
use core_config::{Environment, FromEnv};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::PostgresConfig;
use domain_users::{CreateUser, PgUserRepository, UserError, UserService};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Create a user that can log in to the fleet API")]
struct Args {
    /// Login name
    #[arg(short, long)]
    username: String,

    /// Plain-text password, hashed with argon2 before storage
    #[arg(short, long, env = "FLEET_USER_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let args = Args::parse();

    let db = database::postgres::connect_from_config(PostgresConfig::from_env()?)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    let service = UserService::new(PgUserRepository::new(db.clone()));
    let result = service
        .create_user(CreateUser {
            username: args.username.clone(),
            password: args.password,
        })
        .await;

    let outcome = match result {
        Ok(user) => {
            info!(user_id = %user.id, "Created user");
            println!("User '{}' created", user.username);
            Ok(())
        }
        Err(UserError::DuplicateUsername(_)) => {
            println!("User '{}' already exists", args.username);
            Ok(())
        }
        Err(e) => Err(eyre::eyre!("Failed to create user: {}", e)),
    };

    if let Err(e) = db.close().await {
        tracing::warn!("Error closing PostgreSQL: {}", e);
    }

    outcome
}
