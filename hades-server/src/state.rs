//! Application state for hades-server

use sqlx::PgPool;

use crate::config::Config;
use crate::db;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// Full name used when self-healing synthesizes a branch administrator
    pub default_admin_name: String,
    /// Initial password assigned to newly created staff accounts
    pub staff_default_password: String,
}

impl AppState {
    /// Create a new AppState: connect, migrate, bootstrap
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let state = Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            default_admin_name: config.default_admin_name.clone(),
            staff_default_password: config.staff_default_password.clone(),
        };

        // Bootstrap: system administrator account for the login screen
        db::admin_users::ensure_default_admin(
            &state.pool,
            &config.admin_username,
            &config.admin_password,
        )
        .await
        .map_err(shared::error::AppError::from)?;

        // Self-heal: every active branch must have one active administrator.
        // Point-in-time check at startup, not a continuously-enforced trigger.
        for branch in db::branches::list_active(&state.pool)
            .await
            .map_err(shared::error::AppError::from)?
        {
            let healed = db::staff::ensure_active_admin(
                &state.pool,
                branch.id,
                &config.default_admin_name,
                &config.staff_default_password,
            )
            .await
            .map_err(shared::error::AppError::from)?;
            if let Some(id) = healed {
                tracing::warn!(
                    branch_id = branch.id,
                    employee_id = id,
                    "Branch had no active administrator, restored one"
                );
            }
        }

        Ok(state)
    }
}
