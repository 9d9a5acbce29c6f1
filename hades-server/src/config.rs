//! Back-office server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration, loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port for the desktop frontend API
    pub http_port: u16,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// Environment: development | staging | production
    pub environment: String,
    /// Username of the bootstrap system administrator account
    pub admin_username: String,
    /// Password of the bootstrap system administrator account
    pub admin_password: String,
    /// Full name used when self-healing synthesizes a branch administrator
    pub default_admin_name: String,
    /// Initial password assigned to newly created staff accounts
    pub staff_default_password: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment: environment.clone(),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: Self::require_secret("ADMIN_PASSWORD", &environment)?,
            default_admin_name: std::env::var("DEFAULT_ADMIN_NAME")
                .unwrap_or_else(|_| "System Administrator".into()),
            staff_default_password: Self::require_secret("STAFF_DEFAULT_PASSWORD", &environment)?,
        })
    }
}
