use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. Loaded once at startup and shared
/// (cloned) through `AppState`; handlers and extractors pull it out via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects log format and whether secrets are mandatory.
    pub env: Env,
    // Postgres connection string. `None` selects the in-memory store (local only).
    pub db_url: Option<String>,
    // Upper bound for the sqlx connection pool.
    pub db_max_connections: u32,
    // HMAC secret used to sign and verify JWTs.
    pub jwt_secret: String,
    // Token lifetime in milliseconds.
    pub jwt_expiration_ms: u64,
    // Address the HTTP server binds to.
    pub bind_addr: String,
    // Optional ADMIN account created at startup when missing.
    pub admin: Option<AdminBootstrap>,
}

/// Credentials for the ADMIN account seeded at startup.
#[derive(Clone, Debug)]
pub struct AdminBootstrap {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Env
///
/// Defines the runtime context: `Local` tolerates missing secrets and a missing database,
/// `Production` refuses to start without them.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

pub const LOCAL_JWT_SECRET: &str = "daf66e01593f61a15b857cf433aae03a005812b31234e149036bcc8dee755dbb";
pub const DEFAULT_JWT_EXPIRATION_MS: u64 = 604_800_000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

impl Default for AppConfig {
    /// Safe, non-panicking configuration for tests: local env, in-memory store.
    fn default() -> Self {
        Self {
            env: Env::Local,
            db_url: None,
            db_max_connections: 5,
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            jwt_expiration_ms: DEFAULT_JWT_EXPIRATION_MS,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            admin: None,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in `Env::Production` when `DATABASE_URL` or `JWT_SECRET` is missing, and in any
    /// environment when a numeric variable cannot be parsed.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let (db_url, jwt_secret) = match env {
            Env::Production => (
                Some(env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod")),
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production."),
            ),
            Env::Local => (
                env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
                env::var("JWT_SECRET").unwrap_or_else(|_| LOCAL_JWT_SECRET.to_string()),
            ),
        };

        let jwt_expiration_ms = env::var("JWT_EXPIRATION_MS")
            .map(|raw| raw.parse().expect("FATAL: JWT_EXPIRATION_MS must be an integer"))
            .unwrap_or(DEFAULT_JWT_EXPIRATION_MS);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .map(|raw| raw.parse().expect("FATAL: DB_MAX_CONNECTIONS must be an integer"))
            .unwrap_or(5);

        let admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
            (Ok(username), Ok(password)) => Some(AdminBootstrap {
                email: env::var("ADMIN_EMAIL")
                    .unwrap_or_else(|_| format!("{}@localhost", username)),
                username,
                password,
            }),
            _ => None,
        };

        Self {
            env,
            db_url,
            db_max_connections,
            jwt_secret,
            jwt_expiration_ms,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            admin,
        }
    }
}
