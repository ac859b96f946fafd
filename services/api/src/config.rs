/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3100). Env var: `API_PORT`.
    pub api_port: u16,
    /// Object storage HTTP API base URL. Env var: `STORAGE_URL`.
    pub storage_url: String,
    /// Object storage bearer key. Env var: `STORAGE_KEY`.
    pub storage_key: String,
    /// Object storage bucket (default "media"). Env var: `STORAGE_BUCKET`.
    pub storage_bucket: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3100),
            storage_url: std::env::var("STORAGE_URL").expect("STORAGE_URL"),
            storage_key: std::env::var("STORAGE_KEY").expect("STORAGE_KEY"),
            storage_bucket: std::env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "media".to_owned()),
        }
    }
}
