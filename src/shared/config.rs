use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub rust_log: String,
    pub app_env: String,
    pub redis_url: String,
    pub smtp_user: String,
    pub smtp_password: String,
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    pub jwt_secret: String,
}

impl Config {
    pub fn init() -> Self {
        dotenv().ok();

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Only required outside dev (dev uses in-memory stores)
        let database_url = if app_env == "dev" {
            env::var("DATABASE_URL").unwrap_or_else(|_| "".to_string())
        } else {
            env::var("DATABASE_URL").expect("DATABASE_URL must be set")
        };
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("SERVER_PORT must be a valid number");
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        // Redis Config
        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string());

        // SMTP Config
        let smtp_user = env::var("SMTP_USER").unwrap_or_else(|_| "".to_string());
        let smtp_password = env::var("SMTP_PASSWORD").unwrap_or_else(|_| "".to_string());

        // Razorpay Config
        let razorpay_key_id = env::var("RAZORPAY_KEY_ID").unwrap_or_else(|_| "".to_string());
        let razorpay_key_secret =
            env::var("RAZORPAY_KEY_SECRET").unwrap_or_else(|_| "".to_string());

        let jwt_secret = if app_env == "dev" {
            env::var("JWT_SECRET").unwrap_or_else(|_| "dev_secret_change_me".to_string())
        } else {
            env::var("JWT_SECRET").expect("JWT_SECRET must be set")
        };

        Self {
            database_url,
            server_host,
            server_port,
            rust_log,
            app_env,
            redis_url,
            smtp_user,
            smtp_password,
            razorpay_key_id,
            razorpay_key_secret,
            jwt_secret,
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            database_url: "".to_string(),
            server_host: "localhost".to_string(),
            server_port: 3000,
            rust_log: "info".to_string(),
            app_env: "test".to_string(),
            redis_url: "".to_string(),
            smtp_user: "".to_string(),
            smtp_password: "".to_string(),
            razorpay_key_id: "".to_string(),
            razorpay_key_secret: "".to_string(),
            jwt_secret: "test_secret".to_string(),
        }
    }
}
