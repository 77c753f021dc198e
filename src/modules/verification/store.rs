use crate::shared::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use deadpool_redis::redis::AsyncCommands;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Absolute code lifetime from issuance.
pub const CODE_TTL_MINUTES: i64 = 10;

pub const PURPOSE_PROVIDER_SIGNUP: &str = "provider-signup";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCode {
    pub code: String,
    pub purpose: String,
    pub expires_at: DateTime<Utc>,
}

/// Transient keyed storage of one outstanding code per subject.
///
/// A new `issue` unconditionally overwrites any prior entry for the subject,
/// regardless of purpose. `lookup` never returns an expired entry and never
/// mutates a live one.
#[async_trait]
pub trait CodeStore: Send + Sync {
    async fn issue(&self, subject: &str, purpose: &str) -> AppResult<String>;
    async fn lookup(&self, subject: &str) -> AppResult<Option<StoredCode>>;
    async fn invalidate(&self, subject: &str) -> AppResult<bool>;
    async fn sweep(&self) -> AppResult<u64>;
}

/// Subjects are keyed lower-cased and trimmed.
pub fn normalize_subject(subject: &str) -> String {
    subject.trim().to_lowercase()
}

fn generate_code() -> String {
    // 6-digit uniform random; collisions are not checked.
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32))
}

// =========================================================================
// Redis Implementation
// =========================================================================

pub struct RedisCodeStore {
    pool: deadpool_redis::Pool,
}

impl RedisCodeStore {
    pub fn new(pool: deadpool_redis::Pool) -> Self {
        Self { pool }
    }

    fn key(subject: &str) -> String {
        format!("verification:{}", normalize_subject(subject))
    }

    async fn conn(&self) -> AppResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| AppError::InternalServerError(format!("Redis pool error: {}", e)))
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn issue(&self, subject: &str, purpose: &str) -> AppResult<String> {
        let code = generate_code();
        let entry = StoredCode {
            code: code.clone(),
            purpose: purpose.to_string(),
            expires_at: Utc::now() + Duration::minutes(CODE_TTL_MINUTES),
        };
        let payload = serde_json::to_string(&entry)
            .map_err(|e| AppError::InternalServerError(format!("Serialize failed: {}", e)))?;

        let mut conn = self.conn().await?;
        let ttl_secs = (CODE_TTL_MINUTES * 60) as u64;
        let _: () = conn
            .set_ex(Self::key(subject), payload, ttl_secs)
            .await
            .map_err(|e| AppError::InternalServerError(format!("Redis SET failed: {}", e)))?;

        Ok(code)
    }

    async fn lookup(&self, subject: &str) -> AppResult<Option<StoredCode>> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn
            .get(Self::key(subject))
            .await
            .map_err(|e| AppError::InternalServerError(format!("Redis GET failed: {}", e)))?;

        match raw {
            Some(payload) => {
                let entry: StoredCode = serde_json::from_str(&payload).map_err(|e| {
                    AppError::InternalServerError(format!("Deserialize failed: {}", e))
                })?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    async fn invalidate(&self, subject: &str) -> AppResult<bool> {
        let mut conn = self.conn().await?;
        let removed: u64 = conn
            .del(Self::key(subject))
            .await
            .map_err(|e| AppError::InternalServerError(format!("Redis DEL failed: {}", e)))?;
        Ok(removed > 0)
    }

    async fn sweep(&self) -> AppResult<u64> {
        // Redis expires keys natively; nothing to scan.
        Ok(0)
    }
}

// =========================================================================
// InMemory Implementation
// =========================================================================

pub struct InMemoryCodeStore {
    entries: Mutex<HashMap<String, StoredCode>>,
    skew: Mutex<Duration>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            skew: Mutex::new(Duration::zero()),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now() + *self.skew.lock().unwrap()
    }

    /// Shifts the store's clock forward, so expiry can be exercised without
    /// waiting wall-clock minutes.
    #[cfg(test)]
    pub fn advance(&self, by: Duration) {
        let mut skew = self.skew.lock().unwrap();
        *skew = *skew + by;
    }
}

impl Default for InMemoryCodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeStore for InMemoryCodeStore {
    async fn issue(&self, subject: &str, purpose: &str) -> AppResult<String> {
        let code = generate_code();
        let entry = StoredCode {
            code: code.clone(),
            purpose: purpose.to_string(),
            expires_at: self.now() + Duration::minutes(CODE_TTL_MINUTES),
        };
        self.entries
            .lock()
            .unwrap()
            .insert(normalize_subject(subject), entry);
        Ok(code)
    }

    async fn lookup(&self, subject: &str) -> AppResult<Option<StoredCode>> {
        let key = normalize_subject(subject);
        let now = self.now();
        let mut entries = self.entries.lock().unwrap();

        match entries.get(&key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.clone())),
            Some(_) => {
                // Lazy deletion on an expired read
                entries.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn invalidate(&self, subject: &str) -> AppResult<bool> {
        let removed = self
            .entries
            .lock()
            .unwrap()
            .remove(&normalize_subject(subject));
        Ok(removed.is_some())
    }

    async fn sweep(&self) -> AppResult<u64> {
        let now = self.now();
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        Ok((before - entries.len()) as u64)
    }
}
