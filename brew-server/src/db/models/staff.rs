//! Staff Model
//!
//! 后台管理账号。密码使用 argon2 哈希存储，哈希永不出库。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use surrealdb::RecordId;

/// Staff account entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub username: String,
    pub display_name: String,
    // 仅入库，API 响应使用 UserInfo，不携带哈希
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash_pass: String,
    pub role: String,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

impl Staff {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

impl From<Staff> for UserInfo {
    fn from(s: Staff) -> Self {
        UserInfo {
            id: serde_helpers::id_string(&s.id),
            username: s.username,
            display_name: s.display_name,
            role: s.role,
            is_active: s.is_active,
        }
    }
}
