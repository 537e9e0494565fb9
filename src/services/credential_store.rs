//! Encrypted credential store for ptdash.
//!
//! Key-value persistence of login secrets (token, username, password)
//! backed by SQLite, with values sealed via AES-256-GCM. The store key is
//! derived from a fixed app passphrase plus a per-database random salt
//! kept in the `secure_meta` table.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;
use zeroize::Zeroize;

use crate::database::connection::Database;
use crate::services::crypto_service::{CryptoService, CryptoServiceTrait};
use crate::types::credential::{EncryptedData, StoredCredentials, PASSWORD_KEY, TOKEN_KEY, USERNAME_KEY};
use crate::types::errors::{CredentialError, CryptoError};

const STORE_PASSPHRASE: &str = "ptdash-secret-store-v1";
const STORE_SALT_META: &str = "secret_salt";

/// Trait defining credential store operations.
pub trait CredentialStoreTrait {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError>;
    fn remove(&self, key: &str) -> Result<(), CredentialError>;
    fn contains(&self, key: &str) -> Result<bool, CredentialError>;
}

/// Credential store backed by SQLite + CryptoService.
pub struct CredentialStore {
    db: Arc<Database>,
    crypto: CryptoService,
    store_key: Vec<u8>,
}

impl CredentialStore {
    pub fn new(db: Arc<Database>) -> Result<Self, CryptoError> {
        let crypto = CryptoService::new();
        let salt = Self::get_or_create_salt(&db, &crypto)?;
        let store_key = crypto.derive_key(STORE_PASSPHRASE, &salt)?;

        Ok(Self {
            db,
            crypto,
            store_key,
        })
    }

    /// Reads the store salt from `secure_meta`, generating and persisting
    /// one on first use.
    fn get_or_create_salt(db: &Database, crypto: &CryptoService) -> Result<Vec<u8>, CryptoError> {
        let conn = db.connection();

        let existing: Option<Vec<u8>> = conn
            .query_row(
                "SELECT value FROM secure_meta WHERE name = ?1",
                params![STORE_SALT_META],
                |row| row.get(0),
            )
            .ok();

        if let Some(salt) = existing {
            return Ok(salt);
        }

        let salt = crypto.generate_salt();
        conn.execute(
            "INSERT OR IGNORE INTO secure_meta (name, value) VALUES (?1, ?2)",
            params![STORE_SALT_META, salt],
        )
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

        Ok(salt)
    }

    /// Convenience: the stored session token, if any.
    pub fn token(&self) -> Result<Option<String>, CredentialError> {
        self.get(TOKEN_KEY)
    }

    /// Persists the session token.
    pub fn store_token(&self, token: &str) -> Result<(), CredentialError> {
        self.set(TOKEN_KEY, token)
    }

    /// Clears the session token. Missing token is not an error.
    pub fn clear_token(&self) -> Result<(), CredentialError> {
        self.remove(TOKEN_KEY)
    }

    /// Persists the username/password pair used for automatic re-login.
    pub fn store_login(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        self.set(USERNAME_KEY, username)?;
        self.set(PASSWORD_KEY, password)
    }

    /// Returns the stored username/password pair when both are present.
    pub fn stored_login(&self) -> Result<Option<StoredCredentials>, CredentialError> {
        let username = self.get(USERNAME_KEY)?;
        let password = self.get(PASSWORD_KEY)?;
        match (username, password) {
            (Some(username), Some(password)) => Ok(Some(StoredCredentials { username, password })),
            _ => Ok(None),
        }
    }

    /// Removes every stored secret (logout).
    pub fn clear_all(&self) -> Result<(), CredentialError> {
        self.remove(TOKEN_KEY)?;
        self.remove(USERNAME_KEY)?;
        self.remove(PASSWORD_KEY)
    }
}

impl CredentialStoreTrait for CredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        let conn = self.db.connection();
        let result = conn.query_row(
            "SELECT ciphertext, iv, auth_tag FROM secrets WHERE key = ?1",
            params![key],
            |row| {
                Ok(EncryptedData {
                    ciphertext: row.get(0)?,
                    iv: row.get(1)?,
                    auth_tag: row.get(2)?,
                })
            },
        );

        match result {
            Ok(encrypted) => {
                let mut decrypted = self
                    .crypto
                    .decrypt_aes256gcm(&encrypted, &self.store_key)
                    .map_err(|e| CredentialError::CryptoError(e.to_string()))?;
                let value = String::from_utf8(decrypted.clone()).map_err(|_| {
                    decrypted.zeroize();
                    CredentialError::CorruptEntry(key.to_string())
                })?;
                decrypted.zeroize();
                Ok(Some(value))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CredentialError::DatabaseError(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        let encrypted = self
            .crypto
            .encrypt_aes256gcm(value.as_bytes(), &self.store_key)
            .map_err(|e| CredentialError::CryptoError(e.to_string()))?;

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        self.db
            .connection()
            .execute(
                "INSERT OR REPLACE INTO secrets (key, ciphertext, iv, auth_tag, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![key, encrypted.ciphertext, encrypted.iv, encrypted.auth_tag, now],
            )
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CredentialError> {
        self.db
            .connection()
            .execute("DELETE FROM secrets WHERE key = ?1", params![key])
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, CredentialError> {
        let count: i64 = self
            .db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM secrets WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;
        Ok(count > 0)
    }
}
