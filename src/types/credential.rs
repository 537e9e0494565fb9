use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fixed credential store keys.
pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";
pub const PASSWORD_KEY: &str = "password";

/// A username/password pair pulled out of the store for re-login.
///
/// Zeroized on drop so plaintext secrets do not linger in memory.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct StoredCredentials {
    pub username: String,
    pub password: String,
}

/// Encrypted data container used by CryptoService.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedData {
    pub ciphertext: Vec<u8>,
    pub iv: Vec<u8>,
    pub auth_tag: Vec<u8>,
}
