use std::fmt;

// === AuthError ===

/// Errors related to authentication against the remote panel.
#[derive(Debug)]
pub enum AuthError {
    /// No credentials are stored and none were supplied.
    NotLoggedIn,
    /// The login endpoint responded without the expected token field.
    MissingToken(String),
    /// The login endpoint rejected the credentials.
    LoginRejected(String),
    /// A network error occurred during login.
    NetworkError(String),
    /// Failed to read or write the credential store.
    StoreError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotLoggedIn => write!(f, "Not logged in"),
            AuthError::MissingToken(msg) => {
                write!(f, "Login response missing token: {}", msg)
            }
            AuthError::LoginRejected(msg) => write!(f, "Login rejected: {}", msg),
            AuthError::NetworkError(msg) => write!(f, "Login network error: {}", msg),
            AuthError::StoreError(msg) => write!(f, "Credential store error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

// === NetworkError ===

/// Errors related to HTTP transport failures.
#[derive(Debug)]
pub enum NetworkError {
    /// The server responded with a non-2xx status.
    Status(u16, String),
    /// The request exceeded the fixed timeout.
    Timeout(String),
    /// The response body was empty or not valid JSON.
    InvalidBody(String),
    /// A connection-level failure occurred.
    Transport(String),
}

impl NetworkError {
    /// True when this failure signals an invalid or expired credential.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, NetworkError::Status(401, _))
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::Status(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            NetworkError::Timeout(msg) => write!(f, "Request timed out: {}", msg),
            NetworkError::InvalidBody(msg) => write!(f, "Invalid response body: {}", msg),
            NetworkError::Transport(msg) => write!(f, "Transport error: {}", msg),
        }
    }
}

impl std::error::Error for NetworkError {}

// === ParseError ===

/// Errors related to decoding the upstream page component tree.
#[derive(Debug)]
pub enum ParseError {
    /// The response root does not match the expected page schema.
    SchemaMismatch(String),
    /// The statistics table node is absent from the response.
    MissingTable(String),
    /// The table body node is absent from the table.
    MissingTableBody(String),
    /// A required field is absent or of the wrong type.
    MissingField(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::SchemaMismatch(msg) => write!(f, "Page schema mismatch: {}", msg),
            ParseError::MissingTable(msg) => write!(f, "Statistics table not found: {}", msg),
            ParseError::MissingTableBody(msg) => {
                write!(f, "Statistics table body not found: {}", msg)
            }
            ParseError::MissingField(field) => write!(f, "Missing field: {}", field),
        }
    }
}

impl std::error::Error for ParseError {}

// === FetchError ===

/// Errors surfaced by a full fetch pass (auth + GET + bounded retry).
#[derive(Debug)]
pub enum FetchError {
    /// Authentication failed and could not be recovered.
    Auth(AuthError),
    /// The network failed in a non-auth way.
    Network(NetworkError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Auth(e) => write!(f, "{}", e),
            FetchError::Network(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<AuthError> for FetchError {
    fn from(e: AuthError) -> Self {
        FetchError::Auth(e)
    }
}

impl From<NetworkError> for FetchError {
    fn from(e: NetworkError) -> Self {
        FetchError::Network(e)
    }
}

// === CredentialError ===

/// Errors related to the encrypted credential store.
#[derive(Debug)]
pub enum CredentialError {
    /// Database operation failed.
    DatabaseError(String),
    /// Cryptographic operation failed while sealing or opening a secret.
    CryptoError(String),
    /// The stored blob could not be decoded back into a string.
    CorruptEntry(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::DatabaseError(msg) => {
                write!(f, "Credential database error: {}", msg)
            }
            CredentialError::CryptoError(msg) => write!(f, "Credential crypto error: {}", msg),
            CredentialError::CorruptEntry(key) => write!(f, "Corrupt credential entry: {}", key),
        }
    }
}

impl std::error::Error for CredentialError {}

// === CryptoError ===

/// Errors related to cryptographic operations.
#[derive(Debug)]
pub enum CryptoError {
    /// Failed to derive encryption key from the passphrase.
    KeyDerivation(String),
    /// Encryption operation failed.
    Encryption(String),
    /// Decryption operation failed.
    Decryption(String),
    /// Failed to generate random bytes.
    RandomGeneration(String),
    /// The provided key is invalid.
    InvalidKey(String),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::KeyDerivation(msg) => write!(f, "Key derivation failed: {}", msg),
            CryptoError::Encryption(msg) => write!(f, "Encryption failed: {}", msg),
            CryptoError::Decryption(msg) => write!(f, "Decryption failed: {}", msg),
            CryptoError::RandomGeneration(msg) => {
                write!(f, "Random generation failed: {}", msg)
            }
            CryptoError::InvalidKey(msg) => write!(f, "Invalid key: {}", msg),
        }
    }
}

impl std::error::Error for CryptoError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
