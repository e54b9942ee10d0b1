//! Short code generation.
//!
//! Codes are drawn from a fixed 62-symbol alphanumeric alphabet using the
//! operating system CSPRNG. Each character is sampled independently and
//! uniformly; bytes that would bias the `% 62` reduction are discarded.

/// Alphabet used for every generated code.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of codes allocated for shortened URLs.
pub const SHORT_URL_CODE_LENGTH: usize = 7;

/// Length of codes assigned to bookmarks.
pub const BOOKMARK_CODE_LENGTH: usize = 8;

/// Largest multiple of the alphabet size that fits in a byte.
const ACCEPT_BOUND: u8 = (256 / ALPHABET.len() * ALPHABET.len()) as u8;

/// Extra bytes requested per fill to absorb rejected samples.
const FILL_SLACK: usize = 4;

const MAX_FILL: usize = 64;

/// The entropy source failed while a code was being generated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("entropy source failed: {0}")]
pub struct GenerationError(String);

impl GenerationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Fills a buffer with random bytes.
pub type EntropyFn = fn(&mut [u8]) -> Result<(), GenerationError>;

/// Produces random fixed-length codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Generates a code of exactly `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the entropy source fails at any position.
    /// No partial code is returned and nothing is retried.
    fn generate_code(&self, length: usize) -> Result<String, GenerationError>;
}

/// Cryptographically secure code generator backed by `getrandom`.
#[derive(Clone, Copy)]
pub struct SecureCodeGenerator {
    fill: EntropyFn,
}

impl SecureCodeGenerator {
    pub fn new() -> Self {
        Self { fill: os_entropy }
    }

    /// Uses a custom entropy source instead of the OS generator.
    pub fn with_entropy(fill: EntropyFn) -> Self {
        Self { fill }
    }
}

impl Default for SecureCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for SecureCodeGenerator {
    fn generate_code(&self, length: usize) -> Result<String, GenerationError> {
        let mut code = String::with_capacity(length);
        let mut buf = [0u8; MAX_FILL];

        while code.len() < length {
            let want = (length - code.len() + FILL_SLACK).min(MAX_FILL);
            let bytes = &mut buf[..want];
            (self.fill)(bytes)?;

            for &b in bytes.iter().filter(|&&b| b < ACCEPT_BOUND) {
                if code.len() == length {
                    break;
                }
                code.push(ALPHABET[usize::from(b) % ALPHABET.len()] as char);
            }
        }

        Ok(code)
    }
}

fn os_entropy(buf: &mut [u8]) -> Result<(), GenerationError> {
    getrandom::fill(buf).map_err(|e| GenerationError::new(e.to_string()))
}
