//! Verification code generation for group invitations.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Smallest code ever produced.
pub const MIN_VERIFICATION_CODE: u64 = 1000;

/// Modulus applied to the random draw (4 decimal digits).
const CODE_MODULUS: u64 = 10_000;

/// Error raised when the random source cannot be read.
#[derive(Debug, Error)]
pub enum CodeGenerationError {
    #[error("random source failure: {0}")]
    RandomSource(#[from] rand::Error),
}

/// Generates a 4-digit numeric verification code from the operating system CSPRNG.
pub fn generate_verification_code() -> Result<String, CodeGenerationError> {
    verification_code_from(&mut OsRng)
}

/// Generates a verification code from the given random source.
///
/// Eight bytes are read as a little-endian `u64` and reduced modulo 10000.
/// Results below 1000 are lifted by adding 1000, so the distribution is
/// deliberately not uniform over `[1000, 9999]`.
pub fn verification_code_from<R>(rng: &mut R) -> Result<String, CodeGenerationError>
where
    R: RngCore + ?Sized,
{
    let mut bytes = [0u8; 8];
    rng.try_fill_bytes(&mut bytes)?;

    let mut code = u64::from_le_bytes(bytes) % CODE_MODULUS;
    if code < MIN_VERIFICATION_CODE {
        code += MIN_VERIFICATION_CODE;
    }
    Ok(code.to_string())
}
