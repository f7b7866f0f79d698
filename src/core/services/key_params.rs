use crate::core::models::algorithm::{Algorithm, KeyRole, KeyUsage};

/// Key lengths available for ElGamal keys. Requests snap to the closest
/// entry, so ElGamal never rejects a length outright.
const ELGAMAL_SUPPORTED_LENGTHS: [u32; 5] = [1536, 2048, 3072, 4096, 8192];

/// Normalize a requested key length for a size-based algorithm.
///
/// - **RSA**: legal above 1024 and up to 16384 bits; rounded up to the
///   next multiple of 8.
/// - **ElGamal**: snapped to the closest supported length; exact ties go
///   to the smaller candidate.
/// - **DSA**: legal between 512 and 1024 bits; rounded up to the next
///   multiple of 64.
/// - **ECDSA/ECDH**: strength comes from the curve, never a bit length,
///   so there is nothing to normalize.
///
/// Returns `None` when the request falls outside the legal range (or the
/// algorithm takes no length at all). Never panics.
pub fn proper_key_length(algorithm: Algorithm, requested: u32) -> Option<u32> {
    match algorithm {
        Algorithm::Rsa => (requested > 1024 && requested <= 16384)
            .then(|| requested + ((8 - requested % 8) % 8)),
        Algorithm::ElGamal => ELGAMAL_SUPPORTED_LENGTHS
            .iter()
            .copied()
            .min_by_key(|length| length.abs_diff(requested)),
        Algorithm::Dsa => (requested >= 512 && requested <= 1024)
            .then(|| requested + ((64 - requested % 64) % 64)),
        Algorithm::Ecdsa | Algorithm::Ecdh => None,
    }
}

/// Whether a capability may be set on a key of this algorithm.
///
/// Certify is reserved for the primary slot: RSA and ECDSA keys may
/// certify only when `role` is `Primary`. ElGamal and ECDH are
/// encrypt-only, DSA is sign-only.
pub fn is_usage_legal(algorithm: Algorithm, flag: KeyUsage, role: KeyRole) -> bool {
    match algorithm {
        Algorithm::Rsa => flag != KeyUsage::Certify || role.is_primary(),
        Algorithm::Dsa => flag == KeyUsage::Sign,
        Algorithm::ElGamal | Algorithm::Ecdh => flag == KeyUsage::Encrypt,
        Algorithm::Ecdsa => match flag {
            KeyUsage::Certify => role.is_primary(),
            KeyUsage::Sign | KeyUsage::Authenticate => true,
            KeyUsage::Encrypt => false,
        },
    }
}
