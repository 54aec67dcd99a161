//! UUID value generator.

use rand::Rng;
use sqlbench_core::Value;
use uuid::Uuid;

/// Generate a random UUID v4 using the provided RNG.
///
/// Drawing the bytes from the seeded RNG keeps UUIDs reproducible
/// across runs, unlike `Uuid::new_v4`.
pub fn generate_uuid_v4<R: Rng>(rng: &mut R) -> Value {
    Value::Uuid(random_uuid(rng))
}

/// Draw one v4 UUID from the RNG.
pub fn random_uuid<R: Rng>(rng: &mut R) -> Uuid {
    // Generate 16 random bytes
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40; // Version 4
    bytes[8] = (bytes[8] & 0x3f) | 0x80; // Variant RFC 4122

    Uuid::from_bytes(bytes)
}
