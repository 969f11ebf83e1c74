use rand::Rng;

/// Generate a new opaque record identifier.
///
/// 12 random bytes rendered as 24 lowercase hex characters. The value
/// carries no semantic meaning; it only needs to be unique enough that
/// two inserts never collide in practice.
pub fn new_record_id() -> String {
    let mut bytes = [0u8; 12];
    rand::rng().fill(&mut bytes[..]);
    hex::encode(bytes)
}

/// Check that a string looks like a record identifier (24 hex characters)
pub fn is_record_id(value: &str) -> bool {
    value.len() == 24 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_id_shape() {
        let id = new_record_id();
        assert_eq!(id.len(), 24);
        assert!(id.bytes().all(|b| b.is_ascii_hexdigit()));
        assert!(is_record_id(&id));
    }

    #[test]
    fn test_new_record_id_unique() {
        let a = new_record_id();
        let b = new_record_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_record_id_rejects_bad_input() {
        assert!(!is_record_id(""));
        assert!(!is_record_id("abc"));
        assert!(!is_record_id("zzzzzzzzzzzzzzzzzzzzzzzz"));
        assert!(!is_record_id("0123456789abcdef0123456789abcdef"));
    }
}
