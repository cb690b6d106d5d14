pub mod url_validator;

/// Generate a random identifier of `length` chars from `[A-Za-z0-9]`.
///
/// Stateless; uniqueness is probabilistic and enforced at insert time by
/// the storage layer.
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| ALPHABET[rand::random_range(0..ALPHABET.len())] as char)
        .take(length)
        .collect()
}
