use rand::Rng;

/// Token alphabet: lowercase and digits, minus the easily confused `l` and `o`
pub const TOKEN_ALPHABET: &[u8] = b"abcdefghijkmnpqrstuvwxyz0123456789";

/// Random identifier of exactly `length` characters.
///
/// Not suitable for anything secret.
pub fn random_token(length: usize) -> String {
    random_token_with(&mut rand::rng(), length)
}

/// Same as [`random_token`] but drawing from a caller-supplied generator
pub fn random_token_with<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Uniform integer in `[min, max)`; an empty range yields `min`
pub fn random_int(min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rand::rng().random_range(min..max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_token_alphabet_and_length() {
        for length in [0, 1, 10, 64] {
            let token = random_token(length);
            assert_eq!(token.chars().count(), length);
            assert!(!token.contains('l'));
            assert!(!token.contains('o'));
            assert!(!token.chars().any(|c| c.is_ascii_uppercase()));
            assert!(token.bytes().all(|b| TOKEN_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_alphabet_is_fixed() {
        assert_eq!(TOKEN_ALPHABET.len(), 34);
    }

    #[test]
    fn test_random_int_range() {
        for _ in 0..200 {
            let n = random_int(-3, 4);
            assert!((-3..4).contains(&n));
        }
        assert_eq!(random_int(5, 5), 5);
        assert_eq!(random_int(9, 2), 9);
    }
}
