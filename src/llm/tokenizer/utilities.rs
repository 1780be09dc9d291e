use once_cell::sync::Lazy;
use regex::Regex;

/// Splits text into contractions, words, short digit runs and punctuation runs.
/// Whitespace never forms a piece of its own.
pub static PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:'s|'t|'re|'ve|'m|'ll|'d)|\p{L}+|\p{N}{1,3}|[^\s\p{L}\p{N}]+")
        .expect("pre-tokenization pattern is valid")
});

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a; stable across runs and platforms, unlike `DefaultHasher`
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ b as u64).wrapping_mul(FNV_PRIME)
    })
}

/// Pre-tokenize `text` into the pieces matched by [`PATTERN`]
pub fn split(text: &str) -> Vec<&str> {
    PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_and_contractions() {
        assert_eq!(
            split("This doesn't matter for the moment"),
            vec!["This", "doesn", "'t", "matter", "for", "the", "moment"]
        );
    }

    #[test]
    fn test_split_numbers_and_punctuation() {
        assert_eq!(split("abc 12345!!  x"), vec!["abc", "123", "45", "!!", "x"]);
        assert!(split("   \n\t").is_empty());
    }

    #[test]
    fn test_fnv1a_known_values() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }
}
