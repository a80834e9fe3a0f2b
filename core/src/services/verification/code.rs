//! Verification code generation.

use rand::rngs::OsRng;
use rand::Rng;

use crate::domain::entities::verification_record::CODE_LENGTH;

/// Generates a uniformly-distributed 6-digit verification code
///
/// Draws from the OS CSPRNG. `gen_range` performs rejection sampling
/// internally, so the distribution over `000000..=999999` is unbiased.
/// An entropy-source fault panics; that is fatal to the process rather
/// than a recoverable error.
pub fn generate_code() -> String {
    let code: u32 = OsRng.gen_range(0..1_000_000);
    format!("{:06}", code)
}

/// Checks that a submitted code has the expected shape: exactly six ASCII
/// digits. Malformed input is rejected before any stored state is touched.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_format() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            let num: u32 = code.parse().expect("code should parse as a number");
            assert!(num < 1_000_000);
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: Vec<String> = (0..100).map(|_| generate_code()).collect();
        let unique = codes.iter().collect::<std::collections::HashSet<_>>().len();
        assert!(unique > 1);
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("000000"));
        assert!(is_well_formed("123456"));
        assert!(!is_well_formed("12345"));
        assert!(!is_well_formed("1234567"));
        assert!(!is_well_formed("12345a"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("１２３４５６"));
    }
}
