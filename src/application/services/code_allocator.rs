use rand::{distr::Alphanumeric, Rng};

pub const CODE_LENGTH: usize = 8;
pub const DELETE_KEY_LENGTH: usize = 16;

/// Source of candidate codes over `[a-zA-Z0-9]`.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, length: usize) -> String;
}

/// Draws every position uniformly from the 62-character alphabet.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}

pub fn is_valid_code(code: &str, length: usize) -> bool {
    code.len() == length && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_length_and_alphabet() {
        let generator = RandomCodeGenerator;
        for _ in 0..200 {
            assert!(is_valid_code(&generator.generate(CODE_LENGTH), CODE_LENGTH));
            assert!(is_valid_code(
                &generator.generate(DELETE_KEY_LENGTH),
                DELETE_KEY_LENGTH
            ));
        }
    }

    #[test]
    fn test_generated_codes_spread_over_alphabet() {
        let generator = RandomCodeGenerator;
        let seen: HashSet<char> = (0..500)
            .flat_map(|_| generator.generate(CODE_LENGTH).chars().collect::<Vec<_>>())
            .collect();
        // 4000 draws over 62 symbols; all three classes must appear.
        assert!(seen.iter().any(|c| c.is_ascii_lowercase()));
        assert!(seen.iter().any(|c| c.is_ascii_uppercase()));
        assert!(seen.iter().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("aB3dE6gH", 8));
        assert!(!is_valid_code("aB3dE6g", 8));
        assert!(!is_valid_code("aB3dE6g-", 8));
    }
}
