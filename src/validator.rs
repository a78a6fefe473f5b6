/// Number of digits in an identifier, check digits included.
pub const ID_LENGTH: usize = 11;

/// Check an 11-digit identifier against its two trailing check digits.
///
/// Anything that is not exactly 11 ASCII digits is rejected, as are the
/// sequences made of a single repeated digit ("00000000000", "11111111111", ...)
/// which satisfy the checksum but are never issued.
pub fn is_valid(identifier: &str) -> bool {
    let digits = match to_digits(identifier) {
        Some(digits) => digits,
        None => return false,
    };

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    (9..ID_LENGTH).all(|i| check_digit(&digits[..i]) == digits[i])
}

/// Strip the `.` and `-` punctuation from a matched identifier.
pub fn normalize(matched: &str) -> String {
    matched.chars().filter(|c| *c != '.' && *c != '-').collect()
}

/// Render 11 digits as `DDD.DDD.DDD-DD`.
pub fn format(digits: &str) -> Option<String> {
    to_digits(digits)?;
    Some(format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    ))
}

fn to_digits(identifier: &str) -> Option<[u32; ID_LENGTH]> {
    if identifier.len() != ID_LENGTH {
        return None;
    }

    let mut digits = [0u32; ID_LENGTH];
    for (slot, c) in digits.iter_mut().zip(identifier.chars()) {
        *slot = c.to_digit(10)?;
    }
    Some(digits)
}

// Weights run from (len + 1) down to 2 over the preceding digits.
fn check_digit(preceding: &[u32]) -> u32 {
    let top = preceding.len() as u32 + 1;
    let sum: u32 = preceding
        .iter()
        .enumerate()
        .map(|(num, d)| d * (top - num as u32))
        .sum();
    (sum * 10) % 11 % 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_valid_identifier() {
        assert!(is_valid("11144477735"));
        assert!(is_valid("52998224725"));
    }

    #[test]
    fn test_perturbed_check_digit_is_invalid() {
        assert!(!is_valid("11144477736"));
        assert!(!is_valid("11144477745"));
    }

    #[test]
    fn test_repeated_digits_are_invalid() {
        for d in 0..10 {
            let id = d.to_string().repeat(ID_LENGTH);
            assert!(!is_valid(&id), "{} should be rejected", id);
        }
    }

    #[test]
    fn test_malformed_input_is_invalid() {
        assert!(!is_valid(""));
        assert!(!is_valid("1114447773"));
        assert!(!is_valid("111444777350"));
        assert!(!is_valid("111.444.777-35"));
        assert!(!is_valid("1114447773a"));
        // Non-ASCII digits must not slip through `to_digit`.
        assert!(!is_valid("١١١٤٤٤٧٧٧٣٥"));
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("111.444.777-35"), "11144477735");
        assert_eq!(normalize("11144477735"), "11144477735");
    }

    #[test]
    fn test_format() {
        assert_eq!(format("11144477735").as_deref(), Some("111.444.777-35"));
        assert_eq!(format("1114447773"), None);
        assert_eq!(format("1114447773x"), None);
    }
}
