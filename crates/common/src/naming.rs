//! Case conversion for generated identifiers
//!
//! Both conversions are pure functions of their input: the same client name
//! always yields the same identifier, independent of any other configured
//! client.

/// Convert a client name to PascalCase
///
/// Splits on `-`, `_`, `.` and spaces, and on lower-to-upper case
/// boundaries: `user-profile` -> `UserProfile`, `myApi` -> `MyApi`.
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize = true;

    for ch in s.chars() {
        if ch == '-' || ch == '_' || ch == '.' || ch == ' ' {
            capitalize = true;
        } else if capitalize {
            result.extend(ch.to_uppercase());
            capitalize = false;
        } else {
            result.push(ch);
        }
    }

    result
}

/// Convert a client name to kebab-case
///
/// `userProfile` -> `user-profile`, `HTTPServer` -> `http-server`.
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            // Add hyphen before uppercase if:
            // 1. Not at the start
            // 2. Previous char is lowercase or digit
            // 3. OR next char is lowercase (handles HTTPServer -> http-server)
            let should_add_hyphen = i > 0
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || (i + 1 < chars.len() && chars[i + 1].is_lowercase()));

            if should_add_hyphen && !result.ends_with('-') {
                result.push('-');
            }
            result.push(ch.to_ascii_lowercase());
        } else if ch == '_' || ch == '.' || ch == ' ' {
            // Replace underscores, dots and spaces with hyphens
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
        } else {
            result.push(ch);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case_from_kebab() {
        assert_eq!(to_pascal_case("user-profile"), "UserProfile");
        assert_eq!(to_pascal_case("pets"), "Pets");
        assert_eq!(to_pascal_case("user-profile-fetch"), "UserProfileFetch");
    }

    #[test]
    fn test_pascal_case_preserves_existing_caps() {
        assert_eq!(to_pascal_case("myApi"), "MyApi");
        assert_eq!(to_pascal_case("snake_case_name"), "SnakeCaseName");
    }

    #[test]
    fn test_kebab_case_from_camel() {
        assert_eq!(to_kebab_case("userProfile"), "user-profile");
        assert_eq!(to_kebab_case("HTTPServer"), "http-server");
    }

    #[test]
    fn test_kebab_case_is_stable_on_kebab_input() {
        assert_eq!(to_kebab_case("user-profile"), "user-profile");
        assert_eq!(to_kebab_case("pets"), "pets");
    }
}
