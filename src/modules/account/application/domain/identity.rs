use rand::{distributions::Alphanumeric, Rng};
use uuid::Uuid;

pub const MAX_USERNAME_LENGTH: usize = 255;
pub const MAX_NAME_KEY_LENGTH: usize = 64;
pub const MAX_SLUG_LENGTH: usize = 128;
const NAME_KEY_TOKEN_LENGTH: usize = 12;
const SIMPLE_UUID_LENGTH: usize = 32;

pub fn new_identifier() -> Uuid {
    Uuid::new_v4()
}

/// Sanitized `preferred` (or `default_label` when nothing survives) plus a
/// random token, at most [`MAX_NAME_KEY_LENGTH`] characters of `[a-z0-9-]`.
pub fn derive_name_key(preferred: &str, default_label: &str) -> String {
    let base = match url_safe(preferred) {
        base if base.is_empty() => url_safe(default_label),
        base => base,
    };
    let base = truncate_segment(&base, MAX_NAME_KEY_LENGTH - NAME_KEY_TOKEN_LENGTH - 1);

    format!("{}-{}", base, random_token(NAME_KEY_TOKEN_LENGTH))
}

/// Pure: the same `(name_key, id)` always yields the same slug. The full
/// identifier is always kept; only the name part is shortened.
pub fn derive_slug(name_key: &str, id: Uuid) -> String {
    let name = truncate_segment(&url_safe(name_key), MAX_SLUG_LENGTH - SIMPLE_UUID_LENGTH - 1);

    if name.is_empty() {
        return id.simple().to_string();
    }
    format!("{}-{}", name, id.simple())
}

/// Lower-cases and maps every run of characters outside `[a-z0-9]` to a
/// single `-`, with no leading or trailing separator.
fn url_safe(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }

    out
}

fn random_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// Cuts an ASCII segment to `max` bytes without leaving a trailing `-`.
fn truncate_segment(value: &str, max: usize) -> String {
    let cut = &value[..value.len().min(max)];
    cut.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_url_safe(value: &str) -> bool {
        value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }

    #[test]
    fn test_name_key_uses_preferred_value() {
        let key = derive_name_key("AquaMan", "user");

        assert!(key.starts_with("aquaman-"));
        assert_eq!(key.len(), "aquaman-".len() + NAME_KEY_TOKEN_LENGTH);
        assert_eq!(key, key.to_lowercase());
    }

    #[test]
    fn test_name_key_falls_back_to_default_label() {
        assert!(derive_name_key("", "user").starts_with("user-"));
        assert!(derive_name_key("   ", "user").starts_with("user-"));
        assert!(derive_name_key("ñ?/", "user").starts_with("user-"));
    }

    #[test]
    fn test_name_key_is_randomized() {
        assert_ne!(derive_name_key("aquaman", "user"), derive_name_key("aquaman", "user"));
    }

    #[test]
    fn test_name_key_is_capped_and_keeps_token() {
        let long = "x".repeat(200);
        let key = derive_name_key(&long, "user");

        assert_eq!(key.len(), MAX_NAME_KEY_LENGTH);
        let (base, token) = key.rsplit_once('-').unwrap();
        assert_eq!(token.len(), NAME_KEY_TOKEN_LENGTH);
        assert!(base.chars().all(|c| c == 'x'));
    }

    #[test]
    fn test_name_key_sanitizes_hostile_input() {
        let key = derive_name_key("  Aqua Man/1?q=ñ  ", "user");

        assert!(key.starts_with("aqua-man-1-q-"), "{key}");
        assert!(is_url_safe(&key), "{key}");
    }

    #[test]
    fn test_name_key_with_multibyte_input_stays_ascii() {
        let key = derive_name_key(&"ñb".repeat(100), "user");

        assert!(key.len() <= MAX_NAME_KEY_LENGTH);
        assert!(is_url_safe(&key), "{key}");
        assert!(!key.contains("--"), "{key}");
    }

    #[test]
    fn test_slug_is_pure() {
        let id = new_identifier();
        assert_eq!(derive_slug("aquaman-abc", id), derive_slug("aquaman-abc", id));
    }

    #[test]
    fn test_slug_is_url_safe_and_lowercase() {
        let id = new_identifier();
        let slug = derive_slug("Aqua-Man", id);

        assert!(slug.starts_with("aqua-man-"));
        assert!(slug.ends_with(&id.simple().to_string()));
        assert!(is_url_safe(&slug));
    }

    #[test]
    fn test_slug_sanitizes_hostile_name_key() {
        let id = new_identifier();
        let slug = derive_slug("Aqua Man/1?x=ü", id);

        assert_eq!(slug, format!("aqua-man-1-x-{}", id.simple()));
        assert!(is_url_safe(&slug));
    }

    #[test]
    fn test_slug_differs_per_identifier() {
        assert_ne!(
            derive_slug("aquaman", new_identifier()),
            derive_slug("aquaman", new_identifier())
        );
    }

    #[test]
    fn test_slug_is_capped_and_keeps_identifier() {
        let id = new_identifier();
        let slug = derive_slug(&"k".repeat(200), id);

        assert_eq!(slug.len(), MAX_SLUG_LENGTH);
        assert!(slug.ends_with(&id.simple().to_string()));
    }

    #[test]
    fn test_derived_slug_fits_for_long_usernames() {
        for len in [18, 19, 40, MAX_USERNAME_LENGTH] {
            let username = "a".repeat(len);
            let slug = derive_slug(&derive_name_key(&username, "user"), new_identifier());
            assert!(slug.len() <= MAX_SLUG_LENGTH, "len {len}: {}", slug.len());
        }
    }

    #[test]
    fn test_slug_column_width_matches_limit() {
        assert_eq!(migration::SLUG_MAX_LENGTH as usize, MAX_SLUG_LENGTH);
    }
}
