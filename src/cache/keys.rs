//! Cache key templates
//!
//! OS and Arch keep platform-specific content (absolute paths, native
//! binaries) apart. The checksum covers every file that defines the
//! dependency state of a Gradle build:
//!
//! - `**/*.gradle*`: build scripts in any module, Kotlin DSL included
//! - `**/gradle-wrapper.properties`: the exact Gradle version
//! - `**/gradle.properties`: Gradle configuration values
//! - `**/libs.versions.toml`: the version catalog

/// Platform prefix shared by every key
pub const KEY_PREFIX: &str = "{{ .OS }}-{{ .Arch }}-gradle-cache-";

/// Globs hashed into the exact-match key
pub const CHECKSUM_GLOBS: [&str; 4] = [
    "**/*.gradle*",
    "**/gradle-wrapper.properties",
    "**/gradle.properties",
    "**/libs.versions.toml",
];

/// Ordered lookup keys: exact checksum match first, then the platform prefix
pub const CACHE_KEYS: [&str; 2] = [
    r#"{{ .OS }}-{{ .Arch }}-gradle-cache-{{ checksum "**/*.gradle*" "**/gradle-wrapper.properties" "**/gradle.properties" "**/libs.versions.toml" }}"#,
    KEY_PREFIX,
];

/// Owned copy of [`CACHE_KEYS`] for building requests
pub fn cache_keys() -> Vec<String> {
    CACHE_KEYS.iter().map(|k| k.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_key_has_prefix_and_every_glob() {
        let exact = CACHE_KEYS[0];
        assert!(exact.starts_with(KEY_PREFIX));
        assert!(exact.contains("{{ checksum "));
        for glob in CHECKSUM_GLOBS {
            assert!(exact.contains(&format!("\"{}\"", glob)), "missing {glob}");
        }
    }

    #[test]
    fn exact_key_checksum_lists_globs_in_order() {
        let expected = CHECKSUM_GLOBS
            .iter()
            .map(|g| format!("\"{}\"", g))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(
            CACHE_KEYS[0],
            format!("{}{{{{ checksum {} }}}}", KEY_PREFIX, expected)
        );
    }

    #[test]
    fn fallback_key_is_bare_prefix() {
        assert_eq!(CACHE_KEYS[1], "{{ .OS }}-{{ .Arch }}-gradle-cache-");
        assert!(!CACHE_KEYS[1].contains("checksum"));
    }

    #[test]
    fn owned_keys_match_constant() {
        assert_eq!(cache_keys(), CACHE_KEYS.to_vec());
    }
}
