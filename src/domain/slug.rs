//! Slug derivation and validation for bar records.
//!
//! Slugs are derived from the bar name at creation time: lowercase ASCII
//! with runs of non-alphanumeric characters collapsed to a single hyphen.
//! Runs at the edges of the name collapse to a hyphen too, so a name with
//! leading or trailing punctuation yields a slug with an edge hyphen.
//! Derivation is never repeated on rename, and no uniqueness check is made;
//! a colliding slug surfaces as a database unique violation.

/// Derive a URL slug from a bar name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    if pending_hyphen {
        slug.push('-');
    }
    slug
}

/// Return `true` when `value` is a valid bar slug.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Kava Social", "kava-social")]
    #[case("Bula's  Kava & Kratom Bar", "bula-s-kava-kratom-bar")]
    #[case("MELO Lounge!!!", "melo-lounge-")]
    #[case("  padded  ", "-padded-")]
    #[case("808 Kava", "808-kava")]
    #[case("   ", "-")]
    fn slugify_collapses_non_alphanumerics(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slugify(name), expected);
    }

    #[rstest]
    #[case("kava-social", true)]
    #[case("808-kava", true)]
    #[case("Kava", false)]
    #[case("kava social", false)]
    #[case("", false)]
    fn validates_slug_shape(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }

    #[test]
    fn derived_slugs_are_valid() {
        for name in ["Kava Social", "Bula's Kava & Kratom Bar", "MELO Lounge!!!"] {
            assert!(is_valid_slug(&slugify(name)), "slug for {name:?}");
        }
    }
}
