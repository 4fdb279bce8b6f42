//! Identifier and naming utilities
//!
//! Fresh ids for new entities, plus the deterministic name handling every
//! mutation relies on: human-supplied names are trimmed and de-duplicated by
//! appending `_2`, `_3`, ... and constraint names are squeezed into a valid
//! identifier shape. None of these functions have side effects.

use heck::ToSnakeCase;
use std::collections::HashSet;
use uuid::Uuid;

/// Name used when a caller supplies an empty or blank name
pub const PLACEHOLDER_NAME: &str = "unnamed";

/// Constraint name used when neither the candidate nor the fallback is usable
pub const FALLBACK_CONSTRAINT_NAME: &str = "fk_constraint";

/// Longest identifier PostgreSQL keeps without truncation (NAMEDATALEN - 1)
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Upper bound on re-normalization; real input settles after one extra pass
const MAX_SNAKE_PASSES: usize = 4;

/// Generate a new opaque identifier.
///
/// Unique with overwhelming probability; carries no ordering.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Return `base` if it does not collide with `existing`, otherwise the first
/// free `base_2`, `base_3`, ...
///
/// `base` is trimmed first; a blank base becomes [`PLACEHOLDER_NAME`].
/// Comparison is exact (case-sensitive).
///
/// # Examples
///
/// ```
/// use ddlforge_core::ensure_unique_name;
///
/// assert_eq!(ensure_unique_name("users", ["orders"]), "users");
/// assert_eq!(ensure_unique_name("users", ["users", "users_2"]), "users_3");
/// ```
pub fn ensure_unique_name<I, S>(base: &str, existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let taken = collect_names(existing);
    let trimmed = base.trim();
    let base = if trimmed.is_empty() {
        PLACEHOLDER_NAME
    } else {
        trimmed
    };
    dedupe(base, &taken, None)
}

/// Clean `candidate` into a constraint-name shape, or fall back.
///
/// The cleaned form keeps ASCII letters, digits and `_`; whitespace, `-` and
/// `.` become `_`; everything else is dropped. Runs of `_` collapse, leading
/// and trailing `_` are stripped, and the result is cut to
/// [`MAX_IDENTIFIER_LEN`]. A cleaned name is usable when it is non-empty and
/// does not start with a digit. When the candidate is unusable the cleaned
/// `fallback` is used, and when that is unusable too
/// [`FALLBACK_CONSTRAINT_NAME`].
///
/// The function is idempotent for a fixed fallback.
pub fn sanitize_constraint_name(candidate: &str, fallback: &str) -> String {
    let cleaned = clean_identifier(candidate);
    if is_usable_identifier(&cleaned) {
        return cleaned;
    }
    let cleaned_fallback = clean_identifier(fallback);
    if is_usable_identifier(&cleaned_fallback) {
        cleaned_fallback
    } else {
        FALLBACK_CONSTRAINT_NAME.to_string()
    }
}

/// Same collision avoidance as [`ensure_unique_name`], for constraint names
/// scoped to their owning table.
///
/// The base is shortened when needed so the suffixed name still fits in
/// [`MAX_IDENTIFIER_LEN`].
pub fn ensure_unique_constraint_name<I, S>(base: &str, existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let taken = collect_names(existing);
    let trimmed = base.trim();
    let base = if trimmed.is_empty() {
        FALLBACK_CONSTRAINT_NAME
    } else {
        trimmed
    };
    dedupe(base, &taken, Some(MAX_IDENTIFIER_LEN))
}

/// Normalize arbitrary text into lower_snake_case.
///
/// Idempotent. Non-empty for any input with at least one alphanumeric
/// character; callers need their own fallback for fully degenerate input.
///
/// # Examples
///
/// ```
/// use ddlforge_core::to_snake_case;
///
/// assert_eq!(to_snake_case("Order Items"), "order_items");
/// assert_eq!(to_snake_case("BlogPost"), "blog_post");
/// ```
pub fn to_snake_case(text: &str) -> String {
    let mut current = snake_pass(text);
    for _ in 0..MAX_SNAKE_PASSES {
        let next = snake_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// One heck pass, then every non-alphanumeric char (combining marks left by
/// lowercasing included) becomes a single `_`, trimmed at both ends.
fn snake_pass(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_underscore = true;
    for ch in text.to_snake_case().chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
            previous_underscore = false;
        } else if !previous_underscore {
            out.push('_');
            previous_underscore = true;
        }
    }
    if out.ends_with('_') {
        out.pop();
    }
    out
}

fn collect_names<I, S>(existing: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    existing
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect()
}

fn dedupe(base: &str, taken: &HashSet<String>, max_len: Option<usize>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }

    let mut n: usize = 2;
    loop {
        let suffix = format!("_{}", n);
        let stem = match max_len {
            Some(limit) if base.len() + suffix.len() > limit => {
                truncate_on_char_boundary(base, limit.saturating_sub(suffix.len()))
            }
            _ => base,
        };
        let candidate = format!("{}{}", stem, suffix);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn truncate_on_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn clean_identifier(raw: &str) -> String {
    let mut collapsed = String::with_capacity(raw.len());
    let mut previous_underscore = false;

    for ch in raw.trim().chars() {
        let mapped = if ch.is_ascii_alphanumeric() {
            Some(ch)
        } else if ch == '_' || ch == '-' || ch == '.' || ch.is_whitespace() {
            Some('_')
        } else {
            None
        };

        match mapped {
            Some('_') => {
                if !previous_underscore {
                    collapsed.push('_');
                }
                previous_underscore = true;
            }
            Some(c) => {
                collapsed.push(c);
                previous_underscore = false;
            }
            None => {}
        }
    }

    // ASCII only from here on, so byte slicing is safe.
    let trimmed = collapsed.trim_matches('_');
    let cut = if trimmed.len() > MAX_IDENTIFIER_LEN {
        &trimmed[..MAX_IDENTIFIER_LEN]
    } else {
        trimmed
    };
    cut.trim_end_matches('_').to_string()
}

fn is_usable_identifier(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|first| !first.is_ascii_digit())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_ensure_unique_name_free_base() {
        let existing: Vec<String> = vec!["orders".into()];
        assert_eq!(ensure_unique_name("users", &existing), "users");
    }

    #[test]
    fn test_ensure_unique_name_appends_suffix() {
        assert_eq!(ensure_unique_name("users", ["users"]), "users_2");
        assert_eq!(
            ensure_unique_name("users", ["users", "users_2", "users_3"]),
            "users_4"
        );
        // Gaps are filled from the lowest suffix.
        assert_eq!(ensure_unique_name("users", ["users", "users_3"]), "users_2");
    }

    #[test]
    fn test_ensure_unique_name_trims_and_uses_placeholder() {
        assert_eq!(ensure_unique_name("  users  ", ["orders"]), "users");
        assert_eq!(ensure_unique_name("   ", Vec::<String>::new()), PLACEHOLDER_NAME);
        assert_eq!(
            ensure_unique_name("", [PLACEHOLDER_NAME]),
            format!("{}_2", PLACEHOLDER_NAME)
        );
    }

    #[test]
    fn test_ensure_unique_name_is_case_sensitive() {
        assert_eq!(ensure_unique_name("Users", ["users"]), "Users");
    }

    #[test]
    fn test_sanitize_constraint_name_cleans_shape() {
        assert_eq!(
            sanitize_constraint_name("  fk orders-customer  ", "fk"),
            "fk_orders_customer"
        );
        assert_eq!(sanitize_constraint_name("fk__a@@__b__", "fk"), "fk_a_b");
        assert_eq!(sanitize_constraint_name("public.fk_x", "fk"), "public_fk_x");
    }

    #[test]
    fn test_sanitize_constraint_name_falls_back() {
        assert_eq!(sanitize_constraint_name("", "fk_orders"), "fk_orders");
        assert_eq!(sanitize_constraint_name("@@@", "fk orders"), "fk_orders");
        assert_eq!(sanitize_constraint_name("1st_key", "fk_orders"), "fk_orders");
        assert_eq!(sanitize_constraint_name("", "9"), FALLBACK_CONSTRAINT_NAME);
    }

    #[test]
    fn test_sanitize_constraint_name_truncates() {
        let long = "a".repeat(100);
        let cleaned = sanitize_constraint_name(&long, "fk");
        assert_eq!(cleaned.len(), MAX_IDENTIFIER_LEN);
    }

    #[test]
    fn test_sanitize_constraint_name_is_idempotent() {
        let repeated = "ab-".repeat(40);
        let inputs: [&str; 10] = [
            "",
            "   ",
            "fk_orders_customer",
            "  Fk Orders--Customer ",
            "1abc",
            "ÿëś",
            "a.b.c",
            "___",
            "x_________________________________________________________________y",
            repeated.as_str(),
        ];
        for fallback in ["fk_default", "", "7"] {
            for input in inputs {
                let once = sanitize_constraint_name(input, fallback);
                let twice = sanitize_constraint_name(&once, fallback);
                assert_eq!(once, twice, "input {:?} fallback {:?}", input, fallback);
            }
        }
    }

    #[test]
    fn test_ensure_unique_constraint_name() {
        assert_eq!(ensure_unique_constraint_name("fk_a", ["fk_b"]), "fk_a");
        assert_eq!(ensure_unique_constraint_name("fk_a", ["fk_a"]), "fk_a_2");
        assert_eq!(
            ensure_unique_constraint_name("", [FALLBACK_CONSTRAINT_NAME]),
            format!("{}_2", FALLBACK_CONSTRAINT_NAME)
        );
    }

    #[test]
    fn test_ensure_unique_constraint_name_stays_within_limit() {
        let base = "c".repeat(MAX_IDENTIFIER_LEN);
        let unique = ensure_unique_constraint_name(&base, [base.as_str()]);
        assert_eq!(unique.len(), MAX_IDENTIFIER_LEN);
        assert!(unique.ends_with("_2"));
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("customers orders"), "customers_orders");
        assert_eq!(to_snake_case("OrderItems"), "order_items");
        assert_eq!(to_snake_case("fk_Orders_id"), "fk_orders_id");
        assert_eq!(to_snake_case("  Order -- Items  "), "order_items");
        assert_eq!(to_snake_case("!!!"), "");
    }

    #[test]
    fn test_to_snake_case_is_idempotent() {
        for input in ["HTTPServer", "user2FA code", "a__b", "Ünïcode Name", "x1y2Z3"] {
            let once = to_snake_case(input);
            assert_eq!(to_snake_case(&once), once, "input {:?}", input);
            assert!(!once.is_empty());
        }
    }

    #[test]
    fn test_to_snake_case_is_idempotent_after_lowercase_expansion() {
        // Lowercasing İ yields i plus a combining dot
        for input in ["İstanbul", "İİ", "Straße İzmir", "ǅungla", "ΣΑΣ", "HTTP2Server"] {
            let once = to_snake_case(input);
            assert_eq!(to_snake_case(&once), once, "input {:?}", input);
            assert!(!once.is_empty());
            assert!(
                once.chars().all(|c| c.is_alphanumeric() || c == '_'),
                "input {:?} gave {:?}",
                input,
                once
            );
        }
        assert_eq!(to_snake_case("İstanbul"), "i_stanbul");
    }
}
