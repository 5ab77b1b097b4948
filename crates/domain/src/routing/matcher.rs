//! Bounded byte comparison used by the domain lookups.
//!
//! Query names arrive from the wire and stored names from configuration;
//! every length computation is capped by a caller-supplied `max_len` so an
//! unterminated or oversized input can never widen a comparison.

/// Length of `s` capped at `max_len`.
pub(crate) fn bounded_len(s: &[u8], max_len: usize) -> usize {
    s.len().min(max_len)
}

/// Equality of `a` and `b` over at most `limit` bytes.
///
/// Matches C `strncmp(a, b, limit) == 0`: the strings are equal when they
/// agree byte-for-byte up to a common end before `limit`, or on the first
/// `limit` bytes. One string ending before the other is a mismatch.
pub(crate) fn bounded_eq(a: &[u8], b: &[u8], limit: usize) -> bool {
    for i in 0..limit {
        match (a.get(i), b.get(i)) {
            (None, None) => return true,
            (Some(x), Some(y)) if x == y => {}
            _ => return false,
        }
    }
    true
}

/// Does `query` fall under the domain `stored`?
///
/// For a query longer than the stored name, the stored name is compared
/// against the query's trailing bytes (`mail.example.com` falls under
/// `example.com`). For a query no longer than the stored name, the stored
/// name is compared against the query from its first byte, which only
/// succeeds when the two end together, i.e. the equal-length exact match,
/// or when the comparison limit is exhausted first.
pub(crate) fn suffix_matches(stored: &[u8], query: &[u8], max_len: usize) -> bool {
    let n = bounded_len(query, max_len);
    let h = bounded_len(stored, max_len);
    if n > h {
        bounded_eq(stored, &query[n - h..], max_len - (n - h))
    } else {
        bounded_eq(stored, query, max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_len_caps_at_max() {
        assert_eq!(bounded_len(b"example.com", 255), 11);
        assert_eq!(bounded_len(b"example.com", 4), 4);
        assert_eq!(bounded_len(b"", 255), 0);
    }

    #[test]
    fn bounded_eq_stops_at_common_end() {
        assert!(bounded_eq(b"abc", b"abc", 255));
        assert!(bounded_eq(b"", b"", 255));
    }

    #[test]
    fn bounded_eq_stops_at_limit() {
        assert!(bounded_eq(b"abcX", b"abcY", 3));
        assert!(!bounded_eq(b"abcX", b"abcY", 4));
    }

    #[test]
    fn bounded_eq_rejects_uneven_end() {
        assert!(!bounded_eq(b"abc", b"ab", 255));
        assert!(!bounded_eq(b"ab", b"abc", 255));
    }

    #[test]
    fn suffix_matches_trailing_bytes() {
        assert!(suffix_matches(b"example.com", b"mail.example.com", 255));
        assert!(suffix_matches(b"example.com", b"example.com", 255));
        assert!(!suffix_matches(b"example.com", b"example.org", 255));
    }

    #[test]
    fn shorter_query_only_matches_equal_length() {
        assert!(!suffix_matches(b"example.com", b"example", 255));
        assert!(!suffix_matches(b"example.com", b"com", 255));
    }
}
