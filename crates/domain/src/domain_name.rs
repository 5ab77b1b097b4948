use std::fmt;
use std::sync::Arc;

/// An owned domain name produced by a defensive bounded copy.
///
/// Callers hand the routing table name buffers of unknown provenance;
/// `clamp` keeps at most `max_len` bytes of them so an unterminated or
/// adversarially long input can never inflate the stored name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainName(Arc<str>);

impl DomainName {
    /// Copy `name`, keeping at most `max_len` bytes.
    ///
    /// The cut is moved back to the nearest character boundary so the
    /// stored name stays valid UTF-8 even for non-ASCII input.
    pub fn clamp(name: &str, max_len: usize) -> Self {
        let mut end = name.len().min(max_len);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        Self(Arc::from(&name[..end]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for DomainName {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for DomainName {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}
