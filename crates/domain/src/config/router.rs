use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterConfig {
    /// Upper bound on query and domain name lengths; every stored name is
    /// clamped to this many bytes and every lookup comparison is capped
    /// by it. 255 is the DNS name length limit.
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    /// Seconds the dispatch layer waits on an upstream before reporting
    /// the query as failed.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_name_length: default_max_name_length(),
            query_timeout: default_query_timeout(),
        }
    }
}

fn default_max_name_length() -> usize {
    255
}

fn default_query_timeout() -> u64 {
    5
}
