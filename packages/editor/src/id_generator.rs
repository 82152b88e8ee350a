use crc32fast::Hasher;
use std::fmt::Debug;

/// Source of node and column ids
pub trait IdSource: Debug + Send {
    /// Produce the next id. `prefix` is a readable hint (e.g. "heading").
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Short stable seed for a page id (CRC32, hex)
pub fn page_seed(page_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(page_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Default id source for an editing session.
///
/// Ids combine the page seed, the session start time and a monotonic
/// counter, so two sessions on the same page never hand out the same id
/// unless they start within the same millisecond.
#[derive(Debug, Clone)]
pub struct SessionIds {
    seed: String,
    started_ms: i64,
    count: u64,
}

impl SessionIds {
    pub fn new(page_id: &str) -> Self {
        Self {
            seed: page_seed(page_id),
            started_ms: chrono::Utc::now().timestamp_millis(),
            count: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdSource for SessionIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!(
            "{}-{}-{:x}-{}",
            prefix, self.seed, self.started_ms, self.count
        )
    }
}

/// Deterministic ids (`<seed>-<n>`), for tests and fixtures
#[derive(Debug, Clone)]
pub struct SequentialIds {
    seed: String,
    count: u64,
}

impl SequentialIds {
    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, _prefix: &str) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }
}
