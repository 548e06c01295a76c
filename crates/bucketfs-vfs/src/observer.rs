//! Injected observation sink.
//!
//! Components report what they did through an [`Observer`] passed in at
//! construction. There is no process-wide logger: [`TracingObserver`]
//! forwards to `tracing`, [`LogBuffer`] keeps a bounded, timestamped history
//! that a UI can poll, and [`NoopObserver`] discards everything.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, info};

/// Something a virtual-filesystem component did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VfsEvent {
    /// One listing page came back from the store.
    PageListed {
        /// Listed prefix.
        prefix: String,
        /// Objects in the page.
        objects: usize,
        /// Delimited prefixes in the page.
        prefixes: usize,
        /// Whether more pages follow.
        truncated: bool,
    },
    /// A folder prefix was expanded to its keys.
    PrefixResolved {
        /// The expanded prefix.
        prefix: String,
        /// Keys found beneath it (before cross-prefix deduplication).
        keys: usize,
    },
    /// A delete chunk succeeded.
    ChunkDeleted {
        /// Zero-based chunk index.
        index: usize,
        /// Keys submitted in the chunk.
        size: usize,
        /// Keys the store reported removed.
        deleted: usize,
    },
    /// A delete chunk failed.
    ChunkFailed {
        /// Zero-based chunk index.
        index: usize,
        /// Keys submitted in the chunk.
        size: usize,
    },
    /// An object was written.
    ObjectWritten {
        /// Written key.
        key: String,
        /// Body size in bytes.
        size: usize,
    },
    /// A folder tree was rebuilt.
    TreeBuilt {
        /// Total node count.
        nodes: usize,
    },
}

impl VfsEvent {
    /// Severity used when the event is logged.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        match self {
            Self::PageListed { .. } | Self::ChunkDeleted { .. } => LogLevel::Network,
            Self::PrefixResolved { .. } | Self::TreeBuilt { .. } => LogLevel::Debug,
            Self::ObjectWritten { .. } => LogLevel::Info,
            Self::ChunkFailed { .. } => LogLevel::Error,
        }
    }
}

impl fmt::Display for VfsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageListed {
                prefix,
                objects,
                prefixes,
                truncated,
            } => write!(
                f,
                "listed {objects} object(s) and {prefixes} folder(s) under {prefix:?} (truncated: {truncated})"
            ),
            Self::PrefixResolved { prefix, keys } => {
                write!(f, "resolved {keys} key(s) under {prefix:?}")
            }
            Self::ChunkDeleted {
                index,
                size,
                deleted,
            } => write!(f, "delete chunk {index}: {deleted} of {size} key(s) removed"),
            Self::ChunkFailed { index, size } => {
                write!(f, "delete chunk {index} of {size} key(s) failed")
            }
            Self::ObjectWritten { key, size } => write!(f, "wrote {key:?} ({size} bytes)"),
            Self::TreeBuilt { nodes } => write!(f, "built folder tree with {nodes} node(s)"),
        }
    }
}

/// Log severity, mirroring the categories a log viewer filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Normal progress.
    Info,
    /// A failure.
    Error,
    /// Internal detail.
    Debug,
    /// A store round trip.
    Network,
}

/// Receiver of [`VfsEvent`]s.
pub trait Observer: Send + Sync + fmt::Debug {
    /// Record one event.
    fn record(&self, event: &VfsEvent);
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn record(&self, _event: &VfsEvent) {}
}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn record(&self, event: &VfsEvent) {
        match event.level() {
            LogLevel::Error => error!(event = %event, "vfs event"),
            LogLevel::Info => info!(event = %event, "vfs event"),
            LogLevel::Debug | LogLevel::Network => debug!(event = %event, "vfs event"),
        }
    }
}

/// One timestamped line held by a [`LogBuffer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
    /// Severity.
    pub level: LogLevel,
    /// Rendered event.
    pub message: String,
}

/// Bounded in-memory event history. The oldest entries are evicted first.
///
/// # Examples
///
/// ```
/// use bucketfs_vfs::observer::{LogBuffer, Observer, VfsEvent};
///
/// let log = LogBuffer::new(2);
/// log.record(&VfsEvent::TreeBuilt { nodes: 1 });
/// log.record(&VfsEvent::TreeBuilt { nodes: 2 });
/// log.record(&VfsEvent::TreeBuilt { nodes: 3 });
/// let entries = log.entries();
/// assert_eq!(entries.len(), 2);
/// assert!(entries[0].message.contains("2 node"));
/// ```
#[derive(Debug)]
pub struct LogBuffer {
    capacity: usize,
    entries: Mutex<VecDeque<LogEntry>>,
}

impl LogBuffer {
    /// Create a buffer holding at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Snapshot of the buffered entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Number of buffered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every buffered entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Observer for LogBuffer {
    fn record(&self, event: &VfsEvent) {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: event.level(),
            message: event.to_string(),
        };
        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_evict_oldest_entries() {
        let log = LogBuffer::new(3);
        for nodes in 0..5 {
            log.record(&VfsEvent::TreeBuilt { nodes });
        }
        let messages: Vec<String> = log.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("2 node"));
        assert!(messages[2].contains("4 node"));
    }

    #[test]
    fn test_should_tag_entries_with_event_level() {
        let log = LogBuffer::new(10);
        log.record(&VfsEvent::ChunkFailed { index: 1, size: 1000 });
        log.record(&VfsEvent::ObjectWritten {
            key: "a.txt".to_owned(),
            size: 3,
        });
        let levels: Vec<LogLevel> = log.entries().iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![LogLevel::Error, LogLevel::Info]);
    }

    #[test]
    fn test_should_clear_buffer() {
        let log = LogBuffer::new(0);
        log.record(&VfsEvent::TreeBuilt { nodes: 1 });
        assert_eq!(log.len(), 1);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_should_serialize_level_uppercase() {
        let json = serde_json::to_string(&LogLevel::Network).unwrap();
        assert_eq!(json, "\"NETWORK\"");
    }
}
