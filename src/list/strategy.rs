//! Traversal strategy selection
//!
//! Three traversal algorithms produce the same listing; which one runs is a
//! performance decision driven by what the filesystem backend can do.
//!
//! | Strategy          | Requires                          | I/O per tree               |
//! |-------------------|-----------------------------------|----------------------------|
//! | `RecursiveNative` | a whole-subtree listing primitive | one walk                   |
//! | `TypedTraversal`  | listings that report entry types  | one listing per directory  |
//! | `StatTraversal`   | plain name listings               | listing + probe per entry  |

use async_trait::async_trait;
use std::fmt;
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use super::recursive::RecursiveTraversal;
use super::stat::StatTraversal;
use super::typed::TypedTraversal;
use super::Paths;
use crate::fs::FileSystem;

/// Listing primitives offered by a filesystem backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// A single call can list an entire subtree
    pub recursive_listing: bool,
    /// Directory listings report each entry's type without a separate probe
    pub typed_entries: bool,
}

impl Capabilities {
    /// Every primitive available
    pub const fn full() -> Self {
        Self {
            recursive_listing: true,
            typed_entries: true,
        }
    }

    /// Only plain name listings and metadata probes
    pub const fn minimal() -> Self {
        Self {
            recursive_listing: false,
            typed_entries: false,
        }
    }

    /// Capabilities of the host filesystem, probed once per process
    pub fn detect() -> Self {
        static DETECTED: OnceLock<Capabilities> = OnceLock::new();

        *DETECTED.get_or_init(|| {
            let detected = Self {
                recursive_listing: true,
                typed_entries: cfg!(any(unix, windows)),
            };
            debug!(?detected, "Detected traversal capabilities");
            detected
        })
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// One of the interchangeable traversal algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    RecursiveNative,
    TypedTraversal,
    StatTraversal,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::RecursiveNative,
        Strategy::TypedTraversal,
        Strategy::StatTraversal,
    ];

    /// The traversal implementing this strategy
    pub fn traversal(self) -> Box<dyn Traversal> {
        match self {
            Strategy::RecursiveNative => Box::new(RecursiveTraversal),
            Strategy::TypedTraversal => Box::new(TypedTraversal),
            Strategy::StatTraversal => Box::new(StatTraversal),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::RecursiveNative => "recursive",
            Strategy::TypedTraversal => "typed",
            Strategy::StatTraversal => "stat",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Picks the cheapest strategy the capabilities allow
pub fn select_strategy(capabilities: &Capabilities) -> Strategy {
    if capabilities.recursive_listing {
        Strategy::RecursiveNative
    } else if capabilities.typed_entries {
        Strategy::TypedTraversal
    } else {
        Strategy::StatTraversal
    }
}

/// Walks a directory tree and returns every entry beneath the root
///
/// Implementations return paths relative to `root`, `/`-separated, sorted
/// byte-wise ascending, without the root itself. The first I/O failure
/// aborts the walk.
#[async_trait]
pub trait Traversal: Send + Sync {
    fn strategy(&self) -> Strategy;

    async fn traverse(&self, fs: &dyn FileSystem, root: &Path) -> io::Result<Paths>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_prefers_recursive() {
        assert_eq!(
            select_strategy(&Capabilities::full()),
            Strategy::RecursiveNative
        );
    }

    #[test]
    fn test_select_typed_without_recursive() {
        let capabilities = Capabilities {
            recursive_listing: false,
            typed_entries: true,
        };
        assert_eq!(select_strategy(&capabilities), Strategy::TypedTraversal);
    }

    #[test]
    fn test_select_stat_fallback() {
        assert_eq!(
            select_strategy(&Capabilities::minimal()),
            Strategy::StatTraversal
        );
    }

    #[test]
    fn test_detect_is_stable() {
        assert_eq!(Capabilities::detect(), Capabilities::detect());
        assert!(Capabilities::detect().recursive_listing);
    }

    #[test]
    fn test_traversal_matches_strategy() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.traversal().strategy(), strategy);
        }
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::RecursiveNative.to_string(), "recursive");
        assert_eq!(Strategy::TypedTraversal.to_string(), "typed");
        assert_eq!(Strategy::StatTraversal.to_string(), "stat");
    }
}
