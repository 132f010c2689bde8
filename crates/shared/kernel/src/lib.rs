//! Kernel shared by the Lyceum feature crates.
//!
//! It defines the persistence contracts ([`store`]), the unit of work handed
//! to lifecycle hooks ([`Changeset`]), an in-memory store, and small helpers
//! for IDs and config loading.
//!
//! ## ID generation
//! Use `safe_nanoid!` for URL-safe, unambiguous IDs:
//! ```rust
//! # use lyceum_kernel::safe_nanoid;
//! let id = safe_nanoid!();
//! assert_eq!(id.len(), 12);
//! ```
//!
//! ## Config loading
//! ```rust,no_run
//! use lyceum_kernel::config::load_config;
//! use lyceum_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("lyceum.toml")).unwrap();
//! ```
pub mod changeset;
pub mod config;
mod error;
pub mod memory;
pub mod store;

// Alphabet excludes visually ambiguous characters (I, O, l, 0, 1).
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub use changeset::Changeset;
pub use error::{PersistenceError, PersistenceErrorExt};
pub use lyceum_domain as domain;
pub use memory::MemoryStore;
pub use nanoid::nanoid;
pub use store::{Catalog, EnrollmentReader, SchoolReader, Store, UserReader};

/// Generates an unambiguous `NanoID` (no visually confusing characters).
#[macro_export]
macro_rules! safe_nanoid {
    () => {{
        // `nanoid!` takes its size as a single token tree.
        const LEN: usize = $crate::domain::constants::USER_ID_LENGTH;
        $crate::nanoid!(LEN, $crate::SAFE_ALPHABET)
    }};
    ($size:expr) => {
        $crate::nanoid!($size, $crate::SAFE_ALPHABET)
    };
}
