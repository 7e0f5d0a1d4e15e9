//! # annomark-core
//!
//! Support utilities for marker-gene annotation pipelines.
//!
//! ## Purpose
//!
//! Annotation pipelines hand around two awkward kinds of strings: marker
//! tables whose marker column encodes lists in more than one way, and
//! cluster labels that are illegal as hierarchical storage keys. This crate
//! covers both:
//!
//! - **`markers`**: parse a cluster/marker table into an ordered,
//!   deduplicated cluster → markers map, whichever of the two row encodings
//!   the table uses.
//! - **`safekey`**: a reversible escaping scheme turning arbitrary cluster
//!   labels into storage-safe keys.
//! - **`mapping`**: the original ↔ safe key registry kept on the dataset
//!   container, so safe keys can be mapped back to their labels later.
//!
//! ## Example
//!
//! ```rust
//! use annomark_core::safekey::{build_safe_varm_key, make_safe_key};
//! use annomark_core::mapping::{Annotations, lookup_original, record};
//!
//! let label = "L2/3 IT";
//! let safe = make_safe_key(label);
//! assert_eq!(safe, "L2_SLASH_3_SPACE_IT");
//!
//! let mut annotations = Annotations::default();
//! record(&mut annotations, label, &safe);
//! assert_eq!(lookup_original(&annotations, &safe), label);
//!
//! assert_eq!(build_safe_varm_key("markers", label), "markers_L2_SLASH_3_SPACE_IT");
//! ```

pub mod errors;
pub mod mapping;
pub mod markers;
pub mod safekey;

// re-export things
pub use errors::*;
pub use mapping::*;
pub use markers::*;
pub use safekey::*;

// constants
pub mod consts {
    pub const MARKERS_CMD: &str = "markers";
    pub const KEY_CMD: &str = "key";
    pub const KEY_ENCODE_CMD: &str = "encode";
    pub const KEY_DECODE_CMD: &str = "decode";
}
