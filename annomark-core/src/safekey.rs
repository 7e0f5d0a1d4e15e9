//! Reversible encoding of cluster labels into storage-safe keys.
//!
//! Hierarchical stores (HDF5 groups, file paths) reserve characters like `/`
//! that show up freely in cluster labels ("L2/3 IT"). The codec here swaps
//! each reserved character for a literal token so the label can be used as a
//! key, and swaps them back on the way out.
//!
//! Labels that already contain one of the reserved tokens (a literal
//! `_SLASH_`, say) are unsupported: encoding is not guarded against them and
//! the round trip is not guaranteed for such inputs.

/// Ordered substitution table used by [`make_safe_key`] and
/// [`recover_original_key`]. Encoding applies the pairs in table order,
/// decoding inverts them in the same order.
pub const ESCAPES: [(&str, &str); 5] = [
    ("/", "_SLASH_"),
    ("\\", "_BSLASH_"),
    (" ", "_SPACE_"),
    (":", "_COLON_"),
    (".", "_DOT_"),
];

/// Encodes a cluster label so it is safe to use as a hierarchical storage
/// key. Reversible with [`recover_original_key`].
pub fn make_safe_key(label: &str) -> String {
    let mut out = label.to_string();
    for (literal, token) in ESCAPES {
        out = out.replace(literal, token);
    }
    out
}

/// Reverses the transformation applied by [`make_safe_key`].
pub fn recover_original_key(safe_key: &str) -> String {
    let mut out = safe_key.to_string();
    for (literal, token) in ESCAPES {
        out = out.replace(token, literal);
    }
    out
}

/// Builds a per-cluster key for an array-backed annotation slot, e.g.
/// `markers_Cluster_SPACE_A` for prefix `markers` and label `Cluster A`.
pub fn build_safe_varm_key(prefix: &str, label: &str) -> String {
    format!("{}_{}", prefix, make_safe_key(label))
}
