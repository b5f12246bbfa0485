//! Typed domain separators for canonical hashing.
//!
//! Every hash computed by the workspace selects a domain via [`HashDomain`].
//! The enum, `as_bytes()`, `ALL`, and `Display` are generated from one macro
//! invocation so they cannot drift apart.

macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used
        /// as a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    // Search

    /// Search graph (expansion audit log) hashing.
    SearchGraph => b"LODESTAR::SEARCH_GRAPH::V1\0",

    /// Search report hashing.
    SearchReport => b"LODESTAR::SEARCH_REPORT::V1\0",

    // Harness

    /// Bundle artifact content hashing.
    BundleArtifact => b"LODESTAR::BUNDLE_ARTIFACT::V1\0",

    /// Bundle digest (normative projection).
    BundleDigest => b"LODESTAR::BUNDLE_DIGEST::V1\0",

    // Benchmarks

    /// Benchmark input hashing.
    BenchInput => b"LODESTAR::BENCH_INPUT::V1\0",
}
