//! In-memory artifact bundle: the output of a harness run.
//!
//! No file I/O in this module. The bundle is a deterministic in-memory
//! representation that can be inspected programmatically.
//!
//! # Normative vs observational artifacts
//!
//! Each artifact is tagged `normative` (participates in the bundle digest)
//! or observational (listed in the manifest but excluded from the digest).
//!
//! The bundle digest is computed over the **digest basis**: a canonical JSON
//! projection of normative artifact hashes only.

use std::collections::BTreeMap;

use lodestar_kernel::proof::canon::canonical_json_bytes;
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Logical name of the canonical search graph artifact.
pub const SEARCH_GRAPH_ARTIFACT: &str = "search_graph.json";

/// Logical name of the search report artifact.
pub const SEARCH_REPORT_ARTIFACT: &str = "search_report.json";

/// A single artifact in the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleArtifact {
    pub name: String,
    pub content: Vec<u8>,
    /// `canonical_hash(HashDomain::BundleArtifact, content)`.
    pub content_hash: ContentHash,
    /// Whether this artifact participates in the bundle digest.
    pub normative: bool,
}

/// The complete artifact bundle from a harness run.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    /// Artifacts indexed by logical name, in sorted order.
    pub artifacts: BTreeMap<String, BundleArtifact>,
    /// Canonical JSON listing all artifacts with normative flags.
    pub manifest: Vec<u8>,
    /// Canonical JSON listing normative artifact hashes only.
    pub digest_basis: Vec<u8>,
    /// `canonical_hash(HashDomain::BundleDigest, digest_basis)`.
    pub digest: ContentHash,
}

impl ArtifactBundle {
    /// Raw bytes of the named artifact.
    #[must_use]
    pub fn content(&self, name: &str) -> Option<&[u8]> {
        self.artifacts.get(name).map(|a| a.content.as_slice())
    }
}

/// Error building a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleBuildError {
    /// Canonical JSON serialization failed.
    CanonError { detail: String },
    /// Caller-provided `precomputed_hash` does not match the recomputed hash.
    PrecomputedHashMismatch {
        name: String,
        expected: String,
        computed: String,
    },
    /// Two inputs share a logical name.
    DuplicateArtifact { name: String },
}

impl std::fmt::Display for BundleBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CanonError { detail } => write!(f, "bundle canonicalization failed: {detail}"),
            Self::PrecomputedHashMismatch {
                name,
                expected,
                computed,
            } => write!(
                f,
                "precomputed hash for {name:?} is {expected}, recomputed {computed}"
            ),
            Self::DuplicateArtifact { name } => write!(f, "duplicate artifact name {name:?}"),
        }
    }
}

impl std::error::Error for BundleBuildError {}

/// Input for bundle assembly.
///
/// If `precomputed_hash` is provided, it must equal
/// `canonical_hash(HashDomain::BundleArtifact, &content)`.
pub struct ArtifactInput {
    pub name: String,
    pub content: Vec<u8>,
    pub normative: bool,
    pub precomputed_hash: Option<ContentHash>,
}

impl From<(String, Vec<u8>, bool)> for ArtifactInput {
    fn from((name, content, normative): (String, Vec<u8>, bool)) -> Self {
        Self {
            name,
            content,
            normative,
            precomputed_hash: None,
        }
    }
}

/// Build an [`ArtifactBundle`] from artifact inputs.
///
/// Accepts `Vec<ArtifactInput>` or `Vec<(String, Vec<u8>, bool)>`.
///
/// # Errors
///
/// Returns [`BundleBuildError`] if canonical JSON serialization fails, a
/// precomputed hash is wrong, or two inputs share a name.
pub fn build_bundle(
    artifacts: Vec<impl Into<ArtifactInput>>,
) -> Result<ArtifactBundle, BundleBuildError> {
    let mut artifact_map = BTreeMap::new();

    for input in artifacts {
        let input = input.into();
        let recomputed = canonical_hash(HashDomain::BundleArtifact, &input.content);
        if let Some(declared) = input.precomputed_hash {
            if declared != recomputed {
                return Err(BundleBuildError::PrecomputedHashMismatch {
                    name: input.name,
                    expected: declared.as_str().to_string(),
                    computed: recomputed.as_str().to_string(),
                });
            }
        }
        if artifact_map.contains_key(&input.name) {
            return Err(BundleBuildError::DuplicateArtifact { name: input.name });
        }
        artifact_map.insert(
            input.name.clone(),
            BundleArtifact {
                name: input.name,
                content: input.content,
                content_hash: recomputed,
                normative: input.normative,
            },
        );
    }

    let manifest = compute_manifest_bytes(&artifact_map)
        .map_err(|detail| BundleBuildError::CanonError { detail })?;
    let digest_basis = compute_digest_basis_bytes(&artifact_map)
        .map_err(|detail| BundleBuildError::CanonError { detail })?;
    let digest = canonical_hash(HashDomain::BundleDigest, &digest_basis);

    Ok(ArtifactBundle {
        artifacts: artifact_map,
        manifest,
        digest_basis,
        digest,
    })
}

/// Error from bundle integrity verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleVerifyError {
    /// An artifact's stored `content_hash` does not match the recomputed hash.
    ContentHashMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },
    /// Stored manifest differs from the one recomputed from artifacts.
    ManifestMismatch,
    ManifestNotCanonical,
    /// Stored digest basis differs from the normative projection.
    DigestBasisMismatch,
    DigestBasisNotCanonical,
    DigestMismatch { expected: String, actual: String },
    /// A normative JSON artifact is not in canonical form.
    ArtifactNotCanonical { artifact: String },
    /// `search_report.json` is not valid JSON.
    ReportParseError { detail: String },
    /// Both graph and report are present but the report has no
    /// `search_graph_digest`.
    SearchGraphDigestMissing,
    /// Report's `search_graph_digest` differs from the graph's recomputed digest.
    SearchGraphDigestMismatch {
        declared: String,
        recomputed: String,
    },
    /// Report declares a graph digest but `search_graph.json` is absent.
    SearchGraphArtifactMissing,
    /// Canonical JSON error during verification.
    CanonError { detail: String },
}

impl std::fmt::Display for BundleVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentHashMismatch {
                artifact,
                expected,
                actual,
            } => write!(f, "{artifact}: content hash {expected} != recomputed {actual}"),
            Self::ManifestMismatch => f.write_str("manifest does not match artifacts"),
            Self::ManifestNotCanonical => f.write_str("manifest is not canonical JSON"),
            Self::DigestBasisMismatch => {
                f.write_str("digest basis does not match normative artifacts")
            }
            Self::DigestBasisNotCanonical => f.write_str("digest basis is not canonical JSON"),
            Self::DigestMismatch { expected, actual } => {
                write!(f, "bundle digest {expected} != recomputed {actual}")
            }
            Self::ArtifactNotCanonical { artifact } => {
                write!(f, "normative artifact {artifact} is not canonical JSON")
            }
            Self::ReportParseError { detail } => write!(f, "search report unreadable: {detail}"),
            Self::SearchGraphDigestMissing => {
                f.write_str("search report does not declare search_graph_digest")
            }
            Self::SearchGraphDigestMismatch {
                declared,
                recomputed,
            } => write!(
                f,
                "search report declares graph digest {declared}, recomputed {recomputed}"
            ),
            Self::SearchGraphArtifactMissing => {
                f.write_str("search report declares a graph digest but search_graph.json is absent")
            }
            Self::CanonError { detail } => write!(f, "canonicalization failed: {detail}"),
        }
    }
}

impl std::error::Error for BundleVerifyError {}

/// Verify the internal consistency of a bundle.
///
/// Checks, in order:
///
/// 1. Each artifact's `content_hash` matches its content.
/// 2. `manifest` matches the projection recomputed from all artifacts and is
///    canonical.
/// 3. `digest_basis` matches the normative projection and is canonical.
/// 4. `digest` matches the hash of `digest_basis`.
/// 5. Normative `.json` artifacts are canonical.
/// 6. If `search_report.json` is present, its `search_graph_digest` is bound
///    to the recomputed digest of `search_graph.json`.
///
/// # Errors
///
/// Returns the first [`BundleVerifyError`] encountered.
pub fn verify_bundle(bundle: &ArtifactBundle) -> Result<(), BundleVerifyError> {
    for artifact in bundle.artifacts.values() {
        let recomputed = canonical_hash(HashDomain::BundleArtifact, &artifact.content);
        if recomputed != artifact.content_hash {
            return Err(BundleVerifyError::ContentHashMismatch {
                artifact: artifact.name.clone(),
                expected: artifact.content_hash.as_str().to_string(),
                actual: recomputed.as_str().to_string(),
            });
        }
    }

    let expected_manifest = compute_manifest_bytes(&bundle.artifacts)
        .map_err(|detail| BundleVerifyError::CanonError { detail })?;
    if expected_manifest != bundle.manifest {
        return Err(BundleVerifyError::ManifestMismatch);
    }
    if !is_canonical(&bundle.manifest) {
        return Err(BundleVerifyError::ManifestNotCanonical);
    }

    let expected_basis = compute_digest_basis_bytes(&bundle.artifacts)
        .map_err(|detail| BundleVerifyError::CanonError { detail })?;
    if expected_basis != bundle.digest_basis {
        return Err(BundleVerifyError::DigestBasisMismatch);
    }
    if !is_canonical(&bundle.digest_basis) {
        return Err(BundleVerifyError::DigestBasisNotCanonical);
    }

    let recomputed_digest = canonical_hash(HashDomain::BundleDigest, &bundle.digest_basis);
    if recomputed_digest != bundle.digest {
        return Err(BundleVerifyError::DigestMismatch {
            expected: bundle.digest.as_str().to_string(),
            actual: recomputed_digest.as_str().to_string(),
        });
    }

    for artifact in bundle.artifacts.values() {
        let is_json = std::path::Path::new(&artifact.name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if artifact.normative && is_json && !is_canonical(&artifact.content) {
            return Err(BundleVerifyError::ArtifactNotCanonical {
                artifact: artifact.name.clone(),
            });
        }
    }

    verify_search_graph_binding(bundle)
}

fn compute_manifest_bytes(artifacts: &BTreeMap<String, BundleArtifact>) -> Result<Vec<u8>, String> {
    let manifest_artifacts: Vec<serde_json::Value> = artifacts
        .values()
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
                "normative": a.normative,
            })
        })
        .collect();

    let manifest_value = serde_json::json!({
        "artifacts": manifest_artifacts,
        "schema_version": "lodestar.bundle.v1",
    });

    canonical_json_bytes(&manifest_value).map_err(|e| e.to_string())
}

fn compute_digest_basis_bytes(
    artifacts: &BTreeMap<String, BundleArtifact>,
) -> Result<Vec<u8>, String> {
    let normative_artifacts: Vec<serde_json::Value> = artifacts
        .values()
        .filter(|a| a.normative)
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
            })
        })
        .collect();

    let digest_basis_value = serde_json::json!({
        "artifacts": normative_artifacts,
        "schema_version": "lodestar.bundle_digest_basis.v1",
    });

    canonical_json_bytes(&digest_basis_value).map_err(|e| e.to_string())
}

/// Parse, re-canonicalize, compare.
fn is_canonical(bytes: &[u8]) -> bool {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(bytes) else {
        return false;
    };
    canonical_json_bytes(&value).is_ok_and(|recanonized| recanonized == bytes)
}

fn verify_search_graph_binding(bundle: &ArtifactBundle) -> Result<(), BundleVerifyError> {
    let Some(report_artifact) = bundle.artifacts.get(SEARCH_REPORT_ARTIFACT) else {
        return Ok(());
    };

    let report: serde_json::Value =
        serde_json::from_slice(&report_artifact.content).map_err(|e| {
            BundleVerifyError::ReportParseError {
                detail: e.to_string(),
            }
        })?;
    let declared = report.get("search_graph_digest").and_then(|v| v.as_str());

    match (bundle.artifacts.get(SEARCH_GRAPH_ARTIFACT), declared) {
        (None, None) => Ok(()),
        (None, Some(_)) => Err(BundleVerifyError::SearchGraphArtifactMissing),
        (Some(_), None) => Err(BundleVerifyError::SearchGraphDigestMissing),
        (Some(graph), Some(declared)) => {
            let recomputed = canonical_hash(HashDomain::SearchGraph, &graph.content);
            if recomputed.as_str() == declared {
                Ok(())
            } else {
                Err(BundleVerifyError::SearchGraphDigestMismatch {
                    declared: declared.to_string(),
                    recomputed: recomputed.as_str().to_string(),
                })
            }
        }
    }
}
