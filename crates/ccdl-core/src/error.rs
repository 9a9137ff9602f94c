//! Error type shared by the catalog engine and its HTTP collaborator.

use thiserror::Error;

/// Every failure the catalog engine can report.
///
/// The engine never retries; transport failures arrive here after the
/// collaborator's own retry policy has given up.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("api: slug is not valid")]
    InvalidSlug,
    #[error("api: category is not valid")]
    InvalidCategory,
    #[error("api: version is not valid")]
    InvalidVersion,
    #[error("api: download type is not valid: {0}")]
    InvalidDlgType(String),

    #[error("subproduct: invalid subproduct requested")]
    InvalidSubProduct,
    #[error("subproduct: invalid major version requested")]
    InvalidSubProductMajorVersion,

    #[error("versions: invalid glob. a glob must be provided")]
    NoVersionGlob,
    #[error("versions: invalid glob. a single version glob must be used")]
    MultipleVersionGlob,
    #[error("versions: invalid glob. no versions found")]
    NoMatchingVersions,

    #[error("dlgHeader: downloadGroup or productId invalid")]
    DlgHeader,
    #[error("dlgDetails: downloadGroup or productId invalid")]
    DlgDetailsInputs,
    #[error("dlgDetails: no files match provided glob")]
    NoMatchingFiles,
    #[error("dlgDetails: user is not entitled to download this file")]
    NotEntitled,
    #[error("dlgDetails: EULA needs to be accepted for this version")]
    EulaUnaccepted,
    #[error("eula: downloadGroup or productId invalid")]
    EulaInputs,
    #[error("download: invalid download payload")]
    InvalidDownloadPayload,
    #[error("download: refusing file name {0:?}")]
    UnsafeFileName(String),

    #[error("account: you are not authenticated")]
    NotAuthenticated,
    #[error("api: server down. 500 error received")]
    ServerError,
    #[error("api: server responded with HTTP {0}")]
    UnexpectedStatus(u32),

    #[error("checksum mismatch for {file}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("url: {0}")]
    Url(#[from] url::ParseError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// True for the bucket-level error the sub-product index builder skips.
    pub fn is_invalid_version(&self) -> bool {
        matches!(self, CatalogError::InvalidVersion)
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
