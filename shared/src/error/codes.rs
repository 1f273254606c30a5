//! Unified error codes for the bakery platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Tenant errors
//! - 4xxx: Lead / submission errors
//! - 6xxx: Catalog errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 3xxx: Tenant ====================
    /// Tenant not found
    TenantNotFound = 3002,
    /// Lead quota for the tenant is exhausted
    LeadLimitReached = 3008,

    // ==================== 4xxx: Lead ====================
    /// Lead not found
    LeadNotFound = 4001,
    /// Featured item not found
    FeaturedItemNotFound = 4003,
    /// Featured item is disabled
    FeaturedItemDisabled = 4004,
    /// Order has no tiers or treats
    OrderEmpty = 4007,

    // ==================== 6xxx: Catalog ====================
    /// Unknown catalog category
    CatalogCategoryInvalid = 6001,
    /// Catalog entry not found
    CatalogEntryNotFound = 6002,
    /// Catalog entry has invalid fields
    CatalogEntryInvalid = 6003,
    /// Default catalog entries can only be disabled, not removed
    DefaultEntryNotRemovable = 6004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,

    // ==================== 94xx: Storage ====================
    /// Storage full (disk space insufficient)
    StorageFull = 9401,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
    /// System busy (IO error, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Tenant
            ErrorCode::TenantNotFound => "Tenant not found",
            ErrorCode::LeadLimitReached => "Lead limit reached for this bakery",

            // Lead
            ErrorCode::LeadNotFound => "Lead not found",
            ErrorCode::FeaturedItemNotFound => "Featured item not found",
            ErrorCode::FeaturedItemDisabled => "Featured item is not available",
            ErrorCode::OrderEmpty => "Order has nothing selected",

            // Catalog
            ErrorCode::CatalogCategoryInvalid => "Unknown catalog category",
            ErrorCode::CatalogEntryNotFound => "Catalog entry not found",
            ErrorCode::CatalogEntryInvalid => "Catalog entry is invalid",
            ErrorCode::DefaultEntryNotRemovable => {
                "Default catalog entries can be disabled but not removed"
            }

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",

            // Storage
            ErrorCode::StorageFull => "Storage full (disk space insufficient)",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Tenant
            3002 => Ok(ErrorCode::TenantNotFound),
            3008 => Ok(ErrorCode::LeadLimitReached),

            // Lead
            4001 => Ok(ErrorCode::LeadNotFound),
            4003 => Ok(ErrorCode::FeaturedItemNotFound),
            4004 => Ok(ErrorCode::FeaturedItemDisabled),
            4007 => Ok(ErrorCode::OrderEmpty),

            // Catalog
            6001 => Ok(ErrorCode::CatalogCategoryInvalid),
            6002 => Ok(ErrorCode::CatalogEntryNotFound),
            6003 => Ok(ErrorCode::CatalogEntryInvalid),
            6004 => Ok(ErrorCode::DefaultEntryNotRemovable),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            // Storage
            9401 => Ok(ErrorCode::StorageFull),
            9403 => Ok(ErrorCode::StorageCorrupted),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
