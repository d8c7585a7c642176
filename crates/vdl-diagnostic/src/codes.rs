//! Stable diagnostic codes, partitioned by concern.
//!
//! Codes are never renumbered once shipped: editors and CI pipelines
//! may key off of them directly.

/// Resolution (E001-E099).
pub const E001_FILE_NOT_FOUND: &str = "E001";
pub const E002_CIRCULAR_INCLUDE: &str = "E002";
pub const E003_DOCSTRING_FILE_NOT_FOUND: &str = "E003";
pub const E004_FILE_READ_ERROR: &str = "E004";
pub const E005_PARSE_ERROR: &str = "E005";

/// Naming (E101-E199).
pub const E101_NOT_PASCAL_CASE: &str = "E101";
pub const E102_NOT_CAMEL_CASE: &str = "E102";
pub const E103_ENUM_MEMBER_NOT_PASCAL: &str = "E103";

/// Type references and spreads (E201-E299).
pub const E201_TYPE_NOT_DECLARED: &str = "E201";
pub const E202_SPREAD_TYPE_NOT_FOUND: &str = "E202";
pub const E203_SPREAD_FIELD_CONFLICT: &str = "E203";
pub const E204_SPREAD_CYCLE: &str = "E204";
pub const E205_INVALID_REFERENCE: &str = "E205";
pub const E206_CONST_SPREAD_NOT_OBJECT: &str = "E206";
pub const E207_CONST_ARRAY_MIXED_TYPES: &str = "E207";

/// Enums (E301-E399).
pub const E301_ENUM_MIXED_TYPES: &str = "E301";
pub const E302_ENUM_INT_NEEDS_VALUES: &str = "E302";
pub const E303_ENUM_DUPLICATE_VALUE: &str = "E303";
pub const E304_ENUM_DUPLICATE_NAME: &str = "E304";
pub const E305_ENUM_MEMBER_NOT_FOUND: &str = "E305";

/// Cycles (E601-E699).
pub const E601_CIRCULAR_TYPE_DEPENDENCY: &str = "E601";

/// Structure (E701-E799).
pub const E701_DUPLICATE_FIELD: &str = "E701";

/// Global uniqueness (E801-E899).
pub const E801_DUPLICATE_TYPE: &str = "E801";
pub const E802_DUPLICATE_ENUM: &str = "E802";
pub const E803_DUPLICATE_CONST: &str = "E803";
pub const E804_DUPLICATE_NAME: &str = "E804";

/// Synthetic-name collisions (>= E901), reserved for the code-generation
/// extension in `vdl-validate::validators::synthetic_names`.
pub const E901_SYNTHETIC_NAME_COLLISION: &str = "E901";
