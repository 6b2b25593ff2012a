//! Database ID type definition.

/// Alias for the integer type used for mapping to transaction IDs in the database.
pub type TransactionID = i64;
