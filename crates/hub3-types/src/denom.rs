//! Chain-specific constants, isolated so a fork targeting a sibling
//! Cosmos-family chain only has to edit this file.

/// The only denomination the decoder accepts. Any other denomination in an
/// amount field is a hard decode error.
pub const DENOM: &str = "uatom";

/// Number of fractional digits in the chain's micro-unit (`uatom` -> atom).
pub const PRECISION: u32 = 6;
