//! Tag values and masks for the six opcode kinds in a QOI chunk stream.
//!
//! The one byte opcodes are distinguished by their top two bits, except
//! for the absolute color opcodes which occupy the full bytes `0xFE` and
//! `0xFF`. Those two shadow what would otherwise be the longest run
//! lengths, which is why runs cap at 62.

pub(crate) const TAG_INDEX: u8 = 0x00;
pub(crate) const TAG_DIFF: u8 = 0x40;
pub(crate) const TAG_LUMA: u8 = 0x80;
pub(crate) const TAG_RUN: u8 = 0xC0;
pub(crate) const TAG_RGB: u8 = 0xFE;
pub(crate) const TAG_RGBA: u8 = 0xFF;

/// Selects the two tag bits of a one byte opcode.
pub(crate) const MASK_TAG: u8 = 0xC0;

/// Selects the six payload bits of a one byte opcode.
pub(crate) const MASK_PAYLOAD: u8 = 0x3F;

/// Longest run a single run opcode can describe.
pub(crate) const MAX_RUN: u8 = 62;
