//! Utility modules for snowcascade.

pub mod varint;
