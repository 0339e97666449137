//! 유틸리티.

pub mod serde_helpers;
