//! HTML → flat block list → named sections, plus the prose helpers shared by
//! every source.

pub mod blocks;
pub mod sections;
pub mod text;
