//! # filo-entity
//!
//! Domain entity models for Filo. The registry catalogs exactly one kind of
//! row, the [`file::FileRecord`]; the remaining types are the inputs used to
//! create, address and filter it.

pub mod file;
