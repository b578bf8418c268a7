//! Transpiler test modules.
//!
//! - `core`: select, insert, update, delete and index statements
//! - `collections`: collection merging on insert and update
//! - `properties`: generated checks over ordering and literal shape

mod collections;
