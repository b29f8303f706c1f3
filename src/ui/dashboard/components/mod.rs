//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod editor;
pub mod feed;
pub mod footer;
pub mod header;
pub mod impact;
pub mod logs;
