//! Background work: event plumbing and user actions

pub mod core;
pub mod dispatcher;
