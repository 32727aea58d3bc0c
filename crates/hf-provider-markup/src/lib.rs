//! Markup helpers for server-rendered admin pages.
//!
//! * [`builder`] – fluent, escaping HTML builder.
//! * [`chain`] – concatenation of independently rendered fragments.
//! * [`escape`] – text and attribute escaping.
pub mod builder;
pub mod chain;
pub mod escape;
