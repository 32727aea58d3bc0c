//! Simple **builder** that concatenates multiple values implementing
//! [`IntoMarkup`].
//!
//! Admin pages are assembled from small, independently rendered fragments:
//! a notice, a section description, one block per field. `MarkupChain` lines
//! them up without mutable `String`s or `push_str` noise.
//!
//! ```rust
//! use hf_provider_markup::chain::MarkupChain;
//! use hf_provider_markup::builder::{Attrs, MarkupBuilder};
//!
//! let html = MarkupChain::new()
//!     .with(MarkupBuilder::new().element("h1", &Attrs::new(), "Settings"))
//!     .with("<hr>")
//!     .build();
//!
//! assert_eq!(html, "<h1>Settings</h1><hr>");
//! ```
use crate::builder::MarkupBuilder;

/// Anything that can be turned into a finished HTML fragment.
///
/// `&str` and `String` are treated as trusted markup and inserted verbatim.
pub trait IntoMarkup {
    fn into_markup(self) -> String;
}

impl IntoMarkup for MarkupBuilder {
    fn into_markup(self) -> String {
        self.finalize()
    }
}

impl IntoMarkup for String {
    fn into_markup(self) -> String {
        self
    }
}

impl IntoMarkup for &str {
    fn into_markup(self) -> String {
        self.to_owned()
    }
}

/// Accumulates fragments in order.
#[derive(Debug, Default)]
pub struct MarkupChain(String);

impl MarkupChain {
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Append the markup produced by `with`.
    pub fn with(mut self, with: impl IntoMarkup) -> Self {
        self.0.push_str(&with.into_markup());
        self
    }

    /// Consume the chain and return the concatenated markup.
    pub fn build(self) -> String {
        self.0
    }
}
