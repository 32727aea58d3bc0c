//! Builder-style helper for constructing **HTML fragments**.
//!
//! Writing markup with string concatenation is tedious and makes it easy to
//! forget escaping. `MarkupBuilder` offers a fluent API where text and
//! attribute values are always escaped and only [`MarkupBuilder::raw`] emits
//! input verbatim. Every method returns `self`, enabling call-chaining:
//!
//! ```rust
//! use hf_provider_markup::builder::{Attrs, MarkupBuilder};
//!
//! let html = MarkupBuilder::new()
//!     .open("p", &Attrs::new().set("class", "description"))
//!     .text("Models & providers")
//!     .close("p")
//!     .finalize();
//!
//! assert_eq!(html, r#"<p class="description">Models &amp; providers</p>"#);
//! ```
//!
//! The builder does not check that tags are balanced. It emits exactly what
//! is requested, in order.

use std::fmt::{Display, Write as _};

use crate::escape::{esc_attr, esc_html};

/// Ordered attribute list for a single element.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    entries: Vec<(String, Option<String>)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name="value"`.
    pub fn set(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.entries.push((name.into(), Some(value.to_string())));
        self
    }

    /// Add a boolean attribute (`checked`, `selected`, …) when `enabled`.
    pub fn flag_if(mut self, name: impl Into<String>, enabled: bool) -> Self {
        if enabled {
            self.entries.push((name.into(), None));
        }
        self
    }

    fn render(&self, buffer: &mut String) {
        for (name, value) in &self.entries {
            let written = match value {
                Some(value) => write!(buffer, r#" {name}="{}""#, esc_attr(value)),
                None => write!(buffer, " {name}"),
            };
            written.expect("failed to write buffer");
        }
    }
}

/// Fluent helper to produce HTML fragments.
///
/// Internally it owns a `String` buffer that grows with each chained call.
/// Once you’re done, call [`Self::finalize`] to obtain the assembled markup.
#[derive(Debug, Default)]
pub struct MarkupBuilder {
    buffer: String,
}

impl MarkupBuilder {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Emit an opening tag.
    pub fn open(mut self, tag: &str, attrs: &Attrs) -> Self {
        write!(self.buffer, "<{tag}").expect("failed to write buffer");
        attrs.render(&mut self.buffer);
        self.buffer.push('>');
        self
    }

    /// Emit a self-closing element such as `<input ... />`.
    pub fn void(mut self, tag: &str, attrs: &Attrs) -> Self {
        write!(self.buffer, "<{tag}").expect("failed to write buffer");
        attrs.render(&mut self.buffer);
        self.buffer.push_str(" />");
        self
    }

    pub fn close(mut self, tag: &str) -> Self {
        write!(self.buffer, "</{tag}>").expect("failed to write buffer");
        self
    }

    /// Emit escaped text.
    pub fn text(mut self, text: impl Display) -> Self {
        self.buffer.push_str(&esc_html(&text.to_string()));
        self
    }

    /// Open `tag`, write escaped `text`, close `tag`.
    pub fn element(self, tag: &str, attrs: &Attrs, text: impl Display) -> Self {
        self.open(tag, attrs).text(text).close(tag)
    }

    /// Emit `html` verbatim. Only pass trusted, already-built markup.
    pub fn raw(mut self, html: impl AsRef<str>) -> Self {
        self.buffer.push_str(html.as_ref());
        self
    }

    /// Run `f` on the builder only when `condition` holds.
    pub fn when(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self {
        if condition { f(self) } else { self }
    }

    /// Fold `items` into the builder, one call of `f` per item.
    pub fn each<I, T>(self, items: I, mut f: impl FnMut(Self, T) -> Self) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().fold(self, |builder, item| f(builder, item))
    }

    /// Retrieve the accumulated markup and consume the builder.
    pub fn finalize(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_element_with_flags() {
        let html = MarkupBuilder::new()
            .void(
                "input",
                &Attrs::new()
                    .set("type", "checkbox")
                    .set("value", "a/b")
                    .flag_if("checked", true)
                    .flag_if("disabled", false),
            )
            .finalize();

        assert_eq!(html, r#"<input type="checkbox" value="a/b" checked />"#);
    }

    #[test]
    fn attribute_values_are_escaped() {
        let html = MarkupBuilder::new()
            .element("span", &Attrs::new().set("data-x", r#"["a"]"#), "<ok>")
            .finalize();

        assert_eq!(html, r#"<span data-x="[&quot;a&quot;]">&lt;ok&gt;</span>"#);
    }

    #[test]
    fn each_and_when_compose() {
        let html = MarkupBuilder::new()
            .each(["x", "y"], |b, item| b.element("li", &Attrs::new(), item))
            .when(false, |b| b.raw("<hr>"))
            .finalize();

        assert_eq!(html, "<li>x</li><li>y</li>");
    }
}
