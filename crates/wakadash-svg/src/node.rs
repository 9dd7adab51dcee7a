//! Minimal SVG document tree
//!
//! Rows are built as [`Element`] values and serialized once at the end, so
//! the layout code never concatenates markup by hand. Serialization is
//! deterministic: attributes keep insertion order and indentation is fixed.

use std::fmt::{self, Display, Write};

/// A node in the document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with ordered attributes and child nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute
    pub fn attr(mut self, key: &'static str, value: impl Display) -> Self {
        self.attrs.push((key, value.to_string()));
        self
    }

    /// Append a child node
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append several child nodes
    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append a text child
    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(Node::Text(content.into()))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Value of the first attribute named `key`
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Concatenated text of the direct text children
    pub fn inner_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    fn write_indented(&self, out: &mut String, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(out, "{indent}<{}", self.name)?;
        for (key, value) in &self.attrs {
            write!(out, " {key}=\"{}\"", escape(value, true))?;
        }

        if self.children.is_empty() {
            return writeln!(out, "/>");
        }

        let text_only = self.children.iter().all(|c| matches!(c, Node::Text(_)));
        if text_only {
            return writeln!(out, ">{}</{}>", escape(&self.inner_text(), false), self.name);
        }

        writeln!(out, ">")?;
        for child in &self.children {
            match child {
                Node::Element(el) => el.write_indented(out, depth + 1)?,
                Node::Text(t) => writeln!(out, "{indent}  {}", escape(t, false))?,
            }
        }
        writeln!(out, "{indent}</{}>", self.name)
    }

    /// Serialize the element and its subtree
    pub fn render(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_indented(&mut out, 0);
        out
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// Escape text for XML content or a double-quoted attribute value
pub fn escape(raw: &str, in_attr: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Format a pixel quantity with at most one decimal place
///
/// Whole numbers print without a fractional part so output stays stable.
pub fn px(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_closing_element() {
        let rect = Element::new("rect").attr("x", 10).attr("width", px(12.25));
        assert_eq!(rect.render(), "<rect x=\"10\" width=\"12.3\"/>\n");
    }

    #[test]
    fn test_text_is_escaped() {
        let text = Element::new("text").attr("class", "a\"b").text("R&D <fast>");
        assert_eq!(
            text.render(),
            "<text class=\"a&quot;b\">R&amp;D &lt;fast&gt;</text>\n"
        );
    }

    #[test]
    fn test_nested_indentation() {
        let group = Element::new("g")
            .child(Element::new("rect"))
            .child(Element::new("text").text("hi"));
        assert_eq!(group.render(), "<g>\n  <rect/>\n  <text>hi</text>\n</g>\n");
    }

    #[test]
    fn test_px_formatting() {
        assert_eq!(px(260.0), "260");
        assert_eq!(px(0.0), "0");
        assert_eq!(px(86.666), "86.7");
        assert_eq!(px(2.04), "2");
    }

    #[test]
    fn test_accessors() {
        let el = Element::new("rect").attr("width", 5).text("a").text("b");
        assert_eq!(el.name(), "rect");
        assert_eq!(el.get_attr("width"), Some("5"));
        assert_eq!(el.get_attr("height"), None);
        assert_eq!(el.inner_text(), "ab");
        assert_eq!(el.child_nodes().len(), 2);
    }
}
