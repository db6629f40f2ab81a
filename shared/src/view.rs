//! A small view description that pages render into.
//!
//! Pages build a tree of [`View`] nodes instead of concatenating markup. Text
//! and attribute values are stored unescaped and escaped when the tree is
//! written out, so callers never escape by hand. The frontend turns the
//! rendered markup into a Yew node; tests inspect the tree directly.

use std::fmt;

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Empty,
    Text(String),
    Element(Element),
    Fragment(Vec<View>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<View>,
}

pub fn el(tag: &'static str) -> Element {
    Element { tag, classes: Vec::new(), attrs: Vec::new(), children: Vec::new() }
}

pub fn text(content: impl Into<String>) -> View {
    View::Text(content.into())
}

impl Element {
    /// Adds whitespace-separated class names.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes.extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<View>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(View::Text(content.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }
}

impl From<Element> for View {
    fn from(element: Element) -> Self {
        View::Element(element)
    }
}

impl From<&str> for View {
    fn from(content: &str) -> Self {
        View::Text(content.to_string())
    }
}

impl From<String> for View {
    fn from(content: String) -> Self {
        View::Text(content)
    }
}

impl View {
    /// Concatenated text of every text node, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            View::Empty => {}
            View::Text(t) => out.push_str(t),
            View::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
            View::Fragment(nodes) => nodes.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Depth-first search for every element carrying `class`.
    pub fn find_by_class<'a>(&'a self, class: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.walk(&mut |e: &'a Element| {
            if e.has_class(class) {
                found.push(e);
            }
        });
        found
    }

    pub fn find_by_tag<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.walk(&mut |e: &'a Element| {
            if e.tag == tag {
                found.push(e);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        match self {
            View::Empty | View::Text(_) => {}
            View::Element(e) => {
                visit(e);
                for child in &e.children {
                    child.walk(visit);
                }
            }
            View::Fragment(nodes) => {
                for node in nodes {
                    node.walk(visit);
                }
            }
        }
    }
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut last = 0;
        for (i, ch) in self.0.char_indices() {
            let replacement = match ch {
                '&' => "&amp;",
                '<' => "&lt;",
                '>' => "&gt;",
                '"' => "&quot;",
                '\'' => "&#039;",
                _ => continue,
            };
            f.write_str(&self.0[last..i])?;
            f.write_str(replacement)?;
            last = i + ch.len_utf8();
        }
        f.write_str(&self.0[last..])
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        if !self.classes.is_empty() {
            write!(f, " class=\"{}\"", Escaped(&self.classes.join(" ")))?;
        }
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, Escaped(value))?;
        }
        f.write_str(">")?;
        if VOID_TAGS.contains(&self.tag) {
            return Ok(());
        }
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Empty => Ok(()),
            View::Text(t) => write!(f, "{}", Escaped(t)),
            View::Element(e) => write!(f, "{}", e),
            View::Fragment(nodes) => nodes.iter().try_for_each(|n| write!(f, "{}", n)),
        }
    }
}
