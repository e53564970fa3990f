//! Markup module
//!
//! A small typed accessor layer over the HTML parser. Extraction code only
//! needs "find descendants by CSS selector", "look up an attribute" and
//! "read the text", so it is written against [`MarkupNode`] rather than a
//! particular parser's API.

mod node;

pub use node::{Fragment, MarkupNode};

#[cfg(test)]
mod tests;
