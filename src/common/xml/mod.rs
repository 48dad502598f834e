//! XML text helpers shared by the element tree and its serializer.
mod escape;

pub use escape::{escape_attr, escape_text, resolve_entity};
