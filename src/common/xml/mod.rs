//! XML text helpers shared by every part emitter.

pub mod escape;

pub use escape::{escape_xml, needs_space_preserve, push_escaped};
