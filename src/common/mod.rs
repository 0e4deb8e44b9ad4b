//! Common utilities shared across part emitters.

pub mod xml;
