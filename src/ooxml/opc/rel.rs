//! Relationship manifests for OPC packages.
//!
//! This module provides the types behind every `.rels` part: a single
//! relationship triple and an ordered collection that renders itself as a
//! relationship document.

use crate::common::xml::push_escaped;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{namespace, target_mode};
use std::fmt::Write as FmtWrite;

/// A single relationship from a source part to a target.
///
/// Identified by an rId (relationship ID). Can be either internal (pointing to
/// another part) or external (pointing to an external URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a relative part reference or external URL
    target_ref: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    /// Create a new internal relationship.
    ///
    /// # Arguments
    /// * `r_id` - Relationship ID (e.g., "rId1")
    /// * `target_ref` - Target reference relative to the source part
    /// * `reltype` - Relationship type URI
    pub fn new(
        r_id: impl Into<String>,
        target_ref: impl Into<String>,
        reltype: impl Into<String>,
    ) -> Self {
        Self {
            r_id: r_id.into(),
            reltype: reltype.into(),
            target_ref: target_ref.into(),
            is_external: false,
        }
    }

    /// Create a new external relationship (`TargetMode="External"`).
    pub fn external(
        r_id: impl Into<String>,
        target_ref: impl Into<String>,
        reltype: impl Into<String>,
    ) -> Self {
        Self {
            is_external: true,
            ..Self::new(r_id, target_ref, reltype)
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }
}

/// Ordered collection of relationships from a single source.
///
/// Relationships render in insertion order. Neither ID uniqueness nor target
/// existence is checked: duplicates and dangling targets are the caller's
/// responsibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a relationship and return a reference to it.
    pub fn push(&mut self, rel: Relationship) -> &Relationship {
        self.rels.push(rel);
        &self.rels[self.rels.len() - 1]
    }

    /// Append an internal relationship with an explicit ID.
    pub fn add_relationship(&mut self, r_id: &str, target_ref: &str, reltype: &str) -> &Relationship {
        self.push(Relationship::new(r_id, target_ref, reltype))
    }

    /// Get a relationship by its ID (first match).
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id() == r_id)
    }

    /// Get or add a relationship to a target part.
    ///
    /// If an internal relationship of the given type to the target already
    /// exists, returns it. Otherwise appends one with the next available rId.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> &Relationship {
        if let Some(pos) = self.rels.iter().position(|rel| {
            rel.reltype() == reltype && rel.target_ref() == target_ref && !rel.is_external()
        }) {
            return &self.rels[pos];
        }

        let r_id = self.next_r_id();
        self.push(Relationship::new(r_id, target_ref, reltype))
    }

    /// Get the next available relationship ID.
    ///
    /// Generates IDs in the format "rId1", "rId2", etc., filling in the lowest
    /// gap if any exists.
    pub fn next_r_id(&self) -> String {
        let mut used_numbers: Vec<u32> = self
            .rels
            .iter()
            .filter_map(|rel| rel.r_id().strip_prefix("rId")?.parse::<u32>().ok())
            .collect();
        used_numbers.sort_unstable();

        let mut next_num = 1u32;
        for &num in &used_numbers {
            match num.cmp(&next_num) {
                std::cmp::Ordering::Equal => next_num += 1,
                std::cmp::Ordering::Greater => break,
                std::cmp::Ordering::Less => {},
            }
        }

        format!("rId{}", next_num)
    }

    /// Get an iterator over all relationships in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize relationships to a `.rels` document.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        write!(xml, r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS)?;
        xml.push('\n');

        for rel in &self.rels {
            xml.push_str(r#"  <Relationship Id=""#);
            push_escaped(&mut xml, rel.r_id());
            xml.push_str(r#"" Type=""#);
            push_escaped(&mut xml, rel.reltype());
            xml.push_str(r#"" Target=""#);
            push_escaped(&mut xml, rel.target_ref());
            xml.push('"');
            if rel.is_external() {
                write!(xml, r#" TargetMode="{}""#, target_mode::EXTERNAL)?;
            }
            xml.push_str("/>\n");
        }

        xml.push_str("</Relationships>");

        log::trace!("Rendered relationship part: {} entries, {} bytes", self.rels.len(), xml.len());
        Ok(xml)
    }
}

impl FromIterator<Relationship> for Relationships {
    fn from_iter<I: IntoIterator<Item = Relationship>>(iter: I) -> Self {
        Self {
            rels: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Relationships {
    type Item = &'a Relationship;
    type IntoIter = std::slice::Iter<'a, Relationship>;

    fn into_iter(self) -> Self::IntoIter {
        self.rels.iter()
    }
}
