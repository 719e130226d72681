//! Identifiers shared across the registry, orchestrator, and cache.
//!
//! These are the "logical identifier" vocabulary referenced throughout §3/§4
//! of the pipeline spec: entity-kind, sub-kind, direction, and sequence-key.

use serde::{Deserialize, Serialize};

/// Which of the four registry categories (plus animation sequences) a
/// sprite belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Building,
    MapObject,
    Resource,
    Unit,
}

/// Opaque sub-kind discriminator (building type, resource material, unit
/// type, ...). The pipeline never interprets the value; it is a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubKind(pub u32);

/// Eight-way (or however many the container encodes) facing direction index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Direction(pub u8);

/// Variant discriminator for map objects (decoration index, resource node
/// variant, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variant(pub u32);

/// Material kind for carried-resource animation variants (`carry:<material>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MaterialKind(pub u32);

/// Distinguishes animation variants: the default walk cycle, a carrier
/// carrying a specific material, or a numbered work animation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceKey {
    Walk,
    Carry(MaterialKind),
    Work(u32),
}

impl SequenceKey {
    /// Stable string form, matching the glossary's examples
    /// (`walk`, `carry:iron`, `work:2`).
    pub fn as_token(&self) -> String {
        match self {
            SequenceKey::Walk => "walk".to_string(),
            SequenceKey::Carry(m) => format!("carry:{}", m.0),
            SequenceKey::Work(n) => format!("work:{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_key_tokens_match_glossary_examples() {
        assert_eq!(SequenceKey::Walk.as_token(), "walk");
        assert_eq!(SequenceKey::Carry(MaterialKind(1)).as_token(), "carry:1");
        assert_eq!(SequenceKey::Work(2).as_token(), "work:2");
    }
}
