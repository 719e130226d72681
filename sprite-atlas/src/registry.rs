//! Sprite registry (§2.7 / §4.7).
//!
//! Maps `(entity-kind, sub-kind, direction, frame-or-sequence)` to sprite
//! entries. Mutated only by the orchestrator; the renderer reads from its
//! own thread only after the progressive-upload invariant has made an
//! entry visible (§5).

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::atlas::Region;
use crate::ids::{Direction, EntityKind, MaterialKind, SequenceKey, SubKind, Variant};

/// One placed sprite: its atlas region plus world-space placement data
/// (offsets already fold in the top-edge trim).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteEntry {
    pub region: Region,
    pub anchor_offset_x: f32,
    pub anchor_offset_y: f32,
    pub world_width: f32,
    pub world_height: f32,
}

/// A building has a construction-phase sprite and a completed sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingEntry {
    pub construction: SpriteEntry,
    pub completed: SpriteEntry,
}

/// A per-direction animation: frames plus timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatedEntry {
    pub per_direction: Vec<Vec<SpriteEntry>>,
    pub frame_duration_ms: u32,
    pub loops: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SequenceKeyWire {
    entity_kind: EntityKind,
    sub_kind: SubKind,
    sequence_token: String,
    sequence: RawSequenceKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum RawSequenceKey {
    Walk,
    Carry(MaterialKind),
    Work(u32),
}

impl From<&SequenceKey> for RawSequenceKey {
    fn from(k: &SequenceKey) -> Self {
        match k {
            SequenceKey::Walk => RawSequenceKey::Walk,
            SequenceKey::Carry(m) => RawSequenceKey::Carry(*m),
            SequenceKey::Work(n) => RawSequenceKey::Work(*n),
        }
    }
}
impl From<RawSequenceKey> for SequenceKey {
    fn from(k: RawSequenceKey) -> Self {
        match k {
            RawSequenceKey::Walk => SequenceKey::Walk,
            RawSequenceKey::Carry(m) => SequenceKey::Carry(m),
            RawSequenceKey::Work(n) => SequenceKey::Work(n),
        }
    }
}

/// Stable, structured, serializable snapshot of a [`SpriteRegistry`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    buildings: Vec<(u32, BuildingEntry)>,
    map_objects: Vec<((u32, u32), SpriteEntry)>,
    resources: Vec<((u32, u8), SpriteEntry)>,
    units: Vec<((u32, u8), SpriteEntry)>,
    sequences: Vec<(SequenceKeyWire, AnimatedEntry)>,
}

/// Four maps from logical identifier to sprite entry, plus one map of
/// animation sequences.
#[derive(Debug, Default)]
pub struct SpriteRegistry {
    buildings: HashMap<SubKind, BuildingEntry>,
    map_objects: HashMap<(SubKind, Variant), SpriteEntry>,
    resources: HashMap<(MaterialKind, Direction), SpriteEntry>,
    units: HashMap<(SubKind, Direction), SpriteEntry>,
    sequences: HashMap<(EntityKind, SubKind, SequenceKey), AnimatedEntry>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.buildings.clear();
        self.map_objects.clear();
        self.resources.clear();
        self.units.clear();
        self.sequences.clear();
    }

    pub fn insert_building(&mut self, sub_kind: SubKind, entry: BuildingEntry) {
        self.buildings.insert(sub_kind, entry);
    }

    pub fn insert_map_object(&mut self, sub_kind: SubKind, variant: Variant, entry: SpriteEntry) {
        self.map_objects.insert((sub_kind, variant), entry);
    }

    pub fn insert_resource(&mut self, material: MaterialKind, direction: Direction, entry: SpriteEntry) {
        self.resources.insert((material, direction), entry);
    }

    pub fn insert_unit(&mut self, unit_kind: SubKind, direction: Direction, entry: SpriteEntry) {
        self.units.insert((unit_kind, direction), entry);
    }

    pub fn insert_sequence(
        &mut self,
        entity_kind: EntityKind,
        sub_kind: SubKind,
        key: SequenceKey,
        entry: AnimatedEntry,
    ) {
        self.sequences.insert((entity_kind, sub_kind, key), entry);
    }

    /// All lookups are `Option`-valued; a miss is a quiet negative so the
    /// renderer can fall back to a coloured placeholder.
    pub fn building(&self, sub_kind: SubKind) -> Option<&BuildingEntry> {
        self.buildings.get(&sub_kind)
    }

    pub fn map_object(&self, sub_kind: SubKind, variant: Variant) -> Option<&SpriteEntry> {
        self.map_objects.get(&(sub_kind, variant))
    }

    pub fn resource(&self, material: MaterialKind, direction: Direction) -> Option<&SpriteEntry> {
        self.resources.get(&(material, direction))
    }

    pub fn unit(&self, unit_kind: SubKind, direction: Direction) -> Option<&SpriteEntry> {
        self.units.get(&(unit_kind, direction))
    }

    pub fn sequence(
        &self,
        entity_kind: EntityKind,
        sub_kind: SubKind,
        key: &SequenceKey,
    ) -> Option<&AnimatedEntry> {
        self.sequences.get(&(entity_kind, sub_kind, key.clone()))
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
            + self.map_objects.len()
            + self.resources.len()
            + self.units.len()
            + self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Produces a stable structured snapshot, every map keyed by integer
    /// identifiers.
    pub fn serialize(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            buildings: self.buildings.iter().map(|(k, v)| (k.0, *v)).collect(),
            map_objects: self
                .map_objects
                .iter()
                .map(|(k, v)| ((k.0 .0, k.1 .0), *v))
                .collect(),
            resources: self
                .resources
                .iter()
                .map(|(k, v)| ((k.0 .0, k.1 .0), *v))
                .collect(),
            units: self
                .units
                .iter()
                .map(|(k, v)| ((k.0 .0, k.1 .0), *v))
                .collect(),
            sequences: self
                .sequences
                .iter()
                .map(|(k, v)| {
                    (
                        SequenceKeyWire {
                            entity_kind: k.0,
                            sub_kind: k.1,
                            sequence_token: k.2.as_token(),
                            sequence: RawSequenceKey::from(&k.2),
                        },
                        v.clone(),
                    )
                })
                .collect(),
        }
    }

    /// Reconstructs a registry from a snapshot exactly: UVs are accepted
    /// as-is since the layer size `L` is fixed in this design (§4.7).
    pub fn deserialize(snapshot: RegistrySnapshot) -> Self {
        let mut registry = Self::new();
        for (id, entry) in snapshot.buildings {
            registry.buildings.insert(SubKind(id), entry);
        }
        for ((sub, variant), entry) in snapshot.map_objects {
            registry.map_objects.insert((SubKind(sub), Variant(variant)), entry);
        }
        for ((material, direction), entry) in snapshot.resources {
            registry
                .resources
                .insert((MaterialKind(material), Direction(direction)), entry);
        }
        for ((unit, direction), entry) in snapshot.units {
            registry.units.insert((SubKind(unit), Direction(direction)), entry);
        }
        for (key, entry) in snapshot.sequences {
            registry.sequences.insert(
                (key.entity_kind, key.sub_kind, key.sequence.into()),
                entry,
            );
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(x: u32) -> SpriteEntry {
        SpriteEntry {
            region: Region {
                layer_index: 0,
                x,
                y: 0,
                w: 4,
                h: 4,
                u0: 0.0,
                v0: 0.0,
                u1: 1.0,
                v1: 1.0,
            },
            anchor_offset_x: 0.0,
            anchor_offset_y: 0.0,
            world_width: 1.0,
            world_height: 1.0,
        }
    }

    #[test]
    fn missing_lookups_are_quiet_none() {
        let reg = SpriteRegistry::new();
        assert!(reg.unit(SubKind(1), Direction(0)).is_none());
        assert!(reg.building(SubKind(1)).is_none());
    }

    #[test]
    fn cache_round_trip_is_a_fixed_point() {
        let mut reg = SpriteRegistry::new();
        reg.insert_unit(SubKind(1), Direction(2), entry(10));
        reg.insert_sequence(
            EntityKind::Unit,
            SubKind(1),
            SequenceKey::Carry(MaterialKind(3)),
            AnimatedEntry {
                per_direction: vec![vec![entry(1)]],
                frame_duration_ms: 100,
                loops: true,
            },
        );

        let snap1 = reg.serialize();
        let restored = SpriteRegistry::deserialize(snap1.clone());
        let snap2 = restored.serialize();

        assert_eq!(
            serde_json::to_value(&snap1).unwrap(),
            serde_json::to_value(&snap2).unwrap()
        );
        assert_eq!(
            restored.unit(SubKind(1), Direction(2)),
            reg.unit(SubKind(1), Direction(2))
        );
    }

    #[test]
    fn sequence_lookup_by_composite_key() {
        let mut reg = SpriteRegistry::new();
        reg.insert_sequence(
            EntityKind::Unit,
            SubKind(5),
            SequenceKey::Work(2),
            AnimatedEntry {
                per_direction: vec![],
                frame_duration_ms: 50,
                loops: false,
            },
        );
        assert!(reg
            .sequence(EntityKind::Unit, SubKind(5), &SequenceKey::Work(2))
            .is_some());
        assert!(reg
            .sequence(EntityKind::Unit, SubKind(5), &SequenceKey::Walk)
            .is_none());
    }
}
