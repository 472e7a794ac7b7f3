//! Immutable, insertion-ordered reference tables.

use super::records::*;
use super::wheel::GateWheel;
use crate::error::{AtlasError, AtlasResult};
use indexmap::IndexMap;
use std::sync::Arc;

/// One reference table: id -> record, in source order. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: IndexMap<String, Arc<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: IndexMap::new(),
        }
    }
}

impl<T: Record> Table<T> {
    /// Build a table from rows. Ids must be unique within the table.
    pub fn from_rows(rows: impl IntoIterator<Item = T>) -> AtlasResult<Self> {
        let mut map = IndexMap::new();
        for row in rows {
            let id = row.id().to_string();
            if map.contains_key(&id) {
                return Err(AtlasError::DuplicateId { table: T::TABLE, id });
            }
            map.insert(id, Arc::new(row));
        }
        Ok(Self { rows: map })
    }

    pub fn get(&self, id: &str) -> Option<&Arc<T>> {
        self.rows.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    /// Rows in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.rows.values()
    }

    /// First row (in source order) matching the predicate.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&Arc<T>> {
        self.rows.values().find(|row| pred(row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Every reference table plus the gate wheel. Shared behind an `Arc` once built.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub signs: Table<ZodiacSign>,
    pub planets: Table<Planet>,
    pub points: Table<AstroPoint>,
    pub houses: Table<House>,
    pub elements: Table<Element>,
    pub aspects: Table<Aspect>,
    pub configurations: Table<AspectConfiguration>,
    pub decans: Table<Decan>,
    pub dignities: Table<Dignity>,
    pub hd_gates: Table<HdGate>,
    pub hd_gates_72: Table<HdGate72>,
    pub hd_centers: Table<HdCenter>,
    pub hd_channels: Table<HdChannel>,
    pub hd_authorities: Table<HdAuthority>,
    pub hd_profiles: Table<HdProfile>,
    pub hd_lines: Table<HdLine>,
    pub gene_keys: Table<GeneKey>,
    pub gk_spheres: Table<GkSphereInfo>,
    pub gk_sequences: Table<GkSequenceInfo>,
    pub codon_rings: Table<CodonRing>,
    pub chakras: Table<Chakra>,
    pub numerology: Table<NumerologyNumber>,
    pub wheel: GateWheel,
}

impl ReferenceTables {
    /// (table name, row count) for every table, in a fixed order.
    pub fn sizes(&self) -> Vec<(&'static str, usize)> {
        vec![
            (ZodiacSign::TABLE, self.signs.len()),
            (Planet::TABLE, self.planets.len()),
            (AstroPoint::TABLE, self.points.len()),
            (House::TABLE, self.houses.len()),
            (Element::TABLE, self.elements.len()),
            (Aspect::TABLE, self.aspects.len()),
            (AspectConfiguration::TABLE, self.configurations.len()),
            (Decan::TABLE, self.decans.len()),
            (Dignity::TABLE, self.dignities.len()),
            (HdGate::TABLE, self.hd_gates.len()),
            (HdGate72::TABLE, self.hd_gates_72.len()),
            (HdCenter::TABLE, self.hd_centers.len()),
            (HdChannel::TABLE, self.hd_channels.len()),
            (HdAuthority::TABLE, self.hd_authorities.len()),
            (HdProfile::TABLE, self.hd_profiles.len()),
            (HdLine::TABLE, self.hd_lines.len()),
            (GeneKey::TABLE, self.gene_keys.len()),
            (GkSphereInfo::TABLE, self.gk_spheres.len()),
            (GkSequenceInfo::TABLE, self.gk_sequences.len()),
            (CodonRing::TABLE, self.codon_rings.len()),
            (Chakra::TABLE, self.chakras.len()),
            (NumerologyNumber::TABLE, self.numerology.len()),
        ]
    }

    pub fn total_records(&self) -> usize {
        self.sizes().iter().map(|(_, n)| n).sum()
    }
}
