//! Reference-integrity checks.
//!
//! Runtime lookups fail soft: a dangling foreign key just makes a derivation return `None`.
//! These checks are the loud path for tests and CI. They walk every foreign-key field of
//! the reference tables, every id the correspondence functions can return, and every
//! `related_ids` entry of the registry, and report what does not resolve.

use crate::correspondence::{
    get_center_for_gate, get_channels_for_center, get_chakra_by_center, get_chakra_by_sign,
    get_gate_by_degree, get_gene_key_by_gate, get_sequence_for_sphere, get_sign_decans,
};
use crate::error::{AtlasError, AtlasResult};
use crate::knowledge::wheel::GATE_ARC;
use crate::knowledge::{Record, ReferenceTables, Table};
use crate::registry::EntityRegistry;
use serde::Serialize;
use std::fmt;

/// How far (degrees) a gate's tabled `degreeStart` may sit from the wheel's start for it.
pub const DEGREE_TOLERANCE: f64 = 0.01;

fn arc_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenReference {
    pub source_id: String,
    pub field: String,
    pub target_id: String,
}

impl fmt::Display for BrokenReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} -> {}", self.source_id, self.field, self.target_id)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    /// References examined.
    pub checked: usize,
    pub broken: Vec<BrokenReference>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.broken.is_empty()
    }

    pub fn merge(&mut self, other: IntegrityReport) {
        self.checked += other.checked;
        self.broken.extend(other.broken);
    }

    /// `Err` when anything is broken.
    pub fn into_result(self) -> AtlasResult<Self> {
        match self.broken.first() {
            None => Ok(self),
            Some(first) => Err(AtlasError::BrokenReferences {
                count: self.broken.len(),
                first: first.to_string(),
            }),
        }
    }

    fn record(&mut self, resolves: bool, source_id: &str, field: &str, target_id: &str) {
        self.checked += 1;
        if !resolves {
            self.broken.push(BrokenReference {
                source_id: source_id.to_string(),
                field: field.to_string(),
                target_id: target_id.to_string(),
            });
        }
    }

    fn record_in<T: Record>(
        &mut self,
        table: &Table<T>,
        source_id: &str,
        field: &str,
        target_id: Option<impl AsRef<str>>,
    ) {
        let Some(target) = target_id else { return };
        let target = target.as_ref();
        if !target.is_empty() {
            self.record(table.contains(target), source_id, field, target);
        }
    }
}

/// Every foreign-key field of every table, plus wheel coverage of the gate table and
/// agreement between each gate's tabled `degreeStart` and the wheel.
pub fn check_reference_integrity(t: &ReferenceTables) -> IntegrityReport {
    let mut r = IntegrityReport::default();
    let body = |id: &str| t.planets.contains(id) || t.points.contains(id);
    let gate_number = |n: u8| t.hd_gates.iter().any(|g| g.gate_number == n);

    for s in t.signs.iter() {
        r.record_in(&t.elements, &s.id, "elementId", s.element_id.as_deref());
        r.record_in(&t.signs, &s.id, "opposingSignId", s.opposing_sign_id.as_deref());
        r.record_in(&t.houses, &s.id, "houseRuled", s.house_ruled.as_deref());
        for p in &s.ruling_planet_ids {
            r.record(body(p), &s.id, "rulingPlanetIds", p);
        }
    }
    for p in t.planets.iter() {
        for s in &p.signs_ruled {
            r.record_in(&t.signs, &p.id, "signsRuled", Some(s));
        }
    }
    for h in t.houses.iter() {
        r.record_in(&t.signs, &h.id, "rulingSignId", h.ruling_sign_id.as_deref());
        if let Some(p) = h.ruling_planet_id.as_deref() {
            r.record(body(p), &h.id, "rulingPlanetId", p);
        }
    }
    for c in t.configurations.iter() {
        for a in &c.required_aspect_ids {
            r.record_in(&t.aspects, &c.id, "requiredAspectIds", Some(a));
        }
    }
    for d in t.decans.iter() {
        r.record_in(&t.signs, &d.id, "signId", Some(&d.sign_id));
        r.record(body(&d.ruler_planet_id), &d.id, "rulerPlanetId", &d.ruler_planet_id);
        r.record_in(&t.signs, &d.id, "subrulerSignId", d.subruler_sign_id.as_deref());
    }
    for d in t.dignities.iter() {
        r.record(body(&d.planet_id), &d.id, "planetId", &d.planet_id);
        r.record_in(&t.signs, &d.id, "signId", Some(&d.sign_id));
    }

    for g in t.hd_gates.iter() {
        r.record_in(&t.hd_centers, &g.id, "centerId", g.center_id.as_deref());
        r.record_in(&t.hd_gates, &g.id, "channelGateId", g.channel_gate_id.as_deref());
        r.record_in(&t.signs, &g.id, "tropicalSignId", g.tropical_sign_id.as_deref());
        r.record_in(&t.gene_keys, &g.id, "geneKeyId", g.gene_key_id.as_deref());
        if let Some(start) = g.degree_start {
            match t.wheel.start_degree(g.gate_number) {
                Some(expected) => r.record(
                    arc_distance(start, expected) <= DEGREE_TOLERANCE,
                    &g.id,
                    "degreeStart",
                    &format!("{start} (wheel starts gate {} at {expected})", g.gate_number),
                ),
                None => r.record(false, &g.id, "degreeStart", "(gate not on wheel)"),
            }
        }
    }
    for s in t.hd_gates_72.iter() {
        r.record_in(&t.signs, &s.id, "tropicalSignId", s.tropical_sign_id.as_deref());
        let n = s.overlapping_64_gate_segment;
        r.record(gate_number(n), &s.id, "overlapping64GateSegment", &n.to_string());
    }
    for c in t.hd_centers.iter() {
        for g in &c.gate_ids {
            r.record_in(&t.hd_gates, &c.id, "gateIds", Some(g));
        }
    }
    for c in t.hd_channels.iter() {
        r.record_in(&t.hd_gates, &c.id, "gate1Id", Some(&c.gate1_id));
        r.record_in(&t.hd_gates, &c.id, "gate2Id", Some(&c.gate2_id));
        r.record_in(&t.hd_centers, &c.id, "center1Id", Some(&c.center1_id));
        r.record_in(&t.hd_centers, &c.id, "center2Id", Some(&c.center2_id));
    }
    for a in t.hd_authorities.iter() {
        r.record_in(&t.hd_centers, &a.id, "centerId", a.center_id.as_deref());
    }
    for p in t.hd_profiles.iter() {
        r.record_in(&t.hd_lines, &p.id, "personalityLineId", Some(&p.personality_line_id));
        r.record_in(&t.hd_lines, &p.id, "designLineId", Some(&p.design_line_id));
    }

    for k in t.gene_keys.iter() {
        let partner = k.programming_partner_id.as_deref();
        r.record_in(&t.gene_keys, &k.id, "programmingPartnerId", partner);
        r.record_in(&t.codon_rings, &k.id, "codonRingId", k.codon_ring_id.as_deref());
        r.record_in(&t.hd_gates, &k.id, "hdGateId", k.hd_gate_id.as_deref());
        r.record_in(&t.signs, &k.id, "tropicalSignId", k.tropical_sign_id.as_deref());
    }
    for sphere in t.gk_spheres.iter() {
        r.record_in(&t.gk_spheres, &sphere.id, "partnerSphere", sphere.partner_sphere.as_deref());
        r.record_in(&t.gk_sequences, &sphere.id, "sequence", sphere.sequence_id());
    }
    for seq in t.gk_sequences.iter() {
        for sphere in &seq.spheres {
            r.record_in(&t.gk_spheres, &seq.id, "spheres", Some(sphere));
        }
    }
    for ring in t.codon_rings.iter() {
        for k in &ring.gene_key_ids {
            r.record_in(&t.gene_keys, &ring.id, "geneKeyIds", Some(k));
        }
    }

    for c in t.chakras.iter() {
        for s in &c.related_signs {
            r.record_in(&t.signs, &c.id, "relatedSigns", Some(s));
        }
        for center in &c.related_hd_centers {
            r.record_in(&t.hd_centers, &c.id, "relatedHDCenters", Some(center));
        }
        for &n in &c.related_gates {
            r.record(gate_number(n), &c.id, "relatedGates", &n.to_string());
        }
    }
    for n in t.numerology.iter() {
        r.record_in(&t.chakras, &n.id, "chakraId", n.chakra_id.as_deref());
    }

    if !t.hd_gates.is_empty() {
        for &n in t.wheel.order() {
            r.record(gate_number(n), "gate-wheel", "order", &n.to_string());
        }
    }

    r
}

/// Every id a correspondence function can hand out, and every `related_ids` entry of the
/// universal and active-profile entities, must resolve through the registry.
pub fn check_derivations_resolve(registry: &EntityRegistry) -> IntegrityReport {
    let t = registry.tables();
    let mut r = IntegrityReport::default();
    let resolve = |r: &mut IntegrityReport, source: &str, field: &str, id: &str| {
        r.record(registry.get_entity(id).is_some(), source, field, id);
    };

    if !t.hd_gates.is_empty() {
        for position in 0..t.wheel.order().len() {
            let mid = t.wheel.origin_degree() + (position as f64 + 0.5) * GATE_ARC;
            let source = format!("degree:{mid}");
            match get_gate_by_degree(t, mid) {
                Some(at) => resolve(&mut r, &source, "getGateByDegree", &at.gate.id),
                None => r.record(false, &source, "getGateByDegree", "(no gate)"),
            }
        }
    }
    for g in t.hd_gates.iter() {
        if let Some(k) = get_gene_key_by_gate(t, &g.id) {
            resolve(&mut r, &g.id, "getGeneKeyByGate", &k.id);
        }
        if let Some(c) = get_center_for_gate(t, &g.id) {
            resolve(&mut r, &g.id, "getCenterForGate", &c.id);
        }
    }
    for s in t.signs.iter() {
        if let Some(c) = get_chakra_by_sign(t, &s.id) {
            resolve(&mut r, &s.id, "getChakraBySign", &c.id);
        }
        for d in get_sign_decans(t, &s.id) {
            resolve(&mut r, &s.id, "getSignDecans", &d.decan.id);
        }
    }
    for sphere in t.gk_spheres.iter() {
        if let Some(seq) = get_sequence_for_sphere(t, &sphere.id) {
            resolve(&mut r, &sphere.id, "getSequenceForSphere", &seq.id);
        }
    }
    for c in t.hd_centers.iter() {
        if let Some(ch) = get_chakra_by_center(t, &c.id) {
            resolve(&mut r, &c.id, "getChakraByCenter", &ch.id);
        }
        for ch in get_channels_for_center(t, &c.id) {
            resolve(&mut r, &c.id, "getChannelsForCenter", &ch.id);
        }
    }

    let profile = registry.profile_snapshot();
    for entity in registry
        .universal_entities()
        .iter()
        .chain(profile.entities.values())
    {
        for id in &entity.related_ids {
            resolve(&mut r, &entity.id, "relatedIds", id);
        }
    }

    r
}
