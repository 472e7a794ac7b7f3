//! Gene Key joins. Keys and gates are 1:1 by number, linked through `gene_key_id`/`hd_gate_id`.

use crate::knowledge::{GeneKey, GkSequenceInfo, GkSphereInfo, HdGate, ReferenceTables};
use std::sync::Arc;

/// Direct join through the gate's `gene_key_id`.
pub fn get_gene_key_by_gate(tables: &ReferenceTables, gate_id: &str) -> Option<Arc<GeneKey>> {
    let gate = tables.hd_gates.get(gate_id)?;
    tables.gene_keys.get(gate.gene_key_id.as_deref()?).cloned()
}

/// Reverse join: the gate naming this key, falling back to the key's own `hd_gate_id`.
pub fn get_gate_by_gene_key(tables: &ReferenceTables, gene_key_id: &str) -> Option<Arc<HdGate>> {
    tables
        .hd_gates
        .find(|g| g.gene_key_id.as_deref() == Some(gene_key_id))
        .or_else(|| {
            let key = tables.gene_keys.get(gene_key_id)?;
            tables.hd_gates.get(key.hd_gate_id.as_deref()?)
        })
        .cloned()
}

pub fn get_gene_key_by_number(tables: &ReferenceTables, key_number: u8) -> Option<Arc<GeneKey>> {
    tables.gene_keys.find(|k| k.key_number == key_number).cloned()
}

pub fn get_programming_partner(
    tables: &ReferenceTables,
    gene_key_id: &str,
) -> Option<Arc<GeneKey>> {
    let key = tables.gene_keys.get(gene_key_id)?;
    tables
        .gene_keys
        .get(key.programming_partner_id.as_deref()?)
        .cloned()
}

fn sorted(keys: impl Iterator<Item = Arc<GeneKey>>) -> Vec<Arc<GeneKey>> {
    let mut out: Vec<_> = keys.collect();
    out.sort_by_key(|k| k.key_number);
    out
}

/// Keys whose `tropical_sign_id` equals `sign_id`, ascending by key number.
pub fn get_gene_keys_by_sign(tables: &ReferenceTables, sign_id: &str) -> Vec<Arc<GeneKey>> {
    sorted(
        tables
            .gene_keys
            .iter()
            .filter(|k| k.tropical_sign_id.as_deref() == Some(sign_id))
            .cloned(),
    )
}

/// Members of a codon ring: keys naming the ring, plus any the ring lists itself.
pub fn get_gene_keys_by_codon_ring(tables: &ReferenceTables, ring_id: &str) -> Vec<Arc<GeneKey>> {
    let listed: Vec<&str> = tables
        .codon_rings
        .get(ring_id)
        .map(|r| r.gene_key_ids.iter().map(String::as_str).collect())
        .unwrap_or_default();
    sorted(
        tables
            .gene_keys
            .iter()
            .filter(|k| {
                k.codon_ring_id.as_deref() == Some(ring_id) || listed.contains(&k.id.as_str())
            })
            .cloned(),
    )
}

/// Spheres of one sequence in journey order. The sequence's own `spheres` list wins; spheres
/// naming the sequence but missing from that list follow by `sequence_order`.
pub fn get_spheres_in_sequence(
    tables: &ReferenceTables,
    sequence_id: &str,
) -> Vec<Arc<GkSphereInfo>> {
    let mut out: Vec<Arc<GkSphereInfo>> = tables
        .gk_sequences
        .get(sequence_id)
        .map(|seq| {
            seq.spheres
                .iter()
                .filter_map(|id| tables.gk_spheres.get(id).cloned())
                .collect()
        })
        .unwrap_or_default();
    let mut rest: Vec<_> = tables
        .gk_spheres
        .iter()
        .filter(|s| s.sequence_id().as_deref() == Some(sequence_id))
        .filter(|s| !out.iter().any(|o| o.id == s.id))
        .cloned()
        .collect();
    rest.sort_by_key(|s| s.sequence_order);
    out.extend(rest);
    out
}

/// The sequence a sphere belongs to: its own `sequence` field, else the first sequence listing it.
pub fn get_sequence_for_sphere(
    tables: &ReferenceTables,
    sphere_id: &str,
) -> Option<Arc<GkSequenceInfo>> {
    let own = tables
        .gk_spheres
        .get(sphere_id)
        .and_then(|s| s.sequence_id())
        .and_then(|id| tables.gk_sequences.get(&id).cloned());
    own.or_else(|| {
        tables
            .gk_sequences
            .find(|seq| seq.spheres.iter().any(|s| s == sphere_id))
            .cloned()
    })
}
