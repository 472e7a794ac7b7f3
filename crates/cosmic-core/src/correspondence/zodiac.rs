//! Sign ordering, decans, dignities and the chakra correspondences.

use crate::knowledge::{
    Chakra, Decan, DecanDimension, Dignity, HdGate, Planet, ReferenceTables, ZodiacSign,
};
use serde::Serialize;
use std::sync::Arc;

pub fn get_signs_in_order(tables: &ReferenceTables) -> Vec<Arc<ZodiacSign>> {
    let mut signs: Vec<_> = tables.signs.iter().cloned().collect();
    signs.sort_by_key(|s| s.order_in_zodiac);
    signs
}

pub fn get_opposite_sign(tables: &ReferenceTables, sign_id: &str) -> Option<Arc<ZodiacSign>> {
    let sign = tables.signs.get(sign_id)?;
    tables.signs.get(sign.opposing_sign_id.as_deref()?).cloned()
}

/// A decan with its ruler and dimension resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignDecan {
    pub decan: Arc<Decan>,
    pub ruler: Option<Arc<Planet>>,
    pub dimension: Option<DecanDimension>,
}

/// The decans of a sign in decan order (three for complete data).
pub fn get_sign_decans(tables: &ReferenceTables, sign_id: &str) -> Vec<SignDecan> {
    let mut decans: Vec<_> = tables
        .decans
        .iter()
        .filter(|d| d.sign_id == sign_id)
        .map(|d| SignDecan {
            ruler: tables.planets.get(&d.ruler_planet_id).cloned(),
            dimension: d.dimension(),
            decan: Arc::clone(d),
        })
        .collect();
    decans.sort_by_key(|d| d.decan.decan_number);
    decans
}

/// The dignity a planet holds in a sign, if the matrix has one.
pub fn get_dignity(
    tables: &ReferenceTables,
    planet_id: &str,
    sign_id: &str,
) -> Option<Arc<Dignity>> {
    tables
        .dignities
        .find(|d| d.planet_id == planet_id && d.sign_id == sign_id)
        .cloned()
}

/// Every dignity of one planet, in table order.
pub fn get_planet_dignities(tables: &ReferenceTables, planet_id: &str) -> Vec<Arc<Dignity>> {
    tables
        .dignities
        .iter()
        .filter(|d| d.planet_id == planet_id)
        .cloned()
        .collect()
}

pub fn get_sign_dignities(tables: &ReferenceTables, sign_id: &str) -> Vec<Arc<Dignity>> {
    tables
        .dignities
        .iter()
        .filter(|d| d.sign_id == sign_id)
        .cloned()
        .collect()
}

/// First chakra (in table order) listing the sign among its related signs.
pub fn get_chakra_by_sign(tables: &ReferenceTables, sign_id: &str) -> Option<Arc<Chakra>> {
    tables
        .chakras
        .find(|c| c.related_signs.iter().any(|s| s == sign_id))
        .cloned()
}

/// First chakra (in table order) listing the HD center among its related centers.
pub fn get_chakra_by_center(tables: &ReferenceTables, center_id: &str) -> Option<Arc<Chakra>> {
    tables
        .chakras
        .find(|c| c.related_hd_centers.iter().any(|s| s == center_id))
        .cloned()
}

/// Gates reached through a chakra's centers, plus any it names directly. Ascending by number.
pub fn get_gates_for_chakra(tables: &ReferenceTables, chakra_id: &str) -> Vec<Arc<HdGate>> {
    let Some(chakra) = tables.chakras.get(chakra_id) else {
        return Vec::new();
    };
    let mut gates: Vec<_> = tables
        .hd_gates
        .iter()
        .filter(|g| {
            g.center_id
                .as_deref()
                .is_some_and(|c| chakra.related_hd_centers.iter().any(|rc| rc == c))
                || chakra.related_gates.contains(&g.gate_number)
        })
        .cloned()
        .collect();
    gates.sort_by_key(|g| g.gate_number);
    gates
}
