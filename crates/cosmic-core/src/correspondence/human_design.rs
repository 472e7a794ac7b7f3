//! Gate, center and channel joins.

use crate::knowledge::{HdCenter, HdChannel, HdGate, ReferenceTables};
use std::sync::Arc;

/// Body-graph order, top to bottom.
pub const CENTER_NORTH_TO_SOUTH: [&str; 9] = [
    "head",
    "ajna",
    "throat",
    "g",
    "heart",
    "spleen",
    "solar-plexus",
    "sacral",
    "root",
];

fn center_matches_slug(center_id: &str, slug: &str) -> bool {
    center_id == slug
        || center_id.strip_prefix("center-") == Some(slug)
        || center_id.strip_suffix("-center") == Some(slug)
}

fn sorted_gates<'a>(gates: impl Iterator<Item = &'a Arc<HdGate>>) -> Vec<Arc<HdGate>> {
    let mut out: Vec<_> = gates.cloned().collect();
    out.sort_by_key(|g| g.gate_number);
    out
}

fn sorted_channels<'a>(channels: impl Iterator<Item = &'a Arc<HdChannel>>) -> Vec<Arc<HdChannel>> {
    let mut out: Vec<_> = channels.cloned().collect();
    out.sort_by_key(|c| c.channel_number);
    out
}

pub fn get_gate_by_number(tables: &ReferenceTables, gate_number: u8) -> Option<Arc<HdGate>> {
    tables.hd_gates.find(|g| g.gate_number == gate_number).cloned()
}

/// Gates whose `center_id` equals `center_id`, ascending by gate number.
pub fn get_gates_by_center(tables: &ReferenceTables, center_id: &str) -> Vec<Arc<HdGate>> {
    sorted_gates(
        tables
            .hd_gates
            .iter()
            .filter(|g| g.center_id.as_deref() == Some(center_id)),
    )
}

/// Gates whose `tropical_sign_id` equals `sign_id`, ascending by gate number.
pub fn get_gates_by_sign(tables: &ReferenceTables, sign_id: &str) -> Vec<Arc<HdGate>> {
    sorted_gates(
        tables
            .hd_gates
            .iter()
            .filter(|g| g.tropical_sign_id.as_deref() == Some(sign_id)),
    )
}

/// The center a gate belongs to.
pub fn get_center_for_gate(tables: &ReferenceTables, gate_id: &str) -> Option<Arc<HdCenter>> {
    let gate = tables.hd_gates.get(gate_id)?;
    tables.hd_centers.get(gate.center_id.as_deref()?).cloned()
}

/// Channels with either endpoint in `center_id`, by channel number.
pub fn get_channels_for_center(tables: &ReferenceTables, center_id: &str) -> Vec<Arc<HdChannel>> {
    sorted_channels(tables.hd_channels.iter().filter(|c| c.touches_center(center_id)))
}

/// Channels with either endpoint at `gate_id`, by channel number.
pub fn get_channels_for_gate(tables: &ReferenceTables, gate_id: &str) -> Vec<Arc<HdChannel>> {
    sorted_channels(
        tables
            .hd_channels
            .iter()
            .filter(|c| c.gate1_id == gate_id || c.gate2_id == gate_id),
    )
}

/// The channel joining two gates, in either order.
pub fn get_channel_by_gate_numbers(
    tables: &ReferenceTables,
    gate_a: u8,
    gate_b: u8,
) -> Option<Arc<HdChannel>> {
    tables
        .hd_channels
        .find(|c| c.connects_gates(gate_a, gate_b))
        .cloned()
}

pub fn get_channels_between_centers(
    tables: &ReferenceTables,
    center_a: &str,
    center_b: &str,
) -> Vec<Arc<HdChannel>> {
    sorted_channels(tables.hd_channels.iter().filter(|c| {
        (c.center1_id == center_a && c.center2_id == center_b)
            || (c.center1_id == center_b && c.center2_id == center_a)
    }))
}

/// Centers in body-graph order; centers the table does not hold are skipped.
pub fn get_centers_in_order(tables: &ReferenceTables) -> Vec<Arc<HdCenter>> {
    CENTER_NORTH_TO_SOUTH
        .iter()
        .filter_map(|slug| tables.hd_centers.find(|c| center_matches_slug(&c.id, slug)))
        .cloned()
        .collect()
}
