//! Ecliptic arithmetic: degree -> gate/line, sign positions, decans and Lost Octave segments.

use crate::knowledge::{
    normalize_degree, Decan, GeneKey, HdGate, HdGate72, ReferenceTables, ZodiacSign,
};
use serde::Serialize;
use std::sync::Arc;

pub const SIGN_ARC: f64 = 30.0;
pub const DECAN_ARC: f64 = 10.0;

/// The HD gate and line owning an ecliptic degree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateAtDegree {
    pub gate: Arc<HdGate>,
    pub line: u8,
    /// Wheel position (0–63).
    pub position: usize,
}

/// Gate and line for an absolute ecliptic degree. Any finite degree is accepted and
/// normalized; `None` when the wheel's gate number has no row in the gate table.
pub fn get_gate_by_degree(tables: &ReferenceTables, degree: f64) -> Option<GateAtDegree> {
    let location = tables.wheel.locate(degree)?;
    let gate = tables
        .hd_gates
        .find(|g| g.gate_number == location.gate_number)?;
    Some(GateAtDegree {
        gate: Arc::clone(gate),
        line: location.line,
        position: location.position,
    })
}

/// `(sign order - 1) * 30 + degrees + minutes / 60`. `None` for an unknown sign.
pub fn sign_position_to_absolute_degree(
    tables: &ReferenceTables,
    sign_id: &str,
    degrees: f64,
    minutes: f64,
) -> Option<f64> {
    let sign = tables.signs.get(sign_id)?;
    Some(sign.zero_point() + degrees + minutes / 60.0)
}

/// A degree expressed as sign + offset within the sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignPosition {
    pub sign: Arc<ZodiacSign>,
    /// [0, 30).
    pub degree_in_sign: f64,
}

impl SignPosition {
    pub fn whole_degrees(&self) -> u8 {
        self.degree_in_sign.floor() as u8
    }

    pub fn minutes(&self) -> f64 {
        self.degree_in_sign.fract() * 60.0
    }
}

/// Inverse of [`sign_position_to_absolute_degree`].
pub fn absolute_degree_to_sign_position(
    tables: &ReferenceTables,
    degree: f64,
) -> Option<SignPosition> {
    let d = normalize_degree(degree)?;
    let order = ((d / SIGN_ARC).floor() as u8).min(11) + 1;
    let sign = tables.signs.find(|s| s.order_in_zodiac == order)?;
    Some(SignPosition {
        degree_in_sign: d - sign.zero_point(),
        sign: Arc::clone(sign),
    })
}

/// Gene Key and line for a sign position, via the gate owning that degree.
pub fn get_gene_key_by_zodiac_position(
    tables: &ReferenceTables,
    sign_id: &str,
    degrees: f64,
    minutes: f64,
) -> Option<(Arc<GeneKey>, u8)> {
    let degree = sign_position_to_absolute_degree(tables, sign_id, degrees, minutes)?;
    let at = get_gate_by_degree(tables, degree)?;
    let gk = tables.gene_keys.get(at.gate.gene_key_id.as_deref()?)?;
    Some((Arc::clone(gk), at.line))
}

/// Earth sits opposite the Sun: same offset, sign six places on.
pub fn get_earth_position(
    tables: &ReferenceTables,
    sun_sign_id: &str,
    degrees: f64,
    minutes: f64,
) -> Option<(Arc<ZodiacSign>, f64, f64)> {
    let sun_sign = tables.signs.get(sun_sign_id)?;
    let earth_order = (sun_sign.order_in_zodiac.checked_sub(1)? + 6) % 12 + 1;
    let earth = tables.signs.find(|s| s.order_in_zodiac == earth_order)?;
    Some((Arc::clone(earth), degrees, minutes))
}

/// The decan covering `degree_in_sign` (0–30) of a sign: <10 first, <20 second, else third.
pub fn get_decan_by_degree(
    tables: &ReferenceTables,
    sign_id: &str,
    degree_in_sign: f64,
) -> Option<Arc<Decan>> {
    let decan_number = if degree_in_sign < DECAN_ARC {
        1
    } else if degree_in_sign < 2.0 * DECAN_ARC {
        2
    } else {
        3
    };
    tables
        .decans
        .find(|d| d.sign_id == sign_id && d.decan_number == decan_number)
        .cloned()
}

/// A Lost Octave segment with its display derivations resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LostOctaveView {
    pub segment: Arc<HdGate72>,
    /// 1–36.
    pub decan_number: u8,
    pub overlapping_gate: Option<Arc<HdGate>>,
    /// Master gates have no Gene Key counterpart.
    pub gene_key: Option<Arc<GeneKey>>,
}

pub fn lost_octave_view(tables: &ReferenceTables, segment: &Arc<HdGate72>) -> LostOctaveView {
    let overlapping_gate = tables
        .hd_gates
        .find(|g| g.gate_number == segment.overlapping_64_gate_segment)
        .cloned();
    let gene_key = if segment.is_master_gate {
        None
    } else {
        tables
            .gene_keys
            .find(|k| k.key_number == segment.overlapping_64_gate_segment)
            .cloned()
    };
    LostOctaveView {
        segment: Arc::clone(segment),
        decan_number: segment.decan(),
        overlapping_gate,
        gene_key,
    }
}

/// The 5° Lost Octave segment containing an ecliptic degree.
pub fn get_lost_octave_by_degree(tables: &ReferenceTables, degree: f64) -> Option<LostOctaveView> {
    let d = normalize_degree(degree)?;
    let segment = tables.hd_gates_72.find(|s| s.contains_degree(d))?;
    Some(lost_octave_view(tables, segment))
}
