//! The 64-gate wheel: ecliptic degree -> wheel position -> gate number and line.
//!
//! The circle is cut into 64 arcs of 5.625° starting at `origin_degree`, each arc into
//! 6 lines of 0.9375°. Gates are not numbered around the wheel, so the gate at each
//! position comes from a fixed order table. The default wheel starts its first arc at
//! 0° Aries; [`GateWheel::rave_mandala`] shifts the same order to the traditional
//! origin at 28°15' Pisces.

use crate::error::{AtlasError, AtlasResult};
use serde::{Deserialize, Serialize};

pub const GATE_COUNT: usize = 64;
pub const LINES_PER_GATE: u8 = 6;
pub const GATE_ARC: f64 = 360.0 / GATE_COUNT as f64;
pub const LINE_ARC: f64 = GATE_ARC / LINES_PER_GATE as f64;
pub const RAVE_MANDALA_ORIGIN: f64 = 358.25;

/// Gate numbers in wheel order, position 0 first.
pub const DEFAULT_WHEEL_ORDER: [u8; GATE_COUNT] = [
    25, 17, 21, 51, 42, 3, 27, 24, 2, 23, 8, 20, 16, 35, 45, 12, //
    15, 52, 39, 53, 62, 56, 31, 33, 7, 4, 29, 59, 40, 64, 47, 6, //
    46, 18, 48, 57, 32, 50, 28, 44, 1, 43, 14, 34, 9, 5, 26, 11, //
    10, 58, 38, 54, 61, 60, 41, 19, 13, 49, 30, 55, 37, 63, 22, 36,
];

/// Normalize any finite degree into [0, 360).
pub fn normalize_degree(degree: f64) -> Option<f64> {
    if !degree.is_finite() {
        return None;
    }
    let d = degree.rem_euclid(360.0);
    // rem_euclid may round tiny negatives up to exactly 360.
    Some(if d >= 360.0 { 0.0 } else { d })
}

/// Where a degree falls on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelLocation {
    /// 0–63.
    pub position: usize,
    /// 1–64.
    pub gate_number: u8,
    /// 1–6.
    pub line: u8,
}

/// On-disk shape of `gate-wheel.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateWheelFile {
    #[serde(default)]
    pub origin_degree: f64,
    pub order: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GateWheel {
    origin_degree: f64,
    order: [u8; GATE_COUNT],
}

impl Default for GateWheel {
    fn default() -> Self {
        Self {
            origin_degree: 0.0,
            order: DEFAULT_WHEEL_ORDER,
        }
    }
}

impl GateWheel {
    /// Build a wheel from an order table. The order must be a permutation of 1..=64.
    pub fn new(origin_degree: f64, order: &[u8]) -> AtlasResult<Self> {
        let origin_degree = normalize_degree(origin_degree).ok_or_else(|| {
            AtlasError::InvalidWheel(format!("origin {origin_degree} is not finite"))
        })?;
        let order: [u8; GATE_COUNT] = order.try_into().map_err(|_| {
            AtlasError::InvalidWheel(format!("expected {GATE_COUNT} entries, got {}", order.len()))
        })?;
        let mut seen = [false; GATE_COUNT + 1];
        for &gate in &order {
            let slot = seen.get_mut(usize::from(gate)).filter(|_| gate != 0).ok_or_else(|| {
                AtlasError::InvalidWheel(format!("gate {gate} is outside 1..=64"))
            })?;
            if *slot {
                return Err(AtlasError::InvalidWheel(format!("gate {gate} appears twice")));
            }
            *slot = true;
        }
        Ok(Self { origin_degree, order })
    }

    /// The default order anchored at 358.25°, as drawn on the traditional mandala.
    pub fn rave_mandala() -> Self {
        Self {
            origin_degree: RAVE_MANDALA_ORIGIN,
            order: DEFAULT_WHEEL_ORDER,
        }
    }

    pub fn from_file(file: &GateWheelFile) -> AtlasResult<Self> {
        Self::new(file.origin_degree, &file.order)
    }

    pub fn origin_degree(&self) -> f64 {
        self.origin_degree
    }

    pub fn order(&self) -> &[u8; GATE_COUNT] {
        &self.order
    }

    pub fn gate_at(&self, position: usize) -> Option<u8> {
        self.order.get(position).copied()
    }

    pub fn position_of(&self, gate_number: u8) -> Option<usize> {
        self.order.iter().position(|&g| g == gate_number)
    }

    /// Absolute degree where a gate's arc begins.
    pub fn start_degree(&self, gate_number: u8) -> Option<f64> {
        let position = self.position_of(gate_number)?;
        normalize_degree(self.origin_degree + position as f64 * GATE_ARC)
    }

    /// Gate and line owning `degree`. A degree exactly on a boundary belongs to the
    /// higher line (and the next gate when it is also a gate boundary).
    pub fn locate(&self, degree: f64) -> Option<WheelLocation> {
        let d = normalize_degree(normalize_degree(degree)? - self.origin_degree)?;
        let position = ((d / GATE_ARC).floor() as usize).min(GATE_COUNT - 1);
        let within = d - position as f64 * GATE_ARC;
        let line = ((within / LINE_ARC).floor() as u8 + 1).clamp(1, LINES_PER_GATE);
        Some(WheelLocation {
            position,
            gate_number: self.order[position],
            line,
        })
    }
}
