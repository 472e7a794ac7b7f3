//! Shared fixture: a complete, referentially clean set of reference tables written as JSON
//! into a temp directory and loaded through `ReferenceTables::load_dir`, plus a sample
//! profile.

#![allow(dead_code)]

use cosmic_core::knowledge::wheel::GATE_ARC;
use cosmic_core::{CosmicProfile, EntityRegistry, GateWheel, ReferenceTables};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

pub const SIGNS: [(&str, &str, &[&str]); 12] = [
    ("aries", "fire", &["mars"]),
    ("taurus", "earth", &["venus"]),
    ("gemini", "air", &["mercury"]),
    ("cancer", "water", &["moon"]),
    ("leo", "fire", &["sun"]),
    ("virgo", "earth", &["mercury"]),
    ("libra", "air", &["venus"]),
    ("scorpio", "water", &["mars", "pluto"]),
    ("sagittarius", "fire", &["jupiter"]),
    ("capricorn", "earth", &["saturn"]),
    ("aquarius", "air", &["saturn", "uranus"]),
    ("pisces", "water", &["jupiter", "neptune"]),
];

pub const PLANETS: [&str; 10] = [
    "sun", "moon", "mercury", "venus", "mars", "jupiter", "saturn", "uranus", "neptune", "pluto",
];

pub const CENTER_GATES: [(&str, &[u8]); 9] = [
    ("head", &[64, 61, 63]),
    ("ajna", &[47, 24, 4, 17, 43, 11]),
    ("throat", &[62, 23, 56, 35, 12, 45, 33, 8, 31, 20, 16]),
    ("g", &[1, 13, 25, 46, 2, 15, 10, 7]),
    ("heart", &[21, 40, 26, 51]),
    ("spleen", &[48, 57, 44, 50, 32, 28, 18]),
    ("solar-plexus", &[6, 37, 22, 36, 30, 55, 49]),
    ("sacral", &[34, 5, 14, 29, 59, 9, 3, 42, 27]),
    ("root", &[53, 60, 52, 19, 39, 41, 58, 38, 54]),
];

pub const CHANNELS: [(u8, u8); 36] = [
    (1, 8), (2, 14), (3, 60), (4, 63), (5, 15), (6, 59), (7, 31), (9, 52), (10, 20),
    (10, 34), (10, 57), (11, 56), (12, 22), (13, 33), (16, 48), (17, 62), (18, 58), (19, 49),
    (20, 34), (20, 57), (21, 45), (23, 43), (24, 61), (25, 51), (26, 44), (27, 50), (28, 38),
    (29, 46), (30, 41), (32, 54), (34, 57), (35, 36), (37, 40), (39, 55), (42, 53), (47, 64),
];

/// Gene Keys spheres as (key, name, sequence), in derivation order.
pub const SPHERES: [(&str, &str, &str); 16] = [
    ("lifesWork", "Life's Work", "Activation"),
    ("evolution", "Evolution", "Activation"),
    ("radiance", "Radiance", "Activation"),
    ("purpose", "Purpose", "Activation"),
    ("attraction", "Attraction", "Venus"),
    ("iq", "IQ", "Venus"),
    ("eq", "EQ", "Venus"),
    ("sq", "SQ", "Venus"),
    ("core", "Core", "Venus"),
    ("vocation", "Vocation", "Pearl"),
    ("culture", "Culture", "Pearl"),
    ("pearl", "Pearl", "Pearl"),
    ("brand", "Brand", "Activation"),
    ("creativity", "Creativity", "Pearl"),
    ("relating", "Relating", "Venus"),
    ("stability", "Stability", "Pearl"),
];

const LINE_ARCHETYPES: [&str; 6] = [
    "Investigator",
    "Hermit",
    "Martyr",
    "Opportunist",
    "Heretic",
    "Role Model",
];

pub fn sign_id(slug: &str) -> String {
    format!("sign-{slug}")
}

pub fn gate_id(n: u8) -> String {
    format!("gate-{n}")
}

pub fn center_id(slug: &str) -> String {
    format!("center-{slug}")
}

pub fn center_of(gate: u8) -> &'static str {
    CENTER_GATES
        .iter()
        .find(|(_, gates)| gates.contains(&gate))
        .map(|(slug, _)| *slug)
        .expect("every gate has a center")
}

/// First channel partner in channel-table order.
pub fn partner_of(gate: u8) -> Option<u8> {
    CHANNELS.iter().find_map(|&(a, b)| match gate {
        g if g == a => Some(b),
        g if g == b => Some(a),
        _ => None,
    })
}

pub fn sphere_id(key: &str) -> String {
    format!("gk-sphere-{key}")
}

pub fn tropical_sign_of(gate: u8) -> String {
    let start = GateWheel::default().start_degree(gate).expect("gate on wheel");
    sign_id(SIGNS[(start / 30.0).floor() as usize].0)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn signs() -> Value {
    let rows: Vec<Value> = SIGNS
        .iter()
        .enumerate()
        .map(|(i, (slug, element, rulers))| {
            json!({
                "id": sign_id(slug),
                "name": capitalize(slug),
                "orderInZodiac": i + 1,
                "elementId": format!("element-{element}"),
                "rulingPlanetIds": rulers,
                "houseRuled": format!("house-{}", i + 1),
                "opposingSignId": sign_id(SIGNS[(i + 6) % 12].0),
            })
        })
        .collect();
    Value::Array(rows)
}

fn planets() -> Value {
    let rows: Vec<Value> = PLANETS
        .iter()
        .map(|p| {
            let ruled: Vec<String> = SIGNS
                .iter()
                .filter(|(_, _, rulers)| rulers.contains(p))
                .map(|(slug, _, _)| sign_id(slug))
                .collect();
            json!({ "id": p, "name": capitalize(p), "signsRuled": ruled })
        })
        .collect();
    Value::Array(rows)
}

fn points() -> Value {
    json!([
        { "id": "north-node", "name": "North Node", "symbol": "☊" },
        { "id": "ascendant", "name": "Ascendant", "archetype": "The Mask" },
    ])
}

fn houses() -> Value {
    let rows: Vec<Value> = SIGNS
        .iter()
        .enumerate()
        .map(|(i, (slug, _, rulers))| {
            json!({
                "id": format!("house-{}", i + 1),
                "name": format!("House {}", i + 1),
                "houseNumber": i + 1,
                "rulingSignId": sign_id(slug),
                "rulingPlanetId": rulers[0],
            })
        })
        .collect();
    Value::Array(rows)
}

fn elements() -> Value {
    let rows: Vec<Value> = ["fire", "earth", "air", "water"]
        .iter()
        .map(|e| json!({ "id": format!("element-{e}"), "name": capitalize(e) }))
        .collect();
    Value::Array(rows)
}

fn aspects() -> Value {
    json!([
        { "id": "conjunction", "name": "Conjunction", "symbol": "☌", "angle": 0.0 },
        { "id": "sextile", "name": "Sextile", "symbol": "⚹", "angle": 60.0 },
        { "id": "square", "name": "Square", "symbol": "□", "angle": 90.0 },
        { "id": "trine", "name": "Trine", "symbol": "△", "angle": 120.0 },
        { "id": "opposition", "name": "Opposition", "symbol": "☍", "angle": 180.0 },
        { "id": "quincunx", "name": "Quincunx", "angle": 150.0 },
    ])
}

fn configurations() -> Value {
    json!([
        { "id": "grand-trine", "name": "Grand Trine", "requiredAspectIds": ["trine"] },
        { "id": "t-square", "name": "T-Square", "requiredAspectIds": ["square", "opposition"] },
    ])
}

fn decans() -> Value {
    let mut rows = Vec::new();
    for (slug, _, rulers) in SIGNS {
        for n in 1..=3u8 {
            rows.push(json!({
                "id": format!("decan-{slug}-{n}"),
                "signId": sign_id(slug),
                "decanNumber": n,
                "rulerPlanetId": rulers[0],
            }));
        }
    }
    Value::Array(rows)
}

/// Gate rows with `degreeStart`/`degreeEnd` taken from `wheel`.
pub fn hd_gates_on(wheel: &GateWheel) -> Value {
    let rows: Vec<Value> = (1..=64u8)
        .map(|n| {
            let start = wheel.start_degree(n).expect("gate on wheel");
            json!({
                "id": gate_id(n),
                "name": format!("Gate {n}"),
                "gateNumber": n,
                "centerId": center_id(center_of(n)),
                "channelGateId": partner_of(n).map(gate_id),
                "tropicalSignId": tropical_sign_of(n),
                "geneKeyId": format!("gene-key-{n}"),
                "degreeStart": start,
                "degreeEnd": (start + GATE_ARC) % 360.0,
                "keywords": [format!("gate{n}")],
            })
        })
        .collect();
    Value::Array(rows)
}

fn hd_gates() -> Value {
    hd_gates_on(&GateWheel::default())
}

fn dignities() -> Value {
    json!([
        { "id": "dignity-sun-leo", "planetId": "sun", "signId": "sign-leo", "dignityType": "Domicile" },
        { "id": "dignity-sun-aries", "planetId": "sun", "signId": "sign-aries", "dignityType": "Exaltation" },
        { "id": "dignity-sun-aquarius", "planetId": "sun", "signId": "sign-aquarius", "dignityName": "Detriment" },
        { "id": "dignity-sun-libra", "planetId": "sun", "signId": "sign-libra", "dignityType": "Fall" },
        { "id": "dignity-moon-cancer", "planetId": "moon", "signId": "sign-cancer", "dignityType": "Domicile" },
    ])
}

fn hd_gates_72() -> Value {
    json!([
        {
            "id": "lo-gate-1", "segmentNumber": 1, "tropicalSignId": "sign-aries",
            "degreeStart": 0.0, "degreeEnd": 5.0, "overlapping64GateSegment": 25,
            "name": "The Spark"
        },
        {
            "id": "lo-gate-2", "segmentNumber": 2, "tropicalSignId": "sign-aries",
            "degreeStart": 5.0, "degreeEnd": 10.0, "overlapping64GateSegment": 17
        },
        {
            "id": "lo-gate-72", "segmentNumber": 72, "tropicalSignId": "sign-pisces",
            "degreeStart": 355.0, "degreeEnd": 0.0, "overlapping64GateSegment": 36,
            "isMasterGate": true
        },
    ])
}

fn hd_centers() -> Value {
    let rows: Vec<Value> = CENTER_GATES
        .iter()
        .map(|(slug, gates)| {
            let gate_ids: Vec<String> = gates.iter().copied().map(gate_id).collect();
            json!({ "id": center_id(slug), "name": format!("{} Center", capitalize(slug)), "gateIds": gate_ids })
        })
        .collect();
    Value::Array(rows)
}

fn hd_channels() -> Value {
    let rows: Vec<Value> = CHANNELS
        .iter()
        .enumerate()
        .map(|(i, &(a, b))| {
            json!({
                "id": format!("channel-{a}-{b}"),
                "name": format!("Channel {a}-{b}"),
                "channelNumber": i + 1,
                "gate1Id": gate_id(a),
                "gate2Id": gate_id(b),
                "gate1Number": a,
                "gate2Number": b,
                "center1Id": center_id(center_of(a)),
                "center2Id": center_id(center_of(b)),
            })
        })
        .collect();
    Value::Array(rows)
}

fn hd_authorities() -> Value {
    json!([
        { "id": "authority-emotional", "name": "Emotional Authority", "centerId": "center-solar-plexus" },
        { "id": "authority-sacral", "name": "Sacral Authority", "centerId": "center-sacral" },
    ])
}

fn hd_profiles() -> Value {
    json!([
        {
            "id": "profile-1-3", "name": "1/3 Investigator Martyr",
            "personalityLine": 1, "designLine": 3,
            "personalityLineId": "line-1", "designLineId": "line-3"
        },
        {
            "id": "profile-6-2", "name": "6/2 Role Model Hermit",
            "personalityLine": 6, "designLine": 2,
            "personalityLineId": "line-6", "designLineId": "line-2"
        },
    ])
}

fn hd_lines() -> Value {
    let rows: Vec<Value> = LINE_ARCHETYPES
        .iter()
        .enumerate()
        .map(|(i, archetype)| {
            json!({
                "id": format!("line-{}", i + 1),
                "name": format!("Line {}", i + 1),
                "lineNumber": i + 1,
                "archetype": archetype,
            })
        })
        .collect();
    Value::Array(rows)
}

fn codon_ring_of(n: u8) -> Option<&'static str> {
    match n {
        1 | 14 => Some("ring-of-fire"),
        2 | 8 => Some("ring-of-water"),
        _ => None,
    }
}

fn gene_keys() -> Value {
    let wheel = GateWheel::default();
    let rows: Vec<Value> = (1..=64u8)
        .map(|n| {
            let position = wheel.position_of(n).expect("gate on wheel");
            let partner = wheel.order()[(position + 32) % 64];
            json!({
                "id": format!("gene-key-{n}"),
                "name": format!("Gene Key {n}"),
                "keyNumber": n,
                "shadow": { "name": format!("Shadow {n}") },
                "gift": { "name": format!("Gift {n}") },
                "siddhi": { "name": format!("Siddhi {n}") },
                "programmingPartnerId": format!("gene-key-{partner}"),
                "codonRingId": codon_ring_of(n),
                "hdGateId": gate_id(n),
                "tropicalSignId": tropical_sign_of(n),
            })
        })
        .collect();
    Value::Array(rows)
}

fn sequence_id(sequence: &str) -> String {
    format!("{}-sequence", sequence.to_lowercase())
}

fn gk_spheres() -> Value {
    let partner = |key: &str| match key {
        "lifesWork" => Some(sphere_id("evolution")),
        "evolution" => Some(sphere_id("lifesWork")),
        "radiance" => Some(sphere_id("purpose")),
        "purpose" => Some(sphere_id("radiance")),
        _ => None,
    };
    let rows: Vec<Value> = SPHERES
        .iter()
        .map(|&(key, name, sequence)| {
            let order = SPHERES
                .iter()
                .filter(|(_, _, s)| *s == sequence)
                .position(|(k, _, _)| *k == key)
                .expect("sphere in its sequence")
                + 1;
            json!({
                "id": sphere_id(key),
                "name": name,
                "sequence": sequence,
                "sequenceOrder": order,
                "partnerSphere": partner(key),
                "keywords": [key],
            })
        })
        .collect();
    Value::Array(rows)
}

fn gk_sequences() -> Value {
    let rows: Vec<Value> = ["Activation", "Venus", "Pearl"]
        .iter()
        .enumerate()
        .map(|(i, sequence)| {
            let spheres: Vec<String> = SPHERES
                .iter()
                .filter(|(_, _, s)| s == sequence)
                .map(|(k, _, _)| sphere_id(k))
                .collect();
            json!({
                "id": sequence_id(sequence),
                "name": format!("The {sequence} Sequence"),
                "sequenceOrder": i + 1,
                "spheres": spheres,
            })
        })
        .collect();
    Value::Array(rows)
}

fn codon_rings() -> Value {
    json!([
        { "id": "ring-of-fire", "name": "The Ring of Fire", "geneKeyIds": ["gene-key-1", "gene-key-14"] },
        { "id": "ring-of-water", "name": "The Ring of Water", "geneKeyIds": ["gene-key-2", "gene-key-8"] },
    ])
}

fn chakras() -> Value {
    json!([
        { "id": "chakra-root", "name": "Root", "number": 1,
          "relatedSigns": ["sign-capricorn"], "relatedHDCenters": ["center-root"] },
        { "id": "chakra-sacral", "name": "Sacral", "number": 2,
          "relatedSigns": ["sign-cancer", "sign-scorpio"], "relatedHDCenters": ["center-sacral"] },
        { "id": "chakra-solar-plexus", "name": "Solar Plexus", "number": 3,
          "relatedSigns": ["sign-aries", "sign-leo"],
          "relatedHDCenters": ["center-solar-plexus", "center-spleen"] },
        { "id": "chakra-heart", "name": "Heart", "number": 4,
          "relatedSigns": ["sign-taurus", "sign-libra"], "relatedHDCenters": ["center-g", "center-heart"] },
        { "id": "chakra-throat", "name": "Throat", "number": 5,
          "relatedSigns": ["sign-gemini", "sign-virgo"], "relatedHDCenters": ["center-throat"] },
        { "id": "chakra-third-eye", "name": "Third Eye", "number": 6,
          "relatedSigns": ["sign-sagittarius", "sign-pisces"], "relatedHDCenters": ["center-ajna"] },
        { "id": "chakra-crown", "name": "Crown", "number": 7,
          "relatedSigns": ["sign-aquarius"], "relatedHDCenters": ["center-head"], "relatedGates": [64] },
    ])
}

fn numerology() -> Value {
    json!([
        { "id": "numerology-1", "name": "One", "number": 1, "planet": "Sun", "chakraId": "chakra-root" },
        { "id": "numerology-2", "name": "Two", "number": 2, "planet": "Moon", "chakraId": "chakra-sacral" },
        { "id": "numerology-11", "name": "Eleven", "number": 11, "planet": "Neptune", "isMasterNumber": true },
    ])
}

/// Every table file, by file stem.
pub fn table_files() -> Vec<(&'static str, Value)> {
    vec![
        ("signs", signs()),
        ("planets", planets()),
        ("points", points()),
        ("houses", houses()),
        ("elements", elements()),
        ("aspects", aspects()),
        ("configurations", configurations()),
        ("decans", decans()),
        ("dignities", dignities()),
        ("hd-gates", hd_gates()),
        ("hd-gates-72", hd_gates_72()),
        ("hd-centers", hd_centers()),
        ("hd-channels", hd_channels()),
        ("hd-authorities", hd_authorities()),
        ("hd-profiles", hd_profiles()),
        ("hd-lines", hd_lines()),
        ("gene-keys", gene_keys()),
        ("gk-spheres", gk_spheres()),
        ("gk-sequences", gk_sequences()),
        ("codon-rings", codon_rings()),
        ("chakras", chakras()),
        ("numerology", numerology()),
    ]
}

pub fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub fn write_fixture(dir: &Path) {
    for (stem, value) in table_files() {
        write_json(&dir.join(format!("{stem}.json")), &value);
    }
}

pub fn tables() -> Arc<ReferenceTables> {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    Arc::new(ReferenceTables::load_dir(dir.path()).expect("fixture loads"))
}

pub fn registry() -> EntityRegistry {
    EntityRegistry::new(tables())
}

/// A profile touching every derivation path. Gate 25 is active in both personality and
/// design, and 25-51 is a complete channel.
pub fn profile_json(id: &str) -> Value {
    json!({
        "profileVersion": 2,
        "meta": { "id": id, "name": "Sample", "dateOfBirth": "1990-04-05" },
        "placements": [
            { "id": "sun", "planetId": "sun", "signId": "sign-aries", "houseId": "house-1",
              "decanId": "decan-aries-2", "dignityId": "dignity-sun-aries",
              "degree": 15.0, "minute": 30.0, "isChartRuler": "traditional" },
            { "id": "moon", "planetId": "moon", "signId": "sign-cancer", "houseId": "house-4",
              "degree": 3.0, "minute": 0.0 },
            { "id": "mercury", "planetId": "mercury", "signId": "sign-aries", "houseId": "house-1",
              "degree": 28.0, "minute": 15.0, "retrograde": true }
        ],
        "aspects": {
            "planetary": [
                { "aspectId": "square", "planet1Id": "sun", "planet2Id": "moon",
                  "orbDegree": 2.0, "orbMinute": 30.0, "direction": "Applying" },
                { "aspectId": "conjunction", "planet1Id": "sun", "planet2Id": "mercury",
                  "orbDegree": 4.0 }
            ],
            "other": [
                { "aspectId": "trine", "planet1Id": "moon", "planet2Id": "mercury", "orbDegree": 1.0 },
                { "aspectId": "square", "planet1Id": "sun", "planet2Id": "moon", "orbDegree": 9.0 }
            ]
        },
        "configurations": [
            { "configurationId": "t-square", "placementIds": ["sun", "moon", "mercury"] }
        ],
        "geneKeysProfile": {
            "lifesWork": { "sphereName": "Life's Work", "geneKeyNumber": 25, "line": 1,
                           "planetarySource": "Natal Sun" },
            "evolution": { "sphereName": "Evolution", "geneKeyNumber": 46, "line": 1,
                           "planetarySource": "Natal Earth" },
            "radiance": { "sphereName": "Radiance", "geneKeyNumber": 10, "line": 4,
                          "planetarySource": "Design Sun" }
        },
        "humanDesignProfile": {
            "type": "Generator",
            "authority": "Sacral",
            "profile": "1/3",
            "personalityGates": [
                { "gateNumber": 25, "line": 1, "planet": "Sun" },
                { "gateNumber": 51, "line": 3, "planet": "Moon" },
                { "gateNumber": 25, "line": 1, "planet": "Earth" }
            ],
            "designGates": [
                { "gateNumber": 25, "line": 4, "planet": "Sun" },
                { "gateNumber": 10, "line": 2, "planet": "North Node" }
            ],
            "definedCenterIds": ["center-g", "center-heart"],
            "definedChannelIds": ["channel-25-51", "channel-99-100"]
        }
    })
}

pub fn profile(id: &str) -> CosmicProfile {
    CosmicProfile::from_json(&profile_json(id).to_string()).expect("fixture profile parses")
}
