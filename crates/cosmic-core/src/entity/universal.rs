//! Projection of the reference tables into universal [`EntityInfo`]s.

use super::{ids, EntityData, EntityInfo, EntitySystem};
use crate::knowledge::{AspectNature, ReferenceTables};
use std::sync::Arc;

fn ordinal(n: u8) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn owned(items: &[String]) -> impl Iterator<Item = Option<&str>> {
    items.iter().map(|s| Some(s.as_str()))
}

/// Every universal entity, grouped by system: astrology, Human Design, Gene Keys, shared.
pub fn universal_entities(tables: &ReferenceTables) -> Vec<EntityInfo> {
    let mut out = Vec::with_capacity(tables.total_records());
    astrology(tables, &mut out);
    human_design(tables, &mut out);
    gene_keys(tables, &mut out);
    shared(tables, &mut out);
    out
}

fn astrology(tables: &ReferenceTables, out: &mut Vec<EntityInfo>) {
    use EntitySystem::Astrology;

    for planet in tables.planets.iter() {
        out.push(EntityInfo {
            id: planet.id.clone(),
            name: planet.name.clone(),
            symbol: planet.symbol.clone(),
            system: Astrology,
            description: planet.description.clone(),
            route_path: format!("/planets/{}", planet.id),
            keywords: ids(
                [planet.archetype.as_deref(), planet.planet_type.as_deref()]
                    .into_iter()
                    .chain(owned(&planet.signs_ruled)),
            ),
            related_ids: ids(owned(&planet.signs_ruled)),
            data: EntityData::Planet(Arc::clone(planet)),
        });
    }

    for sign in tables.signs.iter() {
        out.push(EntityInfo {
            id: sign.id.clone(),
            name: sign.name.clone(),
            symbol: sign.symbol.clone(),
            system: Astrology,
            description: sign.description.clone(),
            route_path: format!("/signs/{}", sign.id),
            keywords: ids([
                sign.element_id.as_deref(),
                sign.sign_modality.as_deref(),
                sign.key_phrase.as_deref(),
            ]),
            related_ids: ids(
                [sign.element_id.as_deref()]
                    .into_iter()
                    .chain(owned(&sign.ruling_planet_ids))
                    .chain([sign.house_ruled.as_deref(), sign.opposing_sign_id.as_deref()]),
            ),
            data: EntityData::Sign(Arc::clone(sign)),
        });
    }

    for house in tables.houses.iter() {
        out.push(EntityInfo {
            id: house.id.clone(),
            name: house.name.clone(),
            symbol: house.symbol.clone(),
            system: Astrology,
            description: house.description.clone(),
            route_path: format!("/houses/{}", house.id),
            keywords: ids(
                [house.house_type.as_deref()]
                    .into_iter()
                    .chain(owned(&house.life_area_focus)),
            ),
            related_ids: ids([house.ruling_sign_id.as_deref(), house.ruling_planet_id.as_deref()]),
            data: EntityData::House(Arc::clone(house)),
        });
    }

    for element in tables.elements.iter() {
        out.push(EntityInfo {
            id: element.id.clone(),
            name: element.name.clone(),
            symbol: element.symbol.clone(),
            system: Astrology,
            description: element.description.clone(),
            route_path: format!("/elements/{}", element.id),
            keywords: ids([element.element_category.as_deref(), element.core_quality.as_deref()]),
            related_ids: Vec::new(),
            data: EntityData::Element(Arc::clone(element)),
        });
    }

    for aspect in tables.aspects.iter() {
        let nature = aspect
            .nature
            .unwrap_or_else(|| AspectNature::for_aspect_id(&aspect.id));
        let angle = format!("{}°", aspect.angle);
        out.push(EntityInfo {
            id: aspect.id.clone(),
            name: aspect.name.clone(),
            symbol: aspect.symbol.clone(),
            system: Astrology,
            description: aspect.description.clone(),
            route_path: format!("/aspects/{}", aspect.id),
            keywords: ids([Some(nature.as_str()), Some(angle.as_str())]),
            related_ids: Vec::new(),
            data: EntityData::Aspect(Arc::clone(aspect)),
        });
    }

    for config in tables.configurations.iter() {
        out.push(EntityInfo {
            id: config.id.clone(),
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            system: Astrology,
            description: config.description.clone(),
            route_path: format!("/configurations/{}", config.id),
            keywords: ids(
                [config.nature.as_deref(), config.keyword.as_deref()]
                    .into_iter()
                    .chain(owned(&config.required_aspect_ids)),
            ),
            related_ids: config.required_aspect_ids.clone(),
            data: EntityData::Configuration(Arc::clone(config)),
        });
    }

    for point in tables.points.iter() {
        out.push(EntityInfo {
            id: point.id.clone(),
            name: point.name.clone(),
            symbol: point.symbol.clone(),
            system: Astrology,
            description: point.description.clone(),
            route_path: format!("/points/{}", point.id),
            keywords: ids([point.archetype.as_deref()]),
            related_ids: Vec::new(),
            data: EntityData::Point(Arc::clone(point)),
        });
    }

    for decan in tables.decans.iter() {
        let sign = tables.signs.get(&decan.sign_id);
        let sign_name = sign.map_or(decan.sign_id.as_str(), |s| s.name.as_str());
        let dimension = decan.dimension();
        out.push(EntityInfo {
            id: decan.id.clone(),
            name: format!("{sign_name} {} Decan", ordinal(decan.decan_number)),
            symbol: sign.and_then(|s| s.symbol.clone()),
            system: Astrology,
            description: decan.description.clone(),
            route_path: format!("/signs/{}#decan-{}", decan.sign_id, decan.decan_number),
            keywords: ids([
                decan.keyword.as_deref(),
                decan.degrees.as_deref(),
                dimension.as_ref().map(|d| d.as_str()),
            ]),
            related_ids: ids([
                Some(decan.sign_id.as_str()),
                Some(decan.ruler_planet_id.as_str()),
                decan.subruler_sign_id.as_deref(),
            ]),
            data: EntityData::Decan(Arc::clone(decan)),
        });
    }

    for dignity in tables.dignities.iter() {
        let planet = tables.planets.get(&dignity.planet_id);
        let sign = tables.signs.get(&dignity.sign_id);
        let symbol: String = [
            planet.and_then(|p| p.symbol.as_deref()),
            sign.and_then(|s| s.symbol.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect();
        out.push(EntityInfo {
            id: dignity.id.clone(),
            name: format!(
                "{} in {} ({})",
                planet.map_or(dignity.planet_id.as_str(), |p| p.name.as_str()),
                sign.map_or(dignity.sign_id.as_str(), |s| s.name.as_str()),
                dignity.dignity_type.as_str()
            ),
            symbol: Some(symbol).filter(|s| !s.is_empty()),
            system: Astrology,
            description: dignity.description.clone(),
            route_path: format!("/dignities/{}", dignity.id),
            keywords: vec![dignity.dignity_type.as_str().to_string()],
            related_ids: vec![dignity.planet_id.clone(), dignity.sign_id.clone()],
            data: EntityData::Dignity(Arc::clone(dignity)),
        });
    }
}

fn human_design(tables: &ReferenceTables, out: &mut Vec<EntityInfo>) {
    use EntitySystem::HumanDesign;

    for authority in tables.hd_authorities.iter() {
        out.push(EntityInfo {
            id: authority.id.clone(),
            name: authority.name.clone(),
            symbol: authority.symbol.clone(),
            system: HumanDesign,
            description: authority.description.clone(),
            route_path: format!("/human-design/authorities/{}", authority.id),
            keywords: authority.keywords.clone(),
            related_ids: ids([authority.center_id.as_deref()]),
            data: EntityData::HdAuthority(Arc::clone(authority)),
        });
    }

    for center in tables.hd_centers.iter() {
        out.push(EntityInfo {
            id: center.id.clone(),
            name: center.name.clone(),
            symbol: center.symbol.clone(),
            system: HumanDesign,
            description: center.description.clone(),
            route_path: format!("/human-design/centers/{}", center.id),
            keywords: ids([center.center_type.as_deref(), center.biological_correlate.as_deref()]),
            related_ids: center.gate_ids.clone(),
            data: EntityData::HdCenter(Arc::clone(center)),
        });
    }

    for gate in tables.hd_gates.iter() {
        out.push(EntityInfo {
            id: gate.id.clone(),
            name: gate.name.clone(),
            symbol: gate.symbol.clone(),
            system: HumanDesign,
            description: gate.description.clone(),
            route_path: format!("/human-design/gates/{}", gate.id),
            keywords: gate.keywords.clone(),
            related_ids: ids([
                gate.center_id.as_deref(),
                gate.gene_key_id.as_deref(),
                gate.channel_gate_id.as_deref(),
                gate.tropical_sign_id.as_deref(),
            ]),
            data: EntityData::HdGate(Arc::clone(gate)),
        });
    }

    for channel in tables.hd_channels.iter() {
        out.push(EntityInfo {
            id: channel.id.clone(),
            name: channel.name.clone(),
            symbol: channel.symbol.clone(),
            system: HumanDesign,
            description: channel.description.clone(),
            route_path: format!("/human-design/channels/{}", channel.id),
            keywords: channel.keywords.clone(),
            related_ids: ids([
                Some(channel.gate1_id.as_str()),
                Some(channel.gate2_id.as_str()),
                Some(channel.center1_id.as_str()),
                Some(channel.center2_id.as_str()),
            ]),
            data: EntityData::HdChannel(Arc::clone(channel)),
        });
    }

    for profile in tables.hd_profiles.iter() {
        out.push(EntityInfo {
            id: profile.id.clone(),
            name: profile.name.clone(),
            symbol: profile.symbol.clone(),
            system: HumanDesign,
            description: profile.description.clone(),
            route_path: format!("/human-design/profiles/{}", profile.id),
            keywords: profile.keywords.clone(),
            related_ids: vec![profile.personality_line_id.clone(), profile.design_line_id.clone()],
            data: EntityData::HdProfile(Arc::clone(profile)),
        });
    }

    for line in tables.hd_lines.iter() {
        out.push(EntityInfo {
            id: line.id.clone(),
            name: line.name.clone(),
            symbol: line.symbol.clone(),
            system: HumanDesign,
            description: line.description.clone(),
            route_path: format!("/human-design/lines/{}", line.id),
            keywords: ids([line.archetype.as_deref()].into_iter().chain(owned(&line.keywords))),
            related_ids: Vec::new(),
            data: EntityData::HdLine(Arc::clone(line)),
        });
    }

    for segment in tables.hd_gates_72.iter() {
        let overlapping = tables
            .hd_gates
            .find(|g| g.gate_number == segment.overlapping_64_gate_segment);
        let segment_tag = format!("segment-{}", segment.segment_number);
        out.push(EntityInfo {
            id: segment.id.clone(),
            name: segment
                .name
                .clone()
                .unwrap_or_else(|| format!("Segment {}", segment.segment_number)),
            symbol: None,
            system: HumanDesign,
            description: segment.description.clone(),
            route_path: format!("/library/lost-octave/{}", segment.id),
            keywords: ids([
                segment.start_sign.as_deref(),
                Some(segment_tag.as_str()),
                segment.tropical_sign_id.as_deref(),
            ]),
            related_ids: ids([overlapping.map(|g| g.id.as_str())]),
            data: EntityData::LoGate(Arc::clone(segment)),
        });
    }
}

fn gene_keys(tables: &ReferenceTables, out: &mut Vec<EntityInfo>) {
    use EntitySystem::GeneKeys;

    for key in tables.gene_keys.iter() {
        out.push(EntityInfo {
            id: key.id.clone(),
            name: key.name.clone(),
            symbol: key.symbol.clone(),
            system: GeneKeys,
            description: key.description.clone(),
            route_path: format!("/gene-keys/{}", key.id),
            keywords: ids([
                Some(key.shadow.name.as_str()),
                Some(key.gift.name.as_str()),
                Some(key.siddhi.name.as_str()),
            ]),
            related_ids: ids([
                key.hd_gate_id.as_deref(),
                key.programming_partner_id.as_deref(),
                key.codon_ring_id.as_deref(),
                key.tropical_sign_id.as_deref(),
            ]),
            data: EntityData::GeneKey(Arc::clone(key)),
        });
    }

    for sphere in tables.gk_spheres.iter() {
        let sequence_id = sphere.sequence_id();
        out.push(EntityInfo {
            id: sphere.id.clone(),
            name: sphere.name.clone(),
            symbol: sphere.symbol.clone(),
            system: GeneKeys,
            description: sphere.description.clone().or_else(|| sphere.theme.clone()),
            route_path: format!("/gene-keys/spheres/{}", sphere.id),
            keywords: ids(
                [sphere.sequence.as_deref(), sphere.planetary_source.as_deref()]
                    .into_iter()
                    .chain(owned(&sphere.keywords)),
            ),
            related_ids: ids([sphere.partner_sphere.as_deref(), sequence_id.as_deref()]),
            data: EntityData::GkSphere(Arc::clone(sphere)),
        });
    }

    for sequence in tables.gk_sequences.iter() {
        out.push(EntityInfo {
            id: sequence.id.clone(),
            name: sequence.name.clone(),
            symbol: sequence.symbol.clone(),
            system: GeneKeys,
            description: sequence
                .description
                .clone()
                .or_else(|| sequence.theme.clone()),
            route_path: format!("/gene-keys/sequences/{}", sequence.id),
            keywords: sequence.keywords.clone(),
            related_ids: sequence.spheres.clone(),
            data: EntityData::GkSequence(Arc::clone(sequence)),
        });
    }

    for ring in tables.codon_rings.iter() {
        out.push(EntityInfo {
            id: ring.id.clone(),
            name: ring.name.clone(),
            symbol: ring.symbol.clone(),
            system: GeneKeys,
            description: ring.description.clone(),
            route_path: format!("/gene-keys/codon-rings/{}", ring.id),
            keywords: ids([ring.theme.as_deref()].into_iter().chain(owned(&ring.primary_themes))),
            related_ids: ring.gene_key_ids.clone(),
            data: EntityData::CodonRing(Arc::clone(ring)),
        });
    }
}

fn shared(tables: &ReferenceTables, out: &mut Vec<EntityInfo>) {
    use EntitySystem::Shared;

    for number in tables.numerology.iter() {
        // `planet` is a display name ("Sun"); link it only when it names a known body.
        let planet_id = number
            .planet
            .as_deref()
            .map(crate::profile::planet_id_from_name)
            .filter(|id| tables.planets.contains(id) || tables.points.contains(id));
        out.push(EntityInfo {
            id: number.id.clone(),
            name: number.name.clone(),
            symbol: number.symbol.clone(),
            system: Shared,
            description: number
                .description
                .clone()
                .or_else(|| number.harmonic_tone.clone()),
            route_path: format!("/numerology/{}", number.id),
            keywords: ids(
                [number.archetype.as_deref(), number.harmonic_tone.as_deref()]
                    .into_iter()
                    .chain(owned(&number.keywords)),
            ),
            related_ids: ids([number.chakra_id.as_deref(), planet_id.as_deref()]),
            data: EntityData::NumerologyNumber(Arc::clone(number)),
        });
    }

    for chakra in tables.chakras.iter() {
        out.push(EntityInfo {
            id: chakra.id.clone(),
            name: chakra.name.clone(),
            symbol: chakra.symbol.clone(),
            system: Shared,
            description: chakra
                .description
                .clone()
                .or_else(|| chakra.life_theme.clone()),
            route_path: format!("/chakras/{}", chakra.id),
            keywords: ids(
                [
                    chakra.sanskrit_name.as_deref(),
                    chakra.archetype.as_deref(),
                    chakra.element.as_deref(),
                ]
                .into_iter()
                .chain(owned(&chakra.keywords)),
            ),
            related_ids: ids(owned(&chakra.related_signs).chain(owned(&chakra.related_hd_centers))),
            data: EntityData::Chakra(Arc::clone(chakra)),
        });
    }
}
