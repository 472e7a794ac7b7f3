//! Profile -> profile-scoped entities.
//!
//! Derivation order, which is also the iteration order of the result and therefore the
//! tie-break for every first-match lookup: placements, aspects (planetary then other),
//! configurations, Gene Keys spheres, HD personality activations, HD design activations,
//! defined channels, personal context. When two inputs produce the same id the first one
//! is kept.

use super::{CosmicProfile, GateActivation, HumanDesignProfile, NatalPlacement, PersonalContext};
use crate::correspondence::{
    get_dignity, get_gate_by_degree, get_gate_by_number, get_gene_key_by_number,
    sign_position_to_absolute_degree,
};
use crate::entity::{
    ids, Consciousness, EntityData, EntityInfo, EntitySystem, GkPlacement, GkSphereKey,
    HdPlacement, OccupationContext, ProfileAspect, ProfileChannel, ProfileConfiguration,
    ProfileEntityId, ProfilePlacement, ProfileScope, PERSONAL_CONTEXT_PREFIX,
};
use crate::knowledge::{AspectNature, ReferenceTables};
use indexmap::IndexMap;
use std::sync::Arc;

/// The derived entities of one profile, keyed by full id in derivation order.
#[derive(Debug, Clone, Default)]
pub struct ProfileEntities {
    pub profile_id: String,
    pub entities: IndexMap<String, Arc<EntityInfo>>,
    /// Inputs dropped because an earlier one produced the same id.
    pub duplicates: usize,
}

impl ProfileEntities {
    fn insert(&mut self, entity: EntityInfo) {
        if self.entities.contains_key(&entity.id) {
            tracing::debug!(
                target: "atlas::profile",
                id = %entity.id,
                "Duplicate profile entity id; keeping the first"
            );
            self.duplicates += 1;
            return;
        }
        self.entities.insert(entity.id.clone(), Arc::new(entity));
    }

    fn hd_placement_id(&self, gate_number: u8) -> Option<String> {
        let find = |wanted: Consciousness| {
            self.entities.values().find_map(|e| match e.as_hd_placement() {
                Some(p) if p.gate_number == gate_number && p.consciousness == wanted => {
                    Some(e.id.clone())
                }
                _ => None,
            })
        };
        find(Consciousness::Personality).or_else(|| find(Consciousness::Design))
    }
}

/// Planets first, then points (the ascendant and nodes live in the points table).
fn body_name<'a>(tables: &'a ReferenceTables, id: &'a str) -> (&'a str, Option<&'a str>) {
    if let Some(p) = tables.planets.get(id) {
        (p.name.as_str(), p.symbol.as_deref())
    } else if let Some(p) = tables.points.get(id) {
        (p.name.as_str(), p.symbol.as_deref())
    } else {
        (id, None)
    }
}

fn body_exists(tables: &ReferenceTables, id: &str) -> bool {
    tables.planets.contains(id) || tables.points.contains(id)
}

fn line_id(tables: &ReferenceTables, line: u8) -> Option<String> {
    tables
        .hd_lines
        .find(|l| l.line_number == line)
        .map(|l| l.id.clone())
}

/// Derive every profile-scoped entity. Profiles without an id use `fallback_profile_id`.
pub fn derive_profile_entities(
    tables: &ReferenceTables,
    profile: &CosmicProfile,
    fallback_profile_id: &str,
) -> ProfileEntities {
    let mut out = ProfileEntities {
        profile_id: profile.id().unwrap_or(fallback_profile_id).to_string(),
        ..Default::default()
    };

    for placement in &profile.placements {
        let entity = placement_entity(tables, &out.profile_id, placement);
        out.insert(entity);
    }
    if let Some(aspects) = &profile.aspects {
        for aspect in aspects.planetary.iter().chain(&aspects.other) {
            let entity = aspect_entity(tables, &out.profile_id, aspect);
            out.insert(entity);
        }
    }
    for (index, config) in profile.configurations.iter().enumerate() {
        let entity = configuration_entity(tables, &out.profile_id, profile, index, config);
        out.insert(entity);
    }
    if let Some(gk) = &profile.gene_keys_profile {
        for key in GkSphereKey::ALL {
            if let Some(sphere) = gk.sphere(key) {
                let entity = gk_entity(tables, &out.profile_id, key, sphere);
                out.insert(entity);
            }
        }
    }
    if let Some(hd) = &profile.human_design_profile {
        for activation in &hd.personality_gates {
            let entity = hd_entity(
                tables,
                &out.profile_id,
                hd,
                activation,
                Consciousness::Personality,
            );
            out.insert(entity);
        }
        for activation in &hd.design_gates {
            let entity = hd_entity(
                tables,
                &out.profile_id,
                hd,
                activation,
                Consciousness::Design,
            );
            out.insert(entity);
        }
        for channel_id in &hd.defined_channel_ids {
            match channel_entity(tables, &out, channel_id) {
                Some(entity) => out.insert(entity),
                None => {
                    tracing::debug!(
                        target: "atlas::profile",
                        channel_id = %channel_id,
                        "Defined channel not in channel table; skipped"
                    )
                }
            }
        }
    }
    if let Some(ctx) = &profile.personal_context {
        for entity in personal_context_entities(tables, ctx) {
            out.insert(entity);
        }
    }

    out
}

/// The `pc-*` overlay entities for a personal context: `pc-occupation` when any occupation
/// is listed, then one `pc-project-<id>` per active project. Ids are not profile-scoped.
pub fn personal_context_entities(
    tables: &ReferenceTables,
    ctx: &PersonalContext,
) -> Vec<EntityInfo> {
    let mut out = Vec::with_capacity(ctx.active_projects.len() + 1);
    let route_path = "/profile/personal-context".to_string();

    if !ctx.occupations.is_empty() {
        let joined = ctx.occupations.join(", ");
        out.push(EntityInfo {
            id: format!("{PERSONAL_CONTEXT_PREFIX}occupation"),
            name: joined.clone(),
            symbol: None,
            system: EntitySystem::Shared,
            description: Some(
                ctx.professional_goals
                    .clone()
                    .filter(|g| !g.is_empty())
                    .unwrap_or(joined),
            ),
            route_path: route_path.clone(),
            keywords: ids(
                ctx.occupations
                    .iter()
                    .chain(&ctx.specializations)
                    .map(|s| Some(s.as_str())),
            ),
            related_ids: Vec::new(),
            data: EntityData::Occupation(OccupationContext {
                occupations: ctx.occupations.clone(),
                specializations: ctx.specializations.clone(),
                professional_goals: ctx.professional_goals.clone(),
            }),
        });
    }

    for project in &ctx.active_projects {
        let key_area = project
            .linked_key_area
            .as_deref()
            .filter(|id| tables.houses.contains(id));
        out.push(EntityInfo {
            id: format!("{PERSONAL_CONTEXT_PREFIX}project-{}", project.id),
            name: project.name.clone(),
            symbol: None,
            system: EntitySystem::Shared,
            description: Some(
                project
                    .description
                    .clone()
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| project.name.clone()),
            ),
            route_path: route_path.clone(),
            keywords: ids([project.status.as_deref(), project.linked_key_area.as_deref()]),
            related_ids: ids([key_area]),
            data: EntityData::PersonalProject(project.clone()),
        });
    }

    out
}

fn placement_entity(
    tables: &ReferenceTables,
    profile_id: &str,
    p: &NatalPlacement,
) -> EntityInfo {
    let (planet_name, planet_symbol) = body_name(tables, &p.planet_id);
    let sign_name = tables
        .signs
        .get(&p.sign_id)
        .map_or(p.sign_id.as_str(), |s| s.name.as_str());
    let house_name = tables
        .houses
        .get(&p.house_id)
        .map_or(p.house_id.as_str(), |h| h.name.as_str());

    let absolute_degree =
        sign_position_to_absolute_degree(tables, &p.sign_id, p.degree, p.minute);
    let at = absolute_degree.and_then(|d| get_gate_by_degree(tables, d));
    // The provider's dignity id when it resolves, else the matrix entry for planet x sign.
    let dignity_id = p
        .dignity_id
        .clone()
        .filter(|id| tables.dignities.contains(id))
        .or_else(|| get_dignity(tables, &p.planet_id, &p.sign_id).map(|d| d.id.clone()));

    let id = ProfileEntityId::placement(profile_id, &p.planet_id).to_string();
    let name = p
        .full_name
        .clone()
        .or_else(|| p.short_name.clone())
        .unwrap_or_else(|| format!("{planet_name} in {sign_name}"));

    EntityInfo {
        name,
        symbol: planet_symbol.map(str::to_string),
        system: EntitySystem::Astrology,
        description: Some(format!(
            "{planet_name} at {}°{}' {sign_name} in the {house_name}",
            p.degree, p.minute
        )),
        route_path: format!("/profile/astrology/placements/{}", p.planet_id),
        keywords: ids([
            Some(p.sign_id.as_str()),
            Some(p.house_id.as_str()),
            Some(p.planet_id.as_str()),
        ]),
        related_ids: ids([
            Some(p.planet_id.as_str()),
            Some(p.sign_id.as_str()),
            Some(p.house_id.as_str()),
            p.decan_id.as_deref(),
            dignity_id.as_deref(),
            at.as_ref().map(|a| a.gate.id.as_str()),
        ]),
        data: EntityData::ProfilePlacement(ProfilePlacement {
            profile_id: profile_id.to_string(),
            planet_id: p.planet_id.clone(),
            sign_id: p.sign_id.clone(),
            house_id: p.house_id.clone(),
            degree: p.degree,
            minute: p.minute,
            retrograde: p.retrograde,
            dignity_id: dignity_id.or_else(|| p.dignity_id.clone()),
            decan_id: p.decan_id.clone(),
            chart_ruler: p.is_chart_ruler,
            absolute_degree,
            hd_gate_number: at.as_ref().map(|a| a.gate.gate_number),
            gene_key_number: at.as_ref().map(|a| a.gate.gate_number),
            hd_line: at.as_ref().map(|a| a.line),
        }),
        id,
    }
}

fn aspect_entity(
    tables: &ReferenceTables,
    profile_id: &str,
    a: &super::NatalAspect,
) -> EntityInfo {
    let aspect = tables.aspects.get(&a.aspect_id);
    let aspect_name = aspect.map_or(a.aspect_id.as_str(), |x| x.name.as_str());
    let (p1_name, _) = body_name(tables, &a.planet1_id);
    let (p2_name, _) = body_name(tables, &a.planet2_id);
    let placement1_id = ProfileEntityId::placement(profile_id, &a.planet1_id).to_string();
    let placement2_id = ProfileEntityId::placement(profile_id, &a.planet2_id).to_string();
    let local = format!("{}-{}-{}", a.planet1_id, a.aspect_id, a.planet2_id);

    EntityInfo {
        id: ProfileEntityId::new(profile_id, ProfileScope::Aspect, local).to_string(),
        name: a
            .full_name
            .clone()
            .unwrap_or_else(|| format!("{p1_name} {aspect_name} {p2_name}")),
        symbol: aspect.and_then(|x| x.symbol.clone()),
        system: EntitySystem::Astrology,
        description: Some(format!(
            "{aspect_name} with orb {}°{}'",
            a.orb_degree, a.orb_minute
        )),
        route_path: format!("/profile/astrology/aspects/{}-{}", a.planet1_id, a.planet2_id),
        keywords: ids([
            Some(a.aspect_id.as_str()),
            Some(a.planet1_id.as_str()),
            Some(a.planet2_id.as_str()),
        ]),
        related_ids: ids([
            Some(a.aspect_id.as_str()),
            Some(a.planet1_id.as_str()),
            Some(a.planet2_id.as_str()),
            Some(placement1_id.as_str()),
            Some(placement2_id.as_str()),
        ]),
        data: EntityData::ProfileAspect(ProfileAspect {
            profile_id: profile_id.to_string(),
            aspect_id: a.aspect_id.clone(),
            planet1_id: a.planet1_id.clone(),
            planet2_id: a.planet2_id.clone(),
            placement1_id,
            placement2_id,
            orb_degree: a.orb_degree,
            orb_minute: a.orb_minute,
            direction: a.direction,
            nature: AspectNature::for_aspect_id(&a.aspect_id),
        }),
    }
}

fn configuration_entity(
    tables: &ReferenceTables,
    profile_id: &str,
    profile: &CosmicProfile,
    index: usize,
    c: &super::NatalConfiguration,
) -> EntityInfo {
    let config = tables.configurations.get(&c.configuration_id);
    let config_name = c
        .full_name
        .clone()
        .or_else(|| config.map(|x| x.name.clone()))
        .unwrap_or_else(|| c.configuration_id.clone());

    let mut planet_ids = Vec::new();
    let mut sign_ids = Vec::new();
    let mut placement_ids = Vec::new();
    for placement_ref in &c.placement_ids {
        match profile.placement(placement_ref) {
            Some(p) => {
                planet_ids.push(p.planet_id.clone());
                sign_ids.push(p.sign_id.clone());
                placement_ids
                    .push(ProfileEntityId::placement(profile_id, &p.planet_id).to_string());
            }
            None => {
                // Provider ids are sometimes already qualified ("p1:sun").
                let local = placement_ref.rsplit(':').next().unwrap_or(placement_ref);
                placement_ids.push(ProfileEntityId::placement(profile_id, local).to_string());
            }
        }
    }

    let involved: Vec<&str> = planet_ids.iter().map(|id| body_name(tables, id).0).collect();
    let related_ids = std::iter::once(c.configuration_id.clone())
        .chain(planet_ids.iter().cloned())
        .chain(sign_ids.iter().cloned())
        .chain(placement_ids.iter().cloned())
        .collect();

    EntityInfo {
        id: ProfileEntityId::new(
            profile_id,
            ProfileScope::Config,
            format!("{}:{index}", c.configuration_id),
        )
        .to_string(),
        name: config_name.clone(),
        symbol: config.and_then(|x| x.symbol.clone()),
        system: EntitySystem::Astrology,
        description: Some(format!("{config_name} involving {}", involved.join(", "))),
        route_path: format!("/profile/astrology/configurations/{}", c.configuration_id),
        keywords: std::iter::once(c.configuration_id.clone())
            .chain(planet_ids.iter().cloned())
            .collect(),
        related_ids,
        data: EntityData::ProfileConfiguration(ProfileConfiguration {
            profile_id: profile_id.to_string(),
            configuration_id: c.configuration_id.clone(),
            configuration_name: config_name,
            placement_ids,
            planet_ids,
            sign_ids,
        }),
    }
}

fn gk_entity(
    tables: &ReferenceTables,
    profile_id: &str,
    key: GkSphereKey,
    sphere: &super::GeneKeySphere,
) -> EntityInfo {
    let gene_key = sphere
        .gene_key_id
        .as_deref()
        .and_then(|id| tables.gene_keys.get(id).cloned())
        .or_else(|| get_gene_key_by_number(tables, sphere.gene_key_number));
    let line_id = line_id(tables, sphere.line);
    let source_planet_id = sphere
        .source_planet_id()
        .filter(|id| body_exists(tables, id));
    let number = sphere.gene_key_number;
    let line = sphere.line;
    let sphere_id = key.sphere_id();
    let sequence = key.sequence();

    let description = match &gene_key {
        Some(k) => format!(
            "{} sphere with {} ({} → {} → {})",
            sphere.sphere_name, k.name, k.shadow.name, k.gift.name, k.siddhi.name
        ),
        None => format!("{} sphere with Gene Key {number}", sphere.sphere_name),
    };
    let gk_tag = format!("gk{number}");

    EntityInfo {
        id: ProfileEntityId::new(profile_id, ProfileScope::Gk, key.as_str()).to_string(),
        name: format!("{}: Gene Key {number}.{line}", sphere.sphere_name),
        symbol: gene_key.as_ref().and_then(|k| k.symbol.clone()),
        system: EntitySystem::GeneKeys,
        description: Some(description),
        route_path: format!("/profile/gene-keys/{}", key.as_str()),
        keywords: ids([
            Some(sphere.sphere_name.as_str()),
            Some(gk_tag.as_str()),
            gene_key.as_ref().map(|k| k.shadow.name.as_str()),
            gene_key.as_ref().map(|k| k.gift.name.as_str()),
            gene_key.as_ref().map(|k| k.siddhi.name.as_str()),
        ]),
        related_ids: ids([
            gene_key.as_ref().map(|k| k.id.as_str()),
            line_id.as_deref(),
            Some(sphere_id.as_str()).filter(|id| tables.gk_spheres.contains(id)),
            Some(sequence.as_str()).filter(|id| tables.gk_sequences.contains(id)),
            source_planet_id.as_deref(),
        ]),
        data: EntityData::ProfileGkPlacement(GkPlacement {
            profile_id: profile_id.to_string(),
            sphere_key: key,
            sphere_name: sphere.sphere_name.clone(),
            sequence,
            sphere_id,
            gene_key_id: gene_key.as_ref().map(|k| k.id.clone()),
            gene_key_number: number,
            line_number: line,
            line_id,
            planetary_source: sphere.planetary_source.clone(),
            is_personality: sphere.is_personality(),
            source_planet_id,
            shadow: gene_key.as_ref().map(|k| k.shadow.clone()).unwrap_or_default(),
            gift: gene_key.as_ref().map(|k| k.gift.clone()).unwrap_or_default(),
            siddhi: gene_key.as_ref().map(|k| k.siddhi.clone()).unwrap_or_default(),
        }),
    }
}

fn hd_entity(
    tables: &ReferenceTables,
    profile_id: &str,
    hd: &HumanDesignProfile,
    activation: &GateActivation,
    consciousness: Consciousness,
) -> EntityInfo {
    let number = activation.gate_number;
    let line = activation.line;
    let gate = get_gate_by_number(tables, number);
    let hd_line = tables.hd_lines.find(|l| l.line_number == line);
    let center = gate
        .as_ref()
        .and_then(|g| g.center_id.as_deref())
        .and_then(|c| tables.hd_centers.get(c));
    let gene_key = gate
        .as_ref()
        .and_then(|g| g.gene_key_id.as_deref())
        .and_then(|id| tables.gene_keys.get(id).cloned())
        .or_else(|| get_gene_key_by_number(tables, number));

    let partner = gate
        .as_ref()
        .and_then(|g| g.channel_gate_id.as_deref())
        .and_then(|id| tables.hd_gates.get(id));
    let is_channel_complete = partner.is_some_and(|p| hd.is_gate_activated(p.gate_number));
    let channel_id = partner
        .filter(|_| is_channel_complete)
        .and_then(|p| {
            hd.defined_channel_ids.iter().find(|id| {
                tables
                    .hd_channels
                    .get(id)
                    .is_some_and(|c| c.connects_gates(number, p.gate_number))
            })
        })
        .cloned();

    let planet_id = activation
        .planet
        .as_deref()
        .map(super::planet_id_from_name)
        .filter(|id| !id.is_empty());
    let resolvable_planet = planet_id.as_deref().filter(|id| body_exists(tables, id));

    let label = match consciousness {
        Consciousness::Personality => "Personality",
        Consciousness::Design => "Design",
    };
    let awareness = match consciousness {
        Consciousness::Personality => "conscious",
        Consciousness::Design => "unconscious",
    };
    let gate_tag = format!("gate{number}");
    let gate_name = gate
        .as_ref()
        .map_or_else(|| format!("Gate {number}"), |g| g.name.clone());
    let archetype = hd_line.and_then(|l| l.archetype.as_deref()).unwrap_or("");

    EntityInfo {
        id: ProfileEntityId::hd(profile_id, number, line, consciousness).to_string(),
        name: format!("Gate {number}.{line} ({label})"),
        symbol: gate.as_ref().and_then(|g| g.symbol.clone()),
        system: EntitySystem::HumanDesign,
        description: Some(format!("{gate_name} - Line {line} ({archetype})")),
        route_path: format!("/profile/human-design/gates/{number}"),
        keywords: ids([
            Some(gate_tag.as_str()),
            hd_line.and_then(|l| l.archetype.as_deref()),
            center.map(|c| c.name.as_str()),
            Some(awareness),
            activation.planet.as_deref(),
        ]),
        related_ids: ids([
            gate.as_ref().map(|g| g.id.as_str()),
            hd_line.map(|l| l.id.as_str()),
            center.map(|c| c.id.as_str()),
            resolvable_planet,
            gene_key.as_ref().map(|k| k.id.as_str()),
        ]),
        data: EntityData::ProfileHdPlacement(HdPlacement {
            profile_id: profile_id.to_string(),
            gate_id: gate.as_ref().map(|g| g.id.clone()),
            gate_number: number,
            line_number: line,
            line_id: hd_line.map(|l| l.id.clone()),
            center_id: center.map(|c| c.id.clone()),
            planet_id,
            consciousness,
            is_channel_complete,
            channel_id,
            partner_gate_id: partner.map(|p| p.id.clone()),
            gene_key_id: gene_key.as_ref().map(|k| k.id.clone()),
        }),
    }
}

fn channel_entity(
    tables: &ReferenceTables,
    derived: &ProfileEntities,
    channel_id: &str,
) -> Option<EntityInfo> {
    let channel = tables.hd_channels.get(channel_id)?;
    let (g1, g2) = (channel.gate1_number, channel.gate2_number);
    let local = format!("{g1}-{g2}");

    Some(EntityInfo {
        id: ProfileEntityId::new(&derived.profile_id, ProfileScope::Channel, local.clone())
            .to_string(),
        name: channel.name.clone(),
        symbol: channel.symbol.clone(),
        system: EntitySystem::HumanDesign,
        description: channel.description.clone(),
        route_path: format!("/profile/human-design/channels/{local}"),
        keywords: ids([channel.circuit_type.as_deref(), channel.stream_type.as_deref()]),
        related_ids: ids([
            Some(channel.id.as_str()),
            Some(channel.gate1_id.as_str()),
            Some(channel.gate2_id.as_str()),
            Some(channel.center1_id.as_str()),
            Some(channel.center2_id.as_str()),
        ]),
        data: EntityData::ProfileChannel(ProfileChannel {
            profile_id: derived.profile_id.clone(),
            channel_id: channel.id.clone(),
            gate1_number: g1,
            gate2_number: g2,
            gate1_placement_id: derived.hd_placement_id(g1),
            gate2_placement_id: derived.hd_placement_id(g2),
            center1_id: channel.center1_id.clone(),
            center2_id: channel.center2_id.clone(),
            circuit_type: channel.circuit_type.clone(),
            stream_type: channel.stream_type.clone(),
            theme: channel.theme.clone().or_else(|| Some(channel.name.clone())),
        }),
    })
}
