//! Integration test: entity registry over the full fixture and a sample profile.
//!
//! Verifies that:
//! 1. Unknown ids yield `None` without panicking, and repeated lookups are stable.
//! 2. Loading a profile replaces the previous one wholesale; clearing empties it.
//! 3. First-match lookups follow derivation order (personality before design,
//!    planetary aspects before other aspects).
//! 4. Search ranks exact matches first and honours kind/system filters and limits.
//! 5. Dignities, Gene Keys spheres and sequences are linked from the profile entities.
//! 6. The personal-context overlay replaces its own `pc-*` entities and nothing else.

mod common;

use cosmic_core::{
    check_derivations_resolve, AspectNature, Consciousness, CosmicProfile, DignityType,
    EntityData, EntityKind, EntityRegistry, EntitySystem, GkSequence, GkSphereKey,
    PersonalContext, PersonalProject, RegistrySettings, SearchOptions,
};
use serde_json::json;
use std::sync::Arc;

#[test]
fn unknown_id_is_none() {
    let registry = common::registry();
    assert!(registry.get_entity("nonexistent-id").is_none());
    assert!(!registry.has("nonexistent-id"));
    assert!(registry.related("nonexistent-id").is_empty());
    assert!(registry.get_profile_entity("p1:placement:sun").is_none());
}

#[test]
fn lookups_are_idempotent() {
    let registry = common::registry();
    let first = registry.get_entity("gate-1").expect("gate-1");
    let second = registry.get_entity("gate-1").expect("gate-1");
    assert_eq!(first, second);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.kind(), EntityKind::HdGate);
    assert_eq!(first.route_path, "/human-design/gates/gate-1");
}

#[test]
fn universal_entities_are_indexed_by_kind_and_system() {
    let registry = common::registry();
    assert_eq!(registry.by_kind(EntityKind::HdGate).len(), 64);
    assert_eq!(registry.by_kind(EntityKind::Decan).len(), 36);
    assert_eq!(registry.by_kind(EntityKind::LoGate).len(), 3);
    assert_eq!(registry.by_system(EntitySystem::GeneKeys).len(), 85);
    assert_eq!(registry.by_system(EntitySystem::Shared).len(), 10);

    let stats = registry.stats();
    assert_eq!(stats.total, 306);
    assert_eq!(stats.id_collisions, 0);
    assert_eq!(stats.profile_entities, 0);
    assert_eq!(registry.all_ids().len(), 306);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["byKind"]["hd-gate"], 64);
    assert_eq!(json["bySystem"]["humanDesign"], 122);
}

#[test]
fn related_follows_foreign_keys() {
    let registry = common::registry();
    let related: Vec<String> = registry.related("gate-25").iter().map(|e| e.id.clone()).collect();
    assert_eq!(related, vec!["center-g", "gene-key-25", "gate-51", "sign-aries"]);

    let numerology: Vec<String> = registry.related("numerology-1").iter().map(|e| e.id.clone()).collect();
    assert_eq!(numerology, vec!["chakra-root", "sun"]);

    let many = registry.get_many(&["sign-leo", "missing", "chakra-heart"]);
    assert_eq!(many.len(), 2);
}

#[test]
fn decans_and_lost_octave_get_display_names() {
    let registry = common::registry();
    let decan = registry.get_entity("decan-aries-2").expect("decan");
    assert_eq!(decan.name, "Aries 2nd Decan");
    assert_eq!(decan.route_path, "/signs/sign-aries#decan-2");

    let segment = registry.get_entity("lo-gate-2").expect("segment");
    assert_eq!(segment.name, "Segment 2");
    assert_eq!(segment.related_ids, vec!["gate-17"]);
}

#[test]
fn load_profile_derives_entities_in_order() {
    let registry = common::registry();
    let id = registry.load_profile(&common::profile("p1"));
    assert_eq!(id, "p1");
    assert_eq!(registry.current_profile_id().as_deref(), Some("p1"));

    let ids: Vec<String> = registry.all_profile_entities().iter().map(|e| e.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            "p1:placement:sun",
            "p1:placement:moon",
            "p1:placement:mercury",
            "p1:aspect:sun-square-moon",
            "p1:aspect:sun-conjunction-mercury",
            "p1:aspect:moon-trine-mercury",
            "p1:config:t-square:0",
            "p1:gk:lifesWork",
            "p1:gk:evolution",
            "p1:gk:radiance",
            "p1:hd:25.1:personality",
            "p1:hd:51.3:personality",
            "p1:hd:25.4:design",
            "p1:hd:10.2:design",
            "p1:channel:25-51",
        ]
    );

    let snapshot = registry.profile_snapshot();
    assert!(snapshot.loaded_at.is_some());
    assert_eq!(registry.stats().profile_entities, 15);
}

#[test]
fn placements_carry_wheel_correspondences() {
    let registry = common::registry();
    registry.load_profile(&common::profile("p1"));

    let sun = registry.get_entity("p1:placement:sun").expect("profile fallback");
    let placement = sun.as_placement().expect("placement payload");
    assert_eq!(placement.absolute_degree, Some(15.5));
    assert_eq!(placement.hd_gate_number, Some(21));
    assert_eq!(placement.gene_key_number, Some(21));
    assert_eq!(placement.hd_line, Some(5));
    assert_eq!(
        sun.related_ids,
        vec!["sun", "sign-aries", "house-1", "decan-aries-2", "dignity-sun-aries", "gate-21"]
    );

    let aries: Vec<String> = registry.placements_in_sign("sign-aries").iter().map(|e| e.id.clone()).collect();
    assert_eq!(aries, vec!["p1:placement:sun", "p1:placement:mercury"]);
    assert_eq!(registry.placements_in_house("house-4").len(), 1);
    assert_eq!(registry.profile_placements().len(), 3);
}

#[test]
fn aspects_first_match_wins() {
    let registry = common::registry();
    registry.load_profile(&common::profile("p1"));

    let square = registry.aspect_between("moon", "sun").expect("sun square moon");
    let aspect = square.as_aspect().expect("aspect payload");
    assert_eq!(aspect.orb_degree, 2.0);
    assert_eq!(aspect.nature, AspectNature::Challenging);
    assert_eq!(aspect.placement1_id, "p1:placement:sun");

    assert_eq!(registry.aspects_by_type("square").len(), 1);
    assert_eq!(registry.aspects_involving("mercury").len(), 2);
    assert_eq!(registry.profile_aspects().len(), 3);
    let trine = registry.aspects_by_type("trine");
    assert_eq!(trine[0].as_aspect().map(|a| a.nature), Some(AspectNature::Harmonious));
    assert!(registry.aspect_between("venus", "mars").is_none());
}

#[test]
fn configurations_resolve_their_placements() {
    let registry = common::registry();
    registry.load_profile(&common::profile("p1"));
    let configs = registry.profile_configurations();
    assert_eq!(configs.len(), 1);
    let config = configs[0].as_configuration().expect("configuration payload");
    assert_eq!(config.configuration_name, "T-Square");
    assert_eq!(config.planet_ids, vec!["sun", "moon", "mercury"]);
    assert_eq!(config.placement_ids[1], "p1:placement:moon");
}

#[test]
fn hd_placement_prefers_personality() {
    let registry = common::registry();
    registry.load_profile(&common::profile("p1"));

    let either = registry.hd_placement_by_gate(25, None).expect("gate 25");
    assert_eq!(either.id, "p1:hd:25.1:personality");
    let design = registry
        .hd_placement_by_gate(25, Some(Consciousness::Design))
        .expect("design 25");
    assert_eq!(design.id, "p1:hd:25.4:design");
    assert!(registry.hd_placement_by_gate(1, None).is_none());

    let p = either.as_hd_placement().expect("hd payload");
    assert!(p.is_channel_complete);
    assert_eq!(p.channel_id.as_deref(), Some("channel-25-51"));
    assert_eq!(p.center_id.as_deref(), Some("center-g"));
    assert_eq!(p.planet_id.as_deref(), Some("sun"));
    assert_eq!(p.line_id.as_deref(), Some("line-1"));

    let node = registry.get_profile_entity("p1:hd:10.2:design").expect("gate 10");
    let node = node.as_hd_placement().expect("hd payload");
    assert!(!node.is_channel_complete);
    assert_eq!(node.partner_gate_id.as_deref(), Some("gate-20"));
    assert_eq!(node.planet_id.as_deref(), Some("north-node"));

    let channels = registry.profile_channels();
    assert_eq!(channels.len(), 1);
    let channel = channels[0].as_channel().expect("channel payload");
    assert_eq!(channel.gate1_placement_id.as_deref(), Some("p1:hd:25.1:personality"));
    assert_eq!(channel.gate2_placement_id.as_deref(), Some("p1:hd:51.3:personality"));
}

#[test]
fn gene_key_spheres() {
    let registry = common::registry();
    registry.load_profile(&common::profile("p1"));

    let lifes_work = registry.gk_placement_by_sphere(GkSphereKey::LifesWork).expect("life's work");
    let gk = lifes_work.as_gk_placement().expect("gk payload");
    assert_eq!(gk.gene_key_id.as_deref(), Some("gene-key-25"));
    assert_eq!(gk.sequence, GkSequence::Activation);
    assert_eq!(gk.shadow.name, "Shadow 25");
    assert!(gk.is_personality);
    assert_eq!(gk.source_planet_id.as_deref(), Some("sun"));
    assert_eq!(gk.sphere_id, "gk-sphere-lifesWork");
    assert_eq!(
        lifes_work.related_ids,
        vec!["gene-key-25", "line-1", "gk-sphere-lifesWork", "activation-sequence", "sun"]
    );

    let evolution = registry.gk_placement_by_sphere(GkSphereKey::Evolution).expect("evolution");
    let evolution = evolution.as_gk_placement().expect("gk payload");
    assert!(evolution.source_planet_id.is_none());

    let radiance = registry.gk_placement_by_sphere(GkSphereKey::Radiance).expect("radiance");
    assert!(!radiance.as_gk_placement().expect("gk payload").is_personality);

    assert!(registry.gk_placement_by_sphere(GkSphereKey::Pearl).is_none());
    assert_eq!(registry.profile_gk_placements().len(), 3);
    assert_eq!(registry.by_kind(EntityKind::ProfileGkPlacement).len(), 3);
}

#[test]
fn loading_a_second_profile_replaces_the_first() {
    let registry = common::registry();
    registry.load_profile(&common::profile("p1"));
    let held = registry.profile_snapshot();

    registry.load_profile(&common::profile("p2"));
    let all = registry.all_profile_entities();
    assert!(!all.is_empty());
    assert!(all.iter().all(|e| e.id.starts_with("p2:")));
    assert!(registry.get_entity("p1:placement:sun").is_none());
    assert!(registry.get_entity("p2:placement:sun").is_some());

    assert_eq!(held.profile_id.as_deref(), Some("p1"));
    assert!(held.entities.keys().all(|id| id.starts_with("p1:")));
}

#[test]
fn clear_profile_empties_the_namespace() {
    let registry = common::registry();
    registry.load_profile(&common::profile("p1"));
    registry.clear_profile();
    assert!(registry.all_profile_entities().is_empty());
    assert!(registry.current_profile_id().is_none());
    assert!(registry.profile_hd_placements().is_empty());
    assert!(registry.hd_placement_by_gate(25, None).is_none());
    assert!(registry.get_entity("gate-25").is_some());
}

#[test]
fn profile_without_id_uses_the_configured_default() {
    let settings = RegistrySettings {
        default_profile_id: "me".to_string(),
        ..Default::default()
    };
    let registry = EntityRegistry::with_settings(common::tables(), settings);
    let mut profile = common::profile("ignored");
    profile.meta = None;
    assert_eq!(registry.load_profile(&profile), "me");
    assert!(registry.get_profile_entity("me:placement:moon").is_some());

    assert_eq!(registry.load_profile(&CosmicProfile::default()), "me");
    assert!(registry.all_profile_entities().is_empty());
}

#[test]
fn search_ranks_exact_matches_first() {
    let registry = common::registry();

    let results = registry.search("Throat Center", &SearchOptions::default());
    assert_eq!(results.first().map(|e| e.id.as_str()), Some("center-throat"));

    let results = registry.search("sign-aries", &SearchOptions::default());
    assert_eq!(results.first().map(|e| e.id.as_str()), Some("sign-aries"));

    let gates = registry.search("gate", &SearchOptions::kind(EntityKind::HdGate).with_limit(5));
    assert_eq!(gates.len(), 5);
    assert!(gates.iter().all(|e| e.kind() == EntityKind::HdGate));

    let keys = registry.search("siddhi 7", &SearchOptions::system(EntitySystem::GeneKeys));
    assert!(keys.iter().any(|e| e.id == "gene-key-7"));
    assert!(keys.iter().all(|e| e.system == EntitySystem::GeneKeys));

    assert!(registry.search("   ", &SearchOptions::default()).is_empty());
    assert!(registry.search("zzzz", &SearchOptions::default()).is_empty());
}

#[test]
fn search_limit_defaults_to_settings() {
    let settings = RegistrySettings {
        search_limit: 3,
        ..Default::default()
    };
    let registry = EntityRegistry::with_settings(common::tables(), settings);
    assert_eq!(registry.search("gate", &SearchOptions::default()).len(), 3);
}

#[test]
fn placement_dignity_falls_back_to_the_matrix() {
    let registry = common::registry();
    registry.load_profile(&common::profile("p1"));

    let sun = registry.get_entity("p1:placement:sun").expect("sun");
    assert_eq!(
        sun.as_placement().and_then(|p| p.dignity_id.as_deref()),
        Some("dignity-sun-aries")
    );

    let moon = registry.get_entity("p1:placement:moon").expect("moon");
    assert_eq!(
        moon.as_placement().and_then(|p| p.dignity_id.as_deref()),
        Some("dignity-moon-cancer")
    );
    assert!(moon.related_ids.contains(&"dignity-moon-cancer".to_string()));

    let mercury = registry.get_entity("p1:placement:mercury").expect("mercury");
    assert!(mercury.as_placement().expect("placement").dignity_id.is_none());
    assert!(!mercury.related_ids.iter().any(|id| id.starts_with("dignity-")));
}

#[test]
fn unresolvable_provider_dignity_is_kept_on_the_payload_only() {
    let registry = common::registry();
    let mut raw = common::profile_json("p1");
    raw["placements"][1]["dignityId"] = json!("moon-cancer-domicile");
    registry.load_profile(&CosmicProfile::from_json(&raw.to_string()).unwrap());

    let moon = registry.get_entity("p1:placement:moon").expect("moon");
    assert_eq!(
        moon.as_placement().and_then(|p| p.dignity_id.as_deref()),
        Some("dignity-moon-cancer")
    );
    assert!(!moon.related_ids.contains(&"moon-cancer-domicile".to_string()));
}

#[test]
fn dignities_spheres_and_sequences_are_universal_entities() {
    let registry = common::registry();
    assert_eq!(registry.by_kind(EntityKind::Dignity).len(), 5);
    assert_eq!(registry.by_kind(EntityKind::GkSphere).len(), 16);
    assert_eq!(registry.by_kind(EntityKind::GkSequence).len(), 3);

    let dignity = registry.get_entity("dignity-sun-aries").expect("dignity");
    assert_eq!(dignity.name, "Sun in Aries (Exaltation)");
    assert_eq!(dignity.route_path, "/dignities/dignity-sun-aries");
    assert_eq!(dignity.keywords, vec!["Exaltation"]);
    assert_eq!(dignity.related_ids, vec!["sun", "sign-aries"]);
    match &dignity.data {
        EntityData::Dignity(d) => assert_eq!(d.dignity_type, DignityType::Exaltation),
        other => panic!("expected dignity payload, got {other:?}"),
    }
    let detriment = registry.get_entity("dignity-sun-aquarius").expect("detriment");
    assert_eq!(detriment.name, "Sun in Aquarius (Detriment)");

    let sphere = registry.get_entity("gk-sphere-lifesWork").expect("sphere");
    assert_eq!(sphere.system, EntitySystem::GeneKeys);
    assert_eq!(sphere.route_path, "/gene-keys/spheres/gk-sphere-lifesWork");
    assert_eq!(sphere.related_ids, vec!["gk-sphere-evolution", "activation-sequence"]);

    let venus: Vec<String> = registry
        .related("venus-sequence")
        .iter()
        .map(|e| e.id.clone())
        .collect();
    assert_eq!(
        venus,
        vec![
            "gk-sphere-attraction",
            "gk-sphere-iq",
            "gk-sphere-eq",
            "gk-sphere-sq",
            "gk-sphere-core",
            "gk-sphere-relating",
        ]
    );

    let ids = registry.all_ids();
    let position = |id: &str| ids.iter().position(|x| *x == id).expect("registered");
    assert!(position("gene-key-64") < position("gk-sphere-lifesWork"));
    assert!(position("gk-sphere-stability") < position("activation-sequence"));
    assert!(position("pearl-sequence") < position("ring-of-fire"));
}

fn context(occupations: &[&str], projects: &[(&str, Option<&str>)]) -> PersonalContext {
    PersonalContext {
        occupations: occupations.iter().map(|s| s.to_string()).collect(),
        specializations: vec!["Rust".to_string()],
        professional_goals: None,
        active_projects: projects
            .iter()
            .map(|&(id, area)| PersonalProject {
                id: id.to_string(),
                name: format!("Project {id}"),
                description: None,
                status: Some("active".to_string()),
                linked_key_area: area.map(str::to_string),
            })
            .collect(),
    }
}

#[test]
fn personal_context_is_derived_last() {
    let registry = common::registry();
    let mut raw = common::profile_json("p1");
    raw["personalContext"] = json!({
        "occupations": ["Engineer", "Writer"],
        "professionalGoals": "Ship the atlas",
        "activeProjects": [{ "id": "atlas", "name": "Atlas", "linkedKeyArea": "house-10" }]
    });
    registry.load_profile(&CosmicProfile::from_json(&raw.to_string()).unwrap());

    let ids: Vec<String> = registry.all_profile_entities().iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids.len(), 17);
    assert_eq!(&ids[14..], ["p1:channel:25-51", "pc-occupation", "pc-project-atlas"]);

    let occupation = registry.get_entity("pc-occupation").expect("occupation");
    assert_eq!(occupation.kind(), EntityKind::Occupation);
    assert_eq!(occupation.name, "Engineer, Writer");
    assert_eq!(occupation.description.as_deref(), Some("Ship the atlas"));
    assert_eq!(occupation.system, EntitySystem::Shared);
    assert_eq!(occupation.route_path, "/profile/personal-context");

    let project = registry.get_entity("pc-project-atlas").expect("project");
    assert_eq!(project.kind(), EntityKind::PersonalProject);
    assert_eq!(project.description.as_deref(), Some("Atlas"));
    assert_eq!(project.keywords, vec!["house-10"]);
    assert_eq!(registry.related("pc-project-atlas")[0].id, "house-10");

    assert!(check_derivations_resolve(&registry).is_clean());
}

#[test]
fn personal_context_registration_is_idempotent() {
    let registry = common::registry();
    registry.load_profile(&common::profile("p1"));

    let first = context(&["Engineer"], &[("a", Some("house-10")), ("b", None)]);
    assert_eq!(registry.register_personal_context(Some(&first)), 3);
    assert_eq!(registry.register_personal_context(Some(&first)), 3);
    assert_eq!(registry.personal_context_entities().len(), 3);
    assert_eq!(registry.all_profile_entities().len(), 18);

    let second = context(&[], &[("c", Some("house-99"))]);
    assert_eq!(registry.register_personal_context(Some(&second)), 1);
    let ids: Vec<String> = registry
        .personal_context_entities()
        .iter()
        .map(|e| e.id.clone())
        .collect();
    assert_eq!(ids, vec!["pc-project-c"]);
    assert!(registry.get_entity("pc-occupation").is_none());
    assert!(registry.get_entity("pc-project-a").is_none());

    let unknown_area = registry.get_entity("pc-project-c").expect("project c");
    assert_eq!(unknown_area.keywords, vec!["active", "house-99"]);
    assert!(unknown_area.related_ids.is_empty());

    assert_eq!(registry.register_personal_context(None), 0);
    assert!(registry.personal_context_entities().is_empty());
    assert_eq!(registry.all_profile_entities().len(), 15);
    assert_eq!(registry.current_profile_id().as_deref(), Some("p1"));
}

#[test]
fn personal_context_without_a_profile() {
    let registry = common::registry();
    let held = registry.profile_snapshot();
    registry.register_personal_context(Some(&context(&["Engineer"], &[])));

    assert!(registry.current_profile_id().is_none());
    assert_eq!(registry.all_profile_entities().len(), 1);
    assert_eq!(registry.by_kind(EntityKind::Occupation).len(), 1);
    assert!(held.is_empty());

    registry.load_profile(&common::profile("p1"));
    assert!(registry.get_entity("pc-occupation").is_none());
}
