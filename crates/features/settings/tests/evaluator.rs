use proptest::prelude::*;
use std::path::Path;
use stk_domain::config::StackerConfig;
use stk_domain::{
    DyeColor, EntityData, EntityKind, Material, SpeciesState, StackComparison, StackedBlock,
    StackedEntity,
};
use stk_persist::{ConfigFile, ConfigValue};
use stk_settings::{BlockSettings, EntitySettings, SettingsError, TypeSettings, can_stack_with};

/// Builds entity settings from an in-memory file holding only `overrides` for `kind`.
fn entity(kind: EntityKind, overrides: &[(&str, ConfigValue)]) -> EntitySettings {
    let mut file = ConfigFile::load_or_empty(Path::new("/nonexistent/entity_settings.toml"));
    let mut section = file.section(kind.as_ref());
    for (key, value) in overrides {
        section.set_if_absent(key, value.clone());
    }
    EntitySettings::build(kind, &mut file, &StackerConfig::default()).unwrap()
}

fn candidate(kind: EntityKind, species: SpeciesState) -> StackedEntity {
    StackedEntity::new(kind).with_data(EntityData::with_species(species))
}

fn bat(awake: bool) -> StackedEntity {
    candidate(EntityKind::Bat, SpeciesState::Bat { awake })
}

fn snowman(has_pumpkin: bool) -> StackedEntity {
    candidate(EntityKind::Snowman, SpeciesState::Snowman { has_pumpkin })
}

#[test]
fn sleeping_bats_are_rejected_when_configured() {
    let settings = entity(EntityKind::Bat, &[("dont-stack-if-sleeping", true.into())]);

    let compare = |a, b| can_stack_with(&settings, &bat(a), &bat(b)).unwrap();

    assert_eq!(compare(false, true), StackComparison::Sleeping);
    assert_eq!(compare(true, false), StackComparison::Sleeping);
    assert_eq!(compare(true, true), StackComparison::CanStack);
}

#[test]
fn sleeping_bats_stack_by_default() {
    let settings = entity(EntityKind::Bat, &[]);

    let result = can_stack_with(&settings, &bat(false), &bat(false)).unwrap();
    assert_eq!(result, StackComparison::CanStack);
}

#[test]
fn pumpkinless_snowman_is_rejected_regardless_of_partner() {
    let settings = entity(EntityKind::Snowman, &[("dont-stack-if-no-pumpkin", true.into())]);

    let unknown = candidate(EntityKind::Snowman, SpeciesState::Unspecified);
    for partner in [snowman(true), snowman(false), unknown] {
        assert_eq!(
            can_stack_with(&settings, &snowman(false), &partner).unwrap(),
            StackComparison::NoPumpkin
        );
    }
    assert_eq!(
        can_stack_with(&settings, &snowman(true), &snowman(true)).unwrap(),
        StackComparison::CanStack
    );
}

#[test]
fn disabled_stacking_wins_over_a_passing_predicate() {
    let settings = entity(EntityKind::Snowman, &[("stacking-enabled", false.into())]);

    let result = can_stack_with(&settings, &snowman(true), &snowman(true)).unwrap();
    assert_eq!(result, StackComparison::StackingDisabled);
}

#[test]
fn disabled_stacking_wins_over_a_failing_predicate() {
    let settings = entity(
        EntityKind::Snowman,
        &[("stacking-enabled", false.into()), ("dont-stack-if-no-pumpkin", true.into())],
    );

    let result = can_stack_with(&settings, &snowman(false), &snowman(false)).unwrap();
    assert_eq!(result, StackComparison::StackingDisabled);
}

#[test]
fn merged_size_above_the_limit_is_rejected() {
    let settings = entity(EntityKind::Cow, &[("max-stack-size", 10.into())]);
    let cow = |size| StackedEntity::new(EntityKind::Cow).with_size(size);

    assert_eq!(can_stack_with(&settings, &cow(6), &cow(4)).unwrap(), StackComparison::CanStack);
    assert_eq!(
        can_stack_with(&settings, &cow(6), &cow(5)).unwrap(),
        StackComparison::StackSizeTooLarge
    );
    assert_eq!(
        can_stack_with(&settings, &cow(u32::MAX), &cow(u32::MAX)).unwrap(),
        StackComparison::StackSizeTooLarge
    );
}

#[test]
fn entity_generic_checks_run_in_order() {
    let settings = entity(EntityKind::Cow, &[("only-stack-from-spawners", true.into())]);
    let cow = |data: EntityData| StackedEntity::new(EntityKind::Cow).with_data(data);

    let natural = cow(EntityData { leashed: true, ..EntityData::default() });
    assert_eq!(
        can_stack_with(&settings, &natural, &natural).unwrap(),
        StackComparison::NotSpawnedFromSpawner
    );

    let leashed = cow(EntityData { leashed: true, from_spawner: true, ..EntityData::default() });
    assert_eq!(can_stack_with(&settings, &leashed, &leashed).unwrap(), StackComparison::Leashed);

    let adult = cow(EntityData { from_spawner: true, ..EntityData::default() });
    let baby = cow(EntityData { from_spawner: true, baby: true, ..EntityData::default() });
    assert_eq!(can_stack_with(&settings, &adult, &baby).unwrap(), StackComparison::DifferentAges);
    assert_eq!(can_stack_with(&settings, &baby, &baby).unwrap(), StackComparison::CanStack);
}

#[test]
fn global_entity_flags_apply_to_every_species() {
    let mut config = StackerConfig::default();
    config.global.entity.dont_stack_custom_named = true;
    config.global.entity.dont_stack_if_leashed = false;
    let mut file = ConfigFile::load_or_empty(Path::new("/nonexistent/entity_settings.toml"));
    let settings = EntitySettings::build(EntityKind::Pig, &mut file, &config).unwrap();

    let named = StackedEntity::new(EntityKind::Pig)
        .with_data(EntityData { custom_name: Some("Wilbur".into()), ..EntityData::default() });
    let leashed = StackedEntity::new(EntityKind::Pig)
        .with_data(EntityData { leashed: true, ..EntityData::default() });

    assert_eq!(can_stack_with(&settings, &named, &leashed).unwrap(), StackComparison::CustomNamed);
    assert_eq!(can_stack_with(&settings, &leashed, &leashed).unwrap(), StackComparison::CanStack);
}

#[test]
fn difference_predicates_need_both_sides() {
    let settings = entity(EntityKind::Sheep, &[("dont-stack-if-different-color", true.into())]);
    let sheep = |color| candidate(EntityKind::Sheep, SpeciesState::Sheep { sheared: false, color });

    assert_eq!(
        can_stack_with(&settings, &sheep(DyeColor::Red), &sheep(DyeColor::Blue)).unwrap(),
        StackComparison::DifferentColors
    );
    assert_eq!(
        can_stack_with(&settings, &sheep(DyeColor::Red), &sheep(DyeColor::Red)).unwrap(),
        StackComparison::CanStack
    );
    let unknown = candidate(EntityKind::Sheep, SpeciesState::Unspecified);
    assert_eq!(
        can_stack_with(&settings, &sheep(DyeColor::Red), &unknown).unwrap(),
        StackComparison::CanStack
    );
}

#[test]
fn species_defaults_follow_the_rule_table() {
    let horse = entity(EntityKind::Horse, &[]);
    let tamed = candidate(EntityKind::Horse, SpeciesState::Horse { tamed: true, saddled: false });
    let wild = candidate(EntityKind::Horse, SpeciesState::Horse { tamed: false, saddled: false });
    assert_eq!(can_stack_with(&horse, &tamed, &wild).unwrap(), StackComparison::Tamed);

    let slime = entity(EntityKind::Slime, &[]);
    let size = |size| candidate(EntityKind::Slime, SpeciesState::Slime { size });
    let result = can_stack_with(&slime, &size(1), &size(4)).unwrap();
    assert_eq!(result, StackComparison::DifferentSizes);

    let pig = entity(EntityKind::Pig, &[]);
    let saddled = candidate(EntityKind::Pig, SpeciesState::Saddleable { saddled: true });
    assert_eq!(can_stack_with(&pig, &saddled, &saddled).unwrap(), StackComparison::CanStack);
}

#[test]
fn mismatched_candidates_are_a_contract_violation() {
    let settings = entity(EntityKind::Bat, &[]);
    let cow = StackedEntity::new(EntityKind::Cow);

    let err = can_stack_with(&settings, &bat(true), &cow).unwrap_err();
    assert!(matches!(err, SettingsError::TypeMismatch { .. }));
    assert!(err.to_string().contains("entity"));
}

#[test]
fn block_comparison_only_checks_generic_policy() {
    let mut file = ConfigFile::load_or_empty(Path::new("/nonexistent/block_settings.toml"));
    let settings =
        BlockSettings::build(Material::Stone, &mut file, &StackerConfig::default()).unwrap();

    let a = StackedBlock::new(Material::Stone, 2000);
    let b = StackedBlock::new(Material::Stone, 48);
    assert_eq!(can_stack_with(&settings, &a, &b).unwrap(), StackComparison::CanStack);

    let c = StackedBlock::new(Material::Stone, 49);
    assert_eq!(can_stack_with(&settings, &a, &c).unwrap(), StackComparison::StackSizeTooLarge);
}

fn pumpkinless(data: EntityData, size: u32) -> StackedEntity {
    StackedEntity::new(EntityKind::Snowman)
        .with_size(size)
        .with_data(EntityData { species: SpeciesState::Snowman { has_pumpkin: false }, ..data })
}

fn arb_data() -> impl Strategy<Value = EntityData> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(baby, leashed, invulnerable, has_equipment)| EntityData {
            baby,
            leashed,
            invulnerable,
            has_equipment,
            ..EntityData::default()
        },
    )
}

proptest! {
    #[test]
    fn generic_rejection_always_wins(
        a in arb_data(),
        b in arb_data(),
        size_a in 1u32..200,
        size_b in 1u32..200,
    ) {
        let settings = entity(EntityKind::Snowman, &[("dont-stack-if-no-pumpkin", true.into())]);
        let generic_failure = size_a + size_b > 128
            || a.leashed || b.leashed
            || a.invulnerable || b.invulnerable
            || a.has_equipment || b.has_equipment
            || a.baby != b.baby;

        let result = can_stack_with(&settings, &pumpkinless(a, size_a), &pumpkinless(b, size_b))
            .unwrap();

        prop_assert_eq!(result.is_generic(), generic_failure);
        if !generic_failure {
            prop_assert_eq!(result, StackComparison::NoPumpkin);
        }
    }
}
