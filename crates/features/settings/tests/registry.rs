use std::fs;
use std::path::Path;
use std::sync::Arc;
use stk_domain::config::StackerConfig;
use stk_domain::{
    ConditionTag, EntityKind, GameVersion, Material, StackCategory, StackComparison,
    StackedBlock, StackedSpawner,
};
use stk_persist::ConfigFile;
use stk_settings::{
    BlockSettings, EntitySettings, ItemSettings, SettingsError, SettingsRegistry,
    SpawnerSettings, StackSettingManager, TypeSettings,
};
use tempfile::tempdir;

fn config_in(dir: &Path) -> StackerConfig {
    let mut config = StackerConfig::default();
    config.server.data_dir = dir.to_path_buf();
    config
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn reload_builds_one_entry_per_block_material() {
    let dir = tempdir().unwrap();
    let registry = SettingsRegistry::<BlockSettings>::new(config_in(dir.path()));
    assert!(registry.is_empty());

    let report = registry.reload();

    let domain = Material::stackable_blocks();
    assert_eq!(report.category, StackCategory::Block);
    assert_eq!(report.entries, domain.len());
    assert_eq!(report.stackable, domain.len());
    assert!(report.file_written);
    assert!(report.omitted.is_empty());
    for material in &domain {
        assert!(registry.get(*material).is_some(), "missing {material}");
    }
    assert!(registry.get(Material::Chest).is_none());
    assert!(dir.path().join("block_settings.toml").exists());
}

#[test]
fn reload_builds_one_entry_per_item_material() {
    let dir = tempdir().unwrap();
    let registry = SettingsRegistry::<ItemSettings>::new(config_in(dir.path()));

    let report = registry.reload();

    let domain = Material::alphabetical();
    assert_eq!(report.category, StackCategory::Item);
    assert_eq!(report.entries, domain.len());
    assert_eq!(registry.len(), domain.len());
    assert!(report.omitted.is_empty());
    assert!(registry.get(Material::PigSpawnEgg).is_some());
    assert!(registry.get(Material::Diamond).is_some());
    assert!(registry.get(Material::Chest).is_some());
}

#[test]
fn sections_are_written_in_alphabetical_order() {
    let dir = tempdir().unwrap();
    let blocks = SettingsRegistry::<BlockSettings>::new(config_in(dir.path()));
    let items = SettingsRegistry::<ItemSettings>::new(config_in(dir.path()));
    blocks.reload();
    items.reload();

    let names = |path: &Path| -> Vec<String> {
        let file = ConfigFile::load(path).unwrap();
        file.section_names().map(str::to_owned).collect()
    };
    let canonical = |materials: Vec<Material>| -> Vec<String> {
        materials.iter().map(|m| m.as_ref().to_owned()).collect()
    };

    let block_sections = names(blocks.path());
    assert_eq!(block_sections, canonical(Material::stackable_blocks()));
    assert!(block_sections.is_sorted());
    let item_sections = names(items.path());
    assert_eq!(item_sections, canonical(Material::alphabetical()));
    assert!(item_sections.is_sorted());
}

#[test]
fn stackable_types_matches_enabled_flags() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("block_settings.toml"),
        "[stone]\nstacking-enabled = false\n\n[dirt]\nstacking-enabled = false\n",
    )
    .unwrap();
    let registry = SettingsRegistry::<BlockSettings>::new(config_in(dir.path()));

    let report = registry.reload();

    let stackable = registry.stackable_types();
    assert_eq!(report.stackable, report.entries - 2);
    assert_eq!(stackable.len(), report.stackable);
    assert!(!stackable.contains(&Material::Stone));
    assert!(!stackable.contains(&Material::Dirt));
    assert!(stackable.contains(&Material::DiamondBlock));
    assert!(registry.get(Material::Stone).is_some_and(|s| !s.stacking_enabled()));
}

#[test]
fn consecutive_reloads_are_byte_identical() {
    let dir = tempdir().unwrap();
    let manager = StackSettingManager::new(config_in(dir.path()));

    let first = manager.reload_all();
    assert!(first.iter().all(|report| report.file_written));
    let snapshots: Vec<String> =
        first.iter().map(|report| read(manager.settings_file(report.category))).collect();

    let second = manager.reload_all();
    assert!(second.iter().all(|report| !report.file_written));
    for (report, before) in second.iter().zip(&snapshots) {
        assert_eq!(&read(manager.settings_file(report.category)), before);
    }
}

#[test]
fn backfill_keeps_user_values_and_comments() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("block_settings.toml");
    fs::write(&path, "[diamond_block]\n# keep small\nmax-stack-size = 12\ncustom = \"mine\"\n")
        .unwrap();
    let registry = SettingsRegistry::<BlockSettings>::new(config_in(dir.path()));

    let report = registry.reload();

    assert!(report.file_written);
    let settings = registry.get(Material::DiamondBlock).unwrap();
    assert_eq!(settings.max_stack_size(), 12);
    assert_eq!(settings.display_name(), "Diamond Block");

    let content = read(&path);
    assert!(content.contains("# keep small\nmax-stack-size = 12"));
    assert!(content.contains("custom = \"mine\""));
    assert!(content.contains("stacking-enabled = true"));
    assert!(content.contains("# Set to -1 to use the global value\nmax-stack-size = -1"));
}

#[test]
fn negative_sizes_resolve_to_the_global_value() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("block_settings.toml"), "[stone]\nmax-stack-size = -7\n").unwrap();
    let mut config = config_in(dir.path());
    config.global.block.max_stack_size = 64;
    let registry = SettingsRegistry::<BlockSettings>::new(config);

    registry.reload();

    assert_eq!(registry.get(Material::Stone).unwrap().max_stack_size(), 64);
    assert_eq!(registry.get(Material::Dirt).unwrap().max_stack_size(), 64);
}

#[test]
fn mistyped_value_falls_back_to_default_and_is_repaired() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("block_settings.toml");
    fs::write(&path, "[stone]\nstacking-enabled = \"yes\"\n").unwrap();
    let registry = SettingsRegistry::<BlockSettings>::new(config_in(dir.path()));

    let report = registry.reload();

    assert!(report.file_written);
    assert!(registry.get(Material::Stone).unwrap().stacking_enabled());
    assert!(read(&path).starts_with("[stone]\nstacking-enabled = true\n"));
}

#[test]
fn malformed_file_is_left_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("block_settings.toml");
    fs::write(&path, "[stone\nstacking-enabled = false\n").unwrap();
    let registry = SettingsRegistry::<BlockSettings>::new(config_in(dir.path()));

    let report = registry.reload();

    assert!(!report.file_written);
    assert_eq!(report.entries, Material::stackable_blocks().len());
    assert!(registry.get(Material::Stone).unwrap().stacking_enabled());
    assert_eq!(read(&path), "[stone\nstacking-enabled = false\n");
}

#[test]
fn species_missing_from_the_game_version_are_omitted() {
    let dir = tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.server.game_version = GameVersion::release(16);
    let registry = SettingsRegistry::<EntitySettings>::new(config);

    let report = registry.reload();

    assert_eq!(report.omitted, ["axolotl", "frog", "goat"]);
    let available = EntityKind::alphabetical_stackable(GameVersion::release(16));
    assert_eq!(report.entries, available.len());
    assert!(registry.get(EntityKind::Axolotl).is_none());
    assert!(!registry.stackable_types().contains(&EntityKind::Goat));
    assert!(registry.get(EntityKind::Strider).is_some());
    assert!(registry.get(EntityKind::Bee).is_some());

    let content = read(registry.path());
    assert!(!content.contains("[axolotl]"));
    assert!(content.contains("[bee]"));
}

#[test]
fn spawners_cover_only_species_of_the_game_version() {
    let dir = tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.server.game_version = GameVersion::release(16);
    let registry = SettingsRegistry::<SpawnerSettings>::new(config);

    let report = registry.reload();

    assert!(report.omitted.is_empty());
    let available = EntityKind::alphabetical_stackable(GameVersion::release(16));
    assert_eq!(report.entries, available.len());
    assert!(registry.get(EntityKind::Strider).is_some());
    assert!(registry.get(EntityKind::Goat).is_none());
    assert!(!read(registry.path()).contains("[goat]"));
}

#[test]
fn unstackable_entities_have_no_settings() {
    let dir = tempdir().unwrap();
    let registry = SettingsRegistry::<EntitySettings>::new(config_in(dir.path()));

    let report = registry.reload();

    assert!(report.omitted.is_empty());
    assert!(registry.get(EntityKind::Player).is_none());
    assert!(registry.get(EntityKind::ArmorStand).is_none());
    assert_eq!(report.entries, EntityKind::alphabetical_stackable(GameVersion::LATEST).len());
}

#[test]
fn entity_sections_carry_species_keys() {
    let dir = tempdir().unwrap();
    let registry = SettingsRegistry::<EntitySettings>::new(config_in(dir.path()));

    registry.reload();

    let bat = registry.get(EntityKind::Bat).unwrap();
    assert_eq!(bat.species_flag("dont-stack-if-sleeping"), Some(false));
    assert_eq!(bat.species_flag("dont-stack-if-no-pumpkin"), None);
    assert_eq!(bat.min_stack_size(), 2);
    assert_eq!(bat.max_stack_size(), 128);
    assert_eq!(bat.merge_radius(), 5);
    assert!(bat.dont_stack_if_different_age());
    assert_eq!(bat.spawn_egg(), Some(Material::BatSpawnEgg));

    let horse = registry.get(EntityKind::Horse).unwrap();
    assert_eq!(horse.species_flag("dont-stack-if-tamed"), Some(true));
    assert_eq!(horse.species_flag("dont-stack-if-saddled"), Some(true));

    let content = read(registry.path());
    assert!(content.contains("[snowman]"));
    assert!(content.contains("dont-stack-if-no-pumpkin = false"));
    assert!(content.contains("multiply-egg-drops-by-stack-size = true"));
}

#[test]
fn spawner_header_is_written_once() {
    let dir = tempdir().unwrap();
    let registry = SettingsRegistry::<SpawnerSettings>::new(config_in(dir.path()));
    let header = "# Available Spawn Requirements:";

    registry.reload();
    let first = read(registry.path());
    assert!(first.starts_with(header));
    assert!(first.contains("# darkness - Spawn area must have a light level of 7 or less"));
    assert!(first.contains("# Valid Biomes: https://"));

    // Dropping the last key of the first section forces a rewrite.
    let start = first.find("spawn-requirements = ").unwrap();
    let end = start + first[start..].find('\n').unwrap() + 1;
    fs::write(registry.path(), format!("{}{}", &first[..start], &first[end..])).unwrap();

    let report = registry.reload();
    assert!(report.file_written);
    let second = read(registry.path());
    assert_eq!(second.matches(header).count(), 1);
    assert_eq!(second, first);
}

#[test]
fn spawner_settings_use_species_requirements() {
    let dir = tempdir().unwrap();
    let registry = SettingsRegistry::<SpawnerSettings>::new(config_in(dir.path()));

    registry.reload();

    let bat = registry.get(EntityKind::Bat).unwrap();
    assert_eq!(bat.display_name(), "Bat Spawner");
    let tags: Vec<_> = bat.spawn_requirements().iter().map(|r| r.tag).collect();
    assert_eq!(tags, [ConditionTag::BelowSeaLevel, ConditionTag::Darkness]);
    assert_eq!(bat.min_spawn_delay(), None);
    assert!(!bat.disable_mob_ai());
    assert!(
        read(registry.path()).contains("spawn-requirements = [\"below-sea-level\", \"darkness\"]")
    );
}

#[test]
fn unknown_spawn_requirements_are_skipped_but_kept_in_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spawner_settings.toml");
    fs::write(
        &path,
        concat!(
            "[zombie]\n",
            "spawn-requirements = [\"moon-phase:full\", \"biome:plains, desert\"]\n",
            "spawn-range = 6\n",
        ),
    )
    .unwrap();
    let registry = SettingsRegistry::<SpawnerSettings>::new(config_in(dir.path()));

    registry.reload();

    let zombie = registry.get(EntityKind::Zombie).unwrap();
    assert_eq!(zombie.spawn_range(), Some(6));
    assert_eq!(zombie.spawn_requirements().len(), 1);
    assert_eq!(zombie.spawn_requirements()[0].tag, ConditionTag::Biome);
    assert_eq!(zombie.spawn_requirements()[0].values, ["plains", "desert"]);
    assert!(read(&path).contains("\"moon-phase:full\""));
}

#[test]
fn registry_comparison_handles_unknown_and_mismatched_types() {
    let dir = tempdir().unwrap();
    let registry = SettingsRegistry::<SpawnerSettings>::new(config_in(dir.path()));

    let zombie = StackedSpawner::new(EntityKind::Zombie, 1);
    assert_eq!(
        registry.can_stack_with(&zombie, &zombie).unwrap(),
        StackComparison::UnsupportedType
    );

    registry.reload();
    assert_eq!(registry.can_stack_with(&zombie, &zombie).unwrap(), StackComparison::CanStack);

    let skeleton = StackedSpawner::new(EntityKind::Skeleton, 1);
    let err = registry.can_stack_with(&zombie, &skeleton).unwrap_err();
    assert!(matches!(err, SettingsError::TypeMismatch { .. }));

    registry.clear();
    assert_eq!(
        registry.can_stack_with(&zombie, &zombie).unwrap(),
        StackComparison::UnsupportedType
    );
}

#[test]
fn readers_never_observe_a_partial_registry() {
    let dir = tempdir().unwrap();
    let registry = Arc::new(SettingsRegistry::<BlockSettings>::new(config_in(dir.path())));
    let expected = registry.reload().entries;

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let registry = Arc::clone(&registry);
            scope.spawn(move || {
                for _ in 0..200 {
                    assert_eq!(registry.snapshot().len(), expected);
                    let a = StackedBlock::new(Material::Stone, 3);
                    let result = registry.can_stack_with(&a, &a).unwrap();
                    assert_eq!(result, StackComparison::CanStack);
                }
            });
        }

        for _ in 0..5 {
            assert_eq!(registry.reload().entries, expected);
        }
    });
}

#[test]
fn manager_links_spawn_eggs_to_entity_settings() {
    let dir = tempdir().unwrap();
    let manager = StackSettingManager::new(config_in(dir.path()));
    manager.reload(StackCategory::Entity);

    let sheep = manager.entity_settings_for_spawn_egg(Material::SheepSpawnEgg).unwrap();
    assert_eq!(sheep.kind(), EntityKind::Sheep);
    assert!(manager.entity_settings_for_spawn_egg(Material::Stone).is_none());
    assert_eq!(
        manager.display_name(StackCategory::Entity, "magma_cube").as_deref(),
        Some("Magma Cube")
    );

    manager.disable();
    assert_eq!(manager.entry_count(StackCategory::Entity), 0);
    assert!(manager.entity_settings_for_spawn_egg(Material::SheepSpawnEgg).is_none());
}

#[test]
fn manager_places_files_in_the_data_directory() {
    let dir = tempdir().unwrap();
    let manager = StackSettingManager::new(config_in(dir.path()));

    let reports = manager.reload_all();

    assert_eq!(reports.len(), 4);
    for report in &reports {
        let path = manager.settings_file(report.category);
        assert_eq!(path, dir.path().join(report.category.file_name()));
        assert!(path.exists());
        assert_eq!(manager.entry_count(report.category), report.entries);
        assert_eq!(manager.stackable_count(report.category), report.stackable);
    }
}
