use crate::error::SettingsError;
use crate::rules::{RULES, SpeciesRule, rule_for};
use crate::types::{
    KEY_DISPLAY_NAME, KEY_MAX_STACK_SIZE, KEY_STACKING_ENABLED, TypeSettings, ensure_inherited,
    inherit,
};
use stk_domain::config::{EntityGlobals, StackerConfig};
use stk_domain::{
    EntityKind, Material, SpawnRequirement, StackCategory, StackComparison, StackedEntity,
    display_name,
};
use stk_persist::ConfigFile;

const KEY_MIN_STACK_SIZE: &str = "min-stack-size";
const KEY_MERGE_RADIUS: &str = "merge-radius";
const KEY_KILL_ENTIRE_STACK: &str = "kill-entire-stack-on-death";
const KEY_ONLY_FROM_SPAWNERS: &str = "only-stack-from-spawners";
const KEY_DIFFERENT_AGE: &str = "dont-stack-if-different-age";

/// Stacking policy of one entity species.
///
/// Besides the keys every species shares, each species carries the settings of its
/// [`SpeciesRule`], which also supplies the type-specific predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySettings {
    kind: EntityKind,
    stacking_enabled: bool,
    display_name: String,
    min_stack_size: u32,
    max_stack_size: u32,
    merge_radius: u32,
    kill_entire_stack_on_death: bool,
    only_stack_from_spawners: bool,
    dont_stack_if_different_age: bool,
    rule: SpeciesRule,
    spawn_requirements: Vec<SpawnRequirement>,
    globals: EntityGlobals,
    has_changes: bool,
}

impl EntitySettings {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    #[must_use]
    pub const fn min_stack_size(&self) -> u32 {
        self.min_stack_size
    }

    #[must_use]
    pub const fn merge_radius(&self) -> u32 {
        self.merge_radius
    }

    #[must_use]
    pub const fn kill_entire_stack_on_death(&self) -> bool {
        self.kill_entire_stack_on_death
    }

    #[must_use]
    pub const fn only_stack_from_spawners(&self) -> bool {
        self.only_stack_from_spawners
    }

    #[must_use]
    pub const fn dont_stack_if_different_age(&self) -> bool {
        self.dont_stack_if_different_age
    }

    #[must_use]
    pub const fn rule(&self) -> &SpeciesRule {
        &self.rule
    }

    /// The configured value of a species key, e.g. `dont-stack-if-sleeping`.
    #[must_use]
    pub fn species_flag(&self, key: &str) -> Option<bool> {
        self.rule.flag(key)
    }

    /// The spawn egg item of this species.
    #[must_use]
    pub fn spawn_egg(&self) -> Option<Material> {
        self.kind.spawn_egg()
    }

    /// Default requirements a spawner of this species starts with.
    #[must_use]
    pub fn spawn_requirements(&self) -> &[SpawnRequirement] {
        &self.spawn_requirements
    }
}

impl TypeSettings for EntitySettings {
    type Key = EntityKind;
    type Candidate = StackedEntity;

    const CATEGORY: StackCategory = StackCategory::Entity;

    fn domain(_config: &StackerConfig) -> Vec<EntityKind> {
        RULES.iter().map(|row| row.kind).collect()
    }

    fn build(
        kind: EntityKind,
        file: &mut ConfigFile,
        config: &StackerConfig,
    ) -> Result<Self, SettingsError> {
        let version = config.server.game_version;
        let Some(row) = rule_for(kind).filter(|_| kind.is_available(version)) else {
            return Err(SettingsError::Unsupported {
                message: format!("{kind} is not available on {version}").into(),
                context: Some(StackCategory::Entity.as_ref().to_owned().into()),
            });
        };

        let globals = config.global.entity.clone();
        let mut section = file.section(kind.as_ref());

        let stacking_enabled = section.ensure_bool(KEY_STACKING_ENABLED, true);
        let display_name = section.ensure_string(KEY_DISPLAY_NAME, &display_name(kind.as_ref()));
        let min_stack_size =
            inherit(ensure_inherited(&mut section, KEY_MIN_STACK_SIZE), globals.min_stack_size);
        let max_stack_size =
            inherit(ensure_inherited(&mut section, KEY_MAX_STACK_SIZE), globals.max_stack_size);
        let merge_radius =
            inherit(ensure_inherited(&mut section, KEY_MERGE_RADIUS), globals.merge_radius);
        let kill_entire_stack_on_death = section.ensure_bool(KEY_KILL_ENTIRE_STACK, false);
        let only_stack_from_spawners = section.ensure_bool(KEY_ONLY_FROM_SPAWNERS, false);
        let dont_stack_if_different_age = section.ensure_bool(KEY_DIFFERENT_AGE, true);
        let rule = row.shape.load(&mut section);

        let spawn_requirements = row
            .spawn_requirements
            .iter()
            .filter_map(|raw| SpawnRequirement::parse(raw).ok())
            .collect();

        Ok(Self {
            kind,
            stacking_enabled,
            display_name,
            min_stack_size,
            max_stack_size,
            merge_radius,
            kill_entire_stack_on_death,
            only_stack_from_spawners,
            dont_stack_if_different_age,
            rule,
            spawn_requirements,
            globals,
            has_changes: section.has_changes(),
        })
    }

    fn key(&self) -> EntityKind {
        self.kind
    }

    fn stacking_enabled(&self) -> bool {
        self.stacking_enabled
    }

    fn max_stack_size(&self) -> u32 {
        self.max_stack_size
    }

    fn has_changes(&self) -> bool {
        self.has_changes
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn compare_generic(&self, a: &StackedEntity, b: &StackedEntity) -> StackComparison {
        let (a, b) = (&a.data, &b.data);
        let globals = &self.globals;

        let checks = [
            (
                self.only_stack_from_spawners,
                !a.from_spawner || !b.from_spawner,
                StackComparison::NotSpawnedFromSpawner,
            ),
            (
                globals.dont_stack_custom_named,
                a.custom_name.is_some() || b.custom_name.is_some(),
                StackComparison::CustomNamed,
            ),
            (
                globals.only_stack_on_ground,
                !a.on_ground || !b.on_ground,
                StackComparison::NotOnGround,
            ),
            (globals.dont_stack_if_in_water, a.in_water || b.in_water, StackComparison::InWater),
            (globals.dont_stack_if_leashed, a.leashed || b.leashed, StackComparison::Leashed),
            (
                globals.dont_stack_if_invulnerable,
                a.invulnerable || b.invulnerable,
                StackComparison::Invulnerable,
            ),
            (
                globals.dont_stack_if_has_equipment,
                a.has_equipment || b.has_equipment,
                StackComparison::HasEquipment,
            ),
            (self.dont_stack_if_different_age, a.baby != b.baby, StackComparison::DifferentAges),
        ];

        checks
            .into_iter()
            .find(|&(enabled, violated, _)| enabled && violated)
            .map_or(StackComparison::CanStack, |(_, _, reason)| reason)
    }

    fn compare_specific(&self, a: &StackedEntity, b: &StackedEntity) -> StackComparison {
        self.rule.compare(&a.data, &b.data)
    }
}
