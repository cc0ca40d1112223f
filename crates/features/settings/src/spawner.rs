use crate::error::SettingsError;
use crate::rules::rule_for;
use crate::types::{CommonSettings, TypeSettings, ensure_inherited, override_of};
use stk_domain::config::StackerConfig;
use stk_domain::{
    ConditionTag, EntityKind, SpawnRequirement, StackCategory, StackedSpawner, display_name,
};
use stk_persist::ConfigFile;
use tracing::warn;

const KEY_DISABLE_MOB_AI: &str = "disable-mob-ai";
const KEY_SPAWN_COUNT_MULTIPLIER: &str = "spawn-count-stack-size-multiplier";
const KEY_MIN_SPAWN_DELAY: &str = "min-spawn-delay";
const KEY_MAX_SPAWN_DELAY: &str = "max-spawn-delay";
const KEY_ENTITY_SEARCH_RANGE: &str = "entity-search-range";
const KEY_PLAYER_ACTIVATION_RANGE: &str = "player-activation-range";
const KEY_SPAWN_RANGE: &str = "spawn-range";
const KEY_SPAWN_REQUIREMENTS: &str = "spawn-requirements";

const VALID_BLOCKS_URL: &str = "https://hub.spigotmc.org/javadocs/spigot/org/bukkit/Material.html";
const VALID_BIOMES_URL: &str =
    "https://hub.spigotmc.org/javadocs/spigot/org/bukkit/block/Biome.html";

/// Lines of the explanatory header written once at the top of a new spawner file.
#[must_use]
pub fn header_lines() -> Vec<String> {
    let mut lines = vec!["Available Spawn Requirements:".to_owned(), String::new()];
    lines.extend(
        ConditionTag::descriptions().map(|(tag, description)| format!("{tag} - {description}")),
    );
    lines.push(String::new());
    lines.push(format!("Valid Blocks: {VALID_BLOCKS_URL}"));
    lines.push(format!("Valid Biomes: {VALID_BIOMES_URL}"));
    lines
}

/// Stacking policy of the spawner of one entity species.
///
/// Optional values are `None` when configured negative, leaving the game's own value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnerSettings {
    kind: EntityKind,
    common: CommonSettings,
    disable_mob_ai: bool,
    spawn_count_stack_size_multiplier: Option<u32>,
    min_spawn_delay: Option<u32>,
    max_spawn_delay: Option<u32>,
    entity_search_range: Option<u32>,
    player_activation_range: Option<u32>,
    spawn_range: Option<u32>,
    spawn_requirements: Vec<SpawnRequirement>,
    has_changes: bool,
}

impl SpawnerSettings {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    #[must_use]
    pub const fn disable_mob_ai(&self) -> bool {
        self.disable_mob_ai
    }

    #[must_use]
    pub const fn spawn_count_stack_size_multiplier(&self) -> Option<u32> {
        self.spawn_count_stack_size_multiplier
    }

    #[must_use]
    pub const fn min_spawn_delay(&self) -> Option<u32> {
        self.min_spawn_delay
    }

    #[must_use]
    pub const fn max_spawn_delay(&self) -> Option<u32> {
        self.max_spawn_delay
    }

    #[must_use]
    pub const fn entity_search_range(&self) -> Option<u32> {
        self.entity_search_range
    }

    #[must_use]
    pub const fn player_activation_range(&self) -> Option<u32> {
        self.player_activation_range
    }

    #[must_use]
    pub const fn spawn_range(&self) -> Option<u32> {
        self.spawn_range
    }

    #[must_use]
    pub fn spawn_requirements(&self) -> &[SpawnRequirement] {
        &self.spawn_requirements
    }
}

impl TypeSettings for SpawnerSettings {
    type Key = EntityKind;
    type Candidate = StackedSpawner;

    const CATEGORY: StackCategory = StackCategory::Spawner;

    fn domain(config: &StackerConfig) -> Vec<EntityKind> {
        EntityKind::alphabetical_stackable(config.server.game_version)
    }

    fn prepare(file: &mut ConfigFile) -> bool {
        file.add_comments(header_lines());
        true
    }

    fn build(
        kind: EntityKind,
        file: &mut ConfigFile,
        config: &StackerConfig,
    ) -> Result<Self, SettingsError> {
        let Some(row) = rule_for(kind) else {
            return Err(SettingsError::Unsupported {
                message: format!("{kind} has no spawner rules").into(),
                context: Some(StackCategory::Spawner.as_ref().to_owned().into()),
            });
        };

        let mut section = file.section(kind.as_ref());
        let default_display_name = format!("{} Spawner", display_name(kind.as_ref()));
        let common = CommonSettings::load(
            &mut section,
            &default_display_name,
            config.global.spawner.max_stack_size,
        );

        let disable_mob_ai = section.ensure_bool(KEY_DISABLE_MOB_AI, false);
        let mut optional = |key: &str| override_of(ensure_inherited(&mut section, key));
        let spawn_count_stack_size_multiplier = optional(KEY_SPAWN_COUNT_MULTIPLIER);
        let min_spawn_delay = optional(KEY_MIN_SPAWN_DELAY);
        let max_spawn_delay = optional(KEY_MAX_SPAWN_DELAY);
        let entity_search_range = optional(KEY_ENTITY_SEARCH_RANGE);
        let player_activation_range = optional(KEY_PLAYER_ACTIVATION_RANGE);
        let spawn_range = optional(KEY_SPAWN_RANGE);

        let raw = section.ensure_string_list(KEY_SPAWN_REQUIREMENTS, row.spawn_requirements);
        let spawn_requirements = raw
            .iter()
            .filter_map(|entry| match SpawnRequirement::parse(entry) {
                Ok(requirement) => Some(requirement),
                Err(err) => {
                    warn!(spawner = %kind, error = %err, "Ignoring spawn requirement");
                    None
                },
            })
            .collect();

        Ok(Self {
            kind,
            common,
            disable_mob_ai,
            spawn_count_stack_size_multiplier,
            min_spawn_delay,
            max_spawn_delay,
            entity_search_range,
            player_activation_range,
            spawn_range,
            spawn_requirements,
            has_changes: section.has_changes(),
        })
    }

    fn key(&self) -> EntityKind {
        self.kind
    }

    fn stacking_enabled(&self) -> bool {
        self.common.stacking_enabled
    }

    fn max_stack_size(&self) -> u32 {
        self.common.max_stack_size
    }

    fn has_changes(&self) -> bool {
        self.has_changes
    }

    fn display_name(&self) -> &str {
        &self.common.display_name
    }
}
