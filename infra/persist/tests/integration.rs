use std::fs;
use stk_persist::{ConfigFile, PersistError};
use tempfile::TempDir;

fn settings_path(temp: &TempDir) -> std::path::PathBuf {
    temp.path().join("entity_settings.toml")
}

#[test]
fn missing_file_starts_empty() {
    let temp = TempDir::new().unwrap();
    let file = ConfigFile::load(settings_path(&temp)).unwrap();

    assert!(!file.existed());
    assert!(!file.is_read_only());
    assert_eq!(file.render(), "");
}

#[test]
fn backfills_missing_keys_and_keeps_user_values() {
    let temp = TempDir::new().unwrap();
    let path = settings_path(&temp);
    fs::write(&path, "# my bats\n[bat]\ndont-stack-if-sleeping = true # keep\ncustom-key = 3\n")
        .unwrap();

    let mut file = ConfigFile::load(&path).unwrap();
    let mut bat = file.section("bat");
    assert!(bat.ensure_bool("dont-stack-if-sleeping", false));
    assert!(!bat.has_changes(), "present value must not count as a change");

    assert!(bat.ensure_bool("stacking-enabled", true));
    assert!(bat.has_changes());
    file.save().unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# my bats\n[bat]\ndont-stack-if-sleeping = true # keep\n"));
    assert!(written.contains("custom-key = 3"));
    assert!(written.contains("stacking-enabled = true"));
}

#[test]
fn defaulting_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let path = settings_path(&temp);

    let fill = |file: &mut ConfigFile| {
        let mut section = file.section("snowman");
        section.ensure_bool("stacking-enabled", true);
        section.ensure_int("max-stack-size", -1);
        section.ensure_string("display-name", "Snowman");
        section.ensure_string_list("spawn-requirements", &["on-ground"]);
        section.has_changes()
    };

    let mut first = ConfigFile::load(&path).unwrap();
    assert!(fill(&mut first));
    first.save().unwrap();
    let after_first = fs::read_to_string(&path).unwrap();

    let mut second = ConfigFile::load(&path).unwrap();
    assert!(!fill(&mut second));
    assert_eq!(second.render(), after_first);
}

#[test]
fn mistyped_value_is_replaced_by_default() {
    let temp = TempDir::new().unwrap();
    let path = settings_path(&temp);
    fs::write(&path, "[cow]\nmax-stack-size = \"lots\"\nstacking-enabled = true\n").unwrap();

    let mut file = ConfigFile::load(&path).unwrap();
    let mut cow = file.section("cow");
    assert_eq!(cow.get_int("max-stack-size", -1), -1);
    assert!(cow.has_changes());
    // Absent keys read the default without writing.
    assert_eq!(cow.get_string("display-name", "Cow"), "Cow");
    assert!(!cow.contains("display-name"));

    let rendered = file.render();
    let keys: Vec<&str> = rendered.lines().filter_map(|l| l.split(" =").next()).collect();
    assert_eq!(keys, ["[cow]", "max-stack-size", "stacking-enabled"], "key order is kept");
    assert!(rendered.contains("max-stack-size = -1"));
}

#[test]
fn string_list_with_foreign_entries_is_repaired() {
    let temp = TempDir::new().unwrap();
    let path = settings_path(&temp);
    fs::write(&path, "[pig]\nspawn-requirements = [\"on-ground\", 4]\n").unwrap();

    let mut file = ConfigFile::load(&path).unwrap();
    let mut pig = file.section("pig");
    assert_eq!(pig.get_string_list("spawn-requirements", &["darkness"]), vec!["darkness"]);
    assert!(pig.has_changes());
}

#[test]
fn comments_are_written_once() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("spawner_settings.toml");

    let mut file = ConfigFile::load(&path).unwrap();
    file.add_comments(["Available Spawn Requirements:", ""]);
    file.add_comments(["darkness - Spawn area must be dark"]);
    file.section("bat").set_if_absent_with_comment(
        "spawn-requirements",
        vec!["darkness".to_owned()],
        "Conditions checked before each spawn",
    );
    file.save().unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# Available Spawn Requirements:\n#\n# darkness - Spawn area"));
    assert!(written.contains("# Conditions checked before each spawn\nspawn-requirements = [\"darkness\"]"));

    let mut reloaded = ConfigFile::load(&path).unwrap();
    assert!(reloaded.existed());
    assert!(!reloaded.section("bat").has_changes());
    reloaded.save().unwrap();

    let rewritten = fs::read_to_string(&path).unwrap();
    assert_eq!(rewritten, written);
    assert_eq!(rewritten.matches("Available Spawn Requirements").count(), 1);
}

#[test]
fn non_table_section_is_replaced() {
    let temp = TempDir::new().unwrap();
    let path = settings_path(&temp);
    fs::write(&path, "bat = 5\n").unwrap();

    let mut file = ConfigFile::load(&path).unwrap();
    let section = file.section("bat");
    assert!(section.has_changes());
    assert!(file.contains_section("bat"));
}

#[test]
fn inline_table_section_is_accepted() {
    let temp = TempDir::new().unwrap();
    let path = settings_path(&temp);
    fs::write(&path, "bat = { stacking-enabled = false }\n").unwrap();

    let mut file = ConfigFile::load(&path).unwrap();
    let mut bat = file.section("bat");
    assert!(!bat.get_bool("stacking-enabled", true));
}

#[test]
fn malformed_file_is_never_overwritten() {
    let temp = TempDir::new().unwrap();
    let path = settings_path(&temp);
    fs::write(&path, "[bat\nbroken").unwrap();

    assert!(matches!(ConfigFile::load(&path), Err(PersistError::Parse { .. })));

    let mut file = ConfigFile::load_or_empty(&path);
    assert!(file.is_read_only());
    assert!(file.existed());
    assert!(file.section("bat").ensure_bool("stacking-enabled", true));

    assert!(matches!(file.save(), Err(PersistError::Internal { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), "[bat\nbroken");
}

#[test]
fn save_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("item_settings.toml");

    let mut file = ConfigFile::load(&path).unwrap();
    file.section("stone").ensure_bool("stacking-enabled", true);
    file.save().unwrap();

    let names: Vec<String> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["item_settings.toml"]);
}
