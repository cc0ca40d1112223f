//! Settings file handle: load, edit sections, save atomically.

use crate::error::{PersistError, PersistErrorExt};
use crate::section::{ConfigSection, coerce_table};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use toml_edit::{DocumentMut, Item, Table};
use tracing::{debug, error, warn};

/// Marker embedded in temporary file names, see [`crate::purge_stale_temp_files`].
pub(crate) const TMP_MARKER: &str = ".stktmp.";

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A settings file held in memory as an editable TOML document.
///
/// Comments, key order, formatting and keys the engine does not know survive a
/// load/save cycle untouched.
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    doc: DocumentMut,
    header: Vec<String>,
    existed: bool,
    read_only: bool,
}

impl ConfigFile {
    /// Loads `path`. A missing file yields an empty document with [`ConfigFile::existed`] unset.
    ///
    /// # Errors
    /// Returns [`PersistError::Io`] when the file exists but cannot be read, and
    /// [`PersistError::Parse`] when it is not valid TOML.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Settings file not found, starting empty");
                return Ok(Self::empty(path, false, false));
            },
            Err(err) => {
                return Err(PersistError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", path.display()).into()),
                });
            },
        };

        let doc = text
            .parse::<DocumentMut>()
            .context(format!("Parse failed: {}", path.display()))?;

        Ok(Self { path, doc, header: Vec::new(), existed: true, read_only: false })
    }

    /// Like [`ConfigFile::load`], but failures are logged and produce an empty document.
    ///
    /// When the file exists but could not be loaded, the document is read-only so the user's
    /// file is never replaced by defaults.
    pub fn load_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::load(path.clone()) {
            Ok(file) => file,
            Err(err) => {
                error!(
                    path = %path.display(),
                    error = %err,
                    "Failed to load settings file, using defaults"
                );
                Self::empty(path, true, true)
            },
        }
    }

    fn empty(path: PathBuf, existed: bool, read_only: bool) -> Self {
        Self { path, doc: DocumentMut::new(), header: Vec::new(), existed, read_only }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file was present on disk when loaded.
    #[must_use]
    pub const fn existed(&self) -> bool {
        self.existed
    }

    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.doc.get(name).is_some_and(Item::is_table)
    }

    /// Names of all top-level sections, in file order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.doc.iter().filter(|(_, item)| item.is_table()).map(|(name, _)| name)
    }

    /// Queues header comment lines, rendered above the first section on the next save.
    ///
    /// Once saved, the header is part of the document; reloading the file keeps it without
    /// duplicating it.
    pub fn add_comments<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header.extend(lines.into_iter().map(Into::into));
    }

    /// Opens the section `name`, creating it when missing.
    pub fn section(&mut self, name: &str) -> ConfigSection<'_> {
        let mut created = false;
        let item = self.doc.entry(name).or_insert_with(|| {
            created = true;
            Item::Table(Table::new())
        });
        created |= coerce_table(name, item);

        let Item::Table(table) = item else {
            unreachable!("section item was coerced into a table");
        };
        ConfigSection::new(name, table, created)
    }

    /// Renders the document as it would be written by [`ConfigFile::save`].
    #[must_use]
    pub fn render(&self) -> String {
        let body = self.doc.to_string();
        if self.header.is_empty() {
            return body;
        }

        let mut out: String = self
            .header
            .iter()
            .map(|line| if line.is_empty() { "#\n".to_owned() } else { format!("# {line}\n") })
            .collect();
        if !body.is_empty() {
            out.push('\n');
        }
        out.push_str(&body);
        out
    }

    /// Writes the document atomically (unique temp file, `fsync`, `rename`).
    ///
    /// # Errors
    /// Returns [`PersistError::Internal`] for a read-only document and [`PersistError::Io`]
    /// when any filesystem step fails.
    pub fn save(&self) -> Result<(), PersistError> {
        if self.read_only {
            return Err(PersistError::Internal {
                message: "refusing to overwrite a settings file that failed to load".into(),
                context: Some(self.path.display().to_string().into()),
            });
        }

        write_atomic(&self.path, self.render().as_bytes())?;
        debug!(path = %self.path.display(), "Settings file saved");
        Ok(())
    }
}

fn write_atomic(target: &Path, data: &[u8]) -> Result<(), PersistError> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory {}", parent.display()))?;
    }

    let temp = unique_tmp_path(target);
    {
        let mut file = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&temp)
            .context(format!("Temp creation failed: {}", temp.display()))?;
        file.write_all(data).context("Write failed")?;
        file.sync_all().context("Hardware sync failed")?;
    }

    if let Err(err) = fs::rename(&temp, target) {
        let _ = fs::remove_file(&temp);
        return Err(PersistError::Io {
            source: err,
            context: Some(
                format!("Atomic swap failed: {} -> {}", temp.display(), target.display()).into(),
            ),
        });
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        sync_dir(parent);
    }
    Ok(())
}

fn sync_dir(path: &Path) {
    match fs::File::open(path) {
        Ok(dir) => {
            if let Err(err) = dir.sync_all() {
                warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Directory open failed");
        },
    }
}

fn unique_tmp_path(target: &Path) -> PathBuf {
    let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("settings");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{}.{counter}", std::process::id()))
}
