use std::{
    collections::BTreeMap,
    fs,
    io::{ErrorKind, Write},
    path::Path,
};

use tempfile::NamedTempFile;
use toml::Table;
use tracing::debug;

use super::ConfigError;
use crate::value::{Value, Vec2, Vec3};

/// Sectioned key/value document persisted as TOML.
///
/// ```toml
/// [Display]
/// c_isfullscreen = true
/// c_resolution = [1280, 720]
/// ```
///
/// Sections and keys are kept sorted so the written text is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    sections: BTreeMap<String, BTreeMap<String, Value>>,
}

impl ConfigFile {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` in `section`, creating the section if needed.
    pub fn set_value(&mut self, section: &str, key: &str, value: Value) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Value of `key` in `section`.
    pub fn get_value(&self, section: &str, key: &str) -> Option<&Value> {
        self.sections.get(section)?.get(key)
    }

    /// Section names, sorted.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Keys of a section, sorted. Empty for an unknown section.
    pub fn section_keys(&self, section: &str) -> impl Iterator<Item = &str> {
        self.sections
            .get(section)
            .into_iter()
            .flat_map(|keys| keys.keys().map(String::as_str))
    }

    /// Every `(section, key, value)` triple.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &Value)> {
        self.sections.iter().flat_map(|(section, keys)| {
            keys.iter()
                .map(move |(key, value)| (section.as_str(), key.as_str(), value))
        })
    }

    /// Returns `true` when no key is stored.
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(BTreeMap::is_empty)
    }

    /// Renders the document as TOML.
    ///
    /// [`Value::None`] has no TOML form and is left out.
    ///
    /// # Errors
    /// Returns `ConfigError::Serialization` if the TOML serializer fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        let mut document = Table::new();

        for (section, keys) in &self.sections {
            let mut table = Table::new();
            for (key, value) in keys {
                match value_to_toml(value) {
                    Some(item) => {
                        table.insert(key.clone(), item);
                    }
                    None => debug!(section = %section, key = %key, "Skipping value with no config form"),
                }
            }
            document.insert(section.clone(), toml::Value::Table(table));
        }

        toml::to_string(&document).map_err(|e| ConfigError::Serialization {
            details: e.to_string(),
        })
    }

    /// Parses a document from TOML text.
    ///
    /// Top-level keys outside a section and values with no [`Value`] form
    /// (tables, dates, arrays that are not 2 or 3 numbers) are dropped.
    ///
    /// # Errors
    /// Returns `ConfigError::TomlParse` if the text is not valid TOML.
    pub fn from_toml_str(content: &str, location: &str) -> Result<Self, ConfigError> {
        let document = content
            .parse::<Table>()
            .map_err(|e| ConfigError::TomlParse {
                location: location.to_string(),
                details: e.to_string(),
            })?;

        let mut file = ConfigFile::new();

        for (section, item) in &document {
            let toml::Value::Table(table) = item else {
                debug!(key = %section, "Discarding config key outside a section");
                continue;
            };

            for (key, item) in table {
                match value_from_toml(item) {
                    Some(value) => file.set_value(section, key, value),
                    None => debug!(section = %section, key = %key, "Discarding unreadable config value"),
                }
            }
        }

        Ok(file)
    }

    /// Reads a document from disk.
    ///
    /// # Errors
    /// Returns `ConfigError::FileNotFound` if the file is missing,
    /// `ConfigError::Io` for other read failures and
    /// `ConfigError::TomlParse` for invalid content.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
            _ => ConfigError::io(path, &e),
        })?;

        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Writes the document to disk, replacing any existing file.
    ///
    /// The text goes to a temporary file in the same directory which is then
    /// renamed over `path`, so a failed write leaves the old file in place.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the temporary file cannot be created,
    /// written or persisted, and `ConfigError::Serialization` if rendering
    /// fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;
        let directory = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp = NamedTempFile::new_in(directory).map_err(|e| ConfigError::io(directory, &e))?;
        temp.write_all(content.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| ConfigError::io(temp.path(), &e))?;
        temp.persist(path).map_err(|e| ConfigError::io(path, &e.error))?;

        Ok(())
    }
}

fn value_to_toml(value: &Value) -> Option<toml::Value> {
    let item = match value {
        Value::None => return None,
        Value::Bool(b) => toml::Value::Boolean(*b),
        Value::Int(i) => toml::Value::Integer(*i),
        Value::Float(f) => toml::Value::Float(*f),
        Value::String(s) => toml::Value::String(s.clone()),
        Value::Name(n) => toml::Value::String(n.to_string()),
        Value::Vec2i(v) => integer_array(&[v.x, v.y]),
        Value::Vec3i(v) => integer_array(&[v.x, v.y, v.z]),
        Value::Vec2f(v) => float_array(&[v.x, v.y]),
        Value::Vec3f(v) => float_array(&[v.x, v.y, v.z]),
    };
    Some(item)
}

fn integer_array(components: &[i64]) -> toml::Value {
    toml::Value::Array(components.iter().copied().map(toml::Value::Integer).collect())
}

fn float_array(components: &[f64]) -> toml::Value {
    toml::Value::Array(components.iter().copied().map(toml::Value::Float).collect())
}

#[allow(clippy::cast_precision_loss)]
fn value_from_toml(item: &toml::Value) -> Option<Value> {
    match item {
        toml::Value::Boolean(b) => Some(Value::Bool(*b)),
        toml::Value::Integer(i) => Some(Value::Int(*i)),
        toml::Value::Float(f) => Some(Value::Float(*f)),
        toml::Value::String(s) => Some(Value::String(s.clone())),
        toml::Value::Array(items) => {
            if let Some(ints) = items.iter().map(toml::Value::as_integer).collect::<Option<Vec<i64>>>() {
                return match ints.as_slice() {
                    [x, y] => Some(Value::Vec2i(Vec2::new(*x, *y))),
                    [x, y, z] => Some(Value::Vec3i(Vec3::new(*x, *y, *z))),
                    _ => None,
                };
            }

            let floats = items
                .iter()
                .map(|item| match item {
                    toml::Value::Float(f) => Some(*f),
                    toml::Value::Integer(i) => Some(*i as f64),
                    _ => None,
                })
                .collect::<Option<Vec<f64>>>()?;

            match floats.as_slice() {
                [x, y] => Some(Value::Vec2f(Vec2::new(*x, *y))),
                [x, y, z] => Some(Value::Vec3f(Vec3::new(*x, *y, *z))),
                _ => None,
            }
        }
        _ => None,
    }
}
