use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::domain::PersonRecord;
use super::store::{ProfileStore, StoreError};
use crate::workflows::people::{PersonId, Role};

/// Parse a `profiles` export with columns `id,full_name,email,role,avatar_url`.
/// Blank cells read as absent.
pub fn parse_profiles<R: Read>(reader: R) -> Result<Vec<PersonRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut people = Vec::new();
    for row in csv_reader.deserialize::<ProfileRow>() {
        let row = row?;
        people.push(PersonRecord {
            id: PersonId(row.id),
            display_name: row.full_name,
            email: row.email,
            role: Role::from_raw(row.role.as_deref()),
            avatar_url: row.avatar_url,
        });
    }

    Ok(people)
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    full_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    role: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    avatar_url: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}

/// Profile store backed by a CSV export on disk. The file is re-read on
/// every call so edits show up on the next refresh.
#[derive(Debug, Clone)]
pub struct CsvProfileStore {
    path: PathBuf,
}

impl CsvProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for CsvProfileStore {
    fn list_people(&self) -> Result<Vec<PersonRecord>, StoreError> {
        let file = File::open(&self.path).map_err(|err| {
            StoreError::Unavailable(format!("{}: {err}", self.path.display()))
        })?;
        let people = parse_profiles(file).map_err(|err| {
            StoreError::Unavailable(format!("{}: {err}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), count = people.len(), "profiles loaded");
        Ok(people)
    }
}
