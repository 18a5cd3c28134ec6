use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub(crate) migrate: MigrateSection,
    #[serde(default)]
    pub(crate) methods: IndexMap<String, CommandValue>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct MigrateSection {
    #[serde(default, rename = "rollback-on-failure")]
    pub(crate) rollback_on_failure: Option<bool>,
    #[serde(default, rename = "migrations-dir")]
    pub(crate) migrations_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CommandValue {
    Shell(String),
    Argv(Vec<String>),
}
