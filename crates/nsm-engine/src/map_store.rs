//! Persistent legacy → canonical rename map, partitioned by side.
//!
//! The map is the hand-off artifact between the declaration stage (which
//! fills it) and the reference stage (which reads it), and it survives
//! across invocations through a `_classmap.json` sidecar file. Absent or
//! corrupt state is never fatal: it simply means "no prior renames".

use nsm_foundation::error::MigrateResult;
use nsm_foundation::model::{ApplicationSide, CanonicalIdentity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the sidecar artifact inside the configured directory
pub const CLASSMAP_FILE_NAME: &str = "_classmap.json";

/// Side-partitioned rename entries, exactly the sidecar wire shape.
///
/// BTreeMaps keep serialization deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct ClassMap {
    #[serde(default)]
    site: BTreeMap<String, String>,
    #[serde(default)]
    admin: BTreeMap<String, String>,
    #[serde(default)]
    api: BTreeMap<String, String>,
}

/// Load/save/query/insert access to the persisted rename map.
#[derive(Debug)]
pub struct RenameMapStore {
    file_path: PathBuf,
    map: ClassMap,
}

impl RenameMapStore {
    /// Open the store for a sidecar directory, loading any prior state.
    ///
    /// A missing or unreadable sidecar is treated as empty; load failures
    /// are logged, never propagated.
    pub fn new(directory: impl AsRef<Path>) -> Self {
        let file_path = directory.as_ref().join(CLASSMAP_FILE_NAME);
        let map = Self::load(&file_path);
        Self { file_path, map }
    }

    fn load(file_path: &Path) -> ClassMap {
        let contents = match std::fs::read_to_string(file_path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!(path = %file_path.display(), error = %err, "no prior class map");
                return ClassMap::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(map) => map,
            Err(err) => {
                warn!(
                    path = %file_path.display(),
                    error = %err,
                    "class map is corrupt; starting from empty partitions"
                );
                ClassMap::default()
            }
        }
    }

    /// Record a rename.
    ///
    /// The canonical FQN is partitioned by the side label that follows the
    /// common namespace prefix. Entries whose FQN does not carry the prefix
    /// or a recognized side label are dropped: a malformed name must not
    /// corrupt the map.
    pub fn add_entry(&mut self, legacy_name: &str, canonical_fqn: &str, namespace_prefix: &str) {
        let prefix = namespace_prefix.trim_matches('\\');
        let trimmed = canonical_fqn.trim_matches('\\');

        let Some(relative) = trimmed.strip_prefix(prefix) else {
            debug!(legacy_name, canonical_fqn, "dropping entry outside the namespace prefix");
            return;
        };

        let side = relative
            .trim_matches('\\')
            .split('\\')
            .next()
            .and_then(ApplicationSide::from_label);

        let Some(side) = side else {
            debug!(legacy_name, canonical_fqn, "dropping entry without a side label");
            return;
        };

        self.partition_mut(side)
            .insert(legacy_name.to_string(), trimmed.to_string());
    }

    /// Record a rename expressed as a derived identity.
    pub fn add_identity(
        &mut self,
        legacy_name: &str,
        identity: &CanonicalIdentity,
        namespace_prefix: &str,
    ) {
        self.add_entry(legacy_name, &identity.fqn(), namespace_prefix);
    }

    /// The completed legacy → canonical map for one side.
    pub fn map_for(&self, side: ApplicationSide) -> &BTreeMap<String, String> {
        match side {
            ApplicationSide::Site => &self.map.site,
            ApplicationSide::Administrator => &self.map.admin,
            ApplicationSide::Api => &self.map.api,
        }
    }

    fn partition_mut(&mut self, side: ApplicationSide) -> &mut BTreeMap<String, String> {
        match side {
            ApplicationSide::Site => &mut self.map.site,
            ApplicationSide::Administrator => &mut self.map.admin,
            ApplicationSide::Api => &mut self.map.api,
        }
    }

    /// Total number of entries across all partitions
    pub fn len(&self) -> usize {
        self.map.site.len() + self.map.admin.len() + self.map.api.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize all partitions back to the sidecar file, overwriting it.
    pub fn save(&self) -> MigrateResult<()> {
        let contents = serde_json::to_string_pretty(&self.map)?;
        std::fs::write(&self.file_path, contents)?;
        debug!(path = %self.file_path.display(), entries = self.len(), "class map saved");
        Ok(())
    }
}
