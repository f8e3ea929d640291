use std::path::PathBuf;

use anyhow::bail;
use resolver_ops_snapshot::{operation_log_path, SnapshotFiles};

/// Default snapshot directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "./scripts/features/data";

/// Generator configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory holding the three snapshot files.
    pub data_dir: PathBuf,
    /// Where the operation log is written.
    pub output: PathBuf,
    /// Replay the generated log in memory and report what a second run
    /// would still emit.
    pub verify: bool,
}

impl GeneratorConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                 | Default                                          |
    /// |-------------------------|--------------------------------------------------|
    /// | `RESOLVER_OPS_DATA_DIR` | `./scripts/features/data`                        |
    /// | `RESOLVER_OPS_OUTPUT`   | `<data dir>/ImportResolverRecordOperations.csv`  |
    /// | `RESOLVER_OPS_VERIFY`   | `false`                                          |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(
            lookup("RESOLVER_OPS_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.into()),
        );

        let output = lookup("RESOLVER_OPS_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|| operation_log_path(&data_dir));

        let verify = match lookup("RESOLVER_OPS_VERIFY") {
            None => false,
            Some(raw) => parse_flag(&raw)?,
        };

        Ok(Self {
            data_dir,
            output,
            verify,
        })
    }

    /// A configuration reading and writing inside `data_dir`.
    pub fn for_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let output = operation_log_path(&data_dir);
        Self {
            data_dir,
            output,
            verify: false,
        }
    }

    pub fn snapshot_files(&self) -> SnapshotFiles {
        SnapshotFiles::in_dir(&self.data_dir)
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("RESOLVER_OPS_VERIFY must be a boolean, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = GeneratorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(
            config.output,
            PathBuf::from(DEFAULT_DATA_DIR).join("ImportResolverRecordOperations.csv")
        );
        assert!(!config.verify);
    }

    #[test]
    fn output_follows_data_dir() {
        let config =
            GeneratorConfig::from_lookup(lookup(&[("RESOLVER_OPS_DATA_DIR", "/snap")])).unwrap();
        assert_eq!(
            config.output,
            PathBuf::from("/snap/ImportResolverRecordOperations.csv")
        );
        assert_eq!(
            config.snapshot_files().ownership,
            PathBuf::from("/snap/RegistrarRecords.csv")
        );
    }

    #[test]
    fn explicit_output_wins() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            ("RESOLVER_OPS_DATA_DIR", "/snap"),
            ("RESOLVER_OPS_OUTPUT", "/tmp/ops.csv"),
        ]))
        .unwrap();
        assert_eq!(config.output, PathBuf::from("/tmp/ops.csv"));
    }

    #[test]
    fn verify_flag_parses() {
        for raw in ["1", "true", "TRUE", "yes", " on "] {
            let config =
                GeneratorConfig::from_lookup(lookup(&[("RESOLVER_OPS_VERIFY", raw)])).unwrap();
            assert!(config.verify, "{raw:?}");
        }
        let config =
            GeneratorConfig::from_lookup(lookup(&[("RESOLVER_OPS_VERIFY", "false")])).unwrap();
        assert!(!config.verify);
    }

    #[test]
    fn invalid_verify_flag_is_rejected() {
        assert!(GeneratorConfig::from_lookup(lookup(&[("RESOLVER_OPS_VERIFY", "maybe")])).is_err());
    }
}
