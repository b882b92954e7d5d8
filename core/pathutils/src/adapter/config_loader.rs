//! 設定の読み込み（adapter 層）
//!
//! 優先順位:
//! 1. 明示指定された設定ファイル
//! 2. 環境変数 PATHUTILS_CONFIG の設定ファイル
//! 3. 既定値
//!
//! その上で PATHUTILS_INSTANCES_PATH / PATHUTILS_INSTANCES_PATH_SHARE が個別の値を上書きする。

use crate::domain::PathUtilsConfig;
use common::error::Error;
use common::ports::outbound::{EnvResolver, FileSystem};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "PATHUTILS_CONFIG";
pub const INSTANCES_PATH_ENV: &str = "PATHUTILS_INSTANCES_PATH";
pub const INSTANCES_PATH_SHARE_ENV: &str = "PATHUTILS_INSTANCES_PATH_SHARE";
pub const LOG_FILE_ENV: &str = "PATHUTILS_LOG_FILE";

/// 設定ファイルと環境変数から PathUtilsConfig を組み立てる
pub fn load_config(
    fs: &dyn FileSystem,
    env: &dyn EnvResolver,
    explicit_path: Option<&Path>,
) -> Result<PathUtilsConfig, Error> {
    let config_path = explicit_path
        .map(Path::to_path_buf)
        .or_else(|| env.var(CONFIG_ENV).map(PathBuf::from));

    let mut config = match config_path {
        Some(path) => {
            let json = fs.read_to_string(&path)?;
            PathUtilsConfig::parse(&json)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?
        }
        None => PathUtilsConfig::default(),
    };

    if let Some(path) = env.var(INSTANCES_PATH_ENV) {
        config.instances_path = path;
    }
    if let Some(share) = env.var(INSTANCES_PATH_SHARE_ENV) {
        config.instances_path_share = share;
    }

    if config.instances_path.trim().is_empty() {
        return Err(Error::config("instances_path must not be empty"));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[derive(Default)]
    struct MapEnv(HashMap<String, String>);

    impl MapEnv {
        fn with(mut self, key: &str, value: &str) -> Self {
            self.0.insert(key.to_string(), value.to_string());
            self
        }
    }

    impl EnvResolver for MapEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).filter(|v| !v.is_empty()).cloned()
        }
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = load_config(&StdFileSystem, &MapEnv::default(), None).unwrap();
        assert_eq!(config, PathUtilsConfig::default());
    }

    #[test]
    fn test_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pathutils.json");
        std::fs::write(&path, r#"{"instances_path": "E:\\inst"}"#).unwrap();

        let config = load_config(&StdFileSystem, &MapEnv::default(), Some(&path)).unwrap();
        assert_eq!(config.instances_path, r"E:\inst");
        assert_eq!(config.instances_path_share(), None);
    }

    #[test]
    fn test_file_from_env_and_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pathutils.json");
        std::fs::write(
            &path,
            r#"{"instances_path": "E:\\inst", "instances_path_share": "from_file"}"#,
        )
        .unwrap();

        let env = MapEnv::default()
            .with(CONFIG_ENV, path.to_str().unwrap())
            .with(INSTANCES_PATH_SHARE_ENV, "from_env");
        let config = load_config(&StdFileSystem, &env, None).unwrap();
        assert_eq!(config.instances_path, r"E:\inst");
        assert_eq!(config.instances_path_share, "from_env");
    }

    #[test]
    fn test_instances_path_env_override() {
        let env = MapEnv::default().with(INSTANCES_PATH_ENV, r"\\nas\instances");
        let config = load_config(&StdFileSystem, &env, None).unwrap();
        assert_eq!(config.instances_path, r"\\nas\instances");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = load_config(&StdFileSystem, &MapEnv::default(), Some(&missing)).unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {}", err);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{").unwrap();
        let err = load_config(&StdFileSystem, &MapEnv::default(), Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_empty_instances_path_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, r#"{"instances_path": ""}"#).unwrap();
        let err = load_config(&StdFileSystem, &MapEnv::default(), Some(&path)).unwrap_err();
        assert!(err.to_string().contains("instances_path must not be empty"));
    }
}
