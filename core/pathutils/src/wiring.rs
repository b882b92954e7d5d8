//! 配線: 標準アダプタで PathUtils を組み立てる

use std::path::Path;
use std::sync::Arc;

use common::adapter::{FileJsonLog, NoopLog, StdClock, StdEnvResolver, StdFileSystem};
use common::error::Error;
use common::ports::outbound::{
    EnvResolver, FileSystem, HostConfigProviderFactory, Log, LogLevel, LogRecord,
};

use crate::adapter::config_loader::{load_config, LOG_FILE_ENV};
use crate::domain::PathUtilsConfig;
use crate::usecase::PathUtils;

/// 配線: 与えた設定と標準 FS・時刻で PathUtils を組み立てる
pub fn wire_path_utils(
    config: PathUtilsConfig,
    hosts: Arc<dyn HostConfigProviderFactory>,
    log: Arc<dyn Log>,
) -> PathUtils {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    PathUtils::new(config, fs, Arc::new(StdClock), hosts, log)
}

/// 配線: 設定ファイル・環境変数から設定とログ出力先を解決して組み立てる
///
/// PATHUTILS_LOG_FILE が設定されていればそのファイルへ JSONL で追記し、無ければログを出さない。
pub fn wire_from_env(
    hosts: Arc<dyn HostConfigProviderFactory>,
    config_path: Option<&Path>,
) -> Result<PathUtils, Error> {
    wire_from_env_with(hosts, config_path, &StdEnvResolver)
}

/// `wire_from_env` の環境変数解決を差し替えられる版
pub fn wire_from_env_with(
    hosts: Arc<dyn HostConfigProviderFactory>,
    config_path: Option<&Path>,
    env: &dyn EnvResolver,
) -> Result<PathUtils, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let config = load_config(fs.as_ref(), env, config_path)?;

    let log: Arc<dyn Log> = match env.var(LOG_FILE_ENV) {
        Some(path) => Arc::new(FileJsonLog::new(Arc::clone(&fs), path)),
        None => Arc::new(NoopLog),
    };
    let _ = log.log(
        &LogRecord::new(LogLevel::Info, "config loaded")
            .layer("wiring")
            .kind("config")
            .field("instances_path", config.instances_path.clone())
            .field("instances_path_share", config.instances_path_share.clone()),
    );

    Ok(PathUtils::new(config, fs, Arc::new(StdClock), hosts, log))
}
