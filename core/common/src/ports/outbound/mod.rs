//! Outbound ポート: アプリが外界（FS・時刻・環境変数・仮想化ホスト・ログ）を使うための trait

pub mod clock;
pub mod env_resolver;
pub mod fs;
pub mod host_config;
pub mod log;

pub use clock::Clock;
pub use env_resolver::EnvResolver;
pub use fs::{FileMetadata, FileSystem, TempFile};
pub use host_config::{HostConfigProvider, HostConfigProviderFactory, VmConfigRoot};
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
