//! インスタンス格納パスの解決とディレクトリ操作
//!
//! - 格納ルート / インスタンスディレクトリの解決（リモートは UNC パス）
//! - ディレクトリの作成・削除（権限エラーは AdminRequired に変換）
//! - config drive・ディスク・イメージの拡張子探索、ファイルの経過時間
//! - コンソールログのコピー、共有ストレージ判定
//!
//! 外界（FS・時刻・仮想化ホスト・ログ）にはポート経由でのみ触れる。

use crate::domain::{
    disk_file_path, get_remote_unc_path, instances_dir_for, ConsoleLogPaths, DirectoryPolicy,
    DiskFormat, PathUtilsConfig, CONFIGDRIVE_FORMATS, VHD_FORMATS,
};
use crate::usecase::shared_storage::probe_shared_storage;
use common::domain::{InstanceName, RemoteHost};
use common::error::Error;
use common::ports::outbound::{
    Clock, FileSystem, HostConfigProvider, HostConfigProviderFactory, Log, LogLevel, LogRecord,
    VmConfigRoot,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Windows の ERROR_INVALID_NAME
#[cfg(windows)]
const ERROR_INVALID_NAME: i32 = 123;

const BASE_VHD_DIR: &str = "_base";
const EXPORT_DIR: &str = "export";
const SNAPSHOTS_DIR: &str = "Snapshots";
const REVERT_DIR_SUFFIX: &str = "_revert";

const CONFIGDRIVE_NAME: &str = "configdrive";
const CONFIGDRIVE_RESCUE_NAME: &str = "configdrive-rescue";
const ROOT_DISK_NAME: &str = "root";
const RESCUE_DISK_NAME: &str = "rescue";
const EPHEMERAL_DISK_NAME: &str = "ephemeral";

/// インスタンスのパス管理
pub struct PathUtils {
    config: PathUtilsConfig,
    fs: Arc<dyn FileSystem>,
    clock: Arc<dyn Clock>,
    hosts: Arc<dyn HostConfigProviderFactory>,
    local_host: Arc<dyn HostConfigProvider>,
    log: Arc<dyn Log>,
}

impl PathUtils {
    pub fn new(
        config: PathUtilsConfig,
        fs: Arc<dyn FileSystem>,
        clock: Arc<dyn Clock>,
        hosts: Arc<dyn HostConfigProviderFactory>,
        log: Arc<dyn Log>,
    ) -> Self {
        let local_host = hosts.local();
        Self {
            config,
            fs,
            clock,
            hosts,
            local_host,
            log,
        }
    }

    pub fn config(&self) -> &PathUtilsConfig {
        &self.config
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }

    pub fn copy(&self, from: &Path, to: &Path) -> Result<(), Error> {
        self.fs.copy(from, to)
    }

    /// インスタンス格納ルート
    ///
    /// 設定値とリモートホスト名だけから決まる。ファイルシステムは見ない。
    pub fn get_instances_dir(&self, remote_host: Option<&RemoteHost>) -> PathBuf {
        PathBuf::from(instances_dir_for(&self.config, remote_host))
    }

    /// 格納ルート直下のサブディレクトリ（ポリシーを適用して返す）
    pub fn get_instances_sub_dir(
        &self,
        dir_name: impl AsRef<Path>,
        remote_host: Option<&RemoteHost>,
        policy: DirectoryPolicy,
    ) -> Result<PathBuf, Error> {
        let path = self.get_instances_dir(remote_host).join(dir_name);
        self.check_dir(&path, policy)?;
        Ok(path)
    }

    /// ディレクトリが無ければ中間ディレクトリごと作成する
    pub fn check_create_dir(&self, path: &Path) -> Result<(), Error> {
        if self.fs.exists(path) {
            return Ok(());
        }
        self.fs.create_dir_all(path)?;
        self.log_event(
            LogRecord::new(LogLevel::Info, "directory created")
                .kind("dir_policy")
                .field("path", path.display().to_string()),
        );
        Ok(())
    }

    /// ディレクトリがあれば中身ごと削除する。削除中に消えていた場合も成功扱い
    pub fn check_remove_dir(&self, path: &Path) -> Result<(), Error> {
        if !self.fs.exists(path) {
            return Ok(());
        }
        match self.fs.remove_dir_all(path) {
            Ok(()) => {}
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => return Err(e),
        }
        self.log_event(
            LogRecord::new(LogLevel::Info, "directory removed")
                .kind("dir_policy")
                .field("path", path.display().to_string()),
        );
        Ok(())
    }

    /// ポリシーを適用する。権限不足・不正なパス名は AdminRequired、それ以外はそのまま返す
    pub fn check_dir(&self, path: &Path, policy: DirectoryPolicy) -> Result<(), Error> {
        self.apply_policy(path, policy)
            .map_err(|e| translate_access_error(path, e))
    }

    fn apply_policy(&self, path: &Path, policy: DirectoryPolicy) -> Result<(), Error> {
        if policy.create_dir {
            self.check_create_dir(path)?;
        }
        if policy.remove_dir {
            self.check_remove_dir(path)?;
        }
        Ok(())
    }

    /// インスタンスディレクトリ
    ///
    /// 設定上のディレクトリ（`<instances_dir>\<instance>`）が存在すればそれを使う。
    /// 無ければホストに VM の構成ルートを問い合わせ、見つかればそちらを返す（リモートなら UNC に変換）。
    /// VM も無ければ設定上のディレクトリを返す。存在確認はリモートでも構築したパスに対して行う。
    pub fn get_instance_dir(
        &self,
        instance: &InstanceName,
        remote_host: Option<&RemoteHost>,
        policy: DirectoryPolicy,
    ) -> Result<PathBuf, Error> {
        let configured_dir =
            self.get_instances_sub_dir(instance.as_str(), remote_host, DirectoryPolicy::NONE)?;

        let instance_dir = if self.fs.exists(&configured_dir) {
            configured_dir
        } else {
            self.resolve_from_host(instance, remote_host, configured_dir)?
        };

        self.check_dir(&instance_dir, policy)?;
        Ok(instance_dir)
    }

    fn resolve_from_host(
        &self,
        instance: &InstanceName,
        remote_host: Option<&RemoteHost>,
        configured_dir: PathBuf,
    ) -> Result<PathBuf, Error> {
        let host = match remote_host {
            Some(h) => self.hosts.remote(h)?,
            None => Arc::clone(&self.local_host),
        };

        match host.get_vm_config_root_dir(instance)? {
            VmConfigRoot::NotFound => Ok(configured_dir),
            VmConfigRoot::Found(root) => {
                let dir = match remote_host {
                    Some(h) => PathBuf::from(get_remote_unc_path(h, &root.to_string_lossy())),
                    None => root,
                };
                self.log_event(
                    LogRecord::new(LogLevel::Debug, "instance dir taken from vm config root")
                        .kind("instance_dir")
                        .field("instance", instance.to_string())
                        .field("configured_dir", configured_dir.display().to_string())
                        .field("instance_dir", dir.display().to_string()),
                );
                Ok(dir)
            }
        }
    }

    /// マイグレーション巻き戻し用ディレクトリ（`<instance>_revert`）
    pub fn get_instance_migr_revert_dir(
        &self,
        instance: &InstanceName,
        policy: DirectoryPolicy,
    ) -> Result<PathBuf, Error> {
        let dir_name = format!("{}{}", instance, REVERT_DIR_SUFFIX);
        self.get_instances_sub_dir(dir_name, None, policy)
    }

    /// スナップショット格納ディレクトリ。インスタンス未指定なら格納ルート直下
    pub fn get_instance_snapshot_dir(
        &self,
        instance: Option<&InstanceName>,
        policy: DirectoryPolicy,
    ) -> Result<PathBuf, Error> {
        let dir_name = match instance {
            Some(i) => Path::new(i.as_str()).join(SNAPSHOTS_DIR),
            None => PathBuf::from(SNAPSHOTS_DIR),
        };
        self.get_instances_sub_dir(dir_name, None, policy)
    }

    /// ベースイメージのキャッシュディレクトリ
    pub fn get_base_vhd_dir(&self) -> Result<PathBuf, Error> {
        self.get_instances_sub_dir(BASE_VHD_DIR, None, DirectoryPolicy::NONE)
    }

    pub fn get_export_dir(
        &self,
        instance: Option<&InstanceName>,
        policy: DirectoryPolicy,
    ) -> Result<PathBuf, Error> {
        let dir_name = match instance {
            Some(i) => Path::new(EXPORT_DIR).join(i.as_str()),
            None => PathBuf::from(EXPORT_DIR),
        };
        self.get_instances_sub_dir(dir_name, None, policy)
    }

    pub fn get_vm_console_log_paths(
        &self,
        instance: &InstanceName,
        remote_host: Option<&RemoteHost>,
    ) -> Result<ConsoleLogPaths, Error> {
        let instance_dir = self.get_instance_dir(instance, remote_host, DirectoryPolicy::NONE)?;
        Ok(ConsoleLogPaths::in_dir(&instance_dir))
    }

    /// コンソールログを移行先ホストへコピーする（ログ → ローテート済みログの順）
    ///
    /// 存在しないローカルログは飛ばす。途中で失敗してもコピー済みのファイルは戻さない。
    /// instances_path が UNC のときはコピー元と先が同じパスになるので何もしない（自分自身への copy はログを空にする）。
    pub fn copy_vm_console_logs(
        &self,
        instance: &InstanceName,
        dest_host: &RemoteHost,
    ) -> Result<(), Error> {
        let local_paths = self.get_vm_console_log_paths(instance, None)?;
        let remote_paths = self.get_vm_console_log_paths(instance, Some(dest_host))?;

        for (local, remote) in local_paths.iter().zip(remote_paths.iter()) {
            if local == remote {
                self.log_event(
                    LogRecord::new(LogLevel::Debug, "console log already in place")
                        .kind("console_log")
                        .field("instance", instance.to_string())
                        .field("path", local.display().to_string()),
                );
                continue;
            }
            if !self.fs.exists(local) {
                continue;
            }
            self.fs.copy(local, remote)?;
            self.log_event(
                LogRecord::new(LogLevel::Info, "console log copied")
                    .kind("console_log")
                    .field("instance", instance.to_string())
                    .field("from", local.display().to_string())
                    .field("to", remote.display().to_string()),
            );
        }
        Ok(())
    }

    pub fn get_root_vhd_path(
        &self,
        instance: &InstanceName,
        format: DiskFormat,
        rescue: bool,
    ) -> Result<PathBuf, Error> {
        let instance_dir = self.get_instance_dir(instance, None, DirectoryPolicy::NONE)?;
        Ok(disk_file_path(&instance_dir, root_disk_name(rescue), format))
    }

    pub fn get_ephemeral_vhd_path(
        &self,
        instance: &InstanceName,
        format: DiskFormat,
    ) -> Result<PathBuf, Error> {
        let instance_dir = self.get_instance_dir(instance, None, DirectoryPolicy::NONE)?;
        Ok(disk_file_path(&instance_dir, EPHEMERAL_DISK_NAME, format))
    }

    pub fn get_configdrive_path(
        &self,
        instance: &InstanceName,
        format: DiskFormat,
        remote_host: Option<&RemoteHost>,
        rescue: bool,
    ) -> Result<PathBuf, Error> {
        let instance_dir = self.get_instance_dir(instance, remote_host, DirectoryPolicy::NONE)?;
        Ok(disk_file_path(&instance_dir, configdrive_name(rescue), format))
    }

    pub fn lookup_root_vhd_path(
        &self,
        instance: &InstanceName,
        rescue: bool,
    ) -> Result<Option<PathBuf>, Error> {
        let instance_dir = self.get_instance_dir(instance, None, DirectoryPolicy::NONE)?;
        Ok(self.lookup_disk(&instance_dir, root_disk_name(rescue), &VHD_FORMATS))
    }

    pub fn lookup_ephemeral_vhd_path(
        &self,
        instance: &InstanceName,
    ) -> Result<Option<PathBuf>, Error> {
        let instance_dir = self.get_instance_dir(instance, None, DirectoryPolicy::NONE)?;
        Ok(self.lookup_disk(&instance_dir, EPHEMERAL_DISK_NAME, &VHD_FORMATS))
    }

    /// config drive を形式の固定順で探す。見つからなければ None
    pub fn lookup_configdrive_path(
        &self,
        instance: &InstanceName,
        rescue: bool,
    ) -> Result<Option<PathBuf>, Error> {
        let instance_dir = self.get_instance_dir(instance, None, DirectoryPolicy::NONE)?;
        Ok(self.lookup_disk(&instance_dir, configdrive_name(rescue), &CONFIGDRIVE_FORMATS))
    }

    /// ベースイメージを `.vhd` → `.vhdx` の順で探す
    pub fn get_image_path(&self, image_name: &str) -> Result<Option<PathBuf>, Error> {
        let base_dir = self.get_base_vhd_dir()?;
        Ok(self.lookup_disk(&base_dir, image_name, &VHD_FORMATS))
    }

    fn lookup_disk(&self, dir: &Path, base_name: &str, formats: &[DiskFormat]) -> Option<PathBuf> {
        formats
            .iter()
            .map(|format| disk_file_path(dir, base_name, *format))
            .find(|path| self.fs.exists(path))
    }

    /// 最終更新からの経過時間（未来の更新時刻は 0）
    pub fn get_age_of_file(&self, path: &Path) -> Result<Duration, Error> {
        let now_ms = self.clock.now_ms();
        let modified_ms = self.fs.metadata(path)?.modified_ms().ok_or_else(|| {
            Error::io(
                format!("Failed to get modification time of '{}'", path.display()),
                io::Error::new(io::ErrorKind::Unsupported, "modification time unavailable"),
            )
        })?;
        Ok(Duration::from_millis(now_ms.saturating_sub(modified_ms)))
    }

    /// 2 つのディレクトリが同じストレージを指しているか（`dest_dir` にプローブを置く）
    pub fn check_dirs_shared_storage(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
    ) -> Result<bool, Error> {
        let shared = probe_shared_storage(self.fs.as_ref(), source_dir, dest_dir)?;
        self.log_event(
            LogRecord::new(LogLevel::Debug, "shared storage checked")
                .kind("shared_storage")
                .field("source_dir", source_dir.display().to_string())
                .field("dest_dir", dest_dir.display().to_string())
                .field("shared", shared),
        );
        Ok(shared)
    }

    /// ローカルの格納ルートと、`dest_host` から見た格納ルートが同じストレージか
    pub fn check_remote_instances_dir_shared(&self, dest_host: &RemoteHost) -> Result<bool, Error> {
        let local_dir = self.get_instances_dir(None);
        let remote_dir = self.get_instances_dir(Some(dest_host));
        self.check_dirs_shared_storage(&local_dir, &remote_dir)
    }

    fn log_event(&self, record: LogRecord) {
        let _ = self.log.log(&record.layer("usecase"));
    }
}

fn configdrive_name(rescue: bool) -> &'static str {
    if rescue {
        CONFIGDRIVE_RESCUE_NAME
    } else {
        CONFIGDRIVE_NAME
    }
}

fn root_disk_name(rescue: bool) -> &'static str {
    if rescue {
        RESCUE_DISK_NAME
    } else {
        ROOT_DISK_NAME
    }
}

fn translate_access_error(path: &Path, err: Error) -> Error {
    if is_access_error(&err) {
        Error::admin_required(format!("cannot access '{}': {}", path.display(), err))
    } else {
        err
    }
}

fn is_access_error(err: &Error) -> bool {
    match err.io_kind() {
        Some(io::ErrorKind::PermissionDenied) | Some(io::ErrorKind::InvalidInput) => true,
        _ => is_invalid_name(err),
    }
}

#[cfg(windows)]
fn is_invalid_name(err: &Error) -> bool {
    err.raw_os_error() == Some(ERROR_INVALID_NAME)
}

#[cfg(not(windows))]
fn is_invalid_name(_err: &Error) -> bool {
    false
}
