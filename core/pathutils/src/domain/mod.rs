//! ドメイン型（ディレクトリ方針・ディスク形式・コンソールログ）
//!
//! ファイルシステムに触れない値とパス文字列の純粋な変換だけを置く。

pub mod config;
pub mod unc;

use std::fmt;
use std::path::{Path, PathBuf};

pub use config::PathUtilsConfig;
pub use unc::{get_remote_unc_path, instances_dir_for, is_unc_path};

/// 解決したディレクトリに対する副作用の指定
///
/// 両方 false なら存在確認のみ。両方 true の場合は作成してから削除する。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryPolicy {
    pub create_dir: bool,
    pub remove_dir: bool,
}

impl DirectoryPolicy {
    /// 副作用なし
    pub const NONE: DirectoryPolicy = DirectoryPolicy {
        create_dir: false,
        remove_dir: false,
    };

    /// 無ければ作成する
    pub fn create() -> Self {
        Self {
            create_dir: true,
            remove_dir: false,
        }
    }

    /// あれば削除する
    pub fn remove() -> Self {
        Self {
            create_dir: false,
            remove_dir: true,
        }
    }

    pub fn is_noop(&self) -> bool {
        !self.create_dir && !self.remove_dir
    }
}

/// ディスクイメージ形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiskFormat {
    Vhd,
    Vhdx,
    Iso,
}

impl DiskFormat {
    /// ファイル拡張子（小文字、ドットなし）
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Vhd => "vhd",
            Self::Vhdx => "vhdx",
            Self::Iso => "iso",
        }
    }
}

impl fmt::Display for DiskFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// config drive として探す形式（探索順）
pub const CONFIGDRIVE_FORMATS: [DiskFormat; 2] = [DiskFormat::Vhd, DiskFormat::Iso];

/// ルート・エフェメラルディスクとイメージとして探す形式（探索順、旧形式が先）
pub const VHD_FORMATS: [DiskFormat; 2] = [DiskFormat::Vhd, DiskFormat::Vhdx];

/// `<dir>/<base_name>.<ext>`
pub fn disk_file_path(dir: &Path, base_name: &str, format: DiskFormat) -> PathBuf {
    dir.join(format!("{}.{}", base_name, format.extension()))
}

/// コンソールログとローテート済みログのパス（コピー順）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLogPaths {
    pub log: PathBuf,
    pub archived_log: PathBuf,
}

impl ConsoleLogPaths {
    pub const LOG_FILE_NAME: &'static str = "console.log";

    /// インスタンスディレクトリ配下のコンソールログ
    pub fn in_dir(instance_dir: &Path) -> Self {
        let log = instance_dir.join(Self::LOG_FILE_NAME);
        let mut archived = log.clone().into_os_string();
        archived.push(".1");
        Self {
            log,
            archived_log: PathBuf::from(archived),
        }
    }

    /// log → archived_log の順で返す
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [self.log.as_path(), self.archived_log.as_path()].into_iter()
    }
}
