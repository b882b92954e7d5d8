//! ファイルシステム Outbound ポート
//!
//! usecase はこの trait 経由でのみファイル I/O を行う。

use crate::error::Error;
use std::ffi::OsStr;
use std::path::Path;

/// ファイルメタデータ（サイズ・種別・更新時刻）
#[derive(Debug, Clone)]
pub struct FileMetadata {
    len: u64,
    is_file: bool,
    is_dir: bool,
    modified_ms: Option<u64>,
}

impl FileMetadata {
    pub fn new(len: u64, is_file: bool, is_dir: bool) -> Self {
        Self {
            len,
            is_file,
            is_dir,
            modified_ms: None,
        }
    }

    /// 更新時刻（Unix epoch ミリ秒）を付与する
    pub fn with_modified_ms(mut self, modified_ms: u64) -> Self {
        self.modified_ms = Some(modified_ms);
        self
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_file(&self) -> bool {
        self.is_file
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// 更新時刻（プラットフォームが返さない場合は None）
    pub fn modified_ms(&self) -> Option<u64> {
        self.modified_ms
    }
}

/// スコープ付き一時ファイル
///
/// drop で削除される。呼び出し側が途中で `?` で抜けても残らない。
pub trait TempFile: Send {
    fn path(&self) -> &Path;

    fn file_name(&self) -> Option<&OsStr> {
        self.path().file_name()
    }
}

/// ファイルシステム抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdFileSystem` やテスト用のメモリ FS など。
/// エラーは `Error::Io` で返し、元の io::Error の種別を保持すること（権限エラーの判定に使う）。
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;
    fn metadata(&self, path: &Path) -> Result<FileMetadata, Error>;
    /// 中間ディレクトリごと作成する
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;
    /// ディレクトリを再帰的に削除する（中身ごと）
    fn remove_dir_all(&self, path: &Path) -> Result<(), Error>;
    /// ファイルをコピーする（コピー先は上書き）
    fn copy(&self, from: &Path, to: &Path) -> Result<(), Error>;
    /// `dir` 直下に一意な名前の一時ファイルを作る
    fn create_temp_file(&self, dir: &Path) -> Result<Box<dyn TempFile>, Error>;
    /// 追記用に開く（存在しなければ作成）。返した Writer を drop すると閉じる。
    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error>;

    /// パスが存在するか（metadata が取れれば true）
    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).is_ok()
    }
}
