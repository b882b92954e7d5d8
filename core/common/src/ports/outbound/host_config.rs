//! 仮想化ホスト API Outbound ポート
//!
//! VM の構成ルートディレクトリをホストに問い合わせる。
//! ホストごとのハンドルはファクトリから受け取り、グローバルな状態は持たない。

use crate::domain::{InstanceName, RemoteHost};
use crate::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

/// VM 構成ルートの問い合わせ結果
///
/// VM がホストに存在しないことはエラーではなく `NotFound` で返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmConfigRoot {
    Found(PathBuf),
    NotFound,
}

/// 1 ホスト分の構成情報プロバイダ
pub trait HostConfigProvider: Send + Sync {
    /// VM の構成ルートディレクトリ（ホスト側のローカルパス）を返す
    fn get_vm_config_root_dir(&self, instance: &InstanceName) -> Result<VmConfigRoot, Error>;
}

/// ホストごとのプロバイダを返すファクトリ
///
/// ローカルホストのハンドルは PathUtils 生成時に一度だけ取得する。
pub trait HostConfigProviderFactory: Send + Sync {
    fn local(&self) -> Arc<dyn HostConfigProvider>;
    fn remote(&self, host: &RemoteHost) -> Result<Arc<dyn HostConfigProvider>, Error>;
}
