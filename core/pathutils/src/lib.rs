//! Hyper-V インスタンスのパス管理
//!
//! インスタンス格納ディレクトリ（リモートホストは UNC パス）の解決、ディレクトリの作成・削除、
//! config drive・ディスクイメージの探索、共有ストレージ判定を提供します。
//! 仮想化ホスト API と設定は外部の協調者として trait で注入します。

/// ドメイン型と純粋なパス変換
pub mod domain;

/// 設定ファイル・環境変数の読み込み
pub mod adapter;

/// ユースケース
pub mod usecase;

/// 標準アダプタでの組み立て
pub mod wiring;

#[cfg(test)]
mod tests;

pub use domain::{DirectoryPolicy, DiskFormat, PathUtilsConfig};
pub use usecase::PathUtils;
