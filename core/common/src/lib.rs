//! Hyper-V ドライバ共通ライブラリ
//!
//! パス管理ユーティリティが使うエラー型・ドメイン型・Outbound ポートとその標準実装を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（インスタンス名・リモートホスト名）
pub mod domain;

/// Outbound ポート（FS・時刻・環境変数・仮想化ホスト・ログ）
pub mod ports;

/// ポートの標準実装
pub mod adapter;
