//! 環境変数解決 Outbound ポート
//!
//! 設定ファイルの場所や設定値の上書きを環境変数から解決する。
//! usecase / adapter はこの trait 経由でのみ環境変数にアクセスする。

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のマップなど。
pub trait EnvResolver: Send + Sync {
    /// 環境変数を取得する。未設定・空文字は None
    fn var(&self, key: &str) -> Option<String>;
}
