//! Ports & Adapters のポート定義
//!
//! - inbound: なし（common はライブラリのためアプリの入り口を持たない）
//! - outbound: パス管理が外界（FS・時刻・環境変数・仮想化ホスト・ログ）に依頼するための trait

pub mod outbound;
