//! アダプター（設定ファイル・環境変数の読み込み）

pub mod config_loader;

pub use config_loader::load_config;
