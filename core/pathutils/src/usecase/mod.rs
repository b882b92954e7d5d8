//! ユースケース（パス解決・ディレクトリ操作・共有ストレージ判定）

pub mod path_utils;
pub mod shared_storage;

pub use path_utils::PathUtils;
pub use shared_storage::probe_shared_storage;
