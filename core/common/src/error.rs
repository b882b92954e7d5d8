//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。終了コードは sysexits に揃える。

use std::io;

/// エラー型
///
/// 「見つからない」はエラーにせず `Option` / 列挙型で返す。ここに来るのは呼び出し元へ伝播させるものだけ。
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// ディレクトリの作成・削除に管理者権限が必要（アクセス拒否・不正なパス名）
    #[error("Administrative privileges are required: {0}")]
    AdminRequired(String),

    /// その他のファイルシステムエラー。元の io::Error をそのまま保持する
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(String),

    /// 仮想化ホスト API の失敗（VM 未登録は含まない）
    #[error("Host error: {0}")]
    Host(String),
}

impl Error {
    /// コンテキスト付きで io::Error を包む
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    pub fn admin_required(msg: impl Into<String>) -> Self {
        Error::AdminRequired(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn host(msg: impl Into<String>) -> Self {
        Error::Host(msg.into())
    }

    /// 元の io::Error の種別（Io 以外は None）
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// 元の OS エラーコード（Windows では winerror）
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Error::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::NotFound)
    }

    /// 終了コード（sysexits.h 準拠）
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            Error::Json(_) => 65,
            Error::Host(_) => 69,
            Error::Io { .. } => 74,
            Error::AdminRequired(_) => 77,
            Error::Config(_) => 78,
        }
    }
}

impl From<io::Error> for Error {
    fn from(source: io::Error) -> Self {
        Error::Io {
            context: "I/O error".to_string(),
            source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
