//! UNC パス変換（純粋関数）
//!
//! ホスト側のローカルパス `X:\path` を管理共有 `\\<host>\X$\path` に読み替える。
//! ファイルシステムには一切触れない。

use super::PathUtilsConfig;
use common::domain::RemoteHost;

const UNC_PREFIX: &str = r"\\";

/// `\\` で始まるなら UNC パス
pub fn is_unc_path(path: &str) -> bool {
    path.starts_with(UNC_PREFIX)
}

/// ホスト側ローカルパスを、そのホストの管理共有経由の UNC パスに変換する
///
/// UNC パスはそのまま返す。ドライブ区切りの `:` は `$` に置き換える。
pub fn get_remote_unc_path(remote_host: &RemoteHost, path: &str) -> String {
    if is_unc_path(path) {
        return path.to_string();
    }
    format!(r"\\{}\{}", remote_host, path.replacen(':', "$", 1))
}

/// インスタンス格納ディレクトリ（ルート）のパス文字列
///
/// 1. リモート指定かつ共有名あり: `\\<host>\<share>`
/// 2. 設定パスが UNC: そのまま
/// 3. リモート指定: 管理共有 `\\<host>\<drive>$\...`
/// 4. それ以外: 設定パスそのまま
pub fn instances_dir_for(config: &PathUtilsConfig, remote_host: Option<&RemoteHost>) -> String {
    match remote_host {
        Some(host) => match config.instances_path_share() {
            Some(share) => format!(r"\\{}\{}", host, share),
            None => get_remote_unc_path(host, &config.instances_path),
        },
        None => config.instances_path.clone(),
    }
}
