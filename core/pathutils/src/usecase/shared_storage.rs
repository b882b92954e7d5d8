//! 共有ストレージ判定
//!
//! 書き込み側ディレクトリに一意な名前の一時ファイルを置き、もう一方のディレクトリから見えるかで判定する。
//! 非同期・キャッシュされた FS ビューでは偽陰性があり得る。

use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::Path;

/// `dest_dir` に置いたプローブファイルが `source_dir` 側から見えれば true
///
/// プローブファイルは戻る前（エラー時も含む）に drop で削除される。
pub fn probe_shared_storage(
    fs: &dyn FileSystem,
    source_dir: &Path,
    dest_dir: &Path,
) -> Result<bool, Error> {
    let probe = fs.create_temp_file(dest_dir)?;
    let name = probe.file_name().ok_or_else(|| {
        Error::invalid_argument(format!(
            "temporary file in '{}' has no file name",
            dest_dir.display()
        ))
    })?;
    let shared = fs.exists(&source_dir.join(name));
    Ok(shared)
}
