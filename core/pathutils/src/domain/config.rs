//! パス管理の設定型
//!
//! インスタンス格納パスと、リモートから見たときの共有名。ファイル読みは adapter::config_loader で行う。

use serde::Deserialize;

/// 既定のインスタンス格納パス
pub const DEFAULT_INSTANCES_PATH: &str = r"C:\OpenStack\Instances";

/// パス管理の設定（読み取り専用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathUtilsConfig {
    /// インスタンス格納パス（ローカルパスまたは UNC パス）
    pub instances_path: String,
    /// リモートホストから見たインスタンス格納先の共有名（空なら未設定）
    pub instances_path_share: String,
}

impl Default for PathUtilsConfig {
    fn default() -> Self {
        Self {
            instances_path: DEFAULT_INSTANCES_PATH.to_string(),
            instances_path_share: String::new(),
        }
    }
}

/// serde 用の内部構造（共有名はトップレベルと hyperv セクションのどちらでも書ける）
#[derive(Debug, Deserialize)]
struct PathUtilsConfigRaw {
    instances_path: Option<String>,
    instances_path_share: Option<String>,
    hyperv: Option<HypervSectionRaw>,
}

#[derive(Debug, Deserialize)]
struct HypervSectionRaw {
    instances_path_share: Option<String>,
}

impl PathUtilsConfig {
    pub fn new(instances_path: impl Into<String>, instances_path_share: impl Into<String>) -> Self {
        Self {
            instances_path: instances_path.into(),
            instances_path_share: instances_path_share.into(),
        }
    }

    /// 共有名（空文字は未設定扱い）
    pub fn instances_path_share(&self) -> Option<&str> {
        Some(self.instances_path_share.as_str()).filter(|s| !s.is_empty())
    }

    /// JSON 文字列からパース。省略したキーは既定値
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: PathUtilsConfigRaw = serde_json::from_str(json)?;
        let defaults = Self::default();
        let share = raw
            .instances_path_share
            .or_else(|| raw.hyperv.and_then(|h| h.instances_path_share))
            .unwrap_or(defaults.instances_path_share);
        Ok(Self {
            instances_path: raw.instances_path.unwrap_or(defaults.instances_path),
            instances_path_share: share,
        })
    }
}
