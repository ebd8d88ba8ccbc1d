use crate::error::{RulesError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 出力先を上書きする環境変数
pub const OUTPUT_ENV: &str = "REVIEW_RULES_OUTPUT";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// convert の既定出力先
    pub rules_output: Option<PathBuf>,
    /// 追加の最適化辞書（JSON）
    pub dictionary: Option<PathBuf>,
    /// 読み込むシート番号（0始まり）
    pub sheet_index: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| RulesError::Config(format!("{}: {}", config_path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RulesError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("review-rules").join("config.json"))
    }

    /// convert の出力先（環境変数 → 設定ファイルの順）
    pub fn rules_output(&self) -> Option<PathBuf> {
        if let Ok(path) = std::env::var(OUTPUT_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        self.rules_output.clone()
    }

    pub fn set_rules_output(&mut self, path: PathBuf) -> Result<()> {
        self.rules_output = Some(path);
        self.save()
    }

    pub fn set_dictionary(&mut self, path: PathBuf) -> Result<()> {
        self.dictionary = Some(path);
        self.save()
    }
}
