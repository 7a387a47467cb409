use crate::error::{FaceMatchError, Result};
use face_match_common::DEFAULT_JPEG_QUALITY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const SERVER_ENV: &str = "FACE_MATCH_SERVER";
const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    /// 未設定ならタイムアウトなし（ブラウザと同じ）
    pub timeout_seconds: Option<u64>,
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            timeout_seconds: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// `config` サブコマンド用: 壊れた設定でも読み込んで直せるようにする
    pub fn load_for_repair() -> Result<Self> {
        Ok(Self::load_for_repair_from(&Self::config_path()?))
    }

    pub fn load_for_repair_from(path: &std::path::Path) -> Self {
        let parsed = std::fs::read_to_string(path)
            .ok()
            .map(|content| serde_json::from_str::<Config>(&content));
        match parsed {
            None => Self::default(),
            Some(Ok(mut config)) => {
                if let Err(e) = config.validate() {
                    tracing::warn!(%e, "invalid jpeg_quality replaced with default");
                    config.jpeg_quality = DEFAULT_JPEG_QUALITY;
                }
                config
            }
            Some(Err(e)) => {
                tracing::warn!(%e, path = %path.display(), "unreadable config replaced with default");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FaceMatchError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("face-match").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(FaceMatchError::Config(format!(
                "jpeg_quality는 1~100이어야 합니다: {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    /// 接続先: 引数 > 環境変数 > 設定ファイル
    pub fn resolve_server(&self, cli_server: Option<&str>) -> String {
        if let Some(server) = cli_server {
            return server.to_string();
        }
        if let Ok(server) = std::env::var(SERVER_ENV) {
            if !server.trim().is_empty() {
                return server;
            }
        }
        self.server_url.clone()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn set_server(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FaceMatchError::Config(format!(
                "서버 주소는 http:// 또는 https://로 시작해야 합니다: {}",
                url
            )));
        }
        self.server_url = url;
        Ok(())
    }
}
