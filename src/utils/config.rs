//! 설정 파일 (TOML)
//!
//! 위치: `COBALT_CONFIG_FILE` 또는 `<config_dir>/cobaltarchiver/config.toml`.
//! 파일이 없으면 기본값을 쓰고, 형식이 잘못되면 `CobaltError::Config`.

use crate::system::tool::DEFAULT_PROGRAM;
use crate::utils::error::{CobaltError, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_ENV: &str = "COBALT_CONFIG_FILE";
const TOOL_ENV: &str = "COBALT_TOOL";
const LOG_ENV: &str = "COBALT_LOG";
const APP_DIR: &str = "cobaltarchiver";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tool: ToolSettings,
    pub ui: UiSettings,
    pub extract: ExtractSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// 7-Zip 실행 파일 이름 또는 경로 (`7z`, `7za`)
    pub program: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub theme: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSettings {
    /// 없으면 압축 파일이 있는 디렉토리
    pub default_destination: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// off|error|warn|info|debug|trace
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LogSettings {
    /// 알 수 없는 값은 `Info`
    pub fn level_filter(&self) -> LevelFilter {
        self.level.trim().parse().unwrap_or(LevelFilter::Info)
    }

    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.clone().or_else(|| {
            dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join("cobalt.log"))
        })
    }
}

impl Settings {
    /// 기본 위치에서 로드한 뒤 환경 변수 덮어쓰기 적용
    pub fn load() -> Result<Self> {
        let mut settings = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        settings.apply_env_overrides(|key| env::var(key).ok());
        Ok(settings)
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var(CONFIG_FILE_ENV) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// 파일이 없으면 기본값
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            CobaltError::Config(msg) => CobaltError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CobaltError::Config(e.message().to_string()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(self).map_err(|e| CobaltError::Config(e.to_string()))?;
        fs::write(path, data)?;
        Ok(())
    }

    /// 빈 값은 무시
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(program) = lookup(TOOL_ENV).filter(|v| !v.trim().is_empty()) {
            self.tool.program = program.trim().to_string();
        }
        if let Some(level) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            self.log.level = level.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tool.program, "7z");
        assert_eq!(settings.ui.theme, "dark");
        assert_eq!(settings.extract.default_destination, None);
        assert_eq!(settings.log.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let settings = Settings::parse("[tool]\nprogram = \"7za\"\n").expect("parse");
        assert_eq!(settings.tool.program, "7za");
        assert_eq!(settings.ui.theme, "dark");
    }

    #[test]
    fn test_parse_full_file() {
        let content = r#"
[tool]
program = "/opt/7zip/7zz"

[ui]
theme = "light"

[extract]
default_destination = "/srv/out"

[log]
level = "debug"
file = "/tmp/cobalt-test.log"
"#;
        let settings = Settings::parse(content).expect("parse");
        assert_eq!(settings.tool.program, "/opt/7zip/7zz");
        assert_eq!(settings.ui.theme, "light");
        assert_eq!(
            settings.extract.default_destination,
            Some(PathBuf::from("/srv/out"))
        );
        assert_eq!(settings.log.level_filter(), LevelFilter::Debug);
        assert_eq!(
            settings.log.file_path(),
            Some(PathBuf::from("/tmp/cobalt-test.log"))
        );
    }

    #[test]
    fn test_parse_malformed_is_config_error() {
        let result = Settings::parse("[tool\nprogram = ");
        assert!(matches!(result, Err(CobaltError::Config(_))));
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let temp = tempdir().expect("create tempdir");
        let settings = Settings::load_from(&temp.path().join("none.toml")).expect("load");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = tempdir().expect("create tempdir");
        let path = temp.path().join("nested").join("config.toml");
        let mut settings = Settings::default();
        settings.ui.theme = "light".to_string();
        settings.extract.default_destination = Some(PathBuf::from("/tmp/out"));

        settings.save_to(&path).expect("save");
        let loaded = Settings::load_from(&path).expect("load");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings.apply_env_overrides(|key| match key {
            "COBALT_TOOL" => Some(" 7za ".to_string()),
            "COBALT_LOG" => Some("trace".to_string()),
            _ => None,
        });
        assert_eq!(settings.tool.program, "7za");
        assert_eq!(settings.log.level_filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_env_overrides_ignore_blank() {
        let mut settings = Settings::default();
        settings.apply_env_overrides(|_| Some("   ".to_string()));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let log = LogSettings {
            level: "loud".to_string(),
            file: None,
        };
        assert_eq!(log.level_filter(), LevelFilter::Info);
    }
}
