use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use spdlog::warn;

use crate::content::CategoryGroup;
use crate::i18n::{Language, TranslationTable, Translator};
use crate::player::{PlayMode, PlayerSettings, Track, DEFAULT_VOLUME};

const EXE_DIR_VAR: &str = "${exe_dir}";

#[derive(Deserialize)]
pub struct Site {
    /// Site URL, or a directory holding a `posts` folder
    pub base: String,
    /// Document paths relative to `<base>/posts`, in display order
    #[serde(default)]
    pub posts: Vec<String>,
}

impl Site {
    pub fn is_remote(&self) -> bool {
        self.base.starts_with("http://") || self.base.starts_with("https://")
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Player {
    pub default_mode: PlayMode,
    pub volume: f64,
    pub autoplay: bool,
    /// Length of every track in the terminal player
    pub simulated_track_secs: f64,
}

impl Default for Player {
    fn default() -> Self {
        Player {
            default_mode: PlayMode::default(),
            volume: DEFAULT_VOLUME,
            autoplay: true,
            simulated_track_secs: 180.0,
        }
    }
}

impl Player {
    pub fn settings(&self) -> PlayerSettings {
        PlayerSettings {
            mode: self.default_mode,
            volume: self.volume,
            autoplay: self.autoplay,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct I18n {
    pub default_language: Language,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    #[serde(default)]
    pub categories: Vec<CategoryGroup>,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub player: Player,
    #[serde(default)]
    pub i18n: I18n,
    /// Language code to string table
    #[serde(default)]
    pub translations: HashMap<String, TranslationTable>,
    pub log: Option<Log>,
}

impl Config {
    /// Tables with an unknown language code are skipped.
    pub fn translator(&self) -> Translator {
        let mut tables = HashMap::new();
        for (code, table) in &self.translations {
            match Language::from_code(code) {
                Some(language) => {
                    tables.insert(language, table.clone());
                }
                None => warn!("Ignoring translations for unknown language {}", code),
            }
        }
        Translator::new(self.i18n.default_language, tables)
    }
}

fn exe_dir() -> io::Result<PathBuf> {
    let cur_exe = env::current_exe()?;
    match cur_exe.parent() {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Err(io::Error::new(ErrorKind::NotFound, "Executable has no parent directory")),
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    match path.to_str() {
        Some(str_path) if str_path.starts_with(EXE_DIR_VAR) => {
            let exe_dir = exe_dir()?;
            Ok(PathBuf::from(str_path.replace(EXE_DIR_VAR, &exe_dir.to_string_lossy())))
        }
        _ => Ok(path),
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if !cfg.site.is_remote() {
        cfg.site.base = parse_path(PathBuf::from(&cfg.site.base))?.to_string_lossy().into_owned();
    }

    if let Some(ref mut log) = cfg.log {
        if let Some(location) = log.location.take() {
            log.location = Some(parse_path(location)?);
        }
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
