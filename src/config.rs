use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Deserialize)]
pub struct Reddit {
    pub subreddit: String,
    pub num_posts: u32,
    pub num_comments: u32,
    pub user_agent: String,
}

#[derive(Deserialize)]
pub struct Summarizer {
    pub model: String,
    pub prompt_template: PathBuf,
}

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub markdown_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Feed {
    pub title: String,
    pub site_url: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
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
    pub reddit: Reddit,
    pub summarizer: Summarizer,
    pub paths: Paths,
    pub feed: Feed,
    pub log: Option<Log>,
}

/// API credentials come from the environment rather than the configuration
/// file, so they never end up committed next to the site content.
pub struct Credentials {
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub gemini_api_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Credentials, ConfigError> {
        Ok(Credentials {
            reddit_client_id: check_credential("REDDIT_CLIENT_ID", env::var("REDDIT_CLIENT_ID"))?,
            reddit_client_secret: check_credential(
                "REDDIT_CLIENT_SECRET",
                env::var("REDDIT_CLIENT_SECRET"),
            )?,
            gemini_api_key: check_credential("GEMINI_API_KEY", env::var("GEMINI_API_KEY"))?,
        })
    }
}

fn check_credential(
    name: &'static str,
    value: Result<String, env::VarError>,
) -> Result<String, ConfigError> {
    let value = match value {
        Ok(value) => value,
        Err(_) => return Err(ConfigError::MissingCredential(name)),
    };
    if value.trim().is_empty() {
        return Err(ConfigError::MissingCredential(name));
    }
    if value.starts_with("YOUR_") {
        return Err(ConfigError::PlaceholderCredential(name));
    }
    Ok(value)
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe().unwrap();
        let exe_dir = cur_exe.parent().unwrap().to_str().unwrap();
        let str_path = path.to_str().unwrap();
        PathBuf::from(str_path.replace("${exe_dir}", exe_dir))
    } else {
        path
    }
}

pub fn read_config(cfg_path: &Path) -> Result<Config, ConfigError> {
    let cfg_content = fs::read_to_string(cfg_path).map_err(|e| ConfigError::Read {
        path: cfg_path.to_path_buf(),
        source: e,
    })?;

    let mut cfg: Config = toml::from_str::<Config>(cfg_content.as_str())?;

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir),
        markdown_dir: parse_path(cfg.paths.markdown_dir),
        output_dir: parse_path(cfg.paths.output_dir),
    };
    cfg.summarizer.prompt_template = parse_path(cfg.summarizer.prompt_template);

    Ok(cfg)
}

pub const CFG_FILE_NAME: &str = "hindsight.toml";

fn find_config() -> Option<PathBuf> {
    let exe_path = env::current_exe().unwrap();
    let exe_dir = exe_path.parent().unwrap();
    let cur_dir = env::current_dir().unwrap();

    if exe_dir.join(CFG_FILE_NAME).exists() {
        return Some(exe_dir.join(CFG_FILE_NAME));
    }

    if cur_dir.join(CFG_FILE_NAME).exists() {
        return Some(cur_dir.join(CFG_FILE_NAME));
    }

    let cfg_dir = dirs::config_dir().expect("Could not find user config dir");
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

pub fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, ConfigError> {
    let config_path = match cfg_path.or_else(find_config) {
        Some(path) => path,
        None => {
            return Err(ConfigError::Read {
                path: PathBuf::from(CFG_FILE_NAME),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no configuration file next to the executable, in the current directory or in the user config dir",
                ),
            });
        }
    };

    read_config(&config_path)
}
