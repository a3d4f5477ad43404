use std::{env, path::{Path, PathBuf}};

use clap::Parser;

use crate::{tools::log::{log_info, LogServiceType}, Error, Result};

const ENV_API_KEY: &str = "FACEPP_API_KEY";
const ENV_API_SECRET: &str = "FACEPP_API_SECRET";
const ENV_API_URL: &str = "FACEPP_API_URL";
const ENV_DIR: &str = "FACE_COMPARE_DIR";

pub const DEFAULT_API_URL: &str = "https://api-us.faceplusplus.com";
pub const DETECTION_FILE: &str = "face_tokens.json";
pub const COMPARISON_FILE: &str = "face_comparison_results.json";

/// Detect every face in a photo and compare each pair with the Face++ service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CompareArgs {
    /// Image to analyse
    pub image: PathBuf,

    /// Directory holding the JSON artifacts (defaults to the working directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Base url of the face service
    #[arg(long)]
    pub api_url: Option<String>,

    /// Reuse face_tokens.json when present instead of calling detect again
    #[arg(short, long)]
    pub reuse_detection: bool,
}

/// Click a face to see how similar it is to every other detected face.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct ViewerArgs {
    /// Original image the faces were detected on
    pub image: PathBuf,

    /// Directory holding the JSON artifacts (defaults to the working directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self> where F: Fn(&str) -> Option<String> {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty()).ok_or_else(|| Error::MissingCredential(name.to_string()));
        Ok(Credentials {
            api_key: read(ENV_API_KEY)?,
            api_secret: read(ENV_API_SECRET)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub credentials: Credentials,
    pub api_url: String,
    pub artifact_dir: PathBuf,
}

impl CompareConfig {
    pub fn from_args(args: &CompareArgs) -> Result<Self> {
        let credentials = Credentials::from_env()?;
        let api_url = args.api_url.clone()
            .or_else(|| env::var(ENV_API_URL).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let artifact_dir = get_artifact_dir(args.dir.clone());
        log_info(LogServiceType::Config, format!("Face service: {}", api_url));
        log_info(LogServiceType::Config, format!("Artifact directory: {:?}", artifact_dir));
        Ok(CompareConfig { credentials, api_url, artifact_dir })
    }

    pub fn artifact_path(&self, name: &str) -> PathBuf {
        get_artifact_path(&self.artifact_dir, name)
    }
}

pub fn get_artifact_dir(arg: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = arg {
        dir
    } else if let Ok(val) = env::var(ENV_DIR) {
        PathBuf::from(val)
    } else {
        PathBuf::from(".")
    }
}

pub fn get_artifact_path(dir: &Path, name: &str) -> PathBuf {
    let mut path = dir.to_path_buf();
    path.push(name);
    path
}
