use num_cpus;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use log::{error, warn};
use std::fs::File;
use std::io::prelude::*;
use std::time::Duration;

use crate::exception::Exception;
use crate::param::{
    DEFAULT_CACHE_SIZE, DEFAULT_EXPIRATION_SECS, DEFAULT_SWEEP_INTERVAL_SECS,
    DEFAULT_TOKEN_LENGTH,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_expiration_secs")]
    expiration_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    sweep_interval_secs: u64,
    #[serde(default = "default_token_length")]
    token_length: usize,
    #[serde(default = "default_cache_size")]
    cache_size: usize,
    #[serde(default)]
    worker_threads: usize,
}

fn default_expiration_secs() -> u64 {
    DEFAULT_EXPIRATION_SECS
}

fn default_sweep_interval_secs() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECS
}

fn default_token_length() -> usize {
    DEFAULT_TOKEN_LENGTH
}

fn default_cache_size() -> usize {
    DEFAULT_CACHE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            expiration_secs: default_expiration_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            token_length: default_token_length(),
            cache_size: default_cache_size(),
            worker_threads: num_cpus::get(),
        }
    }

    pub fn from_toml(filename: &str) -> Result<Self, Exception> {
        let mut file = match File::open(filename) {
            Ok(f) => f,
            Err(e) => {
                error!("无法打开配置文件 {}：{}", filename, e);
                return Err(Exception::ConfigUnreadable);
            }
        };
        let mut str_val = String::new();
        if let Err(e) = file.read_to_string(&mut str_val) {
            error!("读取配置文件 {} 失败：{}", filename, e);
            return Err(Exception::ConfigUnreadable);
        }
        Ok(Self::from_str_toml(&str_val))
    }

    pub fn from_str_toml(text: &str) -> Self {
        let mut raw_config: Config = match toml::from_str(text) {
            Ok(t) => t,
            Err(e) => {
                error!("无法成功从配置文件构建配置对象，使用默认配置：{}", e);
                Config::new()
            }
        };
        if raw_config.worker_threads == 0 {
            raw_config.worker_threads = num_cpus::get();
        }
        if raw_config.cache_size == 0 {
            warn!(
                "cache_size被设置为0，但目前尚不支持禁用缓存，因此该值将被改为{}。",
                DEFAULT_CACHE_SIZE
            );
            raw_config.cache_size = DEFAULT_CACHE_SIZE;
        }
        if raw_config.token_length == 0 {
            warn!(
                "token_length被设置为0，无法生成令牌，因此该值将被改为{}。",
                DEFAULT_TOKEN_LENGTH
            );
            raw_config.token_length = DEFAULT_TOKEN_LENGTH;
        }
        if raw_config.sweep_interval_secs == 0 {
            warn!("sweep_interval_secs被设置为0，将使用默认清扫周期。");
            raw_config.sweep_interval_secs = DEFAULT_SWEEP_INTERVAL_SECS;
        }
        raw_config
    }
}

impl Config {
    pub fn expiration_secs(&self) -> u64 {
        self.expiration_secs
    }

    pub fn expiration(&self) -> Duration {
        Duration::from_secs(self.expiration_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn token_length(&self) -> usize {
        self.token_length
    }

    pub fn cache_size(&self) -> usize {
        self.cache_size
    }

    pub fn worker_threads(&self) -> usize {
        self.worker_threads
    }
}
