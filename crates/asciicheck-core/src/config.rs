//! 配置文件加载（TOML）
//!
//! 所有键均可省略：
//! ```toml
//! allowed_low = 0x20
//! allowed_high = 0x7E
//! found_label = "found"
//! engine = "chars"        # 或 "bytes"
//! max_file_size = 5242880
//! ```
use serde::Deserialize;
use std::path::Path;

use crate::error::ScanError;
use crate::findings::AllowedRange;
use crate::options::{ScanEngine, ScanOptions};

/// 配置文件结构
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub allowed_low: Option<u32>,
    pub allowed_high: Option<u32>,
    pub found_label: Option<String>,
    pub engine: Option<ScanEngine>,
    pub max_file_size: Option<u64>,
}

impl ConfigFile {
    /// 合并后的允许区间（未配置的一端取默认值）
    pub fn range(&self) -> AllowedRange {
        let d = AllowedRange::default();
        AllowedRange { low: self.allowed_low.unwrap_or(d.low), high: self.allowed_high.unwrap_or(d.high) }
    }

    /// 将配置写入扫描选项；未出现的键保持原值
    pub fn apply_to(&self, opts: &mut ScanOptions) {
        opts.range = self.range();
        if let Some(label) = &self.found_label {
            opts.found_label = label.clone();
        }
        if let Some(engine) = self.engine {
            opts.engine = engine;
        }
        if self.max_file_size.is_some() {
            opts.max_file_size = self.max_file_size;
        }
    }
}

/// 从文本解析配置并校验
pub fn parse_config(path: &Path, txt: &str) -> Result<ConfigFile, ScanError> {
    let cfg: ConfigFile = toml::from_str(txt)
        .map_err(|e| ScanError::Config { path: path.to_path_buf(), reason: e.to_string() })?;
    let range = cfg.range();
    if range.low > range.high {
        return Err(ScanError::Config {
            path: path.to_path_buf(),
            reason: format!("allowed_low ({:#x}) is greater than allowed_high ({:#x})", range.low, range.high),
        });
    }
    Ok(cfg)
}

/// 读取并解析配置文件
pub fn load_config(path: &Path) -> Result<ConfigFile, ScanError> {
    let txt = std::fs::read_to_string(path).map_err(|e| ScanError::from_io(path, e))?;
    parse_config(path, &txt)
}
