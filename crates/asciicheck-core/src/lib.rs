//! 文本字符检查核心库
//!
//! 设计要点：
//! - 逐行单遍扫描，报告可打印 ASCII（0x20..=0x7E）之外的所有字符。
//! - 同一行内连续相同的越界字符归并为一个命中（列区间，1 起始、闭区间）；不跨行合并。
//! - 两种引擎：Chars（UTF-8 码点）与 Bytes（原始字节）。
//! - 多文件时可并行扫描，但报告顺序始终与输入顺序一致。

mod options;
mod types;
mod findings;
mod error;
mod config;
mod lines;
mod engine_bytes;
mod engine_utf8;
mod render;
mod scan;

pub use options::{OutputFormat, ScanEngine, ScanOptions, ScanStats};
pub use types::OutputItem;
pub use findings::{AllowedRange, Finding};
pub use error::{open_source, ScanError};
pub use config::{load_config, parse_config, ConfigFile};
pub use engine_utf8::{scan_line, scan_line_with, LineScanner};
pub use engine_bytes::{scan_line_bytes, ByteChars};
pub use render::{format_finding, ANALYSIS_COMPLETE};
pub use scan::{collect_inputs, scan_and_write, scan_file, scan_reader, FileReport, Inputs};
