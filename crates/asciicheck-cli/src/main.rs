use anyhow::{bail, Context, Result};
use asciicheck_core::{load_config, scan_and_write, ConfigFile, OutputFormat, ScanEngine, ScanOptions, ScanStats};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "asciicheck", version, about = "检查文本文件中可打印 ASCII 之外的字符")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 扫描文件或目录并输出命中报告
    Scan {
        /// 输入路径（文件或目录，可多个）
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 输出文件；缺省写到标准输出
        #[arg(long)]
        output: Option<PathBuf>,

        /// 报告格式：text 或 json
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// 扫描引擎：chars（UTF-8 码点）或 bytes（原始字节）；覆盖配置文件
        #[arg(long, value_parser = ["chars", "bytes"])]
        engine: Option<String>,

        /// 线程数（多文件并行；"auto"=CPU 核心数）
        #[arg(long, default_value = "auto")]
        threads: String,

        /// 最大扫描文件大小（单位字节）；覆盖配置文件
        #[arg(long)]
        max_file_size: Option<u64>,

        /// 配置文件路径（TOML）
        #[arg(long)]
        config: Option<PathBuf>,

        /// 以转义形式显示字符（如 \t、\u{feff}）
        #[arg(long)]
        escape: bool,
    },
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { paths, output, format, engine, threads, max_file_size, config, escape } => {
            info!(?paths, ?output, "starting scan");

            let cfg = match &config {
                Some(path) => Some(load_config(path).context("load config")?),
                None => None,
            };
            let opts = build_options(cfg.as_ref(), engine.as_deref(), max_file_size, &format, &threads, escape);

            let mut out: Box<dyn Write> = match &output {
                Some(p) => Box::new(BufWriter::new(File::create(p).context("create output file")?)),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };
            let stats = scan_and_write(&paths, &mut *out, &opts).context("scan and write failed")?;
            out.flush().context("flush output")?;

            info!(
                files_scanned = stats.files_scanned,
                files_failed = stats.files_failed,
                files_skipped = stats.files_skipped,
                lines_scanned = stats.lines_scanned,
                findings_written = stats.findings_written,
                "scan finished"
            );
            ensure_all_read(&stats)?;
        }
    }

    Ok(())
}

/// 合并配置文件与命令行参数；命令行参数优先
fn build_options(
    cfg: Option<&ConfigFile>,
    engine: Option<&str>,
    max_file_size: Option<u64>,
    format: &str,
    threads: &str,
    escape: bool,
) -> ScanOptions {
    let mut opts = ScanOptions::default();
    if let Some(cfg) = cfg {
        cfg.apply_to(&mut opts);
    }
    if let Some(engine) = engine {
        opts.engine = parse_engine(engine);
    }
    if max_file_size.is_some() {
        opts.max_file_size = max_file_size;
    }
    opts.format = match format {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Text,
    };
    opts.escape = escape;
    opts.threads = parse_threads(threads);
    opts
}

/// 有输入文件读取失败时以非零状态退出（报告已写出）
fn ensure_all_read(stats: &ScanStats) -> Result<()> {
    if stats.files_failed > 0 {
        bail!("{} input file(s) could not be read", stats.files_failed);
    }
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，避免与标准输出上的报告混在一起
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn parse_engine(s: &str) -> ScanEngine {
    match s {
        "bytes" => ScanEngine::Bytes,
        _ => ScanEngine::Chars,
    }
}

/// 解析线程参数
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") { return None; }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
