//! 扫描主流程与并行调度
use anyhow::{anyhow, Result};
use encoding_rs_io::DecodeReaderBytesBuilder;
use std::collections::BTreeMap;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::engine_bytes::scan_line_bytes;
use crate::engine_utf8::scan_line_with;
use crate::error::{open_source, ScanError};
use crate::findings::Finding;
use crate::lines::LineReader;
use crate::options::{ScanEngine, ScanOptions, ScanStats};
use crate::render::ReportWriter;

/// 单个文件的扫描结果
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    pub findings: Vec<Finding>,
    pub lines: usize,
}

/// 逐行扫描 `reader`，每个命中回调一次；返回读取的行数
/// 行与行相互独立，命中不会跨行合并
/// - Chars：按 BOM 识别编码（UTF-8 / UTF-16LE / UTF-16BE）并转为 UTF-8；无 BOM 时按 UTF-8 处理。
///   BOM 本身保留为 U+FEFF，会在第 1 行第 1 列被报告。
/// - Bytes：不解码，原始字节逐列扫描
pub fn scan_reader<R: Read>(reader: R, opts: &ScanOptions, on_finding: impl FnMut(Finding)) -> io::Result<usize> {
    match opts.engine {
        ScanEngine::Chars => {
            let decoded = DecodeReaderBytesBuilder::new().bom_sniffing(true).strip_bom(false).build(reader);
            scan_lines(BufReader::new(decoded), opts, on_finding)
        }
        ScanEngine::Bytes => scan_lines(BufReader::new(reader), opts, on_finding),
    }
}

fn scan_lines<R: BufRead>(reader: R, opts: &ScanOptions, mut on_finding: impl FnMut(Finding)) -> io::Result<usize> {
    let mut lines = LineReader::new(reader);
    let mut buf = Vec::new();
    let mut line_no = 0usize;
    while lines.read_line(&mut buf)? {
        line_no += 1;
        match opts.engine {
            ScanEngine::Chars => {
                let text = String::from_utf8_lossy(&buf);
                scan_line_with(&text, line_no, opts.range).for_each(&mut on_finding);
            }
            ScanEngine::Bytes => scan_line_bytes(&buf, line_no, opts.range).for_each(&mut on_finding),
        }
    }
    Ok(line_no)
}

/// 扫描单个文件
pub fn scan_file(path: &Path, opts: &ScanOptions) -> Result<FileReport, ScanError> {
    let file = open_source(path)?;
    let mut findings = Vec::new();
    let lines = scan_reader(file, opts, |f| findings.push(f))
        .map_err(|e| ScanError::from_io(path, e))?;
    Ok(FileReport { findings, lines })
}

/// 展开输入路径：
/// - 文件原样保留（不存在的路径也保留，由扫描阶段报错）
/// - 目录递归遍历，按文件名排序，保证输出顺序可复现
/// - 超过 `max_file_size` 的文件跳过，记入 `skipped`
pub fn collect_inputs(paths: &[PathBuf], opts: &ScanOptions) -> Inputs {
    let mut files: Vec<PathBuf> = vec![];
    let mut skipped: Vec<PathBuf> = vec![];
    for p in paths {
        if p.is_dir() {
            for entry in WalkDir::new(p).min_depth(1).sort_by_file_name() {
                match entry {
                    Ok(e) if e.file_type().is_file() => files.push(e.into_path()),
                    Ok(_) => {}
                    Err(e) => warn!(error = %e, "walk error"),
                }
            }
        } else {
            files.push(p.clone());
        }
    }

    if let Some(max) = opts.max_file_size {
        files.retain(|path| match std::fs::metadata(path) {
            Ok(md) if md.len() > max => {
                info!(file = %path.display(), size = md.len(), max, "skipping file over size limit");
                skipped.push(path.clone());
                false
            }
            _ => true,
        });
    }
    Inputs { files, skipped }
}

/// 展开后的输入
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    /// 待扫描文件（按输入顺序）
    pub files: Vec<PathBuf>,
    /// 因超过大小上限而跳过的文件
    pub skipped: Vec<PathBuf>,
}

/// 扫描全部输入并写出报告
/// 稳定性保证：报告顺序与输入顺序一致（并行时由 writer 按序号重排）
pub fn scan_and_write(paths: &[PathBuf], out: &mut dyn Write, opts: &ScanOptions) -> Result<ScanStats> {
    let Inputs { files, skipped } = collect_inputs(paths, opts);
    let mut stats = ScanStats { files_skipped: skipped.len(), ..ScanStats::default() };
    let mut report = ReportWriter::new(out, opts, files.len() > 1);
    report.begin()?;

    let threads = opts.threads.unwrap_or_else(num_cpus::get);
    if threads > 1 && files.len() > 1 {
        scan_parallel(&files, &mut report, opts, &mut stats, threads)?;
    } else {
        for path in &files {
            let res = scan_file(path, opts);
            emit_file(&mut report, &mut stats, path, res)?;
        }
    }

    report.finish()?;
    Ok(stats)
}

/// 写出单个文件的结果；读取失败的文件仅记录日志与计数
fn emit_file(
    report: &mut ReportWriter<'_>,
    stats: &mut ScanStats,
    path: &Path,
    res: Result<FileReport, ScanError>,
) -> Result<()> {
    let name = path.display().to_string();
    match res {
        Ok(file) => {
            stats.files_scanned += 1;
            stats.lines_scanned += file.lines;
            report.file_start(&name)?;
            for f in &file.findings {
                report.finding(&name, f)?;
                stats.findings_written += 1;
            }
            report.file_end()?;
            debug!(file = %name, lines = file.lines, findings = file.findings.len(), "file scanned");
        }
        Err(e) => {
            stats.files_failed += 1;
            error!(file = %name, error = %e, "skipping unreadable file");
        }
    }
    Ok(())
}

/// 并行调度：
/// - Rayon 线程池并行扫描不同文件（单文件内仍是顺序逐行）
/// - 单线程 writer 按 idx 重排后写出，输出与串行一致
fn scan_parallel(
    files: &[PathBuf],
    report: &mut ReportWriter<'_>,
    opts: &ScanOptions,
    stats: &mut ScanStats,
    threads: usize,
) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;

    type Msg = (usize /*idx*/, Result<FileReport, ScanError>);
    let (tx, rx) = channel::bounded::<Msg>(256);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let files_vec: Vec<PathBuf> = files.to_vec();
    let worker_opts = opts.clone();

    // writer 持有 &mut out，留在当前线程；扫描在后台线程的线程池中执行
    let scan_thread = std::thread::spawn(move || {
        pool.install(|| {
            // Receiver 被丢弃（writer 出错）后 send 失败，停止领取剩余文件
            let _ = files_vec.par_iter().enumerate().try_for_each(|(idx, path)| {
                tx.send((idx, scan_file(path, &worker_opts))).map_err(|_| ())
            });
        });
        // Sender 全部丢弃后 Receiver 收到关闭信号
    });

    let mut next_idx: usize = 0;
    let mut buffer: BTreeMap<usize, Result<FileReport, ScanError>> = BTreeMap::new();
    let mut written: Result<()> = Ok(());
    'recv: while let Ok((idx, res)) = rx.recv() {
        buffer.insert(idx, res);
        while let Some(res) = buffer.remove(&next_idx) {
            if let Err(e) = emit_file(report, stats, &files[next_idx], res) {
                written = Err(e);
                break 'recv;
            }
            next_idx += 1;
        }
    }

    // 先关闭接收端再等待扫描线程，写出失败时不会遗留后台扫描
    drop(rx);
    scan_thread.join().map_err(|_| anyhow!("scan worker panicked"))?;
    written
}
