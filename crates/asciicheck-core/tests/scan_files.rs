use asciicheck_core::{scan_and_write, scan_line, OutputFormat, ScanOptions};
use std::fs;
use std::path::PathBuf;

const SAMPLES: &[&str] = &[
    "",
    "hello world",
    "AB\tC",
    "\x01\x01\x01",
    "\x01\x02",
    "\0\t\0\t",
    "tail\x7f\x7f\x7f",
    "\u{feff}header,value",
    "naïve café — “quoted”",
    "mixed\x1b[31mred\x1b[0m\u{a0}\u{a0}end",
];

fn disallowed(ch: char) -> bool {
    !(0x20..=0x7e).contains(&(ch as u32))
}

#[test]
fn every_disallowed_column_is_covered_exactly_once() {
    for line in SAMPLES {
        let chars: Vec<char> = line.chars().collect();
        let mut covered = vec![0u32; chars.len()];
        for f in scan_line(line, 1) {
            assert!(f.start_column >= 1 && f.start_column <= f.end_column && f.end_column <= chars.len());
            let mut span = 0;
            for col in f.start_column..=f.end_column {
                assert_eq!(chars[col - 1], f.character, "line {:?}", line);
                covered[col - 1] += 1;
                span += 1;
            }
            assert_eq!(f.width(), span);
            assert_eq!(f.is_single_column(), span == 1);
        }
        for (i, ch) in chars.iter().enumerate() {
            let expected = if disallowed(*ch) { 1 } else { 0 };
            assert_eq!(covered[i], expected, "line {:?} col {}", line, i + 1);
        }
    }
}

#[test]
fn spans_are_maximal_and_ordered() {
    for line in SAMPLES {
        let chars: Vec<char> = line.chars().collect();
        let found: Vec<_> = scan_line(line, 1).collect();
        for pair in found.windows(2) {
            assert!(pair[0].end_column < pair[1].start_column);
        }
        for f in &found {
            if f.start_column > 1 {
                assert_ne!(chars[f.start_column - 2], f.character);
            }
            if f.end_column < chars.len() {
                assert_ne!(chars[f.end_column], f.character);
            }
        }
    }
}

fn write_fixtures(dir: &std::path::Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for (i, line) in SAMPLES.iter().enumerate() {
        let p = dir.join(format!("f{:02}.txt", i));
        fs::write(&p, format!("{}\n{}\r\nok\n", line, line)).unwrap();
        paths.push(p);
    }
    paths
}

#[test]
fn parallel_report_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_fixtures(dir.path());

    for format in [OutputFormat::Text, OutputFormat::Json] {
        let seq_opts = ScanOptions { threads: Some(1), format, ..ScanOptions::default() };
        let par_opts = ScanOptions { threads: Some(4), format, ..ScanOptions::default() };

        let mut seq = Vec::new();
        let seq_stats = scan_and_write(&paths, &mut seq, &seq_opts).unwrap();
        let mut par = Vec::new();
        let par_stats = scan_and_write(&paths, &mut par, &par_opts).unwrap();

        assert_eq!(seq, par);
        assert_eq!(seq_stats, par_stats);
        assert_eq!(seq_stats.files_scanned, SAMPLES.len());
        assert_eq!(seq_stats.lines_scanned, SAMPLES.len() * 3);
    }
}

#[test]
fn directory_input_json_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "A\x01\n\x01B\n").unwrap();
    fs::write(dir.path().join("b.txt"), "clean\n").unwrap();

    let opts = ScanOptions { format: OutputFormat::Json, threads: Some(1), ..ScanOptions::default() };
    let mut out = Vec::new();
    let stats = scan_and_write(&[dir.path().to_path_buf()], &mut out, &opts).unwrap();
    assert_eq!(stats.files_scanned, 2);
    assert_eq!(stats.findings_written, 2);

    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!((arr[0]["line"].as_u64(), arr[0]["start_column"].as_u64()), (Some(1), Some(2)));
    assert_eq!((arr[1]["line"].as_u64(), arr[1]["start_column"].as_u64()), (Some(2), Some(1)));
    assert!(arr[0]["file"].as_str().unwrap().ends_with("a.txt"));
}
