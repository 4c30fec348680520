//! Test harness for the cfg reader against fixture files.
//!
//! Every `test/cfg/*.cfg` file is read and its entries are compared, one
//! display line per entry, against `test/entries/<name>.txt`. The entries are
//! then written back out and read again to check they survive the trip.
//! Every `test/bad/*.cfg` file must fail with the message in the matching
//! `.error` file.

use std::fs;
use std::path::{Path, PathBuf};

use libcfg::{parse, to_string, Options, ParseContext, Reader};

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

/// All files under `test/` matching `pattern`, sorted.
fn fixtures(pattern: &str) -> Vec<PathBuf> {
    let pattern = test_root().join(pattern);
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .expect("valid glob pattern")
        .filter_map(|entry| entry.ok())
        .collect();
    files.sort();
    files
}

fn stem(path: &Path) -> String {
    path.file_stem().unwrap().to_string_lossy().into_owned()
}

#[test]
fn test_fixtures_found() {
    assert!(fixtures("cfg/*.cfg").len() >= 5);
    assert!(fixtures("bad/*.cfg").len() >= 5);
}

#[test]
fn test_good_fixtures() {
    let mut failures = Vec::new();

    for path in fixtures("cfg/*.cfg") {
        let name = stem(&path);
        let source = fs::read_to_string(&path).unwrap();
        let expected_path = test_root().join("entries").join(format!("{}.txt", name));
        let expected = match fs::read_to_string(&expected_path) {
            Ok(expected) => expected,
            Err(_) => {
                failures.push(format!("{}: missing {}", name, expected_path.display()));
                continue;
            }
        };

        let entries = match parse(&source) {
            Ok(entries) => entries,
            Err(e) => {
                failures.push(format!("{}: {}", name, e));
                continue;
            }
        };

        let actual: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
        let expected: Vec<&str> = expected.lines().collect();
        if actual != expected {
            failures.push(format!(
                "{}:\n  expected: {:?}\n  actual:   {:?}",
                name, expected, actual
            ));
            continue;
        }

        let rewritten = to_string(&entries).unwrap();
        match parse(&rewritten) {
            Ok(reread) if reread == entries => {}
            Ok(reread) => failures.push(format!(
                "{}: round trip changed entries\n  before: {:?}\n  after:  {:?}",
                name, entries, reread
            )),
            Err(e) => failures.push(format!("{}: rewritten text fails: {}", name, e)),
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn test_bad_fixtures() {
    let mut failures = Vec::new();

    for path in fixtures("bad/*.cfg") {
        let name = stem(&path);
        let source = fs::read(&path).unwrap();
        let expected = fs::read_to_string(path.with_extension("error")).unwrap();
        let expected = expected.trim();

        let ctx = ParseContext::new(None);
        let mut reader = Reader::with_context(&source[..], &Options::default(), ctx);
        match reader.read_all() {
            Ok(entries) => failures.push(format!(
                "{}: expected error {:?}, parsed {} entries",
                name,
                expected,
                entries.len()
            )),
            Err(e) if e.to_string() == expected => {}
            Err(e) => failures.push(format!(
                "{}: expected error {:?}, got {:?}",
                name,
                expected,
                e.to_string()
            )),
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn test_sample_is_canonical() {
    // sample.cfg is exactly what the writer produces for its entries.
    let source = fs::read_to_string(test_root().join("cfg/sample.cfg")).unwrap();
    let entries = parse(&source).unwrap();
    assert_eq!(to_string(&entries).unwrap(), source);
}
