//! cfg command-line tool for checking, reformatting and inspecting cfg files.
//!
//! Usage: cfg [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --output <FILE>    Write the reformatted file to FILE instead of stdout
//!   --check                Check if the file is valid (exit 0 if valid, 1 if invalid)
//!   --dump                 Print one line per entry instead of reformatting
//!   --split <KEY[:SEP]>    Print the SEP-separated parts (default ",") of every KEY value
//!   --tabs <N>             Indent output with N tabs per level [default: 1]
//!   --spaces <N>           Indent output with N spaces per level
//!   --width <N>            Wrap comments at N bytes [default: 256]
//!   -h, --help             Print help
//!   -V, --version          Print version
//!
//! FILE may be "-" or omitted to read from stdin.

use libcfg::{
    open_with_options, parse_int, split, Context, Entry, Mode, Options, Reader, Writer,
};
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;

/// What to do with each entry read.
enum Action {
    Format { output: Option<String> },
    Check,
    Dump,
    Split { key: Vec<u8>, sep: u8 },
}

fn main() {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut options = Options::new();
    let mut action = Action::Format { output: None };
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("cfg {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                action = Action::Format {
                    output: Some(args[i].clone()),
                };
            }
            "--check" => {
                action = Action::Check;
            }
            "--dump" => {
                action = Action::Dump;
            }
            "--split" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --split requires a key argument");
                    process::exit(1);
                }
                action = parse_split(&args[i]);
            }
            "--tabs" | "--spaces" | "--width" => {
                let flag = args[i].as_str();
                i += 1;
                let n = match args.get(i).and_then(|n| n.parse::<usize>().ok()) {
                    Some(n) => n,
                    None => {
                        eprintln!("Error: {} requires a number", flag);
                        process::exit(1);
                    }
                };
                options = match flag {
                    "--tabs" => options.with_indent(b'\t', n),
                    "--spaces" => options.with_indent(b' ', n),
                    _ => options.with_comment_width(n),
                };
            }
            "-" => {
                // Explicit stdin
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            arg => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input paths not supported");
                    process::exit(1);
                }
                input_path = Some(arg);
            }
        }
        i += 1;
    }

    if let (Some(input), Action::Format { output: Some(output) }) = (input_path, &action) {
        if same_file(input, output) {
            eprintln!("Error: Output file {} is the input file", output);
            process::exit(1);
        }
    }

    let label = input_path.unwrap_or("<stdin>");
    let result = match input_path {
        Some(path) => match open_with_options(Mode::Read, path, options.clone()) {
            Ok(Context::Read(mut reader)) => run(&mut reader, &action, &options),
            Ok(Context::Write(_)) => Err(libcfg::Error::WrongMode {
                expected: Mode::Read,
                actual: Mode::Write,
            }),
            Err(e) => Err(e),
        },
        None => {
            let stdin = io::stdin();
            let mut reader = Reader::with_options(stdin.lock(), &options);
            run(&mut reader, &action, &options)
        }
    };

    if let Err(e) = result {
        match input_path {
            // File errors already name the file.
            Some(_) if matches!(e, libcfg::Error::Parse(_)) => eprintln!("{}", e),
            _ => eprintln!("{}: {}", label, e),
        }
        process::exit(1);
    }
    if matches!(action, Action::Check) {
        log::info!("{} is valid", label);
    }
}

/// Whether `output` names the existing file `input`. Writing would truncate
/// the input before it is read.
fn same_file(input: &str, output: &str) -> bool {
    match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn parse_split(arg: &str) -> Action {
    let (key, sep) = match arg.rsplit_once(':') {
        Some((key, sep)) if sep.len() == 1 => (key, sep.as_bytes()[0]),
        _ => (arg, b','),
    };
    Action::Split {
        key: key.as_bytes().to_vec(),
        sep,
    }
}

fn run<R: BufRead>(
    reader: &mut Reader<R>,
    action: &Action,
    options: &Options,
) -> libcfg::Result<()> {
    match action {
        Action::Format { output: Some(path) } => {
            let mut out = open_with_options(Mode::Write, path, options.clone())?;
            while let Some(entry) = reader.read_entry()? {
                out.write_entry(&entry)?;
            }
            out.close()
        }
        Action::Format { output: None } => {
            let stdout = io::stdout();
            let mut out = Writer::with_options(stdout.lock(), options.clone());
            while let Some(entry) = reader.read_entry()? {
                out.write_entry(&entry)?;
            }
            out.close().map(|_| ())
        }
        Action::Check => {
            while reader.read_entry()?.is_some() {}
            Ok(())
        }
        Action::Dump => {
            while let Some(entry) = reader.read_entry()? {
                println!("{}", entry);
            }
            Ok(())
        }
        Action::Split { key, sep } => {
            while let Some(entry) = reader.read_entry()? {
                if let Entry::KeyValue { key: k, value } = entry {
                    if k == &key[..] {
                        print_split(k, value, *sep);
                    }
                }
            }
            Ok(())
        }
    }
}

fn print_split(key: &[u8], value: &[u8], sep: u8) {
    println!(
        "{} has {} values",
        key.escape_ascii(),
        split::count(value, sep)
    );
    for (index, part) in split::split(value, sep).enumerate() {
        match parse_int::<i64>(part) {
            Ok(n) => println!("  [{}] \"{}\" = {}", index, part.escape_ascii(), n),
            Err(_) => println!("  [{}] \"{}\"", index, part.escape_ascii()),
        }
    }
}

fn print_help() {
    let mut out = io::stdout().lock();
    let _ = writeln!(
        out,
        "\
cfg - check, reformat and inspect cfg files

Usage: cfg [OPTIONS] [FILE]

Options:
  -o, --output <FILE>    Write the reformatted file to FILE instead of stdout
  --check                Check if the file is valid (exit 0 if valid, 1 if invalid)
  --dump                 Print one line per entry instead of reformatting
  --split <KEY[:SEP]>    Print the SEP-separated parts (default \",\") of every KEY value
  --tabs <N>             Indent output with N tabs per level [default: 1]
  --spaces <N>           Indent output with N spaces per level
  --width <N>            Wrap comments at N bytes [default: 256]
  -h, --help             Print help
  -V, --version          Print version

FILE may be \"-\" or omitted to read from stdin.
Set RUST_LOG=debug for diagnostics."
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.cfg");
        std::fs::write(&input, "a = b\n").unwrap();
        let input = input.to_str().unwrap();
        let dotted = dir.path().join(".").join("in.cfg");

        assert!(same_file(input, input));
        assert!(same_file(input, dotted.to_str().unwrap()));
        assert!(!same_file(input, dir.path().join("out.cfg").to_str().unwrap()));
    }

    #[test]
    fn test_parse_split() {
        match parse_split("array:;") {
            Action::Split { key, sep } => {
                assert_eq!(key, b"array");
                assert_eq!(sep, b';');
            }
            _ => panic!("expected split action"),
        }
        match parse_split("array") {
            Action::Split { key, sep } => {
                assert_eq!(key, b"array");
                assert_eq!(sep, b',');
            }
            _ => panic!("expected split action"),
        }
    }
}
