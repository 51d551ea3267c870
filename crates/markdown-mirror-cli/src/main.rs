use std::{env, fs, path::Path, process};

use anyhow::{Context, Result};
use markdown_mirror_engine::{
    parse, serialize, snapshot, ParseOptions, SerializeOptions,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut strict = false;
    let mut files: Vec<&String> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "--strict" => strict = true,
            "--help" | "-h" => {
                print_usage(&args[0]);
                return Ok(());
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            _ => files.push(arg),
        }
    }

    if files.is_empty() {
        eprintln!("Error: no input files");
        print_usage(&args[0]);
        process::exit(1);
    }

    let opts = ParseOptions {
        strict,
        ..Default::default()
    };

    let mut failures = 0usize;
    for file in files {
        if let Err(err) = check_file(Path::new(file), opts) {
            eprintln!("{file}: {err:#}");
            failures += 1;
        }
    }

    if failures > 0 {
        process::exit(1);
    }
    Ok(())
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} [--strict] <file.md>...");
    eprintln!();
    eprintln!("Parses each file, verifies the serializer reproduces it");
    eprintln!("byte-for-byte, and prints the block outline.");
}

fn check_file(path: &Path, opts: ParseOptions) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let doc = parse(&source, opts);
    let output = serialize(&doc, &SerializeOptions::default());

    println!("{}", path.display());
    for block in &snapshot::normalize(&doc).blocks {
        print_block(block, 1);
    }

    if output == source {
        println!("  round-trip: ok ({} blocks)", doc.blocks.len());
        Ok(())
    } else {
        anyhow::bail!("serialization differs from input");
    }
}

fn print_block(block: &snapshot::BlockSnap, depth: usize) {
    println!(
        "{}{} [{}, {})",
        "  ".repeat(depth),
        block.kind,
        block.span.0,
        block.span.1
    );
    for child in &block.children {
        print_block(child, depth + 1);
    }
}
