use clap::{CommandFactory, Parser};
use color_print::cprintln;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use hasm::codegen;
use hasm::error::{self, Error};
use hasm::parser::Line;
use hasm::symbol::SymbolTable;
use hasm::util;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

const DEFAULT_OUTPUT: &str = "out.hack";

#[derive(Debug, clap::Parser)]
#[clap(version, about = "Assembler for the Hack architecture", help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file, then an optional output file; further arguments are
    /// ignored
    files: Vec<String>,

    /// Dump the assembly listing and bound symbols after assembling
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    let args = Args::parse();
    if args.files.is_empty() {
        Args::command().print_help().ok();
        return;
    }
    let input = args.files[0].as_str();
    let output = args.files.get(1).map(String::as_str).unwrap_or(DEFAULT_OUTPUT);

    // Read the source once; every pass walks the same buffered lines.
    let file = match File::open(input) {
        Ok(file) => file,
        Err(err) => fail(&Error::FileOpen(input.to_string(), err)),
    };
    let mut raws = Vec::new();
    for line in BufReader::new(file).lines() {
        match line {
            Ok(raw) => raws.push(raw),
            Err(err) => fail(&Error::FileRead(err)),
        }
    }
    let mut files: IndexMap<String, Vec<String>> = IndexMap::new();
    files.insert(input.to_string(), raws.clone());

    // Classify every line up front; report all bad lines before giving up.
    let mut lines = Vec::new();
    let mut failed = false;
    for (idx, raw) in raws.iter().enumerate() {
        match Line::parse(input, idx, raw) {
            Ok(line) => lines.push(line),
            Err(err) => {
                err.print_diag(&files, input, idx);
                failed = true;
            }
        }
    }
    if failed {
        std::process::exit(1);
    }

    // Both symbol passes run to completion before any word is encoded.
    let table = SymbolTable::build(&lines);

    let program = match codegen::generate(&lines, &table) {
        Ok(program) => program,
        Err(diag) => {
            diag.error.print_diag(&files, input, diag.idx);
            std::process::exit(1);
        }
    };
    for truncation in &program.truncations {
        error::print_warn_diag(
            &format!(
                "Value {} does not fit in 15 bits; the high bits were dropped",
                truncation.value
            ),
            &files,
            input,
            truncation.idx,
        );
    }

    let mut out = match File::create(output) {
        Ok(out) => out,
        Err(err) => fail(&Error::FileCreate(output.to_string(), err)),
    };
    for word in &program.words {
        if let Err(err) = writeln!(out, "{}", word) {
            fail(&Error::FileWrite(output.to_string(), err));
        }
    }

    if args.dump {
        util::print_dump(&lines, &table);
        util::print_symbols(&table);
    }
}

fn fail(err: &Error) -> ! {
    cprintln!("<red,bold>error</>: {}", err);
    std::process::exit(1);
}
