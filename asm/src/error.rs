use color_print::cprintln;
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Expected `)` at end of label definition")]
    MalformedLabel,

    #[error("Unknown comp mnemonic: `{0}`")]
    InvalidComp(String),

    #[error("Unknown dest mnemonic: `{0}`")]
    InvalidDest(String),

    #[error("Unknown jump mnemonic: `{0}`")]
    InvalidJump(String),

    #[error("Undefined symbol: `{0}`")]
    UnknownSymbol(String),

    #[error("Internal error: instruction rendered to {0} bits, expected 16")]
    InstructionWidth(usize),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, files: &IndexMap<String, Vec<String>>, file: &str, line_idx: usize) {
        cprintln!("<red,bold>error</>: {}", self);
        print_location(files, file, line_idx);
    }
}

/// Print a non-fatal diagnostic in the same shape as `print_diag`.
pub fn print_warn_diag(
    message: &str,
    files: &IndexMap<String, Vec<String>>,
    file: &str,
    line_idx: usize,
) {
    cprintln!("<yellow,bold>warning</>: {}", message);
    print_location(files, file, line_idx);
}

fn print_location(files: &IndexMap<String, Vec<String>>, file: &str, line_idx: usize) {
    // line_idx is 0-based, display as 1-based
    let line_num = line_idx + 1;
    cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
    cprintln!("      <blue>|</>");

    let line_content = files
        .get(file)
        .and_then(|lines| lines.get(line_idx))
        .map(|s| s.as_str())
        .unwrap_or("");

    cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
    cprintln!("      <blue>|</>");
}
