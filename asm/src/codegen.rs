use arch::inst::Inst;

use crate::error::Error;
use crate::parser::{Addr, Line, Stmt};
use crate::symbol::SymbolTable;

/// Largest value an A-instruction can carry; wider values are truncated
/// to the low 15 bits.
const ADDR_MAX: u32 = 0x7FFF;

/// An oversized address operand: truncated, reported, and assembled on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    /// 0-based source line index.
    pub idx: usize,
    pub value: u32,
}

/// A fatal condition tied to the source line it was detected on.
#[derive(Debug)]
pub struct Diag {
    /// 0-based source line index.
    pub idx: usize,
    pub error: Error,
}

/// The encoded program: one 16-character word per real instruction, in
/// source order, plus the non-fatal truncation reports.
#[derive(Debug, PartialEq, Eq)]
pub struct Program {
    pub words: Vec<String>,
    pub truncations: Vec<Truncation>,
}

/// Encodes the whole source against a fully built symbol table. Labels,
/// blank lines, and comments emit nothing; the first fatal condition
/// aborts, and no output should be written when it does.
pub fn generate(lines: &[Line], table: &SymbolTable) -> Result<Program, Diag> {
    let mut words = Vec::new();
    let mut truncations = Vec::new();
    for line in lines {
        let stmt = match line.stmt() {
            Some(stmt) => stmt,
            None => continue,
        };
        if let Stmt::A(addr) = stmt {
            let value = resolve(addr, table).map_err(|error| Diag {
                idx: line.idx(),
                error,
            })?;
            if value > ADDR_MAX {
                truncations.push(Truncation {
                    idx: line.idx(),
                    value,
                });
            }
        }
        if let Some(word) = encode(stmt, table).map_err(|error| Diag {
            idx: line.idx(),
            error,
        })? {
            words.push(word);
        }
    }
    Ok(Program { words, truncations })
}

/// Encodes one statement; `None` for labels, which emit no word. Every
/// word is checked to be exactly 16 characters before it is handed out.
pub fn encode(stmt: &Stmt, table: &SymbolTable) -> Result<Option<String>, Error> {
    let inst = match stmt {
        Stmt::Label(_) => return Ok(None),
        Stmt::A(addr) => Inst::A((resolve(addr, table)? & ADDR_MAX) as u16),
        Stmt::C { dest, comp, jump } => Inst::C(*dest, *comp, *jump),
    };
    let word = inst.to_bin();
    if word.len() != 16 {
        return Err(Error::InstructionWidth(word.len()));
    }
    Ok(Some(word))
}

/// The operand value before truncation.
fn resolve(addr: &Addr, table: &SymbolTable) -> Result<u32, Error> {
    match addr {
        Addr::Literal(value) => Ok(*value),
        Addr::Symbol(name) => table.resolve(name).map(u32::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Vec<Line> {
        src.lines()
            .enumerate()
            .map(|(idx, raw)| Line::parse("test.asm", idx, raw).unwrap())
            .collect()
    }

    fn assemble(src: &str) -> Program {
        let lines = parse(src);
        let table = SymbolTable::build(&lines);
        generate(&lines, &table).unwrap()
    }

    #[test]
    fn add_two_and_three() {
        let program = assemble("@2\nD=A\n@3\nD=D+A\n@0\nM=D");
        assert_eq!(
            program.words,
            vec![
                "0000000000000010",
                "1110110000010000",
                "0000000000000011",
                "1110000010010000",
                "0000000000000000",
                "1110001100001000",
            ]
        );
        assert!(program.truncations.is_empty());
    }

    #[test]
    fn loop_label_resolves_to_zero() {
        let program = assemble("(LOOP)\n@LOOP\n0;JMP");
        assert_eq!(program.words, vec!["0000000000000000", "1110101010000111"]);
    }

    #[test]
    fn labels_comments_and_blanks_emit_nothing() {
        let program = assemble("// header\n\n(START)\n@1\n\nD=A // inline\n(END)");
        assert_eq!(program.words, vec!["0000000000000001", "1110110000010000"]);
    }

    #[test]
    fn in_range_values_do_not_warn() {
        let program = assemble("@0\n@32767");
        assert_eq!(program.words, vec!["0000000000000000", "0111111111111111"]);
        assert!(program.truncations.is_empty());
    }

    #[test]
    fn oversized_value_truncates_and_warns_once() {
        let program = assemble("@32768");
        assert_eq!(program.words, vec!["0000000000000000"]);
        assert_eq!(
            program.truncations,
            vec![Truncation {
                idx: 0,
                value: 32768,
            }]
        );
    }

    #[test]
    fn truncation_keeps_the_low_15_bits() {
        let program = assemble("D=A\n@40000");
        // 40000 mod 32768 == 7232
        assert_eq!(program.words[1], "0001110001000000");
        assert_eq!(
            program.truncations,
            vec![Truncation {
                idx: 1,
                value: 40000,
            }]
        );
    }

    #[test]
    fn unknown_symbol_when_the_variable_pass_is_skipped() {
        let lines = parse("D=A\n@foo");
        let mut table = SymbolTable::new();
        table.scan_labels(&lines);
        let diag = generate(&lines, &table).unwrap_err();
        assert_eq!(diag.idx, 1);
        assert!(matches!(diag.error, Error::UnknownSymbol(name) if name == "foo"));
    }

    #[test]
    fn generation_is_deterministic() {
        let src = "@sum\nM=0\n(LOOP)\n@sum\nM=M+1\n@LOOP\n0;JMP";
        assert_eq!(assemble(src), assemble(src));
    }
}
