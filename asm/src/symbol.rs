use indexmap::IndexMap;

use crate::error::Error;
use crate::parser::{Addr, Line, Stmt};

/// Names bound by the machine itself: the virtual registers, the
/// memory-mapped I/O locations, and the pointer registers (which alias
/// R0..R4).
const BUILTINS: [(&str, u16); 23] = [
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
    ("SCREEN", 16384),
    ("KBD", 24576),
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
];

/// First address available to user variables.
const USER_MEMORY: u16 = 16;

/// The flat name → address mapping. Built once per run, fully populated
/// by the two scan passes before any instruction is encoded, and owned
/// by the caller — no process-wide state.
pub struct SymbolTable {
    symbols: IndexMap<String, u16>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let symbols = BUILTINS
            .iter()
            .map(|(name, addr)| (name.to_string(), *addr))
            .collect();
        SymbolTable { symbols }
    }

    /// Runs both scan passes, in order, over the full parsed source.
    pub fn build(lines: &[Line]) -> Self {
        let mut table = SymbolTable::new();
        table.scan_labels(lines);
        table.scan_variables(lines);
        table
    }

    /// A bound name keeps its first address.
    fn bind(&mut self, name: &str, addr: u16) {
        self.symbols.entry(name.to_string()).or_insert(addr);
    }

    /// Label pass. Each label binds to the current instruction counter,
    /// the address the next real instruction will occupy. Labels and
    /// blank/comment lines do not advance the counter.
    pub fn scan_labels(&mut self, lines: &[Line]) {
        let mut counter: u16 = 0;
        for line in lines {
            match line.stmt() {
                None => {}
                Some(Stmt::Label(name)) => self.bind(name, counter),
                Some(_) => counter += 1,
            }
        }
    }

    /// Variable pass. Each symbol operand not yet bound is allocated the
    /// next free address, in first-occurrence order starting at 16.
    pub fn scan_variables(&mut self, lines: &[Line]) {
        let mut free = USER_MEMORY;
        for line in lines {
            if let Some(Stmt::A(Addr::Symbol(name))) = line.stmt() {
                if !self.symbols.contains_key(name.as_str()) {
                    self.symbols.insert(name.clone(), free);
                    free += 1;
                }
            }
        }
    }

    pub fn resolve(&self, name: &str) -> Result<u16, Error> {
        self.symbols
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownSymbol(name.to_string()))
    }

    /// Names bound by the source (labels, then variables interleaved in
    /// binding order), without the built-ins.
    pub fn user_symbols(&self) -> impl Iterator<Item = (&str, u16)> {
        self.symbols
            .iter()
            .skip(BUILTINS.len())
            .map(|(name, addr)| (name.as_str(), *addr))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
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

    #[test]
    fn builtins_resolve() {
        let table = SymbolTable::new();
        assert_eq!(table.resolve("R0").unwrap(), 0);
        assert_eq!(table.resolve("R15").unwrap(), 15);
        assert_eq!(table.resolve("SCREEN").unwrap(), 16384);
        assert_eq!(table.resolve("KBD").unwrap(), 24576);
        assert_eq!(table.resolve("SP").unwrap(), 0);
        assert_eq!(table.resolve("LCL").unwrap(), 1);
        assert_eq!(table.resolve("ARG").unwrap(), 2);
        assert_eq!(table.resolve("THIS").unwrap(), 3);
        assert_eq!(table.resolve("THAT").unwrap(), 4);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let table = SymbolTable::new();
        assert!(matches!(
            table.resolve("nope"),
            Err(Error::UnknownSymbol(name)) if name == "nope"
        ));
    }

    #[test]
    fn label_binds_the_next_instruction_address() {
        let lines = parse("@1\nD=A\n(LOOP)\n@LOOP\n0;JMP");
        let table = SymbolTable::build(&lines);
        assert_eq!(table.resolve("LOOP").unwrap(), 2);
    }

    #[test]
    fn label_before_the_first_instruction_is_zero() {
        let lines = parse("(START)\n@START\n0;JMP");
        let table = SymbolTable::build(&lines);
        assert_eq!(table.resolve("START").unwrap(), 0);
    }

    #[test]
    fn consecutive_labels_share_an_address() {
        let lines = parse("D=A\n(ONE)\n(TWO)\nM=D");
        let table = SymbolTable::build(&lines);
        assert_eq!(table.resolve("ONE").unwrap(), 1);
        assert_eq!(table.resolve("TWO").unwrap(), 1);
    }

    #[test]
    fn blanks_and_comments_do_not_advance_the_counter() {
        let lines = parse("// header\n\n@1\n\n// mid\n(HERE)\nD=A");
        let table = SymbolTable::build(&lines);
        assert_eq!(table.resolve("HERE").unwrap(), 1);
    }

    #[test]
    fn variables_allocate_from_16_in_first_occurrence_order() {
        let lines = parse("@first\n@second\n@first\n@third");
        let table = SymbolTable::build(&lines);
        assert_eq!(table.resolve("first").unwrap(), 16);
        assert_eq!(table.resolve("second").unwrap(), 17);
        // Re-referencing a bound symbol must not advance the allocator.
        assert_eq!(table.resolve("third").unwrap(), 18);
    }

    #[test]
    fn label_reference_is_not_a_variable() {
        let lines = parse("@END\n0;JMP\n(END)\n@END");
        let table = SymbolTable::build(&lines);
        assert_eq!(table.resolve("END").unwrap(), 2);
    }

    #[test]
    fn builtin_names_are_never_rebound() {
        let lines = parse("(R5)\n@R5\n(SCREEN)\n@SCREEN");
        let table = SymbolTable::build(&lines);
        assert_eq!(table.resolve("R5").unwrap(), 5);
        assert_eq!(table.resolve("SCREEN").unwrap(), 16384);
    }

    #[test]
    fn redeclared_label_keeps_its_first_address() {
        let lines = parse("(HERE)\nD=A\n(HERE)\n@HERE");
        let table = SymbolTable::build(&lines);
        assert_eq!(table.resolve("HERE").unwrap(), 0);
    }

    #[test]
    fn user_symbols_come_back_in_binding_order() {
        let lines = parse("@var\n(TAG)\n@other");
        let table = SymbolTable::build(&lines);
        let bound: Vec<(&str, u16)> = table.user_symbols().collect();
        assert_eq!(bound, vec![("TAG", 1), ("var", 16), ("other", 17)]);
    }
}
