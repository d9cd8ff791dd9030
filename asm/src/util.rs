use color_print::{cformat, cprintln};

use crate::codegen;
use crate::parser::{Line, Stmt};
use crate::symbol::SymbolTable;

/// Prints an assembly listing: instruction address and encoded word next
/// to each source line. Lines that emit no word get an empty gutter.
pub fn print_dump(lines: &[Line], table: &SymbolTable) {
    let mut pc: u16 = 0;
    for line in lines {
        let (addr, word) = match line.stmt() {
            None | Some(Stmt::Label(_)) => (" ".repeat(4), " ".repeat(16)),
            Some(stmt) => {
                let word = match codegen::encode(stmt, table) {
                    Ok(Some(word)) => word,
                    _ => cformat!("<r,s>{}</>", "!".repeat(16)),
                };
                let addr = cformat!("<g>{:0>4X}</>", pc);
                pc += 1;
                (addr, word)
            }
        };
        println!("{} | {} | {:>4}: {}", addr, word, line.no(), line.cformat());
    }
}

/// Prints the names the source bound, in binding order.
pub fn print_symbols(table: &SymbolTable) {
    for (name, addr) in table.user_symbols() {
        cprintln!("  <y>0x{:0>4X}</> = {}", addr, name);
    }
}
