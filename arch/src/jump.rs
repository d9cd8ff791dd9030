use bimap::BiMap;
use once_cell::sync::Lazy;
use std::fmt::Display;

/// Jump field of a C-instruction. The empty mnemonic means execution
/// falls through to the next instruction.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Jump {
    #[default]
    None,
    JGT,
    JEQ,
    JGE,
    JLT,
    JNE,
    JLE,
    JMP,
}

static JUMP_STR: Lazy<BiMap<&'static str, Jump>> = Lazy::new(|| {
    let mut map: BiMap<&'static str, Jump> = BiMap::new();
    map.insert("", Jump::None);
    map.insert("JGT", Jump::JGT);
    map.insert("JEQ", Jump::JEQ);
    map.insert("JGE", Jump::JGE);
    map.insert("JLT", Jump::JLT);
    map.insert("JNE", Jump::JNE);
    map.insert("JLE", Jump::JLE);
    map.insert("JMP", Jump::JMP);
    map
});

impl Jump {
    pub fn parse(s: &str) -> Option<Jump> {
        JUMP_STR.get_by_left(s).copied()
    }

    pub fn format(&self) -> String {
        JUMP_STR.get_by_right(self).unwrap().to_string()
    }

    /// The `j1 j2 j3` field: jump on negative, zero, positive.
    pub fn bits(&self) -> &'static str {
        match self {
            Jump::None => "000",
            Jump::JGT => "001",
            Jump::JEQ => "010",
            Jump::JGE => "011",
            Jump::JLT => "100",
            Jump::JNE => "101",
            Jump::JLE => "110",
            Jump::JMP => "111",
        }
    }
}

impl Display for Jump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}
