use bimap::BiMap;
use once_cell::sync::Lazy;
use std::fmt::Display;

/// ALU computation field of a C-instruction. The mnemonic spelling is
/// case-sensitive and must match exactly.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Comp {
    Zero,
    One,
    NegOne,
    D,
    A,
    M,
    NotD,
    NotA,
    NotM,
    NegD,
    NegA,
    NegM,
    DPlusOne,
    APlusOne,
    MPlusOne,
    DMinusOne,
    AMinusOne,
    MMinusOne,
    DPlusA,
    DPlusM,
    DMinusA,
    DMinusM,
    AMinusD,
    MMinusD,
    DAndA,
    DAndM,
    DOrA,
    DOrM,
}

static COMP_STR: Lazy<BiMap<&'static str, Comp>> = Lazy::new(|| {
    let mut map: BiMap<&'static str, Comp> = BiMap::new();
    map.insert("0", Comp::Zero);
    map.insert("1", Comp::One);
    map.insert("-1", Comp::NegOne);
    map.insert("D", Comp::D);
    map.insert("A", Comp::A);
    map.insert("M", Comp::M);
    map.insert("!D", Comp::NotD);
    map.insert("!A", Comp::NotA);
    map.insert("!M", Comp::NotM);
    map.insert("-D", Comp::NegD);
    map.insert("-A", Comp::NegA);
    map.insert("-M", Comp::NegM);
    map.insert("D+1", Comp::DPlusOne);
    map.insert("A+1", Comp::APlusOne);
    map.insert("M+1", Comp::MPlusOne);
    map.insert("D-1", Comp::DMinusOne);
    map.insert("A-1", Comp::AMinusOne);
    map.insert("M-1", Comp::MMinusOne);
    map.insert("D+A", Comp::DPlusA);
    map.insert("D+M", Comp::DPlusM);
    map.insert("D-A", Comp::DMinusA);
    map.insert("D-M", Comp::DMinusM);
    map.insert("A-D", Comp::AMinusD);
    map.insert("M-D", Comp::MMinusD);
    map.insert("D&A", Comp::DAndA);
    map.insert("D&M", Comp::DAndM);
    map.insert("D|A", Comp::DOrA);
    map.insert("D|M", Comp::DOrM);
    map
});

impl Comp {
    pub fn parse(s: &str) -> Option<Comp> {
        COMP_STR.get_by_left(s).copied()
    }

    pub fn format(&self) -> String {
        COMP_STR.get_by_right(self).unwrap().to_string()
    }

    /// The `a c1 c2 c3 c4 c5 c6` field. The leading bit selects the A
    /// register or the M operand. `!D` shares `D`'s pattern.
    pub fn bits(&self) -> &'static str {
        match self {
            Comp::Zero => "0101010",
            Comp::One => "0111111",
            Comp::NegOne => "0111010",
            Comp::D => "0001100",
            Comp::A => "0110000",
            Comp::M => "1110000",
            Comp::NotD => "0001100",
            Comp::NotA => "0110001",
            Comp::NotM => "1110001",
            Comp::NegD => "0001111",
            Comp::NegA => "0110011",
            Comp::NegM => "1110011",
            Comp::DPlusOne => "0011111",
            Comp::APlusOne => "0110111",
            Comp::MPlusOne => "1110111",
            Comp::DMinusOne => "0001110",
            Comp::AMinusOne => "0110010",
            Comp::MMinusOne => "1110010",
            Comp::DPlusA => "0000010",
            Comp::DPlusM => "1000010",
            Comp::DMinusA => "0010011",
            Comp::DMinusM => "1010011",
            Comp::AMinusD => "0000111",
            Comp::MMinusD => "1000111",
            Comp::DAndA => "0000000",
            Comp::DAndM => "1000000",
            Comp::DOrA => "0010101",
            Comp::DOrM => "1010101",
        }
    }
}

impl Display for Comp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}
