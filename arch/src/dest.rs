use bimap::BiMap;
use once_cell::sync::Lazy;
use std::fmt::Display;

/// Destination field of a C-instruction. The empty mnemonic means the
/// result is not stored.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Dest {
    #[default]
    None,
    M,
    D,
    MD,
    A,
    AM,
    AD,
    AMD,
}

static DEST_STR: Lazy<BiMap<&'static str, Dest>> = Lazy::new(|| {
    let mut map: BiMap<&'static str, Dest> = BiMap::new();
    map.insert("", Dest::None);
    map.insert("M", Dest::M);
    map.insert("D", Dest::D);
    map.insert("MD", Dest::MD);
    map.insert("A", Dest::A);
    map.insert("AM", Dest::AM);
    map.insert("AD", Dest::AD);
    map.insert("AMD", Dest::AMD);
    map
});

impl Dest {
    pub fn parse(s: &str) -> Option<Dest> {
        DEST_STR.get_by_left(s).copied()
    }

    pub fn format(&self) -> String {
        DEST_STR.get_by_right(self).unwrap().to_string()
    }

    /// The `d1 d2 d3` field: A, D, M store-enable bits in that order.
    pub fn bits(&self) -> &'static str {
        match self {
            Dest::None => "000",
            Dest::M => "001",
            Dest::D => "010",
            Dest::MD => "011",
            Dest::A => "100",
            Dest::AM => "101",
            Dest::AD => "110",
            Dest::AMD => "111",
        }
    }
}

impl Display for Dest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}
