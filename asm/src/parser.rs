use arch::{comp::Comp, dest::Dest, jump::Jump};
use color_print::cformat;

use crate::error::Error;

// ----------------------------------------------------------------------------
// Line

/// One source line: the raw text, the normalized text classification ran
/// on, and the classified statement (`None` for blanks and comments).
#[derive(Debug, Clone)]
pub struct Line {
    path: String,
    idx: usize,
    raw: String,
    code: String,
    stmt: Option<Stmt>,
}

impl Line {
    pub fn parse(path: &str, idx: usize, raw: &str) -> Result<Line, Error> {
        let code = normalize(raw);
        let stmt = Stmt::parse(&code)?;
        Ok(Line {
            path: path.to_string(),
            idx,
            raw: raw.to_string(),
            code,
            stmt,
        })
    }

    pub fn pos(&self) -> String {
        format!("{}:{}", self.path, self.idx + 1)
    }

    /// 1-based source line number.
    pub fn no(&self) -> usize {
        self.idx + 1
    }

    /// 0-based source line index.
    pub fn idx(&self) -> usize {
        self.idx
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn stmt(&self) -> Option<&Stmt> {
        self.stmt.as_ref()
    }

    pub fn cformat(&self) -> String {
        match &self.stmt {
            Some(stmt) => stmt.cformat(),
            None => self.raw.clone(),
        }
    }
}

/// Strips spaces and tabs; classification runs on the stripped text.
/// Carriage returns left over from CRLF sources are dropped as well.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != ' ' && *c != '\t' && *c != '\r')
        .collect()
}

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    A(Addr),
    C { dest: Dest, comp: Comp, jump: Jump },
    Label(String),
}

/// Operand of an A-instruction: a decimal literal or a name to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addr {
    Literal(u32),
    Symbol(String),
}

impl Stmt {
    /// Classifies one normalized line. `Ok(None)` for blank lines and
    /// full-line comments.
    fn parse(code: &str) -> Result<Option<Stmt>, Error> {
        if code.is_empty() || code.starts_with('/') {
            return Ok(None);
        }

        if let Some(rest) = code.strip_prefix('(') {
            return match rest.find(')') {
                Some(end) => Ok(Some(Stmt::Label(rest[..end].to_string()))),
                None => Err(Error::MalformedLabel),
            };
        }

        if let Some(rest) = code.strip_prefix('@') {
            let operand = match rest.find('/') {
                Some(pos) => &rest[..pos],
                None => rest,
            };
            let addr = match operand.parse::<u32>() {
                Ok(value) => Addr::Literal(value),
                Err(_) => Addr::Symbol(operand.to_string()),
            };
            return Ok(Some(Stmt::A(addr)));
        }

        Stmt::parse_compute(code)
    }

    /// `[dest=]comp[;jump]`, with an optional trailing comment.
    fn parse_compute(code: &str) -> Result<Option<Stmt>, Error> {
        let code = match code.find('/') {
            Some(pos) if pos > 0 => &code[..pos],
            _ => code,
        };
        let (dest, rest) = match code.find('=') {
            Some(eq) => (&code[..eq], &code[eq + 1..]),
            None => ("", code),
        };
        let (comp, jump) = match rest.find(';') {
            Some(semi) => (&rest[..semi], &rest[semi + 1..]),
            None => (rest, ""),
        };

        let dest = Dest::parse(dest).ok_or_else(|| Error::InvalidDest(dest.to_string()))?;
        let comp = Comp::parse(comp).ok_or_else(|| Error::InvalidComp(comp.to_string()))?;
        let jump = Jump::parse(jump).ok_or_else(|| Error::InvalidJump(jump.to_string()))?;
        Ok(Some(Stmt::C { dest, comp, jump }))
    }
}

impl Stmt {
    pub fn cformat(&self) -> String {
        match self {
            Stmt::A(Addr::Literal(value)) => cformat!("<r>@</><y>{}</>", value),
            Stmt::A(Addr::Symbol(name)) => cformat!("<r>@</><u>{}</>", name),
            Stmt::C { dest, comp, jump } => {
                let dest = match dest {
                    Dest::None => String::new(),
                    dest => cformat!("<b>{}</>=", dest),
                };
                let jump = match jump {
                    Jump::None => String::new(),
                    jump => cformat!(";<g>{}</>", jump),
                };
                cformat!("{}<r>{}</>{}", dest, comp, jump)
            }
            Stmt::Label(name) => cformat!("<g>({})</>", name),
        }
    }
}
