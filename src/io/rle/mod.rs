//! Golly's ["Extended RLE"
//! format](http://golly.sourceforge.net/Help/formats.html#rle), restricted
//! to two-state Life patterns.
//!
//! Use `format!("{}", some_rle)` to convert an RLE to a string, and
//! `parse()` to read one. Positions in an RLE are relative to the top-left
//! corner of its bounding box; the offset of that corner is kept in the
//! `#CXRLE Pos=x,y` line.

use itertools::Itertools;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::memento::{Memento, Pos};

const MAX_LINE_LEN: usize = 70;
/// Maximum number of live cells in an imported pattern.
pub const MAX_POPULATION: usize = 1 << 24;

/// Rule string written in RLE headers.
pub const LIFE_RULE: &str = "B3/S23";

/// Result type returned by fallible RLE routines.
pub type RleResult<T> = Result<T, RleError>;

lazy_static::lazy_static! {
    /// Regex matching an optional positive integer followed by a single RLE
    /// item.
    static ref RLE_RUN_REGEX: regex::Regex =
        regex::Regex::new(r"(\d*)([bo$!])").unwrap();
}

/// Error encountered during RLE import.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RleError {
    #[error("unknown symbol: '{0}'")]
    UnknownSymbol(char),
    #[error("invalid count")]
    InvalidCount,
    #[error("invalid size")]
    InvalidSize,
    #[error("bad CXRLE header")]
    BadCxrleHeader,
    #[error("duplicate RLE header")]
    DuplicateRleHeader,
    #[error("duplicate CXRLE header")]
    DuplicateCxrleHeader,
    #[error("missing RLE header")]
    MissingHeader,
    #[error("RLE ends in the middle of a run")]
    UnexpectedEnd,
    #[error("pattern is too big")]
    TooBig,
    #[error("unsupported rule {0:?}; only Conway's Game of Life (B3/S23) is supported")]
    UnsupportedRule(String),
}

/// Two-state RLE pattern.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rle {
    /// Position of the top-left corner of the pattern.
    pub offset: Pos,
    /// Number of generations simulated.
    pub generation: u64,
    /// Pattern comments, not including the CXRLE line.
    pub comments: String,
    width: u64,
    height: u64,
    /// Live cells, relative to `offset`.
    cells: Memento,
}

impl Rle {
    /// Converts a memento into an RLE whose bounding box is the smallest one
    /// containing every live cell.
    pub fn from_memento(memento: &Memento) -> Self {
        match memento.bounding_rect() {
            Some(rect) => Self {
                offset: rect.min,
                width: rect.width(),
                height: rect.height(),
                cells: memento.translated(Pos::new(-rect.min.row, -rect.min.column)),
                ..Self::default()
            },
            None => Self::default(),
        }
    }
    /// Returns the live cells of the pattern at their absolute positions, or
    /// an error if `offset` pushes any of them out of range.
    pub fn to_memento(&self) -> RleResult<Memento> {
        self.cells
            .checked_translated(self.offset)
            .ok_or(RleError::TooBig)
    }

    /// Returns the width of the pattern.
    ///
    /// The size in an RLE header is advisory: it may include empty margin,
    /// but if the body has cells beyond it then this is the width of the
    /// body instead.
    pub fn width(&self) -> u64 {
        self.width
    }
    /// Returns the height of the pattern. See `width()`.
    pub fn height(&self) -> u64 {
        self.height
    }
    /// Returns the number of live cells.
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    /// Sets the user comments.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn with_comments(mut self, comments: impl ToString) -> Self {
        self.comments = comments.to_string();
        self
    }
    /// Sets the number of generations.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Returns the RLE items for the pattern body, without the final `!`.
    fn items(&self) -> Vec<RleRun> {
        let mut runs: Vec<RleRun> = vec![];
        let mut push = |count: u64, item: RleItem| {
            if count == 0 {
                return;
            }
            if let Some(last) = runs.last_mut() {
                if last.item == item {
                    last.count += count;
                    return;
                }
            }
            runs.push(RleRun { count, item });
        };
        let mut last_row = 0;
        for (row, cells) in &self.cells.iter().group_by(|pos| pos.row) {
            push((row - last_row) as u64, RleItem::NextRow);
            last_row = row;
            let mut column = 0;
            for pos in cells {
                push((pos.column - column) as u64, RleItem::Dead);
                push(1, RleItem::Alive);
                column = pos.column + 1;
            }
        }
        runs
    }
}

impl fmt::Display for Rle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset != Pos::ORIGIN || self.generation != 0 {
            write!(f, "#CXRLE")?;
            if self.offset != Pos::ORIGIN {
                write!(f, " Pos={},{}", self.offset.column, self.offset.row)?;
            }
            if self.generation != 0 {
                write!(f, " Gen={}", self.generation)?;
            }
            writeln!(f)?;
        }
        for comment_line in self.comments.trim_end().lines() {
            if !comment_line.starts_with('#') {
                write!(f, "#C ")?;
            }
            writeln!(f, "{}", comment_line)?;
        }
        writeln!(
            f,
            "x = {}, y = {}, rule = {}",
            self.width, self.height, LIFE_RULE,
        )?;

        let mut line_len = 0;
        for run in self.items().iter().chain(&[RleRun::END]) {
            let s = run.to_string();
            line_len += s.len();
            if line_len > MAX_LINE_LEN {
                writeln!(f)?;
                line_len = s.len();
            }
            write!(f, "{}", s)?;
        }
        writeln!(f)
    }
}

impl FromStr for Rle {
    type Err = RleError;

    fn from_str(s: &str) -> RleResult<Self> {
        if !s.is_ascii() {
            return Err(RleError::UnknownSymbol(
                s.chars().find(|ch| !ch.is_ascii()).unwrap_or('?'),
            ));
        }

        let mut ret = Self::default();
        let mut comments = vec![];
        let mut cxrle_seen = false;
        let mut header_seen = false;
        let mut body = String::new();
        for line in s.lines().map(str::trim) {
            if line.starts_with("#CXRLE") {
                if cxrle_seen {
                    return Err(RleError::DuplicateCxrleHeader);
                }
                cxrle_seen = true;
                parse_cxrle_line(line, &mut ret)?;
            } else if line.starts_with('#') {
                comments.push(line);
            } else if line.starts_with('x') {
                if header_seen {
                    return Err(RleError::DuplicateRleHeader);
                }
                header_seen = true;
                parse_header_line(line, &mut ret)?;
            } else if header_seen {
                body.extend(line.chars().filter(|ch| !ch.is_whitespace()));
            } else if !line.is_empty() {
                return Err(RleError::MissingHeader);
            }
        }
        if !header_seen {
            return Err(RleError::MissingHeader);
        }
        ret.comments = comments.join("\n");
        ret.cells = parse_body(&body)?;
        if let Some(rect) = ret.cells.bounding_rect() {
            // Body positions are never negative, so only the far corner can
            // overflow.
            ret.offset.checked_add(rect.max).ok_or(RleError::TooBig)?;
            ret.width = ret.width.max(rect.max.column as u64 + 1);
            ret.height = ret.height.max(rect.max.row as u64 + 1);
        }
        Ok(ret)
    }
}

/// Parses a line like `#CXRLE Pos=-3,10 Gen=120`.
fn parse_cxrle_line(line: &str, rle: &mut Rle) -> RleResult<()> {
    let line = line
        .strip_prefix("#CXRLE")
        .ok_or(RleError::BadCxrleHeader)?;
    for kv_pair in line.split_whitespace() {
        match kv_pair.split('=').collect_vec().as_slice() {
            ["Pos", pos] => {
                let coords = pos
                    .split(',')
                    .map(|n| n.trim().parse::<i64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| RleError::BadCxrleHeader)?;
                match coords.as_slice() {
                    &[x, y] => rle.offset = Pos::new(y, x),
                    _ => return Err(RleError::BadCxrleHeader),
                }
            }
            ["Gen", gen] => {
                rle.generation = gen.parse().map_err(|_| RleError::BadCxrleHeader)?;
            }
            _ => (), // Ignore unknown parameters.
        }
    }
    Ok(())
}

/// Parses a line like `x = 3, y = 3, rule = B3/S23`.
fn parse_header_line(line: &str, rle: &mut Rle) -> RleResult<()> {
    for param in line.split(',') {
        // Each parameter consists of `name = value`.
        match param.split('=').map(str::trim).collect_vec().as_slice() {
            ["x", x] => rle.width = x.parse().map_err(|_| RleError::InvalidSize)?,
            ["y", y] => rle.height = y.parse().map_err(|_| RleError::InvalidSize)?,
            ["rule", rule] => {
                if !is_life_rule(rule) {
                    return Err(RleError::UnsupportedRule((*rule).to_owned()));
                }
            }
            _ => (), // Ignore unknown parameters.
        }
    }
    Ok(())
}

/// Returns `true` if `rule` is a name for Conway's Game of Life.
fn is_life_rule(rule: &str) -> bool {
    matches!(
        rule.to_ascii_lowercase().as_str(),
        "b3/s23" | "23/3" | "life" | "conway"
    )
}

/// Parses the runs that make up the pattern, stopping at `!`.
fn parse_body(body: &str) -> RleResult<Memento> {
    let mut cells = Memento::new();
    let (mut row, mut column) = (0_i64, 0_i64);
    let mut parsed_up_to = 0;
    for captures in RLE_RUN_REGEX.captures_iter(body) {
        let whole = captures.get(0).unwrap();
        if whole.start() != parsed_up_to {
            return Err(unparsed_error(&body[parsed_up_to..]));
        }
        parsed_up_to = whole.end();

        let count = match &captures[1] {
            "" => 1,
            // A string of digits only fails to parse if it overflows.
            n => n.parse::<i64>().map_err(|_| RleError::TooBig)?,
        };
        if count == 0 {
            return Err(RleError::InvalidCount);
        }
        match &captures[2] {
            "b" => column = column.checked_add(count).ok_or(RleError::TooBig)?,
            "o" => {
                let end = column.checked_add(count).ok_or(RleError::TooBig)?;
                usize::try_from(count)
                    .ok()
                    .and_then(|count| count.checked_add(cells.len()))
                    .filter(|&population| population <= MAX_POPULATION)
                    .ok_or(RleError::TooBig)?;
                cells.extend((column..end).map(|c| Pos::new(row, c)));
                column = end;
            }
            "$" => {
                row = row.checked_add(count).ok_or(RleError::TooBig)?;
                column = 0;
            }
            _ => return Ok(cells), // `!`
        }
    }
    if parsed_up_to != body.len() {
        return Err(unparsed_error(&body[parsed_up_to..]));
    }
    // Golly tolerates a missing `!`.
    Ok(cells)
}

fn unparsed_error(rest: &str) -> RleError {
    match rest.chars().find(|ch| !ch.is_ascii_digit()) {
        Some(ch) => RleError::UnknownSymbol(ch),
        None => RleError::UnexpectedEnd,
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum RleItem {
    Dead,
    Alive,
    NextRow,
    End,
}
impl fmt::Display for RleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RleItem::Dead => write!(f, "b"),
            RleItem::Alive => write!(f, "o"),
            RleItem::NextRow => write!(f, "$"),
            RleItem::End => write!(f, "!"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct RleRun {
    count: u64,
    item: RleItem,
}
impl RleRun {
    const END: Self = Self {
        count: 1,
        item: RleItem::End,
    };
}
impl fmt::Display for RleRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count != 1 {
            write!(f, "{}", self.count)?;
        }
        write!(f, "{}", self.item)
    }
}
