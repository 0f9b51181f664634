//! Parser for the compact icon path DSL.
//!
//! The grammar is an SVG subset with absolute coordinates only:
//!
//! ```text
//! M x,y        move to
//! L x,y        line to
//! Q cx,cy x,y  quadratic Bézier
//! C ax,ay bx,by x,y  cubic Bézier
//! A mx,my x,y  circular arc through (mx,my), ending at (x,y)
//! Z            close subpath
//! ```
//!
//! Numbers are separated by whitespace and/or commas. A malformed segment
//! (unknown command letter or too few coordinates) is skipped with a warning
//! so a partially bad path still renders its good segments; parsing fails
//! only when nothing drawable survives.

use kurbo::Point;
use thiserror::Error;

use crate::geometry::{IconGeometry, PathSegment, Subpath};

/// Path DSL errors.
#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    #[error("unknown path command '{0}'")]
    UnknownCommand(char),
    #[error("truncated coordinates for command '{0}'")]
    Truncated(char),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("path produced no drawable geometry")]
    Empty,
    #[error("invalid embedded payload: {0}")]
    Payload(String),
}

/// Tolerance for the implicit-close endpoint comparison.
const CLOSE_EPSILON: f64 = 1e-9;

struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Scanner { rest: input }
    }

    fn skip_separators(&mut self) {
        self.rest = self
            .rest
            .trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    }

    /// Next command letter, or `None` at end of input.
    fn next_command(&mut self) -> Option<char> {
        self.skip_separators();
        let c = self.rest.chars().next()?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(c)
    }

    /// True if the next token is a command letter (or input is exhausted).
    fn at_command_boundary(&mut self) -> bool {
        self.skip_separators();
        match self.rest.chars().next() {
            None => true,
            Some(c) => c.is_ascii_alphabetic(),
        }
    }

    /// Parse one number. `cmd` names the owning command for diagnostics.
    fn number(&mut self, cmd: char) -> Result<f64, PathError> {
        self.skip_separators();
        if self.rest.is_empty() {
            return Err(PathError::Truncated(cmd));
        }
        let mut prev = '\0';
        let mut end = self.rest.len();
        for (i, c) in self.rest.char_indices() {
            // A sign is only valid leading the token or an exponent.
            let sign_ok = (c == '-' || c == '+') && (i == 0 || prev == 'e' || prev == 'E');
            if !(c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || sign_ok) {
                end = i;
                break;
            }
            prev = c;
        }
        if end == 0 {
            return Err(PathError::Truncated(cmd));
        }
        let (tok, rest) = self.rest.split_at(end);
        self.rest = rest;
        tok.parse::<f64>()
            .map_err(|_| PathError::InvalidNumber(tok.to_string()))
    }

    fn point(&mut self, cmd: char) -> Result<Point, PathError> {
        let x = self.number(cmd)?;
        let y = self.number(cmd)?;
        Ok(Point::new(x, y))
    }

    /// Discard tokens up to the next command letter. Used to resynchronize
    /// after a malformed segment.
    fn skip_to_next_command(&mut self) {
        while !self.at_command_boundary() {
            let mut chars = self.rest.chars();
            if chars.next().is_none() {
                break;
            }
            self.rest = chars.as_str();
        }
    }
}

/// Parse a path string into icon geometry.
///
/// Malformed segments are skipped (with a `log::warn!` diagnostic); returns
/// [`PathError::Empty`] when no drawable segment was recognized at all.
pub fn parse(input: &str) -> Result<IconGeometry, PathError> {
    let mut scanner = Scanner::new(input);
    let mut geometry = IconGeometry::default();
    let mut current = Subpath::default();
    let mut pen = Point::ZERO;

    fn finish_subpath(geometry: &mut IconGeometry, mut subpath: Subpath) {
        if subpath.segments.is_empty() {
            return;
        }
        if !subpath.closed {
            if let Some(start) = subpath.start() {
                let last = subpath.segments.last().map(|s| s.endpoint()).unwrap_or(start);
                if (last - start).hypot() <= CLOSE_EPSILON && subpath.segments.len() > 1 {
                    subpath.closed = true;
                }
            }
        }
        geometry.subpaths.push(subpath);
    }

    while let Some(cmd) = scanner.next_command() {
        let parsed: Result<Option<PathSegment>, PathError> = match cmd {
            'M' => scanner.point(cmd).map(|p| Some(PathSegment::MoveTo(p))),
            'L' => scanner.point(cmd).map(|p| Some(PathSegment::LineTo(p))),
            'Q' => scanner
                .point(cmd)
                .and_then(|c| scanner.point(cmd).map(|p| Some(PathSegment::QuadTo(c, p)))),
            'C' => scanner.point(cmd).and_then(|c1| {
                scanner
                    .point(cmd)
                    .and_then(|c2| scanner.point(cmd).map(|p| Some(PathSegment::CubicTo(c1, c2, p))))
            }),
            'A' => scanner
                .point(cmd)
                .and_then(|thru| scanner.point(cmd).map(|end| Some(PathSegment::ArcTo { thru, end }))),
            'Z' | 'z' => {
                current.closed = true;
                finish_subpath(&mut geometry, std::mem::take(&mut current));
                Ok(None)
            }
            other => Err(PathError::UnknownCommand(other)),
        };

        match parsed {
            Ok(Some(seg @ PathSegment::MoveTo(p))) => {
                finish_subpath(&mut geometry, std::mem::take(&mut current));
                current.segments.push(seg);
                pen = p;
            }
            Ok(Some(seg)) => {
                // A drawing command before any move starts an implicit
                // subpath at the current pen position.
                if current.segments.is_empty() {
                    current.segments.push(PathSegment::MoveTo(pen));
                }
                pen = seg.endpoint();
                current.segments.push(seg);
            }
            Ok(None) => {}
            Err(err) => {
                log::warn!("skipping malformed path segment: {err}");
                scanner.skip_to_next_command();
            }
        }
    }
    finish_subpath(&mut geometry, current);

    if geometry.subpaths.iter().all(|s| s.is_degenerate()) {
        return Err(PathError::Empty);
    }
    Ok(geometry)
}
