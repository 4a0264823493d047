//! # Header Module
//!
//! Locates the `Copyright <years> <holder>` line in file content and produces
//! the updated content: the year range extended to the current year, or a
//! full notice inserted when no copyright line exists.

use std::borrow::Cow;
use std::fmt;

use anyhow::{Context, Result};
use regex::Regex;

use crate::templates::CommentStyle;

/// A single year or a `start-end` pair taken from a copyright line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
  pub start: i32,
  pub end: Option<i32>,
}

impl YearRange {
  /// True when either bound equals `year`.
  pub fn covers(&self, year: i32) -> bool {
    self.start == year || self.end == Some(year)
  }
}

impl fmt::Display for YearRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.end {
      Some(end) => write!(f, "{}-{}", self.start, end),
      None => write!(f, "{}", self.start),
    }
  }
}

/// First copyright line found in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch {
  /// Zero-based line index
  pub line_index: usize,
  pub range: YearRange,
}

/// What the updater did (or would do) to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
  /// The copyright line already covers the current year
  Unchanged,
  /// The copyright line was rewritten to end at the current year
  YearUpdated { previous: YearRange },
  /// No copyright line was found and the full notice was inserted
  HeaderAdded,
}

/// Applies copyright header changes to file content for one holder and year.
pub struct HeaderTransformer {
  holder: String,
  current_year: i32,
  pattern: Regex,
}

impl HeaderTransformer {
  /// Creates a transformer matching `Copyright YYYY[-YYYY] <holder>`.
  pub fn new(holder: &str, current_year: i32) -> Result<Self> {
    let pattern = Regex::new(&format!(r"Copyright ([0-9]{{4}})(?:-([0-9]{{4}}))? {}", regex::escape(holder)))
      .with_context(|| format!("Failed to build copyright pattern for holder: {holder}"))?;

    Ok(Self {
      holder: holder.to_string(),
      current_year,
      pattern,
    })
  }

  pub const fn current_year(&self) -> i32 {
    self.current_year
  }

  /// Finds the first line carrying a copyright year range for the holder.
  pub fn find_year_range<S: AsRef<str>>(&self, lines: &[S]) -> Option<HeaderMatch> {
    lines.iter().enumerate().find_map(|(line_index, line)| {
      let caps = self.pattern.captures(line.as_ref())?;
      let start = caps[1].parse().ok()?;
      let end = caps.get(2).and_then(|m| m.as_str().parse().ok());
      Some(HeaderMatch {
        line_index,
        range: YearRange { start, end },
      })
    })
  }

  /// Computes the updated content.
  ///
  /// `notice` is the rendered notice text; it is commented with `style` only
  /// when a header has to be inserted. Content that needs no change is
  /// returned borrowed.
  pub fn apply<'a>(&self, content: &'a str, style: &CommentStyle, notice: &str) -> (HeaderAction, Cow<'a, str>) {
    let mut lines: Vec<Cow<'a, str>> = content.split_inclusive('\n').map(Cow::Borrowed).collect();

    match self.find_year_range(&lines) {
      Some(found) if found.range.covers(self.current_year) => (HeaderAction::Unchanged, Cow::Borrowed(content)),
      Some(found) => {
        let terminator = line_terminator(&lines[found.line_index]);
        lines[found.line_index] = Cow::Owned(format!(
          "{}Copyright {}-{} {}{}",
          style.marker, found.range.start, self.current_year, self.holder, terminator
        ));
        (
          HeaderAction::YearUpdated { previous: found.range },
          Cow::Owned(lines.concat()),
        )
      }
      None => {
        let line_ending = detect_line_ending(content);
        let index = usize::from(content.starts_with("#!"));

        // A directive-only file has no newline to separate it from the notice
        if index == 1 && line_terminator(&lines[0]).is_empty() {
          lines[0] = Cow::Owned(format!("{}{}", lines[0], line_ending));
        }

        let mut block = style.comment_lines(notice, line_ending);
        block.push(line_ending.to_string());
        lines.splice(index..index, block.into_iter().map(Cow::Owned));

        (HeaderAction::HeaderAdded, Cow::Owned(lines.concat()))
      }
    }
  }
}

/// Line ending used by the file, judged from its first line.
fn detect_line_ending(content: &str) -> &'static str {
  match content.find('\n') {
    Some(pos) if content[..pos].ends_with('\r') => "\r\n",
    _ => "\n",
  }
}

fn line_terminator(line: &str) -> &'static str {
  if line.ends_with("\r\n") {
    "\r\n"
  } else if line.ends_with('\n') {
    "\n"
  } else {
    ""
  }
}
