//! Block-letter banners from plain-text glyph fonts.
//!
//! A font is a text file holding one 9-line glyph run per character, in code
//! point order starting at space (32). Line `(code - 32) * 9 + row` holds
//! row `row` of that character; row 0 is a spacer and is never rendered.
//!
//! ```
//! let font = banner::Font::new("\n1\n2\n3\n4\n5\n6\n7\n8");
//! let rows = font.render("  ");
//! assert_eq!(rows[0], "11");
//! assert_eq!(rows[7], "88");
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
#[macro_use]
extern crate std;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

#[cfg(feature = "cache")]
mod cache;
#[cfg(feature = "std")]
mod load;
#[cfg(feature = "web")]
pub mod web;

#[cfg(feature = "cache")]
pub use cache::FontCache;
#[cfg(feature = "std")]
pub use load::LoadError;

/// Rows rendered per glyph.
pub const ROWS: usize = 8;
/// Lines per glyph run, including the spacer row.
pub const RUN: usize = ROWS + 1;
/// Code point of the first glyph run.
pub const FIRST: u32 = 32;

#[derive(Debug, Clone)]
pub struct Font<Data> {
    data: Data,
    lines: Vec<Range<usize>>,
}

impl<Data: AsRef<str>> Font<Data> {
    /// Index the line boundaries of `data`. Lines are split on `'\n'` only;
    /// a trailing newline leaves a final empty line.
    pub fn new(data: Data) -> Self {
        let text = data.as_ref();
        let mut lines = Vec::new();
        let mut start = 0;
        for (end, _) in text.match_indices('\n') {
            lines.push(start..end);
            start = end + 1;
        }
        lines.push(start..text.len());
        Self { data, lines }
    }

    /// Number of lines in the font.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the font is too short to hold even the space glyph. `len` is
    /// never zero, since an empty resource still has one empty line.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.len() < RUN
    }

    #[inline]
    pub fn line(&self, index: usize) -> Option<&str> {
        let span = self.lines.get(index)?;
        Some(&self.data.as_ref()[span.clone()])
    }

    /// Rows 1..=8 of `c`'s glyph run. Rows outside the font come back empty.
    pub fn get(&self, c: char) -> Glyph<'_> {
        let start = run_start(c)
            .and_then(|base| base.checked_add(1))
            .filter(|start| start.checked_add(ROWS).is_some())
            .unwrap_or(self.lines.len());
        Glyph {
            text: self.data.as_ref(),
            lines: &self.lines,
            next: start,
            end: start + ROWS,
        }
    }

    /// Whether every rendered row of `c` lies inside the font.
    pub fn covers(&self, c: char) -> bool {
        match run_start(c).and_then(|base| base.checked_add(ROWS)) {
            Some(last) => last < self.lines.len(),
            None => false,
        }
    }

    /// Render one word: row `j` is the concatenation of row `j` of every
    /// character's glyph. Characters outside the font contribute nothing.
    pub fn render(&self, word: &str) -> [String; ROWS] {
        let mut rows: [String; ROWS] = Default::default();
        for c in word.chars() {
            if !self.covers(c) {
                log::trace!("glyph for {:?} not fully covered by font", c);
            }
            for (row, line) in rows.iter_mut().zip(self.get(c)) {
                row.push_str(line);
            }
        }
        rows
    }

    /// Render every word of every line of `text`, in order.
    pub fn render_text(&self, text: &str) -> Vec<String> {
        text.split('\n')
            .flat_map(words)
            .flat_map(|word| self.render(word))
            .collect()
    }
}

/// Index of the spacer line of `c`'s glyph run, if `c` is at or above
/// [`FIRST`].
fn run_start(c: char) -> Option<usize> {
    let offset = (c as u32).checked_sub(FIRST)?;
    usize::try_from(offset).ok()?.checked_mul(RUN)
}

/// Split a line into words. Only `'\n'` separates words, so spaces stay
/// inside a word and render with the font's space glyph.
pub fn words(line: &str) -> impl Iterator<Item = &str> {
    line.split('\n').filter(|word| !word.is_empty())
}

/// Named font resource.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Banner {
    #[default]
    Standard,
    Shadow,
    Thinkertoy,
}

impl Banner {
    pub const ALL: [Banner; 3] = [Banner::Standard, Banner::Shadow, Banner::Thinkertoy];

    /// Resolve a form selector. Matching is exact; anything unknown is
    /// [`Banner::Standard`].
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "Shadow" => Banner::Shadow,
            "Thinkertoy" => Banner::Thinkertoy,
            _ => Banner::Standard,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Banner::Standard => "Standard",
            Banner::Shadow => "Shadow",
            Banner::Thinkertoy => "Thinkertoy",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match *self {
            Banner::Standard => "standard.txt",
            Banner::Shadow => "shadow.txt",
            Banner::Thinkertoy => "thinkertoy.txt",
        }
    }
}

impl core::fmt::Display for Banner {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Clone)]
pub struct Glyph<'a> {
    text: &'a str,
    lines: &'a [Range<usize>],
    next: usize,
    end: usize,
}

impl<'a> Glyph<'a> {
    #[inline]
    fn row(&self, index: usize) -> &'a str {
        match self.lines.get(index) {
            Some(span) => &self.text[span.clone()],
            None => "",
        }
    }
}

impl<'a> Iterator for Glyph<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<&'a str> {
        if self.next >= self.end {
            return None;
        }
        let row = self.row(self.next);
        self.next += 1;
        Some(row)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl ExactSizeIterator for Glyph<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.end - self.next
    }
}

impl<'a> DoubleEndedIterator for Glyph<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a str> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        Some(self.row(self.end))
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use std::string::ToString;
    use std::vec::Vec;

    use super::*;

    /// Glyph runs for codes 32..32 + count; row `r` of code `c` is `"{c}.{r}"`.
    fn numbered(count: u32) -> Font<String> {
        let mut lines = Vec::new();
        for code in FIRST..FIRST + count {
            for row in 0..RUN {
                lines.push(format!("{}.{}", code, row));
            }
        }
        Font::new(lines.join("\n"))
    }

    #[test]
    fn line_splitting() {
        let font = Font::new("a\nb\n");
        assert_eq!(font.len(), 3);
        assert_eq!(font.line(0), Some("a"));
        assert_eq!(font.line(1), Some("b"));
        assert_eq!(font.line(2), Some(""));
        assert_eq!(font.line(3), None);

        let empty = Font::new("");
        assert_eq!(empty.len(), 1);
        assert_eq!(empty.line(0), Some(""));
    }

    #[test]
    fn emptiness_means_no_glyph() {
        assert!(Font::new("").is_empty());
        assert!(Font::new("\n1\n2\n3\n4\n5\n6\n7").is_empty());
        let space = Font::new("\n1\n2\n3\n4\n5\n6\n7\n8");
        assert!(!space.is_empty());
        assert!(space.covers(' '));
        assert!(!numbered(95).is_empty());
    }

    #[test]
    fn carriage_returns_are_kept() {
        let font = Font::new("a\r\nb");
        assert_eq!(font.line(0), Some("a\r"));
    }

    #[test]
    fn glyph_rows() {
        let font = numbered(2);
        let it = font.get('!');
        assert_eq!(it.len(), ROWS);
        assert_eq!(
            it.collect::<Vec<_>>(),
            &["33.1", "33.2", "33.3", "33.4", "33.5", "33.6", "33.7", "33.8"]
        );
    }

    #[test]
    fn reverse_glyph() {
        let font = numbered(1);
        let it = font.get(' ');
        let mut naive = it.clone().collect::<Vec<_>>();
        naive.reverse();
        assert_eq!(naive, it.rev().collect::<Vec<_>>());
    }

    #[test]
    fn glyph_past_end() {
        let font = Font::new("\n1\n2\n3");
        assert_eq!(
            font.get(' ').collect::<Vec<_>>(),
            &["1", "2", "3", "", "", "", "", ""]
        );
        assert!(!font.covers(' '));
        assert!(font.get('A').all(str::is_empty));
    }

    #[test]
    fn control_and_wide_characters() {
        let font = numbered(95);
        for c in ['\t', '\r', '\u{1f}', '\u{10ffff}', 'é'] {
            assert!(!font.covers(c));
            assert_eq!(font.get(c).len(), ROWS);
            assert!(font.get(c).all(str::is_empty));
        }
        assert!(font.covers('~'));
    }

    #[test]
    fn render_single_character() {
        let font = numbered(95);
        let rows = font.render("A");
        for (j, row) in rows.iter().enumerate() {
            assert_eq!(Some(row.as_str()), font.line((65 - 32) * RUN + j + 1));
        }
    }

    #[test]
    fn render_skips_out_of_range() {
        let font = numbered(2);
        let rows = font.render("!A!");
        assert_eq!(rows[0], "33.133.1");
        assert_eq!(rows[7], "33.833.8");
    }

    #[test]
    fn render_text_splits_on_newlines() {
        let font = numbered(95);
        let out = font.render_text("A\n\nB\n");
        assert_eq!(out.len(), 2 * ROWS);
        assert_eq!(out[0], "65.1");
        assert_eq!(out[ROWS], "66.1");
        assert!(font.render_text("").is_empty());
        assert!(font.render_text("\n\n").is_empty());
    }

    #[test]
    fn crlf_input_drops_carriage_return() {
        let font = numbered(95);
        let out = font.render_text("A\r\nB");
        assert_eq!(out, font.render_text("A\nB"));
    }

    #[test]
    fn words_keep_spaces() {
        assert_eq!(words("ab cd").collect::<Vec<_>>(), vec!["ab cd"]);
        assert_eq!(words("").count(), 0);
    }

    #[test]
    fn banner_selectors() {
        assert_eq!(Banner::from_selector("Shadow"), Banner::Shadow);
        assert_eq!(Banner::from_selector("Thinkertoy"), Banner::Thinkertoy);
        assert_eq!(Banner::from_selector("Standard"), Banner::Standard);
        assert_eq!(Banner::from_selector("shadow"), Banner::Standard);
        assert_eq!(Banner::from_selector(""), Banner::Standard);
        assert_eq!(Banner::Thinkertoy.file_name(), "thinkertoy.txt");
        assert_eq!(Banner::Shadow.to_string(), "Shadow");
    }
}
