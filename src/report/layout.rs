//! Page layout for violation reports
//!
//! Coordinates are PDF points with the origin at the bottom-left of a US
//! letter page. Layout is kept apart from rendering so pagination can be
//! checked without parsing a PDF.

/// Letter width in points
pub const PAGE_WIDTH: f32 = 612.0;
/// Letter height in points
pub const PAGE_HEIGHT: f32 = 792.0;
/// Margin on every side
pub const MARGIN: f32 = 72.0;

/// Report title on the first page
pub const REPORT_TITLE: &str = "Compliance Violation Report";
/// Sole content line of a report without violations
pub const NO_VIOLATIONS: &str = "No violations found.";

/// Characters before a long violation line is split
pub const LINE_WIDTH: usize = 100;

const TITLE_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const LEADING: f32 = 12.0;
const ENTRY_GAP: f32 = 5.0;
const FIRST_BODY_LINE: f32 = PAGE_HEIGHT - 108.0;

/// One line of text placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Lines placed on one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

/// A report laid out into pages
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pages: Vec<PageLayout>,
}

impl ReportLayout {
    /// Lay out violations one per entry, in the given order
    ///
    /// ```
    /// use granite_regulate::report::layout::{ReportLayout, NO_VIOLATIONS};
    ///
    /// let layout = ReportLayout::build(&[]);
    /// assert_eq!(layout.content_lines(), vec![NO_VIOLATIONS]);
    /// ```
    pub fn build(violations: &[String]) -> Self {
        let mut pages = vec![PageLayout {
            lines: vec![PlacedLine {
                text: REPORT_TITLE.to_string(),
                x: MARGIN,
                y: PAGE_HEIGHT - MARGIN,
                size: TITLE_SIZE,
            }],
        }];
        let mut y = FIRST_BODY_LINE;

        let place = |pages: &mut Vec<PageLayout>, y: &mut f32, text: &str| {
            if *y < MARGIN {
                pages.push(PageLayout::default());
                *y = PAGE_HEIGHT - MARGIN;
            }
            if let Some(page) = pages.last_mut() {
                page.lines.push(PlacedLine {
                    text: text.to_string(),
                    x: MARGIN,
                    y: *y,
                    size: BODY_SIZE,
                });
            }
            *y -= LEADING;
        };

        if violations.is_empty() {
            place(&mut pages, &mut y, NO_VIOLATIONS);
        }

        for violation in violations {
            for chunk in wrap_line(violation, LINE_WIDTH) {
                place(&mut pages, &mut y, &chunk);
            }
            y -= ENTRY_GAP;
        }

        Self { pages }
    }

    /// Pages in order
    pub fn pages(&self) -> &[PageLayout] {
        &self.pages
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every body line in reading order, without the title
    pub fn content_lines(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|page| page.lines.iter())
            .skip(1)
            .map(|line| line.text.as_str())
            .collect()
    }
}

/// Split a line once at `width` characters
///
/// The first chunk holds the first `width` characters and the second holds
/// everything after, however long. Splits ignore word boundaries. An empty
/// line yields one empty chunk so it still takes up a row.
///
/// ```
/// use granite_regulate::report::layout::wrap_line;
///
/// assert_eq!(wrap_line("abcdefg", 3), vec!["abc", "defg"]);
/// assert_eq!(wrap_line("abc", 3), vec!["abc"]);
/// ```
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    match line.char_indices().nth(width) {
        Some((split, _)) if width > 0 => {
            vec![line[..split].to_string(), line[split..].to_string()]
        }
        _ => vec![line.to_string()],
    }
}
