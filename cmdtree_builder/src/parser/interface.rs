use terminal_size::{terminal_size, Width};

use crate::parser::{ErrorContext, ParseError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // padding must be at least 1
        if width >= 1 {
            Ok(PaddingWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // left must be at least 1
        if width >= 1 {
            Ok(LeftWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct MiddleWidth(usize);

impl MiddleWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // middle must be at least 2 (so we can hyphenate)
        if width >= 2 {
            Ok(MiddleWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct TotalWidth(pub usize);

/// Renders a left column (including its indent) and a word-wrapped middle column.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: PaddingWidth,
    left: LeftWidth,
    middle: MiddleWidth,
}

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

// Columns line up on multiples of this width.
pub(crate) const TAB_WIDTH: usize = 8;

impl ColumnRenderer {
    /// Produce a renderer based off the provided widths.
    /// This renderer will use a heuristic to chose the middle width.
    pub(crate) fn guided(
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        total_width: TotalWidth,
    ) -> Self {
        let non_middle: usize = left.0 + padding.0;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle.0, MINIMUM_MIDDLE_WIDTH);

        if guided_middle + non_middle <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} and middle fit within the target total {target_total_width}.  Selecting middle: {guided_middle}.");
            }

            Self::new(padding, left, MiddleWidth(guided_middle))
        } else if non_middle < total_width.0 {
            let calculated_middle = std::cmp::max(total_width.0 - non_middle, MINIMUM_MIDDLE_WIDTH);
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} fits within the total {total_width:?}.  Selecting middle: {calculated_middle}.");
            }

            Self::new(padding, left, MiddleWidth(calculated_middle))
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} do not fit within the total {total_width:?}.  Selecting middle: {MINIMUM_MIDDLE_WIDTH}.");
            }

            Self::new(padding, left, MiddleWidth(MINIMUM_MIDDLE_WIDTH))
        }
    }

    /// Produce a renderer based off the provided widths.
    pub(crate) fn new(padding: PaddingWidth, left: LeftWidth, middle: MiddleWidth) -> Self {
        Self {
            padding,
            left,
            middle,
        }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        assert!(indent + display_width(left) <= self.left.0);
        let left_column_width = self.left.0 - indent;
        let padding = format!("{:width$}", "", width = self.padding.0);
        let middle_parts = chunk(middle, self.middle.0);
        let mut out = Vec::default();

        for (i, part) in middle_parts.iter().enumerate() {
            if i == 0 {
                out.push(format!(
                    "{:indent$}{:left_column_width$}{padding}{}",
                    "", left, part
                ));
            } else {
                out.push(format!("{:width$}{}", "", part, width = self.left.0 + self.padding.0));
            }
        }

        if out.is_empty() {
            assert!(middle_parts.is_empty());
            out.push(format!("{:indent$}{}", "", left));
        }

        out
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if display_width(current.as_str()) + display_width(word) + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    // Split on character boundaries; byte offsets would cut through multi-byte characters.
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;
    let mut right = increment;

    while right + 1 < characters.len() {
        let part: String = characters[left..right].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
        right += increment;
    }

    current.extend(&characters[left..]);
}

// Width as rendered by the `{:width$}` formatting, which counts characters.
fn display_width(text: &str) -> usize {
    text.chars().count()
}

pub(crate) fn terminal_width() -> Option<usize> {
    if let Some((Width(terminal_width), _)) = terminal_size() {
        Some(terminal_width as usize)
    } else {
        None
    }
}

#[derive(Debug)]
enum Line {
    Plain(String),
    Fields {
        indent: usize,
        left: String,
        middle: String,
    },
}

/// Buffers output lines and column-aligned rows, writing them out on [`TabWriter::flush`].
///
/// The left column of all buffered rows is aligned to a common tab stop (multiples of 8).
/// The right column is word-wrapped to fit the terminal, when one is detected.
/// Any lines still buffered are flushed when the writer is dropped.
///
/// ### Example
/// ```
/// # use cmdtree_builder as cmdtree;
/// use cmdtree::TabWriter;
///
/// let mut writer = TabWriter::stdout();
/// writer.line("Fruit:");
/// writer.fields(4, "apple", "Crunchy.");
/// writer.fields(4, "banana", "Not so crunchy.");
/// writer.flush();
/// ```
pub struct TabWriter<'u> {
    user_interface: &'u dyn UserInterface,
    terminal_width: Option<usize>,
    lines: Vec<Line>,
}

static CONSOLE: ConsoleInterface = ConsoleInterface {};

impl TabWriter<'static> {
    /// Create a writer onto standard output.
    pub fn stdout() -> Self {
        TabWriter::new(&CONSOLE, terminal_width())
    }
}

impl<'u> TabWriter<'u> {
    pub(crate) fn new(user_interface: &'u dyn UserInterface, terminal_width: Option<usize>) -> Self {
        Self {
            user_interface,
            terminal_width,
            lines: Vec::default(),
        }
    }

    /// Buffer a plain (un-aligned) line.
    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push(Line::Plain(text.into()));
    }

    /// Buffer a row of two aligned columns, indenting the row by `indent` spaces.
    pub fn fields(&mut self, indent: usize, left: impl Into<String>, middle: impl Into<String>) {
        self.lines.push(Line::Fields {
            indent,
            left: left.into(),
            middle: middle.into(),
        });
    }

    /// Write out all buffered lines.
    pub fn flush(&mut self) {
        if self.lines.is_empty() {
            return;
        }

        let lines = std::mem::take(&mut self.lines);
        let renderer = self.renderer(&lines);

        for line in lines {
            match line {
                Line::Plain(text) => self.user_interface.print(text),
                Line::Fields {
                    indent,
                    left,
                    middle,
                } => {
                    let renderer = renderer
                        .as_ref()
                        .expect("internal error - renderer must exist for fields");

                    for rendered in renderer.render(indent, &left, &middle) {
                        self.user_interface.print(rendered);
                    }
                }
            }
        }
    }

    fn renderer(&self, lines: &[Line]) -> Option<ColumnRenderer> {
        let mut left_column_width: Option<usize> = None;
        let mut middle_column_width = 0;

        for line in lines {
            if let Line::Fields {
                indent,
                left,
                middle,
            } = line
            {
                let width = indent + display_width(left);
                left_column_width = Some(left_column_width.map_or(width, |w| w.max(width)));
                middle_column_width = middle_column_width.max(display_width(middle));
            }
        }

        let left_column_width = std::cmp::max(left_column_width?, 1);
        // The middle column starts on the tab stop after the widest left column.
        let tab_stop = ((left_column_width / TAB_WIDTH) + 1) * TAB_WIDTH;
        let padding = PaddingWidth::new(tab_stop - left_column_width)
            .expect("internal error - tab stop must follow the left column");
        let left = LeftWidth::new(left_column_width)
            .expect("internal error - left column must be non-empty");
        let middle = MiddleWidth::new(std::cmp::max(middle_column_width, MINIMUM_MIDDLE_WIDTH))
            .expect("internal error - middle column must be hyphenatable");

        Some(match self.terminal_width {
            Some(total) => ColumnRenderer::guided(padding, left, middle, TotalWidth(total)),
            None => ColumnRenderer::new(padding, left, middle),
        })
    }
}

impl<'u> Drop for TabWriter<'u> {
    fn drop(&mut self) {
        self.flush();
    }
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: &ParseError);
    fn print_error_context(&self, error_context: ErrorContext);
}

impl<T: UserInterface + ?Sized> UserInterface for &T {
    fn print(&self, message: String) {
        (**self).print(message);
    }

    fn print_error(&self, error: &ParseError) {
        (**self).print_error(error);
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        (**self).print_error_context(error_context);
    }
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: &ParseError) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}

/// Discards all output.
#[cfg(feature = "unit_test")]
#[derive(Default)]
pub(crate) struct SilentInterface {}

#[cfg(feature = "unit_test")]
impl UserInterface for SilentInterface {
    fn print(&self, _message: String) {}

    fn print_error(&self, _error: &ParseError) {}

    fn print_error_context(&self, _error_context: ErrorContext) {}
}


#[cfg(test)]
mod tests {
    use super::util::InMemoryInterface;
    use super::*;

    #[test]
    fn column_renderer_simple() {
        let cr = ColumnRenderer::new(
            PaddingWidth::new(4).unwrap(),
            LeftWidth::new(5).unwrap(),
            MiddleWidth::new(23).unwrap(),
        );

        assert_eq!(
            cr.render(0, "abc", "something"),
            vec!["abc      something".to_string()]
        );
        assert_eq!(
            cr.render(0, "abc", "  something  "),
            vec!["abc      something".to_string()]
        );
        assert_eq!(
            cr.render(0, "abc12", "something pieces full"),
            vec!["abc12    something pieces full".to_string()]
        );
        assert_eq!(
            cr.render(0, "abc", "something pieces full more stuff"),
            vec![
                "abc      something pieces full".to_string(),
                "         more stuff".to_string(),
            ]
        );
        assert_eq!(
            cr.render(0, "abc", "something pieces fullest more stuff extra     "),
            vec![
                "abc      something pieces".to_string(),
                "         fullest more stuff".to_string(),
                "         extra".to_string(),
            ]
        );
    }

    #[test]
    fn column_renderer_middle_overflow() {
        let cr = ColumnRenderer::new(
            PaddingWidth::new(4).unwrap(),
            LeftWidth::new(5).unwrap(),
            MiddleWidth::new(23).unwrap(),
        );

        assert_eq!(
            cr.render(0, "abc", "somethingxpiecesxfuller"),
            vec!["abc      somethingxpiecesxfuller".to_string()]
        );
        assert_eq!(
            cr.render(0, "abc", "somethingxpiecesxfullerandthenwecontinueforalongtime"),
            vec![
                "abc      somethingxpiecesxfulle-".to_string(),
                "         randthenwecontinuefora-".to_string(),
                "         longtime".to_string(),
            ]
        );
    }

    #[test]
    fn column_renderer_middle_multibyte() {
        let cr = ColumnRenderer::new(
            PaddingWidth::new(1).unwrap(),
            LeftWidth::new(3).unwrap(),
            MiddleWidth::new(5).unwrap(),
        );

        assert_eq!(
            cr.render(0, "ab", "日本語日本語日本語"),
            vec!["ab  日本語日-".to_string(), "    本語日本語".to_string()]
        );
        assert_eq!(
            cr.render(0, "ab", "für über öl"),
            vec!["ab  für".to_string(), "    über".to_string(), "    öl".to_string()]
        );
    }

    #[test]
    fn column_renderer_middle_empty() {
        let cr = ColumnRenderer::new(
            PaddingWidth::new(4).unwrap(),
            LeftWidth::new(5).unwrap(),
            MiddleWidth::new(8).unwrap(),
        );

        assert_eq!(cr.render(0, "abc", ""), vec!["abc".to_string()]);
        assert_eq!(cr.render(2, "abc", "   "), vec!["  abc".to_string()]);
    }

    #[test]
    fn column_renderer_indent() {
        let cr = ColumnRenderer::new(
            PaddingWidth::new(2).unwrap(),
            LeftWidth::new(6).unwrap(),
            MiddleWidth::new(10).unwrap(),
        );

        assert_eq!(
            cr.render(2, "abc", "something"),
            vec!["  abc   something".to_string()]
        );
        assert_eq!(
            cr.render(2, "abcd", "something more"),
            vec!["  abcd  something".to_string(), "        more".to_string()]
        );
    }

    #[test]
    #[should_panic]
    fn column_renderer_left_overflow() {
        let cr = ColumnRenderer::new(
            PaddingWidth::new(4).unwrap(),
            LeftWidth::new(5).unwrap(),
            MiddleWidth::new(10).unwrap(),
        );
        cr.render(0, "abcdef", "something");
    }

    #[test]
    #[should_panic]
    fn column_renderer_indent_overflow() {
        let cr = ColumnRenderer::new(
            PaddingWidth::new(4).unwrap(),
            LeftWidth::new(5).unwrap(),
            MiddleWidth::new(10).unwrap(),
        );
        cr.render(3, "abc", "something");
    }

    #[test]
    fn column_renderer_guided() {
        //
        // When the total width is too short (for even the non middle).
        //
        let cr = ColumnRenderer::guided(
            PaddingWidth::new(2).unwrap(),
            LeftWidth::new(5).unwrap(),
            MiddleWidth::new(2).unwrap(),
            TotalWidth(7),
        );
        assert_eq!(cr.middle.0, MINIMUM_MIDDLE_WIDTH);

        //
        // When the total width is too short (for it all).
        //
        let cr = ColumnRenderer::guided(
            PaddingWidth::new(2).unwrap(),
            LeftWidth::new(5).unwrap(),
            MiddleWidth::new(MINIMUM_MIDDLE_WIDTH + 1).unwrap(),
            TotalWidth(15),
        );
        assert_eq!(cr.middle.0, MINIMUM_MIDDLE_WIDTH);

        //
        // When the total width is just right.
        //
        let cr = ColumnRenderer::guided(
            PaddingWidth::new(2).unwrap(),
            LeftWidth::new(5).unwrap(),
            MiddleWidth::new(MINIMUM_MIDDLE_WIDTH + 1).unwrap(),
            TotalWidth(27),
        );
        assert_eq!(cr.middle.0, MINIMUM_MIDDLE_WIDTH + 1);

        let cr = ColumnRenderer::guided(
            PaddingWidth::new(2).unwrap(),
            LeftWidth::new(5).unwrap(),
            MiddleWidth::new(MINIMUM_MIDDLE_WIDTH + 2).unwrap(),
            TotalWidth(27),
        );
        assert_eq!(cr.middle.0, MINIMUM_MIDDLE_WIDTH + 3);

        //
        // When the total width is too long.
        //
        let cr = ColumnRenderer::guided(
            PaddingWidth::new(2).unwrap(),
            LeftWidth::new(5).unwrap(),
            MiddleWidth::new(MINIMUM_MIDDLE_WIDTH + 10).unwrap(),
            TotalWidth(50),
        );
        assert_eq!(cr.middle.0, MINIMUM_MIDDLE_WIDTH + 10);
    }

    #[test]
    fn tab_writer_aligns_to_tab_stop() {
        // Setup
        let interface = InMemoryInterface::default();
        let mut writer = TabWriter::new(&interface, None);

        // Execute
        writer.line("Commands:");
        writer.fields(4, "a", "The a command.");
        writer.fields(4, "longer", "The longer command.");
        writer.flush();

        // Verify
        assert_eq!(
            interface.message().unwrap(),
            "Commands:\n    a           The a command.\n    longer      The longer command."
        );
    }

    #[test]
    fn tab_writer_next_tab_stop() {
        // Setup
        let interface = InMemoryInterface::default();
        let mut writer = TabWriter::new(&interface, None);

        // Execute
        // Precisely 8 wide, so the middle moves on to the following stop.
        writer.fields(4, "abcd", "x");
        writer.flush();

        // Verify
        assert_eq!(interface.message().unwrap(), "    abcd        x");
    }

    #[test]
    fn tab_writer_flush_on_drop() {
        // Setup
        let interface = InMemoryInterface::default();

        // Execute
        {
            let mut writer = TabWriter::new(&interface, None);
            writer.line("first");
            writer.fields(0, "key", "value");
            assert_eq!(interface.message(), None);
        }

        // Verify
        assert_eq!(interface.message().unwrap(), "first\nkey     value");
    }

    #[test]
    fn tab_writer_flush_once() {
        // Setup
        let interface = InMemoryInterface::default();

        // Execute
        {
            let mut writer = TabWriter::new(&interface, None);
            writer.line("only");
            writer.flush();
            writer.flush();
        }

        // Verify
        assert_eq!(interface.message().unwrap(), "only");
    }

    #[test]
    fn tab_writer_wraps_to_terminal() {
        // Setup
        let interface = InMemoryInterface::default();
        let mut writer = TabWriter::new(&interface, Some(30));

        // Execute
        writer.fields(0, "-p", "one two three four five six seven");
        writer.flush();

        // Verify
        assert_eq!(
            interface.message().unwrap(),
            "-p      one two three four\n        five six seven"
        );
    }

    #[test]
    fn tab_writer_wraps_multibyte_to_terminal() {
        // Setup
        let interface = InMemoryInterface::default();
        let mut writer = TabWriter::new(&interface, Some(30));

        // Execute
        writer.fields(0, "-ü", "äöü äöü äöü äöü äöü äöü äöü");
        writer.flush();

        // Verify
        assert_eq!(
            interface.message().unwrap(),
            "-ü      äöü äöü äöü äöü äöü\n        äöü äöü"
        );
    }
}
