/// Default number of spaces per nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Configuration context for rendering operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub depth: usize,
    pub indent_width: usize,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            depth: 0,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }

    pub fn with_indent_width(self, indent_width: usize) -> Self {
        Self {
            indent_width,
            ..self
        }
    }

    pub fn with_depth(&self, depth: usize) -> Self {
        Self {
            depth,
            indent_width: self.indent_width,
        }
    }

    /// Context for the members of a declaration rendered at this depth.
    pub fn nested(&self) -> Self {
        self.with_depth(self.depth + 1)
    }

    pub fn indent(&self) -> String {
        " ".repeat(self.indent_width * self.depth)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Destination for rendered lines.
pub trait OutputSink {
    fn write_line(&mut self, line: &str);
}

/// Newline-terminated text buffer.
impl OutputSink for String {
    fn write_line(&mut self, line: &str) {
        self.push_str(line);
        self.push('\n');
    }
}

impl OutputSink for Vec<String> {
    fn write_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Core rendering trait for declarations
pub trait Render {
    fn render(&self, context: &RenderContext, sink: &mut dyn OutputSink);
}
