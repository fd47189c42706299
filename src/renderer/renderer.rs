use crate::parser::*;
use crate::renderer::renders::*;
use crate::renderer::traits::*;

/// Renders whole files: a header naming the file followed by its public surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRenderer {
    pub context: RenderContext,
}

impl FileRenderer {
    pub fn new(indent_width: usize) -> Self {
        Self {
            context: RenderContext::new().with_indent_width(indent_width),
        }
    }

    pub fn header(relative_path: &str) -> String {
        format!("====== {} ======", relative_path)
    }

    /// Writes the section for one file, preceded by a blank line.
    pub fn render_section(&self, relative_path: &str, tree: &DeclarationTree, sink: &mut dyn OutputSink) {
        sink.write_line("");
        sink.write_line(&Self::header(relative_path));
        self.render_declarations(tree, sink);
    }

    /// Writes the top-level public declarations of `tree` with no base indent.
    pub fn render_declarations(&self, tree: &DeclarationTree, sink: &mut dyn OutputSink) {
        Declarations::roots(tree).render(&self.context, sink);
    }

    pub fn render_to_string(&self, relative_path: &str, tree: &DeclarationTree) -> String {
        let mut output = String::new();
        self.render_section(relative_path, tree, &mut output);
        output
    }
}
