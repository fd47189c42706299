use crate::parser::*;
use crate::renderer::components::*;
use crate::renderer::traits::*;
use crate::visibility::{constructor_is_visible, is_public};

/// A single declaration inside its tree.
#[derive(Clone, Copy)]
pub struct Declaration<'t> {
    pub tree: &'t DeclarationTree,
    pub id: NodeId,
}

/// An ordered run of sibling declarations.
#[derive(Clone, Copy)]
pub struct Declarations<'t> {
    pub tree: &'t DeclarationTree,
    pub ids: &'t [NodeId],
}

impl<'t> Declarations<'t> {
    pub fn roots(tree: &'t DeclarationTree) -> Self {
        Self {
            tree,
            ids: tree.roots(),
        }
    }

    pub fn members_of(tree: &'t DeclarationTree, id: NodeId) -> Self {
        Self {
            tree,
            ids: tree.node(id).children(),
        }
    }
}

impl Render for Declarations<'_> {
    fn render(&self, context: &RenderContext, sink: &mut dyn OutputSink) {
        for &id in self.ids {
            if !is_public(self.tree, id) {
                continue;
            }
            Declaration { tree: self.tree, id }.render(context, sink);
        }
    }
}

impl Render for Declaration<'_> {
    fn render(&self, context: &RenderContext, sink: &mut dyn OutputSink) {
        let node = self.tree.node(self.id);
        let indent = context.indent();

        match &node.kind {
            DeclarationKind::Function(func) => {
                let Some(name) = node.name() else {
                    return;
                };
                let receiver = func
                    .receiver
                    .as_deref()
                    .map(|r| format!("{}.", r))
                    .unwrap_or_default();
                let type_params = TypeParamRenderer.render_with_bounds(&func.type_parameters);
                let params = ParameterRenderer.render_named(&func.parameters);

                sink.write_line(&format!("{}fun {}{}{}({})", indent, receiver, name, type_params, params));
            }
            DeclarationKind::Class(class) => {
                let Some(name) = node.name() else {
                    return;
                };
                let keyword = class_keyword(&class.flags, node.modifiers);
                let type_params = TypeParamRenderer.render_names(&class.type_parameters);

                sink.write_line(&format!("{}{} {}{} {{", indent, keyword, name, type_params));
                self.render_body(context, sink);
                sink.write_line(&format!("{}}}", indent));
            }
            DeclarationKind::Property(property) => {
                let Some(name) = node.name() else {
                    return;
                };
                let binding = if property.is_var { "var" } else { "val" };
                let ty = property
                    .type_text
                    .as_deref()
                    .map(|t| format!(": {}", t))
                    .unwrap_or_default();

                sink.write_line(&format!("{}{} {}{}", indent, binding, name, ty));
            }
            DeclarationKind::Object => {
                let Some(name) = node.name() else {
                    return;
                };
                if name == "Companion" {
                    sink.write_line(&format!("{}companion object {{", indent));
                } else {
                    sink.write_line(&format!("{}object {} {{", indent, name));
                }
                self.render_body(context, sink);
                sink.write_line(&format!("{}}}", indent));
            }
            DeclarationKind::Constructor(ctor) => {
                if !constructor_is_visible(self.tree, self.id) {
                    return;
                }
                let params = ParameterRenderer.render_all(&ctor.parameters);
                sink.write_line(&format!("{}constructor({})", indent, params));
            }
        }
    }
}

impl Declaration<'_> {
    fn render_body(&self, context: &RenderContext, sink: &mut dyn OutputSink) {
        if self.tree.node(self.id).body.is_some() {
            Declarations::members_of(self.tree, self.id).render(&context.nested(), sink);
        }
    }
}
