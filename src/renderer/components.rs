use crate::parser::*;

/// Fallback type text for parameters the parser could not type.
pub const UNKNOWN_TYPE: &str = "Any";

/// Helper for rendering type parameter lists
pub struct TypeParamRenderer;

impl TypeParamRenderer {
    /// `<T : Bound, U>` as used on function signatures.
    pub fn render_with_bounds(&self, params: &[TypeParameter]) -> String {
        if params.is_empty() {
            return String::new();
        }

        let param_strs: Vec<String> = params
            .iter()
            .map(|p| match &p.bound {
                Some(bound) => format!("{} : {}", p.name, bound),
                None => p.name.clone(),
            })
            .collect();

        format!("<{}>", param_strs.join(", "))
    }

    /// `<T, U>` as used on class headers; bounds are dropped.
    pub fn render_names(&self, params: &[TypeParameter]) -> String {
        if params.is_empty() {
            return String::new();
        }

        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        format!("<{}>", names.join(", "))
    }
}

/// Helper for rendering value parameter lists
pub struct ParameterRenderer;

impl ParameterRenderer {
    /// Function parameters: anonymous ones are dropped, order is kept.
    pub fn render_named(&self, params: &[Parameter]) -> String {
        let param_strs: Vec<String> = params
            .iter()
            .filter_map(|p| {
                let name = p.name.as_deref()?;
                Some(format!("{}: {}", name, Self::type_text(p)))
            })
            .collect();
        param_strs.join(", ")
    }

    /// Constructor parameters: every parameter, with its default value.
    pub fn render_all(&self, params: &[Parameter]) -> String {
        let param_strs: Vec<String> = params
            .iter()
            .map(|p| {
                let mut rendered = format!("{}: {}", p.name.as_deref().unwrap_or("_"), Self::type_text(p));
                if let Some(default) = &p.default_value {
                    rendered.push_str(" = ");
                    rendered.push_str(default);
                }
                rendered
            })
            .collect();
        param_strs.join(", ")
    }

    fn type_text(param: &Parameter) -> &str {
        param.type_text.as_deref().unwrap_or(UNKNOWN_TYPE)
    }
}

/// Picks the class header keyword. Earlier checks win.
pub fn class_keyword(flags: &ClassFlags, modifiers: Modifiers) -> &'static str {
    if flags.is_interface {
        "interface"
    } else if flags.is_enum {
        "enum class"
    } else if flags.is_data {
        "data class"
    } else if modifiers.contains(Modifiers::ABSTRACT) {
        "abstract class"
    } else {
        "class"
    }
}
