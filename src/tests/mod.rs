#[cfg(test)]
mod formatting_tests {
    use crate::{
        ClassDecl, ClassFlags, ConstructorDecl, DeclarationKind, DeclarationNode, DeclarationTree,
        FileRenderer, FunctionDecl, Modifiers, NodeId, Parameter, PropertyDecl, TypeParameter,
    };
    use pretty_assertions::assert_eq;

    fn function(name: &str, decl: FunctionDecl) -> DeclarationNode {
        DeclarationNode::new(DeclarationKind::Function(decl), Some(name.to_string()))
    }

    fn class(name: &str, flags: ClassFlags) -> DeclarationNode {
        DeclarationNode::new(
            DeclarationKind::Class(ClassDecl {
                flags,
                type_parameters: vec![],
            }),
            Some(name.to_string()),
        )
    }

    fn property(name: &str, is_var: bool, ty: Option<&str>) -> DeclarationNode {
        DeclarationNode::new(
            DeclarationKind::Property(PropertyDecl {
                is_var,
                type_text: ty.map(str::to_string),
            }),
            Some(name.to_string()),
        )
    }

    fn object(name: &str) -> DeclarationNode {
        DeclarationNode::new(DeclarationKind::Object, Some(name.to_string()))
    }

    fn constructor(parameters: Vec<Parameter>) -> DeclarationNode {
        DeclarationNode::new(DeclarationKind::Constructor(ConstructorDecl { parameters }), None)
    }

    fn render(tree: &DeclarationTree) -> Vec<String> {
        let mut lines = Vec::new();
        FileRenderer::default().render_declarations(tree, &mut lines);
        lines
    }

    fn body(tree: &mut DeclarationTree, id: NodeId) {
        tree.open_body(id);
    }

    #[test]
    fn test_data_class_hides_private_member() {
        let mut tree = DeclarationTree::new();
        let foo = tree.add_root(class(
            "Foo",
            ClassFlags {
                is_data: true,
                ..ClassFlags::default()
            },
        ));
        tree.add_child(foo, property("x", false, Some("Int")));
        tree.add_child(
            foo,
            function("bar", FunctionDecl::default()).with_modifiers(Modifiers::PRIVATE),
        );

        assert_eq!(render(&tree), vec!["data class Foo {", "    val x: Int", "}"]);
    }

    #[test]
    fn test_internal_class_suppresses_subtree() {
        let mut tree = DeclarationTree::new();
        let hidden = tree.add_root(class("Hidden", ClassFlags::default()).with_modifiers(Modifiers::INTERNAL));
        tree.add_child(hidden, function("visible", FunctionDecl::default()));

        assert!(render(&tree).is_empty());
    }

    #[test]
    fn test_companion_object_keyword() {
        let mut tree = DeclarationTree::new();
        let outer = tree.add_root(class("Outer", ClassFlags::default()));
        let companion = tree.add_child(outer, object("Companion"));
        tree.add_child(companion, property("z", false, Some("String")));

        assert_eq!(
            render(&tree),
            vec![
                "class Outer {",
                "    companion object {",
                "        val z: String",
                "    }",
                "}",
            ]
        );
    }

    #[test]
    fn test_generic_function_with_bound() {
        let mut tree = DeclarationTree::new();
        tree.add_root(function(
            "max",
            FunctionDecl {
                receiver: None,
                type_parameters: vec![TypeParameter::bounded("T", "Comparable<T>")],
                parameters: vec![Parameter::named("a", "T"), Parameter::named("b", "T")],
            },
        ));

        assert_eq!(render(&tree), vec!["fun max<T : Comparable<T>>(a: T, b: T)"]);
    }

    #[test]
    fn test_extension_function_and_anonymous_parameters() {
        let mut tree = DeclarationTree::new();
        tree.add_root(function(
            "pad",
            FunctionDecl {
                receiver: Some("String".into()),
                type_parameters: vec![],
                parameters: vec![
                    Parameter::anonymous("Unit"),
                    Parameter::named("width", "Int").with_default("4"),
                    Parameter::anonymous("Char"),
                    Parameter::named("fill", "Char"),
                ],
            },
        ));

        assert_eq!(render(&tree), vec!["fun String.pad(width: Int, fill: Char)"]);
    }

    #[test]
    fn test_unnamed_declarations_are_skipped() {
        let mut tree = DeclarationTree::new();
        tree.add_root(DeclarationNode::new(DeclarationKind::Function(FunctionDecl::default()), None));
        tree.add_root(DeclarationNode::new(
            DeclarationKind::Class(ClassDecl::default()),
            None,
        ));
        tree.add_root(DeclarationNode::new(
            DeclarationKind::Property(PropertyDecl::default()),
            None,
        ));
        tree.add_root(DeclarationNode::new(DeclarationKind::Object, None));
        tree.add_root(property("kept", true, None));

        assert_eq!(render(&tree), vec!["var kept"]);
    }

    #[test]
    fn test_object_and_class_type_parameters() {
        let mut tree = DeclarationTree::new();
        let registry = tree.add_root(object("Registry"));
        body(&mut tree, registry);
        tree.add_root(DeclarationNode::new(
            DeclarationKind::Class(ClassDecl {
                flags: ClassFlags::default(),
                type_parameters: vec![TypeParameter::bounded("K", "Any"), TypeParameter::new("V")],
            }),
            Some("Cache".into()),
        ));

        assert_eq!(
            render(&tree),
            vec!["object Registry {", "}", "class Cache<K, V> {", "}"]
        );
    }

    #[test]
    fn test_class_keywords() {
        let mut tree = DeclarationTree::new();
        tree.add_root(class(
            "Service",
            ClassFlags {
                is_interface: true,
                ..ClassFlags::default()
            },
        ));
        tree.add_root(class(
            "Color",
            ClassFlags {
                is_enum: true,
                ..ClassFlags::default()
            },
        ));
        tree.add_root(class("Shape", ClassFlags::default()).with_modifiers(Modifiers::ABSTRACT));
        tree.add_root(
            class(
                "Point",
                ClassFlags {
                    is_data: true,
                    ..ClassFlags::default()
                },
            )
            .with_modifiers(Modifiers::ABSTRACT),
        );

        assert_eq!(
            render(&tree),
            vec![
                "interface Service {",
                "}",
                "enum class Color {",
                "}",
                "abstract class Shape {",
                "}",
                "data class Point {",
                "}",
            ]
        );
    }

    #[test]
    fn test_enum_entries_render_as_classes() {
        let mut tree = DeclarationTree::new();
        let color = tree.add_root(class(
            "Color",
            ClassFlags {
                is_enum: true,
                ..ClassFlags::default()
            },
        ));
        tree.add_child(color, class("RED", ClassFlags::default()));
        let green = tree.add_child(color, class("GREEN", ClassFlags::default()));
        tree.add_child(green, function("label", FunctionDecl::default()));
        tree.add_child(color, function("hex", FunctionDecl::default()));

        assert_eq!(
            render(&tree),
            vec![
                "enum class Color {",
                "    class RED {",
                "    }",
                "    class GREEN {",
                "        fun label()",
                "    }",
                "    fun hex()",
                "}",
            ]
        );
    }

    #[test]
    fn test_constructors_follow_class_visibility() {
        let mut tree = DeclarationTree::new();
        let server = tree.add_root(class("Server", ClassFlags::default()));
        tree.add_child(
            server,
            constructor(vec![
                Parameter::named("host", "String"),
                Parameter::named("port", "Int").with_default("8080"),
            ]),
        );
        tree.add_child(server, constructor(vec![]).with_modifiers(Modifiers::PRIVATE));

        let inner = tree.add_child(server, class("Inner", ClassFlags::default()).with_modifiers(Modifiers::PROTECTED));
        tree.add_child(inner, constructor(vec![Parameter::named("x", "Int")]));

        assert_eq!(
            render(&tree),
            vec![
                "class Server {",
                "    constructor(host: String, port: Int = 8080)",
                "}",
            ]
        );
    }

    #[test]
    fn test_siblings_keep_order_after_hidden_member() {
        let mut tree = DeclarationTree::new();
        let api = tree.add_root(class(
            "Api",
            ClassFlags {
                is_interface: true,
                ..ClassFlags::default()
            },
        ));
        tree.add_child(api, function("first", FunctionDecl::default()));
        tree.add_child(api, property("secret", false, Some("Int")).with_modifiers(Modifiers::PRIVATE));
        tree.add_child(api, property("second", true, Some("List<String>")));
        let nested = tree.add_child(api, object("Defaults"));
        tree.add_child(nested, function("third", FunctionDecl::default()));
        tree.add_root(function("after", FunctionDecl::default()));

        assert_eq!(
            render(&tree),
            vec![
                "interface Api {",
                "    fun first()",
                "    var second: List<String>",
                "    object Defaults {",
                "        fun third()",
                "    }",
                "}",
                "fun after()",
            ]
        );
    }

    #[test]
    fn test_section_header_and_custom_indent() {
        let mut tree = DeclarationTree::new();
        let outer = tree.add_root(class("Outer", ClassFlags::default()));
        tree.add_child(outer, property("x", false, Some("Int")));

        let output = FileRenderer::new(2).render_to_string("pkg/Outer.kt", &tree);
        assert_eq!(output, "\n====== pkg/Outer.kt ======\nclass Outer {\n  val x: Int\n}\n");
    }

    #[test]
    fn test_empty_file_renders_only_header() {
        let tree = DeclarationTree::new();
        let output = FileRenderer::default().render_to_string("Empty.kt", &tree);
        assert_eq!(output, "\n====== Empty.kt ======\n");
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let mut tree = DeclarationTree::new();
        let outer = tree.add_root(class("Outer", ClassFlags::default()));
        let companion = tree.add_child(outer, object("Companion"));
        tree.add_child(companion, function("create", FunctionDecl::default()));

        let renderer = FileRenderer::default();
        let first = renderer.render_to_string("Outer.kt", &tree);
        let second = renderer.render_to_string("Outer.kt", &tree);
        assert_eq!(first, second);
    }
}
