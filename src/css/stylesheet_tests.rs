    use super::*;

    fn qualified(selectors: &[&str], declarations: Vec<Declaration>) -> Rule {
        Rule::Qualified {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            declarations,
        }
    }

    #[test]
    fn test_stylesheet_declaration_display() {
        let decl = Declaration::new("color", "red");
        assert_eq!(decl.to_string(), "color: red;");
    }

    #[test]
    fn test_stylesheet_important_declaration_display() {
        let decl = Declaration {
            important: true,
            ..Declaration::new("margin", "0")
        };
        assert_eq!(decl.to_string(), "margin: 0 !important;");
    }

    #[test]
    fn test_stylesheet_qualified_rule_display() {
        let rule = qualified(
            &["p", "div.note"],
            vec![Declaration::new("color", "red"), Declaration::new("font-size", "12px")],
        );
        assert_eq!(
            rule.to_string(),
            "p, div.note {\n  color: red;\n  font-size: 12px;\n}"
        );
    }

    #[test]
    fn test_stylesheet_empty_block_keeps_braces() {
        let rule = qualified(&["p"], vec![]);
        assert_eq!(rule.to_string(), "p {\n}");
    }

    #[test]
    fn test_stylesheet_statement_at_rule_display() {
        let rule = Rule::At {
            name: "@import".into(),
            prelude: "url(print.css) print".into(),
            block: None,
        };
        assert_eq!(rule.to_string(), "@import url(print.css) print;");
    }

    #[test]
    fn test_stylesheet_nested_rules_are_indented() {
        let rule = Rule::At {
            name: "@media".into(),
            prelude: "screen".into(),
            block: Some(AtRuleBlock::Rules(vec![qualified(
                &["a"],
                vec![Declaration::new("color", "blue")],
            )])),
        };
        assert_eq!(
            rule.to_string(),
            "@media screen {\n  a {\n    color: blue;\n  }\n}"
        );
    }

    #[test]
    fn test_stylesheet_rules_separated_by_newline() {
        let sheet = Stylesheet {
            rules: vec![
                Rule::At {
                    name: "@charset".into(),
                    prelude: "\"utf-8\"".into(),
                    block: None,
                },
                qualified(&["b"], vec![Declaration::new("font-weight", "bold")]),
            ],
        };
        assert_eq!(
            sheet.to_string(),
            "@charset \"utf-8\";\nb {\n  font-weight: bold;\n}"
        );
    }

    #[test]
    fn test_stylesheet_empty_displays_nothing() {
        assert_eq!(Stylesheet::default().to_string(), "");
    }
