    use super::*;
    use kuchikiki::Selectors;
    use kuchikiki::traits::*;

    fn first_element(html: &str, selector: &str) -> NodeDataRef<ElementData> {
        kuchikiki::parse_html()
            .one(html)
            .select_first(selector)
            .expect("element present")
    }

    fn selector_origin(selector: &str) -> Origin {
        let compiled = Selectors::compile(selector).expect("valid selector");
        Origin::Selector(compiled.0[0].specificity())
    }

    fn rule(selector: &str, declarations: Vec<Declaration>) -> MatchedRule {
        MatchedRule {
            origin: selector_origin(selector),
            declarations,
        }
    }

    fn important(property: &str, value: &str) -> Declaration {
        Declaration {
            important: true,
            ..Declaration::new(property, value)
        }
    }

    #[test]
    fn test_element_style_value_format() {
        let decls = vec![Declaration::new("color", "red"), important("margin", "0")];
        assert_eq!(style_value(&decls), "color: red; margin: 0;");
    }

    #[test]
    fn test_element_higher_specificity_wins() {
        let mut element = StyledElement::new(first_element("<p id=\"x\" class=\"c\">t</p>", "p"));
        element.rules.push(rule("#x", vec![Declaration::new("color", "blue")]));
        element.rules.push(rule("p.c", vec![Declaration::new("color", "red")]));
        let decls = element.computed_declarations().expect("cascade");
        assert_eq!(decls, vec![Declaration::new("color", "blue")]);
    }

    #[test]
    fn test_element_later_rule_wins_tie() {
        let mut element = StyledElement::new(first_element("<p>t</p>", "p"));
        element.rules.push(rule("p", vec![Declaration::new("color", "blue")]));
        element.rules.push(rule("p", vec![Declaration::new("color", "red")]));
        let decls = element.computed_declarations().expect("cascade");
        assert_eq!(decls[0].value, "red");
    }

    #[test]
    fn test_element_style_attribute_beats_selectors() {
        let mut element = StyledElement::new(first_element("<p id=\"x\" style=\"color: green\">t</p>", "p"));
        element.rules.push(rule("#x", vec![Declaration::new("color", "blue")]));
        let decls = element.computed_declarations().expect("cascade");
        assert_eq!(decls[0].value, "green");
    }

    #[test]
    fn test_element_important_beats_style_attribute() {
        let mut element = StyledElement::new(first_element("<p style=\"color: green\">t</p>", "p"));
        element.rules.push(rule("p", vec![important("color", "blue")]));
        let decls = element.computed_declarations().expect("cascade");
        assert_eq!(decls[0].value, "blue");
        assert!(decls[0].important);
    }

    #[test]
    fn test_element_declarations_sorted_by_property() {
        let mut element = StyledElement::new(first_element("<p>t</p>", "p"));
        element.rules.push(rule(
            "p",
            vec![Declaration::new("width", "1px"), Declaration::new("color", "red")],
        ));
        let decls = element.computed_declarations().expect("cascade");
        let names: Vec<_> = decls.iter().map(|d| d.property.as_str()).collect();
        assert_eq!(names, vec!["color", "width"]);
    }

    #[test]
    fn test_element_invalid_style_attribute() {
        let element = StyledElement::new(first_element("<p style=\"color red\">t</p>", "p"));
        match element.computed_declarations() {
            Err(InlineError::StyleAttribute { element, .. }) => assert_eq!(element, "p"),
            _ => panic!("expected StyleAttribute error"),
        }
    }

    #[test]
    fn test_element_apply_writes_legacy_attributes() {
        let node = first_element("<table><tr><td>x</td></tr></table>", "td");
        let mut element = StyledElement::new(node.clone());
        element.rules.push(rule(
            "td",
            vec![
                Declaration::new("background-color", "#ffcc00"),
                Declaration::new("vertical-align", "top"),
                Declaration::new("width", "120px"),
            ],
        ));
        element.apply(true).expect("apply");
        let attributes = node.attributes.borrow();
        assert_eq!(attributes.get("bgcolor"), Some("#ffcc00"));
        assert_eq!(attributes.get("valign"), Some("top"));
        assert_eq!(attributes.get("width"), Some("120"));
        assert_eq!(
            attributes.get("style"),
            Some("background-color: #ffcc00; vertical-align: top; width: 120px;")
        );
    }

    #[test]
    fn test_element_apply_without_legacy_attributes() {
        let node = first_element("<table><tr><td>x</td></tr></table>", "td");
        let mut element = StyledElement::new(node.clone());
        element.rules.push(rule("td", vec![Declaration::new("background-color", "red")]));
        element.apply(false).expect("apply");
        let attributes = node.attributes.borrow();
        assert_eq!(attributes.get("bgcolor"), None);
        assert_eq!(attributes.get("style"), Some("background-color: red;"));
    }

    #[test]
    fn test_element_legacy_attribute_respects_element_list() {
        let decl = Declaration::new("background-color", "red");
        assert!(legacy_attribute("span", &decl).is_none());
        assert_eq!(legacy_attribute("td", &decl), Some(("bgcolor", "red".to_string())));
    }

    #[test]
    fn test_element_float_maps_to_img_align() {
        let decl = Declaration::new("float", "left");
        assert_eq!(legacy_attribute("img", &decl), Some(("align", "left".to_string())));
    }

    #[test]
    fn test_element_dimension_values() {
        assert_eq!(dimension_value("600px").as_deref(), Some("600"));
        assert_eq!(dimension_value("600").as_deref(), Some("600"));
        assert_eq!(dimension_value("50%").as_deref(), Some("50%"));
        assert_eq!(dimension_value("auto"), None);
        assert_eq!(dimension_value("2em"), None);
        assert_eq!(dimension_value("px"), None);
    }
