#[cfg(test)]
mod tests {
    use crate::Utils::task_parser::*;
    use std::io::Write;

    #[test]
    fn test_parse_title_and_key() {
        let (rest, title) = parse_title("simplifier   max_iterations: 4").unwrap();
        assert_eq!(title, "simplifier");
        assert_eq!(rest, "max_iterations: 4");
        let (rest, key) = parse_key("closure_limit2: 5").unwrap();
        assert_eq!(key, "closure_limit2");
        assert_eq!(rest, ": 5");
        assert!(parse_key("2fast: 1").is_err());
    }

    #[test]
    fn test_values_are_typed() {
        assert_eq!(parse_value("42").unwrap().1, Value::Integer(42));
        assert_eq!(parse_value("-3").unwrap().1, Value::Integer(-3));
        assert_eq!(parse_value("2.5").unwrap().1, Value::Float(2.5));
        assert_eq!(parse_value("1e3").unwrap().1, Value::Float(1000.0));
        assert_eq!(parse_value("true").unwrap().1, Value::Boolean(true));
        assert_eq!(
            parse_value("expand, fraction").unwrap(),
            (", fraction", Value::String("expand".to_string()))
        );
        assert_eq!(Value::Integer(7).as_float(), Some(7.0));
        assert_eq!(Value::Float(7.0).as_integer(), None);
        assert_eq!(Value::Boolean(false).to_string(), "false");
    }

    #[test]
    fn test_parse_value_list() {
        let (rest, values) = parse_value_list("  a , b,c next").unwrap();
        assert_eq!(
            values,
            vec![
                Value::String("a".to_string()),
                Value::String("b".to_string()),
                Value::String("c".to_string())
            ]
        );
        assert_eq!(rest, " next");
        let (_, empty) = parse_value_list("").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_parse_section_with_several_pairs() {
        let (rest, (title, section)) =
            parse_section("simplifier max_iterations: 32 tags: expand, fraction").unwrap();
        assert_eq!(title, "simplifier");
        assert!(rest.is_empty());
        assert_eq!(section.len(), 2);
        assert_eq!(
            section["max_iterations"],
            Some(vec![Value::Integer(32)])
        );
        assert_eq!(section["tags"].as_ref().map(|v| v.len()), Some(2));
    }

    #[test]
    fn test_parse_document_with_comments() {
        let input = "
            // settings for a run
            group closure_limit: 5000
            # simplifier
            simplifier max_iterations: 32
              tags: expand, fraction
            logging level: debug console: false
        ";
        let document = parse_document_as(input, None).unwrap();
        assert_eq!(document.len(), 3);
        assert_eq!(
            document["group"]["closure_limit"],
            Some(vec![Value::Integer(5000)])
        );
        assert_eq!(
            document["simplifier"]["tags"],
            Some(vec![
                Value::String("expand".to_string()),
                Value::String("fraction".to_string())
            ])
        );
        assert_eq!(
            document["logging"]["console"],
            Some(vec![Value::Boolean(false)])
        );
    }

    #[test]
    fn test_repeated_titles_merge() {
        let document = parse_document_as("group a: 1\ngroup b: 2", None).unwrap();
        assert_eq!(document.len(), 1);
        assert_eq!(document["group"].len(), 2);
    }

    #[test]
    fn test_template_marks_missing_keys() {
        let group_keys: &[&str] = &["closure_limit"];
        let logging_keys: &[&str] = &["level", "file"];
        let template = template_of(&[("group", group_keys), ("logging", logging_keys)]);
        let document = parse_document_as("logging level: warn", Some(&template)).unwrap();
        assert_eq!(document["group"]["closure_limit"], None);
        assert_eq!(document["logging"]["file"], None);
        assert_eq!(
            document["logging"]["level"],
            Some(vec![Value::String("warn".to_string())])
        );

        let empty = parse_document_as("// nothing here\n\n", Some(&template)).unwrap();
        assert_eq!(empty.len(), 2);
        assert!(empty["logging"].values().all(|v| v.is_none()));
    }

    #[test]
    fn test_parse_this_sections() {
        let input = "group closure_limit: 10\nlogging level: info";
        let document = parse_this_sections(input, &["logging"]).unwrap();
        assert_eq!(document.len(), 1);
        assert!(document.contains_key("logging"));
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        assert!(parse_document_as("group closure_limit 5000", None).is_err());
        // a stray word after the last pair cannot start a section
        let err = parse_document_as("group closure_limit: 1\ndangling", None).unwrap_err();
        assert!(err.contains("dangling"), "{}", err);
    }

    #[test]
    fn test_document_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "% from disk").unwrap();
        writeln!(file, "simplifier max_iterations: 8").unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        let document = parse_document_as(&content, None).unwrap();
        assert_eq!(
            document["simplifier"]["max_iterations"],
            Some(vec![Value::Integer(8)])
        );
    }
}
