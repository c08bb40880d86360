use super::errors::ParseError;
use super::types::{ModuleKind, ModuleRecord};
use std::str::FromStr;

const ARROW: &str = "->";
const SEPARATOR: &str = " -> ";

/// Parse a whole module list, one declaration per line.
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn parse_module_list(text: &str) -> Result<Vec<ModuleRecord>, ParseError> {
    let mut records = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_line(line, index + 1)?);
    }

    Ok(records)
}

impl FromStr for ModuleRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s, 1)
    }
}

fn parse_line(line: &str, number: usize) -> Result<ModuleRecord, ParseError> {
    let syntax = |reason: String| ParseError::Syntax {
        line: number,
        reason,
    };

    let line = line.trim();
    let (declaration, destinations) = line
        .split_once(SEPARATOR)
        .ok_or_else(|| syntax(format!("missing '{}' in '{}'", SEPARATOR, line)))?;
    if destinations.contains(ARROW) {
        return Err(syntax(format!("more than one '{}' in '{}'", ARROW, line)));
    }

    let declaration = declaration.trim();
    let (kind, name) = if let Some(name) = declaration.strip_prefix('%') {
        (ModuleKind::FlipFlop, name)
    } else if let Some(name) = declaration.strip_prefix('&') {
        (ModuleKind::Conjunction, name)
    } else {
        (ModuleKind::Broadcaster, declaration)
    };

    if name.is_empty() {
        return Err(ParseError::EmptyName);
    }
    check_identifier(name).map_err(syntax)?;

    let destinations = destinations
        .split(',')
        .map(str::trim)
        .map(|dest| {
            if dest.is_empty() {
                return Err(ParseError::EmptyDestination {
                    module: name.to_string(),
                });
            }
            check_identifier(dest).map_err(syntax)?;
            Ok(dest.to_string())
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ModuleRecord {
        name: name.to_string(),
        kind,
        destinations,
    })
}

/// Names are single tokens: no whitespace and no arrow
fn check_identifier(token: &str) -> Result<(), String> {
    if token.chars().any(char::is_whitespace) || token.contains(ARROW) {
        return Err(format!("'{}' is not a valid module name", token));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefixes() {
        let records = parse_module_list("broadcaster -> a, b\n%a -> b\n&b -> out\n").unwrap();
        assert_eq!(
            records,
            vec![
                ModuleRecord::new("broadcaster", ModuleKind::Broadcaster, &["a", "b"]),
                ModuleRecord::new("a", ModuleKind::FlipFlop, &["b"]),
                ModuleRecord::new("b", ModuleKind::Conjunction, &["out"]),
            ]
        );
    }

    #[test]
    fn test_blank_lines_skipped() {
        let records = parse_module_list("\nbroadcaster -> a\n\n   \n%a -> broadcaster\n").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_missing_arrow_reports_line() {
        let err = parse_module_list("broadcaster -> a\n%a b\n").unwrap_err();
        match err {
            ParseError::Syntax { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(parse_module_list("% -> a"), Err(ParseError::EmptyName));
        assert_eq!(parse_module_list("broadcaster -> a\n& -> b\n"), Err(ParseError::EmptyName));
    }

    #[test]
    fn test_empty_destination_rejected() {
        assert_eq!(
            parse_module_list("%a -> b, , c"),
            Err(ParseError::EmptyDestination { module: "a".to_string() })
        );
        assert_eq!(
            parse_module_list("%a -> b,"),
            Err(ParseError::EmptyDestination { module: "a".to_string() })
        );
        // Nothing after the arrow at all is a malformed line
        assert!(matches!(parse_module_list("%a ->"), Err(ParseError::Syntax { line: 1, .. })));
    }

    #[test]
    fn test_second_arrow_rejected() {
        assert!(matches!(
            parse_module_list("broadcaster -> a -> b"),
            Err(ParseError::Syntax { line: 1, .. })
        ));
        assert!(matches!(
            parse_module_list("broadcaster -> a\n%a -> b->c\n"),
            Err(ParseError::Syntax { line: 2, .. })
        ));
    }

    #[test]
    fn test_whitespace_inside_names_rejected() {
        assert!(matches!(
            parse_module_list("broadcaster -> x\n%x y -> z\n"),
            Err(ParseError::Syntax { line: 2, .. })
        ));
        assert!(matches!(
            parse_module_list("broadcaster -> x\n%x -> z w\n"),
            Err(ParseError::Syntax { line: 2, .. })
        ));
        // Padding around names and commas is still accepted
        let record: ModuleRecord = "  %x ->  a ,b  ".parse().unwrap();
        assert_eq!(record.destinations, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_from_str_single_line() {
        let record: ModuleRecord = "&inv -> a".parse().unwrap();
        assert_eq!(record.kind, ModuleKind::Conjunction);
        assert_eq!(record.name, "inv");
        assert_eq!(record.destinations, vec!["a".to_string()]);
    }
}
