//! Line-oriented label codec.
//!
//! Each non-blank line of a label file describes one object:
//! `class_id x_center y_center width height`, with the four floats
//! normalized to the image dimensions.

/// One object's class and normalized bounding box within an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub class_id: i64,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl Annotation {
    /// Parse a single label line. Returns `None` for anything that is not
    /// exactly five whitespace-separated numeric tokens.
    pub fn parse_line(line: &str) -> Option<Annotation> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 5 {
            return None;
        }
        let mut values = [0f64; 5];
        for (slot, token) in values.iter_mut().zip(&tokens) {
            *slot = token.parse::<f64>().ok()?;
        }
        Some(Annotation {
            class_id: values[0] as i64,
            x_center: values[1],
            y_center: values[2],
            width: values[3],
            height: values[4],
        })
    }

    /// Serialize back to the wire form, floats at 6-decimal precision.
    pub fn to_line(&self) -> String {
        format!(
            "{} {:.6} {:.6} {:.6} {:.6}",
            self.class_id, self.x_center, self.y_center, self.width, self.height
        )
    }
}

/// Parse a whole label file. Blank lines are ignored; malformed lines are
/// dropped with a warning and never fail the file.
pub fn parse_annotations(content: &str) -> Vec<Annotation> {
    let mut annotations = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match Annotation::parse_line(line) {
            Some(ann) => annotations.push(ann),
            None => log::warn!("skipping malformed label line: {:?}", line),
        }
    }
    annotations
}

/// Serialize annotations in input order, one per line, trailing newline
/// after each.
pub fn serialize_annotations(annotations: &[Annotation]) -> String {
    let mut out = String::new();
    for ann in annotations {
        out.push_str(&ann.to_line());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_well_formed_line() {
        let ann = Annotation::parse_line("3 0.5 0.25 0.1 0.2").unwrap();
        assert_eq!(ann.class_id, 3);
        assert_eq!(ann.x_center, 0.5);
        assert_eq!(ann.y_center, 0.25);
        assert_eq!(ann.width, 0.1);
        assert_eq!(ann.height, 0.2);
    }

    #[test]
    fn reject_wrong_token_count() {
        assert!(Annotation::parse_line("abc def").is_none());
        assert!(Annotation::parse_line("0 0.5 0.5 0.1").is_none());
        assert!(Annotation::parse_line("0 0.5 0.5 0.1 0.1 0.1").is_none());
    }

    #[test]
    fn reject_non_numeric_tokens() {
        assert!(Annotation::parse_line("cat 0.5 0.5 0.1 0.1").is_none());
        assert!(Annotation::parse_line("0 0.5 x 0.1 0.1").is_none());
    }

    #[test]
    fn malformed_line_does_not_poison_file() {
        let content = "abc def\n1 0.500000 0.500000 0.100000 0.100000\n";
        let anns = parse_annotations(content);
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].class_id, 1);
    }

    #[test]
    fn blank_lines_ignored() {
        let content = "\n0 0.5 0.5 0.1 0.1\n\n\n2 0.2 0.3 0.4 0.5\n";
        assert_eq!(parse_annotations(content).len(), 2);
    }

    #[test]
    fn serialize_then_parse_round_trips() {
        let ann = Annotation {
            class_id: 7,
            x_center: 0.123456,
            y_center: 0.654321,
            width: 0.111111,
            height: 0.222222,
        };
        let reparsed = Annotation::parse_line(&ann.to_line()).unwrap();
        assert_eq!(reparsed.class_id, ann.class_id);
        assert!((reparsed.x_center - ann.x_center).abs() < 1e-6);
        assert!((reparsed.y_center - ann.y_center).abs() < 1e-6);
        assert!((reparsed.width - ann.width).abs() < 1e-6);
        assert!((reparsed.height - ann.height).abs() < 1e-6);
    }

    #[test]
    fn serialization_preserves_order() {
        let anns = vec![
            Annotation { class_id: 2, x_center: 0.1, y_center: 0.1, width: 0.1, height: 0.1 },
            Annotation { class_id: 0, x_center: 0.9, y_center: 0.9, width: 0.1, height: 0.1 },
        ];
        let text = serialize_annotations(&anns);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("2 "));
        assert!(lines[1].starts_with("0 "));
    }
}
