use regex::Regex;

use super::model::{LabelSet, ParsedSet, Sample};

/// Line-oriented parser for the plain-text metric exposition format.
///
/// Parsing is best effort: comment lines and lines that do not match the
/// `name{labels} value [timestamp]` grammar are skipped without raising, so
/// one malformed line never loses the rest of a scrape.
pub struct ExpositionParser {
    line_re: Regex,
    label_re: Regex,
}

impl ExpositionParser {
    pub fn new() -> ExpositionParser {
        ExpositionParser {
            line_re: Regex::new(
                r"^([a-zA-Z_:][a-zA-Z0-9_:]*)(?:\{([^}]*)\})?\s+(\d+(?:\.\d+)?)(?:\s+(\d+))?$",
            )
            .expect("valid data line pattern"),
            // Pairs are matched independently instead of splitting on commas,
            // so commas inside quoted label values survive.
            label_re: Regex::new(r#"([a-zA-Z_][a-zA-Z0-9_]*)\s*=\s*"([^"]*)""#)
                .expect("valid label pattern"),
        }
    }

    /// Extracts every well-formed sample from `text`, keyed by metric name.
    pub fn parse(&self, text: &str) -> ParsedSet {
        let mut parsed = ParsedSet::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some(caps) = self.line_re.captures(line) else {
                continue;
            };
            // The trailing timestamp capture is recognized but not kept.
            let Ok(value) = caps[3].parse::<f64>() else {
                continue;
            };
            let name = caps[1].to_string();
            let labels = caps
                .get(2)
                .map_or_else(LabelSet::new, |m| self.parse_labels(m.as_str()));
            parsed.entry(name.clone()).or_default().push(Sample {
                name,
                value,
                labels,
            });
        }
        parsed
    }

    fn parse_labels(&self, raw: &str) -> LabelSet {
        self.label_re
            .captures_iter(raw)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect()
    }
}

impl Default for ExpositionParser {
    fn default() -> Self {
        ExpositionParser::new()
    }
}
