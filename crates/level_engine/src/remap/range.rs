use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("source range start {source_from} is greater than its end {source_to}")]
    Inverted { source_from: u32, source_to: u32 },
    #[error("target range starting at {target_from} overflows when extended by {span}")]
    TargetOverflow { target_from: u32, span: u32 },
    #[error("target span {target} does not match the length of source span {source_span}")]
    TargetLengthMismatch { source_span: String, target: String },
    #[error("malformed range '{text}': {reason}")]
    Malformed { text: String, reason: &'static str },
    #[error("line {line}: {inner}")]
    Line {
        line: usize,
        #[source]
        inner: Box<RangeError>,
    },
}

/// One migration step: values in `source_from..=source_to` move to start at
/// `target_from`, keeping their offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceTargetRange {
    source_from: u32,
    source_to: u32,
    target_from: u32,
}

impl SourceTargetRange {
    pub fn new(source_from: u32, source_to: u32, target_from: u32) -> Result<Self, RangeError> {
        if source_from > source_to {
            return Err(RangeError::Inverted {
                source_from,
                source_to,
            });
        }
        let span = source_to - source_from;
        if target_from.checked_add(span).is_none() {
            return Err(RangeError::TargetOverflow { target_from, span });
        }
        Ok(Self {
            source_from,
            source_to,
            target_from,
        })
    }

    pub fn single(source: u32, target: u32) -> Self {
        Self {
            source_from: source,
            source_to: source,
            target_from: target,
        }
    }

    pub fn source_from(&self) -> u32 {
        self.source_from
    }

    pub fn source_to(&self) -> u32 {
        self.source_to
    }

    pub fn target_from(&self) -> u32 {
        self.target_from
    }

    pub fn target_to(&self) -> u32 {
        self.target_from + self.span()
    }

    /// `source_to - source_from`; the step covers `span() + 1` values.
    pub fn span(&self) -> u32 {
        self.source_to - self.source_from
    }

    pub fn source_range(&self) -> RangeInclusive<u32> {
        self.source_from..=self.source_to
    }

    pub fn target_range(&self) -> RangeInclusive<u32> {
        self.target_from..=self.target_to()
    }

    pub fn contains_source(&self, value: u32) -> bool {
        self.source_from <= value && value <= self.source_to
    }

    pub fn translate(&self, value: u32) -> Option<u32> {
        self.contains_source(value)
            .then(|| self.target_from + (value - self.source_from))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> {
        let (source_from, target_from) = (self.source_from, self.target_from);
        self.source_range()
            .map(move |source| (source, target_from + (source - source_from)))
    }
}

impl fmt::Display for SourceTargetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source_from == self.source_to {
            write!(f, "{}>{}", self.source_from, self.target_from)
        } else {
            write!(
                f,
                "{}-{}>{}-{}",
                self.source_from,
                self.source_to,
                self.target_from,
                self.target_to()
            )
        }
    }
}

/// Accepts `a-b>c`, `a-b>c-d` (with matching lengths), or `a>c`.
impl FromStr for SourceTargetRange {
    type Err = RangeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let text = raw.trim();
        let (source, target) = text.split_once('>').ok_or_else(|| RangeError::Malformed {
            text: text.to_string(),
            reason: "expected '>' between source and target",
        })?;
        let source_span = parse_inclusive_span(source)?;
        let target_span = parse_inclusive_span(target)?;
        let step = Self::new(
            *source_span.start(),
            *source_span.end(),
            *target_span.start(),
        )?;
        if target_span.start() != target_span.end() && step.target_range() != target_span {
            return Err(RangeError::TargetLengthMismatch {
                source_span: source.trim().to_string(),
                target: target.trim().to_string(),
            });
        }
        Ok(step)
    }
}

/// Parses `a-b` or a lone `a` into an inclusive span.
pub fn parse_inclusive_span(raw: &str) -> Result<RangeInclusive<u32>, RangeError> {
    let text = raw.trim();
    let malformed = |reason| RangeError::Malformed {
        text: text.to_string(),
        reason,
    };
    let (start, end) = match text.split_once('-') {
        Some((start, end)) => (start.trim(), end.trim()),
        None => (text, text),
    };
    let start = start
        .parse::<u32>()
        .map_err(|_| malformed("start is not an unsigned integer"))?;
    let end = end
        .parse::<u32>()
        .map_err(|_| malformed("end is not an unsigned integer"))?;
    if start > end {
        return Err(malformed("start is greater than end"));
    }
    Ok(start..=end)
}

/// One step per line; blank lines and `#` comments are skipped.
pub fn parse_steps(content: &str) -> Result<Vec<SourceTargetRange>, RangeError> {
    let mut steps = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step = trimmed
            .parse::<SourceTargetRange>()
            .map_err(|error| RangeError::Line {
                line: index + 1,
                inner: Box::new(error),
            })?;
        steps.push(step);
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_preserves_span() {
        let step = SourceTargetRange::new(21, 25, 46).expect("valid");
        let pairs = step.iter().collect::<Vec<_>>();
        assert_eq!(pairs, vec![(21, 46), (22, 47), (23, 48), (24, 49), (25, 50)]);
        assert_eq!(step.target_to(), 50);
        assert_eq!(step.iter().count(), step.span() as usize + 1);
    }

    #[test]
    fn translation_only_applies_inside_the_source_span() {
        let step = SourceTargetRange::new(10, 12, 1).expect("valid");
        assert_eq!(step.translate(9), None);
        assert_eq!(step.translate(10), Some(1));
        assert_eq!(step.translate(12), Some(3));
        assert_eq!(step.translate(13), None);
    }

    #[test]
    fn rejects_inverted_and_overflowing_ranges() {
        assert_eq!(
            SourceTargetRange::new(5, 1, 10),
            Err(RangeError::Inverted {
                source_from: 5,
                source_to: 1
            })
        );
        assert!(matches!(
            SourceTargetRange::new(0, 10, u32::MAX - 5),
            Err(RangeError::TargetOverflow { .. })
        ));
    }

    #[test]
    fn parses_and_displays_text_form() {
        let step = "1-5>6".parse::<SourceTargetRange>().expect("parse");
        assert_eq!(step, SourceTargetRange::new(1, 5, 6).expect("valid"));
        assert_eq!(step.to_string(), "1-5>6-10");
        assert_eq!("1-5>6-10".parse::<SourceTargetRange>(), Ok(step));
        assert_eq!(
            "7>9".parse::<SourceTargetRange>(),
            Ok(SourceTargetRange::single(7, 9))
        );
        assert_eq!(SourceTargetRange::single(7, 9).to_string(), "7>9");
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["1-5", "a-5>6", "5-1>6", "1-5>6-11", ">", "1->2"] {
            assert!(text.parse::<SourceTargetRange>().is_err(), "text={text}");
        }
    }

    #[test]
    fn step_file_skips_comments_and_reports_line_numbers() {
        let steps = parse_steps("# groups\n1-5>6\n\n21-25>46\n").expect("parse");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].source_from(), 21);

        let error = parse_steps("1-5>6\nnope\n").expect_err("bad line");
        assert!(matches!(error, RangeError::Line { line: 2, .. }));
    }
}
