//! What the user asked for, validated before anything is sent to the hardware

use crate::{
    config::{LCD_ROWS, LED_COUNT},
    error::RequestError,
    led::LedSpec,
};

/// A validated request, see [`RequestBuilder`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    clear: bool,
    target_row: Option<usize>,
    lines: Vec<String>,
    leds: Option<LedSpec>,
}

impl Request {
    pub fn clear(&self) -> bool {
        self.clear
    }

    /// When set, [`Request::lines`] holds exactly one line, meant for this row
    pub fn target_row(&self) -> Option<usize> {
        self.target_row
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn leds(&self) -> Option<&LedSpec> {
        self.leds.as_ref()
    }

    /// (row, text) pairs to write, in order
    pub fn row_writes(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        let first_row = self.target_row.unwrap_or(0);
        self.lines
            .iter()
            .enumerate()
            .map(move |(index, line)| (first_row + index, line.as_str()))
    }
}

/// Collects request parts in command line order, and refuses the first invalid one
///
/// The order of the checks decides which error wins when a command line
/// breaks more than one rule:
/// too many lines, conflicting row, row out of range, LED spec too long,
/// then nothing to do and missing row text once everything is collected.
#[derive(Clone, Debug)]
pub struct RequestBuilder {
    rows: usize,
    led_count: usize,
    clear: bool,
    target_row: Option<usize>,
    lines: Vec<String>,
    leds: Option<LedSpec>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(LCD_ROWS, LED_COUNT)
    }
}

impl RequestBuilder {
    pub fn new(rows: usize, led_count: usize) -> Self {
        Self {
            rows,
            led_count,
            clear: false,
            target_row: None,
            lines: Vec::with_capacity(rows),
            leds: None,
        }
    }

    pub fn set_clear(&mut self) -> &mut Self {
        self.clear = true;
        self
    }

    pub fn add_line(&mut self, text: impl Into<String>) -> Result<&mut Self, RequestError> {
        if self.lines.len() >= self.rows {
            return Err(RequestError::TooManyLines { max: self.rows });
        }
        if let (Some(row), false) = (self.target_row, self.lines.is_empty()) {
            return Err(RequestError::ConflictingRowSpecification { row });
        }

        self.lines.push(text.into());
        Ok(self)
    }

    pub fn set_row(&mut self, row: usize) -> Result<&mut Self, RequestError> {
        if self.lines.len() > 1 {
            return Err(RequestError::ConflictingRowSpecification { row });
        }
        if row >= self.rows {
            return Err(RequestError::RowOutOfRange {
                row,
                max: self.rows.saturating_sub(1),
            });
        }

        self.target_row = Some(row);
        Ok(self)
    }

    pub fn set_leds(&mut self, spec: &str) -> Result<&mut Self, RequestError> {
        self.leds = Some(LedSpec::parse(spec, self.led_count)?);
        Ok(self)
    }

    pub fn build(self) -> Result<Request, RequestError> {
        if !self.clear && self.target_row.is_none() && self.lines.is_empty() {
            return Err(RequestError::NothingToDo);
        }
        if let (Some(row), true) = (self.target_row, self.lines.is_empty()) {
            return Err(RequestError::MissingRowText { row });
        }

        Ok(Request {
            clear: self.clear,
            target_row: self.target_row,
            lines: self.lines,
            leds: self.leds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> RequestBuilder {
        RequestBuilder::new(2, 7)
    }

    #[test]
    fn two_lines_fill_both_rows() {
        let mut builder = builder();
        builder.add_line("Hello").unwrap().add_line("World").unwrap();
        let request = builder.build().unwrap();

        assert_eq!(request.target_row(), None);
        assert_eq!(
            request.row_writes().collect::<Vec<_>>(),
            vec![(0, "Hello"), (1, "World")]
        );
    }

    #[test]
    fn targeted_line_goes_to_its_row() {
        let mut builder = builder();
        builder.set_row(1).unwrap().add_line("Hi").unwrap();
        let request = builder.build().unwrap();

        assert_eq!(request.row_writes().collect::<Vec<_>>(), vec![(1, "Hi")]);
    }

    #[test]
    fn row_after_a_single_line_is_fine() {
        let mut builder = builder();
        builder.add_line("Hi").unwrap().set_row(1).unwrap();
        assert_eq!(builder.build().unwrap().target_row(), Some(1));
    }

    #[test]
    fn third_line_is_too_many() {
        let mut builder = builder();
        builder.add_line("a").unwrap().add_line("b").unwrap();
        assert_eq!(
            builder.add_line("c").unwrap_err(),
            RequestError::TooManyLines { max: 2 }
        );
    }

    #[test]
    fn second_line_for_a_row_conflicts() {
        let mut builder = builder();
        builder.set_row(0).unwrap().add_line("a").unwrap();
        assert_eq!(
            builder.add_line("b").unwrap_err(),
            RequestError::ConflictingRowSpecification { row: 0 }
        );
    }

    #[test]
    fn row_after_two_lines_conflicts() {
        let mut builder = builder();
        builder.add_line("A").unwrap().add_line("B").unwrap();
        assert_eq!(
            builder.set_row(0).unwrap_err(),
            RequestError::ConflictingRowSpecification { row: 0 }
        );
    }

    #[test]
    fn conflict_is_reported_before_range() {
        let mut builder = builder();
        builder.add_line("A").unwrap().add_line("B").unwrap();
        assert_eq!(
            builder.set_row(5).unwrap_err(),
            RequestError::ConflictingRowSpecification { row: 5 }
        );
    }

    #[test]
    fn row_past_the_display_is_out_of_range() {
        assert_eq!(
            builder().set_row(5).unwrap_err(),
            RequestError::RowOutOfRange { row: 5, max: 1 }
        );
    }

    #[test]
    fn long_led_spec_is_refused() {
        assert!(matches!(
            builder().set_leds("00000000").unwrap_err(),
            RequestError::LedSpecTooLong { len: 8, max: 7, .. }
        ));
    }

    #[test]
    fn empty_request_has_nothing_to_do() {
        assert_eq!(builder().build().unwrap_err(), RequestError::NothingToDo);
    }

    #[test]
    fn leds_alone_have_nothing_to_do() {
        let mut builder = builder();
        builder.set_leds("1").unwrap();
        assert_eq!(builder.build().unwrap_err(), RequestError::NothingToDo);
    }

    #[test]
    fn row_without_text_is_missing_its_text() {
        let mut builder = builder();
        builder.set_row(1).unwrap();
        assert_eq!(
            builder.build().unwrap_err(),
            RequestError::MissingRowText { row: 1 }
        );
    }

    #[test]
    fn clear_alone_is_enough() {
        let mut builder = builder();
        builder.set_clear().set_leds("1-0").unwrap();
        let request = builder.build().unwrap();

        assert!(request.clear());
        assert!(request.lines().is_empty());
        assert_eq!(request.leds().map(ToString::to_string).as_deref(), Some("1-0"));
    }
}
