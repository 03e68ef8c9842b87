/// Winnow-based parser for the line-oriented operation log.
///
/// Grammar (one record per line):
/// ```text
/// log         = (record | blank | comment)*
/// record      = WS? time WS transaction WS kind (WS attribute)? WS?
/// comment     = WS? "#" REST_OF_LINE
/// time        = INTEGER
/// transaction = INTEGER
/// kind        = "R" | "W" | "C"
/// attribute   = NON_WHITESPACE+      -- required for R and W, ignored for C
/// ```
///
/// Example:
/// ```text
/// 1 1 R X
/// 2 2 R X
/// 3 2 W X
/// 4 1 W X
/// 5 2 C -
/// 6 1 C -
/// ```
use schedcheck_core::Operation;
use winnow::ascii::dec_uint;
use winnow::combinator::{eof, opt, preceded};
use winnow::error::{StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};
use winnow::ModalResult;

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// A parse error with human-readable location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Parse a single record. The line number in errors is 1.
///
/// # Errors
///
/// Returns a [`ParseError`] if `line` is not a well-formed record. Blank and
/// comment lines are errors here; [`parse_log`] skips them.
pub fn parse_operation(line: &str) -> Result<Operation<String>, ParseError> {
    parse_record_line(line, 1)
}

/// Parse a whole log into its operations, in input order.
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns the [`ParseError`] of the first malformed record.
pub fn parse_log(input: &str) -> Result<Vec<Operation<String>>, ParseError> {
    records(input)
        .map(|(line_no, line)| parse_record_line(line, line_no))
        .collect()
}

/// Iterate over the record lines of `input` with their 1-based line numbers,
/// skipping blank and comment lines.
pub fn records(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !is_skippable(line))
}

/// Parse one record line, reporting errors at `line_no`.
///
/// # Errors
///
/// Returns a [`ParseError`] located on `line_no`.
pub fn parse_record_line(line: &str, line_no: usize) -> Result<Operation<String>, ParseError> {
    let mut stream: &str = line;
    match record.parse_next(&mut stream) {
        Ok(Record {
            time,
            transaction,
            kind,
            attribute,
        }) => match (kind, attribute) {
            ('R', Some(attribute)) => Ok(Operation::read(time, transaction, attribute.to_string())),
            ('W', Some(attribute)) => {
                Ok(Operation::write(time, transaction, attribute.to_string()))
            }
            ('C', _) => Ok(Operation::commit(time, transaction)),
            _ => Err(ParseError {
                message: format!("missing attribute for {kind} operation"),
                line: line_no,
                column: line.trim_end().len() + 1,
            }),
        },
        Err(e) => {
            // Compute how many bytes were consumed before the error.
            let consumed = line.len().saturating_sub(stream.len());
            Err(ParseError {
                message: e.to_string(),
                line: line_no,
                column: consumed + 1,
            })
        }
    }
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

// ---------------------------------------------------------------------------
// Whitespace helpers
// ---------------------------------------------------------------------------

/// Inline whitespace: spaces and tabs only (no newlines).
fn inline_ws(input: &mut &str) -> ModalResult<()> {
    take_while(1.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

/// Optional inline whitespace.
fn opt_inline_ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

// ---------------------------------------------------------------------------
// Leaf parsers
// ---------------------------------------------------------------------------

fn time(input: &mut &str) -> ModalResult<u64> {
    dec_uint
        .context(StrContext::Label("time"))
        .parse_next(input)
}

fn transaction(input: &mut &str) -> ModalResult<u64> {
    dec_uint
        .context(StrContext::Label("transaction id"))
        .parse_next(input)
}

fn kind(input: &mut &str) -> ModalResult<char> {
    one_of(['R', 'W', 'C'])
        .context(StrContext::Label("operation kind"))
        .context(StrContext::Expected(StrContextValue::Description(
            "R, W or C",
        )))
        .parse_next(input)
}

fn end_of_record(input: &mut &str) -> ModalResult<()> {
    eof.void()
        .context(StrContext::Expected(StrContextValue::Description(
            "end of record",
        )))
        .parse_next(input)
}

/// An attribute name: any run of non-whitespace characters.
fn attribute<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| !c.is_whitespace()).parse_next(input)
}

// ---------------------------------------------------------------------------
// Record parser
// ---------------------------------------------------------------------------

struct Record<'s> {
    time: u64,
    transaction: u64,
    kind: char,
    attribute: Option<&'s str>,
}

/// `WS? time WS transaction WS kind (WS attribute)? WS? EOF`
fn record<'s>(input: &mut &'s str) -> ModalResult<Record<'s>> {
    opt_inline_ws.parse_next(input)?;
    let time = time.parse_next(input)?;
    inline_ws.parse_next(input)?;
    let transaction = transaction.parse_next(input)?;
    inline_ws.parse_next(input)?;
    let kind = kind.parse_next(input)?;
    let attribute = opt(preceded(inline_ws, attribute)).parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    end_of_record.parse_next(input)?;
    Ok(Record {
        time,
        transaction,
        kind,
        attribute,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
