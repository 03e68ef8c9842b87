use alloc::string::String;
use core::fmt::{Display, Formatter, Result, Write};

use crate::schedule::types::{Action, Operation};

/// Placeholder written in the attribute column of a commit record.
pub const COMMIT_PLACEHOLDER: &str = "-";

impl<Attribute> Display for Operation<Attribute>
where
    Attribute: Display,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{} {} {} ", self.time, self.transaction, self.action.code())?;
        match &self.action {
            Action::Read(attribute) | Action::Write(attribute) => write!(f, "{attribute}"),
            Action::Commit => write!(f, "{COMMIT_PLACEHOLDER}"),
        }
    }
}

/// Format operations as the line-oriented log format, one record per line.
///
/// The output always ends with a trailing newline (unless empty) so that it
/// round-trips through `parse_log`.
#[must_use]
pub fn format_log<'a, Attribute, I>(operations: I) -> String
where
    Attribute: Display + 'a,
    I: IntoIterator<Item = &'a Operation<Attribute>>,
{
    let mut output = String::new();
    for operation in operations {
        let _ = writeln!(output, "{operation}");
    }
    output
}
