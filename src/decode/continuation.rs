//! Row state carried from one physical line to the next.

use super::split::split_line;
use crate::grammar::Grammar;
use crate::rows::Row;

/// Parser state between physical lines.
///
/// A fresh value starts every decode session. Each line is fed through
/// [`RowContinuation::advance`], which consumes the state and returns the next
/// one together with a completed row, if the line completed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowContinuation {
    /// False while a quoted field is open across a line boundary.
    ended: bool,
    /// Fields of a row that has not been completed yet.
    pending: Row,
}

impl Default for RowContinuation {
    fn default() -> Self {
        Self::new()
    }
}

impl RowContinuation {
    /// State with no open field and no pending row.
    pub const fn new() -> Self {
        Self {
            ended: true,
            pending: Vec::new(),
        }
    }

    /// Returns true if no field is open.
    #[inline]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Fields accumulated for the row still being assembled.
    #[inline]
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Feed one physical line.
    pub fn advance(self, line: &str, grammar: &Grammar) -> (Self, Option<Row>) {
        let (fields, ended) = split_line(line, grammar, self.ended);
        let mut pending = self.pending;

        if ended {
            if pending.is_empty() {
                return (Self::new(), Some(fields));
            }
            stitch(&mut pending, fields);
            (Self::new(), Some(pending))
        } else {
            stitch(&mut pending, fields);
            (
                Self {
                    ended: false,
                    pending,
                },
                None,
            )
        }
    }

    /// End of input. A row left open by an unterminated quote is still
    /// returned.
    pub fn finish(self) -> Option<Row> {
        if self.ended || self.pending.is_empty() {
            return None;
        }

        tracing::debug!(
            fields = self.pending.len(),
            "input ended inside a quoted field, emitting partial row"
        );
        Some(self.pending)
    }
}

/// Join newly scanned fields onto a pending row: the first one continues the
/// last pending field across the line break.
fn stitch(pending: &mut Row, fields: Row) {
    let mut fields = fields.into_iter();
    if let Some(last) = pending.last_mut()
        && let Some(first) = fields.next()
    {
        last.push_str(&first);
    }
    pending.extend(fields);
}
