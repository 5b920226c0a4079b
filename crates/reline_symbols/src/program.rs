//! The program and its numbered lines.

use crate::error::SymbolError;
use crate::ids::{LabelId, StatementId};
use reline_core::TextSpan;
use reline_syntax::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSymbol {
    /// 1-based line number.
    pub number: u32,
    pub syntax: NodeId,
    pub span: TextSpan,
    pub label: Option<LabelId>,
    pub statement: Option<StatementId>,
}

/// A 1-indexed table of lines. Each slot is written once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSymbol {
    pub syntax: NodeId,
    pub span: TextSpan,
    lines: Vec<Option<LineSymbol>>,
}

impl ProgramSymbol {
    pub fn new(syntax: NodeId, span: TextSpan, line_count: u32) -> Self {
        Self {
            syntax,
            span,
            lines: vec![None; line_count as usize],
        }
    }

    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    fn slot(&mut self, number: u32) -> Result<&mut Option<LineSymbol>, SymbolError> {
        let count = self.line_count();
        if number == 0 || number > count {
            return Err(SymbolError::LineOutOfRange {
                line: number,
                count,
            });
        }
        Ok(&mut self.lines[number as usize - 1])
    }

    /// Populate the slot `line.number`.
    pub fn set_line(&mut self, line: LineSymbol) -> Result<(), SymbolError> {
        let number = line.number;
        let slot = self.slot(number)?;
        if slot.is_some() {
            return Err(SymbolError::LineAlreadyPopulated(number));
        }
        *slot = Some(line);
        Ok(())
    }

    /// Attach the bound statement of line `number`.
    pub fn set_statement(
        &mut self,
        number: u32,
        statement: StatementId,
    ) -> Result<(), SymbolError> {
        let count = self.line_count();
        match self.slot(number)? {
            Some(line) if line.statement.is_some() => {
                Err(SymbolError::StatementAlreadyBound { line: number })
            }
            Some(line) => {
                line.statement = Some(statement);
                Ok(())
            }
            None => Err(SymbolError::LineOutOfRange {
                line: number,
                count,
            }),
        }
    }

    pub fn line(&self, number: u32) -> Option<&LineSymbol> {
        let index = (number as usize).checked_sub(1)?;
        self.lines.get(index)?.as_ref()
    }

    /// Populated lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &LineSymbol> {
        self.lines.iter().flatten()
    }

    pub fn is_complete(&self) -> bool {
        self.lines.iter().all(Option::is_some)
    }
}
