//! reline_evaluator: Constant expression evaluation.
//!
//! Computes the value of constant expression symbols at bind time, chiefly
//! the line range of each function declaration. Only expressions the binder
//! marked constant can be evaluated.

use reline_core::FxMap;
use reline_symbols::{
    BinaryOperator, ExpressionId, ExpressionKind, LineKeyword, LiteralValue, RangeError,
    RangeValue, SymbolArena, UnaryOperator,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("expression {0:?} is not constant")]
    NotConstant(ExpressionId),

    #[error("operator '{operator}' cannot be applied to {operands}")]
    OperandMismatch {
        operator: &'static str,
        operands: String,
    },

    #[error("expression {0:?} cannot be evaluated")]
    Unsupported(ExpressionId),

    #[error(transparent)]
    InvalidRange(#[from] RangeError),

    #[error("division by zero")]
    DivisionByZero,
}

/// Evaluates constant expressions of one program, memoizing results.
#[derive(Debug, Default)]
pub struct Evaluator {
    line_count: u32,
    cache: FxMap<ExpressionId, LiteralValue>,
}

impl Evaluator {
    /// `line_count` is the value of `end`.
    pub fn new(line_count: u32) -> Self {
        Self {
            line_count,
            cache: FxMap::default(),
        }
    }

    pub fn evaluate(
        &mut self,
        arena: &SymbolArena,
        expression: ExpressionId,
    ) -> Result<LiteralValue, EvaluationError> {
        if let Some(value) = self.cache.get(&expression) {
            return Ok(value.clone());
        }
        let value = self.evaluate_uncached(arena, expression)?;
        self.cache.insert(expression, value.clone());
        Ok(value)
    }

    /// Number of memoized results.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn evaluate_uncached(
        &mut self,
        arena: &SymbolArena,
        id: ExpressionId,
    ) -> Result<LiteralValue, EvaluationError> {
        let symbol = arena.expression(id);
        if !symbol.is_constant {
            return Err(EvaluationError::NotConstant(id));
        }
        match &symbol.kind {
            ExpressionKind::Literal(value) => Ok(value.clone()),
            ExpressionKind::Keyword(keyword) => Ok(LiteralValue::Number(match keyword {
                LineKeyword::Here => symbol.line as i32,
                LineKeyword::Start => 1,
                LineKeyword::End => self.line_count as i32,
            })),
            ExpressionKind::Label(label) => {
                Ok(LiteralValue::Number(arena.label(*label).line as i32))
            }
            ExpressionKind::Grouping(inner) => self.evaluate(arena, *inner),
            ExpressionKind::Unary { operator, operand } => {
                let operand = self.evaluate(arena, *operand)?;
                evaluate_unary(*operator, operand)
            }
            ExpressionKind::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(arena, *left)?;
                let right = self.evaluate(arena, *right)?;
                evaluate_binary(*operator, left, right)
            }
            ExpressionKind::LinePointer(inner) => match self.evaluate(arena, *inner)? {
                LiteralValue::Number(line) => {
                    Ok(LiteralValue::Range(RangeValue::new(line, line)?))
                }
                other => Err(mismatch("*[]", &[&other])),
            },
            _ => Err(EvaluationError::Unsupported(id)),
        }
    }
}

fn describe(value: &LiteralValue) -> &'static str {
    match value {
        LiteralValue::Number(_) => "number",
        LiteralValue::String(_) => "string",
        LiteralValue::Range(_) => "range",
    }
}

fn mismatch(operator: &'static str, operands: &[&LiteralValue]) -> EvaluationError {
    EvaluationError::OperandMismatch {
        operator,
        operands: operands
            .iter()
            .map(|value| describe(value))
            .collect::<Vec<_>>()
            .join(" and "),
    }
}

fn evaluate_unary(
    operator: UnaryOperator,
    operand: LiteralValue,
) -> Result<LiteralValue, EvaluationError> {
    let LiteralValue::Number(value) = operand else {
        return Err(mismatch(operator.text(), &[&operand]));
    };
    Ok(LiteralValue::Number(match operator {
        UnaryOperator::Identity => value,
        UnaryOperator::Negation => value.wrapping_neg(),
    }))
}

fn concatenate(left: &LiteralValue, right: &LiteralValue) -> Result<LiteralValue, EvaluationError> {
    let text = |value: &LiteralValue| match value {
        LiteralValue::Number(n) => Some(n.to_string()),
        LiteralValue::String(s) => Some(s.clone()),
        LiteralValue::Range(_) => None,
    };
    match (text(left), text(right)) {
        (Some(l), Some(r)) => Ok(LiteralValue::String(l + &r)),
        _ => Err(mismatch(BinaryOperator::Concatenation.text(), &[left, right])),
    }
}

fn evaluate_binary(
    operator: BinaryOperator,
    left: LiteralValue,
    right: LiteralValue,
) -> Result<LiteralValue, EvaluationError> {
    use BinaryOperator::*;

    let numbers = match (&left, &right) {
        (LiteralValue::Number(l), LiteralValue::Number(r)) => Some((*l, *r)),
        _ => None,
    };
    let value = match (operator, numbers) {
        (Concatenation, _) => return concatenate(&left, &right),
        (_, None) => return Err(mismatch(operator.text(), &[&left, &right])),
        (Range, Some((l, r))) => return Ok(LiteralValue::Range(RangeValue::new(l, r)?)),
        (Division | Modulo, Some((_, 0))) => return Err(EvaluationError::DivisionByZero),
        (Addition, Some((l, r))) => l.wrapping_add(r),
        (Subtraction, Some((l, r))) => l.wrapping_sub(r),
        (Multiplication, Some((l, r))) => l.wrapping_mul(r),
        (Division, Some((l, r))) => l.wrapping_div(r),
        (Modulo, Some((l, r))) => l.wrapping_rem(r),
    };
    Ok(LiteralValue::Number(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reline_core::{StringInterner, TextSpan};
    use reline_symbols::{ExpressionSymbol, LabelSymbol, SymbolType};
    use reline_syntax::NodeId;

    fn add(
        arena: &mut SymbolArena,
        kind: ExpressionKind,
        ty: SymbolType,
        constant: bool,
    ) -> ExpressionId {
        arena.add_expression(ExpressionSymbol {
            syntax: None,
            span: TextSpan::default(),
            line: 3,
            ty,
            is_constant: constant,
            kind,
        })
    }

    fn number(arena: &mut SymbolArena, value: i32) -> ExpressionId {
        add(
            arena,
            ExpressionKind::Literal(LiteralValue::Number(value)),
            SymbolType::Number,
            true,
        )
    }

    fn binary(
        arena: &mut SymbolArena,
        left: i32,
        operator: BinaryOperator,
        right: i32,
    ) -> ExpressionId {
        let left = number(arena, left);
        let right = number(arena, right);
        add(
            arena,
            ExpressionKind::Binary {
                left,
                operator,
                right,
            },
            SymbolType::Number,
            true,
        )
    }

    #[test]
    fn test_range() {
        let mut arena = SymbolArena::new();
        let range = binary(&mut arena, 2, BinaryOperator::Range, 5);
        let value = Evaluator::new(5).evaluate(&arena, range).unwrap();
        assert_eq!(value, LiteralValue::Range(RangeValue::new(2, 5).unwrap()));
    }

    #[test]
    fn test_wrapping_arithmetic() {
        let mut arena = SymbolArena::new();
        let sum = binary(&mut arena, i32::MAX, BinaryOperator::Addition, 1);
        let quotient = binary(&mut arena, i32::MIN, BinaryOperator::Division, -1);
        let mut evaluator = Evaluator::new(1);
        assert_eq!(evaluator.evaluate(&arena, sum), Ok(LiteralValue::Number(i32::MIN)));
        assert_eq!(evaluator.evaluate(&arena, quotient), Ok(LiteralValue::Number(i32::MIN)));
    }

    #[test]
    fn test_division_by_zero() {
        let mut arena = SymbolArena::new();
        let quotient = binary(&mut arena, 1, BinaryOperator::Modulo, 0);
        assert_eq!(
            Evaluator::new(1).evaluate(&arena, quotient),
            Err(EvaluationError::DivisionByZero)
        );
    }

    #[test]
    fn test_negative_range_is_rejected() {
        let mut arena = SymbolArena::new();
        let range = binary(&mut arena, 5, BinaryOperator::Range, 3);
        assert_eq!(
            Evaluator::new(1).evaluate(&arena, range),
            Err(EvaluationError::InvalidRange(RangeError { start: 5, end: 3 }))
        );
    }

    #[test]
    fn test_concatenation() {
        let mut arena = SymbolArena::new();
        let left = add(
            &mut arena,
            ExpressionKind::Literal(LiteralValue::String("line ".to_string())),
            SymbolType::String,
            true,
        );
        let right = number(&mut arena, 7);
        let concat = add(
            &mut arena,
            ExpressionKind::Binary {
                left,
                operator: BinaryOperator::Concatenation,
                right,
            },
            SymbolType::String,
            true,
        );
        assert_eq!(
            Evaluator::new(1).evaluate(&arena, concat),
            Ok(LiteralValue::String("line 7".to_string()))
        );
    }

    #[test]
    fn test_keywords_and_labels() {
        let mut arena = SymbolArena::new();
        let interner = StringInterner::new();
        let keyword = |keyword| ExpressionKind::Keyword(keyword);
        let here = add(&mut arena, keyword(LineKeyword::Here), SymbolType::Number, true);
        let end = add(&mut arena, keyword(LineKeyword::End), SymbolType::Number, true);
        let label = arena.add_label(LabelSymbol {
            identifier: "loop".to_string(),
            name: interner.intern("loop"),
            syntax: NodeId(0),
            span: TextSpan::default(),
            line: 2,
            references: Vec::new(),
        });
        let reference = add(&mut arena, ExpressionKind::Label(label), SymbolType::Number, true);
        let mut evaluator = Evaluator::new(9);
        assert_eq!(evaluator.evaluate(&arena, here), Ok(LiteralValue::Number(3)));
        assert_eq!(evaluator.evaluate(&arena, end), Ok(LiteralValue::Number(9)));
        assert_eq!(evaluator.evaluate(&arena, reference), Ok(LiteralValue::Number(2)));
    }

    #[test]
    fn test_line_pointer_is_single_line_range() {
        let mut arena = SymbolArena::new();
        let line = number(&mut arena, 4);
        let pointer = add(&mut arena, ExpressionKind::LinePointer(line), SymbolType::Range, true);
        assert_eq!(
            Evaluator::new(4).evaluate(&arena, pointer),
            Ok(LiteralValue::Range(RangeValue::new(4, 4).unwrap()))
        );
    }

    #[test]
    fn test_non_constant_is_an_error() {
        let mut arena = SymbolArena::new();
        let bad = add(&mut arena, ExpressionKind::Bad, SymbolType::Error, false);
        assert_eq!(
            Evaluator::new(1).evaluate(&arena, bad),
            Err(EvaluationError::NotConstant(bad))
        );
    }

    #[test]
    fn test_results_are_memoized() {
        let mut arena = SymbolArena::new();
        let range = binary(&mut arena, 1, BinaryOperator::Range, 2);
        let mut evaluator = Evaluator::new(2);
        let first = evaluator.evaluate(&arena, range).unwrap();
        let cached = evaluator.cached();
        assert_eq!(cached, 3);
        assert_eq!(evaluator.evaluate(&arena, range).unwrap(), first);
        assert_eq!(evaluator.cached(), cached);
    }

    #[test]
    fn test_mismatched_operands() {
        let mut arena = SymbolArena::new();
        let text = add(
            &mut arena,
            ExpressionKind::Literal(LiteralValue::String("a".to_string())),
            SymbolType::String,
            true,
        );
        let negated = add(
            &mut arena,
            ExpressionKind::Unary {
                operator: UnaryOperator::Negation,
                operand: text,
            },
            SymbolType::Number,
            true,
        );
        assert_eq!(
            Evaluator::new(1).evaluate(&arena, negated),
            Err(EvaluationError::OperandMismatch {
                operator: "-",
                operands: "string".to_string()
            })
        );
    }
}
