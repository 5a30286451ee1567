//! Constant evaluation of a single expression node.
//!
//! Operands are read from the children's `cst` slots, so a node folds once
//! all of its operands have. Integral arithmetic is checked: an overflow or
//! a division by zero leaves the node unfolded rather than wrapping.

use nsc_ir::{BinaryOp, Constant, NodeId, NodeKind, Program, UnaryOp};

pub(crate) fn eval(program: &Program, node: NodeId) -> Option<Constant> {
    let cst = |id: NodeId| program.node(id).cst;
    let node = program.node(node);
    match &node.kind {
        NodeKind::Literal(value) => Some(*value),
        NodeKind::Identifier { decl, .. } => program.decl(*decl).value,
        NodeKind::Unary { op, operand } => unary(*op, cst(*operand)?),
        NodeKind::Binary { op, lhs, rhs } => match op {
            BinaryOp::And => {
                let lhs = cst(*lhs)?;
                if !lhs.is_truthy() {
                    return Some(Constant::int(0));
                }
                Some(truth(cst(*rhs)?.is_truthy()))
            }
            BinaryOp::Or => {
                let lhs = cst(*lhs)?;
                if lhs.is_truthy() {
                    return Some(Constant::int(1));
                }
                Some(truth(cst(*rhs)?.is_truthy()))
            }
            _ => binary(*op, cst(*lhs)?, cst(*rhs)?),
        },
        NodeKind::Conditional {
            cond,
            then_expr,
            else_expr,
        } => {
            if cst(*cond)?.is_truthy() {
                cst(*then_expr)
            } else {
                cst(*else_expr)
            }
        }
        NodeKind::Cast { expr, .. } => program.types.convert(cst(*expr)?, node.ty?),
        _ => None,
    }
}

/// The value following an enumerator's.
pub(crate) fn successor(value: Constant) -> Option<Constant> {
    value.as_int()?.checked_add(1).map(Constant::int)
}

fn truth(value: bool) -> Constant {
    Constant::int(i128::from(value))
}

fn unary(op: UnaryOp, value: Constant) -> Option<Constant> {
    match (op, value) {
        (UnaryOp::Neg, Constant::Integral(v)) => v.checked_neg().map(Constant::int),
        (UnaryOp::Neg, Constant::Floating(_)) => Some(Constant::float(-value.as_f64())),
        (UnaryOp::Not, _) => Some(truth(!value.is_truthy())),
        (UnaryOp::BitNot, Constant::Integral(v)) => Some(Constant::int(!v)),
        (UnaryOp::BitNot, Constant::Floating(_)) => None,
    }
}

fn binary(op: BinaryOp, lhs: Constant, rhs: Constant) -> Option<Constant> {
    match (lhs, rhs) {
        (Constant::Integral(a), Constant::Integral(b)) => integral(op, a, b),
        _ => floating(op, lhs.as_f64(), rhs.as_f64()),
    }
}

fn integral(op: BinaryOp, a: i128, b: i128) -> Option<Constant> {
    let value = match op {
        BinaryOp::Add => a.checked_add(b)?,
        BinaryOp::Sub => a.checked_sub(b)?,
        BinaryOp::Mul => a.checked_mul(b)?,
        BinaryOp::Div => a.checked_div(b)?,
        BinaryOp::Rem => a.checked_rem(b)?,
        BinaryOp::Shl => a.checked_shl(u32::try_from(b).ok()?)?,
        BinaryOp::Shr => a.checked_shr(u32::try_from(b).ok()?)?,
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Eq => i128::from(a == b),
        BinaryOp::Ne => i128::from(a != b),
        BinaryOp::Lt => i128::from(a < b),
        BinaryOp::Le => i128::from(a <= b),
        BinaryOp::Gt => i128::from(a > b),
        BinaryOp::Ge => i128::from(a >= b),
        BinaryOp::And => i128::from(a != 0 && b != 0),
        BinaryOp::Or => i128::from(a != 0 || b != 0),
    };
    Some(Constant::int(value))
}

#[expect(clippy::float_cmp, reason = "C equality on folded constants is exact")]
fn floating(op: BinaryOp, a: f64, b: f64) -> Option<Constant> {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Eq => return Some(truth(a == b)),
        BinaryOp::Ne => return Some(truth(a != b)),
        BinaryOp::Lt => return Some(truth(a < b)),
        BinaryOp::Le => return Some(truth(a <= b)),
        BinaryOp::Gt => return Some(truth(a > b)),
        BinaryOp::Ge => return Some(truth(a >= b)),
        BinaryOp::And => return Some(truth(a != 0.0 && b != 0.0)),
        BinaryOp::Or => return Some(truth(a != 0.0 || b != 0.0)),
        BinaryOp::Rem
        | BinaryOp::Shl
        | BinaryOp::Shr
        | BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor => return None,
    };
    Some(Constant::float(value))
}
