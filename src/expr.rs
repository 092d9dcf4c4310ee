//! Boolean row expressions for declarative filtering.
//!
//! An expression such as `revenue > 100 && stage != "Lost"` is compiled once
//! and then evaluated against each record. Columns are bound under their raw
//! name and under a normalised identifier (`Order ID` -> `order_id`).

use evalexpr::{ContextWithMutableVariables, HashMapContext, Node, Value as EvalValue};

use crate::{
    data::{Value, normalize_column_name},
    dataset::Record,
    error::EditError,
};

#[derive(Debug, Clone)]
pub struct RowPredicate {
    expression: String,
    tree: Node,
}

impl RowPredicate {
    pub fn compile(expression: &str) -> Result<Self, EditError> {
        let tree = evalexpr::build_operator_tree(expression).map_err(|err| {
            EditError::Expression {
                expression: expression.to_string(),
                message: err.to_string(),
            }
        })?;
        Ok(Self {
            expression: expression.to_string(),
            tree,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Evaluation failures and non-boolean results count as a non-match.
    pub fn matches(&self, record: &Record) -> bool {
        let mut context = HashMapContext::new();
        for (name, value) in record {
            let bound = value_to_evalexpr(value);
            let canon = normalize_column_name(name);
            if canon != *name && context.set_value(canon, bound.clone()).is_err() {
                return false;
            }
            if context.set_value(name.clone(), bound).is_err() {
                return false;
            }
        }
        self.tree
            .eval_boolean_with_context(&context)
            .unwrap_or(false)
    }
}

pub fn value_to_evalexpr(value: &Value) -> EvalValue {
    match value {
        Value::Null => EvalValue::Empty,
        Value::Boolean(b) => EvalValue::Boolean(*b),
        Value::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
            EvalValue::Int(*n as i64)
        }
        Value::Number(n) => EvalValue::Float(*n),
        Value::String(s) => EvalValue::String(s.clone()),
    }
}
