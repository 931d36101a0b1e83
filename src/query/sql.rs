//! SQL emitter for predicates.
//!
//! Every value becomes a positional `?N` placeholder; parameters are collected
//! in placeholder order. Nothing from the filter is spliced into the text.

use crate::query::predicate::{Param, Predicate};

/// Render `pred` as a WHERE-clause body plus its bound parameters.
pub fn emit_predicate(pred: &Predicate) -> (String, Vec<Param>) {
    let mut params = Vec::new();
    let text = emit(pred, &mut params);
    (text, params)
}

fn bind(params: &mut Vec<Param>, value: &Param) -> String {
    params.push(value.clone());
    format!("?{}", params.len())
}

fn emit(pred: &Predicate, params: &mut Vec<Param>) -> String {
    match pred {
        Predicate::Compare { column, op, value } => {
            format!("{} {} {}", column.sql(), op.as_str(), bind(params, value))
        }
        Predicate::Between { column, low, high } => {
            let low = bind(params, low);
            let high = bind(params, high);
            format!("{} BETWEEN {} AND {}", column.sql(), low, high)
        }
        Predicate::In { values, .. } if values.is_empty() => "1 = 0".to_string(),
        Predicate::In { column, values } => {
            let placeholders: Vec<String> = values.iter().map(|v| bind(params, v)).collect();
            format!("{} IN ({})", column.sql(), placeholders.join(", "))
        }
        Predicate::NotIn { column, values } if values.is_empty() => {
            format!("{} IS NOT NULL", column.sql())
        }
        Predicate::NotIn { column, values } => {
            let placeholders: Vec<String> = values.iter().map(|v| bind(params, v)).collect();
            format!("{} NOT IN ({})", column.sql(), placeholders.join(", "))
        }
        Predicate::IsNull(column) => format!("{} IS NULL", column.sql()),
        Predicate::IsNotNull(column) => format!("{} IS NOT NULL", column.sql()),
        Predicate::And(parts) => join(parts, " AND ", "1 = 1", params),
        Predicate::Or(parts) => join(parts, " OR ", "1 = 0", params),
        Predicate::Never => "1 = 0".to_string(),
    }
}

fn join(parts: &[Predicate], sep: &str, empty: &str, params: &mut Vec<Param>) -> String {
    match parts {
        [] => empty.to_string(),
        [only] => emit(only, params),
        _ => {
            let rendered: Vec<String> = parts
                .iter()
                .map(|p| format!("({})", emit(p, params)))
                .collect();
            rendered.join(sep)
        }
    }
}
