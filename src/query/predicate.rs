//! Predicate AST over the play table.
//!
//! The same tree is rendered to parameterized SQL (see `sql.rs`) and evaluated
//! in memory against snapshot rows. In-memory evaluation follows SQL NULL
//! semantics: any comparison involving a missing value is false.

use crate::play::PlayRecord;
use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;

/// Columns the compiler may constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Passer,
    Receiver,
    AirYards,
    Down,
    PlayClock,
    /// Direction text, trimmed and upper-cased on both sides of the comparison.
    Direction,
}

impl Column {
    /// SQL expression for this column.
    pub fn sql(&self) -> &'static str {
        match self {
            Column::Passer => "passer_player_name",
            Column::Receiver => "receiver_player_name",
            Column::AirYards => "air_yards",
            Column::Down => "down",
            Column::PlayClock => "play_clock",
            Column::Direction => "UPPER(TRIM(pass_direction))",
        }
    }

    fn cell(&self, record: &PlayRecord) -> Cell {
        match self {
            Column::Passer if record.passer.is_empty() => Cell::Null,
            Column::Passer => Cell::Text(record.passer.clone()),
            Column::Receiver => record.receiver.clone().map_or(Cell::Null, Cell::Text),
            Column::AirYards => Cell::number(record.air_yards),
            Column::Down => Cell::number(record.down.map(f64::from)),
            Column::PlayClock => Cell::number(record.play_clock),
            Column::Direction => record
                .pass_direction
                .as_deref()
                .map_or(Cell::Null, |raw| Cell::Text(raw.trim().to_uppercase())),
        }
    }
}

/// A bound query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(String),
    Int(i64),
    Real(f64),
}

impl Param {
    fn as_number(&self) -> Option<f64> {
        match self {
            Param::Int(i) => Some(*i as f64),
            Param::Real(f) => Some(*f),
            Param::Text(_) => None,
        }
    }
}

impl ToSql for Param {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Param::Text(s) => ToSqlOutput::from(s.as_str()),
            Param::Int(i) => ToSqlOutput::from(*i),
            Param::Real(f) => ToSqlOutput::from(*f),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Gt,
    LtEq,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Gt => ">",
            CompareOp::LtEq => "<=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        column: Column,
        op: CompareOp,
        value: Param,
    },
    /// Inclusive on both ends.
    Between {
        column: Column,
        low: Param,
        high: Param,
    },
    In {
        column: Column,
        values: Vec<Param>,
    },
    /// Present and equal to none of `values`. A missing value does not match.
    NotIn {
        column: Column,
        values: Vec<Param>,
    },
    IsNull(Column),
    IsNotNull(Column),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    /// Matches no row.
    Never,
}

impl Predicate {
    pub fn compare(column: Column, op: CompareOp, value: Param) -> Self {
        Predicate::Compare { column, op, value }
    }

    /// Evaluate against one row.
    pub fn matches(&self, record: &PlayRecord) -> bool {
        match self {
            Predicate::Compare { column, op, value } => {
                let cell = column.cell(record);
                match op {
                    CompareOp::Eq => cell.equals(value),
                    CompareOp::Gt => cell.cmp_number(value).is_some_and(|o| o.is_gt()),
                    CompareOp::LtEq => cell.cmp_number(value).is_some_and(|o| o.is_le()),
                }
            }
            Predicate::Between { column, low, high } => {
                let cell = column.cell(record);
                cell.cmp_number(low).is_some_and(|o| o.is_ge())
                    && cell.cmp_number(high).is_some_and(|o| o.is_le())
            }
            Predicate::In { column, values } => {
                let cell = column.cell(record);
                values.iter().any(|v| cell.equals(v))
            }
            Predicate::NotIn { column, values } => {
                let cell = column.cell(record);
                !matches!(cell, Cell::Null) && !values.iter().any(|v| cell.equals(v))
            }
            Predicate::IsNull(column) => matches!(column.cell(record), Cell::Null),
            Predicate::IsNotNull(column) => !matches!(column.cell(record), Cell::Null),
            Predicate::And(parts) => parts.iter().all(|p| p.matches(record)),
            Predicate::Or(parts) => parts.iter().any(|p| p.matches(record)),
            Predicate::Never => false,
        }
    }
}

enum Cell {
    Text(String),
    Number(f64),
    Null,
}

impl Cell {
    fn number(value: Option<f64>) -> Self {
        match value {
            Some(v) if !v.is_nan() => Cell::Number(v),
            _ => Cell::Null,
        }
    }

    fn equals(&self, param: &Param) -> bool {
        match (self, param) {
            (Cell::Text(a), Param::Text(b)) => a == b,
            (Cell::Number(a), p) => p.as_number().is_some_and(|b| *a == b),
            _ => false,
        }
    }

    fn cmp_number(&self, param: &Param) -> Option<std::cmp::Ordering> {
        match self {
            Cell::Number(a) => a.partial_cmp(&param.as_number()?),
            _ => None,
        }
    }
}
