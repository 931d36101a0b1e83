//! FilterSpec -> predicate compiler.

use crate::classify::{DepthBin, DirectionBin, INTERMEDIATE_MAX_YARDS, SHORT_MAX_YARDS};
use crate::filter::FilterSpec;
use crate::query::predicate::{Column, CompareOp, Param, Predicate};
use crate::query::sql::emit_predicate;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("no passer selected")]
    MissingPasser,
}

/// A predicate together with its rendered WHERE clause and bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub predicate: Predicate,
    pub where_clause: String,
    pub params: Vec<Param>,
}

impl CompiledQuery {
    pub fn new(predicate: Predicate) -> Self {
        let (where_clause, params) = emit_predicate(&predicate);
        Self {
            predicate,
            where_clause,
            params,
        }
    }
}

/// Compile the selected passer's view.
///
/// Clauses: passer equality, play-clock window, then downs, depths, receivers and
/// directions when constrained. Dates are left to the post-fetch pass.
pub fn compile(filter: &FilterSpec) -> Result<CompiledQuery, CompileError> {
    if !filter.has_passer() {
        return Err(CompileError::MissingPasser);
    }

    let mut clauses = vec![
        Predicate::compare(
            Column::Passer,
            CompareOp::Eq,
            Param::Text(filter.passer().to_string()),
        ),
        play_clock_clause(filter),
    ];

    if let Some(downs) = filter.downs() {
        clauses.push(set_clause(Column::Down, downs, |d| {
            vec![Param::Int(i64::from(*d))]
        }));
    }
    if let Some(depths) = filter.depths() {
        clauses.push(depth_set_clause(depths));
    }
    if let Some(receivers) = filter.receivers() {
        clauses.push(set_clause(Column::Receiver, receivers, |r| {
            vec![Param::Text(r.clone())]
        }));
    }
    if let Some(directions) = filter.directions() {
        clauses.push(direction_set_clause(directions));
    }

    Ok(CompiledQuery::new(Predicate::And(clauses)))
}

/// The reference population: every passer, restricted only by the play-clock window.
pub fn compile_population(filter: &FilterSpec) -> CompiledQuery {
    CompiledQuery::new(Predicate::And(vec![
        Predicate::IsNotNull(Column::Passer),
        play_clock_clause(filter),
    ]))
}

/// Numeric air-yards range for one depth bin, with the classifier's boundaries.
pub fn depth_clause(depth: DepthBin) -> Predicate {
    let short_max = Param::Real(SHORT_MAX_YARDS);
    let intermediate_max = Param::Real(INTERMEDIATE_MAX_YARDS);

    match depth {
        // Missing air yards classify as short.
        DepthBin::Short => Predicate::Or(vec![
            Predicate::IsNull(Column::AirYards),
            Predicate::compare(Column::AirYards, CompareOp::LtEq, short_max),
        ]),
        DepthBin::Intermediate => Predicate::And(vec![
            Predicate::compare(Column::AirYards, CompareOp::Gt, short_max),
            Predicate::compare(Column::AirYards, CompareOp::LtEq, intermediate_max),
        ]),
        DepthBin::Deep => Predicate::compare(Column::AirYards, CompareOp::Gt, intermediate_max),
    }
}

fn play_clock_clause(filter: &FilterSpec) -> Predicate {
    let window = filter.play_clock();
    Predicate::Between {
        column: Column::PlayClock,
        low: Param::Real(window.min),
        high: Param::Real(window.max),
    }
}

fn depth_set_clause(depths: &BTreeSet<DepthBin>) -> Predicate {
    if depths.is_empty() {
        return Predicate::Never;
    }
    Predicate::Or(depths.iter().map(|d| depth_clause(*d)).collect())
}

/// Set membership; an empty set matches nothing.
fn set_clause<T>(column: Column, set: &BTreeSet<T>, to_params: impl Fn(&T) -> Vec<Param>) -> Predicate {
    if set.is_empty() {
        return Predicate::Never;
    }
    Predicate::In {
        column,
        values: set.iter().flat_map(to_params).collect(),
    }
}

/// Direction membership. Selecting `E` also claims every row the classifier
/// sends to `E`: missing or unrecognized directions.
fn direction_set_clause(directions: &BTreeSet<DirectionBin>) -> Predicate {
    let listed = set_clause(Column::Direction, directions, direction_spellings);
    if !directions.contains(&DirectionBin::E) {
        return listed;
    }
    Predicate::Or(vec![
        listed,
        Predicate::IsNull(Column::Direction),
        Predicate::NotIn {
            column: Column::Direction,
            values: DirectionBin::ALL.iter().flat_map(direction_spellings).collect(),
        },
    ])
}

fn direction_spellings(direction: &DirectionBin) -> Vec<Param> {
    vec![
        Param::Text(direction.label().to_string()),
        Param::Text(direction.full_name().to_string()),
    ]
}
