//! SQLite-backed play table.
//!
//! The connection is opened read-only and kept for the life of the process.
//! Queries bind every filter value through `?N` placeholders.

use crate::gateway::{DatasetGateway, GatewayError};
use crate::play::{PlayRecord, whole};
use crate::query::CompiledQuery;

use regex::Regex;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row, params_from_iter};
use std::path::Path;

/// Columns read for every play, in `decode_row` order.
const PLAY_COLUMNS: &str = "passer_player_name, receiver_player_name, air_yards, down, distance, \
     play_clock, game_clock, game_date, pass_location_x, pass_location_y, pass_direction, epa, \
     complete_pass, pass_touchdown, first_down, first_down_pass, posteam, defteam";

pub struct SqliteGateway {
    conn: Connection,
    table: String,
}

impl SqliteGateway {
    /// Open the database read-only and check that `table` exists.
    pub fn open(db_path: impl AsRef<Path>, table: &str) -> Result<Self, GatewayError> {
        let db_path = db_path.as_ref();
        validate_identifier(table)?;

        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| GatewayError::Unavailable(format!("open {}: {}", db_path.display(), e)))?;

        conn.execute_batch("PRAGMA query_only = ON")?;

        let found: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
            [table],
            |row| row.get(0),
        )?;
        if found == 0 {
            return Err(GatewayError::Unavailable(format!(
                "table {} not found in {}",
                table,
                db_path.display()
            )));
        }

        log::info!("opened play table {} in {}", table, db_path.display());

        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    fn string_column(&self, sql: &str, params: &[&str]) -> Result<Vec<String>, GatewayError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(params.iter()), |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl DatasetGateway for SqliteGateway {
    fn fetch(&self, query: &CompiledQuery) -> Result<Vec<PlayRecord>, GatewayError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {}",
            PLAY_COLUMNS, self.table, query.where_clause
        );
        log::debug!("fetch: {} with {} params", sql, query.params.len());

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(query.params.iter()), decode_row)?;
        let plays = rows.collect::<Result<Vec<_>, _>>()?;

        log::debug!("fetched {} rows", plays.len());
        Ok(plays)
    }

    fn passers(&self) -> Result<Vec<String>, GatewayError> {
        let sql = format!(
            "SELECT DISTINCT passer_player_name FROM {} \
             WHERE passer_player_name IS NOT NULL ORDER BY passer_player_name",
            self.table
        );
        self.string_column(&sql, &[])
    }

    fn receivers(&self, passer: &str) -> Result<Vec<String>, GatewayError> {
        let sql = format!(
            "SELECT DISTINCT receiver_player_name FROM {} \
             WHERE passer_player_name = ?1 AND receiver_player_name IS NOT NULL \
             ORDER BY receiver_player_name",
            self.table
        );
        self.string_column(&sql, &[passer])
    }

    fn close(self: Box<Self>) -> Result<(), GatewayError> {
        let Self { conn, table } = *self;
        conn.close().map_err(|(_, e)| GatewayError::Query(e))?;
        log::info!("closed play table {}", table);
        Ok(())
    }
}

/// Table names cannot be bound, so only plain identifiers are accepted.
fn validate_identifier(name: &str) -> Result<(), GatewayError> {
    let re = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")
        .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
    if re.is_match(name) {
        Ok(())
    } else {
        Err(GatewayError::Unavailable(format!(
            "invalid table name {:?}",
            name
        )))
    }
}

fn decode_row(row: &Row<'_>) -> rusqlite::Result<PlayRecord> {
    Ok(PlayRecord {
        passer: text(row.get_ref(0)?).unwrap_or_default(),
        receiver: text(row.get_ref(1)?),
        air_yards: real(row.get_ref(2)?),
        down: real(row.get_ref(3)?)
            .and_then(whole)
            .and_then(|d| u8::try_from(d).ok()),
        distance: real(row.get_ref(4)?)
            .and_then(whole)
            .and_then(|d| u32::try_from(d).ok()),
        play_clock: real(row.get_ref(5)?),
        game_clock: real(row.get_ref(6)?),
        game_date: text(row.get_ref(7)?).unwrap_or_default(),
        pass_location_x: real(row.get_ref(8)?),
        pass_location_y: real(row.get_ref(9)?),
        pass_direction: text(row.get_ref(10)?),
        epa: real(row.get_ref(11)?),
        complete_pass: flag(row.get_ref(12)?),
        pass_touchdown: flag(row.get_ref(13)?),
        first_down: flag(row.get_ref(14)?),
        first_down_pass: flag(row.get_ref(15)?),
        posteam: text(row.get_ref(16)?),
        defteam: text(row.get_ref(17)?),
    })
}

// Exported tables mix storage classes (pandas writes flags as REAL, dates as TEXT),
// so decoding is by value rather than by declared type.

fn text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

fn real(value: ValueRef<'_>) -> Option<f64> {
    match value {
        ValueRef::Integer(i) => Some(i as f64),
        ValueRef::Real(f) if !f.is_nan() => Some(f),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok(),
        _ => None,
    }
}

fn flag(value: ValueRef<'_>) -> bool {
    match value {
        ValueRef::Text(bytes) => matches!(
            std::str::from_utf8(bytes).map(str::trim),
            Ok("1" | "true" | "True" | "TRUE")
        ),
        other => real(other).is_some_and(|f| f != 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{DepthBin, DirectionBin, bin_depth};
    use crate::filter::FilterSpec;
    use crate::query::{compile, compile_population};
    use pretty_assertions::assert_eq;
    use rusqlite::params;
    use tempfile::tempdir;

    fn setup_test_db() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nfl.db");

        let conn = Connection::open(&db_path).unwrap();
        conn.execute(
            "CREATE TABLE pbp (
                passer_player_name TEXT,
                receiver_player_name TEXT,
                air_yards REAL,
                down INTEGER,
                distance INTEGER,
                play_clock REAL,
                game_clock REAL,
                game_date TEXT,
                pass_location_x REAL,
                pass_location_y REAL,
                pass_direction TEXT,
                epa REAL,
                complete_pass REAL,
                pass_touchdown INTEGER,
                first_down REAL,
                first_down_pass REAL,
                posteam TEXT,
                defteam TEXT
            )",
            [],
        )
        .unwrap();

        (dir, db_path)
    }

    fn insert_play(
        conn: &Connection,
        passer: Option<&str>,
        receiver: Option<&str>,
        air_yards: Option<f64>,
        down: i64,
        direction: &str,
    ) {
        conn.execute(
            "INSERT INTO pbp VALUES (?1, ?2, ?3, ?4, 10, 12.0, 300.0, '2022-10-02', 35.0, 20.0,
                                     ?5, 0.4, 1.0, 0, 1.0, 0.0, 'BUF', 'MIA')",
            params![passer, receiver, air_yards, down, direction],
        )
        .unwrap();
    }

    #[test]
    fn fetch_binds_filter_values() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert_play(&conn, Some("J.Allen"), Some("S.Diggs"), Some(10.0), 1, "North");
        insert_play(&conn, Some("J.Allen"), Some("G.Davis"), Some(20.0), 3, "SE");
        insert_play(&conn, Some("J.Allen"), Some("S.Diggs"), None, 2, "n");
        insert_play(&conn, Some("T.Tagovailoa"), Some("T.Hill"), Some(30.0), 1, "N");
        drop(conn);

        let gw = SqliteGateway::open(&db_path, "pbp").unwrap();

        let all = gw.fetch(&compile(&FilterSpec::new("J.Allen")).unwrap()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].complete_pass, true);
        assert_eq!(all[0].first_down_pass, false);
        assert_eq!(all[0].posteam.as_deref(), Some("BUF"));

        let short = gw
            .fetch(&compile(&FilterSpec::new("J.Allen").with_depths([DepthBin::Short])).unwrap())
            .unwrap();
        assert_eq!(short.len(), 2);
        assert!(short.iter().all(|p| bin_depth(p.air_yards) == DepthBin::Short));

        let mid = gw
            .fetch(
                &compile(&FilterSpec::new("J.Allen").with_depths([DepthBin::Intermediate]))
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].air_yards, Some(20.0));

        let north = gw
            .fetch(
                &compile(&FilterSpec::new("J.Allen").with_directions([DirectionBin::N]))
                .unwrap(),
            )
            .unwrap();
        assert_eq!(north.len(), 2);

        let none = gw
            .fetch(&compile(&FilterSpec::new("J.Allen").with_downs([])).unwrap())
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn sql_and_memory_evaluation_agree() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert_play(&conn, Some("J.Allen"), Some("S.Diggs"), Some(10.0), 1, "North");
        insert_play(&conn, Some("J.Allen"), Some("G.Davis"), Some(20.0), 3, "SE");
        insert_play(&conn, Some("J.Allen"), None, None, 2, "w");
        insert_play(&conn, None, None, Some(4.0), 2, "w");
        insert_play(&conn, Some("J.Allen"), Some("S.Diggs"), Some(2.0), 4, "left");
        conn.execute(
            "UPDATE pbp SET pass_direction = NULL WHERE down = 3",
            [],
        )
        .unwrap();
        drop(conn);

        let gw = SqliteGateway::open(&db_path, "pbp").unwrap();
        let everything = CompiledQuery::new(crate::query::predicate::Predicate::And(vec![]));
        let snapshot = crate::gateway::MemoryGateway::new(gw.fetch(&everything).unwrap());

        let filters = [
            FilterSpec::new("J.Allen").with_depths([DepthBin::Intermediate, DepthBin::Deep]),
            FilterSpec::new("J.Allen").with_receivers(["G.Davis"]),
            FilterSpec::new("J.Allen").with_downs([1, 2]),
            FilterSpec::new("J.Allen").with_directions([DirectionBin::E]),
            FilterSpec::new("J.Allen").with_directions([DirectionBin::N, DirectionBin::W]),
        ];
        for f in &filters {
            let q = compile(f).unwrap();
            assert_eq!(gw.fetch(&q).unwrap(), snapshot.fetch(&q).unwrap(), "{:?}", f);
        }

        let population = compile_population(&FilterSpec::new("J.Allen"));
        assert_eq!(gw.fetch(&population).unwrap().len(), 4);
        assert_eq!(snapshot.fetch(&population).unwrap().len(), 4);

        // The null and unrecognized directions both land on E, as the classifier puts them.
        let east = gw
            .fetch(&compile(&FilterSpec::new("J.Allen").with_directions([DirectionBin::E])).unwrap())
            .unwrap();
        let downs: Vec<Option<u8>> = east.iter().map(|p| p.down).collect();
        assert_eq!(downs, vec![Some(3), Some(4)]);
    }

    #[test]
    fn option_lists() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert_play(&conn, Some("T.Tagovailoa"), Some("T.Hill"), Some(8.0), 1, "N");
        insert_play(&conn, Some("J.Allen"), Some("S.Diggs"), Some(8.0), 1, "N");
        insert_play(&conn, Some("J.Allen"), Some("D.Knox"), Some(8.0), 1, "N");
        insert_play(&conn, Some("J.Allen"), None, Some(8.0), 1, "N");
        insert_play(&conn, None, None, None, 1, "N");
        drop(conn);

        let gw = SqliteGateway::open(&db_path, "pbp").unwrap();
        assert_eq!(gw.passers().unwrap(), vec!["J.Allen", "T.Tagovailoa"]);
        assert_eq!(gw.receivers("J.Allen").unwrap(), vec!["D.Knox", "S.Diggs"]);
        assert!(gw.receivers("Nobody").unwrap().is_empty());
    }

    #[test]
    fn open_rejects_missing_table_and_bad_identifiers() {
        let (_dir, db_path) = setup_test_db();

        let missing = SqliteGateway::open(&db_path, "plays");
        assert!(matches!(missing, Err(GatewayError::Unavailable(_))));

        let hostile = SqliteGateway::open(&db_path, "pbp; DROP TABLE pbp");
        assert!(matches!(hostile, Err(GatewayError::Unavailable(_))));

        let nowhere = SqliteGateway::open(db_path.with_file_name("absent.db"), "pbp");
        assert!(matches!(nowhere, Err(GatewayError::Unavailable(_))));
    }

    #[test]
    fn connection_is_read_only() {
        let (_dir, db_path) = setup_test_db();
        let gw = SqliteGateway::open(&db_path, "pbp").unwrap();

        let result = gw.conn.execute("DELETE FROM pbp", []);
        assert!(result.is_err());

        Box::new(gw).close().unwrap();
    }
}
