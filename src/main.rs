use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod aggregate;
mod classify;
mod config;
mod filter;
mod gateway;
mod model;
mod play;
mod query;
mod render;

use config::DashboardConfig;
use filter::FilterSpec;
use filter::parse::{
    parse_clock_range, parse_date_range, parse_depths, parse_directions, parse_downs, parse_list,
};
use gateway::{DatasetGateway, MemoryGateway, SqliteGateway};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "qb-tendencies")]
#[command(about = "Quarterback pass tendency dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

/// Where plays come from. Defaults to `QB_DB_PATH` / `QB_PLAYS_TABLE`.
#[derive(Args)]
struct DatasetArgs {
    /// SQLite database holding the play table.
    #[arg(long, conflicts_with = "snapshot")]
    db: Option<PathBuf>,

    /// JSON array of plays used instead of a database.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    #[arg(long)]
    table: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dashboard for one passer and write it as HTML or JSON.
    Report {
        #[arg(long, default_value = "")]
        passer: String,

        #[command(flatten)]
        dataset: DatasetArgs,

        /// START..END, inclusive.
        #[arg(long, default_value = "2022-09-01..2024-02-01")]
        dates: String,

        /// Seconds on the play clock at the snap, MIN-MAX.
        #[arg(long, default_value = "0-40")]
        play_clock: String,

        /// Seconds left in the quarter, MIN-MAX.
        #[arg(long)]
        game_clock: Option<String>,

        /// Comma list; an empty value selects nothing.
        #[arg(long)]
        downs: Option<String>,

        /// Comma list of 0-10 yd / 10-20 yd / 20+ yd (or short / intermediate / deep).
        #[arg(long)]
        depths: Option<String>,

        #[arg(long)]
        receivers: Option<String>,

        /// Comma list of N, NE, E, SE, S, SW, W, NW.
        #[arg(long)]
        directions: Option<String>,

        /// Output file; `.json` writes JSON, anything else HTML.
        #[arg(short = 'o', long)]
        out: PathBuf,
    },

    /// List passers in the dataset.
    Passers {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// List receivers targeted by a passer.
    Receivers {
        #[arg(long)]
        passer: String,

        #[command(flatten)]
        dataset: DatasetArgs,
    },
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Report {
            passer,
            dataset,
            dates,
            play_clock,
            game_clock,
            downs,
            depths,
            receivers,
            directions,
            out,
        } => {
            // 1) Filter selection.
            let mut filter = FilterSpec::new(passer)
                .with_dates(parse_date_range(&dates)?)
                .with_play_clock(parse_clock_range(&play_clock)?);
            if let Some(s) = game_clock {
                filter = filter.with_game_clock(parse_clock_range(&s)?);
            }
            if let Some(s) = downs {
                filter = filter.with_downs(parse_downs(&s)?);
            }
            if let Some(s) = depths {
                filter = filter.with_depths(parse_depths(&s)?);
            }
            if let Some(s) = receivers {
                filter = filter.with_receivers(parse_list(&s));
            }
            if let Some(s) = directions {
                filter = filter.with_directions(parse_directions(&s)?);
            }

            // 2) Dataset. An unavailable dataset still yields an (empty) report.
            let gateway = match open_gateway(&dataset) {
                Ok(gw) => Some(gw),
                Err(e) => {
                    log::warn!("{:#}", e);
                    None
                }
            };

            // 3) Aggregate.
            let data = model::build_dashboard(gateway.as_deref(), &filter);

            // 4) Render.
            let is_json = out
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            let body = if is_json {
                render::render_json(&data)?
            } else {
                render::render_html_report(&data)?
            };
            std::fs::write(&out, body).with_context(|| format!("writing {}", out.display()))?;
            println!("Wrote {}", out.display());

            if let Some(gw) = gateway {
                gw.close()?;
            }
        }

        Commands::Passers { dataset } => {
            let gw = open_gateway(&dataset)?;
            for name in gw.passers()? {
                println!("{}", name);
            }
            gw.close()?;
        }

        Commands::Receivers { passer, dataset } => {
            if passer.trim().is_empty() {
                bail!("--passer must not be blank");
            }
            let gw = open_gateway(&dataset)?;
            for name in gw.receivers(&passer)? {
                println!("{}", name);
            }
            gw.close()?;
        }
    }

    Ok(())
}

fn open_gateway(args: &DatasetArgs) -> Result<Box<dyn DatasetGateway>> {
    if let Some(path) = &args.snapshot {
        let gw = MemoryGateway::from_json_file(path)?;
        return Ok(Box::new(gw));
    }

    let config = DashboardConfig::from_env().with_overrides(args.db.clone(), args.table.clone());
    let gw = SqliteGateway::open(&config.db_path, &config.table)
        .with_context(|| format!("opening {}", config.db_path.display()))?;
    Ok(Box::new(gw))
}
