use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use cubebot_core::auton::{AllianceSide, RoutineId, Selection};
use cubebot_core::config::RobotConfig;
use log::LevelFilter;

use cubebot_sim::{config, logger, run_match, DriverScript, MatchOptions, PlantConfig};

const DEFAULT_TELEOP_SECONDS: f32 = 10.0;

struct Args {
    config: Option<PathBuf>,
    export: Option<PathBuf>,
    routine: String,
    side: String,
    stuck_lift: bool,
    teleop_seconds: f32,
    log_level: LevelFilter,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut parsed = Self {
            config: None,
            export: None,
            routine: RoutineId::CrossLine.label().to_string(),
            side: String::new(),
            stuck_lift: false,
            teleop_seconds: DEFAULT_TELEOP_SECONDS,
            log_level: LevelFilter::Info,
        };

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            let mut value = || {
                inline
                    .clone()
                    .or_else(|| args.next())
                    .ok_or_else(|| anyhow!("{} needs a value", flag))
            };

            match flag.as_str() {
                "-h" | "--help" => {
                    print_usage();
                    process::exit(0);
                }
                "--config" => parsed.config = Some(PathBuf::from(value()?)),
                "--export-bin" => parsed.export = Some(PathBuf::from(value()?)),
                "--routine" => parsed.routine = value()?,
                "--side" => parsed.side = value()?,
                "--stuck-lift" => parsed.stuck_lift = true,
                "--teleop-seconds" => {
                    let text = value()?;
                    parsed.teleop_seconds = text
                        .parse()
                        .with_context(|| format!("--teleop-seconds {}", text))?;
                }
                "--log-level" => {
                    let text = value()?;
                    parsed.log_level = text
                        .parse()
                        .with_context(|| format!("--log-level {}", text))?;
                }
                other => return Err(anyhow!("unknown argument {}", other)),
            }
        }
        Ok(parsed)
    }
}

fn print_usage() {
    println!("Usage: cubebot-sim [options]");
    println!();
    println!("  --config <path>          robot.toml or a .bin config image");
    println!("  --export-bin <path>      write the loaded config as a .bin image");
    println!("  --routine <name>         chooser entry, e.g. \"Center Left Auto\"");
    println!("  --side <data>            field data, e.g. LRL");
    println!("  --stuck-lift             jam the lift gearbox");
    println!("  --teleop-seconds <secs>  teleop length (default {})", DEFAULT_TELEOP_SECONDS);
    println!("  --log-level <level>      error, warn, info, debug or trace");
}

fn main() -> Result<()> {
    let args = Args::parse()?;
    logger::init(args.log_level).map_err(|e| anyhow!("install logger: {}", e))?;

    let robot_config = match &args.config {
        Some(path) => config::load(path)?,
        None => RobotConfig::default(),
    };
    if let Some(path) = &args.export {
        config::export(&robot_config, path)?;
    }

    let selection = Selection::from_names(&args.routine, &args.side);
    if selection.routine.is_none() {
        log::warn!("Unknown routine '{}'", args.routine);
    }
    if selection.side == AllianceSide::Unknown {
        log::warn!("No field data, side-dependent routines fall back");
    }

    let options = MatchOptions {
        config: robot_config,
        plant: PlantConfig {
            stuck_lift: args.stuck_lift,
            ..Default::default()
        },
        selection,
        teleop: Duration::try_from_secs_f32(args.teleop_seconds)
            .with_context(|| format!("--teleop-seconds {}", args.teleop_seconds))?,
    };

    let report = run_match(&options, &DriverScript::shakedown());

    println!("Autonomous: {}", report.autonomous.label());
    if let Some(at) = report.autonomous_done_at {
        println!("Finished at: {}", humantime::format_duration(at));
    }
    println!("Ticks: {}", report.ticks);
    println!();
    print!("{}", report.dashboard);
    Ok(())
}
