//! Launch argument handling shared by the viewer and the editor.

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use xxhash_rust::xxh3::xxh3_64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchArgs {
    /// Map file to open instead of generating one.
    pub map_path: Option<PathBuf>,
    pub seed: SeedChoice,
}

static SEED_CALLS: AtomicU64 = AtomicU64::new(0);

/// Hashes wall-clock time, pid and a per-process call counter into a seed.
pub fn generate_runtime_seed() -> u64 {
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_nanos());
    let call = SEED_CALLS.fetch_add(1, Ordering::Relaxed);

    let mut entropy = [0_u8; 28];
    entropy[..16].copy_from_slice(&nanos.to_le_bytes());
    entropy[16..20].copy_from_slice(&process::id().to_le_bytes());
    entropy[20..].copy_from_slice(&call.to_le_bytes());
    xxh3_64(&entropy)
}

/// Parses `[MAP_PATH] [--seed N | --seed=N]`; `args[0]` is the program name.
/// A lone `--` ends option parsing so map files starting with dashes can be opened.
pub fn parse_launch_args(args: &[String], generated_seed: u64) -> Result<LaunchArgs, String> {
    let mut seed = None;
    let mut map_path = None;
    let mut options_done = false;
    let mut rest = args.iter().skip(1);

    while let Some(argument) = rest.next() {
        let argument = argument.as_str();
        let seed_text = match argument {
            "--" if !options_done => {
                options_done = true;
                continue;
            }
            "--seed" if !options_done => {
                Some(rest.next().ok_or("missing value for --seed")?.as_str())
            }
            _ if !options_done && argument.starts_with("--") => {
                match argument.strip_prefix("--seed=") {
                    Some(value) => Some(value),
                    None => return Err(format!("unknown option '{argument}'")),
                }
            }
            _ => None,
        };

        match seed_text {
            Some(_) if seed.is_some() => return Err("seed provided more than once".to_string()),
            Some(text) => seed = Some(parse_seed_value(text)?),
            None if map_path.is_some() => {
                return Err(format!("only one map file can be opened, got '{argument}' too"));
            }
            None => map_path = Some(PathBuf::from(argument)),
        }
    }

    let seed = seed.map_or(SeedChoice::Generated(generated_seed), SeedChoice::Cli);
    Ok(LaunchArgs { map_path, seed })
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    raw_value.parse::<u64>().map_err(|_| format!("seed value '{raw_value}' must be a number"))
}
