//! CLI configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one demo run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Content directory; the bundled data when unset.
    pub data_dir: Option<PathBuf>,
    /// Engine settings file overriding `<data_dir>/config.toml`.
    pub engine_config: Option<PathBuf>,
    /// Scenario file stem under `<data_dir>/scenarios`.
    pub scenario: String,
    /// Rounds to play before stopping.
    pub rounds: u32,
    /// Directory for a log file in addition to stderr.
    pub log_dir: Option<PathBuf>,
    /// Per-hex playback delay; moves settle instantly when unset.
    pub pace: Option<Duration>,
    pub event_buffer: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            engine_config: None,
            scenario: "skirmish".into(),
            rounds: 1,
            log_dir: None,
            pace: None,
            event_buffer: 64,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_DATA_DIR` - Content directory (default: bundled data)
    /// - `ARENA_CONFIG` - Engine settings TOML (default: `<data_dir>/config.toml`)
    /// - `ARENA_SCENARIO` - Scenario name (default: skirmish)
    /// - `ARENA_ROUNDS` - Rounds to play (default: 1)
    /// - `ARENA_LOG_DIR` - Also write logs to `<dir>/arena.log`
    /// - `ARENA_PACE_MS` - Milliseconds per hex of forced movement
    /// - `ARENA_EVENT_BUFFER` - Event bus capacity per topic (default: 64)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("ARENA_DATA_DIR").ok().map(PathBuf::from);
        config.engine_config = env::var("ARENA_CONFIG").ok().map(PathBuf::from);
        if let Ok(scenario) = env::var("ARENA_SCENARIO") {
            config.scenario = scenario;
        }
        if let Some(rounds) = read_env::<u32>("ARENA_ROUNDS") {
            config.rounds = rounds.max(1);
        }
        config.log_dir = env::var("ARENA_LOG_DIR").ok().map(PathBuf::from);
        config.pace = read_env::<u64>("ARENA_PACE_MS").map(Duration::from_millis);
        if let Some(capacity) = read_env::<usize>("ARENA_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
