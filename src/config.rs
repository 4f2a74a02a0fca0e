use std::*;
use path::{Path, PathBuf};

use anyhow::{Error, Result};
use config_manager::config;
use config_manager::ConfigInit;
use log::LevelFilter;

#[config(
    clap(version, author),
    env_prefix = "c_sema",
    file(
        format = "toml",
        clap(long = "config", short = 'c', help = "path to configuration file"),
        env = "c_sema_config",
        optional = true
    )
)]
struct InternalConfig {
    #[source(clap(long, short), env, config, default)]
    trace: Option<String>,
    #[source(clap(long, short), env, config, default)]
    source_name: Option<String>,
    #[source(clap(long, short), env, config, default)]
    output_dir: Option<String>,
    #[source(clap(long, short), env, config, default)]
    log_level: Option<String>,
    #[source(clap(long), env, config, default)]
    no_tables: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub(crate) trace: PathBuf,
    pub(crate) source_name: String,
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) log_level: LevelFilter,
    pub(crate) no_tables: bool,
}

fn default_source_name(trace: &Path) -> String {
    let stem = trace.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    format!("{}.c", stem)
}

impl Config {
    pub fn try_parse() -> Result<Self> {
        Self::from_internal(InternalConfig::parse()?)
    }

    fn from_internal(config: InternalConfig) -> Result<Self> {
        let InternalConfig {
            trace,
            source_name,
            output_dir,
            log_level,
            no_tables,
        } = config;

        let trace = match trace {
            Some(trace) => PathBuf::from(trace),
            None => Err(Error::msg("no trace file given (use --trace)"))?,
        };
        let source_name = source_name
            .unwrap_or_else(|| default_source_name(&trace));
        let log_level = match log_level.as_deref() {
            None => LevelFilter::Warn,
            Some(level) => level.parse::<LevelFilter>().map_err(|_| Error::msg(format!(
                "the log level {level} is unknown (expected off, error, warn, info, debug or trace)",
            )))?,
        };

        Ok(Self {
            trace,
            source_name,
            output_dir: output_dir.map(PathBuf::from),
            log_level,
            no_tables,
        })
    }
}

#[cfg(test)]
mod tests {
    use collections::{HashMap, HashSet};

    use config_manager::{ClapSource, ConfigOption, Source};

    use super::*;

    fn parse_args(args: &[&str]) -> Result<Config> {
        let options = HashSet::from([
            ConfigOption::ExplicitSource(Source::Clap(ClapSource::Args(
                args.iter().map(|arg| arg.to_string()).collect()))),
            ConfigOption::ExplicitSource(Source::Env(HashMap::new())),
        ]);
        Config::from_internal(InternalConfig::parse_options(options)?)
    }

    #[test]
    fn test_only_trace_given() -> Result<()> {
        let config = parse_args(&["--trace", "x.trace"])?;
        assert_eq!(config.trace, PathBuf::from("x.trace"));
        assert_eq!(config.source_name, "x.c");
        assert_eq!(config.output_dir, None);
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert!(!config.no_tables);
        Ok(())
    }

    #[test]
    fn test_all_options_given() -> Result<()> {
        let config = parse_args(&[
            "-t", "traces/sample.trace",
            "-s", "prog.c",
            "-o", "out",
            "-l", "debug",
            "--no_tables", "true",
        ])?;
        assert_eq!(config.source_name, "prog.c");
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert!(config.no_tables);
        Ok(())
    }

    #[test]
    fn test_bad_options_are_rejected() {
        assert!(parse_args(&["--trace", "x.trace", "--log_level", "loud"]).is_err());
        assert!(parse_args(&[]).is_err());
    }

    #[test]
    fn test_default_source_name() {
        assert_eq!(default_source_name(Path::new("traces/loop.trace")), "loop.c");
        assert_eq!(default_source_name(Path::new("prog")), "prog.c");
        assert_eq!(default_source_name(Path::new("/")), "input.c");
    }
}
