//! person-demo entry point.
//!
//! Loads the configuration, applies command line overrides and runs the
//! caller sequence against the person provider.

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use person_demo::{run, DemoConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Config file read when `--config` is not given; may be absent.
const DEFAULT_CONFIG_PATH: &str = "person-demo.toml";

/// Native caller for the person provider
#[derive(Parser, Debug)]
#[command(name = "person-demo")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file [default: person-demo.toml, if present]
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// First name passed to person_new
    #[arg(long)]
    first_name: Option<String>,

    /// Last name passed to person_new
    #[arg(long)]
    last_name: Option<String>,

    /// Last name passed to person_update_last_name
    #[arg(long)]
    new_last_name: Option<String>,

    /// Skip the transparent struct demonstration
    #[arg(long)]
    skip_transparent: bool,

    /// Print the final report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Write the effective configuration to this file and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Builds the effective configuration: defaults, then file, then flags.
    fn config(&self) -> anyhow::Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => DemoConfig::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
        };

        if let Some(first_name) = &self.first_name {
            config.person.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            config.person.last_name = last_name.clone();
        }
        if let Some(new_last_name) = &self.new_last_name {
            config.update.last_name = new_last_name.clone();
        }
        if self.skip_transparent {
            config.transparent.enabled = false;
        }

        Ok(config)
    }
}

fn try_main(args: &Args) -> anyhow::Result<()> {
    let config = args.config()?;

    if let Some(path) = &args.write_config {
        config
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote effective configuration to {}", path.display());
        return Ok(());
    }

    info!(
        "Creating person '{}' '{}', new last name '{}'",
        config.person.first_name, config.person.last_name, config.update.last_name
    );

    let report = run(&config).context("caller sequence aborted")?;
    info!(
        "Final person: {} {} ({} callbacks)",
        report.updated.first_name,
        report.updated.last_name,
        report.callbacks.len()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    match try_main(&args) {
        Ok(()) => {
            info!("person-demo exiting normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("person-demo error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_flags_override_file_which_overrides_defaults() {
        let file = config_file(
            r#"
[person]
first_name = "ada"

[update]
last_name = "Green"
"#,
        );
        let path = file.path().to_str().unwrap();

        let args = Args::try_parse_from([
            "person-demo",
            "--config",
            path,
            "--new-last-name",
            "Black",
            "--skip-transparent",
        ])
        .unwrap();
        let config = args.config().unwrap();

        let mut expected = DemoConfig::default();
        expected.person.first_name = "ada".to_string();
        expected.update.last_name = "Black".to_string();
        expected.transparent.enabled = false;
        assert_eq!(config, expected);
    }

    #[test]
    fn test_file_values_kept_without_flags() {
        let file = config_file("[person]\nlast_name = \"Lovelace\"\n");
        let path = file.path().to_str().unwrap();

        let args =
            Args::try_parse_from(["person-demo", "-c", path, "--first-name", "Ada"]).unwrap();
        let config = args.config().unwrap();
        assert_eq!(config.person.first_name, "Ada");
        assert_eq!(config.person.last_name, "Lovelace");
        assert_eq!(config.update.last_name, "Brown");
        assert!(config.transparent.enabled);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let args =
            Args::try_parse_from(["person-demo", "--config", path.to_str().unwrap()]).unwrap();
        assert!(args.config().is_err());
    }

    #[test]
    fn test_write_config_saves_effective_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("written.toml");
        let source = config_file("[update]\nlast_name = \"Green\"\n");

        let args = Args::try_parse_from([
            "person-demo",
            "--config",
            source.path().to_str().unwrap(),
            "--first-name",
            "Ada",
            "--write-config",
            path.to_str().unwrap(),
        ])
        .unwrap();
        try_main(&args).unwrap();

        let written = DemoConfig::load(&path).unwrap();
        assert_eq!(written, args.config().unwrap());
        assert_eq!(written.person.first_name, "Ada");
        assert_eq!(written.update.last_name, "Green");
    }
}
