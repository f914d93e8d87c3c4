use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use nexus_tags::config::{NexusConfig, log_path};
use nexus_tags::tag::{TagOption, aggregate_options};

#[derive(Parser)]
#[command(name = "nexus-tags")]
#[command(version, about = "List and order container image tags from a Nexus repository")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/nexus-tags/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Query Nexus and print the ordered tag list
    List(ListArgs),
    /// Order repository paths read from a file or stdin, one per line
    Sort {
        file: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Args)]
struct ListArgs {
    #[arg(long)]
    scheme: Option<String>,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    path: Option<String>,
    #[arg(long)]
    repository: Option<String>,
    #[arg(long)]
    component_name: Option<String>,
    #[arg(long)]
    component_version: Option<String>,
    #[arg(long)]
    user: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

impl ListArgs {
    fn apply(&self, config: &mut NexusConfig) {
        let overrides = [
            (&self.scheme, &mut config.endpoint_scheme),
            (&self.path, &mut config.endpoint_path),
            (&self.repository, &mut config.repository),
            (&self.component_name, &mut config.component_name),
        ];
        for (value, target) in overrides {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        let optional_overrides = [
            (&self.host, &mut config.endpoint_host),
            (&self.component_version, &mut config.component_version),
            (&self.user, &mut config.user),
            (&self.password, &mut config.password),
        ];
        for (value, target) in optional_overrides {
            if value.is_some() {
                *target = value.clone();
            }
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn print_options(options: &[TagOption], format: Format) -> anyhow::Result<()> {
    match format {
        Format::Text => {
            for option in options {
                println!("{}", option.name);
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(options)?),
    }
    Ok(())
}

fn read_paths(file: Option<PathBuf>) -> anyhow::Result<Vec<String>> {
    let reader: Box<dyn Read> = match file {
        Some(path) => Box::new(std::fs::File::open(path)?),
        None => Box::new(std::io::stdin()),
    };

    let mut paths = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            paths.push(line.to_string());
        }
    }
    Ok(paths)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = nexus_tags::logging::init(&log_path());

    match cli.command {
        Command::List(args) => {
            let mut config = match &cli.config {
                Some(path) => NexusConfig::load(path)?,
                None => NexusConfig::load_default()?,
            };
            args.apply(&mut config);

            let options = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(nexus_tags::provider::option_values(&config));
            print_options(&options, args.format)
        }
        Command::Sort { file, format } => {
            let paths = read_paths(file)?;
            print_options(&aggregate_options(&paths), format)
        }
    }
}
