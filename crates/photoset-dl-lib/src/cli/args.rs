use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadArgs {
    pub config_path: Option<String>,
    pub output_dir: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Photoset {
        download: DownloadArgs,
        endpoint: Option<String>,
        api_key: Option<String>,
        photoset_id: Option<String>,
        user_id: Option<String>,
    },
    Get {
        download: DownloadArgs,
        urls: Vec<String>,
    },
}

pub struct Args {
    pub command: Command,
}

#[derive(Debug, Parser)]
#[command(
    name = "photoset-dl",
    version,
    about = "Download every photo of a photo set (or a list of URLs) concurrently"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, ClapArgs)]
struct CliDownloadArgs {
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional config file (YAML, TOML or JSON)"
    )]
    config: Option<String>,

    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Directory to save downloads to (default: output.path from the config, else the current directory)"
    )]
    output_dir: Option<String>,

    #[arg(
        long = "timeout",
        value_name = "SECS",
        help = "Abort any single request that takes longer than this"
    )]
    timeout: Option<u64>,
}

impl From<CliDownloadArgs> for DownloadArgs {
    fn from(value: CliDownloadArgs) -> Self {
        Self {
            config_path: value.config,
            output_dir: value.output_dir,
            timeout_secs: value.timeout,
        }
    }
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Fetch the photo set manifest and download every photo in it
    Photoset {
        #[command(flatten)]
        download: CliDownloadArgs,

        #[arg(
            long = "endpoint",
            value_name = "URL",
            help = "Manifest URL, query included",
            conflicts_with_all = ["api_key", "photoset_id", "user_id"]
        )]
        endpoint: Option<String>,

        #[arg(long = "api-key", value_name = "KEY", help = "Flickr API key")]
        api_key: Option<String>,

        #[arg(long = "photoset-id", value_name = "ID", help = "Flickr photo set id")]
        photoset_id: Option<String>,

        #[arg(long = "user-id", value_name = "ID", help = "Flickr id of the photo set owner")]
        user_id: Option<String>,
    },

    /// Download the given URLs; the manifest is not fetched
    Get {
        #[command(flatten)]
        download: CliDownloadArgs,

        #[arg(value_name = "URL", help = "URLs to download")]
        urls: Vec<String>,
    },
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = verbosity_level(cli.verbose);

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy()
                .add_directive("hyper_util=warn".parse().unwrap()),
        )
        .init();

    let command = match cli.command {
        CliCommand::Photoset {
            download,
            endpoint,
            api_key,
            photoset_id,
            user_id,
        } => Command::Photoset {
            download: download.into(),
            endpoint,
            api_key,
            photoset_id,
            user_id,
        },
        CliCommand::Get { download, urls } => Command::Get {
            download: download.into(),
            urls,
        },
    };

    Args { command }
}

fn verbosity_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
