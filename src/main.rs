#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wraith::provision::{default_bin_dir, default_vendor_dir, Provisioner, Tool};

#[derive(Parser)]
#[command(name = "wraith")]
#[command(about = "CasperJS automation toolchain", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a tool release and link it into the binary directory
    Install {
        /// Tool to install
        tool: ToolArg,

        /// Shared binary directory (defaults to ~/.wraith/bin)
        #[arg(long)]
        bin_dir: Option<PathBuf>,

        /// Download/extract directory (defaults to ~/.wraith/vendor)
        #[arg(long)]
        vendor_dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ToolArg {
    Casperjs,
    Phantomjs,
    Slimerjs,
}

impl From<ToolArg> for Tool {
    fn from(tool: ToolArg) -> Self {
        match tool {
            ToolArg::Casperjs => Tool::CasperJs,
            ToolArg::Phantomjs => Tool::PhantomJs,
            ToolArg::Slimerjs => Tool::SlimerJs,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so piped output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wraith=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Install {
            tool,
            bin_dir,
            vendor_dir,
        } => {
            let tool: Tool = tool.into();
            let provisioner = Provisioner::new(
                bin_dir.unwrap_or_else(default_bin_dir),
                vendor_dir.unwrap_or_else(default_vendor_dir),
            );
            let link = provisioner.install(tool)?;
            println!(
                "Installed {} {} at {}",
                tool.name(),
                tool.version(),
                link.display()
            );
        }
    }

    Ok(())
}
