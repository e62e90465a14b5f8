use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use mobilescore_cli::OutputFormat;
use mobilescore_cli::commands::{self, run::RunArgs};

#[derive(Parser)]
#[command(name = "mobilescore")]
#[command(author, version, long_about = None)]
#[command(
    about = "Compare PageSpeed Insights performance metrics across websites",
    long_about = "mobilescore audits a list of URLs with the PageSpeed Insights API, \
                  writes the scores and timing metrics to a CSV report, and renders \
                  a radar chart comparing the sites as a standalone HTML page."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format for the run summary (json, table, pretty)
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit URLs and write the CSV report and radar chart
    Run(RunArgs),

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:\n  \
                            bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n  \
                            bash: mobilescore completion --shell bash >> ~/.bashrc\n  \
                            zsh:  mobilescore completion --shell zsh > \"${fpath[1]}/_mobilescore\"\n  \
                            fish: mobilescore completion --shell fish > ~/.config/fish/completions/mobilescore.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Run(args) => commands::run::execute(args, cli.format),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new(
            "mobilescore=debug,mobilescore_cli=debug,mobilescore_core=debug,mobilescore_client=debug",
        )
    } else {
        EnvFilter::new("mobilescore=info,mobilescore_cli=info,mobilescore_core=info,mobilescore_client=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
