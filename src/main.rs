use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use logo_icons::{FitMode, IconJob, run_job};

#[derive(Debug, Parser)]
#[command(
    name = "logo-icons",
    about = "Generate a PWA icon and favicons from a logo"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print the job as JSON instead of running it.
    #[arg(long, global = true)]
    print_job: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Logo centered at 65% of a transparent 512px square, saved as PNG.
    Pwa(Overrides),
    /// Multi-size ICO downsampled from the padded PWA icon.
    Favicon(Overrides),
    /// Multi-size ICO from the logo at 95% of a 256px square.
    FaviconOptimized(Overrides),
    /// PWA icon followed by the favicon built from it.
    All,
    /// Run a job described by a JSON profile.
    Run {
        /// Path to the profile.
        #[arg(long, value_name = "FILE")]
        profile: PathBuf,
    },
}

#[derive(Debug, Args)]
struct Overrides {
    /// Source image (PNG or SVG).
    #[arg(short, long, value_name = "FILE")]
    source: Option<PathBuf>,

    /// Output file.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// How logos taller than wide are sized.
    #[arg(long, value_enum)]
    fit: Option<FitArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FitArg {
    Contain,
    Overflow,
}

impl From<FitArg> for FitMode {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Contain => FitMode::Contain,
            FitArg::Overflow => FitMode::Overflow,
        }
    }
}

impl Overrides {
    fn apply(self, mut job: IconJob) -> IconJob {
        if let Some(source) = self.source {
            job = job.with_source(source);
        }
        if let Some(output) = self.output {
            job = job.with_output(output);
        }
        if let Some(fit) = self.fit {
            job = job.with_fit(fit.into());
        }
        job
    }
}

fn jobs(command: Command) -> logo_icons::Result<Vec<IconJob>> {
    Ok(match command {
        Command::Pwa(overrides) => vec![overrides.apply(IconJob::pwa())],
        Command::Favicon(overrides) => vec![overrides.apply(IconJob::favicon())],
        Command::FaviconOptimized(overrides) => {
            vec![overrides.apply(IconJob::favicon_optimized())]
        }
        Command::All => vec![IconJob::pwa(), IconJob::favicon()],
        Command::Run { profile } => vec![IconJob::from_file(&profile)?],
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let jobs = match jobs(cli.command) {
        Ok(jobs) => jobs,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    for job in &jobs {
        if cli.print_job {
            match job.to_json_pretty() {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            }
            continue;
        }

        match run_job(job) {
            Ok(path) => println!("Successfully created {}", path.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
