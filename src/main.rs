use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{LevelFilter, info};
use passforge::{GenerationRequest, KeystreamRng, evaluate, generate_password, ui};
use rand::RngCore;
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(
    name = "passforge",
    version,
    about = "Random password generator with per-class minimums and a strength meter"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate passwords
    Generate(GenerateArgs),

    /// Rate the strength of a password (prompts when none is given)
    Evaluate { password: Option<String> },
}

#[derive(Args)]
struct GenerateArgs {
    /// Total number of characters
    #[arg(short, long, default_value = "12", allow_hyphen_values = true)]
    length: String,

    /// Minimum number of digits
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    digits: String,

    /// Minimum number of symbols
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    symbols: String,

    /// Minimum number of uppercase letters
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    upper: String,

    /// Minimum number of lowercase letters
    #[arg(short = 'w', long, default_value = "0", allow_hyphen_values = true)]
    lower: String,

    /// Number of passwords to generate
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Derive the random stream from a phrase; the same phrase repeats the output
    #[arg(long)]
    seed: Option<String>,

    /// Print passwords only
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if verbose > 0 {
        let level = match verbose {
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        builder.filter_level(level);
    }

    builder.format_timestamp(None).init();
}

fn display_options(quiet: bool) -> ui::DisplayOptions {
    ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet,
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let request = GenerationRequest::parse(
        &args.length,
        &args.digits,
        &args.symbols,
        &args.upper,
        &args.lower,
    )
    .context("Invalid generation request")?;

    let mut rng: Box<dyn RngCore> = match &args.seed {
        Some(phrase) => {
            info!("using seeded keystream");
            Box::new(KeystreamRng::from_phrase(phrase))
        }
        None => Box::new(rand::rng()),
    };

    let options = display_options(args.quiet);

    for i in 0..args.count {
        if i > 0 && !options.quiet {
            println!();
        }

        let password = generate_password(&request, rng.as_mut());
        let report = evaluate(password.as_str());
        ui::display_password(&password, &report, &options);
    }

    info!(
        "generated {} password(s) of {} chars",
        args.count,
        request.total()
    );

    Ok(())
}

fn run_evaluate(password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => Zeroizing::new(p),
        None => ui::prompt_password()?,
    };

    let report = evaluate(password.as_str());
    ui::display_report(&report, &display_options(false));

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Evaluate { password } => run_evaluate(password),
    }
}
