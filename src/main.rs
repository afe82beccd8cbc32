use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use minus::Pager;
use office_diff::areas::comparison::{Comparison, ComparisonOptions, Outcome};
use office_diff::artifacts::core::PagerWriter;
use office_diff::artifacts::diff::assembler::{AssembleOptions, ErrorPolicy};
use office_diff::artifacts::diff::classification::DiffFilter;
use office_diff::artifacts::diff::diff_entry::DisplayOptions;
use office_diff::artifacts::format::file_kind::{FileKindRegistry, StructuredFormat};
use office_diff::artifacts::format::normalizer::NormalizeOptions;
use office_diff::artifacts::format::xml::DEFAULT_INDENT;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

const FATAL_EXIT_CODE: u8 = 2;

#[derive(Parser)]
#[command(
    name = "office-diff",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Semantic diff for office documents",
    long_about = "Compares two office documents (or any zip-packaged XML trees, or two directories). \
    XML parts are canonicalized before diffing so that whitespace and line wrapping \
    do not show up as changes. Other parts are compared byte for byte.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    diff: DiffArgs,

    #[arg(short, long, action = ArgAction::Count, global = true, help = "Increase log verbosity")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "fmt",
        about = "Print the canonical form of a file",
        long_about = "This command prints the canonical form of one file, exactly as it is fed \
        to the differ. Files that are not structured text are printed unchanged."
    )]
    Fmt {
        #[arg(index = 1)]
        file: PathBuf,
        #[command(flatten)]
        format: FormatArgs,
    },
    #[command(
        name = "cmp",
        about = "Check two files for byte equality",
        long_about = "This command compares two files byte for byte without loading them. \
        It prints nothing and exits with 0 when they are identical, 1 otherwise."
    )]
    Cmp {
        #[arg(index = 1)]
        a: PathBuf,
        #[arg(index = 2)]
        b: PathBuf,
    },
}

#[derive(Args)]
struct FormatArgs {
    #[arg(long, default_value = DEFAULT_INDENT, help = "Indentation unit of canonical XML")]
    indent: String,
    #[arg(
        long = "xml-suffix",
        value_name = "SUFFIX",
        help = "Extra file suffix to treat as XML (repeatable)"
    )]
    xml_suffixes: Vec<String>,
}

impl FormatArgs {
    fn normalize_options(&self) -> NormalizeOptions {
        let mut registry = FileKindRegistry::default();
        for suffix in &self.xml_suffixes {
            registry.add_suffix(StructuredFormat::Xml, suffix);
        }

        NormalizeOptions {
            indent_unit: self.indent.clone(),
            registry,
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Args)]
struct DiffArgs {
    #[arg(index = 1, required = true, help = "Source document, archive or directory")]
    source: Option<PathBuf>,
    #[arg(index = 2, required = true, help = "Target document, archive or directory")]
    target: Option<PathBuf>,
    #[arg(long = "src-prefix", default_value = "a/", help = "Prefix of source paths")]
    src_prefix: String,
    #[arg(long = "dst-prefix", default_value = "b/", help = "Prefix of target paths")]
    dst_prefix: String,
    #[arg(long = "no-prefix", help = "Show paths without any prefix")]
    no_prefix: bool,
    #[arg(
        long = "diff-filter",
        value_parser = parse_diff_filter,
        help = "Only report added (A), deleted (D) or modified (M) files"
    )]
    diff_filter: Option<DiffFilter>,
    #[arg(long, help = "Fail on the first file that cannot be compared")]
    strict: bool,
    #[arg(short, long, default_value_t = 1, help = "Number of files compared in parallel")]
    jobs: usize,
    #[arg(short, long, help = "Write the report to a file instead of stdout")]
    output: Option<PathBuf>,
    #[arg(long = "no-pager", help = "Do not pipe the report into a pager")]
    no_pager: bool,
    #[arg(long, value_enum, default_value = "auto", help = "When to colorize the report")]
    color: ColorChoice,
    #[command(flatten)]
    format: FormatArgs,
}

fn parse_diff_filter(value: &str) -> Result<DiffFilter, String> {
    DiffFilter::try_parse(value).ok_or_else(|| format!("invalid diff filter: {value}"))
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbosity >= 2)
        .with_file(verbosity >= 3)
        .with_line_number(verbosity >= 3)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome> {
    match cli.command {
        Some(Commands::Fmt { file, format }) => {
            let options = ComparisonOptions {
                normalize: format.normalize_options(),
                ..Default::default()
            };
            let comparison = Comparison::new(options, Box::new(std::io::stdout()));

            comparison.fmt(&file)?;
            Ok(Outcome::Equal)
        }
        Some(Commands::Cmp { a, b }) => {
            let comparison = Comparison::new(ComparisonOptions::default(), Box::new(std::io::stdout()));

            comparison.cmp(&a, &b)
        }
        None => diff(cli.diff).await,
    }
}

async fn diff(args: DiffArgs) -> Result<Outcome> {
    let (Some(source), Some(target)) = (&args.source, &args.target) else {
        anyhow::bail!("a source and a target are required");
    };

    let stdout_is_terminal = std::io::stdout().is_terminal();
    let color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => stdout_is_terminal && args.output.is_none(),
    };
    colored::control::set_override(color);

    let options = ComparisonOptions {
        assemble: AssembleOptions {
            display: DisplayOptions {
                source_prefix: args.src_prefix.clone(),
                destination_prefix: args.dst_prefix.clone(),
                no_prefix: args.no_prefix,
            },
            policy: if args.strict {
                ErrorPolicy::Abort
            } else {
                ErrorPolicy::SkipAndContinue
            },
            filter: args.diff_filter.unwrap_or_default(),
        },
        normalize: args.format.normalize_options(),
        jobs: args.jobs,
        color,
    };

    let use_pager = stdout_is_terminal && !args.no_pager && args.output.is_none();
    let pager = Pager::new();
    let writer: Box<dyn std::io::Write> = if use_pager {
        Box::new(PagerWriter::new(pager.clone()))
    } else {
        Box::new(std::io::stdout())
    };

    let comparison = Comparison::new(options, writer);
    let outcome = comparison
        .diff(source, target, args.output.as_deref())
        .await?;

    if use_pager {
        minus::page_all(pager)?;
    }

    Ok(outcome)
}
