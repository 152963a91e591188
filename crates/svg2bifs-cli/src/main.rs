use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;
use svg2bifs::dump::{DumpError, DumpFormat, dump};
use svg2bifs::{ConvertOptions, Diagnostic, convert_str};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Convert(svg2bifs::Error),
    Dump(DumpError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Convert(err) => write!(f, "{err}"),
            CliError::Dump(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<svg2bifs::Error> for CliError {
    fn from(value: svg2bifs::Error) -> Self {
        Self::Convert(value)
    }
}

impl From<DumpError> for CliError {
    fn from(value: DumpError) -> Self {
        Self::Dump(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Convert,
    Stats,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    format: DumpFormat,
    out: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    strict: bool,
    verbose: bool,
    pretty: bool,
}

#[derive(Serialize)]
struct StatsOut<'a> {
    width: u32,
    height: u32,
    nodes: usize,
    kinds: BTreeMap<&'static str, usize>,
    diagnostics: &'a [Diagnostic],
}

fn usage() -> &'static str {
    "svg2bifs-cli\n\
\n\
USAGE:\n\
  svg2bifs-cli [convert] [--format xmt|bt|json] [--out <path>] [--width <w>] [--height <h>] [--strict] [--verbose] [<path>|-]\n\
  svg2bifs-cli stats [--pretty] [--strict] [--verbose] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - convert writes next to the input file with the format's extension (.xmt, .bt, .json);\n\
    stdin input is written to stdout. Use --out to pick a path, or --out - for stdout.\n\
  - --width/--height set the scene size used when the root <svg> has no plain size.\n\
  - --strict fails the run if any diagnostic was recorded.\n\
  - Logging follows RUST_LOG; the default is warn (info with --verbose).\n\
"
}

fn parse_dimension<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<u32, CliError> {
    let Some(v) = it.next() else {
        return Err(CliError::Usage(usage()));
    };
    match v.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CliError::Usage(usage())),
    }
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "convert" => args.command = Command::Convert,
            "stats" => args.command = Command::Stats,
            "--strict" => args.strict = true,
            "--verbose" | "-v" => args.verbose = true,
            "--pretty" => args.pretty = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = DumpFormat::from_name(fmt).ok_or(CliError::Usage(usage()))?;
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--width" => args.width = Some(parse_dimension(&mut it)?),
            "--height" => args.height = Some(parse_dimension(&mut it)?),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn default_out_path(input: Option<&str>, ext: &str) -> Option<std::path::PathBuf> {
    match input {
        Some(path) if path != "-" => Some(std::path::PathBuf::from(path).with_extension(ext)),
        _ => None,
    }
}

fn convert_options(args: &Args) -> ConvertOptions {
    let mut options = if args.strict {
        ConvertOptions::strict()
    } else {
        ConvertOptions::lenient()
    };
    if let Some(w) = args.width {
        options.default_width = w;
    }
    if let Some(h) = args.height {
        options.default_height = h;
    }
    options
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let options = convert_options(&args);
    let conversion = convert_str(&text, &options)?;
    tracing::info!(
        nodes = conversion.scene.len(),
        diagnostics = conversion.diagnostics.len(),
        "converted"
    );

    match args.command {
        Command::Convert => {
            let rendered = dump(&conversion.scene, args.format)?;
            let out = match args.out.as_deref() {
                Some("-") => None,
                Some(path) => Some(std::path::PathBuf::from(path)),
                None => default_out_path(args.input.as_deref(), args.format.extension()),
            };
            match out {
                None => print!("{rendered}"),
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    tracing::info!(path = %path.display(), "wrote scene");
                }
            }
            Ok(())
        }
        Command::Stats => {
            let scene = &conversion.scene;
            let stats = StatsOut {
                width: scene.width,
                height: scene.height,
                nodes: scene.len(),
                kinds: scene.kind_counts(),
                diagnostics: &conversion.diagnostics,
            };
            write_json(&stats, args.pretty)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_logging(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
