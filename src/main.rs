use bspent::bsp::{self, Entry, LumpIndex};
use bspent::ent::{self, Loader, Truncation, Writes};
use bspent::BinParseError;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// BSP entities utility
///
/// Reads the entity lump of `.bsp` files, or whole `.ent` files, and writes
/// the entities to standard output.  Progress is logged to standard error,
/// filtered with `RUST_LOG`.
#[derive(Parser, Debug)]
#[command(name = "bspent", version, about, long_about = None)]
struct Cli {
    /// Parse entities and write them in MAP format (default)
    #[arg(short = 'p', long, conflicts_with = "extract")]
    parse: bool,

    /// Write the entity text of BSP files as stored
    #[arg(short = 'x', long)]
    extract: bool,

    /// Fail when a file holds fewer entity bytes than it claims
    #[arg(long)]
    strict: bool,

    /// `.bsp` or `.ent` files
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Parse,
    Extract,
}

#[derive(Debug, Error)]
enum FileError {
    #[error("Unsupported format")]
    Unsupported,

    #[error("Extract mode is not available for entity files")]
    ExtractEnt,

    #[error(transparent)]
    Read(#[from] BinParseError),

    #[error("Error writing output: {0}")]
    Write(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bspent=info")),
        )
        .init();

    let mode = if cli.extract {
        Mode::Extract
    } else {
        Mode::Parse
    };

    let truncation = if cli.strict {
        Truncation::Deny
    } else {
        Truncation::Allow
    };

    let loader = Loader::new().truncation(truncation);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if run(&cli.files, mode, &loader, &mut out) > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Process `files` in order, reporting each failure on stderr.  Returns the
/// number of files that failed.
fn run(
    files: &[PathBuf],
    mode: Mode,
    loader: &Loader,
    out: &mut impl Write,
) -> usize {
    let mut failures = 0;

    for path in files {
        let result = process_file(path, mode, loader, out).and_then(|()| {
            out.flush()?;
            Ok(())
        });

        if let Err(err) = result {
            eprintln!("Error: `{}`: {err}", path.display());
            failures += 1;
        }
    }

    failures
}

fn process_file(
    path: &Path,
    mode: Mode,
    loader: &Loader,
    out: &mut impl Write,
) -> Result<(), FileError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match (extension.as_deref(), mode) {
        (Some("bsp"), Mode::Parse) => {
            let text = read_bsp(path, mode, loader)?;
            write_parsed(path, ent::parse(text), out)
        }
        (Some("bsp"), Mode::Extract) => {
            let text = read_bsp(path, mode, loader)?;
            out.write_all(ent::sanitize(&text))?;
            Ok(())
        }
        (Some("ent"), Mode::Parse) => {
            write_parsed(path, ent::parse(loader.load_file(path)?), out)
        }
        (Some("ent"), Mode::Extract) => Err(FileError::ExtractEnt),
        _ => Err(FileError::Unsupported),
    }
}

fn write_parsed(
    path: &Path,
    entities: ent::Entities,
    out: &mut impl Write,
) -> Result<(), FileError> {
    info!("Validated `{}`", path.display());
    entities.write_to(out)?;
    Ok(())
}

/// Entity lump text of a BSP file, as stored
fn read_bsp(
    path: &Path,
    mode: Mode,
    loader: &Loader,
) -> Result<Vec<u8>, FileError> {
    let file = File::open(path).map_err(|source| BinParseError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    let mut bsp = bsp::Reader::new(&mut reader)?;

    if mode == Mode::Parse {
        log_header(path, bsp.header());
    }

    Ok(bsp.load_entities(loader)?)
}

fn log_header(path: &Path, head: &bsp::Head) {
    info!("Loaded header of file `{}`", path.display());
    info!("Header magic: {}", head.magic_text());
    info!("Header version: {}", head.version());

    if !head.is_ibsp() {
        warn!("Not an IBSP v{} header", bsp::IBSP_VERSION);
    }

    for index in LumpIndex::ALL {
        let Entry { offset, length } = head.entry(index);
        debug!("Lump {index:?} at offset {offset} is {length} bytes long");
    }

    let Entry { offset, length } = head.entry(LumpIndex::Entities);
    info!("Reading {length} bytes from offset {offset} to get entities");
}
