use std::path::PathBuf;
use std::process;

use cdpregap::hexdump::dump_file;
use cdpregap::pregap::{write_pregap_file, write_zero_fill_file};
use cdpregap::{CdError, CdResult, Msf, Pregap};
use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser, Subcommand};
use env_logger::Env;
use log::{error, info};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate pregap or null data
    Write(WriteArgs),
    /// Print a window of a file in hexadecimal
    Read {
        /// Path to the input file
        path: PathBuf,
        /// Number of bytes to print
        size: u64,
        /// Offset of the first byte to print
        skip: u64,
    },
}

#[derive(clap::Args)]
#[command(group(ArgGroup::new("mode").required(true).args(["audio", "data", "null"])))]
struct WriteArgs {
    /// Audio track pregap
    #[arg(short = 'a')]
    audio: bool,
    /// Data track pregap, requires the timing of the first sector (mm ss ff)
    #[arg(short = 'd')]
    data: bool,
    /// Null data, requires the size in bytes
    #[arg(short = 'n')]
    null: bool,
    /// Path to the output file
    path: PathBuf,
    /// Timing for -d or size for -n
    values: Vec<u64>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => usage_error(e),
    };

    let res = match args.command {
        Command::Write(w) => write(w),
        Command::Read { path, size, skip } => {
            dump_file(&path, size, skip).map(|dump| print!("{}", dump))
        }
    };

    if let Err(e) = res {
        // Always reach stderr, whatever the log filter
        eprintln!("{}", e);
        error!("{}", e);
        process::exit(e.exit_code());
    }
}

fn write(args: WriteArgs) -> CdResult<()> {
    if args.audio {
        expect_values(&args, 0);

        write_pregap_file(&args.path, Pregap::Audio)?;
    } else if args.data {
        expect_values(&args, 3);

        let start = msf_from_values(&args.values)?;

        write_pregap_file(&args.path, Pregap::Data(start))?;
    } else {
        expect_values(&args, 1);

        write_zero_fill_file(&args.path, args.values[0])?;
    }

    info!("Wrote {}", args.path.display());

    Ok(())
}

fn msf_from_values(values: &[u64]) -> CdResult<Msf> {
    let component = |v: u64| u32::try_from(v).map_err(|_| CdError::InvalidMsf);

    Msf::from_binary(
        component(values[0])?,
        component(values[1])?,
        component(values[2])?,
    )
}

fn expect_values(args: &WriteArgs, count: usize) {
    if args.values.len() != count {
        let msg = format!(
            "expected {} value(s) after the path, got {}",
            count,
            args.values.len()
        );

        let mut cmd = Args::command();
        cmd.build();

        let e = match cmd.find_subcommand_mut("write") {
            Some(write) => write.error(ErrorKind::WrongNumberOfValues, msg),
            None => cmd.error(ErrorKind::WrongNumberOfValues, msg),
        };

        usage_error(e);
    }
}

/// Print the clap diagnostic and exit. Help and version requests exit successfully, everything
/// else exits with status 1.
fn usage_error(e: clap::Error) -> ! {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => {
            let _ = e.print();
            process::exit(1);
        }
    }
}
