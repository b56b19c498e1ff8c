#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use daedalus_engine::{
    IdeConfig, KeybindConfig, LiteralDigits, Opcode, PaletteIndex, ProgramGrid, Signedness, decode_literal, decode_literal_canonical, encode_literal,
    formats::{self, ImageFormat},
};
use flexi_logger::Logger;
use num_bigint::BigInt;

#[derive(Parser, Debug)]
#[command(version, about = "Encode and inspect Daedalus programs", long_about = None)]
pub struct Args {
    /// Settings file to use instead of the stored one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode an integer as literal digits
    Encode {
        #[arg(allow_hyphen_values = true)]
        value: BigInt,
        #[arg(short, long)]
        signed: bool,
    },
    /// Decode literal digits, written most significant first
    Decode {
        digits: LiteralDigits,
        #[arg(short, long)]
        signed: bool,
        /// Reject digit sequences with redundant padding
        #[arg(long)]
        strict: bool,
    },
    /// Write the default program to an image
    New { output: PathBuf },
    /// Load a program image and list its cells
    Inspect { input: PathBuf },
    /// Show the keybind grid
    Keys {
        /// qwerty, colemak, colemakdh or dvorak
        #[arg(short, long)]
        layout: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let spec = if args.verbose { "debug" } else { "info" };
    let _logger = Logger::try_with_env_or_str(spec)?.log_to_stderr().start()?;

    match args.command {
        Command::Encode { value, signed } => {
            let digits = encode_value(&value, signed)?;
            println!("{digits}");
            println!("{:?}", digits.raw_digits());
        }
        Command::Decode { digits, signed, strict } => {
            println!("{}", decode_digits(&digits, signed, strict)?);
        }
        Command::New { output } => {
            let format = ImageFormat::from_path(&output).unwrap_or(ImageFormat::Png);
            format.save_program(&ProgramGrid::with_default_program(), &output)?;
        }
        Command::Inspect { input } => {
            let grid = formats::load_program(&input)?;
            match grid.bounding_box() {
                Some(bounds) => println!("{} cells, bounds {bounds}", grid.len()),
                None => println!("empty program"),
            }
            for (pos, index) in grid.sorted_cells() {
                match Opcode::from_index(index) {
                    Some(op) => println!("{pos}: {index} {op}"),
                    None => println!("{pos}: {index}"),
                }
            }
        }
        Command::Keys { layout } => {
            let layout = match layout {
                Some(name) => KeybindConfig::from_name(&name).ok_or_else(|| anyhow::anyhow!("unknown keybind layout '{name}'"))?,
                None => load_config(args.config.as_ref())?.keybind_config,
            };
            println!("{layout}");
            let keys: Vec<_> = PaletteIndex::all().map(|index| layout.index_to_key(index)).collect();
            for row in keys.chunks(4) {
                println!("{}", row.join(" "));
            }
        }
    }
    Ok(())
}

fn encode_value(value: &BigInt, signed: bool) -> anyhow::Result<LiteralDigits> {
    let digits = encode_literal(value, Signedness::from(signed));
    if digits.is_empty() {
        anyhow::bail!("{value} can't be written as unsigned literal");
    }
    Ok(digits)
}

fn decode_digits(digits: &LiteralDigits, signed: bool, strict: bool) -> anyhow::Result<BigInt> {
    let signedness = Signedness::from(signed);
    if strict {
        Ok(decode_literal_canonical(digits, signedness)?)
    } else {
        Ok(decode_literal(digits, signedness)?)
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<IdeConfig> {
    match path {
        Some(path) => Ok(IdeConfig::load_from(path)?),
        None => Ok(IdeConfig::load_or_default()),
    }
}
