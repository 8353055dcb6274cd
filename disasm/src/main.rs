#[macro_use]
extern crate clap;

use clap::Arg;
use disasm::{disassemble, symtab};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
enum IOErrorContext {
    ReadInput,
    ReadSymbolFile,
}

#[derive(Debug)]
enum Error {
    Io(std::io::Error, IOErrorContext, PathBuf),
    BadBaseAddr(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, context, path) => write!(
                f,
                "{} file \"{}\" failed: {}",
                match context {
                    IOErrorContext::ReadInput => "Reading input",
                    IOErrorContext::ReadSymbolFile => "Reading symbol file",
                },
                path.display(),
                err
            ),
            Error::BadBaseAddr(s) => write!(f, "\"{}\" is not a valid base address", s),
        }
    }
}

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the binary image to disassemble")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("base")
                .short("b")
                .long("base")
                .takes_value(true)
                .value_name("ADDR")
                .help("Sets the base address of the image"),
        )
        .arg(
            Arg::with_name("symfile")
                .short("s")
                .long("symbols")
                .takes_value(true)
                .value_name("SYMFILE")
                .help("Sets a symbol file mapping addresses to names"),
        )
        .get_matches();

    let input = matches.value_of("INPUT").unwrap();
    let base = matches.value_of("base");
    let symfile = matches.value_of("symfile");

    if let Err(err) = run(input, base, symfile) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(input: &str, base: Option<&str>, symfile: Option<&str>) -> Result<(), Error> {
    let input_path = PathBuf::from(input);
    let bytes = fs::read(&input_path)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, input_path.clone()))?;

    let base_addr = match base {
        Some(text) => {
            let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
            u32::from_str_radix(digits, 16)
                .or_else(|_| text.parse::<u32>())
                .map_err(|_| Error::BadBaseAddr(text.to_string()))?
        }
        None => 0,
    };

    let symbols: BTreeMap<u32, String> = match symfile {
        Some(path) => {
            let p = PathBuf::from(path);
            let text = fs::read_to_string(&p)
                .map_err(|err| Error::Io(err, IOErrorContext::ReadSymbolFile, p))?;
            symtab::parse_symbol_file(&text)
        }
        None => BTreeMap::new(),
    };

    println!("; Disassembly of {}", input);
    println!("; Base address: 0x{:08X}", base_addr);

    for line in disassemble(&bytes, base_addr, &symbols) {
        if let Some(name) = &line.label {
            println!();
            println!("{}:", name);
        }
        println!("  0x{:08X}: {}", line.address, line.text);
    }

    Ok(())
}
