#[macro_use]
extern crate clap;

use clap::Arg;
use linker::object::parse_object;
use linker::{link, MemoryLayout, OutputFormat};
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
enum IOErrorContext {
    ReadInput,
    WriteOutput,
}

#[derive(Debug)]
enum Error {
    Io(std::io::Error, IOErrorContext, PathBuf),
    Object(linker::error::ObjectParseError, PathBuf),
    BadInteger(String),
    BadFormat(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, context, path) => write!(
                f,
                "{} file \"{}\" failed: {}",
                match context {
                    IOErrorContext::ReadInput => "Reading input",
                    IOErrorContext::WriteOutput => "Writing output",
                },
                path.display(),
                err
            ),
            Error::Object(err, path) => write!(f, "parsing object \"{}\" failed: {}", path.display(), err),
            Error::BadInteger(s) => write!(f, "\"{}\" is not a valid address", s),
            Error::BadFormat(s) => write!(f, "\"{}\" is not a known output format (use bin or hex)", s),
        }
    }
}

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("OBJECTS")
                .help("Sets the object files to link")
                .required(true)
                .multiple(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("OUTPUT")
                .required(true)
                .help("Sets the linked image's output path"),
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .takes_value(true)
                .value_name("FORMAT")
                .default_value("bin")
                .help("Sets the output format: bin or hex"),
        )
        .arg(
            Arg::with_name("text-addr")
                .long("text-addr")
                .takes_value(true)
                .value_name("ADDR")
                .help("Sets the base address of .text"),
        )
        .arg(
            Arg::with_name("data-addr")
                .long("data-addr")
                .takes_value(true)
                .value_name("ADDR")
                .help("Sets the base address of .data"),
        )
        .get_matches();

    let objects: Vec<&str> = matches.values_of("OBJECTS").unwrap().collect();
    let output = matches.value_of("output").unwrap();
    let format = matches.value_of("format").unwrap();
    let text_addr = matches.value_of("text-addr");
    let data_addr = matches.value_of("data-addr");

    if let Err(err) = run(&objects, output, format, text_addr, data_addr) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn parse_addr(text: &str) -> Result<u32, Error> {
    linker::object::parse_int(text).map_err(|_| Error::BadInteger(text.to_string()))
}

/// Reads every object, links them, and writes the image. Per §6 the
/// linker's exit code is 0 regardless of warnings — only a hard failure
/// to read an object or write the output causes a non-zero exit.
fn run(
    object_paths: &[&str],
    output: &str,
    format: &str,
    text_addr: Option<&str>,
    data_addr: Option<&str>,
) -> Result<(), Error> {
    let format = match format {
        "bin" => OutputFormat::Bin,
        "hex" => OutputFormat::Hex,
        other => return Err(Error::BadFormat(other.to_string())),
    };

    let text_addr = text_addr.map(parse_addr).transpose()?;
    let data_addr = data_addr.map(parse_addr).transpose()?;
    let layout = match (text_addr, data_addr) {
        (Some(t), Some(d)) => MemoryLayout::new(t, d),
        (Some(t), None) => MemoryLayout::new(t, MemoryLayout::default().data_addr),
        (None, Some(d)) => MemoryLayout::new(MemoryLayout::default().text_addr, d),
        (None, None) => MemoryLayout::default(),
    };

    println!("Linking {} object file(s)...", object_paths.len());

    let mut objects = Vec::with_capacity(object_paths.len());
    for &path in object_paths {
        let p = PathBuf::from(path);
        let source = fs::read_to_string(&p)
            .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, p.clone()))?;
        let object = parse_object(path, &source).map_err(|err| Error::Object(err, p.clone()))?;
        objects.push(object);
    }

    let total_text: usize = objects
        .iter()
        .filter_map(|o| o.sections.get(".text"))
        .map(|s| s.data.len())
        .sum();
    println!("Merged sections: .text = {} byte(s)", total_text);

    let result = link(&objects, &layout, format);

    println!(
        "Assigned addresses: .text = 0x{:08X}, .data = 0x{:08X}, .bss = 0x{:08X}",
        layout.text_addr, layout.data_addr, layout.bss_addr
    );

    for diagnostic in &result.diagnostics {
        println!("{}", diagnostic);
    }

    let output_path = PathBuf::from(output);
    fs::write(&output_path, &result.bytes)
        .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, output_path))?;

    Ok(())
}
