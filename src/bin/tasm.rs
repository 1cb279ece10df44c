use clap::Parser;
use codespan_reporting::term::{
    self,
    termcolor::{ColorChoice, StandardStream},
};
use std::io::{Read, Write};
use tmachine::{Process, VmDiagnostic};

/// Assembles a source file into a flat binary image.
#[derive(Parser)]
struct Cli {
    /// Source file to assemble, or stdin when omitted.
    #[clap(value_parser)]
    file_path: Option<String>,
    /// Where to write the image, or stdout when omitted.
    #[clap(short, long, value_parser)]
    output: Option<String>,
}

fn emit(err: &tmachine::AsmError, process: &Process) {
    let writer = StandardStream::stderr(ColorChoice::Auto);
    let term_config = term::Config::default();
    drop(term::emit(
        &mut writer.lock(),
        &term_config,
        process.file(),
        &err.to_diagnostic(process),
    ));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Cli = Parser::parse();

    let (source, name) = match &args.file_path {
        Some(path) => (std::fs::read_to_string(path)?, path.as_str()),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            (buf, "<stdin>")
        }
    };

    let image = match tmachine::assemble(&source) {
        Ok(image) => image,
        Err(err) => {
            emit(&err, &Process::new(&source, name));
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(path) => std::fs::write(path, &image)?,
        None => {
            let stdout = std::io::stdout();
            let mut stdout = stdout.lock();
            stdout.write_all(&image)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
