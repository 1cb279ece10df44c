use clap::Parser;
use tmachine::{disassemble, RunConfig, Vm};

/// Runs a binary image and dumps the final register context.
#[derive(Parser)]
struct Cli {
    /// Binary image to execute.
    #[clap(value_parser)]
    image_path: String,
    /// Print each instruction to stderr as it executes.
    #[clap(long)]
    trace: bool,
    /// Print a disassembly of the image before running it.
    #[clap(long)]
    dump_image: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Cli = Parser::parse();
    let image = std::fs::read(&args.image_path)?;

    if args.dump_image {
        eprintln!("{}", disassemble(&image));
    }

    let config = RunConfig {
        trace_execution: args.trace,
    };
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut vm = Vm::new(stdin.lock(), stdout.lock(), config);
    vm.load(&image)?;
    vm.run();

    // The context dump goes to stderr on every exit path, fault or not, and
    // the process still exits 0; the ef field is the machine's verdict.
    eprint!("{}", vm.context());
    Ok(())
}
