use std::io::Cursor;
use tmachine::{assemble, Context, RunConfig, Vm};

pub fn image(source: &str) -> Vec<u8> {
    assemble(source).expect("program should assemble")
}

/// Assembles and runs `source` with `input` on the byte-in stream, returning
/// the final register context and everything written to the byte-out stream.
pub fn run(source: &str, input: &[u8]) -> (Context, Vec<u8>) {
    let image = image(source);
    let mut output = Vec::new();
    let mut vm = Vm::new(Cursor::new(input.to_vec()), &mut output, RunConfig::default());
    vm.load(&image).expect("image should fit in memory");
    vm.run();
    let ctx = vm.context().clone();
    (ctx, output)
}

/// Like `run`, but keeps the whole machine so memory can be inspected.
pub fn run_vm(image: &[u8], input: &[u8]) -> Vm<Cursor<Vec<u8>>, Vec<u8>> {
    let mut vm = Vm::new(Cursor::new(input.to_vec()), Vec::new(), RunConfig::default());
    vm.load(image).expect("image should fit in memory");
    vm.run();
    vm
}
