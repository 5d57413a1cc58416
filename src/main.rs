//! CLI driver: picks an execution mode and runs one Brainfuck program file.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, ValueEnum};

use bfjit::exec::compiler::NativeCompiler;
use bfjit::exec::interp::Interpreter;
use bfjit::exec::jit::JitCoordinator;
use bfjit::exec::Executor;
use bfjit::io::{FramePacer, IoAdapter, StdIo};
use bfjit::program::Program;

/// Execution strategy, named after the original `--mode` values.
#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Direct interpreter.
    I,
    /// Ahead-of-time native compiler ("compile and go").
    Cag,
    /// Hot-loop JIT coordinator.
    Jit,
}

#[derive(Parser)]
#[command(name = "bf", about = "A tiered Brainfuck execution engine")]
struct Cli {
    /// Execution strategy: i (interpreter), cag (ahead-of-time compiler), jit
    #[arg(long, value_enum, default_value = "i")]
    mode: Mode,

    /// Insert a Frame Pacer limiting cursor-home frames to N per second
    #[arg(long)]
    fps: Option<u32>,

    /// Log every Frame Pacer frame at debug level
    #[arg(long)]
    fps_log: bool,

    /// Brainfuck program file
    program: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // `-?` is not a form clap's derive API generates on its own; handled
    // up front rather than folded into `Cli` to keep the derive struct
    // matching the documented `-h`/`--help`/`-?` triple exactly.
    if std::env::args().any(|arg| arg == "-?") {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        log::error!("{err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let text = fs::read(&cli.program)
        .with_context(|| format!("reading program file {}", cli.program.display()))?;
    let program = Program::parse(&text)?;

    match cli.fps {
        Some(fps) => {
            let mut io = FramePacer::new(StdIo::new(), fps, cli.fps_log);
            dispatch(cli.mode, &program, &mut io)
        }
        None => {
            let mut io = StdIo::new();
            dispatch(cli.mode, &program, &mut io)
        }
    }
}

/// Build the chosen executor and run it to completion over `io`.
///
/// Generic over `IO` rather than boxing an `IoAdapter` trait object: the
/// Native Compiler and JIT Coordinator both need a concrete `IO` type to
/// generate the trampoline functions their compiled code calls into.
fn dispatch<IO: IoAdapter>(mode: Mode, program: &Program<'_>, io: &mut IO) -> anyhow::Result<()> {
    match mode {
        Mode::I => {
            Interpreter::new(program).run(io);
        }
        Mode::Cag => {
            NativeCompiler::new(program)
                .context("compiling program ahead of time")?
                .run(io);
        }
        Mode::Jit => {
            JitCoordinator::new(program).run(io);
        }
    }
    Ok(())
}
