//! Logic Compiler - Command Line Interface
//!
//! Compiles boolean equations over A-F into minimized SOP/POS forms and
//! gate netlists, programs channels from minterm lists and runs scripted
//! verification sequences.

use clap::{Args, Parser, Subcommand};
use logic_compiler::pipeline::{
    Channel, ChannelFailure, ChannelResult, ChannelState, CombinedResult,
    JsonSink, Mode, Pipeline, ResultSink, VerificationReport,
};
use logic_compiler::{Expr, PipelineConfig, PipelineError};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "logicc")]
#[command(about = "Boolean equation compiler and minimizer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    limits: Limits,

    /// Emit one JSON object per line instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Limits {
    /// Maximum expression nesting depth
    #[arg(long, global = true, value_name = "N")]
    max_depth: Option<usize>,

    /// Maximum serialized size of a single-channel netlist in bytes
    #[arg(long, global = true, value_name = "BYTES")]
    max_netlist_bytes: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile one equation
    Compile {
        /// The equation, e.g. "AB' + C"
        expr: String,
        /// Channel to report the result for
        #[arg(short, long, default_value = "X")]
        channel: Channel,
    },
    /// Compile all four channels into one combined view
    Combined {
        #[arg(short, long, default_value = "")]
        x: String,
        #[arg(short, long, default_value = "")]
        y: String,
        #[arg(short, long, default_value = "")]
        z: String,
        #[arg(short, long, default_value = "")]
        w: String,
    },
    /// Recover an equation from a comma-separated minterm list
    Program {
        channel: Channel,
        /// Minterms, e.g. "0, 15, 63"
        minterms: String,
        /// State file to start from; the updated state is printed
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Evaluate channels X and Y over a timed input sequence
    Verify {
        /// State file with `X = ...` lines
        #[arg(short, long)]
        file: PathBuf,
        /// Steps as "mask:duration, mask:duration, ..."
        sequence: String,
    },
    /// Evaluate an equation for one input mask
    Eval {
        expr: String,
        /// Input mask, bit 0 is A
        mask: u64,
    },
    /// Print the parse tree of an equation
    Tree { expr: String },
}

/// Human-readable sink for terminal output
struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> ResultSink for TextSink<W> {
    fn channel_result(&mut self, result: &ChannelResult) -> io::Result<()> {
        writeln!(self.out, "{} ({})", result.target, result.mode)?;
        writeln!(self.out, "  SOP: {}", result.sop)?;
        writeln!(self.out, "  POS: {}", result.pos)?;
        let minterms: Vec<String> = result.minterms.terms().iter().map(u8::to_string).collect();
        writeln!(self.out, "  Minterms: [{}]", minterms.join(", "))?;
        writeln!(
            self.out,
            "  Netlist: {} nodes, {} edges",
            result.netlist.nodes().count(),
            result.netlist.edges().count()
        )
    }

    fn combined_result(&mut self, result: &CombinedResult) -> io::Result<()> {
        writeln!(self.out, "Combined")?;
        for channel in Channel::ALL {
            writeln!(self.out, "  {}: {} minterms", channel, result.minterms(channel).len())?;
        }
        writeln!(self.out, "  Netlist: {} elements", result.elements.len())
    }

    fn channel_failure(&mut self, failure: &ChannelFailure) -> io::Result<()> {
        writeln!(self.out, "{} ({}): error: {}", failure.target, failure.mode, failure.message)
    }

    fn verification(&mut self, report: &VerificationReport) -> io::Result<()> {
        write!(self.out, "{}", report.to_csv())
    }
}

fn run(cli: Cli, sink: &mut dyn ResultSink) -> Result<(), PipelineError> {
    let mut config = PipelineConfig::default();
    if let Some(depth) = cli.limits.max_depth {
        config.max_depth = depth;
    }
    if let Some(bytes) = cli.limits.max_netlist_bytes {
        config.single_netlist.max_bytes = bytes;
    }
    let pipeline = Pipeline::new(config);

    match cli.command {
        Command::Compile { expr, channel } => {
            pipeline.process_equation(channel, &expr, Mode::Program, sink)?;
        }
        Command::Combined { x, y, z, w } => {
            pipeline.send_combined_update([x.as_str(), y.as_str(), z.as_str(), w.as_str()], sink)?;
        }
        Command::Program {
            channel,
            minterms,
            file,
        } => {
            let state = match file {
                Some(path) => ChannelState::load_file(path)?,
                None => ChannelState::new(),
            };
            pipeline.program_from_minterms(channel, &minterms, &state)?;
            let snapshot = state.snapshot();
            let mut stdout = io::stdout().lock();
            for channel in Channel::ALL {
                writeln!(stdout, "{} = {}", channel, snapshot.equation(channel))?;
            }
        }
        Command::Verify { file, sequence } => {
            let state = ChannelState::load_file(file)?;
            pipeline.verify(&state, &sequence, sink)?;
        }
        Command::Eval { expr, mask } => {
            let value = pipeline
                .compile(&expr)?
                .is_some_and(|expr| expr.evaluate(mask));
            println!("{}", u8::from(value));
        }
        Command::Tree { expr } => {
            let expr = Expr::parse(&expr)?;
            println!("{}", expr);
            print!("{}", expr.tree());
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = if cli.json {
        run(cli, &mut JsonSink::new(io::stdout().lock()))
    } else {
        run(cli, &mut TextSink { out: io::stdout().lock() })
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
