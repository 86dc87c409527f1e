use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tapeshift::cipher::{self, Key};
use tapeshift::compiler::{build, Mode};
use tapeshift::loader::MachineLoader;
use tapeshift::{Engine, Outcome};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a machine description file against tape inputs
    Run {
        /// The machine description file (JSON) to execute
        #[clap(short, long)]
        machine: PathBuf,

        /// Seed words, one per tape
        #[clap(short, long)]
        input: Vec<String>,

        /// Print a snapshot of each step of the execution
        #[clap(short, long)]
        trace: bool,
    },

    /// Encode a message with the generated cipher machine
    Encode {
        /// Key: 0..=26 or a single uppercase letter
        #[clap(short, long)]
        key: String,

        /// The message (uppercase letters, spaces, periods)
        message: String,
    },

    /// Decode a message with the generated cipher machine
    Decode {
        /// Key: 0..=26 or a single uppercase letter
        #[clap(short, long)]
        key: String,

        /// The encoded message
        message: String,
    },

    /// Write the generated encoder/decoder descriptions as JSON files
    Generate {
        /// Directory to write machine_encoder.json and machine_decoder.json into
        #[clap(short, long, default_value = "machines")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            machine,
            input,
            trace,
        } => run(&machine, &input, trace),
        Command::Encode { key, message } => {
            let key: Key = key.parse()?;
            println!("{}", cipher::encode(key, &message)?);
            Ok(())
        }
        Command::Decode { key, message } => {
            let key: Key = key.parse()?;
            println!("{}", cipher::decode(key, &message)?);
            Ok(())
        }
        Command::Generate { output } => generate(&output),
    }
}

fn run(path: &Path, input: &[String], trace: bool) -> Result<(), Box<dyn Error>> {
    let machine = Arc::new(MachineLoader::load_file(path)?);
    let mut engine = Engine::new(machine);
    engine.reset(input)?;

    if trace {
        print_snapshot(&engine);
        while engine.step() {
            print_snapshot(&engine);
        }
    }

    let outcome = engine.run();
    match &outcome {
        Outcome::Accepted => println!("Accepted in state {}", engine.state()),
        Outcome::Rejected { state, symbols } => {
            println!("Rejected in state {} reading {:?}", state, symbols)
        }
        Outcome::BudgetExhausted => println!(
            "Step budget exhausted after {} steps",
            engine.step_count()
        ),
    }

    println!("Steps: {}", engine.step_count());
    for index in 0..engine.machine().tape_count() {
        println!("Tape {}: {}", index, engine.read_tape(index, true)?);
    }

    Ok(())
}

fn print_snapshot(engine: &Engine) {
    let snapshot = engine.snapshot();
    println!(
        "Step: {}, State: {}, Heads: {:?}, Tapes: [{}]",
        snapshot.step_count,
        snapshot.state,
        snapshot.heads,
        snapshot.tapes.join(", ")
    );
}

fn generate(output: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(output)?;

    for (mode, file_name) in [
        (Mode::Encode, "machine_encoder.json"),
        (Mode::Decode, "machine_decoder.json"),
    ] {
        let path = output.join(file_name);
        fs::write(&path, build(mode).to_json()?)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
