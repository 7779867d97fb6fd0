//! Karnaugh Logic Minimizer - Command Line Interface
//!
//! Reads a PLA file and prints minimal expressions for every output.

use clap::{Parser, ValueEnum};
use karnaugh_logic::pla::{read_table, write_pla};
use karnaugh_logic::qmc::minimize_output;
use karnaugh_logic::FormulaKind;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Clone, ValueEnum)]
enum Command {
    /// Minimize every output and print its expression (default)
    Minimize,
    /// Minimize every output and print the reduced cover as PLA text
    Pla,
    /// Echo the parsed table back as PLA text
    Echo,
    /// Print statistics about the table
    Stats,
}

#[derive(Debug, Clone, ValueEnum)]
enum Representation {
    /// Sum of products
    Dnf,
    /// Product of sums
    Cnf,
}

impl From<Representation> for FormulaKind {
    fn from(val: Representation) -> Self {
        match val {
            Representation::Dnf => FormulaKind::Dnf,
            Representation::Cnf => FormulaKind::Cnf,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "kvmin")]
#[command(about = "Two-level Boolean minimizer over PLA files", long_about = None)]
#[command(version)]
struct Args {
    /// Input PLA file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Subcommand to execute
    #[arg(short = 'D', long = "do", value_enum, default_value = "minimize")]
    command: Command,

    /// Expression representation
    #[arg(short = 'r', long = "repr", value_enum, default_value = "dnf")]
    representation: Representation,

    /// Also list the prime implicants of each output
    #[arg(short = 'p', long = "primes")]
    primes: bool,
}

fn run(args: &Args) -> io::Result<()> {
    let file = File::open(&args.input)?;
    let table = read_table(BufReader::new(file))
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Echo => write_pla(&table, &mut out)?,
        Command::Stats => {
            writeln!(out, "inputs:  {}", table.inputs().len())?;
            writeln!(out, "outputs: {}", table.outputs().len())?;
            writeln!(out, "rows:    {}", table.num_rows())?;
            for (output, name) in table.outputs().iter().enumerate() {
                let ones = table.minterms(output).map(|m| m.len()).unwrap_or(0);
                let dc = table.dont_cares(output).map(|d| d.len()).unwrap_or(0);
                writeln!(out, "{}: {} ones, {} don't-cares", name, ones, dc)?;
            }
        }
        Command::Pla => {
            // The reduced cover is always a sum of products here, one data
            // line per chosen prime implicant per output.
            let mut lines: Vec<String> = Vec::new();
            for output in 0..table.outputs().len() {
                let Some(result) = minimize_output(&table, output, FormulaKind::Dnf) else {
                    continue;
                };
                let mut mask = vec!['0'; table.outputs().len()];
                mask[output] = '1';
                let mask: String = mask.into_iter().collect();
                for term in result.formula.terms() {
                    if term.as_constant() == Some(false) {
                        continue;
                    }
                    let pattern: String = table
                        .inputs()
                        .iter()
                        .map(|var| match term.polarity_of(var) {
                            Some(true) => '1',
                            Some(false) => '0',
                            None => '-',
                        })
                        .collect();
                    lines.push(format!("{} {}", pattern, mask));
                }
            }
            writeln!(out, ".i {}", table.inputs().len())?;
            writeln!(
                out,
                ".ilb {}",
                table.inputs().iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(" ")
            )?;
            writeln!(out, ".o {}", table.outputs().len())?;
            writeln!(
                out,
                ".ob {}",
                table.outputs().iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(" ")
            )?;
            writeln!(out, ".p {}", lines.len())?;
            for line in lines {
                writeln!(out, "{}", line)?;
            }
            writeln!(out, ".e")?;
        }
        Command::Minimize => {
            let kind: FormulaKind = args.representation.clone().into();
            for (output, name) in table.outputs().iter().enumerate() {
                match minimize_output(&table, output, kind) {
                    Some(result) => {
                        writeln!(out, "{} = {}", name, result.formula)?;
                        if args.primes {
                            for prime in &result.primes {
                                writeln!(out, "  {}", prime.pattern())?;
                            }
                        }
                    }
                    None => writeln!(out, "{} = <no result>", name)?,
                }
            }
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("kvmin: {}: {}", args.input.display(), err);
        process::exit(1);
    }
}
