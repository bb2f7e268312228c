use std::{fs, io, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use llk_helper::grammar::pretty_print::derivation_to_plaintext;
use llk_helper::{AnalyzerConfig, Grammar, LLkParser};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Productions
    Prod,
    /// FIRST_k and FOLLOW_k of every nonterminal
    Ff,
    /// LL(k) parsing table
    Table,
    /// Minimal k only
    K,
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// File containing the grammar (default: stdin)
    file: Option<PathBuf>,

    /// What to print
    #[arg(short, long = "output", value_enum, default_value = "table")]
    outputs: Vec<Output>,

    /// Word to accept or reject, may be repeated
    #[arg(short = 'p', long = "parse", value_name = "WORD")]
    words: Vec<String>,

    /// Give up when the grammar is not LL(k) for any k up to this bound
    #[arg(long, value_name = "K")]
    max_k: Option<usize>,

    /// Print in LaTeX format
    #[arg(short, long, conflicts_with = "json")]
    latex: bool,

    /// Print in JSON format
    #[arg(short, long)]
    json: bool,
}

impl Cli {
    fn render<T>(
        &self,
        t: &T,
        plaintext: impl Fn(&T) -> String,
        latex: impl Fn(&T) -> String,
        json: impl Fn(&T) -> serde_json::Result<String>,
    ) -> serde_json::Result<String> {
        if self.json {
            json(t)
        } else if self.latex {
            Ok(latex(t))
        } else {
            Ok(plaintext(t))
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = match &cli.file {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };

    let grammar = Grammar::parse(&input)?;
    let config = AnalyzerConfig { max_k: cli.max_k };
    let parser = LLkParser::with_config(grammar, &config)?;

    for output in &cli.outputs {
        let text = match output {
            Output::Prod => {
                let t = parser.grammar().to_production_output_vec();
                cli.render(&t, |t| t.to_plaintext(), |t| t.to_latex(), |t| t.to_json())?
            }
            Output::Ff => {
                let t = parser.grammar().to_non_terminal_output_vec(parser.k());
                cli.render(&t, |t| t.to_plaintext(), |t| t.to_latex(), |t| t.to_json())?
            }
            Output::Table => {
                let t = parser.table().to_output();
                cli.render(&t, |t| t.to_plaintext(), |t| t.to_latex(), |t| t.to_json())?
            }
            Output::K => cli.render(
                &parser.k(),
                |k| k.to_string(),
                |k| format!("$k = {}$", k),
                |k| serde_json::to_string(&serde_json::json!({ "k": k })),
            )?,
        };
        println!("{}", text);
    }

    for word in &cli.words {
        match parser.derive(word) {
            Some(derivation) => println!(
                "{}: accepted\n  {}",
                word,
                derivation_to_plaintext(parser.grammar().sentence_symbol(), &derivation)
            ),
            None => println!("{}: rejected", word),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
