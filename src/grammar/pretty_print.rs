use std::collections::{BTreeMap, BTreeSet};

use crowbook_text_processing::escape;
use serde::Serialize;

use super::{
    words::{format_word, format_words},
    Grammar, LLkParsingTable, Nonterminal, Production, Symbol, Word, EMPTY_SET, LAMBDA,
};

/// For math mode.
fn latex_math(s: &str) -> String {
    s.split(" -> ")
        .map(|part| {
            escape::tex(part)
                .replace(LAMBDA, "\\lambda")
                .replace(EMPTY_SET, "\\emptyset")
        })
        .collect::<Vec<_>>()
        .join(" \\rightarrow ")
}

/// For text mode.
fn latex_text(s: &str) -> String {
    escape::tex(s)
        .replace(LAMBDA, "$\\lambda$")
        .replace(EMPTY_SET, "$\\emptyset$")
}

fn align(output: &[Vec<String>]) -> String {
    let width: Vec<usize> = (0..output[0].len())
        .map(|j| {
            output
                .iter()
                .map(|line| line[j].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    output
        .iter()
        .map(|line| {
            line.iter()
                .enumerate()
                .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput {
    pub left: String,
    pub rights: Vec<String>,
}

impl ProductionOutput {
    pub fn to_plaintext(&self, left_width: usize) -> String {
        self.rights
            .iter()
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let right = self
            .rights
            .iter()
            .map(|right| latex_math(right))
            .collect::<Vec<_>>()
            .join(" \\mid ");
        format!("{} & \\rightarrow & {}", escape::tex(self.left.as_str()), right)
    }
}

#[derive(Debug, Serialize)]
pub struct ProductionOutputVec {
    productions: Vec<ProductionOutput>,
}

impl ProductionOutputVec {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.len())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let productions = self
            .nonterminals()
            .iter()
            .map(|nt| self.productions_of(*nt))
            .filter(|prods| !prods.is_empty())
            .map(|prods| ProductionOutput {
                left: prods[0].start.to_string(),
                rights: prods.iter().map(Production::right_to_string).collect(),
            })
            .collect();
        ProductionOutputVec { productions }
    }
}

#[derive(Debug, Serialize)]
struct NonTerminalOutput {
    name: String,
    first: String,
    follow: String,
}

impl NonTerminalOutput {
    fn to_plaintext(&self) -> String {
        format!("{} | {} | {}", self.name, self.first, self.follow)
    }

    fn to_latex(&self) -> String {
        format!(
            "{} & {} & {}",
            escape::tex(self.name.as_str()),
            latex_text(&self.first),
            latex_text(&self.follow),
        )
    }
}

/// FIRST_k and FOLLOW_k of every nonterminal.
#[derive(Debug, Serialize)]
pub struct NonTerminalOutputVec {
    k: usize,
    data: Vec<NonTerminalOutput>,
}

impl NonTerminalOutputVec {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n");

        "\\begin{tabular}{c|c|c}\n".to_string()
            + &format!(
                "Symbol & First$_{{{k}}}$ & Follow$_{{{k}}}$\\\\\\hline\n",
                k = self.k
            )
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl Grammar {
    pub fn to_non_terminal_output_vec(&self, k: usize) -> NonTerminalOutputVec {
        let data = self
            .nonterminals()
            .iter()
            .map(|nt| NonTerminalOutput {
                name: nt.to_string(),
                first: format_words(&self.first_k(k, &[Symbol::Nonterminal(*nt)])),
                follow: format_words(&self.follow_k(k, *nt)),
            })
            .collect();
        NonTerminalOutputVec { k, data }
    }
}

/// Plain view of an [`LLkParsingTable`]: one row per nonterminal, one column
/// per lookahead word.
#[derive(Debug, Serialize)]
pub struct LLkParsingTableOutput {
    k: usize,
    lookaheads: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
}

impl LLkParsingTableOutput {
    pub fn to_plaintext(&self) -> String {
        let mut header: Vec<String> = vec![format!("k = {}", self.k)];
        header.extend(self.lookaheads.iter().cloned());
        let mut output: Vec<Vec<String>> = vec![header];
        for (left, row) in &self.rows {
            let mut line: Vec<String> = vec![left.clone()];
            line.extend(row.iter().cloned());
            output.push(line);
        }
        align(&output)
    }

    pub fn to_latex(&self) -> String {
        let mut header: Vec<String> = vec![format!(
            "\\[\\begin{{array}}{{c{}}}\nk = {}",
            "|l".repeat(self.lookaheads.len()),
            self.k
        )];
        header.extend(
            self.lookaheads
                .iter()
                .map(|w| format!("\\text{{{}}}", latex_text(w))),
        );
        let header = header.join(" & ");

        let output = self
            .rows
            .iter()
            .map(|(left, row)| {
                std::iter::once(escape::tex(left.as_str()).to_string())
                    .chain(row.iter().map(|cell| latex_math(cell)))
                    .collect::<Vec<_>>()
                    .join(" & ")
            })
            .collect::<Vec<_>>()
            .join("\\\\\n");

        header + "\\\\\\hline\n" + &output + "\n\\end{array}\\]"
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl LLkParsingTable {
    pub fn to_output(&self) -> LLkParsingTableOutput {
        let lookaheads: BTreeSet<&Word> = self.rows().values().flat_map(BTreeMap::keys).collect();

        let rows = self
            .rows()
            .iter()
            .map(|(nt, row)| {
                let cells = lookaheads
                    .iter()
                    .map(|w| {
                        row.get(*w)
                            .map(Production::to_string)
                            .unwrap_or_default()
                    })
                    .collect();
                (nt.to_string(), cells)
            })
            .collect();

        LLkParsingTableOutput {
            k: self.k(),
            lookaheads: lookaheads.into_iter().map(|w| format_word(w)).collect(),
            rows,
        }
    }
}

/// Renders a leftmost derivation as `S => aSb => acb`.
pub fn derivation_to_plaintext(start: Nonterminal, derivation: &[Production]) -> String {
    let mut form = vec![Symbol::Nonterminal(start)];
    let mut steps = vec![start.to_string()];
    for production in derivation {
        match production.rewrite_leftmost(&form) {
            Some(next) => form = next,
            None => break,
        }
        steps.push(if form.is_empty() {
            LAMBDA.to_string()
        } else {
            form.iter().map(Symbol::as_char).collect()
        });
    }
    steps.join(" => ")
}
