use anyhow::{Context, Result};
use calculator::interpreter::grammar::calculator_grammar;
use calculator::interpreter::syntax::expression_tree::Expression;
use calculator::interpreter::{parse, ParserMode};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::{debug, info, warn};
use std::io;
use std::io::{BufRead, Write};
use string_builder::Builder;

const PROMPT: &str = "> ";
const EXIT_COMMAND: &str = "exit";

/// Evaluates an arithmetic expression, or reads expressions one per line when none is given
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate, e.g. "2^3*10" or "fib(10)-3!"
    #[clap(allow_hyphen_values = true)]
    expression: Option<String>,
    /// Which parser to use: normal (expression tree) or rpn (shunting yard)
    #[clap(short, long, default_value = "normal")]
    mode: ParserMode,
    /// Print the parsed expression as a tree
    #[clap(short, long)]
    tree: bool,
    /// Print the expression in postfix notation
    #[clap(short, long)]
    postfix: bool,
    #[clap(flatten)]
    verbose: Verbosity,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    debug!("{:?}", args);

    match &args.expression {
        Some(expression) => match run(&args, expression)? {
            Some(report) => print!("{}", report),
            None => info!("Nothing to evaluate"),
        },
        None => {
            let stdin = io::stdin();
            interact(&args, stdin.lock(), io::stdout())?;
        }
    }
    Ok(())
}

/// Prompts for expressions until the input ends or `exit` is entered.
///
/// A failing expression prints its error and the loop carries on with the next line.
fn interact<R: BufRead, W: Write>(args: &Arguments, input: R, mut output: W) -> Result<()> {
    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line.context("Could not read expression")?,
            None => break,
        };
        if line == EXIT_COMMAND {
            break;
        }

        match run(args, &line) {
            Ok(Some(report)) => writeln!(output, "{}", report)?,
            Ok(None) => {}
            Err(error) => {
                warn!("{:#}", error);
                writeln!(output, "{}", error.root_cause())?;
            }
        }
    }
    Ok(())
}

fn run(args: &Arguments, expression: &str) -> Result<Option<String>> {
    let parsed = parse(expression, args.mode)
        .with_context(|| format!("Could not parse expression: {}", expression))?;
    let tree = match parsed {
        Some(tree) => tree,
        None => return Ok(None),
    };
    let value = tree
        .evaluate()
        .with_context(|| format!("Could not evaluate expression: {}", expression))?;
    build_report(args, &tree, value).map(Some)
}

fn build_report(args: &Arguments, expression: &Expression, value: f64) -> Result<String> {
    let mut builder = Builder::default();

    if args.tree {
        builder.append(expression.to_string());
    }
    if args.postfix {
        let postfix = expression
            .to_postfix(calculator_grammar())
            .context("Could not convert expression to postfix")?;
        builder.append(format!("Postfix: {}\n", postfix));
    }
    builder.append(format!("Result: {}\n", value));

    builder.string().context("Failed to build report")
}
