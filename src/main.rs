//! Explicit-state CTL model checker for Kripke-structure models.
//!
//! Takes an input path to a Kripke model and a path to a set of CTL formulae,
//! and model-checks these formulae on that model. Fairness constraints can be
//! supplied through an optional third file. During (and after) evaluation,
//! prints the selected amount of results (default is just an aggregated
//! summary of the satisfying states).

use ctl_model_checker::analysis::analyse_formulae;
use ctl_model_checker::load_inputs::{
    load_and_parse_model, load_fairness_constraints, load_formulae,
};
use ctl_model_checker::result_print::PrintOptions;

use clap::builder::PossibleValuesParser;
use clap::Parser;

use std::path::Path;

/// Structure to collect CLI arguments.
#[derive(Parser)]
#[clap(
    version,
    about = "Explicit-state CTL model checker for Kripke-structure models."
)]
struct Arguments {
    /// Path to a file with the Kripke model.
    model_path: String,

    /// Path to a file with formulae to check.
    formulae_path: String,

    /// Path to a file with fairness constraints (one state set per line).
    #[clap(short, long = "fairness")]
    fairness_path: Option<String>,

    /// Choice of the amount of output regarding computation and results.
    #[clap(short, long, default_value = "short", value_parser = PossibleValuesParser::new(["none", "short", "medium", "full"]))]
    print_option: String,
}

/// Wrapper function to invoke the model checker, works with CLI arguments.
fn main() {
    let args = Arguments::parse();

    // check if given paths are valid
    if !Path::new(args.model_path.as_str()).is_file() {
        println!("{} is not valid file", args.model_path);
        return;
    }
    if !Path::new(args.formulae_path.as_str()).is_file() {
        println!("{} is not valid file", args.formulae_path);
        return;
    }

    // read the model, formulae, and optional fairness constraints
    let res = load_inputs_and_analyse(&args);
    if let Err(e) = res {
        println!("{e}");
    }
}

fn load_inputs_and_analyse(args: &Arguments) -> Result<(), String> {
    let mut kripke = load_and_parse_model(args.model_path.as_str())?;
    let formulae = load_formulae(args.formulae_path.as_str())?;
    let fairness = match &args.fairness_path {
        Some(path) => load_fairness_constraints(path.as_str())?,
        None => Vec::new(),
    };

    let print_opt = match args.print_option.as_str() {
        "none" => PrintOptions::NoPrint,
        "short" => PrintOptions::ShortPrint,
        "medium" => PrintOptions::MediumPrint,
        "full" => PrintOptions::FullPrint,
        // this cant really happen, just here to be exhaustive
        other => return Err(format!("Wrong print option \"{other}\".")),
    };

    analyse_formulae(&mut kripke, formulae, &fairness, print_opt)
}
