//! Print results of the computation, either aggregated summaries only, or the
//! full satisfying-state sets.

use crate::graph::StateSet;
use crate::kripke::Kripke;

use std::io::Write;
use std::time::SystemTime;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Amount of output to print during and after the computation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrintOptions {
    NoPrint,
    ShortPrint,
    MediumPrint,
    FullPrint,
}

/// Print the given text, but only if the correct print options are selected
/// (medium or full). This simplifies the code regarding printing (no
/// redundant if statements).
pub(crate) fn print_if_allowed(text: String, print_options: PrintOptions) {
    if print_options == PrintOptions::NoPrint || print_options == PrintOptions::ShortPrint {
        return;
    }
    println!("{}", text)
}

/// Print general info about the resulting satisfying set: its cardinality,
/// the number of satisfied initial states, and the computation time.
pub(crate) fn summarize_results(kripke: &Kripke, results: &StateSet, start_time: SystemTime) {
    println!(
        "Time to eval formula: {}ms",
        start_time.elapsed().unwrap().as_millis()
    );
    println!("{} satisfying states in total", results.len());
    println!(
        "{} of {} initial states satisfied",
        kripke.initial_states().intersection(results).count(),
        kripke.initial_states().len()
    );
    println!("-----");
}

/// Print the general info about the resulting set and then print every state,
/// coloured by membership (satisfying states green, the rest red).
/// If `show_labels` is true, each state's atomic propositions are appended.
pub(crate) fn print_results_full(
    kripke: &Kripke,
    results: &StateSet,
    start_time: SystemTime,
    show_labels: bool,
) {
    // first print general summarizing information
    summarize_results(kripke, results, start_time);

    let mut stdout = StandardStream::stdout(ColorChoice::Always);
    for state in kripke.states() {
        if results.contains(&state) {
            stdout
                .set_color(ColorSpec::new().set_fg(Some(Color::Green)))
                .unwrap();
            write!(&mut stdout, " {state}").unwrap();
        } else {
            stdout
                .set_color(ColorSpec::new().set_fg(Some(Color::Red)))
                .unwrap();
            write!(&mut stdout, "~{state}").unwrap();
        }
        if show_labels {
            let labels = kripke
                .labels(state)
                .map(|aps| aps.iter().cloned().collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            write!(&mut stdout, " {{{labels}}}").unwrap();
        }
        writeln!(&mut stdout).unwrap();
    }
    stdout
        .set_color(ColorSpec::new().set_fg(Some(Color::White)))
        .unwrap();
    println!("-----");
}
