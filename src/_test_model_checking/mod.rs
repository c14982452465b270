//! **(internal)** Several complex test scenarios for the model checking
//! procedure, exercising whole formulae end to end.

mod _test_basic_scenarios;
mod _test_fairness;
mod _test_formula_equivalences;
mod _test_util;
