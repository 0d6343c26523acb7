//! Keypad Walkthrough
//!
//! Presses a few key sequences on a session and prints the display after
//! each one, including the cases that surprise people:
//! - an operator pressed while another is pending replaces it unresolved
//! - dividing by zero shows `Infinity` instead of failing
//! - `=` straight after an operator reuses the shown operand
//!
//! Run with: cargo run --example keypad_walkthrough

use keycalc::{keypad, Session, State};

fn main() {
    println!("=== Keypad Walkthrough ===\n");
    println!("{}\n", keypad::render());

    let sequences = ["1+2=", "4+5+3=", "12.5×4=", "5÷0=", "5+=", "9±%"];

    for input in sequences {
        let mut session = Session::new();
        let display = session.press_all(input).unwrap().to_string();

        println!(
            "{input:<10} -> {display:<12} ({}{})",
            session.current_state().name(),
            if session.is_error() { ", non-finite" } else { "" }
        );
    }

    println!("\n=== Trace of 4+5+3= ===\n");
    let mut session = Session::new();
    session.press_all("4+5+3=").unwrap();
    for transition in session.history().transitions() {
        println!(
            "{}  {:<15} -> {:<15} {}",
            transition.key,
            transition.from.name(),
            transition.to.name(),
            transition.to.display()
        );
    }

    println!("\n=== Example Complete ===");
}
