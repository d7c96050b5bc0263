//! A thin demonstration harness for `numerobis-runtime`.
//!
//! Adapted from the teacher's `vex/src/main.rs`: that binary glued a real
//! assembler and loader together behind `clap` and handed the result to
//! the VCPU interpreter. This crate has no frontend to glue — lexing,
//! parsing and code generation are explicit Non-goals of the library it
//! drives (spec.md §1) — so it calls the runtime's constructors directly,
//! the way compiled code would, and walks through the worked scenarios
//! from spec.md §8.

use std::rc::Rc;

use clap::{Parser, Subcommand};

use numerobis_runtime::location::Location;
use numerobis_runtime::source_registry;
use numerobis_runtime::units::table::{demo_ids, DemoUnitTable};
use numerobis_runtime::units::Unit;
use numerobis_runtime::value::{binop, ListValue, Number, NumString, OpKind};
use numerobis_runtime::{builtins, init, Value};

#[derive(Parser)]
#[command(
    name = "numerobis-demo",
    about = "Drives the numerobis core runtime through the worked scenarios in spec.md \u{a7}8"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the arithmetic, conversion and container scenarios (prints to stdout).
    Scenarios,
    /// Deliberately trigger an out-of-bounds list index, to show the
    /// raiser's two-line header and highlighted source excerpt. Always
    /// terminates the process with exit status 1 — this is the runtime's
    /// only error-propagation path (spec.md \u{a7}7).
    TriggerIndexError,
    /// Echo a single integer quantity tagged with a named unit, e.g.
    /// `numerobis-demo echo 5 m`. An unrecognized unit name is a CLI usage
    /// mistake, not a running-program fault, so it is reported as an
    /// ordinary error on stderr with exit status 2 rather than going
    /// through the runtime's own `u_throw` diagnostics.
    Echo { value: i64, unit: String },
}

fn meter() -> Unit {
    Unit::identifier("m", demo_ids::METER)
}
fn second() -> Unit {
    Unit::identifier("s", demo_ids::SECOND)
}
fn decibel() -> Unit {
    Unit::identifier("dB", demo_ids::DECIBEL)
}

fn setup() {
    init();
    builtins::set_unit_table(Rc::new(DemoUnitTable));
}

fn run_scenarios() {
    setup();
    let table = DemoUnitTable;

    // 1. echo 2 m + 3 m  ->  5 m
    let sum = binop(&Number::int(2, meter()), &Number::int(3, meter()), OpKind::Add, &table);
    println!("1: echo 2 m + 3 m           => {}", Value::Number(sum).render(Default::default(), &table));

    // 2. echo (2 m) * (3 s)  ->  6 m*s
    let product = binop(&Number::int(2, meter()), &Number::int(3, second()), OpKind::Mul, &table);
    println!("2: echo (2 m) * (3 s)       => {}", Value::Number(product).render(Default::default(), &table));

    // 3. echo (10 m) / (2 s)  ->  5 m/s
    let quotient = binop(&Number::int(10, meter()), &Number::int(2, second()), OpKind::Div, &table);
    println!("3: echo (10 m) / (2 s)      => {}", Value::Number(quotient).render(Default::default(), &table));

    // 4. echo convert(1000 m, km)  ->  1 km
    //
    // `Number::convert` only performs real work when the target unit is
    // `ONE` (spec.md \u{a7}9's Open Question, resolved literally in
    // `DESIGN.md`): a non-`ONE` target is a retag, not a rescale. Real
    // cross-unit rescaling is a compiler-supplied base-unit coefficient
    // table this runtime never sees, so this demo shows the one leg the
    // runtime does own — stripping `m` down to its dimensionless
    // reference value — rather than fabricating the compiler's other half.
    let thousand_meters = Number::int(1000, meter());
    let stripped = thousand_meters.convert(&Unit::one(), &table);
    println!(
        "4: echo convert(1000 m, ONE) => {} (compiler-level coefficients then re-express this as \"1 km\")",
        Value::Number(stripped).render(Default::default(), &table)
    );

    // 5. echo convert(0 dB + 3 dB, dB)  ->  3 dB
    let db_sum = binop(&Number::int(0, decibel()), &Number::int(3, decibel()), OpKind::DAdd, &table);
    let converted = db_sum.convert(&decibel(), &table);
    println!("5: echo 0 dB +. 3 dB        => {}", Value::Number(converted).render(Default::default(), &table));

    // 6. echo [1, "x", [2,3]]  ->  [1, "x", [2, 3]]
    let nested = ListValue::new(vec![Value::Number(Number::int(2, Unit::one())), Value::Number(Number::int(3, Unit::one()))]);
    let list = ListValue::new(vec![
        Value::Number(Number::int(1, Unit::one())),
        Value::String(NumString::new("x")),
        Value::List(nested),
    ]);
    println!("6: echo [1, \"x\", [2,3]]   => {}", Value::List(list).render(Default::default(), &table));

    // 7. x = "héllo"; echo x[1]  ->  é
    let greeting = NumString::new("héllo");
    let loc = Location::point(1, 1);
    println!("7: echo \"h\u{e9}llo\"[1]        => {}", greeting.get(1, &loc).as_string());

    // 8. echo "ab"[::-1]  ->  ba
    let ab = NumString::new("ab");
    println!("8: echo \"ab\"[::-1]         => {}", ab.slice(None, None, Some(-1)).as_string());
}

fn run_trigger_index_error() -> ! {
    setup();
    let source = "echo [1, 2, 3][5]\n";
    source_registry::register_program("<demo>", source);
    source_registry::set_current_file(0);

    let list = ListValue::new(vec![
        Value::Number(Number::int(1, Unit::one())),
        Value::Number(Number::int(2, Unit::one())),
        Value::Number(Number::int(3, Unit::one())),
    ]);
    // Column span of the `5` inside `[1, 2, 3][5]`.
    let span = Location::new(1, 16, 1, 16);
    list.get(5, &span);
    unreachable!("list.get raises and terminates the process before returning");
}

fn run_echo(value: i64, unit_name: &str) -> Result<(), numerobis_runtime::units::table::UnitNameError> {
    setup();
    let table = DemoUnitTable;
    let id = DemoUnitTable::id_for(unit_name)?;
    let unit = Unit::identifier(unit_name, id);
    let n = Value::Number(Number::int(value, unit));
    println!("{}", n.render(Default::default(), &table));
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Scenarios) {
        Command::Scenarios => run_scenarios(),
        Command::TriggerIndexError => run_trigger_index_error(),
        Command::Echo { value, unit } => {
            if let Err(e) = run_echo(value, &unit) {
                eprintln!("error: {e}");
                std::process::exit(2);
            }
        }
    }
}
