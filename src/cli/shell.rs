//! Numbered interactive menu. Reads from any `BufRead` so it can be driven by tests.

use std::io::{self, BufRead, Write};

use super::command::Command;
use super::runner::{OutputMode, run_with_format};
use super::util::prompt_line;
use crate::bench::{BenchmarkOptions, TargetPredicate};
use crate::generate::GenerationPlan;
use crate::loader::LoadOptions;
use crate::storage::Storage;

pub const MENU: &str = "\
1. Create table
2. Add employee
3. List employees
4. Bulk load synthetic employees
5. Run index benchmark
0. Exit
";

/// What the menu entries 4 and 5 run with.
#[derive(Debug, Clone, Default)]
pub struct ShellSettings {
    pub plan: GenerationPlan,
    pub load: LoadOptions,
    pub target: TargetPredicate,
    pub bench: BenchmarkOptions,
}

/// Loop until `0` or end of input. A failing command prints `error: ...` and the
/// menu comes back; only I/O errors on `input`/`out` end the loop early.
pub fn run_shell<S, R, W>(storage: &S, mut input: R, out: &mut W, settings: &ShellSettings) -> io::Result<()>
where
    S: Storage + ?Sized,
    R: BufRead,
    W: Write,
{
    loop {
        write!(out, "\n{MENU}")?;
        let Some(choice) = prompt_line(&mut input, out, "Select mode: ")? else {
            break;
        };
        let cmd = match choice.trim() {
            "0" => break,
            "1" => Command::CreateTable,
            "2" => {
                let Some(full_name) = prompt_line(&mut input, out, "Full name (Surname Name Patronymic): ")? else {
                    break;
                };
                let Some(birth_date) = prompt_line(&mut input, out, "Birth date (YYYY-MM-DD): ")? else {
                    break;
                };
                let Some(gender) = prompt_line(&mut input, out, "Gender (Male/Female): ")? else {
                    break;
                };
                Command::Add { full_name, birth_date, gender }
            }
            "3" => Command::List,
            "4" => Command::BulkLoad { plan: settings.plan, options: settings.load.clone() },
            "5" => Command::Benchmark { target: settings.target, options: settings.bench },
            "" => continue,
            other => {
                writeln!(out, "Unknown option: {other}")?;
                continue;
            }
        };
        log::debug!("shell: running {cmd:?}");
        if let Err(e) = run_with_format(storage, cmd, OutputMode::Human, out) {
            writeln!(out, "error: {e}")?;
        }
    }
    writeln!(out, "Bye.")?;
    Ok(())
}
