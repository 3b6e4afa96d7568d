mod command;
mod runner;
mod shell;
mod util;

pub use command::Command;
pub use runner::{OutputMode, run, run_with_format};
pub use shell::{MENU, ShellSettings, run_shell};
pub use util::{parse_output_mode, prompt_line};
