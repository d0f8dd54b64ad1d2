use std::process::ExitCode;

use dbus_typename::{cli, logging};

fn main() -> ExitCode {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = logging::init_logging(command_line_interface.verbosity()) {
        eprintln!("{error:#}");
    }
    match command_line_interface.run() {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}
