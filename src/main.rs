use std::process::ExitCode;

fn main() -> ExitCode {
    optbind::app::startup::startup()
}
