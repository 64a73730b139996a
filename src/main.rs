use std::process::ExitCode;

fn main() -> ExitCode {
    match frontrouter::cli::run_cli() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
