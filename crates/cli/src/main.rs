use std::process::ExitCode;

fn main() -> ExitCode {
    freightdesk_observability::init();

    match freightdesk_cli::run(std::env::args().skip(1)) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
