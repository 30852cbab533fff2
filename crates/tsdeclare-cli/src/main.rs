use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use tsc_declare::{init_tracing, run, Cli, Outcome};
use tsdeclare_emit::EmitError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    match run(&cli).await {
        Ok(Outcome::Printed(unit)) => {
            println!("{}", unit);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Emitted(_)) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(emit_err) = err.downcast_ref::<EmitError>() {
                if let EmitError::CompilerFailed { stdout, stderr, .. } = emit_err {
                    // Relay the compiler's own diagnostics verbatim
                    let _ = std::io::stdout().write_all(stdout.as_bytes());
                    let _ = std::io::stderr().write_all(stderr.as_bytes());
                }
                error!("{:#}", err);
                return ExitCode::from(emit_err.exit_code().clamp(1, 255) as u8);
            }
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
