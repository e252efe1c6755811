use anyhow::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let runtime = tokio::runtime::Runtime::new()?;
    let code = runtime.block_on(codevision_cli::main_entry());
    // a prompt abandoned after the selection timeout still holds a blocking thread
    runtime.shutdown_background();
    code
}
