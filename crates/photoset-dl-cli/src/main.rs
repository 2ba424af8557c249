use photoset_dl_lib::cli::{ResolvedCommand, parse_args, resolve_command, run_get, run_photoset};
use photoset_dl_lib::error::PhotosetDlError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), PhotosetDlError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    // Per-item failures are logged as they happen and do not change the exit code.
    match command {
        ResolvedCommand::Photoset(params) => {
            run_photoset(params).await?;
        }
        ResolvedCommand::Get(params) => {
            run_get(params).await?;
        }
    }

    Ok(())
}
