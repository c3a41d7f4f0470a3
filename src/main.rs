//! U3DEVLAB admin - binary entry point
//! Delegates to the library for all app logic.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    u3devlab_admin::run().await
}
