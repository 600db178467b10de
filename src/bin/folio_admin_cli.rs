use std::{env, process};

use folio_admin::{
    cli::{parse_args, run_cli, USAGE},
    init,
};

#[tokio::main]
async fn main() {
    init();

    let invocation = match parse_args(env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("Error: {err}\n{USAGE}");
            process::exit(2);
        }
    };

    if let Err(err) = run_cli(invocation).await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
