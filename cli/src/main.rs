use std::process::exit;

use muse_cli::cli::parse_args;
use muse_cli::cli::run;

fn main() {
    let args = parse_args();
    if let Err(e) = run(&args) {
        eprintln!("{e:#}");
        exit(1);
    }
}
