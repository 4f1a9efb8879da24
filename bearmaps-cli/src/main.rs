//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = bearmaps_cli::run() {
        eprintln!("bearmaps: {err}");
        std::process::exit(1);
    }
}
