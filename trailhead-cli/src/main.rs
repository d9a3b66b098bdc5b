//! Entry point for the `trailhead` command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = trailhead_cli::run() {
        eprintln!("trailhead: {err}");
        std::process::exit(1);
    }
}
