//! solflat binary entry point.

use solflat::ui::output;

fn main() {
    if let Err(err) = solflat::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
