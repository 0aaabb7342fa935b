use resep_core::cli::{output, run_cli};

fn main() {
    resep_core::init();

    if let Err(err) = run_cli() {
        output::error(format!("Fatal: {err}"));
        std::process::exit(1);
    }
}
