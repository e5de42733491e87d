use std::process;

fn main() {
    env_logger::init();

    let args = cli::config::load();

    if let Err(e) = cli::run::run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
