mod commands;
mod logging;
mod runner;

fn main() {
    if let Err(e) = runner::main(std::env::args().collect()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
