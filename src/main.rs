fn main() {
    if let Err(err) = dirods::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
