fn main() {
    if let Err(err) = mariner_quiz::run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
