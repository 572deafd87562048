fn main() {
    if let Err(err) = cireport::run() {
        eprintln!("{}", cireport::format_error(&err));
        std::process::exit(1);
    }
}
