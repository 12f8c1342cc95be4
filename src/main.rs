fn main() {
    match chartfeed::run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error executing CLI: {err:#}");
            std::process::exit(1);
        }
    }
}
