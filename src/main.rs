fn main() {
    if let Err(err) = data_profile::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
