fn main() {
    if let Err(err) = funnel_tables::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
