fn main() {
    if let Err(err) = contrib_heatmap::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
