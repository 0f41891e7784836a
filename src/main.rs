fn main() {
    if let Err(e) = skillspark_lib::run() {
        eprintln!("skillspark: {}", e);
        std::process::exit(1);
    }
}
