fn main() {
    schedrun::app::cli::run();
}
