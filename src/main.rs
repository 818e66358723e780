fn main() {
    deckgen::app::cli::run();
}
