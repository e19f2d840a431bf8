fn main() {
    snap_diff::cli::run();
}
