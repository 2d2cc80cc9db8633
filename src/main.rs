fn main() {
    pr_notifier::app::cli::run();
}
