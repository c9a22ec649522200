fn main() {
    // Host test builds (`--no-default-features`) have no ESP-IDF sysenv.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
