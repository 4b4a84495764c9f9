fn main() {
    // ESP-IDF environment is only available when cross-compiling for the board
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
