#![forbid(unsafe_code)]

fn main() {
    // The git values only exist when building from a checkout.  Source
    // distributions still have to build, so fall back to "unknown".
    if std::path::Path::new(".git").exists() {
        build_data::set_GIT_BRANCH();
        build_data::set_GIT_COMMIT_SHORT();
        build_data::set_GIT_DIRTY();
        build_data::set_SOURCE_TIMESTAMP();
    } else {
        println!("cargo:rustc-env=GIT_BRANCH=unknown");
        println!("cargo:rustc-env=GIT_COMMIT_SHORT=unknown");
        println!("cargo:rustc-env=GIT_DIRTY=unknown");
        println!("cargo:rustc-env=SOURCE_TIMESTAMP=unknown");
    }
    build_data::set_RUSTC_VERSION();
}
