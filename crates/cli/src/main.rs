use std::process::ExitCode;

fn main() -> ExitCode {
    package_express_cli::run()
}
