use std::process::ExitCode;

fn main() -> ExitCode {
    let options = match hexcompare::parse_cli_options() {
        Ok(options) => options,
        Err(error) => {
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match hexcompare::run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("hexcompare failed: {error:#}");
            ExitCode::FAILURE
        }
    }
}
