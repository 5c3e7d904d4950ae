pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

/// Report `err` on stderr and exit with status 1.
///
/// With `json_mode` the error is printed as `{"error": ..., "causes": [...]}`.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": causes,
        });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
