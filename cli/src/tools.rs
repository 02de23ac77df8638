use crate::error::{CliError, Result, ResultExt};
use serde_json::Value;
use threat_intel::tools::definitions;
use threat_intel::{build_registry, IntelConfig, ToolOutput};
use tokio::runtime::Runtime;

/// Print every tool definition as a JSON array
pub fn list() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&definitions())?);
    Ok(())
}

/// Run one tool against a validated configuration; `Ok(false)` when the tool produced an error output
pub fn call(config: IntelConfig, tool: &str, raw_args: &str) -> Result<bool> {
    let arguments: Value =
        serde_json::from_str(raw_args).with_context(|| "Tool arguments must be a JSON object")?;

    let registry = build_registry(config)?;

    let rt = Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {}", e)))?;
    let output = rt.block_on(registry.call(tool, arguments))?;

    print_output(&output);
    Ok(!output.is_error)
}

fn print_output(output: &ToolOutput) {
    let text = output.to_display_string();
    if output.is_error {
        eprintln!("{}", text);
    } else {
        println!("{}", text);
    }
}
