use crate::error::{Result, ResultExt};
use crate::ui;
use colored::Colorize;
use std::collections::HashMap;
use threat_intel::PromptRegistry;

/// List prompt names, descriptions and arguments
pub fn list() -> Result<()> {
    let registry = PromptRegistry::new();

    for prompt in registry.prompts() {
        ui::section_header(prompt.name);
        println!("{}", prompt.description);
        for argument in prompt.arguments {
            let marker = if argument.required {
                "required".red()
            } else {
                "optional".dimmed()
            };
            println!("  {} ({}) {}", argument.name.cyan(), marker, argument.description);
        }
    }

    Ok(())
}

pub fn render(name: &str, args: Vec<(String, String)>) -> Result<()> {
    let args: HashMap<String, String> = args.into_iter().collect();
    let rendered = PromptRegistry::new()
        .render(name, &args)
        .with_context(|| format!("Failed to render prompt '{}'", name))?;

    println!("{}", rendered);
    Ok(())
}
