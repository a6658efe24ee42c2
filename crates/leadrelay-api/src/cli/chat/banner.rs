//! Welcome banner for the terminal widget.

use console::style;

pub fn print_welcome_banner(relay_endpoint: &str, quick_prompts: &[String]) {
    println!();
    println!("  {} {}", "*", style("Leadrelay").cyan().bold());
    println!("  {}", style("Your AI strategist, in the terminal").dim());
    println!();
    println!("  {}  {}", style("Relay:").bold(), style(relay_endpoint).dim());
    println!();

    if !quick_prompts.is_empty() {
        println!("  {}", style("Quick prompts:").bold());
        for (i, prompt) in quick_prompts.iter().enumerate() {
            println!("  {} {}", style(format!("/{}", i + 1)).cyan(), style(prompt).dim());
        }
        println!();
    }

    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
