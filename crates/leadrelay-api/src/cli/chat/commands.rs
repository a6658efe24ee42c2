//! Slash command parsing for the chat loop.
//!
//! Anything not starting with `/` is a message for the relay. `/1`..`/n`
//! send the matching quick prompt.

use console::style;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    Clear,
    Exit,
    /// List the quick prompts.
    Prompts,
    /// Send quick prompt `n` (1-based, as shown to the user).
    QuickPrompt(usize),
    /// Show the remembered conversation.
    History,
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    let rest = trimmed.strip_prefix('/')?;

    let cmd = rest.split_whitespace().next().unwrap_or("").to_lowercase();

    if let Ok(n) = cmd.parse::<usize>() {
        return Some(if n == 0 {
            ChatCommand::Unknown(format!("/{cmd}"))
        } else {
            ChatCommand::QuickPrompt(n)
        });
    }

    match cmd.as_str() {
        "help" | "h" | "?" => Some(ChatCommand::Help),
        "clear" | "cls" => Some(ChatCommand::Clear),
        "exit" | "quit" | "q" => Some(ChatCommand::Exit),
        "prompts" | "p" => Some(ChatCommand::Prompts),
        "history" => Some(ChatCommand::History),
        _ => Some(ChatCommand::Unknown(format!("/{cmd}"))),
    }
}

pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}       {}", style("/help").cyan(), "Show this help message");
    println!("  {}    {}", style("/prompts").cyan(), "List quick prompts");
    println!("  {}  {}", style("/1 … /n").cyan(), "Send a quick prompt");
    println!("  {}    {}", style("/history").cyan(), "Show the remembered conversation");
    println!("  {}      {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}       {}", style("/exit").cyan(), "End the chat");
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

pub fn print_quick_prompts(prompts: &[String]) {
    println!();
    for (i, prompt) in prompts.iter().enumerate() {
        println!("  {} {}", style(format!("/{}", i + 1)).cyan(), prompt);
    }
    println!();
}
