//! Main chat loop orchestration.
//!
//! Wires the HTTP transport and the terminal view into a
//! [`ConversationClient`], shows the greeting, then feeds input lines to the
//! client until the user exits. Submissions are not awaited, so typing
//! while a reply is pending exercises the client's busy rejection.

use std::time::Duration;

use console::style;
use tracing::info;

use leadrelay_core::client::{ClientSettings, ConversationClient, Submission};
use leadrelay_infra::transport::HttpRelayTransport;
use leadrelay_types::llm::MessageRole;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::view::TerminalView;

/// How long `/exit` waits for an in-flight reply.
const EXIT_GRACE: Duration = Duration::from_secs(3);

/// Run the interactive chat against the relay at `relay_url`.
pub async fn run_chat_loop(relay_url: &str, settings: ClientSettings) -> anyhow::Result<()> {
    let transport = HttpRelayTransport::new(relay_url);
    print_welcome_banner(transport.endpoint(), &settings.quick_prompts);
    info!(endpoint = transport.endpoint(), "chat session started");

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let client = ConversationClient::new(transport, TerminalView::new(writer), settings);
    client.greet();

    let mut last: Option<Submission> = None;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!("  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
            }
            InputEvent::Message(text) => match commands::parse(&text) {
                Some(ChatCommand::Exit) => break,
                Some(ChatCommand::Help) => commands::print_help(),
                Some(ChatCommand::Clear) => chat_input.clear(),
                Some(ChatCommand::Prompts) => commands::print_quick_prompts(client.quick_prompts()),
                Some(ChatCommand::QuickPrompt(n)) => match client.submit_quick_prompt(n - 1) {
                    Some(submission) => track(&mut last, submission),
                    None => println!(
                        "  {} No quick prompt /{n}. Type /prompts to list them.",
                        style("!").yellow().bold()
                    ),
                },
                Some(ChatCommand::History) => print_history(&client.history()),
                Some(ChatCommand::Unknown(cmd)) => println!(
                    "  {} Unknown command: {cmd}. Type /help for commands.",
                    style("?").yellow().bold()
                ),
                None => track(&mut last, client.submit(&text)),
            },
        }
    }

    // Let a pending reply land before tearing down the terminal, but never
    // hang on a relay that does not answer.
    if let Some(pending) = last.take() {
        if client.is_sending() && !pending.settled_within(EXIT_GRACE).await {
            println!("  {}", style("Reply still pending, leaving without it.").dim());
        }
    }

    chat_input.flush();
    println!("\n  {}", style("Session ended.").dim());
    Ok(())
}

/// Keep the newest dispatched submission; ignored and busy ones are dropped.
fn track(last: &mut Option<Submission>, submission: Submission) {
    if submission.is_dispatched() {
        *last = Some(submission);
    }
}

fn print_history(history: &[leadrelay_types::llm::Message]) {
    println!();
    if history.is_empty() {
        println!("  {}", style("Nothing remembered yet.").dim());
    }
    for message in history {
        let who = match message.role {
            MessageRole::User => style("you").green(),
            MessageRole::Assistant => style("ai ").cyan(),
            MessageRole::System => style("sys").dim(),
        };
        println!("  {who}  {}", message.content);
    }
    println!();
}
