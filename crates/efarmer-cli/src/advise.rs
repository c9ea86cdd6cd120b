use std::io::Write as _;

use efarmer_advisor::{Advisor, AdvisoryMessage, ChatSession, Role};
use efarmer_core::{AppConfig, Language};
use tokio::io::{AsyncBufReadExt, BufReader};

const TYPING_INDICATOR: &str = "Aki is typing...";

/// Shown while a round is awaiting the advisor's reply.
fn typing_indicator(session: &ChatSession) -> Option<&'static str> {
    session.is_pending().then_some(TYPING_INDICATOR)
}

pub(crate) async fn run_ask(
    config: &AppConfig,
    lang: Language,
    question: &str,
) -> anyhow::Result<()> {
    let question = question.trim();
    if question.is_empty() {
        anyhow::bail!("question must not be empty");
    }

    let advisor = Advisor::from_app_config(config)?;
    let mut session = ChatSession::new(lang);
    eprintln!("{TYPING_INDICATOR}");
    if let Some(reply) = session.ask(&advisor, question).await {
        println!("{}", reply.text);
    }
    Ok(())
}

pub(crate) async fn run_chat(config: &AppConfig, lang: Language) -> anyhow::Result<()> {
    let advisor = Advisor::from_app_config(config)?;
    let mut session = ChatSession::new(lang);
    for message in session.messages() {
        println!("{}", render(message));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            ChatInput::Quit => break,
            ChatInput::Blank => {}
            ChatInput::SwitchLanguage(Ok(next)) => {
                session.set_language(next);
                println!("Language set to {} ({next}).", next.name());
            }
            ChatInput::SwitchLanguage(Err(e)) => println!("{e}"),
            ChatInput::Question(text) => {
                let Some(question) = session.begin_round(text) else {
                    continue;
                };
                if let Some(indicator) = typing_indicator(&session) {
                    eprintln!("{indicator}");
                }
                let reply = advisor
                    .get_advice(&question, session.language().code())
                    .await;
                let message = session.complete_round(reply);
                println!("{}", render(message));
            }
        }
    }

    tracing::debug!(messages = session.len(), "chat session ended");
    Ok(())
}

#[derive(Debug, PartialEq)]
enum ChatInput<'a> {
    Quit,
    Blank,
    SwitchLanguage(Result<Language, efarmer_core::UnknownLanguage>),
    Question(&'a str),
}

fn parse_input(line: &str) -> ChatInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ChatInput::Blank;
    }
    if trimmed == "/quit" {
        return ChatInput::Quit;
    }
    if let Some(code) = trimmed.strip_prefix("/lang") {
        return ChatInput::SwitchLanguage(code.parse());
    }
    ChatInput::Question(trimmed)
}

fn render(message: &AdvisoryMessage) -> String {
    match message.role {
        Role::Advisor => format!("Aki: {}", message.text),
        Role::Inquirer => format!("You: {}", message.text),
    }
}
