pub mod catalog;
pub mod conversation_state;
pub mod intent;
pub mod message;
pub mod prompt;
pub mod quick_reply;
pub mod render;

use std::io::Write;
use std::process::ExitCode;

use conversation_state::{ConversationSession, SessionEvent, Submission};
use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use eyre::Result;
use message::Message;
use prompt::PROMPT;
use render::{format_message, Style};
use rustyline::error::ReadlineError;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::config::ChatConfig;

const BANNER: &str = "
Nova Assistant · BotNova Studio
Desarrollo web y chatbots inteligentes
";

const CONTACT_FOOTER: &str = "📧 contacto@botnova.studio   📱 +1 (234) 567-890";

const HELP_TEXT: &str = "
Nova Assistant

/temas        Mostrar los temas rápidos
/1 … /4       Enviar un tema rápido
/historial    Mostrar la conversación completa
/nuevo        Empezar una conversación nueva
/help         Mostrar esta ayuda
/quit         Salir
";

const TYPING_TEXT: &str = "Nova está escribiendo…";

/// Whether the input loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Terminal front end for a [`ConversationSession`].
pub struct ChatContext {
    output: Box<dyn Write>,
    input: Option<String>,
    interactive: bool,
    config: ChatConfig,
    style: Style,
    session: ConversationSession,
    typing_shown: bool,
}

impl ChatContext {
    pub fn new(
        output: Box<dyn Write>,
        input: Option<String>,
        interactive: bool,
        config: ChatConfig,
    ) -> Self {
        Self {
            output,
            input,
            interactive,
            style: Style::from_plain_flag(config.plain),
            session: ConversationSession::new(config.typing_delay),
            config,
            typing_shown: false,
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        // Handle non-interactive mode (single query)
        if let Some(input) = self.input.take() {
            return self.run_once(&input).await;
        }

        if self.interactive {
            self.print_welcome()?;
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    async fn run_once(&mut self, input: &str) -> Result<ExitCode> {
        let events = self.session.subscribe();
        if self.session.submit(input) != Submission::Accepted {
            writeln!(self.output, "Nada que enviar: el mensaje está vacío.")?;
            return Ok(ExitCode::FAILURE);
        }

        if self.config.json {
            wait_quietly(events).await;
            let transcript = serde_json::to_string_pretty(&self.session.messages())?;
            writeln!(self.output, "{}", transcript)?;
        } else if self.await_reply(events, false).await? == Flow::Quit {
            return Ok(ExitCode::FAILURE);
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", BANNER)?;
        for message in self.session.messages() {
            self.render(&message)?;
        }
        self.print_quick_replies()?;
        writeln!(self.output, "\n{}", CONTACT_FOOTER)?;
        writeln!(self.output, "Escribe /help para ver los comandos.\n")?;
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let readline = rl.readline(PROMPT);

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if self.handle_input(&line).await? == Flow::Quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        writeln!(self.output, "¡Hasta pronto!")?;
        Ok(())
    }

    async fn handle_input(&mut self, input: &str) -> Result<Flow> {
        let input = input.trim();
        match input {
            "/help" => {
                writeln!(self.output, "{}", HELP_TEXT)?;
                writeln!(self.output, "{}\n", CONTACT_FOOTER)?;
            }
            "/quit" => return Ok(Flow::Quit),
            "/temas" => self.print_quick_replies()?,
            "/historial" => {
                for message in self.session.messages() {
                    self.render(&message)?;
                }
            }
            "/nuevo" => {
                self.restart_session();
                writeln!(self.output, "Conversación nueva.\n")?;
                for message in self.session.messages() {
                    self.render(&message)?;
                }
            }
            _ => {
                if let Some(reply) = input.strip_prefix('/').and_then(quick_reply::by_number) {
                    debug!("Quick reply selected: {}", reply.label);
                    return self.send(reply.value, true).await;
                }
                return self.send(input, false).await;
            }
        }

        Ok(Flow::Continue)
    }

    async fn send(&mut self, text: &str, echo_user: bool) -> Result<Flow> {
        if self.session.is_pending() {
            debug!("Still waiting for the previous reply");
            return Ok(Flow::Continue);
        }

        let events = self.session.subscribe();
        match self.session.submit(text) {
            Submission::Accepted => self.await_reply(events, echo_user).await,
            Submission::Blank | Submission::Busy => Ok(Flow::Continue),
        }
    }

    /// Render session events until the pending reply lands. Ctrl-C tears
    /// the session down and ends the chat.
    async fn await_reply(
        &mut self,
        mut events: broadcast::Receiver<SessionEvent>,
        echo_user: bool,
    ) -> Result<Flow> {
        loop {
            let event = tokio::select! {
                event = events.recv() => event,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted while waiting for a reply");
                    self.clear_typing_indicator()?;
                    self.restart_session();
                    writeln!(self.output, "\nConversación interrumpida.")?;
                    return Ok(Flow::Quit);
                }
            };

            match event {
                Ok(SessionEvent::MessageAppended(message)) => {
                    if message.is_user() && !echo_user {
                        continue;
                    }
                    self.clear_typing_indicator()?;
                    self.render(&message)?;
                }
                Ok(SessionEvent::PendingChanged(true)) => self.show_typing_indicator()?,
                Ok(SessionEvent::PendingChanged(false)) | Err(RecvError::Closed) => {
                    self.clear_typing_indicator()?;
                    return Ok(Flow::Continue);
                }
                Err(RecvError::Lagged(skipped)) => warn!("Skipped {} session events", skipped),
            }
        }
    }

    /// Drop the current session, discarding any reply still in flight, and
    /// start over from the welcome message.
    fn restart_session(&mut self) {
        info!("Starting a new conversation");
        self.session = ConversationSession::new(self.config.typing_delay);
    }

    fn render(&mut self, message: &Message) -> Result<()> {
        writeln!(self.output, "{}", format_message(message, self.style))?;
        Ok(())
    }

    fn print_quick_replies(&mut self) -> Result<()> {
        writeln!(self.output, "Temas rápidos:\n{}", quick_reply::menu())?;
        Ok(())
    }

    fn show_typing_indicator(&mut self) -> Result<()> {
        if !self.interactive {
            return Ok(());
        }
        write!(self.output, "{}", TYPING_TEXT)?;
        self.output.flush()?;
        self.typing_shown = true;
        Ok(())
    }

    fn clear_typing_indicator(&mut self) -> Result<()> {
        if !self.typing_shown {
            return Ok(());
        }
        match self.style {
            Style::Ansi => queue!(self.output, MoveToColumn(0), Clear(ClearType::CurrentLine))?,
            Style::Plain => {
                let blank = " ".repeat(TYPING_TEXT.chars().count());
                write!(self.output, "\r{}\r", blank)?;
            }
        }
        self.output.flush()?;
        self.typing_shown = false;
        Ok(())
    }
}

async fn wait_quietly(mut events: broadcast::Receiver<SessionEvent>) {
    loop {
        match events.recv().await {
            Ok(SessionEvent::PendingChanged(false)) | Err(RecvError::Closed) => return,
            Ok(_) | Err(RecvError::Lagged(_)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::cli::chat::catalog::ResponseCatalog;
    use crate::cli::chat::intent::Intent;
    use crate::config::TypingDelay;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn plain_config(json: bool) -> ChatConfig {
        ChatConfig {
            typing_delay: TypingDelay::instant(),
            plain: true,
            json,
        }
    }

    fn interactive_context(buffer: &SharedBuffer, plain: bool) -> ChatContext {
        ChatContext::new(
            Box::new(buffer.clone()),
            None,
            true,
            ChatConfig {
                typing_delay: TypingDelay::instant(),
                plain,
                json: false,
            },
        )
    }

    fn context(buffer: &SharedBuffer, input: Option<&str>, json: bool) -> ChatContext {
        ChatContext::new(
            Box::new(buffer.clone()),
            input.map(str::to_string),
            input.is_none(),
            plain_config(json),
        )
    }

    #[tokio::test]
    async fn test_one_shot_prints_reply() {
        let buffer = SharedBuffer::default();
        let mut chat = context(&buffer, Some("¿cuánto cuesta?"), false);

        chat.run().await.unwrap();

        let output = buffer.contents();
        assert!(output.starts_with("Nova "));
        assert!(output.contains("Precios Personalizados"));
        assert!(!output.contains("**"));
    }

    #[tokio::test]
    async fn test_one_shot_json_transcript() {
        let buffer = SharedBuffer::default();
        let mut chat = context(&buffer, Some("hola"), true);

        chat.run().await.unwrap();

        let transcript: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        let messages = transcript.as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1]["author"], "user");
        assert_eq!(messages[1]["body"], "hola");
        assert_eq!(messages[2]["author"], "assistant");
        assert_eq!(messages[2]["body"], ResponseCatalog::new().get(Intent::Greeting));
    }

    #[tokio::test]
    async fn test_one_shot_blank_input_fails() {
        let buffer = SharedBuffer::default();
        let mut chat = context(&buffer, Some("   "), false);

        let code = chat.run().await.unwrap();
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::FAILURE));
        assert!(buffer.contents().contains("vacío"));
        assert_eq!(chat.session.len(), 1);
    }

    #[tokio::test]
    async fn test_quick_reply_echoes_value_and_answers() {
        let buffer = SharedBuffer::default();
        let mut chat = context(&buffer, None, false);

        assert_eq!(chat.handle_input("/2").await.unwrap(), Flow::Continue);

        let output = buffer.contents();
        assert!(output.contains("información sobre chatbots"));
        assert!(output.contains("Chatbots Inteligentes con IA"));
        assert_eq!(chat.session.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_slash_command_is_sent_as_text() {
        let buffer = SharedBuffer::default();
        let mut chat = context(&buffer, None, false);

        chat.handle_input("/9").await.unwrap();

        let messages = chat.session.messages();
        assert_eq!(messages[1].body, "/9");
        assert_eq!(messages[2].body, ResponseCatalog::new().get(Intent::Fallback));
    }

    #[tokio::test]
    async fn test_new_conversation_resets_transcript() {
        let buffer = SharedBuffer::default();
        let mut chat = context(&buffer, None, false);

        chat.handle_input("gracias").await.unwrap();
        assert_eq!(chat.session.len(), 3);

        chat.handle_input("/nuevo").await.unwrap();
        assert_eq!(chat.session.len(), 1);
    }

    #[tokio::test]
    async fn test_quit_and_help() {
        let buffer = SharedBuffer::default();
        let mut chat = context(&buffer, None, false);

        assert_eq!(chat.handle_input("/help").await.unwrap(), Flow::Continue);
        assert!(buffer.contents().contains("/historial"));
        assert_eq!(chat.handle_input("  /quit ").await.unwrap(), Flow::Quit);
        assert_eq!(chat.session.len(), 1);
    }

    #[tokio::test]
    async fn test_plain_typing_indicator_is_shown_then_erased() {
        let buffer = SharedBuffer::default();
        let mut chat = interactive_context(&buffer, true);

        chat.handle_input("hola").await.unwrap();

        let output = buffer.contents();
        let shown = output.find(TYPING_TEXT).expect("indicator printed");
        let erase = format!("\r{}\r", " ".repeat(TYPING_TEXT.chars().count()));
        let erased = output.find(&erase).expect("indicator erased");
        let reply = output.find("Bienvenido a BotNova Studio").unwrap();
        assert!(shown < erased && erased < reply);
        assert!(!output.contains('\u{1b}'));
        assert!(!chat.typing_shown);
    }

    #[tokio::test]
    async fn test_ansi_typing_indicator_clears_the_line() {
        let buffer = SharedBuffer::default();
        let mut chat = interactive_context(&buffer, false);

        chat.handle_input("precio").await.unwrap();

        let output = buffer.contents();
        let shown = output.find(TYPING_TEXT).expect("indicator printed");
        let cleared = output.find("\u{1b}[2K").expect("line cleared");
        assert!(shown < cleared);
        assert!(output[cleared..].contains("Precios Personalizados"));
        assert!(!chat.typing_shown);
    }

    #[tokio::test]
    async fn test_one_shot_has_no_typing_indicator() {
        let buffer = SharedBuffer::default();
        let mut chat = context(&buffer, Some("hola"), false);

        chat.run().await.unwrap();
        assert!(!buffer.contents().contains(TYPING_TEXT));
    }

    #[tokio::test]
    async fn test_history_prints_transcript_in_order() {
        let buffer = SharedBuffer::default();
        let mut chat = context(&buffer, None, false);
        chat.handle_input("email").await.unwrap();

        let before = buffer.contents().len();
        chat.handle_input("/historial").await.unwrap();
        let output = buffer.contents()[before..].to_string();

        let messages = chat.session.messages();
        assert_eq!(messages.len(), 3);
        let mut cursor = 0;
        for message in &messages {
            let rendered = render::format_message(message, Style::Plain);
            let at = output[cursor..].find(&rendered).expect("message in history");
            cursor += at + rendered.len();
        }

        let time = messages[0].timestamp.format("%H:%M").to_string();
        assert!(output.starts_with(&format!("Nova {}\n", time)));
        assert!(output.contains(&format!("Tú {}\nemail\n", messages[1].timestamp.format("%H:%M"))));
        assert!(output.contains("¡Hablemos!"));
        assert_eq!(chat.session.len(), 3);
    }

    #[tokio::test]
    async fn test_topics_lists_numbered_shortcuts() {
        let buffer = SharedBuffer::default();
        let mut chat = context(&buffer, None, false);

        assert_eq!(chat.handle_input("/temas").await.unwrap(), Flow::Continue);

        let output = buffer.contents();
        for (i, reply) in quick_reply::QUICK_REPLIES.iter().enumerate() {
            assert!(output.contains(&format!("/{}  {}", i + 1, reply.label)));
        }
        assert_eq!(chat.session.len(), 1);
    }
}
