/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint:

- `roll`:    Animated single roll
- `chat`:    Interactive dice and venue chat
- `ask`:     One question about a given venue
- `prompts`: Suggested questions for a venue
*/

use crate::app::DecisionApp;
use crate::catalog::Category;
use crate::chat::assistant::{AssistantReply, VenueAssistant};
use crate::config::Config;
use crate::error::Result;
use crate::providers::optional_provider;
use crate::roll::{RollEvent, DICE_FACES};

use colored::Colorize;
use std::io::Write;
use std::time::Duration;

// Special commands parser for the interactive chat
pub mod special_commands;

const DICE_ICONS: [&str; DICE_FACES] = ["⚀", "⚁", "⚂", "⚃", "⚄", "⚅"];

/// Roll the dice, rendering the animation, and return the committed venue
///
/// Returns `None` if the roll did not commit.
pub async fn roll_with_animation(app: &mut DecisionApp) -> Option<String> {
    let mut events = app.dice().subscribe();
    let roll = app.roll_and_wait();
    tokio::pin!(roll);

    loop {
        tokio::select! {
            result = &mut roll => {
                while let Ok(event) = events.try_recv() {
                    render_roll_event(&event);
                }
                println!();
                return result;
            }
            Some(event) = events.recv() => render_roll_event(&event),
        }
    }
}

fn render_roll_event(event: &RollEvent) {
    match event {
        RollEvent::Started {
            category,
            secret_mode,
        } => {
            let mode = if *secret_mode { " (secret)" } else { "" };
            print!("{}{} ", category.label().bold(), mode.magenta());
        }
        RollEvent::Tick { icon_index } => {
            let icon = DICE_ICONS.get(*icon_index).copied().unwrap_or("🎲");
            print!("{} ", icon);
        }
        RollEvent::Committed { .. } => {}
        RollEvent::Invalidated => print!("{}", "dibatalkan".dimmed()),
    }
    let _ = std::io::stdout().flush();
}

/// Print text one character at a time
///
/// A zero delay prints the whole text at once.
pub async fn type_out(text: &str, delay: Duration) {
    if delay.is_zero() {
        println!("{}", text);
        return;
    }

    let mut stdout = std::io::stdout();
    for c in text.chars() {
        print!("{}", c);
        let _ = stdout.flush();
        tokio::time::sleep(delay).await;
    }
    println!();
}

async fn print_reply(reply: &AssistantReply, typing_delay: Duration) {
    print!("{} ", "dnAI:".cyan().bold());
    if reply.animate {
        type_out(&reply.content, typing_delay).await;
    } else {
        println!("{}", reply.content);
    }
}

fn print_result(result: &str) {
    println!("🎯 {}", result.green().bold());
}

fn print_offline_notice() {
    println!(
        "{}",
        "AI belum dikonfigurasi (set DADU_API_KEY); dnAI jawab pakai mode offline.".yellow()
    );
}

// Roll command handler
pub mod roll {
    //! Animated single roll.

    use super::*;

    /// Roll once and print the result
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    /// * `category` - What to roll for
    /// * `secret` - Start with secret mode on
    pub async fn run_roll(config: Config, category: Category, secret: bool) -> Result<()> {
        let mut app = DecisionApp::from_config(&config, category)?;
        if secret {
            app.toggle_secret_mode();
        }

        match roll_with_animation(&mut app).await {
            Some(result) => print_result(&result),
            None => println!("{}", "Tidak ada pilihan untuk di-roll".red()),
        }
        Ok(())
    }
}

// One-shot question handler
pub mod ask {
    //! One question about a venue given on the command line.

    use super::*;

    /// Ask one question and print the reply
    pub async fn run_ask(
        config: Config,
        venue: String,
        question: String,
        category: Category,
    ) -> Result<()> {
        let provider = optional_provider(&config.provider)?;
        if provider.is_none() {
            print_offline_notice();
        }

        let mut assistant = VenueAssistant::from_config(provider, &config.chat);
        match assistant.ask(&question, &venue, category).await {
            Some(reply) => {
                print_reply(&reply, Duration::from_millis(config.chat.typing_delay_ms)).await
            }
            None => println!("{}", "Pertanyaannya kosong".red()),
        }
        Ok(())
    }
}

// Suggested questions handler
pub mod prompts {
    //! Lists the suggested questions for a venue.

    use super::*;

    /// Print the numbered suggestions for a venue
    pub fn run_prompts(venue: &str, category: Category) -> Result<()> {
        let suggestions = crate::chat::prompts::suggested_prompts(venue, category);
        for (i, prompt) in suggestions.iter().enumerate() {
            println!("{:>2}. {}", i + 1, prompt);
        }
        Ok(())
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Runs a readline loop: special commands drive the dice and the chat
    //! history, anything else is asked about the current result.

    use super::special_commands::{
        parse_special_command, print_help, ClearScope, SpecialCommand,
    };
    use super::*;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::path::Path;

    /// Start the interactive chat
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `category` - Initial category
    /// * `secret` - Start with secret mode on
    pub async fn run_chat(config: Config, category: Category, secret: bool) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let mut app = DecisionApp::from_config(&config, category)?;
        if secret {
            app.toggle_secret_mode();
        }
        let typing_delay = Duration::from_millis(config.chat.typing_delay_ms);

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&app);

        loop {
            let prompt = format_prompt(&app);
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            println!("{}\n", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => ask_current(&mut app, trimmed, typing_delay).await,
                        SpecialCommand::AskSuggestion(n) => {
                            match app.suggestions().get(n - 1).cloned() {
                                Some(question) => {
                                    println!("{} {}", "Kamu:".bold(), question);
                                    ask_current(&mut app, &question, typing_delay).await;
                                }
                                None => println!("{}", "Nomor saran tidak ada, cek /suggest".red()),
                            }
                        }
                        SpecialCommand::Regenerate => {
                            reask_current(&mut app, None, typing_delay).await
                        }
                        SpecialCommand::Edit(question) => {
                            reask_current(&mut app, Some(question.as_str()), typing_delay).await
                        }
                        other => handle_command(&mut app, other, &config).await,
                    }
                    println!();
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Dadah!");
        Ok(())
    }

    async fn ask_current(app: &mut DecisionApp, question: &str, typing_delay: Duration) {
        if app.dice().result().is_none() {
            println!("{}", "Roll dulu pakai /roll".yellow());
            return;
        }
        if let Some(reply) = app.ask(question).await {
            print_reply(&reply, typing_delay).await;
        }
    }

    async fn reask_current(app: &mut DecisionApp, edited: Option<&str>, typing_delay: Duration) {
        if app.dice().result().is_none() {
            println!("{}", "Roll dulu pakai /roll".yellow());
            return;
        }
        let reply = match edited {
            Some(question) => app.edit_last_question(question).await,
            None => app.regenerate().await,
        };
        match reply {
            Some(reply) => print_reply(&reply, typing_delay).await,
            None => println!("{}", "Belum ada pertanyaan yang tersimpan buat diulang".yellow()),
        }
    }

    async fn handle_command(app: &mut DecisionApp, command: SpecialCommand, config: &Config) {
        match command {
            SpecialCommand::Roll => {
                if let Some(result) = roll_with_animation(app).await {
                    print_result(&result);
                    println!("{}", "Ketik /suggest buat ide pertanyaan".dimmed());
                }
            }
            SpecialCommand::SetCategory(category) => {
                app.set_category(category);
                println!("Kategori: {}", category.label().bold());
            }
            SpecialCommand::ToggleSecret => {
                let enabled = app.toggle_secret_mode();
                println!("Secret mode {}", if enabled { "ON" } else { "OFF" });
            }
            SpecialCommand::Suggest => {
                let suggestions = app.suggestions();
                if suggestions.is_empty() {
                    println!("{}", "Roll dulu pakai /roll".yellow());
                }
                for (i, prompt) in suggestions.iter().enumerate() {
                    println!("{:>2}. {}", i + 1, prompt);
                }
            }
            SpecialCommand::History => with_current(app, |app, result, category| {
                let history = app.assistant().history(result, category);
                if history.is_empty() {
                    println!("Belum ada obrolan soal {}", result);
                }
                for entry in history {
                    let who = match entry.role {
                        crate::chat::session::Role::User => "Kamu".bold(),
                        crate::chat::session::Role::Assistant => "dnAI".cyan().bold(),
                    };
                    println!(
                        "[{}] {}: {}",
                        entry.timestamp.format("%H:%M:%S"),
                        who,
                        entry.content
                    );
                }
            }),
            SpecialCommand::Search(query) => with_current(app, |app, result, category| {
                let hits = app.assistant().search(result, category, &query);
                println!("{} hasil untuk \"{}\"", hits.len(), query);
                for hit in hits {
                    println!("- {}", render_marks(&hit.highlighted));
                }
            }),
            SpecialCommand::Stats => with_current(app, |app, result, category| {
                let stats = app.assistant().response_stats(result, category);
                let memory = app.assistant().memory_stats();
                println!("Pesan:            {}", stats.total_messages);
                println!("  dari kamu:      {}", stats.user_messages);
                println!("  dari dnAI:      {}", stats.assistant_messages);
                println!("Durasi sesi:      {}s", stats.session_duration.num_seconds());
                println!("Sesi aktif:       {}", memory.active_sessions);
                println!("Total tersimpan:  {}", memory.total_messages);
            }),
            SpecialCommand::Export(dir) => with_current(app, |app, result, category| {
                let dir = dir.as_deref().unwrap_or(&config.chat.export_dir);
                match app.assistant().write_export(result, category, Path::new(dir)) {
                    Ok(path) => println!("Tersimpan di {}", path.display()),
                    Err(e) => println!("{}", format!("Gagal export: {}", e).red()),
                }
            }),
            SpecialCommand::Import(file) => match std::fs::read_to_string(&file) {
                Ok(json) => {
                    if app.assistant_mut().import_session(&json) {
                        println!("Riwayat chat berhasil di-import");
                    } else {
                        println!("{}", "Format riwayat chat tidak valid".red());
                    }
                }
                Err(e) => println!("{}", format!("Gagal baca {}: {}", file, e).red()),
            },
            SpecialCommand::Clear(scope) => {
                let current = app.dice().result();
                let category = app.dice().category();
                match (scope, current) {
                    (ClearScope::Others, Some(result)) => {
                        app.assistant_mut().clear_except(&result, category)
                    }
                    _ => app.assistant_mut().clear_all(),
                }
                println!("Riwayat chat dibersihkan");
            }
            SpecialCommand::ShowStatus => print_status_display(app),
            SpecialCommand::Help => print_help(),
            SpecialCommand::Exit
            | SpecialCommand::None
            | SpecialCommand::AskSuggestion(_)
            | SpecialCommand::Regenerate
            | SpecialCommand::Edit(_) => {}
        }
    }

    /// Runs `f` with the current result, or asks the user to roll first
    fn with_current(app: &DecisionApp, f: impl FnOnce(&DecisionApp, &str, Category)) {
        match app.dice().result() {
            Some(result) => f(app, &result, app.dice().category()),
            None => println!("{}", "Roll dulu pakai /roll".yellow()),
        }
    }

    fn render_marks(highlighted: &str) -> String {
        let mut out = String::with_capacity(highlighted.len());
        let mut rest = highlighted;
        while let Some(start) = rest.find("<mark>") {
            out.push_str(&rest[..start]);
            rest = &rest[start + "<mark>".len()..];
            match rest.find("</mark>") {
                Some(end) => {
                    out.push_str(&rest[..end].black().on_yellow().to_string());
                    rest = &rest[end + "</mark>".len()..];
                }
                None => break,
            }
        }
        out.push_str(rest);
        out
    }

    fn format_prompt(app: &DecisionApp) -> String {
        let category = app.dice().category().to_string();
        let tag = if app.dice().secret_mode() {
            format!("[{}*]", category).magenta()
        } else {
            format!("[{}]", category).cyan()
        };
        format!("{} >>> ", tag)
    }

    fn print_welcome_banner(app: &DecisionApp) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              Dadu - Makan Apa? Kemana Ya? 🎲                 ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Kategori: {}", app.dice().category().label().bold());
        if !app.assistant().has_provider() {
            print_offline_notice();
        }
        println!("Ketik '/roll' buat mulai, '/help' buat bantuan, 'exit' buat keluar\n");
    }

    fn print_status_display(app: &DecisionApp) {
        let dice = app.dice();
        let memory = app.assistant().memory_stats();

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                       Dadu Session Status                    ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Kategori:       {}", dice.category().label());
        println!("Secret mode:    {}", if dice.secret_mode() { "ON" } else { "OFF" });
        println!("Jumlah pilihan: {}", dice.option_count());
        println!(
            "Hasil:          {}",
            dice.result().unwrap_or_else(|| "-".to_string())
        );
        println!(
            "dnAI:           {}",
            if app.assistant().has_provider() {
                "online"
            } else {
                "offline"
            }
        );
        println!("Sesi chat:      {}", memory.active_sessions);
        println!("Total pesan:    {}", memory.total_messages);
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_render_marks_strips_tags() {
            colored::control::set_override(false);
            assert_eq!(
                render_marks("Parkir <mark>luas</mark> dan <mark>LUAS</mark>"),
                "Parkir luas dan LUAS"
            );
            assert_eq!(render_marks("tanpa tanda"), "tanpa tanda");
        }
    }
}
