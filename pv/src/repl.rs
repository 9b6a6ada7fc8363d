//! Interactive REPL
//!
//! Each input line is one user event. Lines starting with `/` are commands;
//! any other line is appended to the draft prompt, which `/create` saves
//! and `/copy` (with no id) copies.

use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::clipboard::Clipboard;
use crate::filter::ALL_CATEGORIES;
use crate::record::TemplateRecord;
use crate::session::{Notice, NoticeLevel, Session, Tab};
use crate::tips;

/// What the REPL loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplAction {
    Continue,
    Quit,
}

/// Interactive session over a [`Session`]
pub struct Repl<C: Clipboard> {
    session: Session<C>,
    draft: String,
    export_dir: PathBuf,
}

impl<C: Clipboard> Repl<C> {
    pub fn new(session: Session<C>, export_dir: PathBuf) -> Self {
        Self {
            session,
            draft: String::new(),
            export_dir,
        }
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    /// Current unsaved draft text
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Run the REPL main loop on the terminal
    pub fn run(&mut self) -> Result<()> {
        let mut out = io::stdout();
        self.print_welcome(&mut out)?;

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let prompt = match self.session.editing() {
                Some(draft) => format!("{} ", format!("edit {}>", draft.id).bright_yellow()),
                None => format!("{} ", format!("{}>", self.session.view().tab).bright_green()),
            };

            match rl.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line.as_str());

                    if self.handle_line(&line, &mut out)? == ReplAction::Quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Handle one input line
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<ReplAction> {
        let input = line.trim();
        if input.is_empty() {
            return Ok(ReplAction::Continue);
        }

        if !input.starts_with('/') {
            if !self.draft.is_empty() {
                self.draft.push('\n');
            }
            self.draft.push_str(line.trim_end());
            writeln!(out, "{}", format!("draft: {} chars", self.draft.chars().count()).dimmed())?;
            return Ok(ReplAction::Continue);
        }

        let (cmd, arg) = match input.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (input, ""),
        };
        debug!(%cmd, %arg, "handle_line: dispatching");

        match cmd {
            "/help" | "/h" => self.print_help(out)?,
            "/quit" | "/q" | "/exit" => return Ok(ReplAction::Quit),
            "/tab" => match arg.parse::<Tab>() {
                Ok(tab) => {
                    self.session.set_tab(tab);
                    self.render_tab(out)?;
                }
                Err(e) => print_notice(out, &Notice::error(e))?,
            },
            "/catalog" | "/generator" => self.switch_tab(Tab::Generator, out)?,
            "/library" => self.switch_tab(Tab::Library, out)?,
            "/favorites" => self.switch_tab(Tab::Favorites, out)?,
            "/tips" => self.switch_tab(Tab::Help, out)?,
            "/search" => {
                self.session.set_search(arg);
                self.render_tab(out)?;
            }
            "/category" => {
                let category = if arg.is_empty() { ALL_CATEGORIES } else { arg };
                self.session.set_category(category);
                self.render_tab(out)?;
            }
            "/categories" => self.print_categories(out)?,
            "/show" => self.print_record(arg, out)?,
            "/save" => self.notify(out, |s| s.save_from_catalog(arg))?,
            "/new" => {
                let notice = self.session.create_from_text(arg);
                print_notice(out, &notice)?;
            }
            "/create" => {
                let notice = self.session.create_from_text(&self.draft);
                if notice.level == NoticeLevel::Success {
                    self.draft.clear();
                }
                print_notice(out, &notice)?;
            }
            "/copy" => {
                if arg.is_empty() {
                    let notice = self.session.copy_text(&self.draft);
                    print_notice(out, &notice)?;
                } else {
                    self.notify(out, |s| s.copy_record(arg))?;
                }
            }
            "/draft" => {
                if self.draft.is_empty() {
                    writeln!(out, "{}", "Draft is empty.".dimmed())?;
                } else {
                    writeln!(out, "{}", self.draft)?;
                }
            }
            "/clear" => {
                self.draft.clear();
                writeln!(out, "{}", "Draft cleared.".dimmed())?;
            }
            "/fav" => self.notify(out, |s| s.toggle_favorite(arg))?,
            "/edit" => {
                if self.session.begin_edit(arg) {
                    self.print_edit_draft(out)?;
                }
            }
            "/title" => {
                if self.session.set_draft_title(arg) {
                    self.print_edit_draft(out)?;
                }
            }
            "/body" => {
                if self.session.set_draft_body(arg) {
                    self.print_edit_draft(out)?;
                }
            }
            "/done" => self.notify(out, |s| s.commit_edit())?,
            "/cancel" => {
                if self.session.cancel_edit() {
                    writeln!(out, "{}", "Edit cancelled.".dimmed())?;
                }
            }
            "/delete" => self.notify(out, |s| s.delete(arg))?,
            "/stats" => self.print_stats(out)?,
            "/export" => {
                let (notice, _) = self.session.export_to(&self.export_dir);
                print_notice(out, &notice)?;
            }
            "/import" => {
                if arg.is_empty() {
                    print_notice(out, &Notice::error("Usage: /import <path>"))?;
                } else {
                    let notice = self.session.import_from(&PathBuf::from(arg));
                    print_notice(out, &notice)?;
                }
            }
            _ => {
                writeln!(out, "{} Unknown command: {}", "?".yellow(), cmd)?;
                writeln!(out, "Type {} for available commands", "/help".yellow())?;
            }
        }

        Ok(ReplAction::Continue)
    }

    fn notify(&mut self, out: &mut impl Write, action: impl FnOnce(&mut Session<C>) -> Option<Notice>) -> Result<()> {
        if let Some(notice) = action(&mut self.session) {
            print_notice(out, &notice)?;
        }
        Ok(())
    }

    fn switch_tab(&mut self, tab: Tab, out: &mut impl Write) -> Result<()> {
        self.session.set_tab(tab);
        self.render_tab(out)
    }

    fn render_tab(&self, out: &mut impl Write) -> Result<()> {
        let view = self.session.view();
        match view.tab {
            Tab::Generator => {
                writeln!(out, "{}", "Templates".bright_cyan().bold())?;
                print_filter_line(out, &view.search, &view.category)?;
                print_records(out, &self.session.catalog_view(), "No templates match.")?;
            }
            Tab::Library => {
                writeln!(out, "{}", "My library".bright_cyan().bold())?;
                print_filter_line(out, &view.search, &view.category)?;
                let empty = if self.session.store().is_empty() {
                    "No saved prompts yet. Use /save <id> or /create."
                } else {
                    "No saved prompts match."
                };
                print_records(out, &self.session.library_view(), empty)?;
            }
            Tab::Favorites => {
                writeln!(out, "{}", "Favorites".bright_cyan().bold())?;
                print_records(
                    out,
                    &self.session.favorites_view(),
                    "No favorites yet. Use /fav <id> on a saved prompt.",
                )?;
            }
            Tab::Help => self.print_tips(out)?,
        }
        Ok(())
    }

    fn print_categories(&self, out: &mut impl Write) -> Result<()> {
        let categories = match self.session.view().tab {
            Tab::Library | Tab::Favorites => self.session.store().categories(),
            _ => self.session.catalog().categories(),
        };
        let selected = &self.session.view().category;
        for category in std::iter::once(ALL_CATEGORIES.to_string()).chain(categories) {
            if &category == selected {
                writeln!(out, "  {}", category.bright_green().bold())?;
            } else {
                writeln!(out, "  {}", category)?;
            }
        }
        Ok(())
    }

    fn print_record(&self, id: &str, out: &mut impl Write) -> Result<()> {
        let record = self.session.store().get(id).or_else(|| self.session.catalog().get(id));
        if let Some(record) = record {
            print_summary(out, record)?;
            writeln!(out)?;
            writeln!(out, "{}", record.body)?;
        }
        Ok(())
    }

    fn print_edit_draft(&self, out: &mut impl Write) -> Result<()> {
        if let Some(draft) = self.session.editing() {
            writeln!(out, "{} {}", "Editing".bright_yellow(), draft.id.cyan())?;
            writeln!(out, "  title: {}", draft.title)?;
            writeln!(out, "  body:  {}", draft.body)?;
            writeln!(
                out,
                "{}",
                "Use /title <text>, /body <text>, then /done or /cancel.".dimmed()
            )?;
        }
        Ok(())
    }

    fn print_stats(&self, out: &mut impl Write) -> Result<()> {
        let stats = self.session.store().stats();
        writeln!(out, "Saved prompts: {}", stats.record_count)?;
        writeln!(out, "Favorites:     {}", stats.favorite_count)?;
        writeln!(out, "Total usage:   {}", stats.total_usage)?;
        Ok(())
    }

    fn print_tips(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "{}", "How to write effective prompts".bright_cyan().bold())?;
        for (i, tip) in tips::tips().iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, tip.title.bold())?;
            writeln!(out, "   {}", tip.text)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", "Example of a good prompt".bold())?;
        writeln!(out, "   \"{}\"", tips::EXAMPLE_PROMPT)?;
        Ok(())
    }

    fn print_welcome(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Prompt Vault".bright_cyan().bold())?;
        writeln!(
            out,
            "{} templates in {} categories",
            self.session.catalog().len(),
            self.session.catalog().categories().len()
        )?;
        writeln!(out, "Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow())?;
        writeln!(out)?;
        Ok(())
    }

    fn print_help(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Views:".bright_cyan())?;
        writeln!(out, "  {:22} Catalog templates", "/catalog".yellow())?;
        writeln!(out, "  {:22} Saved prompts", "/library".yellow())?;
        writeln!(out, "  {:22} Favorite prompts", "/favorites".yellow())?;
        writeln!(out, "  {:22} Prompt writing tips", "/tips".yellow())?;
        writeln!(out, "  {:22} Switch tab by name", "/tab <name>".yellow())?;
        writeln!(out, "  {:22} Set search text (empty clears)", "/search [text]".yellow())?;
        writeln!(out, "  {:22} Set category filter", "/category <name|all>".yellow())?;
        writeln!(out, "  {:22} List categories", "/categories".yellow())?;
        writeln!(out, "  {:22} Show a template's full text", "/show <id>".yellow())?;
        writeln!(out)?;
        writeln!(out, "{}", "Collection:".bright_cyan())?;
        writeln!(out, "  {:22} Save a catalog template", "/save <id>".yellow())?;
        writeln!(out, "  {:22} Save free text as a prompt", "/new <text>".yellow())?;
        writeln!(out, "  {:22} Save the draft as a prompt", "/create".yellow())?;
        writeln!(out, "  {:22} Copy a prompt (no id: the draft)", "/copy [id]".yellow())?;
        writeln!(out, "  {:22} Toggle favorite", "/fav <id>".yellow())?;
        writeln!(out, "  {:22} Edit a saved prompt", "/edit <id>".yellow())?;
        writeln!(out, "  {:22} Delete a saved prompt", "/delete <id>".yellow())?;
        writeln!(out, "  {:22} Usage totals", "/stats".yellow())?;
        writeln!(out, "  {:22} Write the collection to a JSON file", "/export".yellow())?;
        writeln!(out, "  {:22} Append prompts from a JSON file", "/import <path>".yellow())?;
        writeln!(out)?;
        writeln!(out, "{}", "Draft:".bright_cyan())?;
        writeln!(out, "  {:22} Lines without a leading / are added to the draft", "<text>".yellow())?;
        writeln!(out, "  {:22} Show the draft", "/draft".yellow())?;
        writeln!(out, "  {:22} Clear the draft", "/clear".yellow())?;
        writeln!(out)?;
        writeln!(out, "  {:22} Show this help", "/help".yellow())?;
        writeln!(out, "  {:22} Exit", "/quit".yellow())?;
        writeln!(out)?;
        Ok(())
    }
}

fn print_notice(out: &mut impl Write, notice: &Notice) -> Result<()> {
    let marker = match notice.level {
        NoticeLevel::Success => "✓".green(),
        NoticeLevel::Info => "i".blue(),
        NoticeLevel::Error => "✗".red(),
    };
    writeln!(out, "{} {}", marker, notice)?;
    Ok(())
}

fn print_filter_line(out: &mut impl Write, search: &str, category: &str) -> Result<()> {
    if !search.is_empty() || category != ALL_CATEGORIES {
        writeln!(
            out,
            "{}",
            format!("search: \"{}\"  category: {}", search, category).dimmed()
        )?;
    }
    Ok(())
}

fn print_records(out: &mut impl Write, records: &[&TemplateRecord], empty: &str) -> Result<()> {
    if records.is_empty() {
        writeln!(out, "{}", empty.dimmed())?;
        return Ok(());
    }
    for record in records {
        print_summary(out, record)?;
    }
    Ok(())
}

fn print_summary(out: &mut impl Write, record: &TemplateRecord) -> Result<()> {
    let heart = if record.is_favorite() { " ♥".red().to_string() } else { String::new() };
    let usage = match record.usage_count {
        Some(n) if n > 0 => format!(" used {}x", n).dimmed().to_string(),
        _ => String::new(),
    };
    writeln!(
        out,
        "{} {} {}{}{}",
        format!("[{}]", record.id).yellow(),
        record.title.bold(),
        format!("({})", record.category).dimmed(),
        heart,
        usage
    )?;
    if !record.description.is_empty() {
        writeln!(out, "    {}", record.description)?;
    }
    Ok(())
}
